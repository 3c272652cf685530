// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet endpoints: API code registration and deposit addresses.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::{error, info};

use crate::{
    error::ApiError,
    models::{parse_wallet_id, AddressListQuery, CommonResponse, SetApiCodeRequest},
    partner::{
        addresses::{DEFAULT_REQUEST_NUMBER, DEFAULT_START_INDEX},
        CreateDepositAddressesRequest, CreateDepositAddressesResponse, DepositAddressList,
    },
    state::AppState,
};

/// Register the partner-issued API code and secret for a wallet.
#[utoipa::path(
    post,
    path = "/v1/mock/wallets/{wallet_id}/apitoken",
    tag = "Wallets",
    params(("wallet_id" = i64, Path, description = "Partner wallet ID")),
    request_body = SetApiCodeRequest,
    responses(
        (status = 200, description = "API code stored", body = CommonResponse),
        (status = 400, description = "Invalid wallet ID or credential")
    )
)]
pub async fn set_api_token(
    State(state): State<AppState>,
    Path(wallet_id): Path<String>,
    Json(request): Json<SetApiCodeRequest>,
) -> Result<Json<CommonResponse>, ApiError> {
    let wallet_id = parse_wallet_id(&wallet_id)?;

    let mut store = state.store.write().await;
    store.set_api_code(wallet_id, request.api_code, request.api_secret)?;
    info!(wallet_id, "API code registered");

    Ok(Json(CommonResponse::ok()))
}

/// Ask the partner for new deposit addresses and remember them.
#[utoipa::path(
    post,
    path = "/v1/mock/wallets/{wallet_id}/addresses",
    tag = "Wallets",
    params(("wallet_id" = i64, Path, description = "Partner wallet ID")),
    request_body = CreateDepositAddressesRequest,
    responses(
        (status = 200, description = "Addresses created", body = CreateDepositAddressesResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "No API code registered for the wallet"),
        (status = 502, description = "Partner request failed")
    )
)]
pub async fn create_deposit_addresses(
    State(state): State<AppState>,
    Path(wallet_id): Path<String>,
    Json(request): Json<CreateDepositAddressesRequest>,
) -> Result<Json<CreateDepositAddressesResponse>, ApiError> {
    let wallet_id = parse_wallet_id(&wallet_id)?;

    let response = state
        .partner
        .create_deposit_addresses(wallet_id, &request)
        .await
        .map_err(|e| {
            error!(wallet_id, error = %e, "CreateDepositWalletAddresses failed");
            ApiError::from(e)
        })?;

    state
        .store
        .write()
        .await
        .add_deposit_addresses(wallet_id, response.addresses.iter().cloned());

    Ok(Json(response))
}

/// List deposit addresses known to the partner.
#[utoipa::path(
    get,
    path = "/v1/mock/wallets/{wallet_id}/addresses",
    tag = "Wallets",
    params(
        ("wallet_id" = i64, Path, description = "Partner wallet ID"),
        AddressListQuery
    ),
    responses(
        (status = 200, description = "Deposit addresses", body = DepositAddressList),
        (status = 400, description = "Invalid wallet ID"),
        (status = 404, description = "No API code registered for the wallet"),
        (status = 502, description = "Partner request failed")
    )
)]
pub async fn get_deposit_addresses(
    State(state): State<AppState>,
    Path(wallet_id): Path<String>,
    Query(query): Query<AddressListQuery>,
) -> Result<Json<DepositAddressList>, ApiError> {
    let wallet_id = parse_wallet_id(&wallet_id)?;
    let start_index = query.start_index.unwrap_or(DEFAULT_START_INDEX);
    let request_number = query.request_number.unwrap_or(DEFAULT_REQUEST_NUMBER);

    let list = state
        .partner
        .deposit_addresses(wallet_id, start_index, request_number)
        .await
        .map_err(|e| {
            error!(wallet_id, error = %e, "GetDepositWalletAddresses failed");
            ApiError::from(e)
        })?;

    Ok(Json(list))
}
