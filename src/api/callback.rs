// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Partner callback endpoints.

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use tracing::{error, warn};

use crate::{
    error::ApiError,
    models::parse_wallet_id,
    partner::{
        receive_callback, CallbackEvent, CallbackResendRequest, CallbackResendResponse,
        PartnerError,
    },
    state::AppState,
};

/// Receive a deposit/withdrawal notification from the partner.
///
/// Answers `OK` as soon as the payload decodes.
#[utoipa::path(
    post,
    path = "/v1/mock/wallets/callback",
    tag = "Callback",
    request_body = CallbackEvent,
    responses(
        (status = 200, description = "Callback acknowledged", body = String, content_type = "text/plain"),
        (status = 400, description = "Malformed payload")
    )
)]
pub async fn callback(body: Bytes) -> Result<&'static str, ApiError> {
    let receipt = receive_callback(&body).map_err(|e| {
        warn!(error = %e, "Rejected callback");
        ApiError::from(e)
    })?;
    Ok(receipt.ack())
}

/// Ask the partner to deliver earlier callbacks again.
#[utoipa::path(
    post,
    path = "/v1/mock/wallets/{wallet_id}/callback/resend",
    tag = "Callback",
    params(("wallet_id" = i64, Path, description = "Partner wallet ID")),
    request_body = CallbackResendRequest,
    responses(
        (status = 200, description = "Resend accepted by the partner", body = CallbackResendResponse),
        (status = 400, description = "Invalid wallet ID"),
        (status = 404, description = "No API code registered for the wallet"),
        (status = 502, description = "Partner request failed")
    )
)]
pub async fn resend_callback(
    State(state): State<AppState>,
    Path(wallet_id): Path<String>,
    Json(request): Json<CallbackResendRequest>,
) -> Result<Json<CallbackResendResponse>, ApiError> {
    let wallet_id = parse_wallet_id(&wallet_id)?;

    let raw = state
        .partner
        .resend_callback(wallet_id, &request)
        .await
        .map_err(|e| {
            error!(wallet_id, error = %e, "ResendCallback failed");
            ApiError::from(e)
        })?;

    let response: CallbackResendResponse = serde_json::from_slice(&raw)
        .map_err(|e| ApiError::from(PartnerError::InvalidResponse(e.to_string())))?;
    Ok(Json(response))
}
