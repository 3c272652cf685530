// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{CommonResponse, SetApiCodeRequest},
    partner::{
        CallbackEvent, CallbackResendRequest, CallbackResendResponse,
        CreateDepositAddressesRequest, CreateDepositAddressesResponse, DepositAddress,
        DepositAddressList,
    },
    state::AppState,
};

pub mod callback;
pub mod health;
pub mod wallets;

pub fn router(state: AppState) -> Router {
    let mock_routes = Router::new()
        .route(
            "/wallets/{wallet_id}/apitoken",
            post(wallets::set_api_token),
        )
        .route(
            "/wallets/{wallet_id}/addresses",
            get(wallets::get_deposit_addresses).post(wallets::create_deposit_addresses),
        )
        .route("/wallets/callback", post(callback::callback))
        .route(
            "/wallets/{wallet_id}/callback/resend",
            post(callback::resend_callback),
        )
        .with_state(state);

    Router::new()
        .route("/health", get(health::liveness))
        .nest("/v1/mock", mock_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::liveness,
        wallets::set_api_token,
        wallets::create_deposit_addresses,
        wallets::get_deposit_addresses,
        callback::callback,
        callback::resend_callback
    ),
    components(
        schemas(
            SetApiCodeRequest,
            CommonResponse,
            CreateDepositAddressesRequest,
            CreateDepositAddressesResponse,
            DepositAddress,
            DepositAddressList,
            CallbackEvent,
            CallbackResendRequest,
            CallbackResendResponse,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Wallets", description = "API codes and deposit addresses"),
        (name = "Callback", description = "Partner callbacks and resends")
    )
)]
struct ApiDoc;
