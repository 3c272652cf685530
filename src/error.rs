// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::partner::PartnerError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    error_code: u16,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }
}

impl From<PartnerError> for ApiError {
    fn from(err: PartnerError) -> Self {
        match &err {
            PartnerError::InvalidArgument(_) | PartnerError::Decode(_) => {
                Self::bad_request(err.to_string())
            }
            PartnerError::CredentialNotFound(_) => Self::not_found(err.to_string()),
            PartnerError::Transport(_)
            | PartnerError::Upstream { .. }
            | PartnerError::InvalidResponse(_) => Self::bad_gateway(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
            error_code: self.status.as_u16(),
        });
        (self.status, body).into_response()
    }
}
