// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies of the mock API that are not partner wire
//! types. Partner payloads (addresses, callbacks, resends) live in
//! [`crate::partner`] and are exposed as-is.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;

/// Credential pair issued by the partner for a wallet.
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct SetApiCodeRequest {
    pub api_code: String,
    pub api_secret: String,
}

/// Generic success reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommonResponse {
    /// `1` on success.
    pub result: i32,
}

impl CommonResponse {
    pub fn ok() -> Self {
        Self { result: 1 }
    }
}

/// Paging for the deposit address listing.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct AddressListQuery {
    /// First index to return (default 0).
    pub start_index: Option<i64>,
    /// Page size (default 1000).
    pub request_number: Option<i64>,
}

/// Parse the `wallet_id` path segment.
pub fn parse_wallet_id(raw: &str) -> Result<i64, ApiError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::bad_request(format!("Invalid wallet ID: {raw}"))),
    }
}
