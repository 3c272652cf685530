// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Errors surfaced by the partner protocol core.

use reqwest::StatusCode;

/// Boxed cause of a transport failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum PartnerError {
    /// Caller input was rejected before any network I/O.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no API code registered for wallet {0}")]
    CredentialNotFound(i64),

    #[error("partner request failed: {0}")]
    Transport(#[source] BoxError),

    /// The partner answered with something other than 200. The body is kept
    /// so callers can inspect partner diagnostics.
    #[error("partner returned {status}: {}", String::from_utf8_lossy(.body))]
    Upstream { status: StatusCode, body: Vec<u8> },

    /// An inbound callback payload could not be decoded.
    #[error("malformed callback payload: {0}")]
    Decode(#[source] serde_json::Error),

    /// A 200 partner response did not match the expected shape.
    #[error("partner response was invalid: {0}")]
    InvalidResponse(String),
}

impl PartnerError {
    /// Response bytes that accompany the error, if the partner sent any.
    pub fn response_body(&self) -> Option<&[u8]> {
        match self {
            PartnerError::Upstream { body, .. } => Some(body),
            _ => None,
        }
    }
}
