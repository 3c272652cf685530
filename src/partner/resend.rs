// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Callback resend requests.
//!
//! Asks the partner to deliver earlier notifications again. Nothing is
//! tracked locally; if the same resend is issued twice the partner decides
//! whether to deliver twice.

use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use super::{
    credentials::CredentialResolver,
    dispatcher::{SignedDispatcher, SignedRequest},
    error::PartnerError,
    transport::Transport,
};

/// Which notification(s) to redeliver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CallbackResendRequest {
    /// Notification serial to resend; `0` resends every failed notification.
    pub notification_id: i64,
}

/// Partner reply to a resend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CallbackResendResponse {
    /// Number of notifications queued for redelivery.
    #[serde(default)]
    pub count: i64,
}

pub fn resend_path(wallet_id: i64) -> String {
    format!("/v1/sofa/wallets/{wallet_id}/collection/notifications/manual")
}

impl<C, T> SignedDispatcher<C, T>
where
    C: CredentialResolver,
    T: Transport,
{
    /// Forward a resend request to the partner, signed with the payload as body.
    ///
    /// Returns the raw partner response.
    pub async fn resend_callback(
        &self,
        wallet_id: i64,
        request: &CallbackResendRequest,
    ) -> Result<Vec<u8>, PartnerError> {
        let body = serde_json::to_vec(request).map_err(|e| {
            PartnerError::InvalidArgument(format!("failed to encode resend request: {e}"))
        })?;

        info!(
            wallet_id,
            notification_id = request.notification_id,
            "Requesting callback resend"
        );
        self.send(SignedRequest::new(wallet_id, "POST", resend_path(wallet_id)).with_body(body))
            .await
    }
}
