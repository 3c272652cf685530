// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Deposit address calls on the partner API.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use utoipa::ToSchema;

use super::{
    credentials::CredentialResolver,
    dispatcher::{SignedDispatcher, SignedRequest},
    error::PartnerError,
    transport::Transport,
};

pub const DEFAULT_START_INDEX: i64 = 0;
pub const DEFAULT_REQUEST_NUMBER: i64 = 1000;

/// Request for new deposit addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateDepositAddressesRequest {
    /// Number of addresses to create.
    pub count: i64,
    /// Optional memos, one per address, for memo-based currencies.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub memos: Vec<String>,
}

/// Addresses created by the partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateDepositAddressesResponse {
    #[serde(default)]
    pub addresses: Vec<String>,
}

/// One deposit address in a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct DepositAddress {
    pub currency: i64,
    pub token_address: String,
    pub address: String,
    pub memo: String,
}

/// A page of deposit addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct DepositAddressList {
    pub wallet_id: i64,
    pub wallet_count: i64,
    pub wallet_address: Vec<DepositAddress>,
}

fn addresses_path(wallet_id: i64) -> String {
    format!("/v1/sofa/wallets/{wallet_id}/addresses")
}

fn decode<R: DeserializeOwned>(raw: &[u8]) -> Result<R, PartnerError> {
    serde_json::from_slice(raw).map_err(|e| PartnerError::InvalidResponse(e.to_string()))
}

impl<C, T> SignedDispatcher<C, T>
where
    C: CredentialResolver,
    T: Transport,
{
    pub async fn create_deposit_addresses(
        &self,
        wallet_id: i64,
        request: &CreateDepositAddressesRequest,
    ) -> Result<CreateDepositAddressesResponse, PartnerError> {
        if request.count <= 0 {
            return Err(PartnerError::InvalidArgument(
                "count must be positive".to_string(),
            ));
        }
        let body = serde_json::to_vec(request).map_err(|e| {
            PartnerError::InvalidArgument(format!("failed to encode address request: {e}"))
        })?;

        let raw = self
            .send(SignedRequest::new(wallet_id, "POST", addresses_path(wallet_id)).with_body(body))
            .await?;
        decode(&raw)
    }

    pub async fn deposit_addresses(
        &self,
        wallet_id: i64,
        start_index: i64,
        request_number: i64,
    ) -> Result<DepositAddressList, PartnerError> {
        let request = SignedRequest::new(wallet_id, "GET", addresses_path(wallet_id)).with_params([
            format!("start_index={start_index}"),
            format!("request_number={request_number}"),
        ]);
        let raw = self.send(request).await?;
        decode(&raw)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;

    use super::*;
    use crate::partner::{
        credentials::{StaticCredentials, WalletCredential},
        dispatcher::tests::RecordingTransport,
    };

    fn dispatcher(
        transport: RecordingTransport,
    ) -> SignedDispatcher<StaticCredentials, RecordingTransport> {
        SignedDispatcher::new(
            "http://partner.test",
            StaticCredentials::new().with(WalletCredential::new(42, "abc", "xyz")),
            transport,
        )
    }

    #[tokio::test]
    async fn create_posts_count_and_decodes_addresses() {
        let transport = RecordingTransport::ok(br#"{"addresses":["0xaa","0xbb"]}"#);
        let dispatcher = dispatcher(transport.clone());

        let response = dispatcher
            .create_deposit_addresses(
                42,
                &CreateDepositAddressesRequest {
                    count: 2,
                    memos: Vec::new(),
                },
            )
            .await
            .unwrap();
        assert_eq!(response.addresses, vec!["0xaa", "0xbb"]);

        let sent = transport.last();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.body.as_deref(), Some(&br#"{"count":2}"#[..]));
    }

    #[tokio::test]
    async fn create_rejects_non_positive_count() {
        let transport = RecordingTransport::ok(b"{}");
        let dispatcher = dispatcher(transport.clone());

        let err = dispatcher
            .create_deposit_addresses(
                42,
                &CreateDepositAddressesRequest {
                    count: 0,
                    memos: Vec::new(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PartnerError::InvalidArgument(_)));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn listing_sends_paging_params_in_order() {
        let transport = RecordingTransport::ok(
            br#"{"wallet_id":42,"wallet_count":1,"wallet_address":[{"currency":60,"address":"0xaa"}]}"#,
        );
        let dispatcher = dispatcher(transport.clone());

        let list = dispatcher.deposit_addresses(42, 0, 10).await.unwrap();
        assert_eq!(list.wallet_count, 1);
        assert_eq!(list.wallet_address[0].address, "0xaa");
        assert_eq!(list.wallet_address[0].memo, "");

        let sent = transport.last();
        assert_eq!(sent.method, Method::GET);
        assert!(sent.url.ends_with("&start_index=0&request_number=10"));
    }

    #[tokio::test]
    async fn undecodable_success_body_is_invalid_response() {
        let transport = RecordingTransport::ok(b"<html>oops</html>");
        let dispatcher = dispatcher(transport);

        let err = dispatcher.deposit_addresses(42, 0, 10).await.unwrap_err();
        assert!(matches!(err, PartnerError::InvalidResponse(_)));
    }
}
