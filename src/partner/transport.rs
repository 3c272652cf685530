// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP transport seam between the dispatcher and the network.

use std::{future::Future, time::Duration};

use reqwest::{header::HeaderMap, Client, Method, StatusCode};

use super::error::BoxError;

/// A fully signed request, ready to go on the wire.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// Status and raw body of a partner response.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Sends one request and returns whatever came back.
///
/// Implementations must not retry; a connection or timeout failure is
/// returned as `Err` and any HTTP status is returned as `Ok`.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = Result<TransportResponse, BoxError>> + Send;
}

/// Production transport backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: OutboundRequest) -> Result<TransportResponse, BoxError> {
        let mut builder = self
            .http
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        Ok(TransportResponse { status, body })
    }
}
