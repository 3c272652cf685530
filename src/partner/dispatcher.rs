// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signed request dispatcher.
//!
//! Every partner call is stamped with the current unix time, signed with the
//! wallet's shared secret and sent exactly once:
//!
//! ```text
//! {base_url}{path}?t={unix}[&k=v...]
//! X-API-CODE: <api code>
//! X-CHECKSUM: sha256(sorted(params + t [+ body]) & secret=<secret>)
//! ```
//!
//! Query parameters appear in the URL in declaration order, while the
//! checksum sorts them. The partner verifies against exactly this scheme.

use chrono::Utc;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE},
    Method, StatusCode,
};
use tracing::{debug, warn};

use super::{
    checksum::build_checksum,
    credentials::CredentialResolver,
    error::PartnerError,
    transport::{OutboundRequest, Transport},
};

pub const API_CODE_HEADER: HeaderName = HeaderName::from_static("x-api-code");
pub const CHECKSUM_HEADER: HeaderName = HeaderName::from_static("x-checksum");

/// One outbound call before signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub wallet_id: i64,
    pub method: String,
    pub path: String,
    /// `key=value` pairs, already encoded by the caller.
    pub query_params: Vec<String>,
    pub body: Option<Vec<u8>>,
    /// Unix seconds; also sent as the `t` query parameter.
    pub timestamp: i64,
}

impl SignedRequest {
    /// Start a request stamped with the current time.
    pub fn new(wallet_id: i64, method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            wallet_id,
            method: method.into(),
            path: path.into(),
            query_params: Vec::new(),
            body: None,
            timestamp: Utc::now().timestamp(),
        }
    }

    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query_params.extend(params.into_iter().map(Into::into));
        self
    }

    /// Attach a JSON body. Requests with a body are always sent as `POST`.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn at(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    fn validate(&self) -> Result<(), PartnerError> {
        if self.wallet_id <= 0 {
            return Err(PartnerError::InvalidArgument(format!(
                "wallet id must be positive, got {}",
                self.wallet_id
            )));
        }
        if self.method.is_empty() {
            return Err(PartnerError::InvalidArgument(
                "HTTP method must not be empty".to_string(),
            ));
        }
        if self.path.is_empty() {
            return Err(PartnerError::InvalidArgument(
                "API path must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn url(&self, base_url: &str) -> String {
        let mut url = format!("{base_url}{}?t={}", self.path, self.timestamp);
        if !self.query_params.is_empty() {
            url.push('&');
            url.push_str(&self.query_params.join("&"));
        }
        url
    }
}

/// Signs and sends partner requests for any wallet the resolver knows.
///
/// Holds no per-call state, so one instance is shared by all handlers.
#[derive(Debug, Clone)]
pub struct SignedDispatcher<C, T> {
    base_url: String,
    credentials: C,
    transport: T,
}

impl<C, T> SignedDispatcher<C, T>
where
    C: CredentialResolver,
    T: Transport,
{
    pub fn new(base_url: impl Into<String>, credentials: C, transport: T) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
            transport,
        }
    }

    /// Sign and send one request stamped with the current time.
    ///
    /// Returns the raw response body on HTTP 200.
    pub async fn dispatch(
        &self,
        wallet_id: i64,
        method: &str,
        api_path: &str,
        query_params: &[String],
        body: Option<&[u8]>,
    ) -> Result<Vec<u8>, PartnerError> {
        let mut request =
            SignedRequest::new(wallet_id, method, api_path).with_params(query_params.iter().cloned());
        if let Some(body) = body {
            request = request.with_body(body);
        }
        self.send(request).await
    }

    /// Sign and send a prepared request.
    pub async fn send(&self, request: SignedRequest) -> Result<Vec<u8>, PartnerError> {
        request.validate()?;

        let url = request.url(&self.base_url);
        let mut signed_params: Vec<&[u8]> =
            request.query_params.iter().map(|p| p.as_bytes()).collect();
        let method = match &request.body {
            Some(body) => {
                // The whole body is signed byte for byte, not just the fields the partner reads.
                signed_params.push(body.as_slice());
                Method::POST
            }
            None => Method::from_bytes(request.method.as_bytes()).map_err(|_| {
                PartnerError::InvalidArgument(format!("unsupported HTTP method {}", request.method))
            })?,
        };

        let credential = self
            .credentials
            .lookup(request.wallet_id)
            .await
            .ok_or(PartnerError::CredentialNotFound(request.wallet_id))?;

        let checksum = build_checksum(&signed_params, &credential.shared_secret, request.timestamp);

        let mut headers = HeaderMap::new();
        headers.insert(API_CODE_HEADER, header_value(&credential.api_code)?);
        headers.insert(CHECKSUM_HEADER, header_value(&checksum)?);
        if request.body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        debug!(wallet_id = request.wallet_id, %method, url = %url, "Signed partner request");
        debug!(wallet_id = request.wallet_id, checksum = %checksum, "X-CHECKSUM");

        let response = self
            .transport
            .execute(OutboundRequest {
                method,
                url,
                headers,
                body: request.body,
            })
            .await
            .map_err(|e| {
                warn!(wallet_id = request.wallet_id, error = %e, "Partner request failed");
                PartnerError::Transport(e)
            })?;

        if response.status != StatusCode::OK {
            warn!(
                wallet_id = request.wallet_id,
                status = %response.status,
                "Partner returned non-success status"
            );
            return Err(PartnerError::Upstream {
                status: response.status,
                body: response.body,
            });
        }

        Ok(response.body)
    }
}

fn header_value(value: &str) -> Result<HeaderValue, PartnerError> {
    HeaderValue::from_str(value).map_err(|_| {
        PartnerError::InvalidArgument("credential is not a valid header value".to_string())
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use sha2::{Digest, Sha256};
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;
    use crate::partner::{
        credentials::{StaticCredentials, WalletCredential},
        error::BoxError,
        transport::TransportResponse,
    };

    /// Test transport that records every request and answers with a canned reply.
    #[derive(Clone)]
    pub(crate) struct RecordingTransport {
        pub requests: Arc<Mutex<Vec<OutboundRequest>>>,
        status: StatusCode,
        body: Vec<u8>,
        fail: bool,
    }

    impl RecordingTransport {
        pub(crate) fn replying(status: StatusCode, body: &[u8]) -> Self {
            Self {
                requests: Arc::new(Mutex::new(Vec::new())),
                status,
                body: body.to_vec(),
                fail: false,
            }
        }

        pub(crate) fn ok(body: &[u8]) -> Self {
            Self::replying(StatusCode::OK, body)
        }

        fn unreachable() -> Self {
            Self {
                fail: true,
                ..Self::ok(b"")
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        pub(crate) fn last(&self) -> OutboundRequest {
            self.requests.lock().unwrap().last().cloned().expect("a request was sent")
        }
    }

    impl Transport for RecordingTransport {
        async fn execute(&self, request: OutboundRequest) -> Result<TransportResponse, BoxError> {
            self.requests.lock().unwrap().push(request);
            if self.fail {
                return Err(Box::new(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )));
            }
            Ok(TransportResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    const BASE_URL: &str = "http://partner.test";

    fn dispatcher(
        transport: RecordingTransport,
    ) -> SignedDispatcher<StaticCredentials, RecordingTransport> {
        let credentials = StaticCredentials::new().with(WalletCredential::new(42, "abc", "xyz"));
        SignedDispatcher::new(BASE_URL, credentials, transport)
    }

    fn params(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn header(request: &OutboundRequest, name: &HeaderName) -> String {
        request
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    #[tokio::test]
    async fn signs_get_request_with_sorted_checksum_and_declared_url() {
        let transport = RecordingTransport::ok(br#"{"ok":true}"#);
        let dispatcher = dispatcher(transport.clone());

        let request = SignedRequest::new(42, "GET", "/wallets/42/addresses")
            .with_params(["start_index=0", "request_number=10"])
            .at(1_700_000_000);
        let body = dispatcher.send(request).await.unwrap();
        assert_eq!(body, br#"{"ok":true}"#);

        let sent = transport.last();
        assert_eq!(sent.method, Method::GET);
        assert_eq!(
            sent.url,
            "http://partner.test/wallets/42/addresses?t=1700000000&start_index=0&request_number=10"
        );
        let expected = format!(
            "{:x}",
            Sha256::digest(b"request_number=10&start_index=0&t=1700000000&secret=xyz")
        );
        assert_eq!(header(&sent, &CHECKSUM_HEADER), expected);
        assert_eq!(header(&sent, &API_CODE_HEADER), "abc");
        assert!(sent.headers.get(CONTENT_TYPE).is_none());
        assert!(sent.body.is_none());
    }

    #[tokio::test]
    async fn url_without_params_only_carries_timestamp() {
        let transport = RecordingTransport::ok(b"{}");
        let dispatcher = dispatcher(transport.clone());

        dispatcher
            .send(SignedRequest::new(42, "GET", "/v1/info").at(5))
            .await
            .unwrap();
        assert_eq!(transport.last().url, "http://partner.test/v1/info?t=5");
    }

    #[tokio::test]
    async fn body_forces_post_and_joins_checksum() {
        let transport = RecordingTransport::ok(b"{}");
        let dispatcher = dispatcher(transport.clone());

        let request = SignedRequest::new(42, "GET", "/v1/sofa/wallets/42/addresses")
            .with_body(br#"{"count":2}"#.to_vec())
            .at(10);
        dispatcher.send(request).await.unwrap();

        let sent = transport.last();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.body.as_deref(), Some(&br#"{"count":2}"#[..]));
        assert_eq!(header(&sent, &CONTENT_TYPE), "application/json");
        let expected = format!("{:x}", Sha256::digest(br#"t=10&{"count":2}&secret=xyz"#));
        assert_eq!(header(&sent, &CHECKSUM_HEADER), expected);
    }

    #[tokio::test]
    async fn different_bodies_produce_different_checksums() {
        let transport = RecordingTransport::ok(b"{}");
        let dispatcher = dispatcher(transport.clone());
        let query = params(&["a=1"]);

        let first = SignedRequest::new(42, "POST", "/x")
            .with_params(query.clone())
            .with_body(br#"{"count":1}"#.to_vec())
            .at(99);
        let second = SignedRequest::new(42, "POST", "/x")
            .with_params(query)
            .with_body(br#"{"count":2}"#.to_vec())
            .at(99);
        dispatcher.send(first).await.unwrap();
        let first_checksum = header(&transport.last(), &CHECKSUM_HEADER);
        dispatcher.send(second).await.unwrap();
        let second_checksum = header(&transport.last(), &CHECKSUM_HEADER);

        assert_ne!(first_checksum, second_checksum);
    }

    #[tokio::test]
    async fn non_utf8_bodies_are_signed_byte_for_byte() {
        let transport = RecordingTransport::ok(b"{}");
        let dispatcher = dispatcher(transport.clone());

        let mut checksums = Vec::new();
        for body in [vec![0xffu8], vec![0xfeu8]] {
            let request = SignedRequest::new(42, "POST", "/x")
                .with_params(["a=1"])
                .with_body(body)
                .at(99);
            dispatcher.send(request).await.unwrap();
            checksums.push(header(&transport.last(), &CHECKSUM_HEADER));
        }
        assert_ne!(checksums[0], checksums[1]);

        let mut expected = b"a=1&t=99&".to_vec();
        expected.push(0xff);
        expected.extend_from_slice(b"&secret=xyz");
        assert_eq!(checksums[0], format!("{:x}", Sha256::digest(&expected)));
    }

    #[tokio::test]
    async fn invalid_arguments_short_circuit_before_network() {
        let transport = RecordingTransport::ok(b"{}");
        let dispatcher = dispatcher(transport.clone());
        let query = params(&["a=1"]);

        for (wallet_id, method, path) in [(0, "GET", "/x"), (-3, "GET", "/x"), (42, "", "/x"), (42, "GET", "")] {
            let err = dispatcher
                .dispatch(wallet_id, method, path, &query, None)
                .await
                .unwrap_err();
            assert!(matches!(err, PartnerError::InvalidArgument(_)), "{err}");
        }
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn malformed_method_is_invalid_argument() {
        let transport = RecordingTransport::ok(b"{}");
        let dispatcher = dispatcher(transport.clone());

        let err = dispatcher
            .dispatch(42, "GE T", "/x", &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, PartnerError::InvalidArgument(_)));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn unknown_wallet_fails_without_network() {
        let transport = RecordingTransport::ok(b"{}");
        let dispatcher = dispatcher(transport.clone());

        let err = dispatcher.dispatch(7, "GET", "/x", &[], None).await.unwrap_err();
        assert!(matches!(err, PartnerError::CredentialNotFound(7)));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn upstream_error_returns_status_and_body() {
        let transport = RecordingTransport::replying(StatusCode::SERVICE_UNAVAILABLE, b"busy");
        let dispatcher = dispatcher(transport.clone());

        let err = dispatcher.dispatch(42, "GET", "/x", &[], None).await.unwrap_err();
        match &err {
            PartnerError::Upstream { status, body } => {
                assert_eq!(*status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(body, b"busy");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
        assert_eq!(err.response_body(), Some(&b"busy"[..]));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn non_200_success_codes_are_still_upstream_errors() {
        let transport = RecordingTransport::replying(StatusCode::CREATED, b"{}");
        let dispatcher = dispatcher(transport);

        let err = dispatcher.dispatch(42, "GET", "/x", &[], None).await.unwrap_err();
        assert!(matches!(err, PartnerError::Upstream { status, .. } if status == StatusCode::CREATED));
    }

    #[tokio::test]
    async fn transport_failure_is_not_retried() {
        let transport = RecordingTransport::unreachable();
        let dispatcher = dispatcher(transport.clone());

        let err = dispatcher.dispatch(42, "GET", "/x", &[], None).await.unwrap_err();
        assert!(matches!(err, PartnerError::Transport(_)));
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn debug_trace_never_contains_secret() {
        let logs = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let transport = RecordingTransport::ok(b"{}");
        let credentials =
            StaticCredentials::new().with(WalletCredential::new(42, "abc", "s3cr3t-value"));
        let dispatcher = SignedDispatcher::new(BASE_URL, credentials, transport.clone());
        dispatcher
            .send(
                SignedRequest::new(42, "POST", "/v1/sofa/wallets/42/callback/resend")
                    .with_body(br#"{"notification_id":0}"#.to_vec()),
            )
            .await
            .unwrap();

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        let checksum = header(&transport.last(), &CHECKSUM_HEADER);
        assert!(output.contains(&checksum), "checksum should be traced: {output}");
        assert!(output.contains("/v1/sofa/wallets/42/callback/resend?t="));
        assert!(!output.contains("s3cr3t-value"));
    }
}
