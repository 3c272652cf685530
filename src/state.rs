// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::{
    config::GatewayConfig,
    partner::{ReqwestTransport, SignedDispatcher},
    store::{InMemoryStore, SharedStore},
};

/// Dispatcher used by the HTTP handlers: credentials come from the shared
/// store, requests go out through reqwest.
pub type PartnerClient = SignedDispatcher<SharedStore, ReqwestTransport>;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub partner: Arc<PartnerClient>,
}

impl AppState {
    pub fn new(store: InMemoryStore, config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let transport = ReqwestTransport::new(config.partner_timeout)?;
        Ok(Self::with_transport(
            store,
            config.api_server_url.clone(),
            transport,
        ))
    }

    pub fn with_transport(
        store: InMemoryStore,
        api_server_url: impl Into<String>,
        transport: ReqwestTransport,
    ) -> Self {
        let store = store.into_shared();
        let partner = SignedDispatcher::new(api_server_url, store.clone(), transport);
        Self {
            store,
            partner: Arc::new(partner),
        }
    }
}
