// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory store for API codes and deposit addresses.
//!
//! Holds what the mock server needs between requests: the credential pair
//! registered per wallet and the deposit addresses the partner has issued.
//! Nothing is persisted across restarts.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;

use crate::error::ApiError;
use crate::partner::{CredentialResolver, WalletCredential};

pub type SharedStore = Arc<RwLock<InMemoryStore>>;

#[derive(Default)]
pub struct InMemoryStore {
    api_codes: HashMap<i64, WalletCredential>,
    deposit_addresses: HashMap<i64, Vec<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    /// Register or replace the credential pair for a wallet.
    pub fn set_api_code(
        &mut self,
        wallet_id: i64,
        api_code: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<(), ApiError> {
        if wallet_id <= 0 {
            return Err(ApiError::bad_request("wallet_id must be positive"));
        }
        let api_code = api_code.into();
        let api_secret = api_secret.into();
        if api_code.trim().is_empty() || api_secret.is_empty() {
            return Err(ApiError::bad_request(
                "api_code and api_secret must not be empty",
            ));
        }

        self.api_codes.insert(
            wallet_id,
            WalletCredential::new(wallet_id, api_code, api_secret),
        );
        Ok(())
    }

    pub fn api_code(&self, wallet_id: i64) -> Option<&WalletCredential> {
        self.api_codes.get(&wallet_id)
    }

    pub fn add_deposit_addresses<I>(&mut self, wallet_id: i64, addresses: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.deposit_addresses
            .entry(wallet_id)
            .or_default()
            .extend(addresses);
    }

    pub fn deposit_addresses(&self, wallet_id: i64) -> &[String] {
        self.deposit_addresses
            .get(&wallet_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl CredentialResolver for SharedStore {
    async fn lookup(&self, wallet_id: i64) -> Option<WalletCredential> {
        self.read().await.api_code(wallet_id).cloned()
    }
}
