// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet credentials used to sign partner requests.

use std::{fmt, future::Future};

/// API code and shared secret issued by the partner for one wallet.
///
/// The secret never leaves the process; only the checksum derived from it is
/// sent. `Debug` output redacts it.
#[derive(Clone, PartialEq, Eq)]
pub struct WalletCredential {
    pub wallet_id: i64,
    pub api_code: String,
    pub shared_secret: String,
}

impl WalletCredential {
    pub fn new(wallet_id: i64, api_code: impl Into<String>, shared_secret: impl Into<String>) -> Self {
        Self {
            wallet_id,
            api_code: api_code.into(),
            shared_secret: shared_secret.into(),
        }
    }
}

impl fmt::Debug for WalletCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletCredential")
            .field("wallet_id", &self.wallet_id)
            .field("api_code", &self.api_code)
            .field("shared_secret", &"<redacted>")
            .finish()
    }
}

/// Looks up the credential pair registered for a wallet.
///
/// The dispatcher only ever reads through this trait.
pub trait CredentialResolver: Send + Sync {
    fn lookup(&self, wallet_id: i64) -> impl Future<Output = Option<WalletCredential>> + Send;
}

/// Fixed credential table for exercising the dispatcher without a store.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct StaticCredentials {
    credentials: std::collections::HashMap<i64, WalletCredential>,
}

#[cfg(test)]
impl StaticCredentials {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, credential: WalletCredential) -> Self {
        self.credentials.insert(credential.wallet_id, credential);
        self
    }
}

#[cfg(test)]
impl CredentialResolver for StaticCredentials {
    async fn lookup(&self, wallet_id: i64) -> Option<WalletCredential> {
        self.credentials.get(&wallet_id).cloned()
    }
}
