// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Inbound partner callbacks.
//!
//! The partner posts deposit and withdrawal notifications as JSON. A payload
//! that decodes is acknowledged with `OK` straight away; whatever happens to
//! the event afterwards is not the receiver's concern.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use utoipa::ToSchema;

use super::error::PartnerError;

/// Plaintext body that acknowledges a decoded callback.
pub const CALLBACK_ACK: &str = "OK";

/// Deposit/withdrawal notification as sent by the partner.
///
/// Every field is optional on the wire so that new partner fields and
/// partially filled notifications still decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CallbackEvent {
    /// 1 = deposit, 2 = withdrawal, 3 = collect, 4 = airdrop.
    #[serde(rename = "type")]
    pub callback_type: i32,
    pub serial: i64,
    pub order_id: String,
    pub currency: String,
    pub txid: String,
    pub block_height: i64,
    pub tindex: i32,
    pub vout_index: i32,
    pub amount: String,
    pub fees: String,
    pub memo: String,
    pub broadcast_at: i64,
    pub chain_at: i64,
    pub from_address: String,
    pub to_address: String,
    pub wallet_id: i64,
    pub state: i32,
    pub confirm_blocks: i64,
    pub processing_state: i32,
    #[schema(value_type = Object)]
    pub addon: Value,
    pub decimal: i32,
}

/// A decoded callback and its acknowledgment.
#[derive(Debug, Clone)]
pub struct CallbackReceipt {
    pub event: CallbackEvent,
}

impl CallbackReceipt {
    pub fn ack(&self) -> &'static str {
        CALLBACK_ACK
    }
}

/// Decode an inbound callback body.
pub fn receive_callback(raw: &[u8]) -> Result<CallbackReceipt, PartnerError> {
    debug!(payload = %String::from_utf8_lossy(raw), "Callback received");

    let event: CallbackEvent = serde_json::from_slice(raw).map_err(PartnerError::Decode)?;
    debug!(
        wallet_id = event.wallet_id,
        serial = event.serial,
        callback_type = event.callback_type,
        txid = %event.txid,
        "Callback decoded"
    );

    Ok(CallbackReceipt { event })
}
