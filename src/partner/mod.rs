// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # SOFA Partner Protocol
//!
//! Checksum-authenticated calls to the partner wallet API and handling of
//! the callbacks it sends back.
//!
//! - [`checksum`] - `X-CHECKSUM` computation
//! - [`dispatcher`] - signs, sends and classifies one request
//! - [`callback`] - decodes and acknowledges inbound notifications
//! - [`resend`] - asks the partner to redeliver notifications
//! - [`addresses`] - deposit address calls
//!
//! None of these hold state between calls; the only lookup is the wallet's
//! credential pair through [`CredentialResolver`].

pub mod addresses;
pub mod callback;
pub mod checksum;
pub mod credentials;
pub mod dispatcher;
pub mod error;
pub mod resend;
pub mod transport;

pub use addresses::{
    CreateDepositAddressesRequest, CreateDepositAddressesResponse, DepositAddress,
    DepositAddressList,
};
pub use callback::{receive_callback, CallbackEvent, CallbackReceipt, CALLBACK_ACK};
pub use checksum::build_checksum;
pub use credentials::{CredentialResolver, WalletCredential};
pub use dispatcher::{SignedDispatcher, SignedRequest, API_CODE_HEADER, CHECKSUM_HEADER};
pub use error::PartnerError;
pub use resend::{CallbackResendRequest, CallbackResendResponse};
pub use transport::{OutboundRequest, ReqwestTransport, Transport, TransportResponse};
