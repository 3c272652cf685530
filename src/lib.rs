// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! SOFA Mock Gateway
//!
//! A mock wallet-service gateway that relays wallet requests to the SOFA
//! partner API with checksum authentication and acknowledges the callbacks
//! the partner sends back.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `partner` - checksum signing, dispatch, callbacks and resends
//! - `store` - in-memory API codes and deposit addresses
//! - `config` / `logging` - startup configuration and tracing setup

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod partner;
pub mod state;
pub mod store;
