// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! `X-CHECKSUM` computation for signed partner requests.
//!
//! The checksum is SHA-256 over the request parameters plus the timestamp,
//! sorted byte-wise and joined with `&`, followed by `&secret=<secret>`.
//! The secret is appended after sorting so no caller-supplied parameter can
//! be ordered around it.

use sha2::{Digest, Sha256};

/// Build the lowercase hex checksum for a parameter set.
///
/// `params` are `key=value` entries in any order; a raw request body is
/// passed as one more entry and hashed byte for byte. The result does not
/// depend on insertion order.
pub fn build_checksum<P: AsRef<[u8]>>(params: &[P], secret: &str, timestamp: i64) -> String {
    let timestamp = format!("t={timestamp}");
    let mut parts: Vec<&[u8]> = params.iter().map(AsRef::as_ref).collect();
    parts.push(timestamp.as_bytes());
    parts.sort_unstable();

    let mut payload = parts.join(&b'&');
    payload.extend_from_slice(b"&secret=");
    payload.extend_from_slice(secret.as_bytes());

    let digest = Sha256::digest(&payload);
    format!("{digest:x}")
}
