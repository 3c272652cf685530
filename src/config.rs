// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup and is
//! read-only afterwards.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `API_SERVER_URL` | Base URL of the SOFA partner API | `http://localhost:8889` |
//! | `PARTNER_TIMEOUT_SECS` | Timeout for one partner request | `15` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8890` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{
    net::{IpAddr, SocketAddr},
    time::Duration,
};

use url::Url;

use crate::logging::LogFormat;

pub const API_SERVER_URL_ENV: &str = "API_SERVER_URL";
pub const PARTNER_TIMEOUT_ENV: &str = "PARTNER_TIMEOUT_SECS";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_API_SERVER_URL: &str = "http://localhost:8889";
pub const DEFAULT_PARTNER_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8890;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is not a valid URL: {reason}")]
    InvalidUrl { name: &'static str, reason: String },

    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("invalid bind address {0}")]
    InvalidBindAddress(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Prefix for every partner request path. Used verbatim.
    pub api_server_url: String,
    pub partner_timeout: Duration,
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_server_url =
            get(API_SERVER_URL_ENV).unwrap_or_else(|| DEFAULT_API_SERVER_URL.to_string());
        Url::parse(&api_server_url).map_err(|e| ConfigError::InvalidUrl {
            name: API_SERVER_URL_ENV,
            reason: e.to_string(),
        })?;

        let partner_timeout = match get(PARTNER_TIMEOUT_ENV) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        name: PARTNER_TIMEOUT_ENV,
                        value: raw,
                    })
                }
            },
            None => Duration::from_secs(DEFAULT_PARTNER_TIMEOUT_SECS),
        };

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get(PORT_ENV) {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidNumber {
                name: PORT_ENV,
                value: raw.clone(),
            })?,
            None => DEFAULT_PORT,
        };
        let ip: IpAddr = host
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(host.clone()))?;
        let bind_addr = SocketAddr::new(ip, port);

        let log_format = get(LOG_FORMAT_ENV)
            .map(|v| LogFormat::from_str_lossy(&v))
            .unwrap_or(LogFormat::Pretty);

        Ok(Self {
            api_server_url,
            partner_timeout,
            bind_addr,
            log_format,
        })
    }
}
