// Copyright 2025 the Plotlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Why a data load did not produce records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataFetchError {
    /// The request could not be sent or the body could not be read.
    #[error("request to {url} failed: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },

    /// The server answered with a non-success status.
    #[error("request to {url} returned HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The body was not a JSON array of flat records.
    #[error("invalid record data: {0}")]
    Parse(String),
}

/// Errors surfaced by the demo crate.
#[derive(Error, Debug)]
pub enum PlotletError {
    /// A configuration value is out of range or inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading a config file or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A config file is not valid TOML for [`ConfigFile`](crate::ConfigFile).
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Inline JSON data could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An axis selection named a field outside the configured field list.
    #[error("unknown field `{field}` (expected one of: {})", .allowed.join(", "))]
    InvalidField {
        /// The rejected field name.
        field: String,
        /// The configured field list.
        allowed: Vec<String>,
    },

    /// Loading data failed.
    #[error(transparent)]
    Fetch(#[from] DataFetchError),
}

/// Result alias for the demo crate.
pub type Result<T> = std::result::Result<T, PlotletError>;
