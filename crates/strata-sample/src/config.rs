// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Allocator configuration.
//!
//! `AllocatorConfig` is a plain value so that it can be embedded in a larger
//! application configuration (it derives `serde` traits behind the `serde`
//! feature) or read from the environment with `AllocatorConfig::from_env`.

use std::num::ParseIntError;

/// The error type for reading an `AllocatorConfig` from the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {var}: {source}")]
    InvalidSeed {
        var: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("invalid value '{value}' for {var}: expected true or false")]
    InvalidFlag { var: &'static str, value: String },
}

/// Settings of an `Allocator`.
///
/// # Configuration
/// * `seed`: Seeds the generator for reproducible runs. Without a seed every
///   allocator draws fresh entropy from the OS.
/// * `log_requests`: Emits one `tracing` event per served request and a warning
///   for every short request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AllocatorConfig {
    pub seed: Option<u64>,
    pub log_requests: bool,
}

impl AllocatorConfig {
    /// Environment variable holding the seed.
    pub const SEED_VAR: &'static str = "STRATA_SEED";
    /// Environment variable toggling request logging.
    pub const LOG_REQUESTS_VAR: &'static str = "STRATA_LOG_REQUESTS";

    /// Creates the default configuration: unseeded, no request logging.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the seed.
    #[inline]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables request logging.
    #[inline]
    pub fn with_log_requests(mut self, log_requests: bool) -> Self {
        self.log_requests = log_requests;
        self
    }

    /// Reads the configuration from `STRATA_SEED` and `STRATA_LOG_REQUESTS`.
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(Self::SEED_VAR) {
            let seed = value
                .trim()
                .parse::<u64>()
                .map_err(|source| ConfigError::InvalidSeed {
                    var: Self::SEED_VAR,
                    value: value.clone(),
                    source,
                })?;
            config.seed = Some(seed);
        }

        if let Some(value) = lookup(Self::LOG_REQUESTS_VAR) {
            config.log_requests = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidFlag {
                        var: Self::LOG_REQUESTS_VAR,
                        value,
                    });
                }
            };
        }

        Ok(config)
    }
}

impl std::fmt::Display for AllocatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.seed {
            Some(seed) => write!(f, "AllocatorConfig(seed: {}, ", seed)?,
            None => write!(f, "AllocatorConfig(seed: os, ")?,
        }
        write!(f, "log_requests: {})", self.log_requests)
    }
}
