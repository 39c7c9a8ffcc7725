//! Payment flow configuration.
//!
//! Defaults target TON mainnet through TON Center and Tonscan. Every field
//! may be overridden from JSON; missing fields keep their defaults.
//!
//! ```
//! use ton_pay::PayConfig;
//!
//! let config = PayConfig::from_json(r#"{ "validity_secs": 300 }"#).unwrap();
//! assert_eq!(config.validity_secs, 300);
//! assert_eq!(config.toncenter_api, "https://toncenter.com/api/v2");
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::amount::{Nanotons, DEFAULT_FEE_ESTIMATE, DEFAULT_MIN_AMOUNT};
use crate::error::{PayError, PayResult};

/// Default TON Center v2 API endpoint.
pub const DEFAULT_TONCENTER_API: &str = "https://toncenter.com/api/v2";

/// Default block explorer.
pub const DEFAULT_EXPLORER_URL: &str = "https://tonscan.org";

/// Default validity window of a transfer request (10 minutes).
pub const DEFAULT_VALIDITY_SECS: u64 = 600;

/// Longest accepted validity window (24 hours).
pub const MAX_VALIDITY_SECS: u64 = 24 * 60 * 60;

/// Default timeout for hash lookups.
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;

/// Configuration for a [`crate::PaymentSession`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PayConfig {
    /// TON Center API base URL, without trailing slash.
    pub toncenter_api: String,
    /// Explorer base URL used for receipt links.
    pub explorer_url: String,
    /// Seconds a transfer request stays valid after creation.
    pub validity_secs: u64,
    /// Smallest amount accepted by the form.
    pub min_amount: Nanotons,
    /// Network fee shown in the payment summary.
    pub fee_estimate: Nanotons,
    /// Timeout for hash lookup requests.
    pub lookup_timeout_secs: u64,
}

impl Default for PayConfig {
    fn default() -> Self {
        Self {
            toncenter_api: DEFAULT_TONCENTER_API.to_string(),
            explorer_url: DEFAULT_EXPLORER_URL.to_string(),
            validity_secs: DEFAULT_VALIDITY_SECS,
            min_amount: DEFAULT_MIN_AMOUNT,
            fee_estimate: DEFAULT_FEE_ESTIMATE,
            lookup_timeout_secs: DEFAULT_LOOKUP_TIMEOUT_SECS,
        }
    }
}

impl PayConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> PayResult<Self> {
        let config: PayConfig =
            serde_json::from_str(json).map_err(|e| PayError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values are usable.
    pub fn validate(&self) -> PayResult<()> {
        if self.validity_secs == 0 || self.validity_secs > MAX_VALIDITY_SECS {
            return Err(PayError::Config(format!(
                "validity_secs must be between 1 and {}: {}",
                MAX_VALIDITY_SECS, self.validity_secs
            )));
        }
        if self.lookup_timeout_secs == 0 {
            return Err(PayError::Config("lookup_timeout_secs must be positive".to_string()));
        }
        let urls = [
            ("toncenter_api", &self.toncenter_api),
            ("explorer_url", &self.explorer_url),
        ];
        for (name, url) in urls {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(PayError::Config(format!("{} must be an http(s) URL: {}", name, url)));
            }
        }
        Ok(())
    }

    /// Validity window as a duration.
    pub fn validity(&self) -> Duration {
        Duration::from_secs(self.validity_secs)
    }

    /// Lookup timeout as a duration.
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    /// Explorer link for a transaction hash, or the explorer home without one.
    pub fn explorer_link(&self, tx_hash: Option<&str>) -> String {
        let base = self.explorer_url.trim_end_matches('/');
        match tx_hash {
            Some(hash) => format!("{}/tx/{}", base, hash),
            None => base.to_string(),
        }
    }
}
