//! SDK configuration.
//!
//! Loaded from JSON or assembled with [`SdkConfigBuilder`]. Only `rpc_url`
//! is required; everything else falls back to mainnet defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{ProgramIds, DEFAULT_COMPUTE_UNIT_PRICE};
use crate::error::{Result, SdkError};
use crate::rpc::Commitment;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_CONFIRM_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkConfig {
    /// JSON-RPC endpoint.
    pub rpc_url: Url,
    /// Commitment used for reads and as the preflight commitment.
    #[serde(default)]
    pub commitment: Commitment,
    /// Submit without preflight simulation.
    #[serde(default)]
    pub skip_preflight: bool,
    /// Priority fee in micro-lamports per compute unit.
    #[serde(default = "default_compute_unit_price")]
    pub compute_unit_price: u64,
    #[serde(default = "default_request_timeout", with = "millis")]
    pub request_timeout: Duration,
    /// Delay between signature status polls while confirming.
    #[serde(default = "default_poll_interval", with = "millis")]
    pub poll_interval: Duration,
    /// Upper bound on a single confirmation wait.
    #[serde(default = "default_confirm_timeout", with = "millis")]
    pub confirm_timeout: Duration,
    #[serde(default)]
    pub program_ids: ProgramIds,
}

fn default_compute_unit_price() -> u64 {
    DEFAULT_COMPUTE_UNIT_PRICE
}

fn default_request_timeout() -> Duration {
    DEFAULT_REQUEST_TIMEOUT
}

fn default_poll_interval() -> Duration {
    DEFAULT_POLL_INTERVAL
}

fn default_confirm_timeout() -> Duration {
    DEFAULT_CONFIRM_TIMEOUT
}

impl SdkConfig {
    pub fn new(rpc_url: Url) -> Self {
        Self {
            rpc_url,
            commitment: Commitment::default(),
            skip_preflight: false,
            compute_unit_price: DEFAULT_COMPUTE_UNIT_PRICE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            confirm_timeout: DEFAULT_CONFIRM_TIMEOUT,
            program_ids: ProgramIds::default(),
        }
    }

    pub fn builder(rpc_url: Url) -> SdkConfigBuilder {
        SdkConfigBuilder {
            config: Self::new(rpc_url),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SdkError::Configuration(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !matches!(self.rpc_url.scheme(), "http" | "https") {
            return Err(SdkError::Configuration(format!(
                "rpc_url must be http or https, got {}",
                self.rpc_url.scheme()
            )));
        }
        if self.poll_interval.is_zero() {
            return Err(SdkError::Configuration("poll_interval must be non-zero".into()));
        }
        Ok(())
    }
}

/// Builder for [`SdkConfig`].
#[derive(Debug)]
pub struct SdkConfigBuilder {
    config: SdkConfig,
}

impl SdkConfigBuilder {
    pub fn commitment(mut self, commitment: Commitment) -> Self {
        self.config.commitment = commitment;
        self
    }

    pub fn skip_preflight(mut self, skip: bool) -> Self {
        self.config.skip_preflight = skip;
        self
    }

    pub fn compute_unit_price(mut self, micro_lamports: u64) -> Self {
        self.config.compute_unit_price = micro_lamports;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    pub fn confirm_timeout(mut self, timeout: Duration) -> Self {
        self.config.confirm_timeout = timeout;
        self
    }

    pub fn program_ids(mut self, ids: ProgramIds) -> Self {
        self.config.program_ids = ids;
        self
    }

    pub fn build(self) -> Result<SdkConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::STAKE_PROGRAM_ID;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn minimal_json_uses_defaults() {
        let config =
            SdkConfig::from_json_str(r#"{ "rpc_url": "https://api.mainnet-beta.solana.com" }"#)
                .unwrap();
        assert_eq!(config.commitment, Commitment::Confirmed);
        assert!(!config.skip_preflight);
        assert_eq!(config.compute_unit_price, 1_000);
        assert_eq!(config.poll_interval, Duration::from_millis(500));
        assert_eq!(config.program_ids.stake_program, STAKE_PROGRAM_ID);
    }

    #[test]
    fn json_overrides() {
        let json = r#"{
            "rpc_url": "http://localhost:8899",
            "commitment": "finalized",
            "skip_preflight": true,
            "compute_unit_price": 5000,
            "confirm_timeout": 1500,
            "program_ids": { "stake_program": "11111111111111111111111111111111" }
        }"#;
        let config = SdkConfig::from_json_str(json).unwrap();
        assert_eq!(config.commitment, Commitment::Finalized);
        assert!(config.skip_preflight);
        assert_eq!(config.compute_unit_price, 5000);
        assert_eq!(config.confirm_timeout, Duration::from_millis(1500));
        assert_eq!(config.program_ids.stake_program.to_string(), "11111111111111111111111111111111");
    }

    #[test]
    fn missing_url_is_a_configuration_error() {
        let err = SdkConfig::from_json_str("{}").unwrap_err();
        assert!(matches!(err, SdkError::Configuration(_)));
        assert!(err.is_input_error());
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = SdkConfig::builder(url("ws://localhost:8900")).build().unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn builder_sets_fields() {
        let config = SdkConfig::builder(url("http://localhost:8899"))
            .commitment(Commitment::Processed)
            .skip_preflight(true)
            .compute_unit_price(0)
            .poll_interval(Duration::from_millis(10))
            .confirm_timeout(Duration::from_secs(5))
            .request_timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        assert_eq!(config.commitment, Commitment::Processed);
        assert!(config.skip_preflight);
        assert_eq!(config.compute_unit_price, 0);
        assert_eq!(config.request_timeout, Duration::from_secs(2));
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let result = SdkConfig::builder(url("http://localhost:8899"))
            .poll_interval(Duration::ZERO)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn serializes_durations_as_millis() {
        let config = SdkConfig::new(url("http://localhost:8899"));
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["poll_interval"], 500);
        assert_eq!(value["confirm_timeout"], 90_000);
        assert_eq!(value["commitment"], "confirmed");
    }
}
