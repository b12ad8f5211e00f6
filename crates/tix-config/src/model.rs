use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tix_domain::{Network, NetworkParams};

use crate::ConfigError;

/// Analyzer settings. Unset overrides fall back to the network preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: Network,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_maturity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_expiry: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_maturity: Option<i64>,
    /// Lowest block height to classify. Raising it skips old history.
    #[serde(default = "Config::default_starting_height")]
    pub starting_height: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: Network::default(),
            ticket_maturity: None,
            ticket_expiry: None,
            vote_maturity: None,
            starting_height: Self::default_starting_height(),
        }
    }
}

impl Config {
    pub fn default_starting_height() -> i64 {
        1
    }

    /// Default location: `<config dir>/ticket_core/config.json`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ticket_core")
            .join("config.json")
    }

    /// Network preset with any overrides applied.
    pub fn network_params(&self) -> Result<NetworkParams, ConfigError> {
        let preset = self.network.params();
        let params = NetworkParams {
            ticket_maturity: self.ticket_maturity.unwrap_or(preset.ticket_maturity),
            ticket_expiry: self.ticket_expiry.unwrap_or(preset.ticket_expiry),
            vote_maturity: self.vote_maturity.unwrap_or(preset.vote_maturity),
        };
        if params.ticket_maturity < 0 || params.vote_maturity < 0 {
            return Err(ConfigError::Invalid(
                "maturity windows must not be negative".into(),
            ));
        }
        if params.ticket_expiry < params.ticket_maturity {
            return Err(ConfigError::Invalid(format!(
                "ticket expiry {} is shorter than ticket maturity {}",
                params.ticket_expiry, params.ticket_maturity
            )));
        }
        Ok(params)
    }
}
