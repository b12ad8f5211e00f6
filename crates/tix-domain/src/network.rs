//! Consensus parameters that drive ticket classification.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Blocks a vote must be buried under before its reward is spendable.
pub const VOTE_MATURITY_BLOCKS: i64 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet3,
    Simnet,
}

impl Network {
    pub fn params(self) -> NetworkParams {
        match self {
            Network::Mainnet => NetworkParams::new(256, 40_960),
            Network::Testnet3 => NetworkParams::new(16, 6_144),
            Network::Simnet => NetworkParams::new(16, 384),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet3 => "testnet3",
            Network::Simnet => "simnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" | "testnet3" => Ok(Network::Testnet3),
            "simnet" => Ok(Network::Simnet),
            other => Err(format!("unknown network `{other}`")),
        }
    }
}

/// Height deltas used to place a ticket in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkParams {
    pub ticket_maturity: i64,
    pub ticket_expiry: i64,
    #[serde(default = "NetworkParams::default_vote_maturity")]
    pub vote_maturity: i64,
}

impl NetworkParams {
    pub fn new(ticket_maturity: i64, ticket_expiry: i64) -> Self {
        Self {
            ticket_maturity,
            ticket_expiry,
            vote_maturity: VOTE_MATURITY_BLOCKS,
        }
    }

    pub fn with_vote_maturity(mut self, vote_maturity: i64) -> Self {
        self.vote_maturity = vote_maturity;
        self
    }

    pub fn default_vote_maturity() -> i64 {
        VOTE_MATURITY_BLOCKS
    }
}

impl Default for NetworkParams {
    fn default() -> Self {
        Network::default().params()
    }
}
