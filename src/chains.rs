use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ChainId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("Unsupported chain: {0}")]
    UnsupportedChain(ChainId),

    #[error("{0} is not a valid chain id")]
    InvalidChainId(String),
}

/// Networks the contracts are deployed to.
///
/// Variants are declared in ascending chain id order, which is the order
/// chains appear in inside the generated registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum SupportedChain {
    Goerli,
    BaseGoerli,
    BaseSepolia,
    ScrollSepolia,
    Sepolia,
    OptimismSepolia,
}

impl SupportedChain {
    /// Canonical order. The first entry is the default chain.
    pub const ALL: [SupportedChain; 6] = [
        SupportedChain::BaseSepolia,
        SupportedChain::Sepolia,
        SupportedChain::OptimismSepolia,
        SupportedChain::ScrollSepolia,
        SupportedChain::Goerli,
        SupportedChain::BaseGoerli,
    ];

    pub const fn default_chain() -> Self {
        Self::ALL[0]
    }

    pub const fn id(self) -> ChainId {
        match self {
            SupportedChain::Goerli => 5,
            SupportedChain::BaseGoerli => 84531,
            SupportedChain::BaseSepolia => 84532,
            SupportedChain::ScrollSepolia => 534351,
            SupportedChain::Sepolia => 11155111,
            SupportedChain::OptimismSepolia => 11155420,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            SupportedChain::Goerli => "Goerli",
            SupportedChain::BaseGoerli => "Base Goerli",
            SupportedChain::BaseSepolia => "Base Sepolia",
            SupportedChain::ScrollSepolia => "Scroll Sepolia",
            SupportedChain::Sepolia => "Sepolia",
            SupportedChain::OptimismSepolia => "OP Sepolia",
        }
    }

    pub fn from_id(chain_id: ChainId) -> Result<Self, ChainError> {
        Self::ALL
            .into_iter()
            .find(|chain| chain.id() == chain_id)
            .ok_or(ChainError::UnsupportedChain(chain_id))
    }
}

impl Default for SupportedChain {
    fn default() -> Self {
        Self::default_chain()
    }
}

impl TryFrom<u64> for SupportedChain {
    type Error = ChainError;

    fn try_from(chain_id: u64) -> Result<Self, Self::Error> {
        Self::from_id(chain_id)
    }
}

impl From<SupportedChain> for u64 {
    fn from(chain: SupportedChain) -> Self {
        chain.id()
    }
}

impl FromStr for SupportedChain {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chain_id: ChainId = s
            .trim()
            .parse()
            .map_err(|_| ChainError::InvalidChainId(s.to_string()))?;

        Self::from_id(chain_id)
    }
}

impl fmt::Display for SupportedChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.id())
    }
}
