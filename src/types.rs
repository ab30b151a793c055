use std::{
    collections::BTreeMap,
    fmt::{self, Display},
    str::FromStr,
};

use serde::Serialize;
use thiserror::Error;

use crate::{chains::SupportedChain, contracts::DesiredContract};

pub type ChainId = u64;

pub type ChainAddresses = BTreeMap<SupportedChain, Address>;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Contract address {0} is not a valid hex string")]
pub struct AddressError(pub String);

/// A `0x`-prefixed, 20-byte hex address. The original text is kept as is.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    const HEX_LEN: usize = 40;

    pub fn parse(value: &str) -> Result<Self, AddressError> {
        let invalid = || AddressError(value.to_string());

        let digits = value.strip_prefix("0x").ok_or_else(invalid)?;
        if digits.len() != Self::HEX_LEN {
            return Err(invalid());
        }
        hex::decode(digits).map_err(|_| invalid())?;

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contract name to per-chain address table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DeploymentRegistry {
    contracts: BTreeMap<DesiredContract, ChainAddresses>,
}

impl DeploymentRegistry {
    /// Records `address` for the pair, returning the address it replaced.
    pub(crate) fn insert(
        &mut self,
        contract: DesiredContract,
        chain: SupportedChain,
        address: Address,
    ) -> Option<Address> {
        self.contracts
            .entry(contract)
            .or_default()
            .insert(chain, address)
    }

    pub fn get(&self, contract: DesiredContract) -> Option<&ChainAddresses> {
        self.contracts.get(&contract)
    }

    pub fn address(&self, contract: DesiredContract, chain: SupportedChain) -> Option<&Address> {
        self.get(contract).and_then(|chains| chains.get(&chain))
    }

    pub fn contracts(&self) -> impl Iterator<Item = (&DesiredContract, &ChainAddresses)> {
        self.contracts.iter()
    }

    /// Every contract deployed on `chain`.
    pub fn on_chain(&self, chain: SupportedChain) -> BTreeMap<DesiredContract, &Address> {
        self.contracts
            .iter()
            .filter_map(|(contract, chains)| chains.get(&chain).map(|a| (*contract, a)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    #[test]
    fn test_parse_valid_address_keeps_original_text() {
        let address = Address::parse(VALID).unwrap();
        assert_eq!(address.as_str(), VALID);

        let lower = Address::parse("0xabcdefabcdefabcdefabcdefabcdefabcdefabcd").unwrap();
        assert_eq!(lower.to_string(), "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd");
    }

    #[test]
    fn test_parse_rejects_malformed_addresses() {
        for value in [
            "not-hex",
            "",
            "0x",
            "5FbDB2315678afecb367f032d93F642f64180aa3",
            "0X5FbDB2315678afecb367f032d93F642f64180aa3",
            "0x5FbDB2315678afecb367f032d93F642f64180aa",
            "0x5FbDB2315678afecb367f032d93F642f64180aa3f",
            "0xZZbDB2315678afecb367f032d93F642f64180aa3",
        ] {
            assert_eq!(
                Address::parse(value),
                Err(AddressError(value.to_string())),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn test_address_error_names_value() {
        let err = Address::parse("not-hex").unwrap_err();
        assert!(err.to_string().contains("not-hex"));
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = DeploymentRegistry::default();
        assert!(registry.is_empty());

        let address = Address::parse(VALID).unwrap();
        let replaced = registry.insert(
            DesiredContract::Witness,
            SupportedChain::Goerli,
            address.clone(),
        );
        assert_eq!(replaced, None);

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.address(DesiredContract::Witness, SupportedChain::Goerli),
            Some(&address)
        );
        assert_eq!(
            registry.address(DesiredContract::Witness, SupportedChain::Sepolia),
            None
        );
        assert_eq!(registry.on_chain(SupportedChain::Goerli).len(), 1);
        assert!(registry.on_chain(SupportedChain::Sepolia).is_empty());
    }

    #[test]
    fn test_registry_serializes_to_output_contract() {
        let mut registry = DeploymentRegistry::default();
        registry.insert(
            DesiredContract::Witness,
            SupportedChain::Sepolia,
            Address::parse(VALID).unwrap(),
        );
        registry.insert(
            DesiredContract::Witness,
            SupportedChain::Goerli,
            Address::parse("0x0000000000000000000000000000000000000001").unwrap(),
        );

        let json = serde_json::to_string(&registry).unwrap();
        assert_eq!(
            json,
            format!(
                r#"{{"Witness":{{"5":"0x0000000000000000000000000000000000000001","11155111":"{VALID}"}}}}"#
            )
        );
    }
}
