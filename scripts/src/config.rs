//! The static per-chain deployment configuration table

use std::collections::BTreeMap;

use ethers::types::Address;
use serde::{Deserialize, Serialize};

use crate::{errors::ScriptError, utils::read_file};

/// The known contract addresses for a single chain.
///
/// Field names follow the original config table keys, so existing tables
/// port over unchanged.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChainAddresses {
    /// The address of the already-deployed `BaalAndVaultSummoner`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bv_summoner: Option<Address>,
    /// The address of the already-deployed `BaalSummoner`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baal_summoner: Option<Address>,
    /// The designated owner of newly deployed factories, if any.
    /// Ownership stays with the deployer when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Address>,
}

/// The full config table, keyed by decimal chain id
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct DeploymentConfig(pub BTreeMap<String, ChainAddresses>);

impl DeploymentConfig {
    /// Parse the config table from a JSON file
    pub fn from_file(path: &str) -> Result<Self, ScriptError> {
        let contents = read_file(path)?;
        serde_json::from_str(&contents).map_err(|e| ScriptError::ReadFile(e.to_string()))
    }

    /// The config entry for the given chain, if any
    pub fn chain(&self, chain_id: u64) -> Option<&ChainAddresses> {
        self.0.get(&chain_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use ethers::types::Address;

    use super::DeploymentConfig;

    /// A config table covering one chain, with the Baal summoner left
    /// unconfigured
    const CONFIG_JSON: &str = r#"{
        "100": {
            "bvSummoner": "0x000000000000000000000000000000000000b0a1",
            "owner": "0x0000000000000000000000000000000000000abc"
        }
    }"#;

    #[test]
    fn parses_camel_case_entries() {
        let config: DeploymentConfig = serde_json::from_str(CONFIG_JSON).unwrap();
        let addresses = config.chain(100).unwrap();

        assert_eq!(
            addresses.bv_summoner,
            Some(Address::from_str("0x000000000000000000000000000000000000b0a1").unwrap())
        );
        assert_eq!(
            addresses.owner,
            Some(Address::from_str("0x0000000000000000000000000000000000000abc").unwrap())
        );
        assert_eq!(addresses.baal_summoner, None);
    }

    #[test]
    fn unknown_chains_have_no_entry() {
        let config: DeploymentConfig = serde_json::from_str(CONFIG_JSON).unwrap();
        assert!(config.chain(1).is_none());
    }
}
