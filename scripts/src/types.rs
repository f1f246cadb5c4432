//! Type definitions used throughout the deploy scripts

use std::{
    convert::Infallible,
    fmt::{self, Display},
    str::FromStr,
};

use ethers::types::{Address, H256};

use crate::{
    config::{ChainAddresses, DeploymentConfig},
    constants::{BAAL_AND_VAULT_SUMMONER_CONTRACT, BAAL_SUMMONER_CONTRACT, DEVNET_NETWORK_NAME},
};

/// The network a deployment run targets.
///
/// The ephemeral devnet resolves prerequisite addresses from the current
/// run's deployment registry; every other network resolves them from the
/// static per-chain config table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Network {
    /// The ephemeral local development network
    Devnet,
    /// A persistent named network, e.g. `gnosis` or `sepolia`
    Live(String),
}

impl Network {
    /// Whether this is the ephemeral local development network
    pub fn is_ephemeral(&self) -> bool {
        matches!(self, Network::Devnet)
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Devnet => write!(f, "{}", DEVNET_NETWORK_NAME),
            Network::Live(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for Network {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == DEVNET_NETWORK_NAME {
            Ok(Network::Devnet)
        } else {
            Ok(Network::Live(s.to_string()))
        }
    }
}

/// The upstream summoner contracts the factories depend on
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UpstreamSummoner {
    /// The Baal-and-vault summoner, upstream of the fixed loot factory
    BaalAndVault,
    /// The plain Baal summoner, upstream of the NFT curator factory
    Baal,
}

impl UpstreamSummoner {
    /// The contract name under which the summoner is recorded in the
    /// deployment registry
    pub const fn contract_name(self) -> &'static str {
        match self {
            UpstreamSummoner::BaalAndVault => BAAL_AND_VAULT_SUMMONER_CONTRACT,
            UpstreamSummoner::Baal => BAAL_SUMMONER_CONTRACT,
        }
    }

    /// The summoner's address in a chain's config entry, if configured
    pub fn config_address(self, addresses: &ChainAddresses) -> Option<Address> {
        match self {
            UpstreamSummoner::BaalAndVault => addresses.bv_summoner,
            UpstreamSummoner::Baal => addresses.baal_summoner,
        }
    }
}

impl Display for UpstreamSummoner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.contract_name())
    }
}

/// The result of a deploy operation, as recorded in the deployment registry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentRecord {
    /// The deployed contract's address
    pub address: Address,
    /// The hash of the most recent transaction sent to the contract,
    /// starting with its deployment transaction
    pub transaction_hash: Option<H256>,
    /// Whether the contract was deployed during the current run, as opposed
    /// to read back from a persisted registry
    pub newly_deployed: bool,
}

/// Where a resolved address came from
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddressSource {
    /// The current run's deployment registry
    Registry {
        /// Whether the registry record was produced by this run
        newly_deployed: bool,
    },
    /// The static per-chain config table
    Config,
    /// A well-known singleton address, identical on every chain
    WellKnown,
}

/// A prerequisite contract address together with its provenance
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedAddress {
    /// The resolved address
    pub address: Address,
    /// Where the address came from
    pub source: AddressSource,
}

impl ResolvedAddress {
    /// Whether the contract behind this address was deployed by the current
    /// run. Only such contracts are eligible for an upstream ownership
    /// transfer.
    pub fn freshly_deployed(&self) -> bool {
        matches!(
            self.source,
            AddressSource::Registry {
                newly_deployed: true
            }
        )
    }
}

/// The inputs shared by every deploy step in a run
pub struct DeployContext<'a, D> {
    /// The chain id reported by the connected node
    pub chain_id: u64,
    /// The network the run targets
    pub network: &'a Network,
    /// The static per-chain config table
    pub config: &'a DeploymentConfig,
    /// The deployment framework handle
    pub deployments: &'a mut D,
}
