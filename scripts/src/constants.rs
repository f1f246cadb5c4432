//! Constants used in the deploy scripts

/// The name of the ephemeral local development network.
///
/// Addresses on this network are resolved from the current run's deployment
/// registry rather than the static per-chain config table.
pub const DEVNET_NETWORK_NAME: &str = "devnet";

/// The well-known address of the shared `ModuleProxyFactory` singleton,
/// deployed at the same address on every supported chain
pub const MODULE_PROXY_FACTORY_ADDRESS: &str = "0x00000000000DC7F163742Eb4aBEf650037b1f588";

/// The number of confirmations to wait for each deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: usize = 0;

/// The name of the fixed loot shaman summoner factory contract
pub const FIXED_LOOT_SHAMAN_SUMMONER_CONTRACT: &str = "FixedLootShamanSummoner";

/// The name of the NFT curator shaman summoner factory contract
pub const NFT_CURATOR_SHAMAN_SUMMONER_CONTRACT: &str = "NFTCurratorShamanSummoner";

/// The name of the Baal-and-vault summoner contract, the fixed loot factory's
/// upstream dependency
pub const BAAL_AND_VAULT_SUMMONER_CONTRACT: &str = "BaalAndVaultSummoner";

/// The name of the Baal summoner contract, the NFT curator factory's upstream
/// dependency
pub const BAAL_SUMMONER_CONTRACT: &str = "BaalSummoner";

/// The name of the module proxy factory contract
pub const MODULE_PROXY_FACTORY_CONTRACT: &str = "ModuleProxyFactory";

/// The name of the ERC1967 proxy artifact behind which factories are deployed
pub const ERC1967_PROXY_CONTRACT: &str = "ERC1967Proxy";

/// The file extension of compiled contract artifacts
pub const ARTIFACT_EXTENSION: &str = "json";

/// The deployments key in the `deployments.json` registry file
pub const DEPLOYMENTS_KEY: &str = "deployments";

/// The executed-steps key in the `deployments.json` registry file
pub const MIGRATIONS_KEY: &str = "migrations";

/// The contract address key within a registry entry
pub const ADDRESS_KEY: &str = "address";

/// The last transaction hash key within a registry entry
pub const TRANSACTION_HASH_KEY: &str = "transactionHash";
