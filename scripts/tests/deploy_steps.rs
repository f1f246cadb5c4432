//! Tests of the deploy step sequencing against a mock deployment framework

use std::collections::BTreeMap;

use contracts_utils::mocks::MockDeployments;
use ethers::types::Address;
use scripts::{
    config::{ChainAddresses, DeploymentConfig},
    constants::{
        BAAL_AND_VAULT_SUMMONER_CONTRACT, BAAL_SUMMONER_CONTRACT,
        FIXED_LOOT_SHAMAN_SUMMONER_CONTRACT, MODULE_PROXY_FACTORY_CONTRACT,
        NFT_CURATOR_SHAMAN_SUMMONER_CONTRACT,
    },
    errors::ScriptError,
    resolver::resolve_upstream,
    steps::{run_steps, DeployStep},
    types::{AddressSource, DeployContext, Network, UpstreamSummoner},
    utils::transfer_ownership_calldata,
};

/// The chain id of the ephemeral devnet in these tests
const DEVNET_CHAIN_ID: u64 = 31337;

/// The chain id of the live network in these tests
const LIVE_CHAIN_ID: u64 = 100;

/// A distinct test address
fn addr(low: u64) -> Address {
    Address::from_low_u64_be(0xabcd_0000 + low)
}

/// A config table with a single chain entry
fn config_for(chain_id: u64, addresses: ChainAddresses) -> DeploymentConfig {
    let mut entries = BTreeMap::new();
    entries.insert(chain_id.to_string(), addresses);
    DeploymentConfig(entries)
}

/// A mock framework seeded as if the upstream summoners and the module proxy
/// factory were deployed earlier in the current devnet run
fn devnet_deployments(deployer: Address) -> MockDeployments {
    MockDeployments::new(deployer)
        .with_fresh_deployment(BAAL_AND_VAULT_SUMMONER_CONTRACT, addr(1))
        .with_fresh_deployment(BAAL_SUMMONER_CONTRACT, addr(2))
        .with_fresh_deployment(MODULE_PROXY_FACTORY_CONTRACT, addr(3))
}

#[test]
fn config_addresses_win_on_live_networks() {
    let configured = addr(10);
    let config = config_for(
        LIVE_CHAIN_ID,
        ChainAddresses {
            bv_summoner: Some(configured),
            ..Default::default()
        },
    );
    // A registry record under the same name must not shadow the config entry
    let deployments = MockDeployments::new(addr(0))
        .with_fresh_deployment(BAAL_AND_VAULT_SUMMONER_CONTRACT, addr(11));

    let resolved = resolve_upstream(
        LIVE_CHAIN_ID,
        &Network::Live("gnosis".to_string()),
        &config,
        &deployments,
        UpstreamSummoner::BaalAndVault,
    )
    .unwrap();

    assert_eq!(resolved.address, configured);
    assert_eq!(resolved.source, AddressSource::Config);
    assert!(!resolved.freshly_deployed());
}

#[tokio::test]
async fn missing_config_aborts_before_any_transaction() {
    let network = Network::Live("sepolia".to_string());
    let config = DeploymentConfig::default();
    let mut deployments = MockDeployments::new(addr(0));

    let mut ctx = DeployContext {
        chain_id: LIVE_CHAIN_ID,
        network: &network,
        config: &config,
        deployments: &mut deployments,
    };
    let err = DeployStep::FixedLootShamanSummoner
        .run(&mut ctx)
        .await
        .unwrap_err();

    assert!(matches!(err, ScriptError::MissingConfig(ref contract)
        if contract.as_str() == BAAL_AND_VAULT_SUMMONER_CONTRACT));
    assert!(deployments.deploy_calls.is_empty());
    assert!(deployments.execute_calls.is_empty());
}

#[tokio::test]
async fn ownership_falls_back_to_the_deployer() {
    let deployer = addr(0);
    let network = Network::Devnet;
    let config = DeploymentConfig::default();
    let mut deployments = devnet_deployments(deployer);

    let mut ctx = DeployContext {
        chain_id: DEVNET_CHAIN_ID,
        network: &network,
        config: &config,
        deployments: &mut deployments,
    };
    DeployStep::FixedLootShamanSummoner
        .run(&mut ctx)
        .await
        .unwrap();

    // A no-op transfer back to the deployer is still issued, and the fresh
    // upstream is left alone since the deployer keeps ownership anyway
    assert_eq!(deployments.execute_calls.len(), 1);
    let transfer = &deployments.execute_calls[0];
    assert_eq!(transfer.name, FIXED_LOOT_SHAMAN_SUMMONER_CONTRACT);
    assert_eq!(transfer.calldata, transfer_ownership_calldata(deployer));
}

#[tokio::test]
async fn reused_upstream_keeps_its_owner() {
    let deployer = addr(0);
    let owner = addr(20);
    let network = Network::Live("gnosis".to_string());
    let config = config_for(
        LIVE_CHAIN_ID,
        ChainAddresses {
            bv_summoner: Some(addr(21)),
            owner: Some(owner),
            ..Default::default()
        },
    );
    let mut deployments = MockDeployments::new(deployer);

    let mut ctx = DeployContext {
        chain_id: LIVE_CHAIN_ID,
        network: &network,
        config: &config,
        deployments: &mut deployments,
    };
    DeployStep::FixedLootShamanSummoner
        .run(&mut ctx)
        .await
        .unwrap();

    assert_eq!(
        deployments.deploy_calls,
        vec![FIXED_LOOT_SHAMAN_SUMMONER_CONTRACT.to_string()]
    );
    // Only the new factory changes hands; the config-sourced summoner was
    // not deployed by this run
    assert_eq!(deployments.execute_calls.len(), 1);
    let transfer = &deployments.execute_calls[0];
    assert_eq!(transfer.name, FIXED_LOOT_SHAMAN_SUMMONER_CONTRACT);
    assert_eq!(transfer.calldata, transfer_ownership_calldata(owner));
}

#[tokio::test]
async fn fresh_upstream_is_handed_off_with_the_factory() {
    let deployer = addr(0);
    let owner = addr(20);
    let network = Network::Devnet;
    let config = config_for(
        DEVNET_CHAIN_ID,
        ChainAddresses {
            owner: Some(owner),
            ..Default::default()
        },
    );
    let mut deployments = devnet_deployments(deployer);

    let mut ctx = DeployContext {
        chain_id: DEVNET_CHAIN_ID,
        network: &network,
        config: &config,
        deployments: &mut deployments,
    };
    DeployStep::FixedLootShamanSummoner
        .run(&mut ctx)
        .await
        .unwrap();

    assert_eq!(deployments.execute_calls.len(), 2);
    let factory_transfer = &deployments.execute_calls[0];
    assert_eq!(factory_transfer.name, FIXED_LOOT_SHAMAN_SUMMONER_CONTRACT);
    assert_eq!(
        factory_transfer.calldata,
        transfer_ownership_calldata(owner)
    );
    let upstream_transfer = &deployments.execute_calls[1];
    assert_eq!(upstream_transfer.name, BAAL_AND_VAULT_SUMMONER_CONTRACT);
    assert_eq!(
        upstream_transfer.calldata,
        transfer_ownership_calldata(owner)
    );
}

#[tokio::test]
async fn completed_steps_are_not_re_executed() {
    let network = Network::Devnet;
    let config = DeploymentConfig::default();
    let mut deployments = devnet_deployments(addr(0));

    let mut ctx = DeployContext {
        chain_id: DEVNET_CHAIN_ID,
        network: &network,
        config: &config,
        deployments: &mut deployments,
    };
    run_steps(&mut ctx, &[]).await.unwrap();

    let deploys_after_first_run = deployments.deploy_calls.len();
    let executes_after_first_run = deployments.execute_calls.len();

    let mut ctx = DeployContext {
        chain_id: DEVNET_CHAIN_ID,
        network: &network,
        config: &config,
        deployments: &mut deployments,
    };
    run_steps(&mut ctx, &[]).await.unwrap();

    assert_eq!(deployments.deploy_calls.len(), deploys_after_first_run);
    assert_eq!(deployments.execute_calls.len(), executes_after_first_run);
}

#[tokio::test]
async fn steps_filter_by_tag_and_run_in_order() {
    let network = Network::Devnet;
    let config = DeploymentConfig::default();
    let mut deployments = devnet_deployments(addr(0));

    let mut ctx = DeployContext {
        chain_id: DEVNET_CHAIN_ID,
        network: &network,
        config: &config,
        deployments: &mut deployments,
    };
    run_steps(&mut ctx, &["Factories".to_string()]).await.unwrap();

    assert_eq!(
        deployments.deploy_calls,
        vec![
            FIXED_LOOT_SHAMAN_SUMMONER_CONTRACT.to_string(),
            NFT_CURATOR_SHAMAN_SUMMONER_CONTRACT.to_string(),
        ]
    );
    // The NFT curator factory's ownership transfer is switched off, so the
    // only handoff is the fixed loot factory's
    assert_eq!(deployments.execute_calls.len(), 1);
    assert_eq!(
        deployments.execute_calls[0].name,
        FIXED_LOOT_SHAMAN_SUMMONER_CONTRACT
    );
}

#[tokio::test]
async fn tags_select_a_single_step() {
    let network = Network::Devnet;
    let config = DeploymentConfig::default();
    let mut deployments = devnet_deployments(addr(0));

    let mut ctx = DeployContext {
        chain_id: DEVNET_CHAIN_ID,
        network: &network,
        config: &config,
        deployments: &mut deployments,
    };
    run_steps(&mut ctx, &["NFTCurratorSummoner".to_string()])
        .await
        .unwrap();

    assert_eq!(
        deployments.deploy_calls,
        vec![NFT_CURATOR_SHAMAN_SUMMONER_CONTRACT.to_string()]
    );
    assert!(deployments.execute_calls.is_empty());
}
