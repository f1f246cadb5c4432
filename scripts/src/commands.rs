//! Implementations of the factory deploy scripts

use ethers::abi::Address;
use tracing::{debug, info};

use crate::{
    constants::{FIXED_LOOT_SHAMAN_SUMMONER_CONTRACT, NFT_CURATOR_SHAMAN_SUMMONER_CONTRACT},
    deployments::{DeployOptions, Deployments, ProxyInit},
    errors::ScriptError,
    ownership::{decide_ownership, intended_owner, OwnershipInputs},
    resolver::{module_proxy_factory_address, resolve_upstream, setup_addresses},
    types::{DeployContext, ResolvedAddress, UpstreamSummoner},
    utils::{summoner_initialize_calldata, transfer_ownership_calldata},
};

/// Deploy the `FixedLootShamanSummoner` factory behind a UUPS proxy,
/// initialized against the Baal-and-vault summoner and the module proxy
/// factory, then hand ownership to the configured owner
pub async fn deploy_fixed_loot_shaman_summoner<D: Deployments>(
    ctx: &mut DeployContext<'_, D>,
) -> Result<(), ScriptError> {
    info!(
        "Deploying {} factory on network: {}",
        FIXED_LOOT_SHAMAN_SUMMONER_CONTRACT, ctx.network
    );

    let upstream = resolve_upstream(
        ctx.chain_id,
        ctx.network,
        ctx.config,
        ctx.deployments,
        UpstreamSummoner::BaalAndVault,
    )?;
    // TODO: this should be retrieved from `setup_addresses`
    let module_proxy_factory = module_proxy_factory_address(ctx.network, ctx.deployments)?;

    deploy_summoner_factory(
        ctx,
        FIXED_LOOT_SHAMAN_SUMMONER_CONTRACT,
        UpstreamSummoner::BaalAndVault,
        upstream,
        module_proxy_factory.address,
        true, // transfer_ownership
    )
    .await
}

/// Deploy the `NFTCurratorShamanSummoner` factory behind a UUPS proxy,
/// initialized against the Baal summoner and the module proxy factory.
///
/// Ownership transfer is switched off for this factory pending the intended
/// business rule.
pub async fn deploy_nft_curator_shaman_summoner<D: Deployments>(
    ctx: &mut DeployContext<'_, D>,
) -> Result<(), ScriptError> {
    info!(
        "Deploying {} factory on network: {}",
        NFT_CURATOR_SHAMAN_SUMMONER_CONTRACT, ctx.network
    );

    let setup = setup_addresses(ctx.network, ctx.deployments)?;
    let upstream = resolve_upstream(
        ctx.chain_id,
        ctx.network,
        ctx.config,
        ctx.deployments,
        UpstreamSummoner::Baal,
    )?;

    deploy_summoner_factory(
        ctx,
        NFT_CURATOR_SHAMAN_SUMMONER_CONTRACT,
        UpstreamSummoner::Baal,
        upstream,
        setup.module_proxy_factory.address,
        false, // transfer_ownership
    )
    .await
}

/// The deployment sequence shared by every summoner factory: deploy the
/// proxied factory with its initializer, then issue the ownership transfers
/// the decision table calls for
async fn deploy_summoner_factory<D: Deployments>(
    ctx: &mut DeployContext<'_, D>,
    contract: &'static str,
    upstream_kind: UpstreamSummoner,
    upstream: ResolvedAddress,
    module_proxy_factory: Address,
    transfer_ownership: bool,
) -> Result<(), ScriptError> {
    let init_calldata = summoner_initialize_calldata(upstream.address, module_proxy_factory);
    let record = ctx
        .deployments
        .deploy(
            contract,
            DeployOptions {
                contract,
                proxy: Some(ProxyInit { init_calldata }),
            },
        )
        .await?;

    match record.transaction_hash {
        Some(hash) if record.newly_deployed => {
            info!("{} deployment tx -> {:#x}", contract, hash)
        }
        _ => info!("{} already deployed at {:#x}", contract, record.address),
    }

    let deployer = ctx.deployments.deployer();
    let owner = intended_owner(ctx.config.chain(ctx.chain_id), deployer);
    let decision = decide_ownership(&OwnershipInputs {
        transfer_enabled: transfer_ownership,
        owner,
        deployer,
        upstream_freshly_deployed: upstream.freshly_deployed(),
    });

    if decision.transfer_factory {
        info!("{} transferOwnership to {:#x}", contract, owner);
        let hash = ctx
            .deployments
            .execute(contract, transfer_ownership_calldata(owner))
            .await?;
        info!("{} transferOwnership tx -> {:#x}", contract, hash);
    } else {
        debug!("{} ownership transfer disabled", contract);
    }

    if decision.transfer_upstream {
        info!("{} transferOwnership to {:#x}", upstream_kind, owner);
        let hash = ctx
            .deployments
            .execute(upstream_kind.contract_name(), transfer_ownership_calldata(owner))
            .await?;
        info!("{} transferOwnership tx -> {:#x}", upstream_kind, hash);
    }

    Ok(())
}
