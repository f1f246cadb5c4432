//! Resolution of prerequisite contract addresses.
//!
//! On the ephemeral devnet, prerequisites are read from the current run's
//! deployment registry, assuming earlier steps deployed them. On any other
//! network they come from the static per-chain config table, and a missing
//! entry aborts the run before any transaction is sent.

use std::str::FromStr;

use ethers::abi::Address;
use tracing::info;

use crate::{
    config::DeploymentConfig,
    constants::{MODULE_PROXY_FACTORY_ADDRESS, MODULE_PROXY_FACTORY_CONTRACT},
    deployments::Deployments,
    errors::ScriptError,
    types::{AddressSource, Network, ResolvedAddress, UpstreamSummoner},
};

/// Resolve the address of the upstream summoner a factory depends on
pub fn resolve_upstream<D: Deployments>(
    chain_id: u64,
    network: &Network,
    config: &DeploymentConfig,
    deployments: &D,
    upstream: UpstreamSummoner,
) -> Result<ResolvedAddress, ScriptError> {
    if network.is_ephemeral() {
        return registry_address(deployments, upstream.contract_name());
    }

    let address = config
        .chain(chain_id)
        .and_then(|addresses| upstream.config_address(addresses))
        .ok_or_else(|| ScriptError::MissingConfig(upstream.contract_name().to_string()))?;

    info!("Re-using contracts on {}:", network);
    info!("{} {:#x}", upstream, address);

    Ok(ResolvedAddress {
        address,
        source: AddressSource::Config,
    })
}

/// The broader setup addresses shared by every factory deployment
pub struct SetupAddresses {
    /// The shared module proxy factory
    pub module_proxy_factory: ResolvedAddress,
}

/// Resolve the setup addresses for the current network
pub fn setup_addresses<D: Deployments>(
    network: &Network,
    deployments: &D,
) -> Result<SetupAddresses, ScriptError> {
    let module_proxy_factory = module_proxy_factory_address(network, deployments)?;
    info!(
        "{} {:#x}",
        MODULE_PROXY_FACTORY_CONTRACT, module_proxy_factory.address
    );

    Ok(SetupAddresses {
        module_proxy_factory,
    })
}

/// Resolve the module proxy factory's address: the current run's deployment
/// on the ephemeral devnet, the well-known singleton everywhere else
pub fn module_proxy_factory_address<D: Deployments>(
    network: &Network,
    deployments: &D,
) -> Result<ResolvedAddress, ScriptError> {
    if network.is_ephemeral() {
        return registry_address(deployments, MODULE_PROXY_FACTORY_CONTRACT);
    }

    Ok(ResolvedAddress {
        // Can `unwrap` here since we know the constant constitutes a valid address
        address: Address::from_str(MODULE_PROXY_FACTORY_ADDRESS).unwrap(),
        source: AddressSource::WellKnown,
    })
}

/// Look up a contract's address in the deployment registry
fn registry_address<D: Deployments>(
    deployments: &D,
    name: &str,
) -> Result<ResolvedAddress, ScriptError> {
    let record = deployments
        .get(name)
        .ok_or_else(|| ScriptError::MissingDeployment(name.to_string()))?;

    info!("{} {:#x}", name, record.address);

    Ok(ResolvedAddress {
        address: record.address,
        source: AddressSource::Registry {
            newly_deployed: record.newly_deployed,
        },
    })
}
