//! The ownership-transfer policy applied after a factory deployment.
//!
//! Each factory carries its own transfer toggle; within an enabled step the
//! factory handoff is unconditional, while the upstream summoner is only
//! handed off when this run deployed it and the intended owner is not the
//! deployer itself.

use ethers::abi::Address;

use crate::config::ChainAddresses;

/// The inputs to the ownership decision for one factory deployment
pub struct OwnershipInputs {
    /// Whether ownership transfer is enabled for this factory at all
    pub transfer_enabled: bool,
    /// The intended owner of the deployed contracts
    pub owner: Address,
    /// The account the deployment transactions were sent from
    pub deployer: Address,
    /// Whether the upstream summoner was deployed by the current run
    pub upstream_freshly_deployed: bool,
}

/// Which ownership transfers to issue
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OwnershipDecision {
    /// Transfer ownership of the newly deployed factory
    pub transfer_factory: bool,
    /// Transfer ownership of the upstream summoner as well
    pub transfer_upstream: bool,
}

/// The intended owner for a chain: the configured owner, falling back to
/// the deployer account
pub fn intended_owner(addresses: Option<&ChainAddresses>, deployer: Address) -> Address {
    addresses.and_then(|a| a.owner).unwrap_or(deployer)
}

/// Decide which ownership transfers a factory deployment issues.
///
/// The factory transfer is issued whenever the toggle is on, even when the
/// intended owner is the deployer itself. The upstream transfer additionally
/// requires that the owner differs from the deployer and that the upstream
/// summoner was freshly deployed this run: a summoner reused from the config
/// table was not deployed by us and is never handed off.
pub fn decide_ownership(inputs: &OwnershipInputs) -> OwnershipDecision {
    let OwnershipInputs {
        transfer_enabled,
        owner,
        deployer,
        upstream_freshly_deployed,
    } = *inputs;

    OwnershipDecision {
        transfer_factory: transfer_enabled,
        transfer_upstream: transfer_enabled && owner != deployer && upstream_freshly_deployed,
    }
}

#[cfg(test)]
mod tests {
    use ethers::abi::Address;

    use super::{decide_ownership, OwnershipDecision, OwnershipInputs};

    /// The deployer account used across the table tests
    fn deployer() -> Address {
        Address::from_low_u64_be(1)
    }

    /// A distinct owner account
    fn owner() -> Address {
        Address::from_low_u64_be(2)
    }

    #[test]
    fn owner_defaults_to_deployer_and_factory_is_still_transferred() {
        let decision = decide_ownership(&OwnershipInputs {
            transfer_enabled: true,
            owner: deployer(),
            deployer: deployer(),
            upstream_freshly_deployed: true,
        });

        assert_eq!(
            decision,
            OwnershipDecision {
                transfer_factory: true,
                transfer_upstream: false,
            }
        );
    }

    #[test]
    fn reused_upstream_is_never_transferred() {
        let decision = decide_ownership(&OwnershipInputs {
            transfer_enabled: true,
            owner: owner(),
            deployer: deployer(),
            upstream_freshly_deployed: false,
        });

        assert_eq!(
            decision,
            OwnershipDecision {
                transfer_factory: true,
                transfer_upstream: false,
            }
        );
    }

    #[test]
    fn fresh_upstream_is_transferred_with_the_factory() {
        let decision = decide_ownership(&OwnershipInputs {
            transfer_enabled: true,
            owner: owner(),
            deployer: deployer(),
            upstream_freshly_deployed: true,
        });

        assert_eq!(
            decision,
            OwnershipDecision {
                transfer_factory: true,
                transfer_upstream: true,
            }
        );
    }

    #[test]
    fn disabled_toggle_suppresses_every_transfer() {
        let decision = decide_ownership(&OwnershipInputs {
            transfer_enabled: false,
            owner: owner(),
            deployer: deployer(),
            upstream_freshly_deployed: true,
        });

        assert_eq!(
            decision,
            OwnershipDecision {
                transfer_factory: false,
                transfer_upstream: false,
            }
        );
    }
}
