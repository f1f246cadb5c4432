//! An in-memory, call-recording implementation of the deployment framework

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use ethers::types::{Address, H256};
use scripts::{
    deployments::{DeployOptions, Deployments},
    errors::ScriptError,
    types::DeploymentRecord,
};

/// A single recorded `execute` invocation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecuteCall {
    /// The name of the contract the call targeted
    pub name: String,
    /// The calldata sent to the contract
    pub calldata: Vec<u8>,
}

/// An in-memory deployment framework that records every deploy and execute
/// invocation instead of sending transactions
pub struct MockDeployments {
    /// The configured deployer account
    deployer: Address,
    /// The registry of named deployments
    records: BTreeMap<String, DeploymentRecord>,
    /// The ids of the steps recorded as executed
    executed: BTreeSet<String>,
    /// The names passed to `deploy`, in call order
    pub deploy_calls: Vec<String>,
    /// The `execute` invocations, in call order
    pub execute_calls: Vec<ExecuteCall>,
    /// A counter for minting distinct addresses and transaction hashes
    next_id: u64,
}

impl MockDeployments {
    /// Construct a mock framework for the given deployer account
    pub fn new(deployer: Address) -> Self {
        Self {
            deployer,
            records: BTreeMap::new(),
            executed: BTreeSet::new(),
            deploy_calls: Vec::new(),
            execute_calls: Vec::new(),
            next_id: 0,
        }
    }

    /// Seed a registry record as if the contract had been deployed by a
    /// previous run
    pub fn with_prior_deployment(mut self, name: &str, address: Address) -> Self {
        self.records.insert(
            name.to_string(),
            DeploymentRecord {
                address,
                transaction_hash: None,
                newly_deployed: false,
            },
        );
        self
    }

    /// Seed a registry record as if the contract had been deployed earlier
    /// in the current run
    pub fn with_fresh_deployment(mut self, name: &str, address: Address) -> Self {
        self.records.insert(
            name.to_string(),
            DeploymentRecord {
                address,
                transaction_hash: Some(H256::from_low_u64_be(u64::MAX)),
                newly_deployed: true,
            },
        );
        self
    }

    /// Mint the next distinct id for addresses and transaction hashes
    fn mint_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

#[async_trait]
impl Deployments for MockDeployments {
    fn deployer(&self) -> Address {
        self.deployer
    }

    fn get(&self, name: &str) -> Option<DeploymentRecord> {
        self.records.get(name).cloned()
    }

    fn is_executed(&self, id: &str) -> bool {
        self.executed.contains(id)
    }

    fn mark_executed(&mut self, id: &str) -> Result<(), ScriptError> {
        self.executed.insert(id.to_string());
        Ok(())
    }

    async fn deploy(
        &mut self,
        name: &str,
        _options: DeployOptions,
    ) -> Result<DeploymentRecord, ScriptError> {
        self.deploy_calls.push(name.to_string());

        if let Some(existing) = self.records.get(name) {
            return Ok(DeploymentRecord {
                newly_deployed: false,
                ..existing.clone()
            });
        }

        let id = self.mint_id();
        let record = DeploymentRecord {
            address: Address::from_low_u64_be(id),
            transaction_hash: Some(H256::from_low_u64_be(id)),
            newly_deployed: true,
        };
        self.records.insert(name.to_string(), record.clone());

        Ok(record)
    }

    async fn execute(&mut self, name: &str, calldata: Vec<u8>) -> Result<H256, ScriptError> {
        if !self.records.contains_key(name) {
            return Err(ScriptError::MissingDeployment(name.to_string()));
        }

        self.execute_calls.push(ExecuteCall {
            name: name.to_string(),
            calldata,
        });

        Ok(H256::from_low_u64_be(self.mint_id()))
    }
}
