//! The deployment framework interface and its live implementation.
//!
//! The framework is injected into the deploy steps as a trait so the
//! resolution and ownership sequencing can be exercised without a live chain
//! connection. The live implementation deploys through an RPC client and
//! persists its registry to a `deployments.json` file.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::PathBuf,
    sync::Arc,
};

use async_trait::async_trait;
use ethers::{
    abi::{Address, Contract, Tokenize},
    contract::ContractFactory,
    providers::Middleware,
    types::{Bytes, TransactionReceipt, TransactionRequest, H256},
};
use serde::Deserialize;

use crate::{
    constants::{ARTIFACT_EXTENSION, ERC1967_PROXY_CONTRACT, NUM_DEPLOY_CONFIRMATIONS},
    errors::ScriptError,
    types::DeploymentRecord,
    utils::{read_file, read_registry, write_registry},
};

/// Initialization of a UUPS (ERC1967) proxy deployed in front of a contract
pub struct ProxyInit {
    /// The calldata the proxy forwards to the implementation on construction
    pub init_calldata: Vec<u8>,
}

/// Options for deploying a contract through the framework
pub struct DeployOptions {
    /// The name of the artifact to deploy
    pub contract: &'static str,
    /// When set, the implementation is deployed without constructor
    /// arguments and wrapped in a UUPS proxy initialized with the given
    /// calldata; the proxy address is the one recorded
    pub proxy: Option<ProxyInit>,
}

/// The deployment framework: a run-scoped registry of named deployments plus
/// the operations the deploy steps sequence against it.
///
/// `deploy` is idempotent under the contract name: a name with an existing
/// record is returned as-is and no transaction is sent.
#[async_trait]
pub trait Deployments: Send {
    /// The account deployment and execute transactions are sent from
    fn deployer(&self) -> Address;

    /// The most recent deployment record for the named contract
    fn get(&self, name: &str) -> Option<DeploymentRecord>;

    /// Whether the deploy step with the given id has already run to
    /// completion
    fn is_executed(&self, id: &str) -> bool;

    /// Record that the deploy step with the given id ran to completion
    fn mark_executed(&mut self, id: &str) -> Result<(), ScriptError>;

    /// Deploy the named contract, or return its existing record
    async fn deploy(
        &mut self,
        name: &str,
        options: DeployOptions,
    ) -> Result<DeploymentRecord, ScriptError>;

    /// Send a state-mutating call to the named contract from the deployer,
    /// returning the transaction hash
    async fn execute(&mut self, name: &str, calldata: Vec<u8>) -> Result<H256, ScriptError>;
}

/// A compiled contract artifact, in the shape the contract build emits
#[derive(Deserialize)]
struct Artifact {
    /// The contract ABI
    abi: Contract,
    /// The deployment bytecode, hex-encoded
    bytecode: Bytes,
}

/// The live deployment framework, backed by an RPC client and a JSON
/// registry file
pub struct LiveDeployments<M> {
    /// The RPC client transactions are sent through
    client: Arc<M>,
    /// The deployer account attached to the client
    deployer: Address,
    /// The path of the registry file
    deployments_path: String,
    /// The directory holding compiled contract artifacts
    artifacts_path: PathBuf,
    /// The in-memory registry of named deployments
    records: BTreeMap<String, DeploymentRecord>,
    /// The ids of the deploy steps that have already run
    executed: BTreeSet<String>,
}

impl<M: Middleware> LiveDeployments<M> {
    /// Construct a live framework handle, loading any registry persisted by
    /// previous runs
    pub fn new(
        client: Arc<M>,
        deployments_path: &str,
        artifacts_path: &str,
    ) -> Result<Self, ScriptError> {
        let deployer = client
            .default_sender()
            .ok_or_else(|| {
                ScriptError::ClientInitialization(
                    "client does not have sender attached".to_string(),
                )
            })?;

        let (records, executed) = read_registry(deployments_path)?;

        Ok(Self {
            client,
            deployer,
            deployments_path: deployments_path.to_string(),
            artifacts_path: PathBuf::from(artifacts_path),
            records,
            executed,
        })
    }

    /// Load the named contract's compiled artifact from the artifacts
    /// directory
    fn load_artifact(&self, contract: &str) -> Result<Artifact, ScriptError> {
        let path = self
            .artifacts_path
            .join(contract)
            .with_extension(ARTIFACT_EXTENSION);
        let contents = read_file(&path.to_string_lossy())?;

        serde_json::from_str(&contents).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))
    }

    /// Deploy the named artifact with the given constructor arguments,
    /// waiting for the configured number of confirmations
    async fn deploy_contract<T: Tokenize>(
        &self,
        contract: &str,
        constructor_args: T,
    ) -> Result<(Address, TransactionReceipt), ScriptError> {
        let artifact = self.load_artifact(contract)?;
        let factory = ContractFactory::new(artifact.abi, artifact.bytecode, self.client.clone());

        let (deployed, receipt) = factory
            .deploy(constructor_args)
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?
            .confirmations(NUM_DEPLOY_CONFIRMATIONS)
            .send_with_receipt()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        Ok((deployed.address(), receipt))
    }

    /// Write the in-memory registry back to the registry file
    fn persist(&self) -> Result<(), ScriptError> {
        write_registry(&self.deployments_path, &self.records, &self.executed)
    }
}

#[async_trait]
impl<M: Middleware> Deployments for LiveDeployments<M> {
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
        self.persist()
    }

    async fn deploy(
        &mut self,
        name: &str,
        options: DeployOptions,
    ) -> Result<DeploymentRecord, ScriptError> {
        if let Some(existing) = self.records.get(name) {
            return Ok(DeploymentRecord {
                newly_deployed: false,
                ..existing.clone()
            });
        }

        let (implementation, receipt) = self.deploy_contract(options.contract, ()).await?;

        let record = match options.proxy {
            Some(proxy) => {
                let init_calldata = Bytes::from(proxy.init_calldata);
                let (proxy_address, proxy_receipt) = self
                    .deploy_contract(ERC1967_PROXY_CONTRACT, (implementation, init_calldata))
                    .await?;

                DeploymentRecord {
                    address: proxy_address,
                    transaction_hash: Some(proxy_receipt.transaction_hash),
                    newly_deployed: true,
                }
            }
            None => DeploymentRecord {
                address: implementation,
                transaction_hash: Some(receipt.transaction_hash),
                newly_deployed: true,
            },
        };

        self.records.insert(name.to_string(), record.clone());
        self.persist()?;

        Ok(record)
    }

    async fn execute(&mut self, name: &str, calldata: Vec<u8>) -> Result<H256, ScriptError> {
        let target = self
            .records
            .get(name)
            .ok_or_else(|| ScriptError::MissingDeployment(name.to_string()))?
            .address;

        let tx = TransactionRequest::new().to(target).data(calldata);
        let pending = self
            .client
            .send_transaction(tx, None /* block */)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
        let receipt = pending
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
            .ok_or_else(|| {
                ScriptError::ContractInteraction("transaction dropped from the mempool".to_string())
            })?;

        if let Some(record) = self.records.get_mut(name) {
            record.transaction_hash = Some(receipt.transaction_hash);
        }
        self.persist()?;

        Ok(receipt.transaction_hash)
    }
}
