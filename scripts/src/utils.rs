//! Utilities for the deploy scripts.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs::{self, File},
    io::Read,
    path::PathBuf,
    str::FromStr,
    sync::Arc,
};

use alloy_primitives::Address as AlloyAddress;
use alloy_sol_types::SolCall;
use ethers::{
    abi::Address,
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::H256,
};
use json::JsonValue;

use crate::{
    constants::{ADDRESS_KEY, DEPLOYMENTS_KEY, MIGRATIONS_KEY, TRANSACTION_HASH_KEY},
    errors::ScriptError,
    solidity::{initializeCall, transferOwnershipCall},
    types::DeploymentRecord,
};

/// Sets up the client with which to send deployment transactions,
/// binding the deployer wallet to the connected chain's id.
pub async fn setup_client(
    priv_key: &str,
    rpc_url: &str,
) -> Result<Arc<impl Middleware>, ScriptError> {
    let provider = Provider::<Http>::try_from(rpc_url)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let wallet = LocalWallet::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let chain_id = provider
        .get_chainid()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?
        .as_u64();
    let client = Arc::new(SignerMiddleware::new(
        provider,
        wallet.clone().with_chain_id(chain_id),
    ));

    Ok(client)
}

/// Read a file into a string
pub fn read_file(file_path: &str) -> Result<String, ScriptError> {
    let mut file_contents = String::new();
    File::open(file_path)
        .map_err(|e| ScriptError::ReadFile(e.to_string()))?
        .read_to_string(&mut file_contents)
        .map_err(|e| ScriptError::ReadFile(e.to_string()))?;

    Ok(file_contents)
}

/// Parse a file as JSON
fn get_json_from_file(file_path: &str) -> Result<JsonValue, ScriptError> {
    let file_contents = read_file(file_path)?;
    json::parse(&file_contents).map_err(|e| ScriptError::ReadFile(e.to_string()))
}

/// Read the deployment registry from the given file, returning the recorded
/// deployments and the ids of the steps already executed.
///
/// A missing file is an empty registry, not an error.
pub fn read_registry(
    file_path: &str,
) -> Result<(BTreeMap<String, DeploymentRecord>, BTreeSet<String>), ScriptError> {
    let mut records = BTreeMap::new();
    let mut executed = BTreeSet::new();

    if !PathBuf::from(file_path).exists() {
        return Ok((records, executed));
    }

    let parsed_json = get_json_from_file(file_path)?;

    for (name, entry) in parsed_json[DEPLOYMENTS_KEY].entries() {
        let address = Address::from_str(entry[ADDRESS_KEY].as_str().ok_or_else(|| {
            ScriptError::ReadFile(format!(
                "could not parse address for {} from registry file",
                name
            ))
        })?)
        .map_err(|e| ScriptError::ReadFile(e.to_string()))?;

        let transaction_hash = entry[TRANSACTION_HASH_KEY]
            .as_str()
            .map(H256::from_str)
            .transpose()
            .map_err(|e| ScriptError::ReadFile(e.to_string()))?;

        records.insert(
            name.to_string(),
            DeploymentRecord {
                address,
                transaction_hash,
                // Anything read back from disk was deployed by a previous run
                newly_deployed: false,
            },
        );
    }

    for (id, done) in parsed_json[MIGRATIONS_KEY].entries() {
        if done.as_bool().unwrap_or(false) {
            executed.insert(id.to_string());
        }
    }

    Ok((records, executed))
}

/// Write the deployment registry to the given file
pub fn write_registry(
    file_path: &str,
    records: &BTreeMap<String, DeploymentRecord>,
    executed: &BTreeSet<String>,
) -> Result<(), ScriptError> {
    let mut parsed_json = JsonValue::new_object();

    for (name, record) in records {
        let mut entry = JsonValue::new_object();
        entry[ADDRESS_KEY] = JsonValue::String(format!("{:#x}", record.address));
        if let Some(hash) = record.transaction_hash {
            entry[TRANSACTION_HASH_KEY] = JsonValue::String(format!("{:#x}", hash));
        }
        parsed_json[DEPLOYMENTS_KEY][name.as_str()] = entry;
    }

    for id in executed {
        parsed_json[MIGRATIONS_KEY][id.as_str()] = JsonValue::Boolean(true);
    }

    fs::write(file_path, json::stringify_pretty(parsed_json, 4))
        .map_err(|e| ScriptError::WriteFile(e.to_string()))?;

    Ok(())
}

/// Prepare calldata for a summoner factory's `initialize` method
pub fn summoner_initialize_calldata(summoner: Address, module_proxy_factory: Address) -> Vec<u8> {
    let summoner = AlloyAddress::from_slice(summoner.as_bytes());
    let module_proxy_factory = AlloyAddress::from_slice(module_proxy_factory.as_bytes());

    initializeCall::new((summoner, module_proxy_factory)).abi_encode()
}

/// Prepare calldata for a contract's `transferOwnership` method
pub fn transfer_ownership_calldata(new_owner: Address) -> Vec<u8> {
    let new_owner = AlloyAddress::from_slice(new_owner.as_bytes());

    transferOwnershipCall::new((new_owner,)).abi_encode()
}
