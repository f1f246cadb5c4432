//! Definitions of CLI arguments and commands for the deploy scripts

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use ethers::providers::Middleware;

use crate::{
    config::DeploymentConfig,
    deployments::LiveDeployments,
    errors::ScriptError,
    steps::{all_steps, run_steps},
    types::{DeployContext, Network},
};

/// The deploy script CLI
#[derive(Parser)]
pub struct Cli {
    /// Private key of the deployer
    // TODO: Better key management
    #[arg(short, long, env = "DEPLOYER_PRIV_KEY")]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL")]
    pub rpc_url: String,

    /// Name of the target network, `devnet` being the ephemeral local network
    #[arg(short, long)]
    pub network: Network,

    /// Path to the deployments registry file
    #[arg(short, long, default_value = "deployments.json")]
    pub deployments_path: String,

    /// Path to the directory of compiled contract artifacts
    #[arg(short, long, default_value = "artifacts")]
    pub artifacts_path: String,

    /// Path to the per-chain deployment config file
    #[arg(short, long)]
    pub config_path: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// The subcommands of the deploy script CLI
#[derive(Subcommand)]
pub enum Command {
    /// Run the deploy steps matching the given tags, in order
    Run(RunArgs),
    /// List the deploy steps in execution order
    ListSteps,
}

/// Arguments to the `run` command
#[derive(Args)]
pub struct RunArgs {
    /// Only run steps matching one of these tags; all steps when omitted
    #[arg(short, long)]
    pub tag: Vec<String>,
}

impl Command {
    /// Run the command
    pub async fn run(
        self,
        client: Arc<impl Middleware>,
        network: Network,
        config: DeploymentConfig,
        deployments_path: &str,
        artifacts_path: &str,
    ) -> Result<(), ScriptError> {
        match self {
            Command::Run(args) => {
                let chain_id = client
                    .get_chainid()
                    .await
                    .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?
                    .as_u64();

                let mut deployments =
                    LiveDeployments::new(client, deployments_path, artifacts_path)?;
                let mut ctx = DeployContext {
                    chain_id,
                    network: &network,
                    config: &config,
                    deployments: &mut deployments,
                };

                run_steps(&mut ctx, &args.tag).await
            }
            Command::ListSteps => {
                for step in all_steps() {
                    println!("{} [{}]", step, step.tags().join(", "));
                }
                Ok(())
            }
        }
    }
}
