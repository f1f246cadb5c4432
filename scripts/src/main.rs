use clap::Parser;
use scripts::{cli::Cli, config::DeploymentConfig, errors::ScriptError, utils::setup_client};

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let Cli {
        priv_key,
        rpc_url,
        network,
        deployments_path,
        artifacts_path,
        config_path,
        command,
    } = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    let config = match config_path {
        Some(ref path) => DeploymentConfig::from_file(path)?,
        None => DeploymentConfig::default(),
    };

    let client = setup_client(&priv_key, &rpc_url).await?;

    command
        .run(client, network, config, &deployments_path, &artifacts_path)
        .await
}
