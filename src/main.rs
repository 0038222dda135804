//! bridge-deploy
//!
//! Resolves network configuration from the environment and runs the initial
//! contract migration.
//!
//! # Architecture Overview
//!
//! ```text
//!   environment ──▶ config::resolve ──▶ ResolvedConfig ──▶ config / networks / validate
//!                         ▲                    │
//!   bridge-deploy.toml ───┘                    ▼
//!                                    migration::Migration::prepare   (pre-flight, no I/O)
//!                                              │
//!                                              ▼
//!                                    blockchain::RpcClient ──▶ node (unlock, deploy)
//!                                              │
//!                                              ▼
//!                                    deployments/<network>/Migrations.json
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use bridge_deploy::blockchain::{ContractArtifact, RpcSettings};
use bridge_deploy::config::loader::{load_overrides, load_overrides_if_present, DEFAULT_OVERRIDES_PATH};
use bridge_deploy::config::{resolve, Credentials, Environment, Overrides, ResolvedConfig};
use bridge_deploy::migration::{ExecutionMode, Migration, MIGRATIONS_CONTRACT};
use bridge_deploy::observability::logging::{
    init_logging, LogFormat, DEFAULT_FILTER, LOG_FORMAT_ENV_VAR,
};

#[derive(Parser)]
#[command(name = "bridge-deploy")]
#[command(about = "Network configuration and contract migration for the bridge", long_about = None)]
struct Cli {
    /// TOML file with per-network overrides
    #[arg(long, global = true)]
    overrides: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = DEFAULT_FILTER)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved configuration as JSON
    Config {
        /// Print only this network
        #[arg(long)]
        network: Option<String>,
        /// Include credentials in the output
        #[arg(long)]
        show_secrets: bool,
    },
    /// List active networks
    Networks,
    /// Resolve and validate the configuration
    Validate,
    /// Deploy the Migrations contract
    Migrate {
        #[arg(long)]
        network: String,
        #[arg(long, value_enum, default_value_t = Mode::Node)]
        mode: Mode,
        /// Artifact JSON; defaults to the artifacts directory
        #[arg(long)]
        artifact: Option<PathBuf>,
        /// Skip writing the deployment record
        #[arg(long)]
        no_record: bool,
        /// Per-request RPC timeout in seconds
        #[arg(long, default_value_t = 30)]
        rpc_timeout_secs: u64,
        /// How long to wait for the deployment to be mined
        #[arg(long, default_value_t = 300)]
        receipt_timeout_secs: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Node-managed account unlocked with ACCOUNT_PASSWORD
    Node,
    /// Sign with the network's configured accounts
    Local,
}

impl From<Mode> for ExecutionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Node => ExecutionMode::NodeManaged,
            Mode::Local => ExecutionMode::LocalSigner,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let env = Environment::from_process();

    init_logging(
        &cli.log_level,
        LogFormat::from_name(env.get(LOG_FORMAT_ENV_VAR)),
    );

    match run(cli, env).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "bridge-deploy failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, env: Environment) -> Result<(), Box<dyn std::error::Error>> {
    let overrides = match &cli.overrides {
        Some(path) => load_overrides(path)?,
        None => load_overrides_if_present(Path::new(DEFAULT_OVERRIDES_PATH))?,
    };
    let config = load(&env, &overrides)?;

    match cli.command {
        Commands::Config {
            network,
            show_secrets,
        } => {
            let config = if show_secrets {
                config
            } else {
                config.redacted()
            };
            let json = match network {
                Some(name) => {
                    let profile = config
                        .network(&name)
                        .ok_or_else(|| format!("unknown network '{name}'"))?;
                    serde_json::to_string_pretty(profile)?
                }
                None => config.to_json()?,
            };
            println!("{json}");
        }
        Commands::Networks => {
            for (name, profile) in &config.networks {
                let endpoint = profile.rpc_url().unwrap_or("in-process");
                let chain_id = profile
                    .chain_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".to_string());
                let marker = if name == &config.default_network { " (default)" } else { "" };
                println!("{name}\t{endpoint}\t{chain_id}{marker}");
            }
        }
        Commands::Validate => {
            println!("configuration valid: {} networks", config.networks.len());
        }
        Commands::Migrate {
            network,
            mode,
            artifact,
            no_record,
            rpc_timeout_secs,
            receipt_timeout_secs,
        } => {
            let credentials = Credentials::from_env(&env);
            let mut migration = Migration::prepare(&config, &credentials, &network, mode.into())?;

            let artifact_path = artifact.unwrap_or_else(|| {
                ContractArtifact::default_path(&config.paths.artifacts, MIGRATIONS_CONTRACT)
            });
            let artifact = ContractArtifact::load(&artifact_path)?;

            let rpc = migration.connect(RpcSettings {
                timeout_secs: rpc_timeout_secs,
                receipt_timeout_secs,
                ..RpcSettings::default()
            })?;
            let record = migration.execute(&rpc, &artifact).await?;

            if !no_record {
                record.save(&config.paths.deployments)?;
            }
            println!("{}", record.address);
        }
    }

    Ok(())
}

fn load(env: &Environment, overrides: &Overrides) -> Result<ResolvedConfig, Box<dyn std::error::Error>> {
    let config = resolve(env, overrides)?;
    tracing::info!(
        networks = config.networks.len(),
        default_network = %config.default_network,
        "Configuration loaded"
    );
    Ok(config)
}
