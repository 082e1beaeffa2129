//! kubectl-multi CLI - node views across a multi-cluster fleet

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use kubectl_multi::commands::{self, ReportOptions};
use kubectl_multi::config::Settings;
use kubectl_multi::utils::{FleetError, display_error_and_exit, logger};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kubectl-multi")]
#[command(author, version, about = "Multi-cluster kubectl for Open Cluster Management fleets", long_about = None)]
struct Cli {
    /// Verbose output (can be used multiple times: -v, -vv, -vvv)
    /// -v: INFO, -vv: DEBUG, -vvv: TRACE
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to kubeconfig file (default: $KUBECONFIG, then ~/.kube/config)
    #[arg(long, global = true)]
    kubeconfig: Option<PathBuf>,

    /// Hub context listing ManagedCluster resources (default: its1)
    #[arg(long, global = true)]
    remote_context: Option<String>,

    /// Per-call API timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show nodes of the local cluster and every managed cluster (default)
    Nodes,

    /// List managed clusters registered on the hub
    Clusters,

    /// Inspect or create the settings file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective settings
    Show,

    /// Print an example settings file
    Example,

    /// Write a default settings file
    Init {
        /// Destination (default: ~/.config/kubectl-multi/config.toml)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    if let Err(err) = dispatch(cli).await {
        match err.downcast_ref::<FleetError>() {
            Some(fleet_err) => display_error_and_exit(fleet_err),
            None => {
                eprintln!("error: {:#}", err);
                std::process::exit(1);
            }
        }
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    let settings = Settings::load();
    if !settings.colors.enabled {
        colored::control::set_override(false);
    }

    let options = ReportOptions::merge(&settings, cli.kubeconfig, cli.remote_context, cli.timeout);
    kubectl_multi::log_debug!("Effective options: {:?}", options);

    match cli.command.unwrap_or(Commands::Nodes) {
        Commands::Nodes => commands::nodes::run(&options).await,
        Commands::Clusters => commands::clusters::run(&options).await,
        Commands::Config { command } => handle_config_command(command, &settings),
        Commands::Completion { shell } => handle_completion_command(shell),
        Commands::Version => handle_version_command(),
    }
}

fn handle_config_command(command: ConfigCommands, settings: &Settings) -> Result<()> {
    match command {
        ConfigCommands::Show => commands::config::show(settings),
        ConfigCommands::Example => commands::config::example(),
        ConfigCommands::Init { path, force } => commands::config::init(path, force),
    }
}

fn handle_completion_command(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "kubectl-multi", &mut io::stdout());
    Ok(())
}

fn handle_version_command() -> Result<()> {
    println!("kubectl-multi {}", env!("CARGO_PKG_VERSION"));
    println!("Multi-cluster kubectl for Open Cluster Management fleets");
    Ok(())
}
