use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxproxy::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxproxy::AppCommand {
    fn from(cmd: Commands) -> fxproxy::AppCommand {
        match cmd {
            Commands::Serve { listen } => fxproxy::AppCommand::Serve {
                listen_addr: listen,
            },
            Commands::Rate => fxproxy::AppCommand::Rate,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Run the HTTP service
    Serve {
        /// Address to listen on, overrides `server.listen_addr`
        #[arg(short, long)]
        listen: Option<String>,
    },
    /// Fetch the current EUR/USD rate and print it
    Rate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(cli.config_path.as_deref()),
        Some(cmd) => fxproxy::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup(config_path: Option<&str>) -> Result<()> {
    let path = match config_path {
        Some(path) => std::path::PathBuf::from(path),
        None => fxproxy::config::AppConfig::default_config_path()?,
    };
    fxproxy::config::AppConfig::write_default(&path)?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
