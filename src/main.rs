//! vwanctl - Manage Azure Virtual WAN resources from the command line.
//!
//! This is the main entry point for the vwanctl CLI.

mod cli;

use anyhow::Result;
use cli::commands::CommandContext;
use cli::output::OutputFormatter;
use cli::{Cli, Commands};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vwanctl::config::Config;
use vwanctl::gateway::ArmClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let output = OutputFormatter::new(!cli.no_color, cli.is_json(), cli.verbosity());

    // Load configuration
    let config = Config::load(cli.config.as_deref()).unwrap_or_else(|e| {
        output.warning(&format!("failed to load config: {}", e));
        Config::default()
    });

    let exit_code = match run(&cli, config, output).await {
        Ok(()) => 0,
        Err(e) => {
            // The formatter was moved into run(); build a fresh one for the
            // final error line.
            let output = OutputFormatter::new(!cli.no_color, cli.is_json(), cli.verbosity());
            output.error(&e.to_string());
            e.exit_code()
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: &Cli, config: Config, output: OutputFormatter) -> vwanctl::error::Result<()> {
    let client = ArmClient::from_config(&config, cli.subscription.as_deref())?;
    let ctx = CommandContext::new(client, output);

    match &cli.command {
        Commands::Wan(command) => command.execute(&ctx).await,
        Commands::Hub(command) => command.execute(&ctx).await,
        Commands::HubConnection(command) => command.execute(&ctx).await,
        Commands::VpnSite(command) => command.execute(&ctx).await,
        Commands::VpnGateway(command) => command.execute(&ctx).await,
        Commands::VpnConnection(command) => command.execute(&ctx).await,
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(verbosity >= 3).with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}
