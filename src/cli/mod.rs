//! CLI module for vwanctl
//!
//! This module provides the command-line interface for vwanctl,
//! including argument parsing, configuration loading, and subcommand
//! handling.

pub mod commands;
pub mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// vwanctl - Manage Azure Virtual WAN resources
///
/// Create, read, update, and delete virtual hubs, hub virtual network
/// connections, VPN sites, and VPN connections through the Azure Resource
/// Manager API.
#[derive(Parser, Debug, Clone)]
#[command(name = "vwanctl")]
#[command(version)]
#[command(about = "Manage Azure Virtual WAN resources", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Subscription to operate in (overrides configuration)
    #[arg(long, global = true)]
    pub subscription: Option<String>,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true, env = "VWANCTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON output for scripting
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Human
    }
}

/// Available subcommands, one group per resource type
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Virtual WAN operations
    #[command(subcommand)]
    Wan(commands::virtual_wan::WanCommand),

    /// Virtual hub operations
    #[command(subcommand)]
    Hub(commands::virtual_hub::HubCommand),

    /// Hub virtual network connection operations
    #[command(name = "hub-connection", subcommand)]
    HubConnection(commands::hub_connection::HubConnectionCommand),

    /// VPN site operations
    #[command(name = "vpn-site", subcommand)]
    VpnSite(commands::vpn_site::VpnSiteCommand),

    /// VPN gateway operations
    #[command(name = "vpn-gateway", subcommand)]
    VpnGateway(commands::vpn_gateway::VpnGatewayCommand),

    /// VPN connection operations
    #[command(name = "vpn-connection", subcommand)]
    VpnConnection(commands::vpn_connection::VpnConnectionCommand),
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Get the effective verbosity level (0-3)
    pub fn verbosity(&self) -> u8 {
        self.verbose.min(3)
    }

    /// Check if JSON output is requested
    pub fn is_json(&self) -> bool {
        matches!(self.output, OutputFormat::Json)
    }
}
