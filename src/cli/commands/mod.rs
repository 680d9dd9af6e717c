//! Subcommand implementations for the vwanctl CLI.
//!
//! The shared pieces live here: the command context, the mutually exclusive
//! target/WAN selector argument groups, and the confirmation gate every
//! mutating command runs its pending change through.

pub mod hub_connection;
pub mod virtual_hub;
pub mod virtual_wan;
pub mod vpn_connection;
pub mod vpn_gateway;
pub mod vpn_site;

use crate::cli::output::OutputFormatter;
use clap::Args;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::io::Read;
use std::path::{Path, PathBuf};
use vwanctl::error::{Error, Result};
use vwanctl::gateway::ArmClient;
use vwanctl::models::VirtualWan;
use vwanctl::ops::{PendingChange, TargetReference, WanReference};
use vwanctl::tags;
use vwanctl::tags::TagMap;

/// Common context shared between commands.
pub struct CommandContext {
    /// The ARM client every gateway borrows
    pub client: ArmClient,
    /// Output formatter
    pub output: OutputFormatter,
}

impl CommandContext {
    pub fn new(client: ArmClient, output: OutputFormatter) -> Self {
        Self { client, output }
    }
}

/// Flags controlling the confirmation gate.
#[derive(Args, Debug, Clone)]
pub struct ConfirmArgs {
    /// Do not ask for confirmation before writing
    #[arg(short = 'y', long)]
    pub force: bool,

    /// Background-job parity flag; mutating commands then require --force,
    /// since a job cannot answer a prompt
    #[arg(long)]
    pub as_job: bool,
}

/// Gate a pending change behind the operator's confirmation.
///
/// With `--force` the write proceeds unconditionally. Otherwise the change's
/// summary is shown as a prompt and anything but an affirmative answer
/// cancels with no remote mutation having occurred.
pub async fn run_pending<C: PendingChange>(
    ctx: &CommandContext,
    confirm: &ConfirmArgs,
    change: C,
) -> Result<C::Output> {
    if confirm.as_job && !confirm.force {
        return Err(Error::invalid_parameter(
            "--as-job",
            "background execution cannot prompt for confirmation; pass --force",
        ));
    }

    if confirm.force {
        ctx.output.info(&change.summary());
    } else {
        let term = Term::stderr();
        if !term.is_term() {
            return Err(Error::invalid_parameter(
                "--force",
                "no interactive terminal is attached; pass --force to proceed without confirmation",
            ));
        }
        let proceed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{}?", change.summary()))
            .default(false)
            .interact_on(&term)
            .map_err(|e| Error::Config(format!("confirmation prompt failed: {}", e)))?;
        if !proceed {
            return Err(Error::Cancelled);
        }
    }

    change.commit().await
}

/// Read a previously fetched object from a file (or stdin with `-`).
fn read_object(path: &Path) -> Result<serde_json::Value> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&content)?)
}

/// Pull the resource id out of a previously fetched object.
fn object_id(path: &Path) -> Result<String> {
    let object = read_object(path)?;
    object
        .get("id")
        .and_then(|id| id.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            Error::invalid_parameter(
                "--in-file",
                "the supplied object carries no 'id' field to resolve",
            )
        })
}

/// Target selector for top-level resources (hub, VPN site).
///
/// Exactly one parameter set applies: name tuple, resource id, or a
/// previously fetched object.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// The resource name
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// The resource group name
    #[arg(short = 'g', long)]
    pub resource_group: Option<String>,

    /// Fully qualified resource id of the target
    #[arg(long, conflicts_with_all = ["name", "resource_group"])]
    pub resource_id: Option<String>,

    /// Path to a previously fetched object ('-' for stdin)
    #[arg(long, value_name = "PATH",
          conflicts_with_all = ["name", "resource_group", "resource_id"])]
    pub in_file: Option<PathBuf>,
}

impl TargetArgs {
    /// Normalize whichever parameter set was supplied.
    pub fn to_reference(&self) -> Result<TargetReference> {
        if let Some(path) = &self.in_file {
            return Ok(TargetReference::ByObject {
                id: object_id(path)?,
            });
        }
        if let Some(id) = &self.resource_id {
            return Ok(TargetReference::ById(id.clone()));
        }
        match (&self.resource_group, &self.name) {
            (Some(resource_group), Some(name)) => Ok(TargetReference::ByName {
                resource_group: resource_group.clone(),
                parent_name: None,
                name: name.clone(),
            }),
            _ => Err(Error::invalid_parameter(
                "--name",
                "supply --resource-group and --name, or --resource-id, or --in-file",
            )),
        }
    }
}

/// Target selector for resources nested under a virtual hub.
#[derive(Args, Debug, Clone)]
pub struct HubChildTargetArgs {
    /// The connection name
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// The resource group name
    #[arg(short = 'g', long)]
    pub resource_group: Option<String>,

    /// Name of the parent virtual hub
    #[arg(long)]
    pub hub_name: Option<String>,

    /// Fully qualified resource id of the connection
    #[arg(long, conflicts_with_all = ["name", "resource_group", "hub_name"])]
    pub resource_id: Option<String>,

    /// Path to a previously fetched connection object ('-' for stdin)
    #[arg(long, value_name = "PATH",
          conflicts_with_all = ["name", "resource_group", "hub_name", "resource_id"])]
    pub in_file: Option<PathBuf>,
}

impl HubChildTargetArgs {
    /// Normalize whichever parameter set was supplied.
    pub fn to_reference(&self) -> Result<TargetReference> {
        nested_reference(
            &self.in_file,
            &self.resource_id,
            &self.resource_group,
            &self.hub_name,
            &self.name,
            "--hub-name",
        )
    }
}

/// Target selector for resources nested under a VPN gateway.
#[derive(Args, Debug, Clone)]
pub struct GatewayChildTargetArgs {
    /// The connection name
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// The resource group name
    #[arg(short = 'g', long)]
    pub resource_group: Option<String>,

    /// Name of the parent VPN gateway
    #[arg(long)]
    pub gateway_name: Option<String>,

    /// Fully qualified resource id of the connection
    #[arg(long, conflicts_with_all = ["name", "resource_group", "gateway_name"])]
    pub resource_id: Option<String>,

    /// Path to a previously fetched connection object ('-' for stdin)
    #[arg(long, value_name = "PATH",
          conflicts_with_all = ["name", "resource_group", "gateway_name", "resource_id"])]
    pub in_file: Option<PathBuf>,
}

impl GatewayChildTargetArgs {
    /// Normalize whichever parameter set was supplied.
    pub fn to_reference(&self) -> Result<TargetReference> {
        nested_reference(
            &self.in_file,
            &self.resource_id,
            &self.resource_group,
            &self.gateway_name,
            &self.name,
            "--gateway-name",
        )
    }
}

fn nested_reference(
    in_file: &Option<PathBuf>,
    resource_id: &Option<String>,
    resource_group: &Option<String>,
    parent_name: &Option<String>,
    name: &Option<String>,
    parent_flag: &str,
) -> Result<TargetReference> {
    if let Some(path) = in_file {
        return Ok(TargetReference::ByObject {
            id: object_id(path)?,
        });
    }
    if let Some(id) = resource_id {
        return Ok(TargetReference::ById(id.clone()));
    }
    match (resource_group, parent_name, name) {
        (Some(resource_group), Some(parent_name), Some(name)) => Ok(TargetReference::ByName {
            resource_group: resource_group.clone(),
            parent_name: Some(parent_name.clone()),
            name: name.clone(),
        }),
        _ => Err(Error::invalid_parameter(
            parent_flag,
            format!(
                "supply --resource-group, {} and --name, or --resource-id, or --in-file",
                parent_flag
            ),
        )),
    }
}

/// Selector for the Virtual WAN a hub or site belongs to.
#[derive(Args, Debug, Clone)]
pub struct WanRefArgs {
    /// Name of the virtual WAN
    #[arg(long)]
    pub wan_name: Option<String>,

    /// Resource group of the virtual WAN
    #[arg(long)]
    pub wan_resource_group: Option<String>,

    /// Fully qualified resource id of the virtual WAN
    #[arg(long, conflicts_with_all = ["wan_name", "wan_resource_group"])]
    pub wan_id: Option<String>,

    /// Path to a previously fetched virtual WAN object
    #[arg(long, value_name = "PATH",
          conflicts_with_all = ["wan_name", "wan_resource_group", "wan_id"])]
    pub wan_file: Option<PathBuf>,
}

impl WanRefArgs {
    /// Normalize to a WAN reference, when one was supplied at all.
    pub fn to_reference(&self) -> Result<Option<WanReference>> {
        if let Some(path) = &self.wan_file {
            let object = read_object(path)?;
            let wan: VirtualWan = serde_json::from_value(object)?;
            return Ok(Some(WanReference::ByObject(wan)));
        }
        if let Some(id) = &self.wan_id {
            return Ok(Some(WanReference::ById(id.clone())));
        }
        match (&self.wan_resource_group, &self.wan_name) {
            (Some(resource_group), Some(name)) => Ok(Some(WanReference::ByName {
                resource_group: resource_group.clone(),
                name: name.clone(),
            })),
            (None, None) => Ok(None),
            _ => Err(Error::invalid_parameter(
                "--wan-name",
                "supply both --wan-resource-group and --wan-name",
            )),
        }
    }

    /// Normalize to a WAN reference, failing when none was supplied.
    pub fn to_required_reference(&self) -> Result<WanReference> {
        self.to_reference()?.ok_or_else(|| {
            Error::MissingRequiredReference(
                "a virtual WAN reference is required (--wan-resource-group/--wan-name, \
                 --wan-id, or --wan-file)"
                    .to_string(),
            )
        })
    }
}

/// Parse repeated `--tag key=value` arguments; `None` when none given.
pub fn parse_tags(pairs: &[String]) -> Result<Option<TagMap>> {
    if pairs.is_empty() {
        return Ok(None);
    }
    Ok(Some(tags::parse_pairs(pairs)?))
}
