use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, builder::styling};

use crate::types::ResourceType;

const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::Green.on_default().bold())
    .usage(styling::AnsiColor::Green.on_default().bold())
    .literal(styling::AnsiColor::Blue.on_default().bold())
    .placeholder(styling::AnsiColor::Cyan.on_default());

const GENERAL_USAGE: &str = color_print::cstr!(
    r#"
    <dim>$</dim> <bold>stratus config set region us-east-1</bold>
    <dim>$</dim> <bold>stratus plan aws_cloudwatch_log_stream --config stream.json</bold>
    <dim>$</dim> <bold>stratus import aws_cognito_user_pool_client us-east-1_aBcDeFgHi/1example23456789</bold>
    "#
);

#[derive(Parser, Debug)]
#[command(name = "stratus", version, override_usage = GENERAL_USAGE, styles = STYLES)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Print the attribute schema of a resource type as JSON.
    Schema {
        /// Resource type.
        resource: ResourceType,
    },

    /// Check a configuration file against the resource schema.
    ///
    /// Every invalid attribute is reported, not only the first.
    Validate(ConfigArgs),

    /// Show what applying a configuration would do.
    ///
    /// Without `--state` the plan creates the resource. Nothing is sent to
    /// AWS.
    Plan(PlanArgs),

    /// Create a resource from a configuration file and print its state.
    Create(CreateArgs),

    /// Refresh a resource's state from AWS.
    ///
    /// Prints nothing when the resource no longer exists.
    Read(StateArgs),

    /// Apply a changed configuration to an existing resource.
    ///
    /// Attributes that cannot change in place cause a replacement: the
    /// existing resource is deleted and a new one created.
    Update(UpdateArgs),

    /// Delete a resource. Deleting one that is already gone succeeds.
    Delete(DeleteArgs),

    /// Adopt an existing resource by its import identifier.
    ///
    /// User pool clients use `user-pool-id/client-id`, log streams use
    /// `log-group-name:log-stream-name`.
    Import(ImportArgs),
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// List all configuration values.
    List,
    /// Get a configuration value.
    Get {
        /// Config key
        key: crate::config::ConfigKey,
    },
    /// Set a configuration value.
    Set {
        /// Config key
        key: crate::config::ConfigKey,
        /// Value to set
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Config key
        key: crate::config::ConfigKey,
    },
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Resource type.
    pub resource: ResourceType,

    /// JSON configuration file.
    #[arg(short, long)]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// JSON state file of the existing resource.
    #[arg(short, long)]
    pub state: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Write the resulting state here instead of stdout.
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct StateArgs {
    /// Resource type.
    pub resource: ResourceType,

    /// JSON state file.
    #[arg(short, long)]
    pub state: PathBuf,

    /// Write the resulting state here instead of stdout.
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// JSON state file of the existing resource.
    #[arg(short, long)]
    pub state: PathBuf,

    /// Write the resulting state here instead of stdout.
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Resource type.
    pub resource: ResourceType,

    /// JSON state file.
    #[arg(short, long)]
    pub state: PathBuf,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Resource type.
    pub resource: ResourceType,

    /// Import identifier.
    pub id: String,

    /// Write the resulting state here instead of stdout.
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}
