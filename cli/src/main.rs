mod cli;
mod config;
mod error;
mod ops;
mod types;

#[global_allocator]
static ALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;
use cli::{Cli, Command, ConfigCommand};
use colored::Colorize;
use config::{
    ConfigKey, load_cli_config, load_config_file, provider_config, set_config_value,
    unset_config_value,
};
use error::CliError;
use stratus_provider::Provider;
use strum::VariantNames;
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> miette::Result<()> {
    miette::set_panic_hook();
    run().await?;
    Ok(())
}

async fn run() -> Result<(), CliError> {
    let commands = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .pretty()
                .with_span_events(FmtSpan::NEW)
                .compact()
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match commands.command {
        Command::Config(config_cmd) => run_config_command(config_cmd),
        Command::Schema { resource } => ops::print_json(&resource.schema()),
        Command::Validate(args) => ops::validate(args),
        Command::Plan(args) => ops::plan(args),
        Command::Create(args) => ops::create_resource(&connect().await?, args).await,
        Command::Read(args) => ops::read_resource(&connect().await?, args).await,
        Command::Update(args) => ops::update_resource(&connect().await?, args).await,
        Command::Delete(args) => ops::delete_resource(&connect().await?, args).await,
        Command::Import(args) => ops::import_resource(&connect().await?, args).await,
    }
}

async fn connect() -> Result<Provider, CliError> {
    let cli_config = load_cli_config()?;
    Ok(Provider::connect(&provider_config(&cli_config)?).await)
}

fn run_config_command(config_cmd: ConfigCommand) -> Result<(), CliError> {
    match config_cmd {
        ConfigCommand::List => {
            let config = load_config_file()?;
            for k in ConfigKey::VARIANTS {
                if let Ok(key) = k.parse::<ConfigKey>()
                    && let Some(v) = config.get(key)
                {
                    println!("{} = {}", k, v);
                }
            }
        }
        ConfigCommand::Get { key } => {
            let config = load_config_file()?;
            if let Some(v) = config.get(key) {
                println!("{}", v);
            }
        }
        ConfigCommand::Set { key, value } => {
            let saved_path = set_config_value(key, value)?;
            eprintln!("{}", format!("✓ {} set", key).green().bold());
            eprintln!(
                "  Configuration saved to: {}",
                saved_path.display().to_string().cyan()
            );
        }
        ConfigCommand::Unset { key } => {
            let saved_path = unset_config_value(key)?;
            eprintln!("{}", format!("✓ {} unset", key).green().bold());
            eprintln!(
                "  Configuration saved to: {}",
                saved_path.display().to_string().cyan()
            );
        }
    }
    Ok(())
}
