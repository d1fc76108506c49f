use std::path::Path;

use colored::Colorize;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use stratus_provider::{
    PlanAction, Provider, Refreshed, Resource,
    plan::plan_change,
    resources::{log_stream::LogStreamModel, user_pool_client::UserPoolClientModel},
};
use tracing::debug;

use crate::{
    cli::{ConfigArgs, CreateArgs, DeleteArgs, ImportArgs, PlanArgs, StateArgs, UpdateArgs},
    error::{CliError, OpKind},
    types::ResourceType,
};

pub fn read_document(path: &Path) -> Result<Value, CliError> {
    let raw = std::fs::read(path).map_err(|e| CliError::ReadFile(path.to_owned(), e))?;
    serde_json::from_slice(&raw).map_err(|e| CliError::MalformedDocument(path.to_owned(), e))
}

pub fn read_model<M: DeserializeOwned>(path: &Path) -> Result<M, CliError> {
    let document = read_document(path)?;
    serde_json::from_value(document).map_err(|e| CliError::MalformedDocument(path.to_owned(), e))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).map_err(CliError::Encode)?;
    println!("{json}");
    Ok(())
}

/// Write state to `out`, or to stdout when unset.
fn emit_state<M: Serialize>(out: Option<&Path>, state: &M) -> Result<(), CliError> {
    let Some(path) = out else {
        return print_json(state);
    };
    let mut json = serde_json::to_string_pretty(state).map_err(CliError::Encode)?;
    json.push('\n');
    std::fs::write(path, json).map_err(|e| CliError::WriteFile(path.to_owned(), e))?;
    eprintln!(
        "  State saved to: {}",
        path.display().to_string().cyan()
    );
    Ok(())
}

/// Drop a saved state file whose remote object is gone. A missing file is
/// already in that state.
fn clear_state(out: Option<&Path>) -> Result<(), CliError> {
    let Some(path) = out else {
        return Ok(());
    };
    match std::fs::remove_file(path) {
        Ok(()) => {
            eprintln!(
                "  State removed: {}",
                path.display().to_string().cyan()
            );
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(CliError::WriteFile(path.to_owned(), e)),
    }
}

pub fn validate(args: ConfigArgs) -> Result<(), CliError> {
    let config = read_document(&args.config)?;
    args.resource
        .schema()
        .validate_config(&config)
        .map_err(|e| CliError::op(OpKind::Validate, e.into()))?;
    eprintln!(
        "{}",
        format!("✓ {} configuration is valid", args.resource)
            .green()
            .bold()
    );
    Ok(())
}

pub fn plan(args: PlanArgs) -> Result<(), CliError> {
    let config = read_document(&args.config.config)?;
    let state = args.state.as_deref();
    match args.config.resource {
        ResourceType::UserPoolClient => {
            plan_typed::<UserPoolClientModel>(args.config.resource, state, &config)
        }
        ResourceType::LogStream => plan_typed::<LogStreamModel>(args.config.resource, state, &config),
    }
}

fn plan_typed<M>(resource: ResourceType, state: Option<&Path>, config: &Value) -> Result<(), CliError>
where
    M: PartialEq + Serialize + DeserializeOwned,
{
    let prior = state.map(read_model::<M>).transpose()?;
    let change = plan_change(&resource.schema(), prior.as_ref(), config)
        .map_err(|e| CliError::op(OpKind::Plan, e))?;
    print_json(&change)
}

pub async fn create<R: Resource>(handler: R, args: CreateArgs) -> Result<(), CliError> {
    let config = read_document(&args.config.config)?;
    let change = handler
        .plan(None, &config)
        .map_err(|e| CliError::op(OpKind::Plan, e))?;
    let state = handler
        .create(change.planned)
        .await
        .map_err(|e| CliError::op(OpKind::Create, e))?;
    eprintln!("{}", format!("✓ {} created", R::TYPE_NAME).green().bold());
    emit_state(args.out.as_deref(), &state)
}

pub async fn read<R: Resource>(handler: R, args: StateArgs) -> Result<(), CliError> {
    let state: R::Model = read_model(&args.state)?;
    match handler
        .read(&state)
        .await
        .map_err(|e| CliError::op(OpKind::Read, e))?
    {
        Refreshed::Present(state) => emit_state(args.out.as_deref(), &state),
        Refreshed::Gone => {
            eprintln!(
                "{}",
                format!("{} no longer exists, removing it from state", R::TYPE_NAME).yellow()
            );
            clear_state(args.out.as_deref())
        }
    }
}

pub async fn update<R: Resource>(handler: R, args: UpdateArgs) -> Result<(), CliError> {
    let config = read_document(&args.config.config)?;
    let prior: R::Model = read_model(&args.state)?;
    let change = handler
        .plan(Some(&prior), &config)
        .map_err(|e| CliError::op(OpKind::Plan, e))?;
    debug!(action = %change.action, "planned");

    let state = match change.action {
        PlanAction::NoOp => {
            eprintln!("{}", "No changes".dimmed());
            prior
        }
        PlanAction::Update => handler
            .update(&prior, change.planned)
            .await
            .map_err(|e| CliError::op(OpKind::Update, e))?,
        PlanAction::Replace => {
            eprintln!(
                "{}",
                format!("Replacing: {} changed", change.replace_paths.join(", ")).yellow()
            );
            handler
                .delete(&prior)
                .await
                .map_err(|e| CliError::op(OpKind::Replace, e))?;
            handler
                .create(change.planned)
                .await
                .map_err(|e| CliError::op(OpKind::Replace, e))?
        }
        PlanAction::Create => handler
            .create(change.planned)
            .await
            .map_err(|e| CliError::op(OpKind::Create, e))?,
    };
    emit_state(args.out.as_deref(), &state)
}

pub async fn delete<R: Resource>(handler: R, args: DeleteArgs) -> Result<(), CliError> {
    let state: R::Model = read_model(&args.state)?;
    handler
        .delete(&state)
        .await
        .map_err(|e| CliError::op(OpKind::Delete, e))?;
    eprintln!("{}", format!("✓ {} deleted", R::TYPE_NAME).green().bold());
    Ok(())
}

pub async fn import<R: Resource>(handler: R, args: ImportArgs) -> Result<(), CliError> {
    let key = handler
        .import(&args.id)
        .map_err(|e| CliError::op(OpKind::Import, e))?;
    match handler
        .read_by_key(&key)
        .await
        .map_err(|e| CliError::op(OpKind::Import, e))?
    {
        Refreshed::Present(state) => {
            eprintln!("{}", format!("✓ {} imported", R::TYPE_NAME).green().bold());
            emit_state(args.out.as_deref(), &state)
        }
        Refreshed::Gone => Err(CliError::InvalidArgs(miette::miette!(
            help = "Check that the identifier names an existing resource in the configured region",
            "Cannot import non-existent remote object ({})",
            args.id
        ))),
    }
}

macro_rules! with_handler {
    ($provider:expr, $resource:expr, $op:ident($args:expr)) => {
        match $resource {
            ResourceType::UserPoolClient => $op($provider.user_pool_client(), $args).await,
            ResourceType::LogStream => $op($provider.log_stream(), $args).await,
        }
    };
}

pub async fn create_resource(provider: &Provider, args: CreateArgs) -> Result<(), CliError> {
    with_handler!(provider, args.config.resource, create(args))
}

pub async fn read_resource(provider: &Provider, args: StateArgs) -> Result<(), CliError> {
    with_handler!(provider, args.resource, read(args))
}

pub async fn update_resource(provider: &Provider, args: UpdateArgs) -> Result<(), CliError> {
    with_handler!(provider, args.config.resource, update(args))
}

pub async fn delete_resource(provider: &Provider, args: DeleteArgs) -> Result<(), CliError> {
    with_handler!(provider, args.resource, delete(args))
}

pub async fn import_resource(provider: &Provider, args: ImportArgs) -> Result<(), CliError> {
    with_handler!(provider, args.resource, import(args))
}
