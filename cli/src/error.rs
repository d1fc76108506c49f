use std::path::PathBuf;

use miette::Diagnostic;
use stratus_provider::ResourceError;
use thiserror::Error;

const HELP: &str = color_print::cstr!(
    "\n<cyan><bold>Notice something wrong?</bold></cyan>\n\n\
     <green> > Check the connection settings:</green>\n\
     <bold>stratus config list</bold>\n\n\
     <green> > Turn on request logging:</green>\n\
     <bold>RUST_LOG=stratus_provider=debug</bold>"
);

const SCHEMA_HELP: &str = color_print::cstr!(
    "Attribute names and constraints are listed by <bold>stratus schema <<resource-type></bold>"
);

#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] CliConfigError),

    #[error("Invalid CLI arguments: {0}")]
    #[diagnostic(transparent)]
    InvalidArgs(miette::Report),

    #[error("Failed to read {}", .0.display())]
    ReadFile(PathBuf, #[source] std::io::Error),

    #[error("Failed to write {}", .0.display())]
    WriteFile(PathBuf, #[source] std::io::Error),

    #[error("Malformed JSON in {}", .0.display())]
    #[diagnostic(help("Configuration and state files hold a single JSON object."))]
    MalformedDocument(PathBuf, #[source] serde_json::Error),

    #[error("Failed to encode output")]
    Encode(#[source] serde_json::Error),

    #[error("{}: {}", .0, .1)]
    #[diagnostic(help("{}", SCHEMA_HELP))]
    Invalid(OpKind, #[source] ResourceError),

    #[error("{}: {}", .0, .1)]
    #[diagnostic(help("{}", HELP))]
    Operation(OpKind, #[source] ResourceError),
}

impl CliError {
    pub fn op(kind: OpKind, source: ResourceError) -> Self {
        match source {
            ResourceError::Validation(_) => Self::Invalid(kind, source),
            ResourceError::InvalidImportId(e) => Self::InvalidArgs(miette::miette!(
                help = "Import identifiers are `user-pool-id/client-id` for user pool clients and `log-group-name:log-stream-name` for log streams",
                "{e}"
            )),
            source => Self::Operation(kind, source),
        }
    }
}

#[derive(Debug, Clone, Copy, strum::AsRefStr)]
#[strum(serialize_all = "title_case")]
pub enum OpKind {
    Validate,
    Plan,
    Create,
    Read,
    Update,
    Replace,
    Delete,
    Import,
}

impl std::fmt::Display for OpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to {}", self.as_ref().to_lowercase())
    }
}

impl std::error::Error for OpKind {}

#[derive(Error, Debug, Diagnostic)]
pub enum CliConfigError {
    #[error("Failed to find a home for config directory")]
    DirNotFound,

    #[error("Failed to load config file")]
    #[diagnostic(help(
        "Did you run `stratus config set region <region>`? or use the `STRATUS_REGION` environment variable."
    ))]
    Load(#[from] config::ConfigError),

    #[error("Failed to write config file")]
    Write(#[source] std::io::Error),

    #[error("Failed to serialize config")]
    Serialize(#[source] toml::ser::Error),

    #[error("Invalid value '{1}' for config key '{0}'")]
    #[diagnostic(help("Durations are written like `90s` or `2m`."))]
    InvalidValue(String, String),
}
