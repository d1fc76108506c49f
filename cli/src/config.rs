use std::{path::PathBuf, time::Duration};

use config::{Config, FileFormat};
use serde::{Deserialize, Serialize};
use stratus_provider::ProviderConfig;

use crate::error::CliConfigError;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub endpoint_url: Option<String>,
    /// Human-readable duration, e.g. `2m` or `90s`.
    pub update_timeout: Option<String>,
}

#[cfg(target_os = "windows")]
fn config_path() -> Result<PathBuf, CliConfigError> {
    let mut path = dirs::config_dir().ok_or(CliConfigError::DirNotFound)?;
    path.push("stratus");
    path.push("config.toml");
    Ok(path)
}

#[cfg(not(target_os = "windows"))]
fn config_path() -> Result<PathBuf, CliConfigError> {
    let mut path = dirs::home_dir().ok_or(CliConfigError::DirNotFound)?;
    path.push(".config");
    path.push("stratus");
    path.push("config.toml");
    Ok(path)
}

pub fn load_config_file() -> Result<CliConfig, CliConfigError> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(CliConfig::default());
    }
    let builder = Config::builder()
        .add_source(config::File::from(path.as_path()).format(FileFormat::Toml));
    Ok(builder.build()?.try_deserialize::<CliConfig>()?)
}

pub fn load_cli_config() -> Result<CliConfig, CliConfigError> {
    let path = config_path()?;
    let mut builder = Config::builder();
    if path.exists() {
        builder = builder.add_source(config::File::from(path.as_path()).format(FileFormat::Toml));
    }
    builder = builder.add_source(config::Environment::with_prefix("STRATUS"));
    Ok(builder.build()?.try_deserialize::<CliConfig>()?)
}

#[derive(
    Debug, Clone, Copy, clap::ValueEnum, strum::Display, strum::EnumString, strum::VariantNames,
)]
#[clap(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConfigKey {
    Region,
    Profile,
    EndpointUrl,
    UpdateTimeout,
}

fn parse_timeout(key: ConfigKey, value: &str) -> Result<Duration, CliConfigError> {
    humantime::parse_duration(value)
        .map_err(|_| CliConfigError::InvalidValue(key.to_string(), value.to_owned()))
}

impl CliConfig {
    pub fn get(&self, key: ConfigKey) -> Option<String> {
        match key {
            ConfigKey::Region => self.region.clone(),
            ConfigKey::Profile => self.profile.clone(),
            ConfigKey::EndpointUrl => self.endpoint_url.clone(),
            ConfigKey::UpdateTimeout => self.update_timeout.clone(),
        }
    }

    pub fn set(&mut self, key: ConfigKey, value: String) -> Result<(), CliConfigError> {
        match key {
            ConfigKey::Region => self.region = Some(value),
            ConfigKey::Profile => self.profile = Some(value),
            ConfigKey::EndpointUrl => self.endpoint_url = Some(value),
            ConfigKey::UpdateTimeout => {
                parse_timeout(key, &value)?;
                self.update_timeout = Some(value);
            }
        }
        Ok(())
    }

    pub fn unset(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::Region => self.region = None,
            ConfigKey::Profile => self.profile = None,
            ConfigKey::EndpointUrl => self.endpoint_url = None,
            ConfigKey::UpdateTimeout => self.update_timeout = None,
        }
    }
}

pub fn save_cli_config(config: &CliConfig) -> Result<PathBuf, CliConfigError> {
    let path = config_path()?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(CliConfigError::Write)?;
    }

    let toml = toml::to_string(config).map_err(CliConfigError::Serialize)?;
    std::fs::write(&path, toml).map_err(CliConfigError::Write)?;

    Ok(path)
}

pub fn set_config_value(key: ConfigKey, value: String) -> Result<PathBuf, CliConfigError> {
    let mut config = load_config_file().unwrap_or_default();
    config.set(key, value)?;
    save_cli_config(&config)
}

pub fn unset_config_value(key: ConfigKey) -> Result<PathBuf, CliConfigError> {
    let mut config = load_config_file().unwrap_or_default();
    config.unset(key);
    save_cli_config(&config)
}

pub fn provider_config(config: &CliConfig) -> Result<ProviderConfig, CliConfigError> {
    let mut provider_config = ProviderConfig {
        region: config.region.clone(),
        profile: config.profile.clone(),
        endpoint_url: config.endpoint_url.clone(),
        ..Default::default()
    };
    if let Some(timeout) = &config.update_timeout {
        provider_config.update_timeout = parse_timeout(ConfigKey::UpdateTimeout, timeout)?;
    }
    Ok(provider_config)
}
