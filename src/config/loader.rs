//! Layered configuration loading.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

pub const CONFIG_DIR_ENV: &str = "STOREFRONT_CONFIG_DIR";

pub const CONFIG_FILE_ENV: &str = "STOREFRONT_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

const ENV_PREFIX: &str = "STOREFRONT";

/// `STOREFRONT_SERVER__PORT` -> `server.port`
const ENV_SEPARATOR: &str = "__";

/// Loads [`Settings`] from, lowest priority first:
///
/// 1. `default.toml`
/// 2. `{environment}.toml` (optional)
/// 3. `local.toml` (optional)
/// 4. `STOREFRONT_*` environment variables
///
/// A single file given through `STOREFRONT_CONFIG_FILE` replaces steps 1-3.
/// When the configuration directory does not exist at all, only the
/// built-in defaults and the environment are used.
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// # Errors
    ///
    /// Fails when both `STOREFRONT_CONFIG_DIR` and `STOREFRONT_CONFIG_FILE`
    /// are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from);
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && config_dir.is_some() {
            return Err(ConfigError::mutual_exclusivity(format!(
                "{} and {} cannot both be set. Use {} for layered configuration or \
                 {} for a single configuration file.",
                CONFIG_DIR_ENV, CONFIG_FILE_ENV, CONFIG_DIR_ENV, CONFIG_FILE_ENV
            )));
        }

        Ok(Self {
            config_dir: config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Builds, deserializes and validates the settings.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref config_file) => add_file_source(builder, config_file, true)?,
            None if self.config_dir.is_dir() => self.build_layered_config(builder)?,
            None => {
                tracing::debug!(
                    config_dir = %self.config_dir.display(),
                    "Configuration directory not found, using defaults"
                );
                builder
            }
        };

        add_env_source(builder).build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let builder = add_file_source(builder, &self.config_dir.join("default.toml"), true)?;
        let builder = add_file_source(
            builder,
            &self.config_dir.join(self.environment.file_name()),
            false,
        )?;
        add_file_source(builder, &self.config_dir.join("local.toml"), false)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: None,
            environment: AppEnvironment::default(),
        })
    }
}

fn add_file_source(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if required && !path.exists() {
        return Err(ConfigError::file_not_found(format!(
            "Required configuration file not found: {}",
            path.display()
        )));
    }

    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(required)))
}

fn add_env_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator(ENV_SEPARATOR)
            .ignore_empty(true)
            .try_parsing(true),
    )
}
