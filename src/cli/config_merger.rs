//! Applies CLI overrides on top of file and environment configuration.

use super::parser::{Cli, Commands};
use crate::config::Environment;
use crate::config::error::ConfigError;
use crate::config::loader::CONFIG_FILE_ENV;
use crate::config::{ConfigLoader, Settings};

pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base settings. `--config` and `--env` are forwarded to the
    /// loader through `STOREFRONT_CONFIG_FILE` and `STOREFRONT_APP_ENV`.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        // Runs before the runtime starts any other thread.
        unsafe {
            if let Some(ref path) = cli.config {
                std::env::set_var(CONFIG_FILE_ENV, path);
            }
            if let Some(env) = cli.env {
                std::env::set_var(Environment::ENV_VAR, Environment::from(env).as_str());
            }
        }

        Ok(Self::new(ConfigLoader::new()?.load()?))
    }

    /// Precedence: `serve --log-level`, then `--verbose`/`--quiet`, then the
    /// loaded settings.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use clap::Parser;

    fn merger() -> ConfigurationMerger {
        let mut config = Settings::default();
        config.database.backend = StorageBackend::Memory;
        ConfigurationMerger::new(config)
    }

    fn merge(args: &[&str]) -> Settings {
        let cli = Cli::try_parse_from(args).unwrap();
        merger().merge_cli_args(&cli).unwrap()
    }

    #[test]
    fn test_verbose_and_quiet() {
        assert_eq!(merge(&["storefront-rs", "--verbose"]).logger.level, "debug");
        assert_eq!(merge(&["storefront-rs", "--quiet"]).logger.level, "error");
        assert_eq!(merge(&["storefront-rs"]).logger.level, "info");
    }

    #[test]
    fn test_serve_overrides() {
        let settings = merge(&["storefront-rs", "serve", "--host", "0.0.0.0", "--port", "9000"]);
        assert_eq!(settings.server.address(), "0.0.0.0:9000");
    }

    #[test]
    fn test_command_log_level_overrides_global() {
        let settings = merge(&["storefront-rs", "--verbose", "serve", "--log-level", "warn"]);
        assert_eq!(settings.logger.level, "warn");
    }

    #[test]
    fn test_merged_settings_are_validated() {
        let cli = Cli::try_parse_from(["storefront-rs"]).unwrap();
        let result = ConfigurationMerger::new(Settings::default()).merge_cli_args(&cli);
        assert!(matches!(
            result,
            Err(ConfigError::ValidationError { field, .. }) if field == "database.url"
        ));
    }
}
