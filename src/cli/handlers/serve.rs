//! `serve` command.

use crate::config::{Settings, StorageBackend};
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Starts the server, or only checks the configuration when `dry_run`.
    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            return self.validate_only();
        }
        Server::new(self.config).run().await
    }

    fn validate_only(&self) -> anyhow::Result<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        match self.config.database.backend {
            StorageBackend::Postgres => println!("✓ Database URL is configured"),
            StorageBackend::Memory => println!("✓ Rows are kept in memory"),
        }
        println!("✓ Logger level: {}", self.config.logger.level);
        println!("Dry run completed successfully");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dry_run_with_valid_config() {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/shop".to_string();
        assert!(ServeCommandHandler::new(config).execute(true).await.is_ok());
    }

    #[tokio::test]
    async fn test_dry_run_with_invalid_config() {
        let mut config = Settings::default();
        config.database.backend = StorageBackend::Memory;
        config.server.port = 0;
        assert!(ServeCommandHandler::new(config).execute(true).await.is_err());
    }
}
