//! `serve` command: validate the configuration or run the HTTP server.

use crate::config::Settings;
use crate::db::run_pending_migrations;
use crate::error::AppResult;
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            self.validate_only()
        } else {
            self.serve().await
        }
    }

    /// Checks the settings and prints what the server would do.
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!("✓ Database: {}", self.config.database.redacted_url());
        println!(
            "✓ API mounted at {} (Swagger UI {})",
            self.config.api.prefix,
            if self.config.api.swagger_enabled {
                "enabled"
            } else {
                "disabled"
            }
        );
        if self.config.database.auto_migrate {
            println!("✓ Pending migrations would be applied on startup");
        }
        println!("Dry run completed successfully");
        Ok(())
    }

    async fn serve(self) -> AppResult<()> {
        if self.config.database.auto_migrate {
            let applied = run_pending_migrations(&self.config.database.url).await?;
            tracing::info!(count = applied.len(), migrations = ?applied, "Applied pending migrations");
        }

        Server::new(self.config).run().await?;
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
