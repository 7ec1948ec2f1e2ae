//! Command-line and environment configuration.

use clap::{Parser, Subcommand};
use hotelier_db::DbConfig;
use uuid::Uuid;

/// Hotelier operator tool
#[derive(Debug, Parser)]
#[command(name = "hotelier", about = "Hotelier operator tool", long_about = None)]
pub struct ServerConfig {
    /// SurrealDB WebSocket endpoint
    #[arg(long, env = "HOTELIER_DB_URL", default_value = "127.0.0.1:8000")]
    pub db_url: String,

    #[arg(long, env = "HOTELIER_DB_NAMESPACE", default_value = "hotelier")]
    pub db_namespace: String,

    #[arg(long, env = "HOTELIER_DB_DATABASE", default_value = "main")]
    pub db_database: String,

    #[arg(long, env = "HOTELIER_DB_USERNAME", default_value = "root")]
    pub db_username: String,

    #[arg(
        long,
        env = "HOTELIER_DB_PASSWORD",
        default_value = "root",
        hide_env_values = true
    )]
    pub db_password: String,

    /// Log filter used when `RUST_LOG` is unset
    #[arg(long, default_value = "hotelier=info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply pending schema migrations
    Migrate,
    /// Print a hotel and its current subscription state as JSON
    Show {
        /// Hotel id
        id: Uuid,
    },
}

impl ServerConfig {
    /// Load configuration from `.env`, the environment and arguments.
    pub fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();
        Self::try_parse()
    }

    pub fn db(&self) -> DbConfig {
        DbConfig {
            url: self.db_url.clone(),
            namespace: self.db_namespace.clone(),
            database: self.db_database.clone(),
            username: self.db_username.clone(),
            password: self.db_password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_subcommand() {
        let id = Uuid::new_v4();
        let config =
            ServerConfig::try_parse_from(["hotelier", "--db-url", "db:8000", "show", &id.to_string()])
                .unwrap();
        assert_eq!(config.db().url, "db:8000");
        assert!(matches!(config.command, Command::Show { id: parsed } if parsed == id));
    }

    #[test]
    fn rejects_malformed_id() {
        let result = ServerConfig::try_parse_from(["hotelier", "show", "not-a-uuid"]);
        assert!(result.is_err());
    }
}
