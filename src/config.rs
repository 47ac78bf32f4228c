use std::path::PathBuf;

use crate::services::queue_service::QueueConfig;

/// Which store implementation backs the shared collections. Chosen here,
/// once, from configuration; business logic never inspects the environment.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    File { data_dir: PathBuf },
    DynamoDb { table_name: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub expiry_hours: i64,
    pub grace_minutes: i64,
    pub history_limit: usize,
    pub admin_password: String,
    pub port: u16,
    pub backend: StoreBackend,
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(var) => write!(f, "{} must be set", var),
            ConfigError::Invalid(var, value) => write!(f, "Invalid {}: {}", var, value),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let admin_password =
            std::env::var("ADMIN_PASSWORD").map_err(|_| ConfigError::Missing("ADMIN_PASSWORD"))?;

        let backend = match std::env::var("STORE_BACKEND").as_deref() {
            Ok("dynamodb") => StoreBackend::DynamoDb {
                table_name: std::env::var("QUEUE_TABLE")
                    .map_err(|_| ConfigError::Missing("QUEUE_TABLE"))?,
            },
            Ok("file") | Err(_) => StoreBackend::File {
                data_dir: std::env::var("DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(".")),
            },
            Ok(other) => {
                return Err(ConfigError::Invalid("STORE_BACKEND", other.to_string()));
            }
        };

        Ok(Config {
            expiry_hours: parse_var("EXPIRY_HOURS", 24)?,
            grace_minutes: parse_var("GRACE_MINUTES", 5)?,
            history_limit: parse_var("HISTORY_LIMIT", 500)?,
            admin_password,
            port: parse_var("PORT", 5001)?,
            backend,
        })
    }

    pub fn queue_config(&self) -> QueueConfig {
        QueueConfig {
            expiry_hours: self.expiry_hours,
            grace_minutes: self.grace_minutes,
            history_limit: self.history_limit,
        }
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::Invalid(var, raw.clone())),
        Err(_) => Ok(default),
    }
}
