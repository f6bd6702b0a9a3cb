use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, LibraryResult};

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable : Sync + Send {
    fn id(&self) -> String;
}

pub const DEFAULT_DATA_FILE: &str = "catalog.txt";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:50051";
pub const DEFAULT_MAX_WORKERS: usize = 10;
pub const DEFAULT_LOAN_DAYS: i64 = 7;
pub const DEFAULT_LOG_LEVEL: &str = "info";
const ENV_PREFIX: &str = "LENDING";

// Configuration abstracts config options for the lending service
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub data_file: PathBuf,
    pub bind_addr: String,
    pub max_workers: usize,
    pub loan_days: i64,
    pub log_level: String,
    pub log_json: bool,
}

impl Configuration {
    pub fn new(data_file: &str) -> Self {
        Configuration {
            data_file: PathBuf::from(data_file),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_workers: DEFAULT_MAX_WORKERS,
            loan_days: DEFAULT_LOAN_DAYS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_json: false,
        }
    }

    // from_env layers LENDING_* environment variables over the defaults.
    pub fn from_env() -> LibraryResult<Self> {
        Self::load(Environment::with_prefix(ENV_PREFIX))
    }

    // from_vars reads the same keys from a map instead of the process environment.
    pub fn from_vars(vars: HashMap<String, String>) -> LibraryResult<Self> {
        Self::load(Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    fn load(env: Environment) -> LibraryResult<Self> {
        let mut config: Configuration = Config::builder()
            .set_default("data_file", DEFAULT_DATA_FILE)
            .and_then(|b| b.set_default("bind_addr", DEFAULT_BIND_ADDR))
            .and_then(|b| b.set_default("max_workers", DEFAULT_MAX_WORKERS as i64))
            .and_then(|b| b.set_default("loan_days", DEFAULT_LOAN_DAYS))
            .and_then(|b| b.set_default("log_level", DEFAULT_LOG_LEVEL))
            .and_then(|b| b.set_default("log_json", false))
            .and_then(|b| b.add_source(env.try_parsing(true)).build())
            .and_then(|c| c.try_deserialize())
            .map_err(config_error)?;
        config.log_level = config.log_level.trim().to_lowercase();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LibraryResult<()> {
        if self.max_workers == 0 {
            return Err(LibraryError::invalid_argument("LENDING_MAX_WORKERS must be at least 1"));
        }
        if self.loan_days < 1 {
            return Err(LibraryError::invalid_argument("LENDING_LOAN_DAYS must be at least 1"));
        }
        if tracing::Level::from_str(self.log_level.as_str()).is_err() {
            return Err(LibraryError::invalid_argument(
                format!("LENDING_LOG_LEVEL {} is not a log level", self.log_level).as_str()));
        }
        Ok(())
    }
}

fn config_error(err: ConfigError) -> LibraryError {
    LibraryError::invalid_argument(format!("invalid {}_* configuration: {}", ENV_PREFIX, err).as_str())
}
