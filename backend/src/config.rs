use prediction_market::Pubkey;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_PROGRAM_ID: &str = "4YBXVmC6EdtBo45vWqjhqC1n91qs3tVzNCReHXdWe7bq";

/// Ledger storage configuration
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    pub path: PathBuf,
    pub audit_log_dir: PathBuf,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid LOG_FORMAT: {}. Must be one of: pretty, json", s)),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub program_id: Pubkey,
    pub ledger: LedgerConfig,
    pub log_level: String,
    pub log_format: LogFormat,
    pub environment: String,
}

impl LedgerConfig {
    /// Create ledger config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let path = env::var("LEDGER_PATH").unwrap_or_else(|_| "./ledger.json".to_string());

        let audit_log_dir = env::var("AUDIT_LOG_DIR").unwrap_or_else(|_| "./logs".to_string());

        if path.trim().is_empty() {
            return Err("LEDGER_PATH must not be empty".to_string());
        }

        Ok(Self {
            path: PathBuf::from(path),
            audit_log_dir: PathBuf::from(audit_log_dir),
        })
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./ledger.json"),
            audit_log_dir: PathBuf::from("./logs"),
        }
    }
}

impl AppConfig {
    /// Create application config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let ledger = LedgerConfig::from_env()?;

        let program_id = env::var("PROGRAM_ID").unwrap_or_else(|_| DEFAULT_PROGRAM_ID.to_string());
        let program_id = Pubkey::from_str(&program_id)
            .map_err(|e| format!("Invalid PROGRAM_ID: {}: {}", program_id, e))?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "pretty".to_string())
            .parse::<LogFormat>()?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        // Validate log level
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid LOG_LEVEL: {}. Must be one of: {:?}",
                log_level, valid_log_levels
            ));
        }

        // Validate environment
        let valid_environments = ["development", "staging", "production"];
        if !valid_environments.contains(&environment.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid ENVIRONMENT: {}. Must be one of: {:?}",
                environment, valid_environments
            ));
        }

        Ok(Self {
            program_id,
            ledger,
            log_level: log_level.to_lowercase(),
            log_format,
            environment: environment.to_lowercase(),
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Default tracing directives when RUST_LOG is unset
    pub fn log_directives(&self) -> String {
        format!(
            "prediction_market_backend={level},prediction_market={level}",
            level = self.log_level
        )
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            program_id: Pubkey::from_str(DEFAULT_PROGRAM_ID).unwrap_or_default(),
            ledger: LedgerConfig::default(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            environment: "development".to_string(),
        }
    }
}
