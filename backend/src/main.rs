//! Prediction Market Ledger Host
//!
//! Reads transaction requests from stdin, one JSON document per line, executes
//! them against the file-backed ledger and prints one JSON receipt per line.

use prediction_market_backend::{
    AppConfig, AppError, AppResult, AuditTrailService, FileLedger, LedgerService, LogFormat,
};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{error, info, warn};

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.log_directives().into());

    // stdout carries receipts only
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load environment variables first
    dotenv::dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        AppError::Config(e)
    })?;

    init_tracing(&config);

    info!("Prediction market ledger host starting");
    info!("Environment: {}", config.environment);
    info!("Log level: {} ({})", config.log_level, config.log_format.as_str());
    info!("Program id: {}", config.program_id);
    if config.is_production() && matches!(config.log_format, LogFormat::Pretty) {
        warn!("Pretty log output in production; set LOG_FORMAT=json for log collectors");
    }

    let ledger = FileLedger::open(&config.ledger.path).map_err(|e| {
        error!("Failed to open ledger {:?}: {}", config.ledger.path, e);
        e
    })?;
    info!("✓ Ledger loaded ({} accounts, digest {})", ledger.len(), ledger.digest());

    let audit = AuditTrailService::new(config.ledger.audit_log_dir.clone()).map_err(|e| {
        error!("Failed to initialize audit trail: {}", e);
        AppError::Message(format!("Audit trail initialization failed: {}", e))
    })?;
    info!("✓ Audit trail service initialized: {:?}", audit.log_file());
    let audit = Arc::new(audit);

    let mut service = LedgerService::new(config.program_id, ledger, audit);

    info!("Ready; reading transaction requests from stdin");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, shutting down gracefully...");
        }
        served = service.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout()) => {
            info!("End of input ({} requests handled)", served?);
        }
    }

    info!(
        "Ledger host shutdown complete ({} accounts, digest {})",
        service.ledger().len(),
        service.ledger().digest()
    );
    Ok(())
}
