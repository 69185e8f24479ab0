//! Metafield Editor - catalog browsing and per-product metafield editing
//!
//! # Modules
//!
//! - [`pager`]: bidirectional cursor pagination over the catalog
//! - [`gateway`]: concurrent load, reconcile-and-write save
//! - [`session`]: edit session state machine on top of the gateway
//! - [`config`]: environment configuration
//! - [`logger`]: tracing subscriber setup

pub mod config;
pub mod gateway;
pub mod logger;
pub mod pager;
pub mod session;

#[cfg(test)]
mod testing;

pub use config::{Config, ConfigError};
pub use gateway::{LoadOutcome, LoadedRecord, SaveOutcome, SyncGateway};
pub use pager::{CatalogPager, Direction, PageCursor};
pub use session::{Banner, EditSession, SessionState};

/// Load `.env` and initialize logging from the environment
///
/// Returns the loaded configuration.
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();
    let config = Config::from_env()?;
    logger::init_logger_with_file(&config.log_level, config.log_dir.as_deref())?;
    Ok(config)
}
