//! # Configuration
//!
//! Environment-driven configuration for the coordinator and its
//! collaborators. Every external call the coordinator makes is bounded by a
//! timeout from this struct; read-only calls additionally get a small retry
//! budget. Publish and start-execution are never retried, so they carry a
//! timeout but no retry setting.

use crate::error::{Result, UpdateError};

/// Runtime configuration for the update-and-dispatch pipeline.
#[derive(Debug, Clone)]
pub struct CaseflowConfig {
    /// Postgres connection string for the persisted store.
    pub database_url: String,
    /// Timeout for actor identity lookups (read-only, retryable).
    pub identity_timeout_ms: u64,
    /// Timeout for use case / workflow reads (read-only, retryable).
    pub store_read_timeout_ms: u64,
    /// Timeout for the final guarded write (side-effecting, not retried).
    pub store_write_timeout_ms: u64,
    /// Timeout for engine publish and start-execution calls
    /// (side-effecting, never retried).
    pub engine_timeout_ms: u64,
    /// Extra attempts allowed for read-only calls after a timeout.
    pub read_retry_limit: u32,
    /// IAM-style role the engine assumes for published versions.
    pub engine_role_arn: String,
    /// Description attached to each published workflow version.
    pub version_description: String,
}

impl Default for CaseflowConfig {
    fn default() -> Self {
        Self {
            database_url: "postgresql://localhost/caseflow_development".to_string(),
            identity_timeout_ms: 2_000,
            store_read_timeout_ms: 5_000,
            store_write_timeout_ms: 5_000,
            engine_timeout_ms: 10_000,
            read_retry_limit: 2,
            engine_role_arn: String::new(),
            version_description: "new version".to_string(),
        }
    }
}

impl CaseflowConfig {
    /// Build configuration from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(db_url) = std::env::var("DATABASE_URL") {
            config.database_url = db_url;
        }

        if let Ok(role_arn) = std::env::var("CASEFLOW_ENGINE_ROLE_ARN") {
            config.engine_role_arn = role_arn;
        }

        if let Ok(timeout) = std::env::var("CASEFLOW_ENGINE_TIMEOUT_MS") {
            config.engine_timeout_ms = timeout.parse().map_err(|e| {
                UpdateError::Configuration(format!("Invalid engine_timeout_ms: {e}"))
            })?;
        }

        if let Ok(timeout) = std::env::var("CASEFLOW_STORE_READ_TIMEOUT_MS") {
            config.store_read_timeout_ms = timeout.parse().map_err(|e| {
                UpdateError::Configuration(format!("Invalid store_read_timeout_ms: {e}"))
            })?;
        }

        if let Ok(timeout) = std::env::var("CASEFLOW_STORE_WRITE_TIMEOUT_MS") {
            config.store_write_timeout_ms = timeout.parse().map_err(|e| {
                UpdateError::Configuration(format!("Invalid store_write_timeout_ms: {e}"))
            })?;
        }

        if let Ok(timeout) = std::env::var("CASEFLOW_IDENTITY_TIMEOUT_MS") {
            config.identity_timeout_ms = timeout.parse().map_err(|e| {
                UpdateError::Configuration(format!("Invalid identity_timeout_ms: {e}"))
            })?;
        }

        if let Ok(retries) = std::env::var("CASEFLOW_READ_RETRY_LIMIT") {
            config.read_retry_limit = retries.parse().map_err(|e| {
                UpdateError::Configuration(format!("Invalid read_retry_limit: {e}"))
            })?;
        }

        Ok(config)
    }
}
