//! # Structured Logging Module
//!
//! Environment-aware structured logging for debugging the update-and-dispatch
//! pipeline, including the reconciliation-gap reports operators act on.

use std::sync::OnceLock;

use chrono::Utc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use uuid::Uuid;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = get_log_level(&environment);

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_filter(EnvFilter::new(log_level)),
        );

        // Use try_init to avoid panic if a global subscriber already exists
        // (common when the embedding service installed its own).
        if subscriber.try_init().is_err() {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        }

        tracing::info!(
            environment = %environment,
            "Structured logging initialized"
        );
    });
}

/// Get current environment from environment variables
fn get_environment() -> String {
    std::env::var("CASEFLOW_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> String {
    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Log structured data for update operations
pub fn log_update_operation(
    operation: &str,
    use_case_id: Uuid,
    execution_name: Option<&str>,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        use_case_id = %use_case_id,
        execution_name = execution_name,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "UPDATE_OPERATION"
    );
}

/// Log a reconciliation gap with every handle an operator needs to re-point
/// the stored execution reference.
pub fn log_reconciliation_gap(
    use_case_id: Uuid,
    workflow_id: Uuid,
    version_arn: &str,
    execution_arn: &str,
    execution_name: &str,
    reason: &str,
) {
    tracing::error!(
        use_case_id = %use_case_id,
        workflow_id = %workflow_id,
        version_arn = %version_arn,
        execution_arn = %execution_arn,
        execution_name = %execution_name,
        reason = %reason,
        timestamp = %Utc::now().to_rfc3339(),
        "RECONCILIATION_GAP"
    );
}
