use tracing::{debug, error, info, warn};

/// Logs the start of a user action with consistent format
pub fn log_command_start(command: &str, user_id: u64, details: Option<&str>) {
    match details {
        Some(d) => info!("CMD_START: {} by user {} - {}", command, user_id, d),
        None => info!("CMD_START: {} by user {}", command, user_id),
    }
}

/// Logs the completion of a user action with consistent format
pub fn log_command_success(command: &str, user_id: u64, details: Option<&str>) {
    match details {
        Some(d) => info!("CMD_SUCCESS: {} by user {} - {}", command, user_id, d),
        None => info!("CMD_SUCCESS: {} by user {}", command, user_id),
    }
}

/// Logs a failed user action with consistent format
pub fn log_command_error(command: &str, user_id: u64, error: &str) {
    error!("CMD_ERROR: {} by user {} - {}", command, user_id, error);
}

/// Logs rejected user input with consistent format
pub fn log_validation_error(command: &str, field: &str, error: &str, user_id: u64) {
    warn!(
        "VALIDATION_ERROR: {} - {} invalid: {} - user {}",
        command, field, error, user_id
    );
}

/// Logs database operations with consistent format
pub fn log_database_operation(operation: &str, table: &str, details: Option<&str>) {
    match details {
        Some(d) => debug!("DB_OP: {} on {} - {}", operation, table, d),
        None => debug!("DB_OP: {} on {}", operation, table),
    }
}

/// Logs database errors with consistent format
pub fn log_database_error(operation: &str, table: &str, error: &str) {
    error!("DB_ERROR: {} on {} failed: {}", operation, table, error);
}

/// Logs timeout events with consistent format
pub fn log_timeout(operation: &str, duration_secs: u64, details: Option<&str>) {
    match details {
        Some(d) => warn!("TIMEOUT: {} after {}s - {}", operation, duration_secs, d),
        None => warn!("TIMEOUT: {} after {}s", operation, duration_secs),
    }
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
