use thiserror::Error;

/// Error type that captures schedule construction failures.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Invalid rule: {0}")]
    InvalidRule(String),
    #[error("Invalid window: {0}")]
    InvalidWindow(String),
    #[error("Duplicate category name: {0}")]
    DuplicateCategory(String),
}
