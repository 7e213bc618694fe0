use thiserror::Error;

/// Errors surfaced to callers of the picker API.
#[derive(Debug, Error)]
pub enum PickerError {
    #[error("Invalid selector '{0}': expected '#id' or '.class'")]
    InvalidSelector(String),
    #[error("Selector '{0}' matched no elements")]
    NoMatch(String),
    #[error("Element matched by '{0}' is not an input element")]
    NotAnInput(String),
    #[error("Total minutes {0} is outside 0..=1439")]
    OutOfRange(i64),
    #[error("Unknown event '{0}'")]
    UnknownEvent(String),
    #[error("A picker is already registered under '{0}'")]
    DuplicateKey(String),
    #[error("Picker is busy notifying its listeners")]
    Busy,
    #[error("Invalid picker options: {0}")]
    Config(#[from] serde_json::Error),
}

/// Problems found while validating a configuration. Never fatal: the offending
/// option falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigWarning {
    #[error("step must be an integer between 1 and 60, got {0}; using default")]
    InvalidStep(String),
}
