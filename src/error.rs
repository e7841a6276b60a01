//! Error taxonomy shared by the client, the state machine and the CLI.
//!
//! Every variant carries the message shown to the user. Underlying causes
//! are logged where they happen and never shown verbatim.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimatorError {
    /// The location probe could not complete (timeout, transport, bad body).
    #[error("{0}")]
    Connectivity(String),

    /// A required form field was missing at submission time.
    #[error("{0}")]
    Validation(String),

    /// The estimate call failed after submission.
    #[error("{0}")]
    Request(String),

    /// The configuration file or overrides were unusable.
    #[error("configuration error: {0}")]
    Config(String),
}

impl EstimatorError {
    /// Message suitable for a banner
    pub fn user_message(&self) -> String {
        match self {
            EstimatorError::Connectivity(msg)
            | EstimatorError::Validation(msg)
            | EstimatorError::Request(msg) => msg.clone(),
            EstimatorError::Config(_) => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EstimatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_is_bare_for_runtime_failures() {
        let err = EstimatorError::Validation("Please fill all the fields".into());
        assert_eq!(err.user_message(), "Please fill all the fields");
        assert_eq!(err.to_string(), "Please fill all the fields");
    }

    #[test]
    fn test_config_error_is_prefixed() {
        let err = EstimatorError::Config("bad url".into());
        assert_eq!(err.user_message(), "configuration error: bad url");
    }
}
