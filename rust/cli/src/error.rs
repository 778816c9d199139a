//! Error types for the CLI application.
//!
//! Every command handler returns `Result<(), CliError>`; [`crate::run`] maps
//! an error to exit code [`crate::exit_code::ERROR`] after printing it.

use std::fmt;

use headsup_ai::UnknownPolicy;
use headsup_engine::errors::EngineError;

use crate::config::ConfigError;

#[derive(Debug)]
pub enum CliError {
    /// I/O error (stdout/stderr writes, config file reads)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Engine-related error
    Engine(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<EngineError> for CliError {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidCard(_) | EngineError::InvalidHand(_) => {
                CliError::InvalidInput(error.to_string())
            }
            EngineError::InvalidConfig(_) => CliError::Config(error.to_string()),
            other => CliError::Engine(other.to_string()),
        }
    }
}

impl From<UnknownPolicy> for CliError {
    fn from(error: UnknownPolicy) -> Self {
        CliError::InvalidInput(error.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_map_to_categories() {
        let bad_card: CliError = EngineError::InvalidCard("Zz".into()).into();
        assert!(matches!(bad_card, CliError::InvalidInput(_)));
        assert_eq!(bad_card.to_string(), "Invalid input: Invalid card: Zz");

        let blinds: CliError = EngineError::InvalidConfig("blinds must be positive".into()).into();
        assert!(matches!(blinds, CliError::Config(_)));

        let overrun: CliError = EngineError::BettingRoundOverrun {
            street: "flop".into(),
            limit: 100,
        }
        .into();
        assert!(matches!(overrun, CliError::Engine(_)));
    }

    #[test]
    fn unknown_policy_is_invalid_input() {
        let e: CliError = UnknownPolicy("maniac".into()).into();
        assert!(e.to_string().starts_with("Invalid input: Unknown policy: maniac"));
    }
}
