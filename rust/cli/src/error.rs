//! Error types for the CLI application.

use std::fmt;

use pokergym_ai::AgentError;
use pokergym_engine::errors::GameError;

use crate::config::ConfigError;

/// Every way a command handler can fail. `run` maps all of them to exit code 2.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Table misuse reported by the engine
    Engine(GameError),

    /// Agent construction, checkpoint or training failure
    Agent(AgentError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(e) => write!(f, "Engine error: {}", e),
            CliError::Agent(e) => write!(f, "Agent error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Engine(e) => Some(e),
            CliError::Agent(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error)
    }
}

impl From<AgentError> for CliError {
    fn from(error: AgentError) -> Self {
        match error {
            AgentError::Game(e) => CliError::Engine(e),
            AgentError::Io(e) => CliError::Io(e),
            other => CliError::Agent(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_errors_unwrap_engine_and_io() {
        let e: CliError = AgentError::Game(GameError::DeckExhausted).into();
        assert!(matches!(e, CliError::Engine(GameError::DeckExhausted)));
        let e: CliError = AgentError::NoLegalAction.into();
        assert!(matches!(e, CliError::Agent(_)));
    }

    #[test]
    fn display_prefixes_kind() {
        let e = CliError::InvalidInput("hands must be >= 1".into());
        assert_eq!(e.to_string(), "Invalid input: hands must be >= 1");
    }
}
