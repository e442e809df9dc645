//! Error types and handling for the `TripWeaver` application

use thiserror::Error;

/// Main error type for the `TripWeaver` application
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Malformed or out-of-range trip preferences
    #[error("Invalid preferences: {message}")]
    Validation { message: String },

    /// Hotel/attraction search failures (transport, non-2xx, zero results)
    #[error("Search error: {message}")]
    Retrieval { message: String },

    /// LLM reply that is not valid or internally consistent JSON
    #[error("Failed to parse LLM response: {message}")]
    ResponseParse { message: String },

    /// Any failure during the itinerary build pipeline, cause retained
    #[error("Failed to build itinerary: {message}")]
    ItineraryBuild { message: String },

    /// File/template/conversion failures during export
    #[error("Export error: {message}")]
    Export { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl PlannerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new retrieval error
    pub fn retrieval<S: Into<String>>(message: S) -> Self {
        Self::Retrieval {
            message: message.into(),
        }
    }

    /// Create a new response-parse error
    pub fn response_parse<S: Into<String>>(message: S) -> Self {
        Self::ResponseParse {
            message: message.into(),
        }
    }

    /// Wrap a pipeline failure, keeping the underlying cause message
    pub fn itinerary_build<S: Into<String>>(message: S) -> Self {
        Self::ItineraryBuild {
            message: message.into(),
        }
    }

    /// Create a new export error
    pub fn export<S: Into<String>>(message: S) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PlannerError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            PlannerError::Validation { message } => {
                format!("Invalid preferences: {message}")
            }
            PlannerError::Retrieval { message } => {
                format!("Search failed: {message}. Please check your internet connection and retry.")
            }
            PlannerError::ResponseParse { message } => {
                format!("The itinerary reply could not be understood: {message}")
            }
            PlannerError::ItineraryBuild { message } => {
                format!("Itinerary generation failed: {message}. You can retry the generation step.")
            }
            PlannerError::Export { message } => {
                format!("Export failed: {message}")
            }
            PlannerError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = PlannerError::config("missing API key");
        assert!(matches!(config_err, PlannerError::Config { .. }));

        let validation_err = PlannerError::validation("budget must be positive");
        assert!(matches!(validation_err, PlannerError::Validation { .. }));

        let retrieval_err = PlannerError::retrieval("no hotels found");
        assert!(matches!(retrieval_err, PlannerError::Retrieval { .. }));

        let parse_err = PlannerError::response_parse("missing field `summary`");
        assert!(matches!(parse_err, PlannerError::ResponseParse { .. }));
    }

    #[test]
    fn test_build_error_wraps_cause() {
        let cause = PlannerError::response_parse("total cost mismatch");
        let wrapped = PlannerError::itinerary_build(cause.to_string());
        assert!(wrapped.to_string().contains("Failed to build itinerary"));
        assert!(wrapped.to_string().contains("total cost mismatch"));
    }

    #[test]
    fn test_user_messages() {
        let config_err = PlannerError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let retrieval_err = PlannerError::retrieval("test");
        assert!(retrieval_err.user_message().contains("retry"));

        let validation_err = PlannerError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let planner_err: PlannerError = io_err.into();
        assert!(matches!(planner_err, PlannerError::Io { .. }));
    }
}
