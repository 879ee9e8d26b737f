use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Validation failed: {}", .messages.join("; "))]
    Validation { messages: Vec<String> },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("could not acquire exclusive lock after {attempts} attempts")]
    LockContended { attempts: u32 },

    #[error("data file '{path}' could not be opened: {source}")]
    Unavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to rewrite data file: {0}")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Storage,
    Configuration,
    System,
}

impl IntakeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            IntakeError::Validation { .. } => ErrorCategory::Validation,
            IntakeError::Storage(_) => ErrorCategory::Storage,
            IntakeError::Config { .. } | IntakeError::InvalidConfigValue { .. } => {
                ErrorCategory::Configuration
            }
            IntakeError::Io(_) | IntakeError::Serialization(_) => ErrorCategory::System,
        }
    }

    /// Status class reported at the request boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            IntakeError::Validation { .. } => 200,
            _ => 500,
        }
    }

    /// Message safe to show to an end user. Storage and system failures never
    /// include file paths or OS error details.
    pub fn user_friendly_message(&self) -> String {
        match self {
            IntakeError::Validation { messages } => messages.join("\n"),
            IntakeError::Storage(_) | IntakeError::Io(_) | IntakeError::Serialization(_) => {
                "Could not write to the data file. Check permissions.".to_string()
            }
            IntakeError::Config { .. } | IntakeError::InvalidConfigValue { .. } => {
                format!("Invalid configuration: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            IntakeError::Validation { .. } => "Correct the listed fields and submit again",
            IntakeError::Storage(StorageError::LockContended { .. }) => {
                "Another writer held the data file; retry the submission"
            }
            IntakeError::Storage(_) | IntakeError::Io(_) => {
                "Check that the data file location exists and is writable"
            }
            IntakeError::Serialization(_) => "Inspect the record for unsupported values",
            IntakeError::Config { .. } | IntakeError::InvalidConfigValue { .. } => {
                "Review the configuration file and command-line overrides"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, IntakeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_map_to_500_with_generic_message() {
        let err = IntakeError::from(StorageError::Unavailable {
            path: "/srv/secret/exams.json".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        });

        assert_eq!(err.status_code(), 500);
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert!(!err.user_friendly_message().contains("/srv/secret"));
    }

    #[test]
    fn validation_errors_stay_in_200_class() {
        let err = IntakeError::Validation {
            messages: vec!["Last name is required.".to_string()],
        };
        assert_eq!(err.status_code(), 200);
        assert_eq!(err.user_friendly_message(), "Last name is required.");
    }
}
