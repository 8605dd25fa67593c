use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Pattern error: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required config field: {field}")]
    MissingConfigError { field: String },

    #[error("Mission error: {message}")]
    MissionError { message: String },

    #[error("Mission mismatch: expected '{expected}' but server has '{loaded}' loaded")]
    MissionMismatchError { expected: String, loaded: String },

    #[error("Process error: {message}")]
    ProcessError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Archive,
    Mission,
    Process,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PersistError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PersistError::ConfigError { .. }
            | PersistError::InvalidConfigValueError { .. }
            | PersistError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PersistError::HttpError(_) => ErrorCategory::Network,
            PersistError::ZipError(_) => ErrorCategory::Archive,
            PersistError::MissionError { .. }
            | PersistError::MissionMismatchError { .. }
            | PersistError::PatternError(_) => ErrorCategory::Mission,
            PersistError::ProcessError { .. } => ErrorCategory::Process,
            PersistError::IoError(_) | PersistError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // A transient network failure is worth retrying on the next run.
            PersistError::HttpError(_) => ErrorSeverity::Medium,
            PersistError::MissionError { .. }
            | PersistError::MissionMismatchError { .. }
            | PersistError::ZipError(_)
            | PersistError::PatternError(_)
            | PersistError::ProcessError { .. } => ErrorSeverity::High,
            PersistError::ConfigError { .. }
            | PersistError::InvalidConfigValueError { .. }
            | PersistError::MissingConfigError { .. }
            | PersistError::IoError(_)
            | PersistError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PersistError::HttpError(_) => {
                "Could not reach the DCS server control endpoint or the Discord webhook."
                    .to_string()
            }
            PersistError::MissionMismatchError { expected, loaded } => format!(
                "The server is not running the configured mission (expected {}, found {}).",
                expected, loaded
            ),
            PersistError::MissionError { message } => {
                format!("Mission file could not be updated: {}", message)
            }
            PersistError::ZipError(_) => {
                "The .miz archive could not be read or rewritten.".to_string()
            }
            PersistError::ProcessError { message } => {
                format!("DCS server process control failed: {}", message)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check dcs_persistence_config.json (or re-save it from the config app).".to_string()
            }
            ErrorCategory::Network => {
                "Verify that the DCS server is running with the WebGUI enabled and that the webhook URL is correct."
                    .to_string()
            }
            ErrorCategory::Archive => {
                "Verify the mission_path points to a valid .miz file that is not open elsewhere."
                    .to_string()
            }
            ErrorCategory::Mission => {
                "Inspect the mission file; it may have been saved with a layout this tool does not recognize."
                    .to_string()
            }
            ErrorCategory::Process => {
                "Check that dcs_server_exe points to the server binary and that you have permission to manage it."
                    .to_string()
            }
            ErrorCategory::System => {
                "Check disk space and file permissions in the working directory.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PersistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping() {
        let err = PersistError::MissingConfigError {
            field: "mission_path".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.category(), ErrorCategory::Configuration);

        let err = PersistError::MissionError {
            message: "no start_time".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.category(), ErrorCategory::Mission);
    }

    #[test]
    fn test_mismatch_message_names_both_paths() {
        let err = PersistError::MissionMismatchError {
            expected: "c:/missions/a.miz".to_string(),
            loaded: "c:/missions/b.miz".to_string(),
        };
        let msg = err.user_friendly_message();
        assert!(msg.contains("a.miz"));
        assert!(msg.contains("b.miz"));
    }
}
