use thiserror::Error;

#[derive(Error, Debug)]
pub enum CourseError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status}: {reason}")]
    HttpStatus { status: u16, reason: String },

    #[error("Course document could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit status for a run that ended with this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,   // 可重試錯誤
            ErrorSeverity::High => 1,     // 處理錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        }
    }
}

impl CourseError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CourseError::Http(_) | CourseError::HttpStatus { .. } => ErrorCategory::Network,
            CourseError::Decode(_) | CourseError::Csv(_) => ErrorCategory::Data,
            CourseError::Io(_) => ErrorCategory::Storage,
            CourseError::ConfigError { .. }
            | CourseError::InvalidConfigValueError { .. }
            | CourseError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路問題通常可以重試
            CourseError::Http(_) => ErrorSeverity::Medium,
            CourseError::HttpStatus { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            CourseError::HttpStatus { .. } | CourseError::Decode(_) | CourseError::Csv(_) => {
                ErrorSeverity::High
            }
            CourseError::ConfigError { .. }
            | CourseError::InvalidConfigValueError { .. }
            | CourseError::MissingConfigError { .. } => ErrorSeverity::High,
            CourseError::Io(_) => ErrorSeverity::Critical,
        }
    }

    /// A fetch failure puts the view into its terminal error state.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            CourseError::Http(_) | CourseError::HttpStatus { .. } | CourseError::Decode(_)
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CourseError::Http(_) => "Check the network connection and that the source URL is reachable",
            CourseError::HttpStatus { .. } => "Verify the source URL points to an existing course document",
            CourseError::Decode(_) => {
                "Make sure the document is JSON shaped like {\"courses\": [...]}"
            }
            CourseError::Io(_) => "Check that the output directory exists and is writable",
            CourseError::Csv(_) => "Re-run with --verbose to see which row failed to encode",
            CourseError::ConfigError { .. }
            | CourseError::InvalidConfigValueError { .. }
            | CourseError::MissingConfigError { .. } => {
                "Fix the configuration value and run again"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CourseError::Http(_) | CourseError::HttpStatus { .. } | CourseError::Decode(_) => {
                format!("Failed to load subjects: {}", self)
            }
            CourseError::Io(e) => format!("Could not write output: {}", e),
            CourseError::Csv(e) => format!("Could not build CSV output: {}", e),
            CourseError::ConfigError { message } => format!("Configuration problem: {}", message),
            CourseError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid '{}': {}", field, reason)
            }
            CourseError::MissingConfigError { field } => format!("'{}' is required", field),
        }
    }
}

pub type Result<T> = std::result::Result<T, CourseError>;
