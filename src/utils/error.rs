use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Unauthorized: the analysis server requires a login session")]
    Unauthorized,

    #[error("Authentication failed: {message}")]
    AuthenticationError { message: String },

    #[error("Server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Select a financial workbook.")]
    NoFileSelected,

    #[error("{message}")]
    ExportError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Server,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DashError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashError::ApiError(_) | DashError::UrlError(_) => ErrorCategory::Network,
            DashError::Unauthorized
            | DashError::AuthenticationError { .. }
            | DashError::ServerError { .. }
            | DashError::ExportError { .. } => ErrorCategory::Server,
            DashError::ConfigError { .. }
            | DashError::ConfigValidationError { .. }
            | DashError::InvalidConfigValueError { .. }
            | DashError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DashError::NoFileSelected | DashError::SerializationError(_) => ErrorCategory::Input,
            DashError::IoError(_) | DashError::CsvError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DashError::NoFileSelected => ErrorSeverity::Low,
            DashError::ApiError(_) | DashError::ServerError { .. } | DashError::ExportError { .. } => {
                ErrorSeverity::Medium
            }
            DashError::Unauthorized
            | DashError::AuthenticationError { .. }
            | DashError::SerializationError(_)
            | DashError::CsvError(_)
            | DashError::ConfigError { .. }
            | DashError::ConfigValidationError { .. }
            | DashError::InvalidConfigValueError { .. }
            | DashError::MissingConfigError { .. }
            | DashError::UrlError(_) => ErrorSeverity::High,
            DashError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DashError::ApiError(_) => "Check that the analysis server is running and reachable",
            DashError::UrlError(_) => "Use an absolute http(s) URL for server.base_url",
            DashError::Unauthorized | DashError::AuthenticationError { .. } => {
                "Verify auth.username and auth.password in the configuration"
            }
            DashError::ServerError { status, .. } if *status >= 500 => {
                "The analysis server failed; retry later or inspect its logs"
            }
            DashError::ServerError { .. } => "Upload a valid Excel workbook (.xlsx or .xls)",
            DashError::ExportError { .. } => "Run the analysis again, then retry the export",
            DashError::NoFileSelected => "Pass the path of a financial workbook",
            DashError::SerializationError(_) => {
                "The server returned an unexpected payload; check server and client versions"
            }
            DashError::ConfigError { .. }
            | DashError::ConfigValidationError { .. }
            | DashError::InvalidConfigValueError { .. }
            | DashError::MissingConfigError { .. } => "Fix the configuration file or CLI flags",
            DashError::IoError(_) | DashError::CsvError(_) => {
                "Check file permissions and free disk space in the output directory"
            }
        }
    }

    /// Message shown in the alert line.
    pub fn user_friendly_message(&self) -> String {
        match self {
            DashError::ApiError(e) if e.is_timeout() => {
                "The analysis server did not answer in time".to_string()
            }
            DashError::ApiError(e) if e.is_connect() => {
                "Could not connect to the analysis server".to_string()
            }
            DashError::ServerError { message, .. } => message.clone(),
            DashError::ExportError { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashError>;
