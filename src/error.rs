use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("DisplayError: {0}")]
    Display(#[from] DisplayError),
    #[error("UtilsError: {0}")]
    Utils(#[from] UtilsError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

/// Failure of a single request against the risk API.
///
/// Transport failures, timeouts, non-success statuses and malformed bodies all
/// land here; callers decide whether to recover.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64, endpoint: String },
    #[error("HTTP error! status: {status}{}", server_suffix(.message))]
    Http {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("Request to {endpoint} failed: {message}")]
    Request { endpoint: String, message: String },
    #[error("Failed to parse response from {endpoint}: {message}")]
    Parse { endpoint: String, message: String },
}

fn server_suffix(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(" {}", message)
    }
}

impl ApiError {
    pub fn endpoint(&self) -> &str {
        match self {
            ApiError::Timeout { endpoint, .. }
            | ApiError::Http { endpoint, .. }
            | ApiError::Request { endpoint, .. }
            | ApiError::Parse { endpoint, .. } => endpoint,
        }
    }

    /// HTTP status of the failed response, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration save failed: {message}")]
    ConfigSaveFailed { message: String },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Terminal output error: {0}")]
    TerminalOutput(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration field '{field}' is missing")]
    MissingField { field: String, hint: String },
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum UtilsError {
    #[error("Validation error: {message}")]
    Validation { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorSeverity::High => "ERROR",
            ErrorSeverity::Medium => "WARN",
            ErrorSeverity::Low => "INFO",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::Timeout { .. } => ErrorSeverity::Medium,
                ApiError::Http { status, .. } if *status >= 500 => ErrorSeverity::High,
                ApiError::Request { .. } => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Display(_) => ErrorSeverity::Low,
            AppError::Utils(_) => ErrorSeverity::Low,
        }
    }

    pub fn display_friendly(&self) -> String {
        match self {
            AppError::Api(ApiError::Http { status: 404, .. }) => "Resource not found".to_string(),
            AppError::Api(err @ ApiError::Http { .. }) => err.to_string(),
            AppError::Config(ConfigError::MissingField { field, .. }) => {
                format!("Configuration value '{}' is not set", field)
            }
            AppError::Utils(UtilsError::Validation { message }) => message.clone(),
            _ => format!("{}", self),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Config(ConfigError::MissingField { hint, .. }) => Some(hint.clone()),
            AppError::Api(ApiError::Timeout { .. }) => {
                Some("Check that the risk API is reachable and try again".to_string())
            }
            AppError::Api(ApiError::Request { .. }) => Some(
                "Check --api-base / RISK_API_BASE points at a running risk API".to_string(),
            ),
            AppError::Api(ApiError::Http { status: 404, .. }) => {
                Some("'risk-cli search <query>' to look up a country code".to_string())
            }
            AppError::Storage(StorageError::ConfigParseError { .. }) => {
                Some("Fix or remove the configuration file and try again".to_string())
            }
            _ => None,
        }
    }
}
