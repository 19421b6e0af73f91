use crate::domain::model::FieldError;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("Validation error: {0}")]
    ValidationError(ValidationErrors),

    #[error("Delivery failed: {message}")]
    DeliveryError {
        message: String,
        status: Option<u16>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

/// 一次驗證中所有失敗的欄位
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn fields(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(FieldError::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Delivery,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ContactError {
    /// 將傳輸層錯誤轉為投遞失敗
    pub fn from_transport(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request to email gateway timed out".to_string()
        } else if err.is_connect() {
            format!("could not connect to email gateway: {}", err)
        } else {
            format!("email gateway request failed: {}", err)
        };

        ContactError::DeliveryError {
            message,
            status: err.status().map(|s| s.as_u16()),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ContactError::ValidationError(_) => ErrorCategory::Validation,
            ContactError::DeliveryError { .. } => ErrorCategory::Delivery,
            ContactError::MissingConfigError { .. }
            | ContactError::InvalidConfigValueError { .. }
            | ContactError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            ContactError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Delivery => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ContactError::ValidationError(errors) => {
                format!("Please fix the highlighted fields ({})", errors)
            }
            ContactError::DeliveryError { .. } => {
                "Your message could not be sent. Nothing was lost, you can try again.".to_string()
            }
            ContactError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
            ContactError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            ContactError::ConfigValidationError { message, .. } => {
                format!("Configuration problem: {}", message)
            }
            ContactError::IoError(e) => format!("I/O failure: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Correct the listed fields and submit again",
            ErrorCategory::Delivery => {
                "Check your network connection and the gateway credentials, then retry"
            }
            ErrorCategory::Configuration => {
                "Check the EMAILJS_* environment variables or the TOML config file"
            }
            ErrorCategory::System => "Re-run with --verbose and inspect the logs",
        }
    }
}

pub type Result<T> = std::result::Result<T, ContactError>;
