use crate::domain::model::NvpResponse;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayPalError {
    #[error("HTTP transport failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Gateway returned HTTP {status}: {message}")]
    CommunicationError { status: u16, message: String },

    #[error("PayPal reported failure: {response}")]
    FinancialError {
        response_code: String,
        reason_code: Option<String>,
        response: Box<NvpResponse>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Gateway,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PayPalError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PayPalError::TransportError(_) | PayPalError::CommunicationError { .. } => {
                ErrorCategory::Network
            }
            PayPalError::FinancialError { .. } => ErrorCategory::Gateway,
            PayPalError::ConfigError { .. }
            | PayPalError::ConfigValidationError { .. }
            | PayPalError::InvalidConfigValueError { .. }
            | PayPalError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PayPalError::SerializationError(_) | PayPalError::ValidationError { .. } => {
                ErrorCategory::Data
            }
            PayPalError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // ACK=Warning 之類的回應仍屬於失敗，但不是系統問題
            PayPalError::FinancialError { .. } => ErrorSeverity::High,
            PayPalError::TransportError(_) | PayPalError::CommunicationError { .. } => {
                ErrorSeverity::Medium
            }
            PayPalError::ValidationError { .. } | PayPalError::SerializationError(_) => {
                ErrorSeverity::High
            }
            PayPalError::ConfigError { .. }
            | PayPalError::ConfigValidationError { .. }
            | PayPalError::InvalidConfigValueError { .. }
            | PayPalError::MissingConfigError { .. }
            | PayPalError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PayPalError::TransportError(_) => {
                "Check network connectivity and that the NVP endpoint is reachable".to_string()
            }
            PayPalError::CommunicationError { status, .. } if *status >= 500 => {
                "PayPal is having trouble; try the request again later".to_string()
            }
            PayPalError::CommunicationError { .. } => {
                "Verify the endpoint URL and the sandbox setting".to_string()
            }
            PayPalError::FinancialError { reason_code, .. } => match reason_code.as_deref() {
                Some("10002") => "Check API username, password and signature".to_string(),
                Some(code) => {
                    format!("Look up PayPal error code {} in the NVP error reference", code)
                }
                None => "Inspect the full gateway response for details".to_string(),
            },
            PayPalError::IoError(_) => "Check file paths and permissions".to_string(),
            PayPalError::SerializationError(_) => "Inspect the response payload".to_string(),
            PayPalError::ConfigError { .. } | PayPalError::ConfigValidationError { .. } => {
                "Check the TOML configuration file syntax".to_string()
            }
            PayPalError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the configuration", field)
            }
            PayPalError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration or set it on the command line", field)
            }
            PayPalError::ValidationError { .. } => "Check the request arguments".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PayPalError::TransportError(_) => "Could not reach PayPal".to_string(),
            PayPalError::CommunicationError { status, .. } => {
                format!("PayPal answered with HTTP status {}", status)
            }
            PayPalError::FinancialError {
                response_code,
                reason_code,
                response,
            } => {
                let detail = response
                    .errors()
                    .first()
                    .and_then(|e| e.long_message.clone().or_else(|| e.short_message.clone()))
                    .unwrap_or_else(|| "no error details".to_string());
                format!(
                    "PayPal rejected the request (ACK={}, code={}): {}",
                    response_code,
                    reason_code.as_deref().unwrap_or("-"),
                    detail
                )
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PayPalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_financial_error_classification() {
        let response = NvpResponse::from_body(
            "ACK=Failure&L_ERRORCODE0=10002&L_LONGMESSAGE0=Security+header+is+not+valid",
        );
        let err = PayPalError::FinancialError {
            response_code: "Failure".to_string(),
            reason_code: Some("10002".to_string()),
            response: Box::new(response),
        };

        assert_eq!(err.category(), ErrorCategory::Gateway);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("signature"));
        assert_eq!(
            err.user_friendly_message(),
            "PayPal rejected the request (ACK=Failure, code=10002): Security header is not valid"
        );
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = PayPalError::MissingConfigError {
            field: "credentials.username".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.recovery_suggestion().contains("credentials.username"));
    }

    #[test]
    fn test_communication_error_suggestion_depends_on_status() {
        let server_side = PayPalError::CommunicationError {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        let client_side = PayPalError::CommunicationError {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert!(server_side.recovery_suggestion().contains("later"));
        assert!(client_side.recovery_suggestion().contains("endpoint"));
    }
}
