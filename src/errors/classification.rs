use super::types::ReportError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

impl ReportError {
    /// Classify this error to determine its type and whether it can be retried.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Retryable errors
            ReportError::Connection(_) => ErrorClassification {
                error_type: "ConnectionError",
                retryable: true,
            },
            ReportError::Timeout(_) => ErrorClassification {
                error_type: "TimeoutError",
                retryable: true,
            },

            // Non-retryable errors
            ReportError::Config(_) => ErrorClassification {
                error_type: "ConfigurationError",
                retryable: false,
            },
            ReportError::InvalidDate(_) => ErrorClassification {
                error_type: "InvalidDateError",
                retryable: false,
            },
            ReportError::Authentication(_) => ErrorClassification {
                error_type: "AuthenticationError",
                retryable: false,
            },
            ReportError::Gmp { .. } => ErrorClassification {
                error_type: "GmpError",
                retryable: false,
            },
            ReportError::MissingField(_) => ErrorClassification {
                error_type: "MissingFieldError",
                retryable: false,
            },
            ReportError::Xml(_) => ErrorClassification {
                error_type: "XmlError",
                retryable: false,
            },
            ReportError::Io(_) => ErrorClassification {
                error_type: "IoError",
                retryable: false,
            },
            ReportError::Yaml(_) => ErrorClassification {
                error_type: "SerializationError",
                retryable: false,
            },
        }
    }
}
