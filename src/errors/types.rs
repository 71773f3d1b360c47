use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("GMP command {command} failed with status {status}: {message}")]
    Gmp {
        command: String,
        status: String,
        message: String,
    },

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<quick_xml::Error> for ReportError {
    fn from(e: quick_xml::Error) -> Self {
        ReportError::Xml(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for ReportError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        ReportError::Xml(e.to_string())
    }
}

impl ReportError {
    /// Process exit code used by the binary for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReportError::Config(_) => 2,
            ReportError::Connection(_) => 3,
            ReportError::Authentication(_) => 4,
            ReportError::InvalidDate(_) => 5,
            _ => 1,
        }
    }
}
