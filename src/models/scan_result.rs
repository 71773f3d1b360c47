/// Threat label attached to a result. Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Threat {
    High,
    Medium,
    Low,
    Log,
    Other(String),
}

impl Threat {
    pub fn from_label(label: &str) -> Self {
        match label {
            "High" => Threat::High,
            "Medium" => Threat::Medium,
            "Low" => Threat::Low,
            "Log" => Threat::Log,
            other => Threat::Other(other.to_string()),
        }
    }
}

/// A single result record; only its threat matters for the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub host: Option<String>,
    pub threat: Threat,
}

impl ScanResult {
    pub fn new(host: impl Into<String>, threat: Threat) -> Self {
        Self {
            host: Some(host.into()),
            threat,
        }
    }
}
