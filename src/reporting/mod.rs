pub mod hosts;
pub mod latex;
pub mod period;
pub mod table;
pub mod vulns;

pub use hosts::{collect_host_report, generate_host_report, HostReport, HostRow, HostSummary, SeverityCounts};
pub use period::ReportPeriod;
pub use vulns::{generate_vulnerability_report, VulnerabilityLists};

use crate::config::ReportSection;
use crate::errors::ReportError;
use crate::gmp::GmpClient;

pub const DEFAULT_UNAVAILABLE_LABEL: &str = "no disponible";
pub const DEFAULT_VULN_SEVERITY_THRESHOLD: f64 = 7.0;

/// Knobs that change report content.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Shown for a missing hostname or OS source.
    pub unavailable_label: String,
    /// Vulnerabilities must be strictly above this severity.
    pub vuln_severity_threshold: f64,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            unavailable_label: DEFAULT_UNAVAILABLE_LABEL.to_string(),
            vuln_severity_threshold: DEFAULT_VULN_SEVERITY_THRESHOLD,
        }
    }
}

impl ReportOptions {
    pub fn from_config(section: Option<&ReportSection>) -> Self {
        let defaults = Self::default();
        match section {
            Some(s) => Self {
                unavailable_label: s.unavailable_label.clone().unwrap_or(defaults.unavailable_label),
                vuln_severity_threshold: s
                    .vuln_severity_threshold
                    .unwrap_or(defaults.vuln_severity_threshold),
            },
            None => defaults,
        }
    }
}

/// Build the full monthly report: host section, then vulnerability section.
///
/// Nothing is returned unless every query succeeds.
pub async fn build_report(
    client: &mut dyn GmpClient,
    period: &ReportPeriod,
    options: &ReportOptions,
) -> Result<String, ReportError> {
    let mut report = generate_host_report(client, period, options).await?;
    report.push_str(&generate_vulnerability_report(client, period, options).await?);
    Ok(report)
}
