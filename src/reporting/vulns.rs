use tracing::info;

use crate::errors::ReportError;
use crate::gmp::GmpClient;
use crate::models::Vulnerability;
use super::latex;
use super::period::ReportPeriod;
use super::ReportOptions;

/// Leading item of both lists, rendered like a data row.
const LIST_HEADER: (&str, &str) = ("Severity", "name");

/// Vulnerabilities above `threshold` seen since the start of the period, most severe first.
pub fn vulnerabilities_filter(period: &ReportPeriod, threshold: f64) -> String {
    format!(
        "severity>{} and newest>{} sort-reverse=severity rows=-1",
        threshold, period.from
    )
}

/// Query results split by the end-of-life marker, both in query order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VulnerabilityLists {
    pub end_of_life: Vec<Vulnerability>,
    pub other: Vec<Vulnerability>,
}

impl VulnerabilityLists {
    pub fn partition(vulns: Vec<Vulnerability>) -> Self {
        let (end_of_life, other) = vulns.into_iter().partition(Vulnerability::is_end_of_life);
        Self { end_of_life, other }
    }
}

fn render_list(vulns: &[Vulnerability]) -> String {
    let header = format!("{}, {}", LIST_HEADER.0, LIST_HEADER.1);
    let items: Vec<String> = std::iter::once(header)
        .chain(vulns.iter().map(|v| format!("{}, {}", v.severity, v.name)))
        .collect();
    latex::itemize(items.iter().map(String::as_str))
}

pub fn render_vulnerability_report(filter: &str, lists: &VulnerabilityLists) -> String {
    let mut out = latex::section("Top Vulnerabilidades");
    out.push_str("Lista de vulnerabilidades del mes, filtro utilizado:\n");
    out.push_str(&latex::inline_verbatim(filter));
    out.push('\n');
    out.push_str(&latex::subsection("Lista de vulneralidades End of Life"));
    out.push_str(&render_list(&lists.end_of_life));
    out.push_str(&latex::subsection("Lista de vulneralidades presentes de categoria High"));
    out.push_str(&render_list(&lists.other));
    out
}

pub async fn generate_vulnerability_report(
    client: &mut dyn GmpClient,
    period: &ReportPeriod,
    options: &ReportOptions,
) -> Result<String, ReportError> {
    let filter = vulnerabilities_filter(period, options.vuln_severity_threshold);
    let vulns = client.get_vulnerabilities(&filter).await?;
    let lists = VulnerabilityLists::partition(vulns);
    info!(
        end_of_life = lists.end_of_life.len(),
        other = lists.other.len(),
        "Fetched top vulnerabilities"
    );
    Ok(render_vulnerability_report(&filter, &lists))
}
