use crate::errors::ReportError;
use crate::models::{Host, ScanResult, Threat, Vulnerability};
use super::xml::Element;

/// Command name behind a `<xxx_response>` root.
pub fn command_name(response: &Element) -> &str {
    response.name.strip_suffix("_response").unwrap_or(&response.name)
}

/// Fail unless the response carries a 2xx status.
pub fn check_status(response: &Element) -> Result<(), ReportError> {
    let status = response.attr("status").unwrap_or_default();
    if status.starts_with('2') {
        return Ok(());
    }
    Err(ReportError::Gmp {
        command: command_name(response).to_string(),
        status: if status.is_empty() { "missing".to_string() } else { status.to_string() },
        message: response.attr("status_text").unwrap_or("no status text").to_string(),
    })
}

pub fn parse_hosts(response: &Element) -> Result<Vec<Host>, ReportError> {
    response.children("asset").map(host_from_asset).collect()
}

fn host_from_asset(asset: &Element) -> Result<Host, ReportError> {
    let ip = asset
        .child_text("name")
        .ok_or_else(|| ReportError::MissingField(format!(
            "asset/name (asset id {})",
            asset.attr("id").unwrap_or("unknown")
        )))?;

    let hostname = asset.find("identifiers").and_then(|ids| {
        ids.children("identifier")
            .filter(|i| i.child_text("name") == Some("hostname"))
            .find_map(|i| i.child_text("value"))
    });

    let best_os_source_id = asset.find("host").and_then(|host| {
        host.children("detail")
            .filter(|d| d.child_text("name") == Some("best_os_cpe"))
            .find_map(|d| d.child("source").and_then(|s| s.attr("id")))
    });

    Ok(Host {
        ip: ip.to_string(),
        hostname: hostname.map(str::to_string),
        best_os_source_id: best_os_source_id.map(str::to_string),
    })
}

pub fn parse_results(response: &Element) -> Vec<ScanResult> {
    response
        .children("result")
        .map(|r| ScanResult {
            host: r.child_text("host").map(str::to_string),
            threat: Threat::from_label(r.child_text("threat").unwrap_or_default()),
        })
        .collect()
}

pub fn parse_vulnerabilities(response: &Element) -> Result<Vec<Vulnerability>, ReportError> {
    response
        .children("vuln")
        .map(|v| {
            let id = v.attr("id").unwrap_or("unknown");
            let name = v
                .child_text("name")
                .ok_or_else(|| ReportError::MissingField(format!("vuln/name (vuln id {})", id)))?;
            let severity = v
                .child_text("severity")
                .ok_or_else(|| ReportError::MissingField(format!("vuln/severity (vuln id {})", id)))?;
            Ok(Vulnerability::new(name, severity))
        })
        .collect()
}
