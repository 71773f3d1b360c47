use tracing::{debug, info};

use crate::errors::ReportError;
use crate::gmp::GmpClient;
use crate::models::{Host, ScanResult, Threat};
use super::latex;
use super::period::ReportPeriod;
use super::table::render_ascii_table;
use super::ReportOptions;

const TABLE_HEADER: [&str; 6] = ["Hostname", "IP", "Informe", "high", "medium", "low"];

/// Host assets modified inside the period, all rows.
pub fn assets_filter(period: &ReportPeriod) -> String {
    format!("rows=-1 and modified>{} and modified<{}", period.from, period.to)
}

/// Results with a real severity for one host.
pub fn results_filter(ip: &str) -> String {
    format!("host={} and severity>0.0", ip)
}

/// Result counts per threat tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    pub fn tally(results: &[ScanResult]) -> Self {
        results.iter().fold(Self::default(), |mut acc, r| {
            match r.threat {
                Threat::High => acc.high += 1,
                Threat::Medium => acc.medium += 1,
                Threat::Low => acc.low += 1,
                _ => {}
            }
            acc
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRow {
    pub hostname: String,
    pub ip: String,
    pub os_source: String,
    pub counts: SeverityCounts,
}

impl HostRow {
    pub fn new(host: &Host, counts: SeverityCounts, unavailable: &str) -> Self {
        Self {
            hostname: host.short_hostname(unavailable).to_string(),
            ip: host.ip.clone(),
            os_source: host.best_os_source_or(unavailable).to_string(),
            counts,
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.hostname.clone(),
            self.ip.clone(),
            self.os_source.clone(),
            self.counts.high.to_string(),
            self.counts.medium.to_string(),
            self.counts.low.to_string(),
        ]
    }
}

/// Running totals across hosts; only high and medium get a hosts-affected counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostSummary {
    pub hosts: usize,
    pub totals: SeverityCounts,
    pub hosts_with_high: usize,
    pub hosts_with_medium: usize,
}

impl HostSummary {
    pub fn record(&mut self, counts: &SeverityCounts) {
        self.hosts += 1;
        self.totals.high += counts.high;
        self.totals.medium += counts.medium;
        self.totals.low += counts.low;
        if counts.high > 0 {
            self.hosts_with_high += 1;
        }
        if counts.medium > 0 {
            self.hosts_with_medium += 1;
        }
    }

    /// Whole-number share of hosts with a high result; 0 when there are no hosts.
    pub fn high_host_percentage(&self) -> usize {
        if self.hosts == 0 {
            return 0;
        }
        self.hosts_with_high * 100 / self.hosts
    }
}

#[derive(Debug, Clone)]
pub struct HostReport {
    pub period: ReportPeriod,
    pub rows: Vec<HostRow>,
    pub summary: HostSummary,
}

impl HostReport {
    pub fn new(period: ReportPeriod) -> Self {
        Self {
            period,
            rows: Vec::new(),
            summary: HostSummary::default(),
        }
    }

    pub fn push(&mut self, row: HostRow) {
        self.summary.record(&row.counts);
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let s = &self.summary;
        let stats = format!(
            "Numero total de servidores escaneados en el periodo = {}\n\
             Busqueda de resultados desde {} 00:00 a {} 00:00 \n\
             \n\
             Vulnerabilidades Nivel:\n \
             - High:   {}\n \
             - Medium: {}\n \
             - Low:    {}\n\
             \n\
             \n\
             Numero de Servidores con vulnerabilidad:\n \
             - High:   {} = {}% del total de servidores analizados\n \
             - Medium: {}\n\
             \n",
            s.hosts,
            self.period.from,
            self.period.to,
            s.totals.high,
            s.totals.medium,
            s.totals.low,
            s.hosts_with_high,
            s.high_host_percentage(),
            s.hosts_with_medium,
        );

        let rows: Vec<Vec<String>> = self.rows.iter().map(HostRow::cells).collect();
        let table = render_ascii_table(&TABLE_HEADER, &rows);

        let mut out = latex::verbatim(&stats);
        out.push_str(&latex::section("Vulnerabilidades por Host"));
        out.push_str(&latex::verbatim(&format!("{}\n\n", table)));
        out
    }
}

/// Query assets for the period and their results, one host at a time.
pub async fn collect_host_report(
    client: &mut dyn GmpClient,
    period: &ReportPeriod,
    options: &ReportOptions,
) -> Result<HostReport, ReportError> {
    let hosts = client.get_host_assets(&assets_filter(period)).await?;
    info!(hosts = hosts.len(), period = %period, "Fetched host assets");

    let mut report = HostReport::new(*period);
    for host in &hosts {
        let results = client.get_results(&results_filter(&host.ip)).await?;
        let counts = SeverityCounts::tally(&results);
        debug!(
            ip = %host.ip,
            high = counts.high,
            medium = counts.medium,
            low = counts.low,
            "Tallied host results"
        );
        report.push(HostRow::new(host, counts, &options.unavailable_label));
    }

    Ok(report)
}

pub async fn generate_host_report(
    client: &mut dyn GmpClient,
    period: &ReportPeriod,
    options: &ReportOptions,
) -> Result<String, ReportError> {
    Ok(collect_host_report(client, period, options).await?.render())
}
