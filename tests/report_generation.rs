use std::collections::HashMap;

use async_trait::async_trait;
use gvm_report::errors::ReportError;
use gvm_report::gmp::GmpClient;
use gvm_report::models::{Host, ScanResult, Threat, Vulnerability};
use gvm_report::reporting::{
    build_report, collect_host_report, generate_host_report, generate_vulnerability_report,
    ReportOptions, ReportPeriod, SeverityCounts,
};

/// In-memory backend that records every filter it receives.
#[derive(Default)]
struct FakeGmp {
    hosts: Vec<Host>,
    results: HashMap<String, Vec<ScanResult>>,
    vulns: Vec<Vulnerability>,
    fail_assets: bool,
    queries: Vec<String>,
}

impl FakeGmp {
    fn with_results(mut self, ip: &str, threats: &[Threat]) -> Self {
        let results = threats.iter().map(|t| ScanResult::new(ip, t.clone())).collect();
        self.results.insert(ip.to_string(), results);
        self
    }
}

#[async_trait]
impl GmpClient for FakeGmp {
    async fn get_host_assets(&mut self, filter: &str) -> Result<Vec<Host>, ReportError> {
        self.queries.push(filter.to_string());
        if self.fail_assets {
            return Err(ReportError::MissingField("asset/name (asset id a9)".into()));
        }
        Ok(self.hosts.clone())
    }

    async fn get_results(&mut self, filter: &str) -> Result<Vec<ScanResult>, ReportError> {
        self.queries.push(filter.to_string());
        let ip = filter
            .strip_prefix("host=")
            .and_then(|rest| rest.split(' ').next())
            .unwrap_or_default();
        Ok(self.results.get(ip).cloned().unwrap_or_default())
    }

    async fn get_vulnerabilities(&mut self, filter: &str) -> Result<Vec<Vulnerability>, ReportError> {
        self.queries.push(filter.to_string());
        Ok(self.vulns.clone())
    }
}

fn february() -> ReportPeriod {
    ReportPeriod::for_month(2, 2021).unwrap()
}

fn sample_backend() -> FakeGmp {
    FakeGmp {
        hosts: vec![
            Host::new("10.0.0.1")
                .with_hostname("server1.example.com")
                .with_best_os_source("r-100"),
            Host::new("10.0.0.2"),
            Host::new("10.0.0.3").with_hostname("db01.example.com"),
        ],
        vulns: vec![
            Vulnerability::new("Windows 7 End Of Life", "10.0"),
            Vulnerability::new("OpenSSH Remote Code Execution", "9.8"),
            Vulnerability::new("Debian 9 End Of Life Detection", "9.5"),
            Vulnerability::new("Apache HTTP Server DoS", "7.5"),
        ],
        ..Default::default()
    }
    .with_results("10.0.0.1", &[Threat::High, Threat::High, Threat::Low])
    .with_results("10.0.0.2", &[Threat::Medium, Threat::Low, Threat::Log])
}

#[tokio::test]
async fn test_host_rows_follow_query_order_and_counts() {
    let mut gmp = sample_backend();
    let report = collect_host_report(&mut gmp, &february(), &ReportOptions::default())
        .await
        .unwrap();

    let ips: Vec<&str> = report.rows.iter().map(|r| r.ip.as_str()).collect();
    assert_eq!(ips, vec!["10.0.0.1", "10.0.0.2", "10.0.0.3"]);

    let first = &report.rows[0];
    assert_eq!(first.hostname, "server1");
    assert_eq!(first.os_source, "r-100");
    assert_eq!(first.counts, SeverityCounts { high: 2, medium: 0, low: 1 });

    let second = &report.rows[1];
    assert_eq!(second.hostname, "no disponible");
    assert_eq!(second.os_source, "no disponible");
    assert_eq!(second.counts, SeverityCounts { high: 0, medium: 1, low: 1 });

    assert_eq!(report.rows[2].hostname, "db01");
    assert_eq!(report.rows[2].counts, SeverityCounts::default());

    let summary = &report.summary;
    assert_eq!(summary.hosts, 3);
    assert_eq!(summary.totals, SeverityCounts { high: 2, medium: 1, low: 2 });
    assert_eq!(summary.hosts_with_high, 1);
    assert_eq!(summary.hosts_with_medium, 1);
    assert_eq!(summary.high_host_percentage(), 33);
}

#[tokio::test]
async fn test_queries_use_backend_filter_language() {
    let mut gmp = sample_backend();
    build_report(&mut gmp, &february(), &ReportOptions::default())
        .await
        .unwrap();

    assert_eq!(
        gmp.queries,
        vec![
            "rows=-1 and modified>2021-02-01 and modified<2021-03-01",
            "host=10.0.0.1 and severity>0.0",
            "host=10.0.0.2 and severity>0.0",
            "host=10.0.0.3 and severity>0.0",
            "severity>7 and newest>2021-02-01 sort-reverse=severity rows=-1",
        ]
    );
}

#[tokio::test]
async fn test_zero_hosts_reports_zero_percent() {
    let mut gmp = FakeGmp::default();
    let out = generate_host_report(&mut gmp, &february(), &ReportOptions::default())
        .await
        .unwrap();

    assert!(out.contains("Numero total de servidores escaneados en el periodo = 0\n"));
    assert!(out.contains(" - High:   0 = 0% del total de servidores analizados\n"));
    assert_eq!(gmp.queries.len(), 1);
}

#[tokio::test]
async fn test_vulnerability_lists_split_on_end_of_life() {
    let mut gmp = sample_backend();
    let out = generate_vulnerability_report(&mut gmp, &february(), &ReportOptions::default())
        .await
        .unwrap();

    let (eol, general) = out
        .split_once("\\subsection {Lista de vulneralidades presentes de categoria High}")
        .unwrap();

    let eol_items: Vec<&str> = eol.lines().filter(|l| l.starts_with("\\item")).collect();
    assert_eq!(
        eol_items,
        vec![
            "\\item \\begin{verbatim}Severity, name \\end{verbatim}",
            "\\item \\begin{verbatim}10.0, Windows 7 End Of Life \\end{verbatim}",
            "\\item \\begin{verbatim}9.5, Debian 9 End Of Life Detection \\end{verbatim}",
        ]
    );

    let general_items: Vec<&str> = general.lines().filter(|l| l.starts_with("\\item")).collect();
    assert_eq!(
        general_items,
        vec![
            "\\item \\begin{verbatim}Severity, name \\end{verbatim}",
            "\\item \\begin{verbatim}9.8, OpenSSH Remote Code Execution \\end{verbatim}",
            "\\item \\begin{verbatim}7.5, Apache HTTP Server DoS \\end{verbatim}",
        ]
    );

    assert!(out.contains(
        "\\begin{verbatim} severity>7 and newest>2021-02-01 sort-reverse=severity rows=-1 \\end{verbatim}\n"
    ));
}

#[tokio::test]
async fn test_full_report_section_order() {
    let mut gmp = sample_backend();
    let out = build_report(&mut gmp, &february(), &ReportOptions::default())
        .await
        .unwrap();

    let stats = out.find("Numero total de servidores").unwrap();
    let hosts = out.find("\\section{Vulnerabilidades por Host}").unwrap();
    let vulns = out.find("\\section{Top Vulnerabilidades}").unwrap();
    assert!(stats < hosts && hosts < vulns);
    assert!(out.contains("Busqueda de resultados desde 2021-02-01 00:00 a 2021-03-01 00:00 \n"));
    assert!(out.contains(" - High:   1 = 33% del total de servidores analizados\n - Medium: 1\n"));
    assert!(out.ends_with("\\end{itemize}\n"));
}

#[tokio::test]
async fn test_missing_field_aborts_whole_report() {
    let mut gmp = FakeGmp {
        fail_assets: true,
        ..sample_backend()
    };
    let err = build_report(&mut gmp, &february(), &ReportOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ReportError::MissingField(_)));
    // Nothing after the asset query ran
    assert_eq!(gmp.queries.len(), 1);
}

#[tokio::test]
async fn test_custom_options_change_label_and_threshold() {
    let options = ReportOptions {
        unavailable_label: "n/a".to_string(),
        vuln_severity_threshold: 9.0,
    };
    let mut gmp = sample_backend();
    let out = build_report(&mut gmp, &february(), &options).await.unwrap();

    assert!(out.contains("n/a"));
    assert!(!out.contains("no disponible"));
    assert_eq!(
        gmp.queries.last().map(String::as_str),
        Some("severity>9 and newest>2021-02-01 sort-reverse=severity rows=-1")
    );
}
