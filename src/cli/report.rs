use std::path::Path;

use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::cli::commands::{Cli, USAGE};
use crate::config::{parse_config, resolve_settings, ConnectionSettings, ReportConfig};
use crate::errors::{with_retry, ReportError};
use crate::gmp::GmpConnection;
use crate::reporting::{build_report, ReportOptions, ReportPeriod};

/// Period requested on the command line; `None` when month or year is missing.
pub fn requested_period(cli: &Cli) -> Result<Option<ReportPeriod>, ReportError> {
    match (cli.month, cli.year) {
        (Some(month), Some(year)) => ReportPeriod::for_month(month, year).map(Some),
        _ => Ok(None),
    }
}

pub async fn handle_report(cli: Cli) -> Result<(), ReportError> {
    let Some(period) = requested_period(&cli)? else {
        println!("{}", USAGE);
        return Ok(());
    };

    let config = match &cli.config {
        Some(path) => parse_config(Path::new(path)).await?,
        None => ReportConfig::default(),
    };
    let settings = resolve_settings(&config, &cli.connection_overrides())?;
    let options = ReportOptions::from_config(config.report.as_ref());

    info!(period = %period, transport = %settings.transport, "Generating monthly report");

    let mut conn = open_session(&settings).await?;
    let report = build_report(&mut conn, &period, &options).await?;

    let mut stdout = tokio::io::stdout();
    stdout.write_all(report.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

/// Connect and authenticate, retrying transient failures.
pub async fn open_session(settings: &ConnectionSettings) -> Result<GmpConnection, ReportError> {
    with_retry("gmp-session", &settings.retry, || async move {
        let mut conn = GmpConnection::connect(settings).await?;
        conn.authenticate(&settings.username, &settings.password).await?;
        Ok(conn)
    })
    .await
}
