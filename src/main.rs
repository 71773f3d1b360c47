use clap::Parser;
use gvm_report::cli;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // stdout carries the report, so logs go to stderr
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.with_ansi(!cli.no_color).init();
    }

    debug!(
        version = env!("CARGO_PKG_VERSION"),
        git_hash = option_env!("GIT_HASH").unwrap_or("dev"),
        built = option_env!("BUILD_TIMESTAMP").unwrap_or("unknown"),
        "gvm-report starting"
    );

    if let Err(e) = cli::handle_report(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
