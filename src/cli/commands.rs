use clap::Parser;
use crate::config::ConnectionOverrides;

/// Printed when month or year is missing.
pub const USAGE: &str = "
    This command will display all vulnerabilities from the hosts of the
    reports in a given month!
    It needs two parameters after the command name.
    First one is the month and second one is the year.
    Both parameters are plain numbers, so no text.

    1. <month>  -- month of the monthly report
    2. <year>   -- year of the monthly report

    Example:
        $ gvm-report --gmp-username name --gmp-password pass \\
    --socket /run/gvmd/gvmd.sock 05 2019
";

#[derive(Parser, Debug)]
#[command(
    name = "gvm-report",
    version,
    about = "Monthly LaTeX vulnerability report from a Greenbone/GVM manager"
)]
pub struct Cli {
    /// Month of the report (1-12)
    pub month: Option<u32>,

    /// Year of the report
    pub year: Option<i32>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// gvmd Unix socket path
    #[arg(long, conflicts_with = "host")]
    pub socket: Option<String>,

    /// gvmd host, reached over unencrypted TCP. TLS is not supported: gvmd
    /// normally expects TLS on its port, so point this at a TLS-terminating
    /// proxy or a plaintext GMP listener
    #[arg(long)]
    pub host: Option<String>,

    /// gvmd port for --host (default 9390)
    #[arg(long)]
    pub port: Option<u16>,

    /// GMP username
    #[arg(long, env = "GMP_USERNAME")]
    pub gmp_username: Option<String>,

    /// GMP password
    #[arg(long, env = "GMP_PASSWORD", hide_env_values = true)]
    pub gmp_password: Option<String>,

    /// Seconds to wait for each GMP response
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    pub fn connection_overrides(&self) -> ConnectionOverrides {
        ConnectionOverrides {
            socket: self.socket.clone(),
            host: self.host.clone(),
            port: self.port,
            username: self.gmp_username.clone(),
            password: self.gmp_password.clone(),
            timeout_secs: self.timeout,
        }
    }
}
