use serde::{Deserialize, Serialize};

pub const DEFAULT_SOCKET_PATH: &str = "/run/gvmd/gvmd.sock";
pub const DEFAULT_GMP_PORT: u16 = 9390;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_RETRIES: u32 = 2;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ReportConfig {
    pub connection: Option<ConnectionConfig>,
    pub credentials: Option<CredentialsConfig>,
    pub report: Option<ReportSection>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ConnectionConfig {
    #[serde(rename = "type")]
    pub transport: Option<TransportKind>,
    pub socket_path: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub timeout_secs: Option<u64>,
    pub retries: Option<u32>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[default]
    Socket,
    Tcp,
}

impl TransportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Socket => "socket",
            Self::Tcp => "tcp",
        }
    }
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CredentialsConfig {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ReportSection {
    pub unavailable_label: Option<String>,
    pub vuln_severity_threshold: Option<f64>,
}
