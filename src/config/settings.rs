use std::path::PathBuf;
use std::time::Duration;

use crate::errors::{ReportError, RetryConfig};
use super::credentials::resolve_credential;
use super::types::*;

/// Where the GMP backend listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    Socket(PathBuf),
    Tcp { host: String, port: u16 },
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transport::Socket(path) => write!(f, "socket:{}", path.display()),
            Transport::Tcp { host, port } => write!(f, "tcp:{}:{}", host, port),
        }
    }
}

/// Fully resolved connection parameters.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub transport: Transport,
    pub timeout: Duration,
    pub retry: RetryConfig,
    pub username: String,
    pub password: String,
}

/// Connection values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub socket: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Merge defaults, the config file and overrides (highest precedence).
///
/// `--socket` and `--host` pick their transport regardless of `connection.type`.
pub fn resolve_settings(
    config: &ReportConfig,
    overrides: &ConnectionOverrides,
) -> Result<ConnectionSettings, ReportError> {
    let conn = config.connection.clone().unwrap_or_default();
    let creds = config.credentials.clone().unwrap_or_default();

    let kind = if overrides.socket.is_some() {
        TransportKind::Socket
    } else if overrides.host.is_some() {
        TransportKind::Tcp
    } else {
        conn.transport.unwrap_or_default()
    };

    let transport = match kind {
        TransportKind::Socket => Transport::Socket(PathBuf::from(
            overrides
                .socket
                .clone()
                .or(conn.socket_path)
                .unwrap_or_else(|| DEFAULT_SOCKET_PATH.to_string()),
        )),
        TransportKind::Tcp => Transport::Tcp {
            host: overrides.host.clone().or(conn.host).ok_or_else(|| {
                ReportError::Config("TCP transport needs a host (--host or connection.host)".into())
            })?,
            port: overrides.port.or(conn.port).unwrap_or(DEFAULT_GMP_PORT),
        },
    };

    let timeout_secs = overrides
        .timeout_secs
        .or(conn.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(ReportError::Config("Timeout must be at least 1 second".into()));
    }

    let username = overrides
        .username
        .clone()
        .or_else(|| creds.username.as_deref().map(resolve_credential))
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ReportError::Config(
            "GMP username not set (--gmp-username, GMP_USERNAME or credentials.username)".into(),
        ))?;
    let password = overrides
        .password
        .clone()
        .or_else(|| creds.password.as_deref().map(resolve_credential))
        .ok_or_else(|| ReportError::Config(
            "GMP password not set (--gmp-password, GMP_PASSWORD or credentials.password)".into(),
        ))?;

    Ok(ConnectionSettings {
        transport,
        timeout: Duration::from_secs(timeout_secs),
        retry: RetryConfig {
            max_retries: conn.retries.unwrap_or(DEFAULT_RETRIES),
        },
        username,
        password,
    })
}
