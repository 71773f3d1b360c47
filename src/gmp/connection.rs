use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::config::{ConnectionSettings, Transport};
use crate::errors::ReportError;
use crate::models::{Host, ScanResult, Vulnerability};
use super::client::GmpClient;
use super::xml::{self, Element};
use super::{commands, responses};

/// Largest response accepted from gvmd.
pub const MAX_RESPONSE_BYTES: u64 = 64 * 1024 * 1024;

/// Byte stream a GMP session can run over.
pub trait GmpStream: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> GmpStream for T {}

/// A GMP session: one XML command out, one XML response back.
pub struct GmpConnection {
    stream: BufReader<Box<dyn GmpStream>>,
    timeout: Duration,
    max_response: u64,
}

impl GmpConnection {
    pub fn new<S: GmpStream + 'static>(stream: S, timeout: Duration) -> Self {
        Self::from_boxed(Box::new(stream), timeout)
    }

    fn from_boxed(stream: Box<dyn GmpStream>, timeout: Duration) -> Self {
        Self {
            stream: BufReader::new(stream),
            timeout,
            max_response: MAX_RESPONSE_BYTES,
        }
    }

    /// Override the response size cap.
    pub fn with_max_response(mut self, bytes: u64) -> Self {
        self.max_response = bytes;
        self
    }

    /// Open the transport described by `settings`. Does not authenticate.
    pub async fn connect(settings: &ConnectionSettings) -> Result<Self, ReportError> {
        let limit = settings.timeout;
        let stream: Box<dyn GmpStream> = match &settings.transport {
            #[cfg(unix)]
            Transport::Socket(path) => {
                let stream = tokio::time::timeout(limit, tokio::net::UnixStream::connect(path))
                    .await
                    .map_err(|_| ReportError::Timeout(format!("Connecting to {}", path.display())))?
                    .map_err(|e| ReportError::Connection(format!(
                        "Cannot connect to socket {}: {}",
                        path.display(),
                        e
                    )))?;
                Box::new(stream)
            }
            #[cfg(not(unix))]
            Transport::Socket(path) => {
                return Err(ReportError::Config(format!(
                    "Unix socket transport ({}) is not available on this platform",
                    path.display()
                )));
            }
            Transport::Tcp { host, port } => {
                warn!(host = %host, port = *port, "GMP over unencrypted TCP, credentials are sent in clear text");
                let stream = tokio::time::timeout(limit, tokio::net::TcpStream::connect((host.as_str(), *port)))
                    .await
                    .map_err(|_| ReportError::Timeout(format!("Connecting to {}:{}", host, port)))?
                    .map_err(|e| ReportError::Connection(format!(
                        "Cannot connect to {}:{}: {}",
                        host, port, e
                    )))?;
                Box::new(stream)
            }
        };

        info!(transport = %settings.transport, "Connected to GMP backend");
        Ok(Self::from_boxed(stream, limit))
    }

    pub async fn authenticate(&mut self, username: &str, password: &str) -> Result<(), ReportError> {
        let response = self.exchange(&commands::authenticate(username, password)).await?;
        responses::check_status(&response).map_err(|e| match e {
            ReportError::Gmp { status, message, .. } => ReportError::Authentication(format!(
                "gvmd rejected credentials for '{}' ({}: {})",
                username, status, message
            )),
            other => other,
        })?;
        info!(user = %username, "Authenticated");
        Ok(())
    }

    /// Send a command and return its response, failing on a non-2xx status.
    pub async fn send_command(&mut self, command: &str) -> Result<Element, ReportError> {
        let response = self.exchange(command).await?;
        responses::check_status(&response)?;
        Ok(response)
    }

    async fn exchange(&mut self, command: &str) -> Result<Element, ReportError> {
        let limit = self.timeout;
        let response = tokio::time::timeout(limit, self.round_trip(command))
            .await
            .map_err(|_| ReportError::Timeout(format!(
                "No complete response from gvmd within {}s",
                limit.as_secs()
            )))??;
        debug!(
            command = responses::command_name(&response),
            children = response.children.len(),
            status = response.attr("status").unwrap_or("missing"),
            "GMP response received"
        );
        Ok(response)
    }

    /// Write `command`, then build the response tree as it streams in.
    async fn round_trip(&mut self, command: &str) -> Result<Element, ReportError> {
        let io_err = |e: std::io::Error| ReportError::Connection(format!("GMP stream error: {}", e));

        self.stream.write_all(command.as_bytes()).await.map_err(io_err)?;
        self.stream.flush().await.map_err(io_err)?;

        xml::read_element(&mut self.stream, self.max_response)
            .await?
            .ok_or_else(|| {
                ReportError::Connection("Connection closed before the response was complete".into())
            })
    }
}

#[async_trait]
impl GmpClient for GmpConnection {
    async fn get_host_assets(&mut self, filter: &str) -> Result<Vec<Host>, ReportError> {
        let response = self.send_command(&commands::get_host_assets(filter)).await?;
        responses::parse_hosts(&response)
    }

    async fn get_results(&mut self, filter: &str) -> Result<Vec<ScanResult>, ReportError> {
        let response = self.send_command(&commands::get_results(filter)).await?;
        Ok(responses::parse_results(&response))
    }

    async fn get_vulnerabilities(&mut self, filter: &str) -> Result<Vec<Vulnerability>, ReportError> {
        let response = self.send_command(&commands::get_vulns(filter)).await?;
        responses::parse_vulnerabilities(&response)
    }
}
