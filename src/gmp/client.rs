use async_trait::async_trait;
use crate::errors::ReportError;
use crate::models::{Host, ScanResult, Vulnerability};

/// Read-only queries the report needs from the management backend.
///
/// Filters use the backend's filter language verbatim.
#[async_trait]
pub trait GmpClient: Send {
    /// Host assets matching `filter`, in backend order.
    async fn get_host_assets(&mut self, filter: &str) -> Result<Vec<Host>, ReportError>;

    /// Results matching `filter`.
    async fn get_results(&mut self, filter: &str) -> Result<Vec<ScanResult>, ReportError>;

    /// Vulnerabilities matching `filter`, in backend order.
    async fn get_vulnerabilities(&mut self, filter: &str) -> Result<Vec<Vulnerability>, ReportError>;
}
