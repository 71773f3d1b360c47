/// A host asset as returned by the asset query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    /// IP address, taken from the asset name.
    pub ip: String,
    /// Value of the first `hostname` identifier, if any.
    pub hostname: Option<String>,
    /// Id of the report that supplied the `best_os_cpe` detail.
    pub best_os_source_id: Option<String>,
}

impl Host {
    pub fn new(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            hostname: None,
            best_os_source_id: None,
        }
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn with_best_os_source(mut self, id: impl Into<String>) -> Self {
        self.best_os_source_id = Some(id.into());
        self
    }

    /// Hostname cut at the first '.', falling back to `unavailable`.
    pub fn short_hostname<'a>(&'a self, unavailable: &'a str) -> &'a str {
        let full = self.hostname.as_deref().unwrap_or(unavailable);
        full.split('.').next().unwrap_or(full)
    }

    pub fn best_os_source_or<'a>(&'a self, unavailable: &'a str) -> &'a str {
        self.best_os_source_id.as_deref().unwrap_or(unavailable)
    }
}
