use std::path::Path;
use crate::errors::ReportError;
use super::types::ReportConfig;
use super::schema::CONFIG_SCHEMA;
use tracing::warn;

const MAX_CONFIG_BYTES: u64 = 1_048_576;

pub async fn parse_config(path: &Path) -> Result<ReportConfig, ReportError> {
    if !path.exists() {
        return Err(ReportError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(ReportError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;

    // An empty file is a valid, empty configuration
    if yaml.is_null() {
        return Ok(ReportConfig::default());
    }

    validate_schema(&yaml)?;

    let config: ReportConfig = serde_yaml::from_value(yaml)?;
    validate_values(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), ReportError> {
    // Convert YAML value to JSON for schema validation
    let json_str = serde_json::to_string(yaml)
        .map_err(|e| ReportError::Config(format!("Config conversion error: {}", e)))?;
    let json_value: serde_json::Value = serde_json::from_str(&json_str)
        .map_err(|e| ReportError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| ReportError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory only; typed parsing below is authoritative
        for e in errors {
            warn!(validation_error = %format!("{} at {}", e, e.instance_path), "Config schema warning");
        }
    }

    Ok(())
}

/// Reject values that parse but cannot be used.
fn validate_values(config: &ReportConfig) -> Result<(), ReportError> {
    if let Some(threshold) = config.report.as_ref().and_then(|r| r.vuln_severity_threshold) {
        if !(0.0..=10.0).contains(&threshold) {
            return Err(ReportError::Config(format!(
                "report.vuln_severity_threshold must be between 0 and 10, got {}",
                threshold
            )));
        }
    }

    if let Some(conn) = &config.connection {
        if conn.timeout_secs == Some(0) {
            return Err(ReportError::Config("connection.timeout_secs must be at least 1".into()));
        }
    }

    if let Some(creds) = &config.credentials {
        let has_username = creds.username.as_ref().map_or(false, |u| !u.is_empty());
        let has_password = creds.password.as_ref().map_or(false, |p| !p.is_empty());
        if has_username != has_password {
            warn!("Credentials section sets only one of username/password");
        }
    }

    Ok(())
}
