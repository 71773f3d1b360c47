use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "connection": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "type": { "type": "string", "enum": ["socket", "tcp"] },
                    "socket_path": { "type": "string" },
                    "host": { "type": "string" },
                    "port": { "type": "integer", "minimum": 1, "maximum": 65535 },
                    "timeout_secs": { "type": "integer", "minimum": 1 },
                    "retries": { "type": "integer", "minimum": 0 }
                }
            },
            "credentials": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "username": { "type": "string" },
                    "password": { "type": "string" }
                }
            },
            "report": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "unavailable_label": { "type": "string" },
                    "vuln_severity_threshold": { "type": "number", "minimum": 0, "maximum": 10 }
                }
            }
        }
    })
});
