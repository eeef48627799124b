use crate::error::{DatasourceError, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Connection settings of one configured data source instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSettings {
    pub url: String,
    pub with_credentials: bool,
    /// Preformatted `Authorization` header value, e.g. `Basic dXNlcjpwYXNz`
    pub basic_auth: Option<String>,
    pub uid: String,
    pub name: String,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080".to_string(),
            with_credentials: false,
            basic_auth: None,
            uid: "graphworks".to_string(),
            name: "GraphWorks".to_string(),
        }
    }
}

impl ConnectionSettings {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            url: env::var("GRAPHWORKS_URL").unwrap_or(defaults.url),
            with_credentials: parse_flag(
                "GRAPHWORKS_WITH_CREDENTIALS",
                env::var("GRAPHWORKS_WITH_CREDENTIALS").ok(),
            )?,
            basic_auth: env::var("GRAPHWORKS_BASIC_AUTH")
                .ok()
                .filter(|value| !value.is_empty()),
            uid: env::var("GRAPHWORKS_DATASOURCE_UID").unwrap_or(defaults.uid),
            name: env::var("GRAPHWORKS_DATASOURCE_NAME").unwrap_or(defaults.name),
        })
    }

    /// Requests must carry credentials when either flag is configured
    pub fn sends_credentials(&self) -> bool {
        self.with_credentials || self.basic_auth.is_some()
    }
}

/// Settings of the HTTP facade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3005".to_string()),
        })
    }
}

fn parse_flag(key: &str, value: Option<String>) -> Result<bool> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(raw) => match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(DatasourceError::configuration(format!(
                "{} must be a boolean, got '{}'",
                key, raw
            ))),
        },
    }
}
