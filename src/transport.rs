use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::{DatasourceError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A fetch-style request, fully composed by the data source
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub url: String,
    pub method: Method,
    pub headers: HashMap<String, String>,
    pub data: Option<Value>,
    pub with_credentials: bool,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: Method::Get,
            headers: HashMap::new(),
            data: None,
            with_credentials: false,
        }
    }

    pub fn post(url: impl Into<String>, data: Value) -> Self {
        Self {
            method: Method::Post,
            data: Some(data),
            ..Self::get(url)
        }
    }
}

/// Executes a request and hands back the parsed JSON body
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, request: FetchRequest) -> Result<Value>;
}

/// `reqwest`-backed transport. No retries and no timeouts are configured.
#[derive(Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, request: FetchRequest) -> Result<Value> {
        debug!(
            "{:?} {} (with credentials: {})",
            request.method, request.url, request.with_credentials
        );

        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(data) = &request.data {
            builder = builder.json(data);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("GraphWorks request to {} failed: {}", request.url, status);
            return Err(DatasourceError::HttpStatus {
                status: status.as_u16(),
                url: request.url,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            DatasourceError::malformed(format!("response from {} is not JSON: {}", request.url, e))
        })
    }
}
