use std::cmp::Ordering;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::config::ConnectionSettings;
use crate::error::{DatasourceError, Result};
use crate::frame::{field_names, GraphFrame};
use crate::links::{build_links, NODE_QUERY_TEMPLATE};
use crate::models::{DataQueryRequest, Dataset, HealthStatus, NetworkRequest, WorksQuery};
use crate::parser::{parse_datasets, parse_health, parse_network_response};
use crate::transform::{transform, GraphFrames};
use crate::transport::{FetchRequest, HttpTransport, Transport};

/// Frames answering a batched query
#[derive(Debug, Clone, Serialize)]
pub struct DataQueryResponse {
    pub data: Vec<GraphFrame>,
}

/// Data source for the GraphWorks knowledge networks.
///
/// Holds only its settings and a transport; every call is independent, so
/// one instance can be shared across tasks.
#[derive(Clone)]
pub struct WorksDataSource<T = HttpTransport> {
    settings: ConnectionSettings,
    transport: T,
}

impl WorksDataSource<HttpTransport> {
    pub fn new(settings: ConnectionSettings) -> Self {
        Self::with_transport(settings, HttpTransport::new())
    }
}

impl<T: Transport> WorksDataSource<T> {
    pub fn with_transport(settings: ConnectionSettings, transport: T) -> Self {
        Self {
            settings,
            transport,
        }
    }

    /// Run a batched request. Multiple queries are not supported: the
    /// first target is executed and the others are ignored.
    #[instrument(skip(self, request), fields(targets = request.targets.len()))]
    pub async fn query(&self, request: &DataQueryRequest) -> Result<DataQueryResponse> {
        let target = request
            .targets
            .first()
            .ok_or_else(|| DatasourceError::invalid_query("request contains no query targets"))?;

        if request.targets.len() > 1 {
            debug!(
                "Ignoring {} additional query targets",
                request.targets.len() - 1
            );
        }

        let frames = self.execute_graph_query(target).await?;
        Ok(DataQueryResponse {
            data: frames.into_vec(),
        })
    }

    /// Fetch one network and shape it into node and edge frames
    #[instrument(skip(self), fields(dataset = %query.dataset))]
    pub async fn execute_graph_query(&self, query: &WorksQuery) -> Result<GraphFrames> {
        let body = serde_json::to_value(NetworkRequest::from(query))?;
        let response = self.transport.fetch(self.post("/network", body)).await?;

        let (nodes, edges) = parse_network_response(&response)?;
        let mut frames = transform(&nodes, &edges)?;

        // The links also make the node context menu visible
        let links = build_links(NODE_QUERY_TEMPLATE, &self.settings);
        if let Some(config) = frames.nodes.field_config_mut(field_names::ID) {
            config.links = links;
        }

        info!(
            "Network query returned {} nodes and {} edges",
            frames.nodes.num_rows(),
            frames.edges.num_rows()
        );
        Ok(frames)
    }

    /// Names of the networks the backend serves, sorted by label
    #[instrument(skip(self))]
    pub async fn list_datasets(&self) -> Result<Vec<Dataset>> {
        let response = self.transport.fetch(self.get("/datasets")).await?;
        let mut datasets = parse_datasets(&response)?;
        // Stable: equal labels keep their wire order, missing labels go last
        datasets.sort_by(|a, b| match (&a.label, &b.label) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        debug!("Retrieved {} datasets", datasets.len());
        Ok(datasets)
    }

    /// Ping the backend; status and message are passed through as sent
    #[instrument(skip(self))]
    pub async fn check_connection(&self) -> Result<HealthStatus> {
        let response = self.transport.fetch(self.get("/ping")).await?;
        let health = parse_health(&response)?;

        info!("GraphWorks ping: {} ({})", health.status, health.message);
        Ok(health)
    }

    fn get(&self, api_path: &str) -> FetchRequest {
        self.with_credentials(FetchRequest::get(self.url(api_path)))
    }

    fn post(&self, api_path: &str, data: serde_json::Value) -> FetchRequest {
        self.with_credentials(FetchRequest::post(self.url(api_path), data))
    }

    fn url(&self, api_path: &str) -> String {
        format!("{}{}", self.settings.url.trim_end_matches('/'), api_path)
    }

    fn with_credentials(&self, mut request: FetchRequest) -> FetchRequest {
        if self.settings.sends_credentials() {
            request.with_credentials = true;
            if let Some(basic_auth) = &self.settings.basic_auth {
                request
                    .headers
                    .insert("Authorization".to_string(), basic_auth.clone());
            }
        }
        request
    }
}
