/*!
# GraphWorks Data Source

Connector for the GraphWorks knowledge-graph backend, which serves networks
extracted from GDELT events and mentions.

This library provides:
- Network queries against `POST /network`, dataset listing and a ping
- Normalization of raw node/edge payloads into typed records
- Node graph frames: column tables with one-hot category arcs
- Drill-down links for the node context menu
- An HTTP facade exposing the operations above

One query per request: batched requests execute their first target only.
*/

pub mod arrow_converter;
pub mod config;
pub mod datasource;
pub mod error;
pub mod frame;
pub mod links;
pub mod models;
pub mod parser;
pub mod server;
pub mod transform;
pub mod transport;

pub use config::{ConnectionSettings, ServerConfig};
pub use datasource::{DataQueryResponse, WorksDataSource};
pub use error::{DatasourceError, Result};
pub use frame::GraphFrame;
pub use links::{build_links, Link};
pub use models::*;
pub use transform::{transform, Category, GraphFrames};
pub use transport::{FetchRequest, HttpTransport, Method, Transport};
