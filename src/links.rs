//! Context-menu links for nodes of the GDELT knowledge networks.
//!
//! The links point back into this data source with a drill-down query;
//! their presence is also what makes the node context menu show up at all.

use crate::config::ConnectionSettings;
use crate::models::QueryType;
use serde::{Deserialize, Serialize};

/// Application domain the drill-down links belong to
pub const LINK_DOMAIN: &str = "GDELT";

/// Item reference resolved by the UI against the hovered node's fields
pub const NODE_QUERY_TEMPLATE: &str =
    r#"node(name: "${__data.fields.title}", type: "${__data.fields.subTitle}")"#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub title: String,
    pub url: String,
    pub internal: InternalLink,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalLink {
    pub query: LinkQuery,
    pub datasource_uid: String,
    pub datasource_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkQuery {
    pub query_type: QueryType,
    pub query: String,
}

/// Build the events and mentions links, in that order
pub fn build_links(item_query: &str, connection: &ConnectionSettings) -> Vec<Link> {
    [("Events", QueryType::GetEvents), ("Mentions", QueryType::GetMentions)]
        .into_iter()
        .map(|(label, query_type)| Link {
            title: format!("{}/{}", LINK_DOMAIN, label),
            url: String::new(),
            internal: InternalLink {
                query: LinkQuery {
                    query_type,
                    query: item_query.to_string(),
                },
                datasource_uid: connection.uid.clone(),
                datasource_name: connection.name.clone(),
            },
        })
        .collect()
}
