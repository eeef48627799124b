use serde::{Deserialize, Serialize};

/// A single query target as sent by the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
    #[serde(default)]
    pub dataset: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_type: Option<String>,
}

impl WorksQuery {
    pub fn new(dataset: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            ..Default::default()
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_query_type(mut self, query_type: impl Into<String>) -> Self {
        self.query_type = Some(query_type.into());
        self
    }
}

/// Batched query request; only the first target is executed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataQueryRequest {
    #[serde(default)]
    pub targets: Vec<WorksQuery>,
}

/// Body of `POST /network`
#[derive(Debug, Serialize)]
pub(crate) struct NetworkRequest<'a> {
    pub dataset: &'a str,
    pub query: &'a str,
    #[serde(rename = "type")]
    pub query_type: &'a str,
}

impl<'a> From<&'a WorksQuery> for NetworkRequest<'a> {
    fn from(query: &'a WorksQuery) -> Self {
        Self {
            dataset: &query.dataset,
            query: query.query.as_deref().unwrap_or_default(),
            query_type: query.query_type.as_deref().unwrap_or_default(),
        }
    }
}

/// Drill-down query kinds understood by the GraphWorks backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryType {
    #[serde(rename = "getEvents")]
    GetEvents,
    #[serde(rename = "getMentions")]
    GetMentions,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::GetEvents => "getEvents",
            QueryType::GetMentions => "getMentions",
        }
    }
}

/// Node statistic; the backend sends either a score or a preformatted label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MainStat {
    Number(f64),
    Text(String),
}

impl MainStat {
    /// Numeric view used by the node table. Text that does not parse as a
    /// finite number counts as zero, as do NaN and infinities.
    pub fn as_f64(&self) -> f64 {
        let value = match self {
            MainStat::Number(value) => Some(*value),
            MainStat::Text(text) => text.trim().parse::<f64>().ok(),
        };
        value.filter(|v| v.is_finite()).unwrap_or(0.0)
    }
}

impl Default for MainStat {
    fn default() -> Self {
        MainStat::Number(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub title: String,
    pub sub_title: String,
    pub main_stat: MainStat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub src: String,
    pub dst: String,
    pub main_stat: String,
}

/// A named network exposed by the backend, shaped as a select option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub index: i64,
    /// Absent when the backend sends no label; such datasets sort last
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub value: String,
}

/// Outcome of the backend ping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}
