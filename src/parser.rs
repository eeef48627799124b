use serde_json::{Map, Value};

use crate::error::{DatasourceError, Result};
use crate::models::{Dataset, Edge, HealthStatus, MainStat, Node};

/// Parse the `POST /network` response body.
/// Structure: {"nodes": [{id, title, subTitle, mainStat}, ...], "edges": [{id, src, dst, name}, ...]}
pub fn parse_network_response(body: &Value) -> Result<(Vec<Node>, Vec<Edge>)> {
    let object = body
        .as_object()
        .ok_or_else(|| DatasourceError::malformed("network response is not a JSON object"))?;

    let nodes = required_array(object, "nodes")?
        .iter()
        .map(parse_node)
        .collect::<Result<Vec<_>>>()?;
    let edges = required_array(object, "edges")?
        .iter()
        .map(parse_edge)
        .collect::<Result<Vec<_>>>()?;

    Ok((nodes, edges))
}

/// Parse a single raw node, keeping only the fields the frames need
pub fn parse_node(value: &Value) -> Result<Node> {
    let fields = record(value, "node")?;
    Ok(Node {
        id: extract_string(fields.get("id")),
        title: extract_string(fields.get("title")),
        sub_title: extract_string(fields.get("subTitle")),
        main_stat: extract_main_stat(fields.get("mainStat")),
    })
}

/// Parse a single raw edge. The backend labels edges with `name`.
pub fn parse_edge(value: &Value) -> Result<Edge> {
    let fields = record(value, "edge")?;
    let label = fields
        .get("name")
        .filter(|v| !v.is_null())
        .or_else(|| fields.get("mainStat"));
    Ok(Edge {
        id: extract_string(fields.get("id")),
        src: extract_string(fields.get("src")),
        dst: extract_string(fields.get("dst")),
        main_stat: extract_string(label),
    })
}

/// Parse the `GET /datasets` response body, in wire order
pub fn parse_datasets(body: &Value) -> Result<Vec<Dataset>> {
    let items = body
        .as_array()
        .ok_or_else(|| DatasourceError::malformed("datasets response is not a JSON array"))?;

    items.iter().map(parse_dataset).collect()
}

pub fn parse_dataset(value: &Value) -> Result<Dataset> {
    let fields = record(value, "dataset")?;
    Ok(Dataset {
        index: extract_index(fields.get("index"))?,
        label: extract_optional_string(fields.get("label")),
        value: extract_string(fields.get("value")),
    })
}

/// Parse the `GET /ping` response body
pub fn parse_health(body: &Value) -> Result<HealthStatus> {
    let fields = record(body, "ping response")?;
    Ok(HealthStatus {
        status: extract_string(fields.get("status")),
        message: extract_string(fields.get("message")),
    })
}

fn required_array<'a>(object: &'a Map<String, Value>, key: &str) -> Result<&'a Vec<Value>> {
    match object.get(key) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(DatasourceError::malformed(format!(
            "'{}' must be an array, got {}",
            key,
            type_name(other)
        ))),
        None => Err(DatasourceError::malformed(format!("missing '{}'", key))),
    }
}

fn record<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        DatasourceError::malformed(format!("{} must be an object, got {}", what, type_name(value)))
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Render scalars as text; null, missing and composite values are empty
fn extract_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn extract_main_stat(value: Option<&Value>) -> MainStat {
    match value {
        Some(Value::Number(n)) => MainStat::Number(n.as_f64().unwrap_or(0.0)),
        Some(Value::String(s)) => MainStat::Text(s.clone()),
        _ => MainStat::default(),
    }
}

/// Like [`extract_string`], but keeps null and missing apart from `""`
fn extract_optional_string(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        other => Some(extract_string(other)),
    }
}

/// Dataset index: missing or null is 0; anything but an integer is rejected
fn extract_index(value: Option<&Value>) -> Result<i64> {
    let index = match value {
        None | Some(Value::Null) => return Ok(0),
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Some(Value::String(s)) => s.trim().parse().ok(),
        Some(_) => None,
    };
    index.ok_or_else(|| {
        DatasourceError::malformed(format!(
            "dataset index must be an integer, got {}",
            value.map(Value::to_string).unwrap_or_default()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_network_response() {
        let body = json!({
            "nodes": [
                {"id": "n1", "title": "A", "subTitle": "positive", "mainStat": 5, "extra": true},
                {"id": 7, "title": "B", "mainStat": "12"}
            ],
            "edges": [
                {"id": "e1", "src": "n1", "dst": "7", "name": "mentions", "weight": 3}
            ]
        });

        let (nodes, edges) = parse_network_response(&body).unwrap();

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].id, "n1");
        assert_eq!(nodes[0].sub_title, "positive");
        assert_eq!(nodes[0].main_stat, MainStat::Number(5.0));
        assert_eq!(nodes[1].id, "7");
        assert_eq!(nodes[1].sub_title, "");
        assert_eq!(nodes[1].main_stat, MainStat::Text("12".to_string()));

        assert_eq!(
            edges,
            vec![Edge {
                id: "e1".to_string(),
                src: "n1".to_string(),
                dst: "7".to_string(),
                main_stat: "mentions".to_string(),
            }]
        );
    }

    #[test]
    fn test_null_fields_default() {
        let node = parse_node(&json!({"id": "n1", "title": null, "subTitle": null})).unwrap();
        assert_eq!(node.title, "");
        assert_eq!(node.sub_title, "");
        assert_eq!(node.main_stat, MainStat::Number(0.0));
    }

    #[test]
    fn test_edge_label_fallback() {
        let edge = parse_edge(&json!({"id": "e1", "src": "a", "dst": "b", "mainStat": "self"}))
            .unwrap();
        assert_eq!(edge.main_stat, "self");

        let edge = parse_edge(&json!({
            "id": "e1", "src": "a", "dst": "b", "name": "knows", "mainStat": "ignored"
        }))
        .unwrap();
        assert_eq!(edge.main_stat, "knows");
    }

    #[test]
    fn test_non_finite_main_stat_serializes_as_zero() {
        let body = json!({
            "nodes": [
                {"id": "n1", "mainStat": "NaN"},
                {"id": "n2", "mainStat": "inf"}
            ],
            "edges": []
        });

        let (nodes, edges) = parse_network_response(&body).unwrap();
        let frames = crate::transform::transform(&nodes, &edges).unwrap();
        assert_eq!(
            frames.nodes.number_values("mainStat").unwrap(),
            vec![0.0, 0.0]
        );

        let json = serde_json::to_value(&frames.nodes).unwrap();
        assert_eq!(json["fields"][3]["name"], "mainStat");
        assert_eq!(json["fields"][3]["values"], json!([0.0, 0.0]));
    }

    #[test]
    fn test_malformed_network_shapes() {
        let cases = [
            json!({"nodes": "not-an-array", "edges": []}),
            json!({"nodes": [], "edges": {}}),
            json!({"nodes": []}),
            json!({"edges": []}),
            json!([]),
            json!(null),
            json!({"nodes": [42], "edges": []}),
            json!({"nodes": [], "edges": ["e1"]}),
        ];

        for body in cases {
            let result = parse_network_response(&body);
            assert!(
                matches!(result, Err(DatasourceError::MalformedResponse { .. })),
                "expected malformed response for {}",
                body
            );
        }
    }

    #[test]
    fn test_parse_datasets() {
        let body = json!([
            {"index": 2, "label": "Zeta", "value": "z"},
            {"index": "1", "label": "Alpha", "value": "a", "unused": []}
        ]);

        let datasets = parse_datasets(&body).unwrap();
        assert_eq!(
            datasets,
            vec![
                Dataset {
                    index: 2,
                    label: Some("Zeta".to_string()),
                    value: "z".to_string()
                },
                Dataset {
                    index: 1,
                    label: Some("Alpha".to_string()),
                    value: "a".to_string()
                },
            ]
        );

        assert!(matches!(
            parse_datasets(&json!({"datasets": []})),
            Err(DatasourceError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_dataset_index_must_be_integral() {
        let dataset = parse_dataset(&json!({"index": 3.0, "label": "A", "value": "a"})).unwrap();
        assert_eq!(dataset.index, 3);

        let dataset = parse_dataset(&json!({"label": "A", "value": "a"})).unwrap();
        assert_eq!(dataset.index, 0);

        for index in [json!(1.5), json!("1.5"), json!("first"), json!([1])] {
            let result = parse_dataset(&json!({"index": index, "label": "A", "value": "a"}));
            assert!(
                matches!(result, Err(DatasourceError::MalformedResponse { .. })),
                "expected malformed dataset for index {}",
                index
            );
        }
    }

    #[test]
    fn test_dataset_missing_label() {
        let dataset = parse_dataset(&json!({"index": 1, "value": "a"})).unwrap();
        assert_eq!(dataset.label, None);

        let dataset = parse_dataset(&json!({"index": 1, "label": null, "value": "a"})).unwrap();
        assert_eq!(dataset.label, None);

        let dataset = parse_dataset(&json!({"index": 1, "label": "", "value": "a"})).unwrap();
        assert_eq!(dataset.label.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_health() {
        let health = parse_health(&json!({"status": "success", "message": "GraphWorks accepted"}))
            .unwrap();
        assert_eq!(health.status, "success");
        assert_eq!(health.message, "GraphWorks accepted");

        assert!(parse_health(&json!("ok")).is_err());
    }
}
