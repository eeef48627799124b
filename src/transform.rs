use crate::error::Result;
use crate::frame::{field_names, ColumnSpec, FieldConfig, FieldType, FrameMeta, GraphFrame};
use crate::models::{Edge, Node};
use tracing::debug;

/// Color bucket of a node, derived from its `subTitle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Default,
    Negative,
    Neutral,
    Positive,
}

impl Category {
    /// Column order of the arc fields
    pub const ALL: [Category; 4] = [
        Category::Default,
        Category::Negative,
        Category::Neutral,
        Category::Positive,
    ];

    /// Anything but the three named labels is `Default`
    pub fn from_sub_title(sub_title: &str) -> Self {
        match sub_title {
            "negative" => Category::Negative,
            "neutral" => Category::Neutral,
            "positive" => Category::Positive,
            _ => Category::Default,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Default => "default",
            Category::Negative => "negative",
            Category::Neutral => "neutral",
            Category::Positive => "positive",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Category::Default => "#5a84e4",
            Category::Negative => "red",
            Category::Neutral => "#800080",
            Category::Positive => "green",
        }
    }

    pub fn field_name(self) -> String {
        format!("{}{}", field_names::ARC, self.label())
    }

    /// One-hot vector in [`Category::ALL`] order
    pub fn one_hot(self) -> [f64; 4] {
        match self {
            Category::Default => [1.0, 0.0, 0.0, 0.0],
            Category::Negative => [0.0, 1.0, 0.0, 0.0],
            Category::Neutral => [0.0, 0.0, 1.0, 0.0],
            Category::Positive => [0.0, 0.0, 0.0, 1.0],
        }
    }
}

/// Node and edge frames of one query
#[derive(Debug, Clone)]
pub struct GraphFrames {
    pub nodes: GraphFrame,
    pub edges: GraphFrame,
}

impl GraphFrames {
    pub fn into_vec(self) -> Vec<GraphFrame> {
        vec![self.nodes, self.edges]
    }
}

/// Build the node graph frames. Row order follows the input; duplicates
/// and dangling edge endpoints pass through untouched.
pub fn transform(nodes: &[Node], edges: &[Edge]) -> Result<GraphFrames> {
    debug!(
        "Transforming {} nodes and {} edges into frames",
        nodes.len(),
        edges.len()
    );

    Ok(GraphFrames {
        nodes: build_nodes_frame(nodes)?,
        edges: build_edges_frame(edges)?,
    })
}

fn build_nodes_frame(nodes: &[Node]) -> Result<GraphFrame> {
    let one_hot: Vec<[f64; 4]> = nodes
        .iter()
        .map(|node| Category::from_sub_title(&node.sub_title).one_hot())
        .collect();

    let mut columns = vec![
        ColumnSpec::new(field_names::ID, FieldType::String)
            .strings(nodes.iter().map(|n| n.id.clone()).collect()),
        ColumnSpec::new(field_names::TITLE, FieldType::String)
            .with_config(FieldConfig::display_name("Name"))
            .strings(nodes.iter().map(|n| n.title.clone()).collect()),
        ColumnSpec::new(field_names::SUB_TITLE, FieldType::String)
            .with_config(FieldConfig::display_name("Type"))
            .strings(nodes.iter().map(|n| n.sub_title.clone()).collect()),
        ColumnSpec::new(field_names::MAIN_STAT, FieldType::Number)
            .with_config(FieldConfig::display_name("Score"))
            .numbers(nodes.iter().map(|n| n.main_stat.as_f64()).collect()),
    ];

    columns.extend(Category::ALL.iter().enumerate().map(|(slot, category)| {
        ColumnSpec::new(category.field_name(), FieldType::Number)
            .with_config(FieldConfig::fixed_color(category.color()))
            .numbers(one_hot.iter().map(|row| row[slot]).collect())
    }));

    GraphFrame::try_new("nodes", columns, FrameMeta::node_graph())
}

fn build_edges_frame(edges: &[Edge]) -> Result<GraphFrame> {
    let columns = vec![
        ColumnSpec::new(field_names::ID, FieldType::String)
            .strings(edges.iter().map(|e| e.id.clone()).collect()),
        ColumnSpec::new(field_names::SOURCE, FieldType::String)
            .strings(edges.iter().map(|e| e.src.clone()).collect()),
        ColumnSpec::new(field_names::TARGET, FieldType::String)
            .strings(edges.iter().map(|e| e.dst.clone()).collect()),
        ColumnSpec::new(field_names::MAIN_STAT, FieldType::String)
            .with_config(FieldConfig::display_name("Label"))
            .strings(edges.iter().map(|e| e.main_stat.clone()).collect()),
    ];

    GraphFrame::try_new("edges", columns, FrameMeta::node_graph())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MainStat;

    fn node(id: &str, sub_title: &str, main_stat: MainStat) -> Node {
        Node {
            id: id.to_string(),
            title: format!("title-{}", id),
            sub_title: sub_title.to_string(),
            main_stat,
        }
    }

    fn edge(id: &str, src: &str, dst: &str, label: &str) -> Edge {
        Edge {
            id: id.to_string(),
            src: src.to_string(),
            dst: dst.to_string(),
            main_stat: label.to_string(),
        }
    }

    #[test]
    fn test_single_node_self_loop() {
        let nodes = vec![Node {
            id: "n1".to_string(),
            title: "A".to_string(),
            sub_title: "positive".to_string(),
            main_stat: MainStat::Number(5.0),
        }];
        let edges = vec![edge("e1", "n1", "n1", "self")];

        let frames = transform(&nodes, &edges).unwrap();

        let n = &frames.nodes;
        assert_eq!(n.string_values("id").unwrap(), vec!["n1"]);
        assert_eq!(n.string_values("title").unwrap(), vec!["A"]);
        assert_eq!(n.string_values("subTitle").unwrap(), vec!["positive"]);
        assert_eq!(n.number_values("mainStat").unwrap(), vec![5.0]);
        assert_eq!(n.number_values("arc__default").unwrap(), vec![0.0]);
        assert_eq!(n.number_values("arc__negative").unwrap(), vec![0.0]);
        assert_eq!(n.number_values("arc__neutral").unwrap(), vec![0.0]);
        assert_eq!(n.number_values("arc__positive").unwrap(), vec![1.0]);

        let e = &frames.edges;
        assert_eq!(e.string_values("id").unwrap(), vec!["e1"]);
        assert_eq!(e.string_values("source").unwrap(), vec!["n1"]);
        assert_eq!(e.string_values("target").unwrap(), vec!["n1"]);
        assert_eq!(e.string_values("mainStat").unwrap(), vec!["self"]);
    }

    #[test]
    fn test_column_order_and_meta() {
        let frames = transform(&[], &[]).unwrap();

        assert_eq!(
            frames.nodes.field_names(),
            vec![
                "id",
                "title",
                "subTitle",
                "mainStat",
                "arc__default",
                "arc__negative",
                "arc__neutral",
                "arc__positive"
            ]
        );
        assert_eq!(
            frames.edges.field_names(),
            vec!["id", "source", "target", "mainStat"]
        );
        assert_eq!(frames.nodes.name(), "nodes");
        assert_eq!(frames.edges.name(), "edges");
        for frame in [&frames.nodes, &frames.edges] {
            assert_eq!(frame.num_rows(), 0);
            assert_eq!(frame.meta().preferred_visualisation_type, "nodeGraph");
        }
    }

    #[test]
    fn test_display_names_and_colors() {
        let frames = transform(&[], &[]).unwrap();
        let display = |name: &str| {
            frames
                .nodes
                .field_config(name)
                .and_then(|c| c.display_name.clone())
        };
        assert_eq!(display("title").as_deref(), Some("Name"));
        assert_eq!(display("subTitle").as_deref(), Some("Type"));
        assert_eq!(display("mainStat").as_deref(), Some("Score"));
        assert_eq!(display("id"), None);

        let color = |name: &str| {
            frames
                .nodes
                .field_config(name)
                .and_then(|c| c.color.as_ref())
                .map(|c| c.fixed_color.clone())
        };
        assert_eq!(color("arc__default").as_deref(), Some("#5a84e4"));
        assert_eq!(color("arc__negative").as_deref(), Some("red"));
        assert_eq!(color("arc__neutral").as_deref(), Some("#800080"));
        assert_eq!(color("arc__positive").as_deref(), Some("green"));

        let label = frames
            .edges
            .field_config("mainStat")
            .and_then(|c| c.display_name.clone());
        assert_eq!(label.as_deref(), Some("Label"));
    }

    #[test]
    fn test_unknown_sub_titles_are_default() {
        for sub_title in ["", "default", "Positive", "NEGATIVE", "other", " neutral"] {
            assert_eq!(Category::from_sub_title(sub_title), Category::Default);
        }
        assert_eq!(Category::from_sub_title("negative"), Category::Negative);
        assert_eq!(Category::from_sub_title("neutral"), Category::Neutral);
        assert_eq!(Category::from_sub_title("positive"), Category::Positive);
    }

    #[test]
    fn test_one_hot_per_row() {
        let nodes = vec![
            node("a", "negative", MainStat::Number(1.0)),
            node("b", "unknown", MainStat::Number(2.0)),
            node("c", "neutral", MainStat::Number(3.0)),
            node("d", "positive", MainStat::Number(4.0)),
        ];
        let frames = transform(&nodes, &[]).unwrap();

        let columns: Vec<Vec<f64>> = Category::ALL
            .iter()
            .map(|c| frames.nodes.number_values(&c.field_name()).unwrap())
            .collect();

        let expected = [
            Category::Negative,
            Category::Default,
            Category::Neutral,
            Category::Positive,
        ];
        for (row, category) in expected.iter().enumerate() {
            let values: Vec<f64> = columns.iter().map(|col| col[row]).collect();
            assert_eq!(values.iter().sum::<f64>(), 1.0);
            assert_eq!(values, category.one_hot().to_vec());
        }
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let nodes = vec![
            node("z", "positive", MainStat::Number(1.0)),
            node("a", "negative", MainStat::Text("7".to_string())),
            node("z", "neutral", MainStat::Text("n/a".to_string())),
        ];
        let edges = vec![
            edge("e2", "z", "missing", "knows"),
            edge("e1", "a", "z", "likes"),
            edge("e2", "z", "missing", "knows"),
        ];

        let frames = transform(&nodes, &edges).unwrap();

        assert_eq!(frames.nodes.num_rows(), 3);
        assert_eq!(frames.nodes.string_values("id").unwrap(), vec!["z", "a", "z"]);
        assert_eq!(
            frames.nodes.number_values("mainStat").unwrap(),
            vec![1.0, 7.0, 0.0]
        );
        assert_eq!(frames.edges.num_rows(), 3);
        assert_eq!(
            frames.edges.string_values("id").unwrap(),
            vec!["e2", "e1", "e2"]
        );
        assert_eq!(
            frames.edges.string_values("target").unwrap(),
            vec!["missing", "z", "missing"]
        );
    }
}
