//! Column-oriented tables consumed by the node graph panel.
//!
//! A [`GraphFrame`] pairs an Arrow [`RecordBatch`] holding the data with one
//! [`FieldConfig`] per column holding presentation hints. Column names and
//! order are a contract with the renderer.

use crate::arrow_converter::ArrowConverter;
use crate::error::{DatasourceError, Result};
use crate::links::Link;
use arrow::array::{Array, ArrayRef, Float64Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use serde::ser::{Error as _, SerializeStruct};
use serde::{Serialize, Serializer};
use std::sync::Arc;

/// Field names understood by the node graph panel
pub mod field_names {
    pub const ID: &str = "id";
    pub const TITLE: &str = "title";
    pub const SUB_TITLE: &str = "subTitle";
    pub const MAIN_STAT: &str = "mainStat";
    pub const SOURCE: &str = "source";
    pub const TARGET: &str = "target";
    /// Prefix of the fields drawn as colored arcs around a node
    pub const ARC: &str = "arc__";
}

/// Visualization hint attached to both frames
pub const NODE_GRAPH_VISUALISATION: &str = "nodeGraph";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
}

impl FieldType {
    fn data_type(self) -> DataType {
        match self {
            FieldType::String => DataType::Utf8,
            FieldType::Number => DataType::Float64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldColorMode {
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldColor {
    pub fixed_color: String,
    pub mode: FieldColorMode,
}

impl FieldColor {
    pub fn fixed(color: impl Into<String>) -> Self {
        Self {
            fixed_color: color.into(),
            mode: FieldColorMode::Fixed,
        }
    }
}

/// Presentation hints of one column
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<FieldColor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl FieldConfig {
    pub fn display_name(name: impl Into<String>) -> Self {
        Self {
            display_name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn fixed_color(color: impl Into<String>) -> Self {
        Self {
            color: Some(FieldColor::fixed(color)),
            ..Default::default()
        }
    }
}

/// Column descriptor: name, type and presentation, without data
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub name: String,
    pub field_type: FieldType,
    pub config: FieldConfig,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            config: FieldConfig::default(),
        }
    }

    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    pub fn strings(self, values: Vec<String>) -> Column {
        Column {
            spec: self,
            values: Arc::new(StringArray::from(values)),
        }
    }

    pub fn numbers(self, values: Vec<f64>) -> Column {
        Column {
            spec: self,
            values: Arc::new(Float64Array::from(values)),
        }
    }
}

/// A descriptor bound to its values
#[derive(Debug, Clone)]
pub struct Column {
    pub spec: ColumnSpec,
    pub values: ArrayRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameMeta {
    pub preferred_visualisation_type: String,
}

impl FrameMeta {
    pub fn node_graph() -> Self {
        Self {
            preferred_visualisation_type: NODE_GRAPH_VISUALISATION.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GraphFrame {
    name: String,
    ref_id: String,
    batch: RecordBatch,
    configs: Vec<FieldConfig>,
    meta: FrameMeta,
}

impl GraphFrame {
    /// Assemble a frame from columns of equal length. Every column is
    /// non-nullable.
    pub fn try_new(name: impl Into<String>, columns: Vec<Column>, meta: FrameMeta) -> Result<Self> {
        let mut fields = Vec::with_capacity(columns.len());
        let mut arrays = Vec::with_capacity(columns.len());
        let mut configs = Vec::with_capacity(columns.len());

        for column in columns {
            if column.values.data_type() != &column.spec.field_type.data_type() {
                return Err(DatasourceError::Arrow(
                    arrow::error::ArrowError::SchemaError(format!(
                        "column '{}' holds {:?} values",
                        column.spec.name,
                        column.values.data_type()
                    )),
                ));
            }
            fields.push(Field::new(
                column.spec.name,
                column.spec.field_type.data_type(),
                false,
            ));
            arrays.push(column.values);
            configs.push(column.spec.config);
        }

        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?;

        Ok(Self {
            name: name.into(),
            ref_id: "*".to_string(),
            batch,
            configs,
            meta,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ref_id(&self) -> &str {
        &self.ref_id
    }

    pub fn meta(&self) -> &FrameMeta {
        &self.meta
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .map(|field| field.name().as_str())
            .collect()
    }

    pub fn field_config(&self, name: &str) -> Option<&FieldConfig> {
        let idx = self.batch.schema_ref().index_of(name).ok()?;
        self.configs.get(idx)
    }

    pub fn field_config_mut(&mut self, name: &str) -> Option<&mut FieldConfig> {
        let idx = self.batch.schema_ref().index_of(name).ok()?;
        self.configs.get_mut(idx)
    }

    pub fn string_values(&self, name: &str) -> Option<Vec<&str>> {
        let array = self
            .batch
            .column_by_name(name)?
            .as_any()
            .downcast_ref::<StringArray>()?;
        Some((0..array.len()).map(|idx| array.value(idx)).collect())
    }

    pub fn number_values(&self, name: &str) -> Option<Vec<f64>> {
        let array = self
            .batch
            .column_by_name(name)?
            .as_any()
            .downcast_ref::<Float64Array>()?;
        Some(array.values().to_vec())
    }
}

impl Serialize for GraphFrame {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct FieldJson<'a> {
            name: &'a str,
            #[serde(rename = "type")]
            field_type: &'static str,
            config: &'a FieldConfig,
            values: Vec<serde_json::Value>,
        }

        let schema = self.batch.schema_ref();
        let mut fields = Vec::with_capacity(self.configs.len());
        for (idx, (field, config)) in schema.fields().iter().zip(&self.configs).enumerate() {
            let values = ArrowConverter::column_to_json(self.batch.column(idx).as_ref())
                .map_err(S::Error::custom)?;
            let field_type = match field.data_type() {
                DataType::Float64 => "number",
                _ => "string",
            };
            fields.push(FieldJson {
                name: field.name(),
                field_type,
                config,
                values,
            });
        }

        let mut state = serializer.serialize_struct("GraphFrame", 4)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("refId", &self.ref_id)?;
        state.serialize_field("meta", &self.meta)?;
        state.serialize_field("fields", &fields)?;
        state.end()
    }
}
