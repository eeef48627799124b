use arrow::array::{Array, Float64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use serde_json::Value;

pub struct ArrowConverter;

impl ArrowConverter {
    /// Convert a whole column into JSON values, row by row
    pub fn column_to_json(array: &dyn Array) -> Result<Vec<Value>, ArrowError> {
        (0..array.len())
            .map(|row_idx| array_value_to_json(array, row_idx))
            .collect()
    }
}

fn array_value_to_json(array: &dyn Array, index: usize) -> Result<Value, ArrowError> {
    if array.is_null(index) {
        return Ok(Value::Null);
    }

    match array.data_type() {
        DataType::Utf8 => {
            let array = downcast::<StringArray>(array)?;
            Ok(Value::String(array.value(index).to_string()))
        }
        DataType::Float64 => {
            let array = downcast::<Float64Array>(array)?;
            // JSON has no NaN or infinity
            Ok(serde_json::Number::from_f64(array.value(index))
                .map(Value::Number)
                .unwrap_or(Value::Null))
        }
        other => Err(ArrowError::NotYetImplemented(format!(
            "JSON conversion for {:?} columns",
            other
        ))),
    }
}

fn downcast<T: 'static>(array: &dyn Array) -> Result<&T, ArrowError> {
    array.as_any().downcast_ref::<T>().ok_or_else(|| {
        ArrowError::CastError(format!(
            "column of type {:?} does not match its array",
            array.data_type()
        ))
    })
}
