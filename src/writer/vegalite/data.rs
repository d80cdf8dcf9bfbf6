//! DataFrame to Vega-Lite inline values

use polars::prelude::*;
use serde_json::{json, Map, Value};

use crate::{EmbedplotError, Result};

/// Convert a DataFrame to Vega-Lite data values (array of row objects)
pub fn dataframe_to_values(df: &DataFrame) -> Result<Vec<Value>> {
    let mut values = Vec::with_capacity(df.height());
    let columns = df.get_columns();

    for row_idx in 0..df.height() {
        let mut row_obj = Map::new();
        for column in columns {
            let value = series_value_at(column.as_materialized_series(), row_idx)?;
            row_obj.insert(column.name().to_string(), value);
        }
        values.push(Value::Object(row_obj));
    }

    Ok(values)
}

fn cast_error(dtype: &str, e: PolarsError) -> EmbedplotError {
    EmbedplotError::WriterError(format!("Failed to cast to {}: {}", dtype, e))
}

/// Get a single value from a series as JSON; nulls and NaN become `null`
pub fn series_value_at(series: &Series, idx: usize) -> Result<Value> {
    use DataType::*;

    let value = match series.dtype() {
        Int32 => {
            let ca = series.i32().map_err(|e| cast_error("i32", e))?;
            ca.get(idx).map(|v| json!(v))
        }
        Int64 => {
            let ca = series.i64().map_err(|e| cast_error("i64", e))?;
            ca.get(idx).map(|v| json!(v))
        }
        UInt32 => {
            let ca = series.u32().map_err(|e| cast_error("u32", e))?;
            ca.get(idx).map(|v| json!(v))
        }
        Float32 => {
            let ca = series.f32().map_err(|e| cast_error("f32", e))?;
            ca.get(idx).filter(|v| v.is_finite()).map(|v| json!(v))
        }
        Float64 => {
            let ca = series.f64().map_err(|e| cast_error("f64", e))?;
            ca.get(idx).filter(|v| v.is_finite()).map(|v| json!(v))
        }
        Boolean => {
            let ca = series.bool().map_err(|e| cast_error("bool", e))?;
            ca.get(idx).map(|v| json!(v))
        }
        String => {
            let ca = series.str().map_err(|e| cast_error("string", e))?;
            ca.get(idx).map(|v| json!(v))
        }
        _ => {
            // Fallback: render through AnyValue's Display
            let any = series
                .get(idx)
                .map_err(|e| EmbedplotError::WriterError(format!("Row {}: {}", idx, e)))?;
            if any.is_null() {
                None
            } else {
                Some(json!(any.to_string()))
            }
        }
    };

    Ok(value.unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_keep_column_types() {
        let df = df!(
            "label" => &["cat", "m365"],
            "x" => &[2.0, -1.5],
            "n" => &[1i64, 2]
        )
        .unwrap();
        let values = dataframe_to_values(&df).unwrap();

        assert_eq!(values.len(), 2);
        assert_eq!(values[0], json!({"label": "cat", "x": 2.0, "n": 1}));
        // Strings stay strings even when they look numeric-ish
        assert_eq!(values[1]["label"], json!("m365"));
    }

    #[test]
    fn test_nulls_and_nan_become_null() {
        let df = df!(
            "x" => &[Some(1.0), None, Some(f64::NAN)],
            "label" => &[Some("a"), None, Some("c")]
        )
        .unwrap();
        let values = dataframe_to_values(&df).unwrap();

        assert_eq!(values[1]["x"], Value::Null);
        assert_eq!(values[1]["label"], Value::Null);
        assert_eq!(values[2]["x"], Value::Null);
    }

    #[test]
    fn test_empty_frame() {
        let df = df!("x" => Vec::<f64>::new()).unwrap();
        assert!(dataframe_to_values(&df).unwrap().is_empty());
    }
}
