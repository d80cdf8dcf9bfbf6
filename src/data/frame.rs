//! Conversion between point lists and Polars DataFrames
//!
//! Figure builders produce DataFrames with the column names from
//! [`crate::naming`]; writers read columns back as plain vectors.

use polars::prelude::*;

use super::points::{ClusterPoint, GeoPoint, LabeledPoint};
use crate::naming;
use crate::{EmbedplotError, Result};

fn data_error(context: &str, e: PolarsError) -> EmbedplotError {
    EmbedplotError::DataError(format!("{}: {}", context, e))
}

/// Frame with `label`, `x`, `y` columns
pub fn labeled_points_frame(points: &[LabeledPoint]) -> Result<DataFrame> {
    let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();

    df!(
        naming::LABEL => labels,
        naming::X => xs,
        naming::Y => ys
    )
    .map_err(|e| data_error("Failed to build point frame", e))
}

/// Frame with `label`, `x`, `y`, `cluster` columns
pub fn cluster_points_frame(points: &[ClusterPoint]) -> Result<DataFrame> {
    let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let clusters: Vec<&str> = points.iter().map(|p| p.cluster.as_str()).collect();

    df!(
        naming::LABEL => labels,
        naming::X => xs,
        naming::Y => ys,
        naming::CLUSTER => clusters
    )
    .map_err(|e| data_error("Failed to build cluster frame", e))
}

/// Frame with `label`, `lat`, `lon`, `group` columns, every row in `group`
pub fn geo_points_frame(points: &[GeoPoint], group: &str) -> Result<DataFrame> {
    let names: Vec<&str> = points.iter().map(|p| p.name.as_str()).collect();
    let lats: Vec<f64> = points.iter().map(|p| p.lat).collect();
    let lons: Vec<f64> = points.iter().map(|p| p.lon).collect();
    let groups: Vec<&str> = vec![group; points.len()];

    df!(
        naming::LABEL => names,
        naming::LAT => lats,
        naming::LON => lons,
        naming::GROUP => groups
    )
    .map_err(|e| data_error("Failed to build geographic frame", e))
}

/// Frame of vectors from the origin: `label`, `x`/`y` (all zero), `xend`/`yend` at each point
pub fn origin_vectors_frame(points: &[LabeledPoint]) -> Result<DataFrame> {
    let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
    let zeros: Vec<f64> = vec![0.0; points.len()];
    let xends: Vec<f64> = points.iter().map(|p| p.x).collect();
    let yends: Vec<f64> = points.iter().map(|p| p.y).collect();

    df!(
        naming::LABEL => labels,
        naming::X => zeros.clone(),
        naming::Y => zeros,
        naming::XEND => xends,
        naming::YEND => yends
    )
    .map_err(|e| data_error("Failed to build vector frame", e))
}

/// Stack frames with identical schemas
pub fn concat_frames(frames: &[DataFrame]) -> Result<DataFrame> {
    let mut iter = frames.iter();
    let mut out = iter
        .next()
        .cloned()
        .ok_or_else(|| EmbedplotError::DataError("No frames to concatenate".to_string()))?;
    for frame in iter {
        out.vstack_mut(frame)
            .map_err(|e| data_error("Failed to concatenate frames", e))?;
    }
    Ok(out)
}

/// Read a column as floats (integers are cast), nulls as `None`
pub fn f64_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df
        .column(name)
        .map_err(|e| data_error(&format!("Missing column '{}'", name), e))?;
    let casted = column
        .as_materialized_series()
        .cast(&DataType::Float64)
        .map_err(|e| data_error(&format!("Column '{}' is not numeric", name), e))?;
    let ca = casted
        .f64()
        .map_err(|e| data_error(&format!("Column '{}' is not numeric", name), e))?;
    Ok(ca.into_iter().collect())
}

/// Read a column as strings (other types are cast), nulls as `None`
pub fn str_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df
        .column(name)
        .map_err(|e| data_error(&format!("Missing column '{}'", name), e))?;
    let casted = column
        .as_materialized_series()
        .cast(&DataType::String)
        .map_err(|e| data_error(&format!("Column '{}' cannot be read as text", name), e))?;
    let ca = casted
        .str()
        .map_err(|e| data_error(&format!("Column '{}' cannot be read as text", name), e))?;
    Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
}

/// Column names of a frame as owned strings
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_points_frame() {
        let points = vec![
            LabeledPoint::new("cat", 2.0, 3.0),
            LabeledPoint::new("car", -1.5, -2.0),
        ];
        let df = labeled_points_frame(&points).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(column_names(&df), vec!["label", "x", "y"]);
        assert_eq!(f64_column(&df, "x").unwrap(), vec![Some(2.0), Some(-1.5)]);
        assert_eq!(
            str_column(&df, "label").unwrap(),
            vec![Some("cat".to_string()), Some("car".to_string())]
        );
    }

    #[test]
    fn test_origin_vectors_frame() {
        let df = origin_vectors_frame(&[LabeledPoint::new("dog", 2.2, 2.8)]).unwrap();
        assert_eq!(column_names(&df), vec!["label", "x", "y", "xend", "yend"]);
        assert_eq!(f64_column(&df, "x").unwrap(), vec![Some(0.0)]);
        assert_eq!(f64_column(&df, "yend").unwrap(), vec![Some(2.8)]);
    }

    #[test]
    fn test_geo_points_frame_tags_group() {
        let points = vec![GeoPoint::new("Bank", 51.5134, -0.08906)];
        let df = geo_points_frame(&points, "London Tube stations").unwrap();

        assert_eq!(column_names(&df), vec!["label", "lat", "lon", "group"]);
        assert_eq!(
            str_column(&df, "group").unwrap(),
            vec![Some("London Tube stations".to_string())]
        );
    }

    #[test]
    fn test_concat_frames() {
        let a = labeled_points_frame(&[LabeledPoint::new("a", 0.0, 0.0)]).unwrap();
        let b = labeled_points_frame(&[LabeledPoint::new("b", 1.0, 1.0)]).unwrap();
        let both = concat_frames(&[a, b]).unwrap();
        assert_eq!(both.height(), 2);
        assert!(concat_frames(&[]).is_err());
    }

    #[test]
    fn test_f64_column_casts_integers() {
        let df = df!("n" => &[1i32, 2, 3]).unwrap();
        assert_eq!(
            f64_column(&df, "n").unwrap(),
            vec![Some(1.0), Some(2.0), Some(3.0)]
        );
    }

    #[test]
    fn test_missing_column_error() {
        let df = df!("n" => &[1.0]).unwrap();
        let err = f64_column(&df, "x").unwrap_err();
        assert!(err.to_string().contains("Missing column 'x'"));
    }
}
