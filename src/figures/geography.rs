//! UK places as map-like points: longitude on x, latitude on y

use std::collections::HashMap;

use crate::data::frame::{concat_frames, geo_points_frame};
use crate::data::GeoPoint;
use crate::naming;
use crate::plot::{AestheticValue, Geom, Layer, Plot, Theme};
use crate::{Figure, Result, Spec};

pub const TITLE: &str = "UK Places as Points (Map-like) — Two 'Semantic' Clusters";
pub const LAKES_GROUP: &str = "Lake District lakes";
pub const TUBE_GROUP: &str = "London Tube stations";

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 800;

pub fn lakes() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new("Windermere", 54.37870, -2.90580),
        GeoPoint::new("Ullswater", 54.57107, -2.86242),
        GeoPoint::new("Derwentwater", 54.58330, -3.15000),
        GeoPoint::new("Coniston Water", 54.36908, -3.07265),
        GeoPoint::new("Bassenthwaite Lake", 54.65000, -3.21667),
        GeoPoint::new("Thirlmere", 54.56672, -3.05678),
        GeoPoint::new("Haweswater", 54.48933, -2.82014),
        GeoPoint::new("Ennerdale Water", 54.52510, -3.37719),
        GeoPoint::new("Wast Water", 54.43724, -3.34371),
        GeoPoint::new("Buttermere", 54.54339, -3.27979),
    ]
}

pub fn tube_stations() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new("Oxford Circus", 51.51517, -0.14119),
        GeoPoint::new("Green Park", 51.50674, -0.14276),
        GeoPoint::new("Baker Street", 51.52224, -0.15708),
        GeoPoint::new("King's Cross St Pancras", 51.53057, -0.12399),
        GeoPoint::new("Waterloo", 51.50322, -0.11328),
        GeoPoint::new("Victoria", 51.49663, -0.14401),
        GeoPoint::new("London Bridge", 51.50535, -0.08483),
        GeoPoint::new("Canary Wharf", 51.50362, -0.01987),
        GeoPoint::new("Bank", 51.51340, -0.08906),
        GeoPoint::new("Paddington", 51.51518, -0.17554),
    ]
}

/// Both layers read one shared dataset: every place, tagged with its group.
pub fn build() -> Result<Figure> {
    let places = concat_frames(&[
        geo_points_frame(&lakes(), LAKES_GROUP)?,
        geo_points_frame(&tube_stations(), TUBE_GROUP)?,
    ])?;

    let lon = || AestheticValue::standard_column(naming::LON);
    let lat = || AestheticValue::standard_column(naming::LAT);

    let plot = Plot::new()
        .with_layer(
            Layer::new(Geom::point())
                .with_aesthetic("x", lon())
                .with_aesthetic("y", lat())
                .with_aesthetic("color", AestheticValue::standard_column(naming::GROUP))
                .with_parameter("opacity", 0.9),
        )
        .with_layer(
            Layer::new(Geom::text())
                .with_aesthetic("x", lon())
                .with_aesthetic("y", lat())
                .with_aesthetic("label", AestheticValue::standard_column(naming::LABEL))
                .with_parameter("size", 8.0),
        )
        .with_label("title", TITLE)
        .with_label("x", "Longitude (X)")
        .with_label("y", "Latitude (Y)")
        .with_theme(Theme::default().with_grid(0.25).with_legend());

    let mut data = HashMap::new();
    data.insert(naming::GLOBAL_DATA_KEY.to_string(), places);

    Ok(Figure::single(Spec::new(plot, data), WIDTH, HEIGHT))
}
