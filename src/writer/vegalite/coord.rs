//! Axis limits and panel theme for the Vega-Lite writer
//!
//! Both operate on a finished panel (`{"layer": [...]}`) and touch the x/y
//! channels of every layer, so layers sharing an axis agree.

use serde_json::{json, Value};

use crate::plot::{Coord, Theme};

/// Positional channels that own an axis
const AXIS_CHANNELS: [&str; 2] = ["x", "y"];

fn for_each_axis_channel(panel: &mut Value, axis: &str, mut f: impl FnMut(&mut Value)) {
    if let Some(layers) = panel.get_mut("layer").and_then(|l| l.as_array_mut()) {
        for layer in layers {
            if let Some(channel) = layer
                .get_mut("encoding")
                .and_then(|encoding| encoding.get_mut(axis))
            {
                f(channel);
            }
        }
    }
}

/// Fix an axis to a domain
pub(super) fn apply_axis_limits(panel: &mut Value, axis: &str, limits: (f64, f64)) {
    let domain = json!([limits.0, limits.1]);
    for_each_axis_channel(panel, axis, |channel| {
        if !channel.get("scale").is_some_and(|s| s.is_object()) {
            channel["scale"] = json!({});
        }
        channel["scale"]["domain"] = domain.clone();
    });
}

/// Apply coordinate limits, if any
pub(super) fn apply_coord(panel: &mut Value, coord: Option<&Coord>) {
    let Some(coord) = coord else {
        return;
    };
    if let Some(xlim) = coord.xlim {
        apply_axis_limits(panel, "x", xlim);
    }
    if let Some(ylim) = coord.ylim {
        apply_axis_limits(panel, "y", ylim);
    }
}

/// Grid lines on both axes
pub(super) fn apply_theme(panel: &mut Value, theme: &Theme) {
    for axis in AXIS_CHANNELS {
        for_each_axis_channel(panel, axis, |channel| {
            let mut axis_obj = json!({"grid": theme.grid});
            if theme.grid {
                axis_obj["gridOpacity"] = json!(theme.grid_opacity);
            }
            channel["axis"] = axis_obj;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> Value {
        json!({
            "layer": [
                {"encoding": {
                    "x": {"field": "x", "type": "quantitative", "scale": {"zero": false}},
                    "y": {"field": "y", "type": "quantitative"}
                }},
                {"encoding": {"y": {"datum": 0}}},
                {"mark": "text"}
            ]
        })
    }

    #[test]
    fn test_limits_reach_every_layer() {
        let mut spec = panel();
        let coord = Coord::cartesian().with_xlim(-3.0, 4.0).with_ylim(-2.0, 4.0);
        apply_coord(&mut spec, Some(&coord));

        assert_eq!(
            spec["layer"][0]["encoding"]["x"]["scale"],
            json!({"zero": false, "domain": [-3.0, 4.0]})
        );
        assert_eq!(
            spec["layer"][0]["encoding"]["y"]["scale"]["domain"],
            json!([-2.0, 4.0])
        );
        assert_eq!(
            spec["layer"][1]["encoding"]["y"]["scale"]["domain"],
            json!([-2.0, 4.0])
        );
        assert!(spec["layer"][2].get("encoding").is_none());
    }

    #[test]
    fn test_no_coord_leaves_spec_alone() {
        let mut spec = panel();
        apply_coord(&mut spec, None);
        assert_eq!(spec, panel());
    }

    #[test]
    fn test_theme_grid() {
        let mut spec = panel();
        apply_theme(&mut spec, &Theme::default().with_grid(0.25));
        assert_eq!(
            spec["layer"][0]["encoding"]["x"]["axis"],
            json!({"grid": true, "gridOpacity": 0.25})
        );

        let mut spec = panel();
        apply_theme(&mut spec, &Theme::default());
        assert_eq!(
            spec["layer"][1]["encoding"]["y"]["axis"],
            json!({"grid": false})
        );
    }
}
