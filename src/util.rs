// Geometry over touch snapshots, plus console logging for the demo app.

use crate::model::{Point, TouchPoint};
use wasm_bindgen::JsValue;

/// Euclidean distance between the first two touches; 0 with fewer than two.
pub fn distance(touches: &[TouchPoint]) -> f64 {
    match touches {
        [first, second, ..] => first.position().distance_to(second.position()),
        _ => 0.0,
    }
}

/// Centroid of all touch positions. The origin for an empty snapshot.
pub fn center_point_for_touches(touches: &[TouchPoint]) -> Point {
    if touches.is_empty() {
        return Point::default();
    }
    let n = touches.len() as f64;
    let (sx, sy) = touches
        .iter()
        .fold((0.0, 0.0), |(sx, sy), t| (sx + t.page_x, sy + t.page_y));
    Point::new(sx / n, sy / n)
}

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}
