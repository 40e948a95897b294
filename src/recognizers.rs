//! Built-in gesture policies: tap, pan and pinch.
//!
//! Each pairs a [`Recognizer`] with the [`GestureConfig`] it expects via
//! `gesture_config()`.

use std::any::Any;

use crate::config::GestureConfig;
use crate::gesture::{Recognition, Recognizer};
use crate::model::Point;
use crate::util::{center_point_for_touches, distance};

fn center(r: &Recognition<'_>) -> Point {
    center_point_for_touches(r.touches.points())
}

/// Discrete single-touch tap.
#[derive(Debug, Clone)]
pub struct Tap {
    /// Longest press, in milliseconds, that still counts as a tap.
    pub max_duration_ms: f64,
    /// How far the touch may drift before the tap is abandoned.
    pub tolerance: f64,
    origin: Option<(Point, f64)>,
    taps: u32,
}

impl Default for Tap {
    fn default() -> Self {
        Self {
            max_duration_ms: 300.0,
            tolerance: 10.0,
            origin: None,
            taps: 0,
        }
    }
}

impl Tap {
    pub fn gesture_config() -> GestureConfig {
        GestureConfig::new("tap").discrete()
    }

    /// Completed taps since construction.
    pub fn taps(&self) -> u32 {
        self.taps
    }
}

impl Recognizer for Tap {
    fn should_end(&self, r: &Recognition<'_>) -> bool {
        match self.origin {
            Some((origin, started_at)) => {
                r.event.timestamp - started_at <= self.max_duration_ms
                    && center(r).distance_to(origin) <= self.tolerance
            }
            None => false,
        }
    }

    fn did_begin(&mut self, r: &Recognition<'_>) {
        self.origin = Some((center(r), r.event.timestamp));
    }

    fn did_end(&mut self, _r: &Recognition<'_>) {
        self.taps += 1;
        self.origin = None;
    }

    fn did_cancel(&mut self, _r: &Recognition<'_>) {
        self.origin = None;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Continuous drag, recognized once the centroid travels past `threshold`.
#[derive(Debug, Clone)]
pub struct Pan {
    pub threshold: f64,
    origin: Option<Point>,
    translation: Point,
}

impl Default for Pan {
    fn default() -> Self {
        Self {
            threshold: 8.0,
            origin: None,
            translation: Point::default(),
        }
    }
}

impl Pan {
    pub fn gesture_config() -> GestureConfig {
        GestureConfig::new("pan")
    }

    /// Centroid offset from where the touches first went down.
    pub fn translation(&self) -> Point {
        self.translation
    }
}

impl Recognizer for Pan {
    fn should_begin(&self, r: &Recognition<'_>) -> bool {
        self.origin
            .is_some_and(|origin| center(r).distance_to(origin) >= self.threshold)
    }

    fn did_become_possible(&mut self, r: &Recognition<'_>) {
        self.origin = Some(center(r));
        self.translation = Point::default();
    }

    fn did_change(&mut self, r: &Recognition<'_>) {
        if let Some(origin) = self.origin {
            let c = center(r);
            self.translation = Point::new(c.x - origin.x, c.y - origin.y);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Continuous two-finger pinch.
#[derive(Debug, Clone)]
pub struct Pinch {
    /// Change in finger distance needed before the pinch is recognized.
    pub threshold: f64,
    start_distance: f64,
    scale: f64,
}

impl Default for Pinch {
    fn default() -> Self {
        Self {
            threshold: 12.0,
            start_distance: 0.0,
            scale: 1.0,
        }
    }
}

impl Pinch {
    pub fn gesture_config() -> GestureConfig {
        GestureConfig::new("pinch").required_touches(2)
    }

    /// Finger distance relative to the distance when both touches went down.
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Recognizer for Pinch {
    fn should_begin(&self, r: &Recognition<'_>) -> bool {
        r.touches.len() >= 2 && (distance(r.touches.points()) - self.start_distance).abs() >= self.threshold
    }

    fn did_become_possible(&mut self, r: &Recognition<'_>) {
        self.start_distance = distance(r.touches.points());
        self.scale = 1.0;
    }

    fn did_change(&mut self, r: &Recognition<'_>) {
        if self.start_distance > 0.0 {
            self.scale = distance(r.touches.points()) / self.start_distance;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
