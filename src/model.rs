//! Core data models for gesture recognition.
//! Touch identities, normalized touch events, recognition states and phases.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable per-touch identifier reported by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TouchId(pub i64);

impl fmt::Display for TouchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of a view that gestures are attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewId(pub u64);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view-{}", self.0)
    }
}

/// 2D point in page coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

/// One touch as delivered by the event-capture layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTouch {
    pub id: TouchId,
    pub page_x: f64,
    pub page_y: f64,
}

impl RawTouch {
    pub fn new(id: i64, page_x: f64, page_y: f64) -> Self {
        Self {
            id: TouchId(id),
            page_x,
            page_y,
        }
    }
}

/// A touch tracked by a gesture. Updated in place as move events arrive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchPoint {
    pub id: TouchId,
    pub page_x: f64,
    pub page_y: f64,
}

impl TouchPoint {
    pub fn position(&self) -> Point {
        Point::new(self.page_x, self.page_y)
    }
}

impl From<RawTouch> for TouchPoint {
    fn from(raw: RawTouch) -> Self {
        Self {
            id: raw.id,
            page_x: raw.page_x,
            page_y: raw.page_y,
        }
    }
}

/// Pre-normalized touch event.
///
/// For a start event `touches` holds the newly active touches; for move,
/// end and cancel it holds only the touches that changed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub touches: Vec<RawTouch>,
    /// Arrival time in milliseconds.
    pub timestamp: f64,
}

impl TouchEvent {
    pub fn new(touches: Vec<RawTouch>, timestamp: f64) -> Self {
        Self { touches, timestamp }
    }
}

/// Recognition states, in transition order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureState {
    #[default]
    WaitingForTouches,
    /// Continuous gestures only.
    Possible,
    Began,
    Changed,
    Ended,
    Cancelled,
}

impl GestureState {
    /// ENDED and CANCELLED close a recognition cycle.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled)
    }

    /// BEGAN or CHANGED: the gesture has been recognized and is running.
    pub fn is_recognized(self) -> bool {
        matches!(self, Self::Began | Self::Changed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::WaitingForTouches => "waiting-for-touches",
            Self::Possible => "possible",
            Self::Began => "began",
            Self::Changed => "changed",
            Self::Ended => "ended",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Phase delivered outward to the view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GesturePhase {
    Start,
    Change,
    End,
    Cancel,
}

impl GesturePhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Change => "Change",
            Self::End => "End",
            Self::Cancel => "Cancel",
        }
    }

    /// Outward event name, e.g. `pinchStart`.
    pub fn event_name(self, gesture_name: &str) -> String {
        format!("{}{}", gesture_name, self.as_str())
    }
}

/// Emitted to observers whenever a gesture's state changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateChange {
    pub from: GestureState,
    pub to: GestureState,
}
