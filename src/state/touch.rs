// Touches tracked by a single gesture.
use std::collections::HashMap;

use crate::model::{RawTouch, TouchId, TouchPoint};

/// Touch id -> touch point, with an ordered snapshot for geometry.
///
/// Owned by exactly one gesture. `timestamp` is stamped by the caller with
/// the arrival time of the event that caused the mutation.
#[derive(Default, Debug, Clone)]
pub struct TouchSet {
    points: Vec<TouchPoint>,
    index: HashMap<TouchId, usize>,
    pub timestamp: f64,
}

impl TouchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch_with_id(&self, id: TouchId) -> Option<&TouchPoint> {
        self.index.get(&id).map(|&i| &self.points[i])
    }

    pub fn contains(&self, id: TouchId) -> bool {
        self.index.contains_key(&id)
    }

    /// No-op when the id is already tracked.
    pub fn add_touch(&mut self, raw: &RawTouch) {
        if self.index.contains_key(&raw.id) {
            return;
        }
        self.index.insert(raw.id, self.points.len());
        self.points.push(TouchPoint::from(*raw));
    }

    /// Overwrites the position of a tracked touch. No-op when absent.
    pub fn update_touch(&mut self, raw: &RawTouch) {
        if let Some(&i) = self.index.get(&raw.id) {
            let p = &mut self.points[i];
            p.page_x = raw.page_x;
            p.page_y = raw.page_y;
        }
    }

    pub fn remove_touch(&mut self, id: TouchId) -> Option<TouchPoint> {
        let i = self.index.remove(&id)?;
        let removed = self.points.remove(i);
        for slot in self.index.values_mut() {
            if *slot > i {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    /// Clears the set in place so the owning gesture can be reused.
    pub fn remove_all_touches(&mut self) {
        self.points.clear();
        self.index.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Touches in insertion order.
    pub fn points(&self) -> &[TouchPoint] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &TouchPoint> {
        self.points.iter()
    }
}
