use std::any::Any;

use crate::model::{GesturePhase, GestureState, TouchEvent};
use crate::state::TouchSet;

/// What a policy hook sees of its gesture at the moment it runs.
#[derive(Clone, Copy, Debug)]
pub struct Recognition<'a> {
    pub name: &'a str,
    pub state: GestureState,
    pub touches: &'a TouchSet,
    /// The event that triggered the hook.
    pub event: &'a TouchEvent,
}

/// Policy hooks injected into the recognition engine.
///
/// A concrete gesture (tap, pan, pinch...) is a struct implementing this
/// trait. The engine decides transitions; the hooks veto them and keep
/// whatever measurements the gesture needs.
pub trait Recognizer {
    /// Gates entry into BEGAN.
    fn should_begin(&self, _r: &Recognition<'_>) -> bool {
        true
    }

    /// Gates entry into ENDED.
    fn should_end(&self, _r: &Recognition<'_>) -> bool {
        true
    }

    fn did_become_possible(&mut self, _r: &Recognition<'_>) {}

    fn did_begin(&mut self, _r: &Recognition<'_>) {}

    fn did_change(&mut self, _r: &Recognition<'_>) {}

    fn did_end(&mut self, _r: &Recognition<'_>) {}

    fn did_cancel(&mut self, _r: &Recognition<'_>) {}

    /// The view declined `phase`. The state transition already happened.
    fn event_was_rejected(&mut self, _phase: GesturePhase, _r: &Recognition<'_>) {}

    /// Lets views read concrete measurements through `Gesture::recognizer`.
    fn as_any(&self) -> &dyn Any;
}

/// Optional per-gesture customization, resolved once at construction.
///
/// Its vetoes are combined with the recognizer's: both must agree.
pub trait GestureDelegate {
    fn should_begin(&self, _r: &Recognition<'_>) -> bool {
        true
    }

    fn should_end(&self, _r: &Recognition<'_>) -> bool {
        true
    }
}
