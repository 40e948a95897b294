use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::Gesture;
use crate::model::{TouchEvent, ViewId};

/// Delivery target for recognized gesture phases.
///
/// Each method stands for the `<name><Phase>` handler of a view. Returning
/// `true` accepts the phase; the default (`false`) means "no handler", which
/// the gesture treats as a rejection.
pub trait GestureView {
    fn gesture_start(&mut self, _gesture: &Gesture, _evt: &TouchEvent) -> bool {
        false
    }

    fn gesture_change(&mut self, _gesture: &Gesture, _evt: &TouchEvent) -> bool {
        false
    }

    fn gesture_end(&mut self, _gesture: &Gesture, _evt: &TouchEvent) -> bool {
        false
    }

    fn gesture_cancel(&mut self, _gesture: &Gesture, _evt: &TouchEvent) -> bool {
        false
    }
}

/// Non-owning reference to a view; the UI layer controls its lifetime.
#[derive(Clone)]
pub struct ViewHandle {
    pub id: ViewId,
    target: Weak<RefCell<dyn GestureView>>,
}

impl ViewHandle {
    pub fn new<V: GestureView + 'static>(id: ViewId, view: &Rc<RefCell<V>>) -> Self {
        let target: Weak<RefCell<V>> = Rc::downgrade(view);
        Self { id, target }
    }

    pub fn upgrade(&self) -> Option<Rc<RefCell<dyn GestureView>>> {
        self.target.upgrade()
    }

    pub fn is_alive(&self) -> bool {
        self.target.strong_count() > 0
    }
}

impl std::fmt::Debug for ViewHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewHandle")
            .field("id", &self.id)
            .field("alive", &self.is_alive())
            .finish()
    }
}
