//! Simultaneous-recognition arbitration and delegate lookup.
//!
//! A [`Gesture`](crate::gesture::Gesture) only consumes the [`Arbiter`]
//! contract: one `block` call at the instant it commits to BEGAN (when it does
//! not allow simultaneous recognition), and one delegate lookup at
//! construction. [`GestureManager`] is a reference arbiter that owns the
//! gestures of each attached view and dispatches touch events to them.

mod manager;

pub use manager::GestureManager;

use std::collections::HashMap;
use std::rc::Rc;

use crate::gesture::GestureDelegate;
use crate::model::ViewId;

/// Returns whether gestures on the given view may keep receiving touches.
pub type BlockPredicate = Rc<dyn Fn(ViewId) -> bool>;

pub trait Arbiter {
    /// Suppress gestures whose view fails `allow` until the calling gesture
    /// finishes its cycle.
    fn block(&self, view: ViewId, allow: BlockPredicate);

    fn find_delegate(&self, name: &str) -> Option<Rc<dyn GestureDelegate>>;
}

/// Name -> delegate instance, populated explicitly at setup.
#[derive(Default, Clone)]
pub struct DelegateRegistry {
    delegates: HashMap<String, Rc<dyn GestureDelegate>>,
}

impl DelegateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any delegate previously registered under `name`.
    pub fn register(&mut self, name: impl Into<String>, delegate: Rc<dyn GestureDelegate>) {
        self.delegates.insert(name.into(), delegate);
    }

    pub fn find(&self, name: &str) -> Option<Rc<dyn GestureDelegate>> {
        self.delegates.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.delegates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }
}

impl std::fmt::Debug for DelegateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.delegates.keys().collect();
        names.sort();
        f.debug_struct("DelegateRegistry").field("names", &names).finish()
    }
}
