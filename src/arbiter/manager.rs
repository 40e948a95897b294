use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

use super::{Arbiter, BlockPredicate, DelegateRegistry};
use crate::config::GestureConfig;
use crate::error::{GestureError, Result};
use crate::gesture::{Gesture, GestureDelegate, GestureView, Recognizer, ViewHandle};
use crate::model::{GestureState, TouchEvent, ViewId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct GestureKey {
    view: ViewId,
    index: usize,
}

struct ActiveBlock {
    owner: GestureKey,
    allow: BlockPredicate,
}

type Step = fn(&mut Gesture, &TouchEvent);

/// Owns the gestures of every attached view and routes touches to them.
///
/// The gesture registry is borrowed for the whole dispatch. Calls made back
/// into the manager from a gesture handler fail with
/// [`GestureError::Reentrant`] (or `None` for the `with_gesture*` lookups).
pub struct GestureManager {
    delegates: RefCell<DelegateRegistry>,
    views: RefCell<HashMap<ViewId, Vec<Gesture>>>,
    blocks: RefCell<Vec<ActiveBlock>>,
    dispatching: Cell<Option<GestureKey>>,
    next_view: Cell<u64>,
}

impl GestureManager {
    pub fn new(delegates: DelegateRegistry) -> Rc<Self> {
        Rc::new(Self {
            delegates: RefCell::new(delegates),
            views: RefCell::new(HashMap::new()),
            blocks: RefCell::new(Vec::new()),
            dispatching: Cell::new(None),
            next_view: Cell::new(1),
        })
    }

    pub fn register_delegate(&self, name: impl Into<String>, delegate: Rc<dyn GestureDelegate>) {
        self.delegates.borrow_mut().register(name, delegate);
    }

    /// Builds one gesture per `(config, recognizer)` pair for `view`.
    ///
    /// Nothing is attached if any gesture fails to build.
    pub fn attach<V: GestureView + 'static>(
        self: &Rc<Self>,
        view: &Rc<RefCell<V>>,
        gestures: Vec<(GestureConfig, Box<dyn Recognizer>)>,
    ) -> Result<ViewId> {
        let id = ViewId(self.next_view.get());
        let handle = ViewHandle::new(id, view);
        let weak: Weak<Self> = Rc::downgrade(self);
        let arbiter: Weak<dyn Arbiter> = weak;

        let built = gestures
            .into_iter()
            .map(|(config, recognizer)| Gesture::new(config, recognizer, handle.clone(), arbiter.clone()))
            .collect::<Result<Vec<_>>>()?;

        let mut views = self.views.try_borrow_mut().map_err(|_| GestureError::Reentrant)?;
        self.next_view.set(id.0 + 1);
        debug!(view = %id, gestures = built.len(), "attached view");
        views.insert(id, built);
        Ok(id)
    }

    /// Discards the view's gestures and any block they hold.
    pub fn detach(&self, view: ViewId) -> Result<()> {
        self.views
            .try_borrow_mut()
            .map_err(|_| GestureError::Reentrant)?
            .remove(&view)
            .ok_or(GestureError::UnknownView(view))?;
        self.blocks.borrow_mut().retain(|b| b.owner.view != view);
        debug!(view = %view, "detached view");
        Ok(())
    }

    pub fn touch_start(&self, view: ViewId, evt: &TouchEvent) -> Result<()> {
        self.dispatch(view, evt, Gesture::touch_start)
    }

    pub fn touch_move(&self, view: ViewId, evt: &TouchEvent) -> Result<()> {
        self.dispatch(view, evt, Gesture::touch_move)
    }

    pub fn touch_end(&self, view: ViewId, evt: &TouchEvent) -> Result<()> {
        self.dispatch(view, evt, Gesture::touch_end)
    }

    pub fn touch_cancel(&self, view: ViewId, evt: &TouchEvent) -> Result<()> {
        self.dispatch(view, evt, Gesture::touch_cancel)
    }

    /// Whether some running exclusive gesture currently suppresses `view`.
    pub fn is_blocked(&self, view: ViewId) -> bool {
        self.blocks.borrow().iter().any(|b| !(b.allow)(view))
    }

    /// `(name, state)` of each gesture on `view`, in registration order.
    pub fn gesture_states(&self, view: ViewId) -> Result<Vec<(String, GestureState)>> {
        let views = self.views.try_borrow().map_err(|_| GestureError::Reentrant)?;
        let gestures = views.get(&view).ok_or(GestureError::UnknownView(view))?;
        Ok(gestures
            .iter()
            .map(|g| (g.name().to_string(), g.state()))
            .collect())
    }

    pub fn with_gesture<T>(&self, view: ViewId, name: &str, f: impl FnOnce(&Gesture) -> T) -> Option<T> {
        let views = self.views.try_borrow().ok()?;
        views.get(&view)?.iter().find(|g| g.name() == name).map(f)
    }

    pub fn with_gesture_mut<T>(
        &self,
        view: ViewId,
        name: &str,
        f: impl FnOnce(&mut Gesture) -> T,
    ) -> Option<T> {
        let out = {
            let mut views = self.views.try_borrow_mut().ok()?;
            views.get_mut(&view)?.iter_mut().find(|g| g.name() == name).map(f)
        };
        // The change may have ended a blocking gesture, e.g. by disabling it.
        self.release_finished_blocks();
        out
    }

    fn dispatch(&self, view: ViewId, evt: &TouchEvent, step: Step) -> Result<()> {
        {
            let mut views = self.views.try_borrow_mut().map_err(|_| {
                warn!(view = %view, "touch routed back into the manager during dispatch");
                GestureError::Reentrant
            })?;
            let gestures = views.get_mut(&view).ok_or(GestureError::UnknownView(view))?;
            for (index, gesture) in gestures.iter_mut().enumerate() {
                let key = GestureKey { view, index };
                if self.is_suppressed(key) {
                    trace!(gesture = %gesture.name(), view = %view, "suppressed by block");
                    continue;
                }
                self.dispatching.set(Some(key));
                step(gesture, evt);
                self.dispatching.set(None);
            }
        }
        self.release_finished_blocks();
        Ok(())
    }

    fn is_suppressed(&self, key: GestureKey) -> bool {
        self.blocks
            .borrow()
            .iter()
            .any(|b| b.owner != key && !(b.allow)(key.view))
    }

    fn release_finished_blocks(&self) {
        let Ok(views) = self.views.try_borrow() else {
            return;
        };
        self.blocks.borrow_mut().retain(|b| {
            let running = views
                .get(&b.owner.view)
                .and_then(|gestures| gestures.get(b.owner.index))
                .is_some_and(|g| g.state().is_recognized());
            if !running {
                debug!(view = %b.owner.view, "block released");
            }
            running
        });
    }
}

impl Arbiter for GestureManager {
    fn block(&self, view: ViewId, allow: BlockPredicate) {
        let Some(owner) = self.dispatching.get() else {
            warn!(view = %view, "block requested outside of dispatch, ignored");
            return;
        };
        debug!(view = %view, "blocking simultaneous recognition");
        self.blocks.borrow_mut().push(ActiveBlock { owner, allow });
    }

    fn find_delegate(&self, name: &str) -> Option<Rc<dyn GestureDelegate>> {
        self.delegates.borrow().find(name)
    }
}

impl std::fmt::Debug for GestureManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureManager")
            .field("views", &self.views.borrow().len())
            .field("blocks", &self.blocks.borrow().len())
            .finish()
    }
}
