//! The per-gesture recognition state machine.
//!
//! A [`Gesture`] consumes touch events for one view, keeps its own
//! [`TouchSet`], moves through [`GestureState`]s and calls the policy hooks of
//! its [`Recognizer`]. Recognized phases are offered to the view; a view that
//! declines does not roll the transition back.

pub mod recognizer;
pub mod view;

pub use recognizer::{GestureDelegate, Recognition, Recognizer};
pub use view::{GestureView, ViewHandle};

use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

use crate::arbiter::{Arbiter, BlockPredicate};
use crate::config::GestureConfig;
use crate::error::{GestureError, Result};
use crate::model::{GesturePhase, GestureState, StateChange, TouchEvent, ViewId};
use crate::state::TouchSet;

type Observer = Box<dyn Fn(&Gesture, StateChange)>;

pub struct Gesture {
    config: GestureConfig,
    state: GestureState,
    touches: TouchSet,
    view: ViewHandle,
    delegate: Option<Rc<dyn GestureDelegate>>,
    recognizer: Box<dyn Recognizer>,
    arbiter: Weak<dyn Arbiter>,
    observers: Vec<Observer>,
}

// Built from individual fields so hooks can borrow the recognizer mutably
// while reading the rest of the gesture.
fn snapshot<'a>(
    config: &'a GestureConfig,
    state: GestureState,
    touches: &'a TouchSet,
    event: &'a TouchEvent,
) -> Recognition<'a> {
    Recognition {
        name: &config.name,
        state,
        touches,
        event,
    }
}

impl Gesture {
    /// Resolves `config.delegate_name` through the arbiter, if set.
    pub fn new(
        config: GestureConfig,
        recognizer: Box<dyn Recognizer>,
        view: ViewHandle,
        arbiter: Weak<dyn Arbiter>,
    ) -> Result<Self> {
        Self::build(config, recognizer, view, arbiter, None)
    }

    /// Uses `delegate` as is; no registry lookup happens.
    pub fn with_delegate(
        config: GestureConfig,
        recognizer: Box<dyn Recognizer>,
        view: ViewHandle,
        arbiter: Weak<dyn Arbiter>,
        delegate: Rc<dyn GestureDelegate>,
    ) -> Result<Self> {
        Self::build(config, recognizer, view, arbiter, Some(delegate))
    }

    fn build(
        config: GestureConfig,
        recognizer: Box<dyn Recognizer>,
        view: ViewHandle,
        arbiter: Weak<dyn Arbiter>,
        delegate: Option<Rc<dyn GestureDelegate>>,
    ) -> Result<Self> {
        config.validate()?;
        let delegate = match (delegate, &config.delegate_name) {
            (Some(d), _) => Some(d),
            (None, Some(name)) => {
                let found = arbiter.upgrade().and_then(|a| a.find_delegate(name));
                Some(found.ok_or_else(|| GestureError::UnresolvedDelegate(name.clone()))?)
            }
            (None, None) => None,
        };
        Ok(Self {
            config,
            state: GestureState::WaitingForTouches,
            touches: TouchSet::new(),
            view,
            delegate,
            recognizer,
            arbiter,
            observers: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn touches(&self) -> &TouchSet {
        &self.touches
    }

    pub fn view_id(&self) -> ViewId {
        self.view.id
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn number_of_required_touches(&self) -> usize {
        self.config.number_of_required_touches
    }

    pub fn is_discrete(&self) -> bool {
        self.config.is_discrete
    }

    pub fn allows_simultaneous_recognition(&self) -> bool {
        self.config.allows_simultaneous_recognition
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_enabled
    }

    /// Disabling drops any cycle in progress, so a running gesture cannot
    /// keep holding its block.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.is_enabled = enabled;
        if !enabled && !self.state.is_terminal() {
            self.touches.remove_all_touches();
            self.set_state(GestureState::WaitingForTouches);
        }
    }

    pub fn delegate(&self) -> Option<&Rc<dyn GestureDelegate>> {
        self.delegate.as_ref()
    }

    /// Typed access to the policy struct, e.g. `gesture.recognizer::<Pinch>()`.
    pub fn recognizer<R: Recognizer + 'static>(&self) -> Option<&R> {
        self.recognizer.as_any().downcast_ref::<R>()
    }

    /// Called with every state change, after the new state is in place.
    pub fn observe(&mut self, observer: impl Fn(&Gesture, StateChange) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn touch_start(&mut self, evt: &TouchEvent) {
        if !self.config.is_enabled {
            return;
        }
        if self.state.is_terminal() {
            self.set_state(GestureState::WaitingForTouches);
        }

        let required = self.config.number_of_required_touches;
        let mut added = false;
        for raw in &evt.touches {
            if self.touches.contains(raw.id) {
                continue;
            }
            // Leftovers from a cycle that never formally ended.
            if self.touches.len() == required {
                trace!(gesture = %self.config.name, touch = %raw.id, "touch set full, starting over");
                self.touches.remove_all_touches();
            }
            self.touches.add_touch(raw);
            added = true;
        }
        self.touches.timestamp = evt.timestamp;

        match self.state {
            GestureState::WaitingForTouches => {}
            // A fresh set of fingers replaces the ones that never began.
            GestureState::Possible if added => {}
            _ => return,
        }
        if self.touches.len() < required {
            if self.state == GestureState::Possible {
                debug!(gesture = %self.config.name, "lost required touches");
                self.set_state(GestureState::WaitingForTouches);
            }
            return;
        }
        if self.config.is_discrete {
            if self.should_begin(evt) {
                self.begin(evt);
            }
        } else {
            self.set_state(GestureState::Possible);
            self.recognizer
                .did_become_possible(&snapshot(&self.config, self.state, &self.touches, evt));
        }
    }

    pub fn touch_move(&mut self, evt: &TouchEvent) {
        if !self.config.is_enabled {
            return;
        }
        if matches!(
            self.state,
            GestureState::WaitingForTouches | GestureState::Ended | GestureState::Cancelled
        ) {
            return;
        }

        for raw in &evt.touches {
            self.touches.update_touch(raw);
        }
        self.touches.timestamp = evt.timestamp;

        match self.state {
            GestureState::Possible => {
                if self.should_begin(evt) {
                    self.begin(evt);
                    self.recognizer
                        .did_change(&snapshot(&self.config, self.state, &self.touches, evt));
                    self.attempt_gesture_event_delivery(GesturePhase::Start, evt);
                }
            }
            GestureState::Began | GestureState::Changed => {
                // Discrete gestures never report CHANGED.
                if !self.config.is_discrete {
                    self.set_state(GestureState::Changed);
                }
                self.recognizer
                    .did_change(&snapshot(&self.config, self.state, &self.touches, evt));
                if !self.config.is_discrete {
                    self.attempt_gesture_event_delivery(GesturePhase::Change, evt);
                }
            }
            _ => {}
        }
    }

    pub fn touch_end(&mut self, evt: &TouchEvent) {
        if !self.config.is_enabled || !self.state.is_recognized() {
            return;
        }

        for raw in &evt.touches {
            self.touches.update_touch(raw);
        }
        self.touches.timestamp = evt.timestamp;

        if self.should_end(evt) {
            self.set_state(GestureState::Ended);
            self.recognizer
                .did_end(&snapshot(&self.config, self.state, &self.touches, evt));
            self.attempt_gesture_event_delivery(GesturePhase::End, evt);
        } else {
            debug!(gesture = %self.config.name, "end vetoed, resetting");
            self.set_state(GestureState::WaitingForTouches);
        }
        self.touches.remove_all_touches();
    }

    pub fn touch_cancel(&mut self, evt: &TouchEvent) {
        if !self.config.is_enabled || self.state == GestureState::Cancelled {
            return;
        }

        self.touches.timestamp = evt.timestamp;
        self.set_state(GestureState::Cancelled);
        self.recognizer
            .did_cancel(&snapshot(&self.config, self.state, &self.touches, evt));
        if !self.config.is_discrete {
            self.attempt_gesture_event_delivery(GesturePhase::Cancel, evt);
        }
        self.touches.remove_all_touches();
    }

    /// Offers `phase` to the view. Returns whether the view accepted it.
    pub fn attempt_gesture_event_delivery(&mut self, phase: GesturePhase, evt: &TouchEvent) -> bool {
        let accepted = match self.view.upgrade() {
            Some(target) => match target.try_borrow_mut() {
                Ok(mut view) => match phase {
                    GesturePhase::Start => view.gesture_start(self, evt),
                    GesturePhase::Change => view.gesture_change(self, evt),
                    GesturePhase::End => view.gesture_end(self, evt),
                    GesturePhase::Cancel => view.gesture_cancel(self, evt),
                },
                Err(_) => {
                    warn!(
                        gesture = %self.config.name,
                        view = %self.view.id,
                        "view busy, dropping {}",
                        phase.event_name(&self.config.name)
                    );
                    false
                }
            },
            None => false,
        };
        if !accepted {
            debug!(
                gesture = %self.config.name,
                view = %self.view.id,
                "{} rejected",
                phase.event_name(&self.config.name)
            );
            self.recognizer.event_was_rejected(
                phase,
                &snapshot(&self.config, self.state, &self.touches, evt),
            );
        }
        accepted
    }

    fn should_begin(&self, evt: &TouchEvent) -> bool {
        let r = snapshot(&self.config, self.state, &self.touches, evt);
        self.recognizer.should_begin(&r) && self.delegate.as_ref().is_none_or(|d| d.should_begin(&r))
    }

    fn should_end(&self, evt: &TouchEvent) -> bool {
        let r = snapshot(&self.config, self.state, &self.touches, evt);
        self.recognizer.should_end(&r) && self.delegate.as_ref().is_none_or(|d| d.should_end(&r))
    }

    fn begin(&mut self, evt: &TouchEvent) {
        if !self.config.allows_simultaneous_recognition {
            self.block_simultaneous();
        }
        self.set_state(GestureState::Began);
        self.recognizer
            .did_begin(&snapshot(&self.config, self.state, &self.touches, evt));
    }

    fn block_simultaneous(&self) {
        let Some(arbiter) = self.arbiter.upgrade() else {
            warn!(gesture = %self.config.name, "arbiter gone, cannot block other gestures");
            return;
        };
        let own = self.view.id;
        let allow: BlockPredicate = Rc::new(move |view: ViewId| view == own);
        arbiter.block(own, allow);
    }

    fn set_state(&mut self, to: GestureState) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        debug!(gesture = %self.config.name, view = %self.view.id, "{} -> {}", from.as_str(), to.as_str());
        let change = StateChange { from, to };
        for observer in &self.observers {
            observer(self, change);
        }
    }
}

impl std::fmt::Debug for Gesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gesture")
            .field("name", &self.config.name)
            .field("state", &self.state)
            .field("touches", &self.touches.len())
            .field("view", &self.view)
            .finish()
    }
}
