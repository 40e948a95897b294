//! Multi-touch gesture recognition for Yew/web views.
//!
//! Low-level touch events (start, move, end, cancel) go into a [`Gesture`],
//! which tracks its touches, runs the recognition state machine and offers
//! `Start`/`Change`/`End`/`Cancel` phases to a [`GestureView`]. Concrete
//! gestures are [`Recognizer`] policy structs; [`GestureManager`] owns the
//! gestures per view and arbitrates simultaneous recognition.

pub mod arbiter;
pub mod config;
pub mod dom;
pub mod error;
pub mod gesture;
pub mod model;
pub mod recognizers;
pub mod state;
pub mod util;

pub use arbiter::{Arbiter, BlockPredicate, DelegateRegistry, GestureManager};
pub use config::GestureConfig;
pub use error::{GestureError, Result};
pub use gesture::{Gesture, GestureDelegate, GestureView, Recognition, Recognizer, ViewHandle};
pub use model::{
    GesturePhase, GestureState, Point, RawTouch, StateChange, TouchEvent, TouchId, TouchPoint, ViewId,
};
pub use recognizers::{Pan, Pinch, Tap};
pub use state::TouchSet;
pub use util::{center_point_for_touches, distance};
