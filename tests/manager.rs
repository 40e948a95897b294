//! Dispatch and simultaneous-recognition blocking through GestureManager.

mod common;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use common::*;
use yew_gestures::{
    DelegateRegistry, Gesture, GestureConfig, GestureError, GestureManager, GestureState,
    GestureView, Recognizer, TouchEvent, ViewId,
};

fn recording(log: &Log) -> Box<dyn Recognizer> {
    Box::new(Recording::new(log))
}

#[test]
fn exclusive_gesture_suppresses_other_views_until_it_finishes() {
    let manager = GestureManager::new(DelegateRegistry::new());
    let log_a = new_log();
    let log_b = new_log();
    let view_a = RecordingView::new(&log_a, true);
    let view_b = RecordingView::new(&log_b, true);
    let a = manager
        .attach(&view_a, vec![(GestureConfig::new("pan").exclusive(), recording(&log_a))])
        .unwrap();
    let b = manager
        .attach(&view_b, vec![(GestureConfig::new("tap").discrete(), recording(&log_b))])
        .unwrap();
    assert_ne!(a, b);

    manager.touch_start(a, &one(1, 0.0, 0.0)).unwrap();
    assert!(!manager.is_blocked(b));
    manager.touch_move(a, &one(1, 10.0, 0.0)).unwrap();
    assert!(manager.is_blocked(b));
    assert!(!manager.is_blocked(a));

    manager.touch_start(b, &one(2, 50.0, 50.0)).unwrap();
    assert_eq!(
        manager.gesture_states(b).unwrap(),
        vec![("tap".to_string(), GestureState::WaitingForTouches)]
    );
    assert_eq!(count(&log_b, "didBegin"), 0);

    manager.touch_end(a, &one(1, 10.0, 0.0)).unwrap();
    assert!(!manager.is_blocked(b));

    manager.touch_start(b, &one(2, 50.0, 50.0)).unwrap();
    assert_eq!(
        manager.gesture_states(b).unwrap(),
        vec![("tap".to_string(), GestureState::Began)]
    );
}

#[test]
fn siblings_on_the_blocking_view_keep_running() {
    let manager = GestureManager::new(DelegateRegistry::new());
    let pan_log = new_log();
    let tap_log = new_log();
    let view = RecordingView::new(&pan_log, true);
    let id = manager
        .attach(
            &view,
            vec![
                (GestureConfig::new("pan").exclusive(), recording(&pan_log)),
                (GestureConfig::new("tap").discrete(), recording(&tap_log)),
            ],
        )
        .unwrap();

    manager.touch_start(id, &one(1, 0.0, 0.0)).unwrap();
    manager.touch_move(id, &one(1, 10.0, 0.0)).unwrap();
    assert_eq!(
        manager.gesture_states(id).unwrap(),
        vec![
            ("pan".to_string(), GestureState::Began),
            ("tap".to_string(), GestureState::Began),
        ]
    );
    assert_eq!(count(&tap_log, "didChange"), 1);
}

#[test]
fn vetoed_end_releases_the_block() {
    let manager = GestureManager::new(DelegateRegistry::new());
    let log = new_log();
    let view = RecordingView::new(&log, true);
    let other = RecordingView::new(&log, true);
    let recognizer = Recording::new(&log);
    let end = recognizer.end.clone();
    let pan: Box<dyn Recognizer> = Box::new(recognizer);
    let a = manager
        .attach(&view, vec![(GestureConfig::new("pan").exclusive(), pan)])
        .unwrap();
    let b = manager.attach(&other, vec![]).unwrap();

    manager.touch_start(a, &one(1, 0.0, 0.0)).unwrap();
    manager.touch_move(a, &one(1, 10.0, 0.0)).unwrap();
    assert!(manager.is_blocked(b));

    end.set(false);
    manager.touch_end(a, &one(1, 10.0, 0.0)).unwrap();
    assert!(!manager.is_blocked(b));
}

#[test]
fn cancel_releases_the_block() {
    let manager = GestureManager::new(DelegateRegistry::new());
    let log = new_log();
    let view = RecordingView::new(&log, true);
    let a = manager
        .attach(&view, vec![(GestureConfig::new("tap").discrete().exclusive(), recording(&log))])
        .unwrap();

    manager.touch_start(a, &one(1, 0.0, 0.0)).unwrap();
    assert!(manager.is_blocked(ViewId(999)));
    manager.touch_cancel(a, &one(1, 0.0, 0.0)).unwrap();
    assert!(!manager.is_blocked(ViewId(999)));
}

#[test]
fn unknown_view_is_an_error() {
    let manager = GestureManager::new(DelegateRegistry::new());
    let err = manager.touch_start(ViewId(42), &one(1, 0.0, 0.0)).unwrap_err();
    assert!(matches!(err, GestureError::UnknownView(ViewId(42))));
    assert!(manager.gesture_states(ViewId(42)).is_err());
}

#[test]
fn detach_discards_gestures_and_their_blocks() {
    let manager = GestureManager::new(DelegateRegistry::new());
    let log = new_log();
    let view = RecordingView::new(&log, true);
    let a = manager
        .attach(&view, vec![(GestureConfig::new("tap").discrete().exclusive(), recording(&log))])
        .unwrap();
    manager.touch_start(a, &one(1, 0.0, 0.0)).unwrap();
    assert!(manager.is_blocked(ViewId(999)));

    manager.detach(a).unwrap();
    assert!(!manager.is_blocked(ViewId(999)));
    assert!(matches!(
        manager.touch_end(a, &one(1, 0.0, 0.0)),
        Err(GestureError::UnknownView(_))
    ));
    assert!(manager.detach(a).is_err());
}

#[test]
fn delegates_resolve_through_the_registry() {
    let mut registry = DelegateRegistry::new();
    registry.register("never", Rc::new(Veto { begin: false, end: true }));
    let manager = GestureManager::new(registry);
    let log = new_log();
    let view = RecordingView::new(&log, true);
    let id = manager
        .attach(&view, vec![(GestureConfig::new("tap").discrete().delegate("never"), recording(&log))])
        .unwrap();

    manager.touch_start(id, &one(1, 0.0, 0.0)).unwrap();
    assert_eq!(
        manager.gesture_states(id).unwrap(),
        vec![("tap".to_string(), GestureState::WaitingForTouches)]
    );
    assert!(manager.with_gesture(id, "tap", |g| g.delegate().is_some()).unwrap());
}

#[test]
fn failed_attach_leaves_nothing_behind() {
    let manager = GestureManager::new(DelegateRegistry::new());
    let log = new_log();
    let view = RecordingView::new(&log, true);
    let err = manager
        .attach(
            &view,
            vec![
                (GestureConfig::new("tap").discrete(), recording(&log)),
                (GestureConfig::new("pan").delegate("missing"), recording(&log)),
            ],
        )
        .unwrap_err();
    assert!(matches!(err, GestureError::UnresolvedDelegate(_)));
    assert!(manager.gesture_states(ViewId(1)).is_err());

    manager.register_delegate("missing", Rc::new(Veto { begin: true, end: true }));
    let id = manager
        .attach(&view, vec![(GestureConfig::new("pan").delegate("missing"), recording(&log))])
        .unwrap();
    assert_eq!(id, ViewId(1));
}

#[test]
fn gestures_can_be_toggled_through_the_manager() {
    let manager = GestureManager::new(DelegateRegistry::new());
    let log = new_log();
    let view = RecordingView::new(&log, true);
    let id = manager
        .attach(&view, vec![(GestureConfig::new("tap").discrete(), recording(&log))])
        .unwrap();

    manager.with_gesture_mut(id, "tap", |g| g.set_enabled(false)).unwrap();
    manager.touch_start(id, &one(1, 0.0, 0.0)).unwrap();
    assert_eq!(manager.with_gesture(id, "tap", |g| g.state()), Some(GestureState::WaitingForTouches));
    assert!(manager.with_gesture(id, "nope", |g| g.state()).is_none());
}

#[test]
fn disabling_a_running_blocker_releases_its_block() {
    let manager = GestureManager::new(DelegateRegistry::new());
    let log = new_log();
    let view = RecordingView::new(&log, true);
    let a = manager
        .attach(&view, vec![(GestureConfig::new("tap").discrete().exclusive(), recording(&log))])
        .unwrap();
    manager.touch_start(a, &one(1, 0.0, 0.0)).unwrap();
    assert!(manager.is_blocked(ViewId(999)));

    manager.with_gesture_mut(a, "tap", |g| g.set_enabled(false)).unwrap();
    assert!(!manager.is_blocked(ViewId(999)));
    assert_eq!(manager.with_gesture(a, "tap", |g| g.state()), Some(GestureState::WaitingForTouches));
}

/// Routes a touch back into the manager from its start handler.
struct Reentrant {
    manager: Weak<GestureManager>,
    reentered: Rc<Cell<bool>>,
}

impl GestureView for Reentrant {
    fn gesture_start(&mut self, _gesture: &Gesture, evt: &TouchEvent) -> bool {
        if let Some(manager) = self.manager.upgrade() {
            let nested = manager.touch_move(ViewId(1), evt);
            self.reentered
                .set(matches!(nested, Err(GestureError::Reentrant)));
            assert!(manager.with_gesture(ViewId(1), "pan", |g| g.state()).is_none());
        }
        true
    }
}

#[test]
fn handlers_calling_back_get_an_error() {
    let manager = GestureManager::new(DelegateRegistry::new());
    let log = new_log();
    let reentered = Rc::new(Cell::new(false));
    let view = Rc::new(RefCell::new(Reentrant {
        manager: Rc::downgrade(&manager),
        reentered: reentered.clone(),
    }));
    let id = manager
        .attach(&view, vec![(GestureConfig::new("pan"), recording(&log))])
        .unwrap();

    manager.touch_start(id, &one(1, 0.0, 0.0)).unwrap();
    manager.touch_move(id, &one(1, 10.0, 0.0)).unwrap();
    assert!(reentered.get());
    assert_eq!(manager.with_gesture(id, "pan", |g| g.state()), Some(GestureState::Began));
}
