//! Recording fixtures shared by the integration tests.
#![allow(dead_code)]

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use yew_gestures::{
    Arbiter, BlockPredicate, Gesture, GestureConfig, GestureDelegate, GesturePhase, GestureView,
    RawTouch, Recognition, Recognizer, TouchEvent, ViewHandle, ViewId,
};

pub type Log = Rc<RefCell<Vec<String>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn count(log: &Log, entry: &str) -> usize {
    log.borrow().iter().filter(|e| e.as_str() == entry).count()
}

/// Records every hook; vetoes are switchable from the test.
pub struct Recording {
    pub log: Log,
    pub begin: Rc<Cell<bool>>,
    pub end: Rc<Cell<bool>>,
}

impl Recording {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            begin: Rc::new(Cell::new(true)),
            end: Rc::new(Cell::new(true)),
        }
    }

    fn push(&self, entry: impl Into<String>) {
        self.log.borrow_mut().push(entry.into());
    }
}

impl Recognizer for Recording {
    fn should_begin(&self, _r: &Recognition<'_>) -> bool {
        self.begin.get()
    }

    fn should_end(&self, _r: &Recognition<'_>) -> bool {
        self.end.get()
    }

    fn did_become_possible(&mut self, _r: &Recognition<'_>) {
        self.push("didBecomePossible");
    }

    fn did_begin(&mut self, _r: &Recognition<'_>) {
        self.push("didBegin");
    }

    fn did_change(&mut self, _r: &Recognition<'_>) {
        self.push("didChange");
    }

    fn did_end(&mut self, _r: &Recognition<'_>) {
        self.push("didEnd");
    }

    fn did_cancel(&mut self, _r: &Recognition<'_>) {
        self.push("didCancel");
    }

    fn event_was_rejected(&mut self, phase: GesturePhase, r: &Recognition<'_>) {
        self.push(format!("rejected:{}", phase.event_name(r.name)));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Writes `<name><Phase>` for each delivery and answers with `accept`.
pub struct RecordingView {
    pub log: Log,
    pub accept: bool,
}

impl RecordingView {
    pub fn new(log: &Log, accept: bool) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            log: log.clone(),
            accept,
        }))
    }

    fn deliver(&self, gesture: &Gesture, phase: GesturePhase) -> bool {
        self.log.borrow_mut().push(phase.event_name(gesture.name()));
        self.accept
    }
}

impl GestureView for RecordingView {
    fn gesture_start(&mut self, gesture: &Gesture, _evt: &TouchEvent) -> bool {
        self.deliver(gesture, GesturePhase::Start)
    }

    fn gesture_change(&mut self, gesture: &Gesture, _evt: &TouchEvent) -> bool {
        self.deliver(gesture, GesturePhase::Change)
    }

    fn gesture_end(&mut self, gesture: &Gesture, _evt: &TouchEvent) -> bool {
        self.deliver(gesture, GesturePhase::End)
    }

    fn gesture_cancel(&mut self, gesture: &Gesture, _evt: &TouchEvent) -> bool {
        self.deliver(gesture, GesturePhase::Cancel)
    }
}

/// Only implements `gesture_end`; every other phase is "absent".
pub struct EndOnlyView {
    pub log: Log,
}

impl GestureView for EndOnlyView {
    fn gesture_end(&mut self, gesture: &Gesture, _evt: &TouchEvent) -> bool {
        self.log
            .borrow_mut()
            .push(GesturePhase::End.event_name(gesture.name()));
        true
    }
}

#[derive(Default)]
pub struct RecordingArbiter {
    pub blocks: RefCell<Vec<(ViewId, BlockPredicate)>>,
    pub delegates: RefCell<Vec<(String, Rc<dyn GestureDelegate>)>>,
}

impl Arbiter for RecordingArbiter {
    fn block(&self, view: ViewId, allow: BlockPredicate) {
        self.blocks.borrow_mut().push((view, allow));
    }

    fn find_delegate(&self, name: &str) -> Option<Rc<dyn GestureDelegate>> {
        self.delegates
            .borrow()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d.clone())
    }
}

pub struct Veto {
    pub begin: bool,
    pub end: bool,
}

impl GestureDelegate for Veto {
    fn should_begin(&self, _r: &Recognition<'_>) -> bool {
        self.begin
    }

    fn should_end(&self, _r: &Recognition<'_>) -> bool {
        self.end
    }
}

/// Everything a single-gesture test needs to keep alive.
pub struct Harness {
    pub gesture: Gesture,
    pub log: Log,
    pub view: Rc<RefCell<RecordingView>>,
    pub arbiter: Rc<RecordingArbiter>,
    pub begin: Rc<Cell<bool>>,
    pub end: Rc<Cell<bool>>,
}

pub const VIEW: ViewId = ViewId(7);

pub fn harness(config: GestureConfig) -> Harness {
    let log = new_log();
    let view = RecordingView::new(&log, true);
    let arbiter = Rc::new(RecordingArbiter::default());
    let recording = Recording::new(&log);
    let begin = recording.begin.clone();
    let end = recording.end.clone();
    let weak: Weak<dyn Arbiter> = Rc::downgrade(&arbiter) as Weak<dyn Arbiter>;
    let gesture = Gesture::new(
        config,
        Box::new(recording),
        ViewHandle::new(VIEW, &view),
        weak,
    )
    .expect("gesture builds");
    Harness {
        gesture,
        log,
        view,
        arbiter,
        begin,
        end,
    }
}

pub fn touches(points: &[(i64, f64, f64)], timestamp: f64) -> TouchEvent {
    TouchEvent::new(
        points
            .iter()
            .map(|&(id, x, y)| RawTouch::new(id, x, y))
            .collect(),
        timestamp,
    )
}

pub fn one(id: i64, x: f64, y: f64) -> TouchEvent {
    touches(&[(id, x, y)], 0.0)
}
