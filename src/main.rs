use std::cell::RefCell;
use std::rc::Rc;
use web_sys::HtmlElement;
use yew::prelude::*;

use yew_gestures::dom::TouchListeners;
use yew_gestures::util::clog;
use yew_gestures::{
    DelegateRegistry, Gesture, GestureManager, GesturePhase, GestureView, Pan, Pinch, Recognizer,
    Tap, TouchEvent,
};

const MAX_LOG_LINES: usize = 40;

#[derive(Default, PartialEq)]
struct GestureLog {
    lines: Vec<String>,
}

impl Reducible for GestureLog {
    type Action = String;

    fn reduce(self: Rc<Self>, line: String) -> Rc<Self> {
        let mut lines = Vec::with_capacity(MAX_LOG_LINES);
        lines.push(line);
        lines.extend(self.lines.iter().take(MAX_LOG_LINES - 1).cloned());
        Rc::new(Self { lines })
    }
}

// Accepts every phase and writes a line describing it.
struct LogView {
    log: UseReducerHandle<GestureLog>,
}

impl LogView {
    fn record(&self, gesture: &Gesture, phase: GesturePhase, evt: &TouchEvent) -> bool {
        let detail = if let Some(pinch) = gesture.recognizer::<Pinch>() {
            format!("scale {:.2}", pinch.scale())
        } else if let Some(pan) = gesture.recognizer::<Pan>() {
            let t = pan.translation();
            format!("dx {:.0} dy {:.0}", t.x, t.y)
        } else if let Some(tap) = gesture.recognizer::<Tap>() {
            format!("tap #{}", tap.taps())
        } else {
            String::new()
        };
        let line = format!(
            "{:>8.0}ms {} {}",
            evt.timestamp,
            phase.event_name(gesture.name()),
            detail
        );
        clog(&line);
        self.log.dispatch(line);
        true
    }
}

impl GestureView for LogView {
    fn gesture_start(&mut self, gesture: &Gesture, evt: &TouchEvent) -> bool {
        self.record(gesture, GesturePhase::Start, evt)
    }

    fn gesture_change(&mut self, gesture: &Gesture, evt: &TouchEvent) -> bool {
        self.record(gesture, GesturePhase::Change, evt)
    }

    fn gesture_end(&mut self, gesture: &Gesture, evt: &TouchEvent) -> bool {
        self.record(gesture, GesturePhase::End, evt)
    }

    fn gesture_cancel(&mut self, gesture: &Gesture, evt: &TouchEvent) -> bool {
        self.record(gesture, GesturePhase::Cancel, evt)
    }
}

#[function_component(App)]
fn app() -> Html {
    let surface_ref = use_node_ref();
    let log = use_reducer(GestureLog::default);

    {
        let surface_ref = surface_ref.clone();
        let log = log.clone();
        use_effect_with((), move |_| {
            let manager = GestureManager::new(DelegateRegistry::new());
            let view = Rc::new(RefCell::new(LogView { log }));
            let gestures = vec![
                (Tap::gesture_config(), Box::new(Tap::default()) as Box<dyn Recognizer>),
                (Pan::gesture_config(), Box::new(Pan::default()) as Box<dyn Recognizer>),
                (
                    Pinch::gesture_config().exclusive(),
                    Box::new(Pinch::default()) as Box<dyn Recognizer>,
                ),
            ];
            let listeners = match (surface_ref.cast::<HtmlElement>(), manager.attach(&view, gestures)) {
                (Some(surface), Ok(view_id)) => Some(TouchListeners::bind(&surface, &manager, view_id)),
                (None, _) => {
                    clog("touch surface not mounted");
                    None
                }
                (_, Err(err)) => {
                    clog(&format!("could not attach gestures: {err}"));
                    None
                }
            };
            // Keep the view alive for as long as the listeners are bound.
            move || {
                drop(listeners);
                drop(view);
            }
        });
    }

    html! {
        <div id="root">
            <div
                ref={surface_ref}
                id="touch-surface"
                style="touch-action:none; width:100vw; height:70vh; background:#161b22; color:#8b949e; display:flex; align-items:center; justify-content:center;"
            >
                {"Tap, pan or pinch here"}
            </div>
            <ul id="gesture-log" style="font-family:monospace; max-height:30vh; overflow-y:auto;">
                { for log.lines.iter().map(|line| html! { <li>{ line.clone() }</li> }) }
            </ul>
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
