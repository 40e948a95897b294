// Browser glue: turns web-sys touch events into normalized ones and feeds
// them to a GestureManager.
use std::rc::Rc;

use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::EventTarget;

use crate::arbiter::GestureManager;
use crate::error::Result;
use crate::model::{RawTouch, TouchEvent, ViewId};

type Route = fn(&GestureManager, ViewId, &TouchEvent) -> Result<()>;
type Listener = Closure<dyn FnMut(web_sys::TouchEvent)>;

/// Reads the changed touches (page coordinates) and the event time stamp.
pub fn normalize(e: &web_sys::TouchEvent) -> TouchEvent {
    let list = e.changed_touches();
    let touches = (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| RawTouch::new(t.identifier() as i64, t.page_x() as f64, t.page_y() as f64))
        .collect();
    TouchEvent::new(touches, e.time_stamp())
}

/// Touch listeners bound to one element; removed again on drop.
pub struct TouchListeners {
    target: EventTarget,
    listeners: Vec<(&'static str, Listener)>,
}

impl TouchListeners {
    pub fn bind(target: &EventTarget, manager: &Rc<GestureManager>, view: ViewId) -> Self {
        let routes: [(&'static str, Route); 4] = [
            ("touchstart", GestureManager::touch_start),
            ("touchmove", GestureManager::touch_move),
            ("touchend", GestureManager::touch_end),
            ("touchcancel", GestureManager::touch_cancel),
        ];
        let mut listeners = Vec::with_capacity(routes.len());
        for (kind, route) in routes {
            let manager = manager.clone();
            let cb = Closure::wrap(Box::new(move |e: web_sys::TouchEvent| {
                let evt = normalize(&e);
                if let Err(err) = route(&manager, view, &evt) {
                    warn!(%err, kind, "touch dispatch failed");
                }
                e.prevent_default();
            }) as Box<dyn FnMut(web_sys::TouchEvent)>);
            if target
                .add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())
                .is_err()
            {
                warn!(kind, "could not add listener");
            }
            listeners.push((kind, cb));
        }
        Self {
            target: target.clone(),
            listeners,
        }
    }
}

impl Drop for TouchListeners {
    fn drop(&mut self) {
        for (kind, cb) in &self.listeners {
            if self
                .target
                .remove_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())
                .is_err()
            {
                warn!(kind, "could not remove listener");
            }
        }
    }
}
