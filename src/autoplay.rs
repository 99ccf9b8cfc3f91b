//! Autoplay: a recurring timer advancing the mounted engine.
//!
//! One code path enforces the timer contract for every engine: cancelled
//! on pointer-enter, rescheduled on pointer-leave, always cancelled on
//! destroy.

use crate::engine::SharedEngine;
use gloo_timers::callback::Interval;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

pub struct Autoplay {
    container: HtmlElement,
    timer: Rc<RefCell<Option<Interval>>>,
    enter: Option<Closure<dyn FnMut()>>,
    leave: Option<Closure<dyn FnMut()>>,
    cancelled: bool,
}

fn start_timer(engine: &SharedEngine, delay_ms: u32) -> Interval {
    let engine = engine.clone();
    Interval::new(delay_ms, move || {
        engine.borrow_mut().next();
    })
}

impl Autoplay {
    pub fn start(
        container: &HtmlElement,
        engine: &SharedEngine,
        delay_ms: u32,
        pause_on_hover: bool,
    ) -> Result<Autoplay, JsValue> {
        let timer = Rc::new(RefCell::new(Some(start_timer(engine, delay_ms))));

        let mut autoplay = Autoplay {
            container: container.clone(),
            timer: timer.clone(),
            enter: None,
            leave: None,
            cancelled: false,
        };

        if pause_on_hover {
            let enter = {
                let timer = timer.clone();
                Closure::<dyn FnMut()>::new(move || {
                    // Dropping the interval cancels it.
                    timer.borrow_mut().take();
                })
            };
            container
                .add_event_listener_with_callback("mouseenter", enter.as_ref().unchecked_ref())?;

            let leave = {
                let timer = timer.clone();
                let engine = engine.clone();
                Closure::<dyn FnMut()>::new(move || {
                    *timer.borrow_mut() = Some(start_timer(&engine, delay_ms));
                })
            };
            container
                .add_event_listener_with_callback("mouseleave", leave.as_ref().unchecked_ref())?;

            autoplay.enter = Some(enter);
            autoplay.leave = Some(leave);
        }

        Ok(autoplay)
    }

    /// Stop the timer and detach the hover listeners. Idempotent.
    pub fn cancel(&mut self) {
        if self.cancelled {
            return;
        }
        self.cancelled = true;

        self.timer.borrow_mut().take();
        if let Some(enter) = self.enter.take() {
            let _ = self
                .container
                .remove_event_listener_with_callback("mouseenter", enter.as_ref().unchecked_ref());
        }
        if let Some(leave) = self.leave.take() {
            let _ = self
                .container
                .remove_event_listener_with_callback("mouseleave", leave.as_ref().unchecked_ref());
        }
    }
}

impl Drop for Autoplay {
    fn drop(&mut self) {
        self.cancel();
    }
}
