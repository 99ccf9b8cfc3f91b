//! Degraded slider used when the animation engine cannot be mounted.
//!
//! All frames render as a plain stack; prev/next and dot controls drive
//! the same index arithmetic as the primary engine, with no animation, no
//! loop and no autoplay. Transitions complete synchronously, so there is
//! no in-flight window to guard.

use crate::breakpoints::ActiveLayout;
use crate::config::*;
use crate::engine::CarouselEngine;
use crate::navigation::NavigationState;
use crate::structure::SliderStructure;
use gloo_utils::document;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

struct FallbackView {
    slides: Vec<HtmlElement>,
    dots: Vec<HtmlElement>,
    callbacks: RefCell<Vec<Rc<dyn Fn(usize)>>>,
}

impl FallbackView {
    /// Reflect the navigation state in the DOM without announcing it.
    fn render(&self, nav: &NavigationState) {
        let (start, end) = nav.visible_range();
        for (i, slide) in self.slides.iter().enumerate() {
            let visible = i >= start && i <= end;
            let _ = slide.class_list().toggle_with_force(SLIDE_ACTIVE_CLASS, visible);
        }
        for (i, dot) in self.dots.iter().enumerate() {
            let _ = dot
                .class_list()
                .toggle_with_force(FALLBACK_DOT_ACTIVE_CLASS, i == nav.current());
        }
    }

    /// A confirmed transition: update the DOM, bring the slide into view,
    /// notify subscribers.
    fn settle(&self, nav: &NavigationState) {
        self.render(nav);
        if let Some(slide) = self.slides.get(nav.current()) {
            slide.scroll_into_view_with_bool(true);
        }
        for callback in self.callbacks.borrow().iter() {
            callback(nav.current());
        }
    }
}

pub struct FallbackEngine {
    root: HtmlElement,
    nav: Rc<RefCell<NavigationState>>,
    view: Rc<FallbackView>,
    listeners: Vec<(HtmlElement, &'static str, Closure<dyn FnMut()>)>,
    destroyed: bool,
}

impl FallbackEngine {
    pub fn mount(
        structure: &SliderStructure,
        layout: &ActiveLayout,
    ) -> Result<FallbackEngine, JsValue> {
        let root = structure.root().clone();
        root.class_list().add_1(FALLBACK_CLASS)?;

        let mut dots = Vec::new();
        if let Some(pagination) = structure.pagination() {
            for _ in 0..structure.slides().len() {
                let dot: HtmlElement = document().create_element("button")?.unchecked_into();
                dot.set_class_name(FALLBACK_DOT_CLASS);
                dot.set_attribute("type", "button")?;
                pagination.append_child(&dot)?;
                dots.push(dot);
            }
        }

        // Degraded mode never loops, whatever the configuration says.
        let nav = Rc::new(RefCell::new(NavigationState::new(
            structure.slides().len(),
            layout.slides_per_view,
            layout.slides_per_scroll as usize,
            false,
        )));
        let view = Rc::new(FallbackView {
            slides: structure.slides().to_vec(),
            dots,
            callbacks: RefCell::new(Vec::new()),
        });
        view.render(&nav.borrow());

        let mut engine = FallbackEngine {
            root,
            nav,
            view,
            listeners: Vec::new(),
            destroyed: false,
        };
        engine.bind_controls(structure)?;
        Ok(engine)
    }

    fn bind_controls(&mut self, structure: &SliderStructure) -> Result<(), JsValue> {
        if let Some(prev) = structure.prev_button() {
            let nav = self.nav.clone();
            let view = self.view.clone();
            self.listen(prev, "click", move || {
                let confirmed = nav.borrow_mut().previous();
                if confirmed.is_some() {
                    view.settle(&nav.borrow());
                }
            })?;
        }
        if let Some(next) = structure.next_button() {
            let nav = self.nav.clone();
            let view = self.view.clone();
            self.listen(next, "click", move || {
                let confirmed = nav.borrow_mut().next();
                if confirmed.is_some() {
                    view.settle(&nav.borrow());
                }
            })?;
        }
        for (index, dot) in self.view.dots.clone().into_iter().enumerate() {
            let nav = self.nav.clone();
            let view = self.view.clone();
            self.listen(&dot, "click", move || {
                let confirmed = nav.borrow_mut().go_to(index);
                if confirmed.is_some() {
                    view.settle(&nav.borrow());
                }
            })?;
        }
        Ok(())
    }

    fn listen(
        &mut self,
        target: &HtmlElement,
        event: &'static str,
        handler: impl FnMut() + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut()>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        self.listeners.push((target.clone(), event, closure));
        Ok(())
    }
}

impl CarouselEngine for FallbackEngine {
    fn next(&mut self) {
        if self.destroyed {
            return;
        }
        let confirmed = self.nav.borrow_mut().next();
        if confirmed.is_some() {
            self.view.settle(&self.nav.borrow());
        }
    }

    fn previous(&mut self) {
        if self.destroyed {
            return;
        }
        let confirmed = self.nav.borrow_mut().previous();
        if confirmed.is_some() {
            self.view.settle(&self.nav.borrow());
        }
    }

    fn go_to(&mut self, index: usize) {
        if self.destroyed {
            return;
        }
        let confirmed = self.nav.borrow_mut().go_to(index);
        if confirmed.is_some() {
            self.view.settle(&self.nav.borrow());
        }
    }

    fn current_index(&self) -> usize {
        self.nav.borrow().current()
    }

    fn set_on_slide_change(&mut self, callback: Rc<dyn Fn(usize)>) {
        self.view.callbacks.borrow_mut().push(callback);
    }

    fn relayout(&mut self, layout: &ActiveLayout) {
        if self.destroyed {
            return;
        }
        self.nav
            .borrow_mut()
            .relayout(layout.slides_per_view, layout.slides_per_scroll as usize);
        self.view.render(&self.nav.borrow());
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;

        for (target, event, closure) in self.listeners.drain(..) {
            let _ = target
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
        for dot in &self.view.dots {
            dot.remove();
        }
        let _ = self.root.class_list().remove_1(FALLBACK_CLASS);
    }
}
