//! One live carousel: configuration, restructured DOM, mounted engine and
//! attached controls, torn down as a unit.

use crate::autoplay::Autoplay;
use crate::breakpoints::{self, viewport_width};
use crate::config::{MIN_FRAMES, READY_ATTR};
use crate::engine::{CarouselEngine, SharedEngine};
use crate::fallback::FallbackEngine;
use crate::settings::SliderConfig;
use crate::structure::{collect_frames, SliderStructure};
use crate::styling::{ensure_stylesheet, StylingApplier};
use crate::swiper::SwiperEngine;
use crate::tabs::TabStrip;
use log::{debug, info, warn};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, Node};

pub struct CarouselInstance {
    container: HtmlElement,
    structure: SliderStructure,
    engine: SharedEngine,
    tabs: Option<Rc<RefCell<TabStrip>>>,
    styling: StylingApplier,
    autoplay: Option<Autoplay>,
    resize_listener: Option<Closure<dyn FnMut()>>,
    destroyed: bool,
}

impl CarouselInstance {
    /// Mount a carousel on `container`. Returns `None` when the container
    /// is not eligible (already live, or fewer than 2 frames, which stay
    /// static) or when the DOM rejects the restructuring.
    pub fn mount(container: &HtmlElement) -> Option<CarouselInstance> {
        if container.has_attribute(READY_ATTR) {
            return None;
        }

        let frames = collect_frames(container);
        if frames.len() < MIN_FRAMES {
            debug!("skipping container with {} frame(s)", frames.len());
            return None;
        }

        let config = Rc::new(SliderConfig::from_attributes(&container.dataset()));

        let mut structure = match SliderStructure::build(container, &frames, &config) {
            Ok(structure) => structure,
            Err(err) => {
                warn!("could not restructure carousel container: {err:?}");
                return None;
            }
        };

        if let Err(err) = ensure_stylesheet(&config) {
            warn!("could not install dynamic stylesheet: {err:?}");
        }

        let mut styling = StylingApplier::new(container, structure.root(), config.clone());
        if let Err(err) = styling.watch(structure.wrapper()) {
            warn!("frame mutation watching unavailable: {err:?}");
        }

        let layout = breakpoints::resolve(&config, viewport_width());

        let (boxed_engine, real_engine): (Box<dyn CarouselEngine>, bool) =
            match SwiperEngine::mount(&structure, &config) {
                Ok(engine) => (Box::new(engine), true),
                Err(err) => {
                    warn!("engine init failed ({err}), using fallback slider");
                    match FallbackEngine::mount(&structure, &layout) {
                        Ok(engine) => (Box::new(engine), false),
                        Err(js_err) => {
                            warn!("fallback slider failed too: {js_err:?}");
                            styling.clear();
                            structure.teardown();
                            return None;
                        }
                    }
                }
            };
        let engine: SharedEngine = Rc::new(RefCell::new(boxed_engine));

        let tabs = if config.show_text_tabs {
            match TabStrip::build(&structure, &frames, config.clone(), engine.clone()) {
                Ok(strip) => {
                    let strip = Rc::new(RefCell::new(strip));
                    let subscriber = strip.clone();
                    engine
                        .borrow_mut()
                        .set_on_slide_change(Rc::new(move |index| {
                            subscriber.borrow().sync(index);
                        }));
                    Some(strip)
                }
                Err(err) => {
                    warn!("tab strip unavailable: {err:?}");
                    None
                }
            }
        } else {
            None
        };

        let autoplay = if config.autoplay.enabled && real_engine {
            match Autoplay::start(
                container,
                &engine,
                config.autoplay.delay_ms,
                config.autoplay.pause_on_hover,
            ) {
                Ok(autoplay) => Some(autoplay),
                Err(err) => {
                    warn!("autoplay unavailable: {err:?}");
                    None
                }
            }
        } else {
            None
        };

        let resize_listener = {
            let config = config.clone();
            let engine = engine.clone();
            let tabs = tabs.clone();
            let last_tier = Cell::new(layout.tier);
            let closure = Closure::<dyn FnMut()>::new(move || {
                let layout = breakpoints::resolve(&config, viewport_width());
                if layout.tier == last_tier.replace(layout.tier) {
                    return;
                }
                engine.borrow_mut().relayout(&layout);
                let current = engine.borrow().current_index();
                if let Some(tabs) = &tabs {
                    tabs.borrow().sync(current);
                }
            });
            match gloo_utils::window()
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            {
                Ok(()) => Some(closure),
                Err(err) => {
                    warn!("resize handling unavailable: {err:?}");
                    None
                }
            }
        };

        if container.set_attribute(READY_ATTR, "true").is_err() {
            debug!("could not mark container as initialized");
        }

        info!(
            "carousel mounted: {} frames, {} effect, {} engine",
            frames.len(),
            config.effect.as_str(),
            if real_engine { "primary" } else { "fallback" }
        );

        Some(CarouselInstance {
            container: container.clone(),
            structure,
            engine,
            tabs,
            styling,
            autoplay,
            resize_listener,
            destroyed: false,
        })
    }

    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    /// True when `node` is the container or an ancestor of it; used by the
    /// lifecycle observer to map removed subtrees to instances.
    pub fn is_within(&self, node: &Node) -> bool {
        node.contains(Some(self.container.as_ref()))
    }

    /// Stop timers, detach every listener and observer, tear the engine
    /// down and restore the container's original DOM. Idempotent, and safe
    /// to call while a transition is in flight.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;

        if let Some(mut autoplay) = self.autoplay.take() {
            autoplay.cancel();
        }
        if let Some(listener) = self.resize_listener.take() {
            let _ = gloo_utils::window()
                .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
        }
        if let Some(tabs) = self.tabs.take() {
            tabs.borrow_mut().remove();
        }
        self.styling.disconnect();
        self.styling.clear();
        self.engine.borrow_mut().destroy();
        self.structure.teardown();
        let _ = self.container.remove_attribute(READY_ATTR);

        info!("carousel destroyed");
    }
}

impl Drop for CarouselInstance {
    fn drop(&mut self) {
        self.destroy();
    }
}
