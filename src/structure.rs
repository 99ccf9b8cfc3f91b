//! DOM restructuring: turns the rendered frame list into the slide tree
//! the engine needs, and restores the original markup on teardown.

use crate::config::*;
use crate::settings::SliderConfig;
use gloo_utils::document;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{Element, HtmlElement, NodeList};

/// Collect the container's frame elements in document order.
pub fn collect_frames(container: &Element) -> Vec<HtmlElement> {
    match container.query_selector_all(FRAME_SELECTOR) {
        Ok(list) => node_list_elements(&list),
        Err(_) => Vec::new(),
    }
}

fn node_list_elements(list: &NodeList) -> Vec<HtmlElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// The injected slide tree plus everything needed to undo it exactly.
pub struct SliderStructure {
    container: HtmlElement,
    root: HtmlElement,
    wrapper: HtmlElement,
    slides: Vec<HtmlElement>,
    prev_button: Option<HtmlElement>,
    next_button: Option<HtmlElement>,
    pagination: Option<HtmlElement>,
    /// Original frames with their pre-init inline style attribute.
    hidden_frames: Vec<(HtmlElement, Option<String>)>,
    torn_down: bool,
}

impl SliderStructure {
    /// Build the engine skeleton inside `container`: a root holding one
    /// slide per frame (deep clone, original order), the originals hidden
    /// but kept in place, plus arrow/dot placeholders per configuration.
    pub fn build(
        container: &HtmlElement,
        frames: &[HtmlElement],
        config: &SliderConfig,
    ) -> Result<SliderStructure, JsValue> {
        let doc = document();

        let root: HtmlElement = doc.create_element("div")?.unchecked_into();
        root.set_class_name(ENGINE_ROOT_CLASS);

        let wrapper: HtmlElement = doc.create_element("div")?.unchecked_into();
        wrapper.set_class_name(WRAPPER_CLASS);
        root.append_child(&wrapper)?;

        let mut slides = Vec::with_capacity(frames.len());
        let mut hidden_frames = Vec::with_capacity(frames.len());

        for frame in frames {
            let slide: HtmlElement = doc.create_element("div")?.unchecked_into();
            slide.set_class_name(SLIDE_CLASS);
            let clone = frame.clone_node_with_deep(true)?;
            slide.append_child(&clone)?;
            wrapper.append_child(&slide)?;
            slides.push(slide);

            let saved_style = frame.get_attribute("style");
            frame.style().set_property("display", "none")?;
            hidden_frames.push((frame.clone(), saved_style));
        }

        let mut prev_button = None;
        let mut next_button = None;
        if config.show_arrows {
            let prev: HtmlElement = doc.create_element("div")?.unchecked_into();
            prev.set_class_name(PREV_BUTTON_CLASS);
            prev.set_attribute("role", "button")?;
            prev.set_attribute("aria-label", "Previous slide")?;
            root.append_child(&prev)?;
            prev_button = Some(prev);

            let next: HtmlElement = doc.create_element("div")?.unchecked_into();
            next.set_class_name(NEXT_BUTTON_CLASS);
            next.set_attribute("role", "button")?;
            next.set_attribute("aria-label", "Next slide")?;
            root.append_child(&next)?;
            next_button = Some(next);
        }

        let mut pagination = None;
        if config.show_dots {
            let dots: HtmlElement = doc.create_element("div")?.unchecked_into();
            dots.set_class_name(PAGINATION_CLASS);
            root.append_child(&dots)?;
            pagination = Some(dots);
        }

        container.append_child(&root)?;

        Ok(SliderStructure {
            container: container.clone(),
            root,
            wrapper,
            slides,
            prev_button,
            next_button,
            pagination,
            hidden_frames,
            torn_down: false,
        })
    }

    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    pub fn root(&self) -> &HtmlElement {
        &self.root
    }

    pub fn wrapper(&self) -> &HtmlElement {
        &self.wrapper
    }

    pub fn slides(&self) -> &[HtmlElement] {
        &self.slides
    }

    pub fn prev_button(&self) -> Option<&HtmlElement> {
        self.prev_button.as_ref()
    }

    pub fn next_button(&self) -> Option<&HtmlElement> {
        self.next_button.as_ref()
    }

    pub fn pagination(&self) -> Option<&HtmlElement> {
        self.pagination.as_ref()
    }

    /// Remove every injected element and restore the original frames to
    /// their exact pre-init state. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        self.root.remove();

        for (frame, saved_style) in &self.hidden_frames {
            match saved_style {
                Some(style) => {
                    let _ = frame.set_attribute("style", style);
                }
                None => {
                    let _ = frame.remove_attribute("style");
                }
            }
        }
    }
}
