//! Text-tab navigation: an auxiliary label strip synchronized with the
//! engine's slide-change signal.

use crate::breakpoints::{self, viewport_width};
use crate::config::*;
use crate::engine::SharedEngine;
use crate::navigation::visible_range;
use crate::settings::{SliderConfig, TabPosition, TabStyle};
use crate::structure::SliderStructure;
use gloo_utils::document;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Resolve a frame's tab label: explicit title attribute, else the first
/// heading, else the first image's alt text, else a numbered default.
pub fn resolve_title(frame: &HtmlElement, index: usize) -> String {
    if let Some(title) = frame.get_attribute(FRAME_TITLE_ATTR) {
        let trimmed = title.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    if let Ok(Some(heading)) = frame.query_selector("h1,h2,h3,h4,h5,h6") {
        if let Some(text) = heading.text_content() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }
    if let Ok(Some(image)) = frame.query_selector("img[alt]") {
        if let Some(alt) = image.get_attribute("alt") {
            let trimmed = alt.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }
    format!("Frame {}", index + 1)
}

pub struct TabStrip {
    strip: HtmlElement,
    buttons: Vec<HtmlElement>,
    config: Rc<SliderConfig>,
    frame_count: usize,
    click_listeners: Vec<(HtmlElement, Closure<dyn FnMut()>)>,
    removed: Cell<bool>,
}

impl TabStrip {
    /// Build one tab per frame and insert the strip above or below the
    /// engine root per configuration.
    pub fn build(
        structure: &SliderStructure,
        frames: &[HtmlElement],
        config: Rc<SliderConfig>,
        engine: SharedEngine,
    ) -> Result<TabStrip, JsValue> {
        let doc = document();
        let strip: HtmlElement = doc.create_element("div")?.unchecked_into();
        strip.set_class_name(TAB_STRIP_CLASS);

        let mut buttons = Vec::with_capacity(frames.len());
        let mut click_listeners = Vec::with_capacity(frames.len());

        for (index, frame) in frames.iter().enumerate() {
            let tab: HtmlElement = doc.create_element("button")?.unchecked_into();
            tab.set_class_name(TAB_CLASS);
            tab.set_attribute("type", "button")?;
            tab.set_text_content(Some(&resolve_title(frame, index)));
            apply_tab_style(&tab, &config.tab_style, false)?;

            let closure = {
                let engine = engine.clone();
                Closure::<dyn FnMut()>::new(move || {
                    engine.borrow_mut().go_to(index);
                })
            };
            tab.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;

            strip.append_child(&tab)?;
            click_listeners.push((tab.clone(), closure));
            buttons.push(tab);
        }

        let position = match config.tab_position {
            TabPosition::Above => "beforebegin",
            TabPosition::Below => "afterend",
        };
        structure.root().insert_adjacent_element(position, &strip)?;

        let tabs = TabStrip {
            strip,
            buttons,
            config,
            frame_count: frames.len(),
            click_listeners,
            removed: Cell::new(false),
        };
        tabs.sync(0);
        Ok(tabs)
    }

    /// Re-mark the tabs for a confirmed index. One pass over all buttons,
    /// so a previous highlight can never survive alongside the new one.
    pub fn sync(&self, current_index: usize) {
        if self.removed.get() {
            return;
        }
        let layout = breakpoints::resolve(&self.config, viewport_width());
        let (start, end) = visible_range(current_index, layout.slides_per_view, self.frame_count);

        for (i, tab) in self.buttons.iter().enumerate() {
            let active = i >= start && i <= end;
            let _ = tab.class_list().toggle_with_force(TAB_ACTIVE_CLASS, active);
            let _ = apply_tab_style(tab, &self.config.tab_style, active);
        }
    }

    /// Detach listeners and remove the strip. Idempotent.
    pub fn remove(&mut self) {
        if self.removed.replace(true) {
            return;
        }
        for (tab, closure) in self.click_listeners.drain(..) {
            let _ = tab.remove_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        }
        self.strip.remove();
    }
}

fn apply_tab_style(tab: &HtmlElement, style: &TabStyle, active: bool) -> Result<(), JsValue> {
    let css = tab.style();
    css.set_property("font-size", &format!("{}px", style.font_size))?;
    css.set_property("font-weight", &style.font_weight)?;
    css.set_property("text-align", &style.text_align)?;
    css.set_property("padding", &format!("{}px", style.padding))?;
    css.set_property("border-radius", &format!("{}px", style.border_radius))?;
    css.set_property("border-width", &format!("{}px", style.border_width))?;
    css.set_property("border-style", "solid")?;
    if active {
        css.set_property("color", &style.text_color_active)?;
        css.set_property("background-color", &style.background_color_active)?;
        css.set_property("border-color", &style.border_color_active)?;
        css.set_property("box-shadow", &style.box_shadow_active)?;
    } else {
        css.set_property("color", &style.text_color)?;
        css.set_property("background-color", &style.background_color)?;
        css.set_property("border-color", &style.border_color)?;
        css.set_property("box-shadow", &style.box_shadow)?;
    }
    Ok(())
}
