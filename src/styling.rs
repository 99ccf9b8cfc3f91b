//! Configuration-driven theming.
//!
//! Visual properties become CSS custom properties written onto both the
//! container and the engine root (the engine renders its controls outside
//! the container's normal inheritance path, so both need the values), plus
//! one document-wide dynamic stylesheet for responsive frame widths.

use crate::config::*;
use crate::settings::SliderConfig;
use gloo_utils::document;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MutationObserver, MutationObserverInit};

/// The custom-property set derived from one configuration. The engine's
/// own theming variables are included so its arrows/dots pick the values
/// up without extra CSS.
pub fn custom_properties(config: &SliderConfig) -> Vec<(&'static str, String)> {
    vec![
        ("--fsc-transition-duration", format!("{}ms", config.transition_duration_ms)),
        ("--fsc-timing-function", config.timing_function.clone()),
        ("--fsc-frame-border-color", config.frame_style.border_color.clone()),
        ("--fsc-frame-border-width", format!("{}px", config.frame_style.border_width)),
        ("--fsc-frame-border-radius", format!("{}px", config.frame_style.border_radius)),
        ("--fsc-frame-shadow", config.frame_style.box_shadow.clone()),
        ("--fsc-arrow-background", config.arrow_style.background_color.clone()),
        ("--swiper-navigation-color", config.arrow_style.color.clone()),
        ("--swiper-navigation-size", format!("{}px", config.arrow_style.size)),
        ("--swiper-pagination-color", config.dot_style.color_active.clone()),
        (
            "--swiper-pagination-bullet-inactive-color",
            config.dot_style.color.clone(),
        ),
        ("--swiper-pagination-bullet-size", format!("{}px", config.dot_style.size)),
    ]
}

/// Writes the property set and re-applies it when frame nodes are mutated
/// at runtime.
pub struct StylingApplier {
    container: HtmlElement,
    root: HtmlElement,
    config: Rc<SliderConfig>,
    /// The container's inline style attribute before any property was
    /// written, restored verbatim by `clear`.
    saved_container_style: Option<String>,
    observer: Option<MutationObserver>,
    _observer_callback: Option<Closure<dyn FnMut(js_sys::Array, MutationObserver)>>,
}

impl StylingApplier {
    pub fn new(
        container: &HtmlElement,
        root: &HtmlElement,
        config: Rc<SliderConfig>,
    ) -> StylingApplier {
        let applier = StylingApplier {
            container: container.clone(),
            root: root.clone(),
            config,
            saved_container_style: container.get_attribute("style"),
            observer: None,
            _observer_callback: None,
        };
        applier.apply();
        applier
    }

    /// Push the full property set onto both style scopes. Idempotent.
    pub fn apply(&self) {
        for target in [&self.container, &self.root] {
            let style = target.style();
            for (property, value) in custom_properties(&self.config) {
                let _ = style.set_property(property, &value);
            }
        }
    }

    /// Watch the slide wrapper so late-inserted frame content receives the
    /// same treatment.
    pub fn watch(&mut self, wrapper: &HtmlElement) -> Result<(), JsValue> {
        let container = self.container.clone();
        let root = self.root.clone();
        let config = self.config.clone();
        let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
            move |_mutations: js_sys::Array, _observer: MutationObserver| {
                for target in [&container, &root] {
                    let style = target.style();
                    for (property, value) in custom_properties(&config) {
                        let _ = style.set_property(property, &value);
                    }
                }
            },
        );

        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
        let options = MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);
        observer.observe_with_options(wrapper, &options)?;

        self.observer = Some(observer);
        self._observer_callback = Some(callback);
        Ok(())
    }

    /// Stop watching. Idempotent.
    pub fn disconnect(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
        self._observer_callback = None;
    }

    /// Restore the container's inline style attribute to its pre-init
    /// state. The engine root is torn down wholesale, so it only needs the
    /// properties dropped.
    pub fn clear(&self) {
        match &self.saved_container_style {
            Some(style) => {
                let _ = self.container.set_attribute("style", style);
            }
            None => {
                let _ = self.container.remove_attribute("style");
            }
        }
        let root_style = self.root.style();
        for (property, _) in custom_properties(&self.config) {
            let _ = root_style.remove_property(property);
        }
    }
}

impl Drop for StylingApplier {
    fn drop(&mut self) {
        self.disconnect();
    }
}

// ── Dynamic stylesheet ────────────────────────────────────────────────────

/// Generate the responsive frame-width rules for all three tiers, keyed by
/// the container's slides-per-view data attributes, plus the fallback
/// stack and tab strip base rules.
pub fn dynamic_css(config: &SliderConfig) -> String {
    let mut css = String::new();

    let tiers: [(&str, Option<u32>, Option<u32>, u32); 3] = [
        ("desktop", Some(config.desktop.min_width_px), None, config.desktop.gap_px),
        (
            "tablet",
            Some(config.tablet.min_width_px),
            Some(config.desktop.min_width_px.saturating_sub(1)),
            config.tablet.gap_px,
        ),
        (
            "phone",
            None,
            Some(config.tablet.min_width_px.saturating_sub(1)),
            config.phone.gap_px,
        ),
    ];

    for (name, min_width, max_width, gap) in tiers {
        let media = match (min_width, max_width) {
            (Some(min), Some(max)) => format!("@media (min-width: {min}px) and (max-width: {max}px)"),
            (Some(min), None) => format!("@media (min-width: {min}px)"),
            (None, Some(max)) => format!("@media (max-width: {max}px)"),
            (None, None) => String::new(),
        };

        let mut rules = String::new();
        for count in 1..=MAX_SLIDES_PER_VIEW_RULES {
            let gaps = gap * (count - 1);
            rules.push_str(&format!(
                ".fsc-slider[data-slides-{name}=\"{count}\"] .fsc-frame {{ flex: 0 0 calc((100% - {gaps}px) / {count}); max-width: calc((100% - {gaps}px) / {count}); box-sizing: border-box; }}\n"
            ));
        }
        rules.push_str(&format!(
            ".fsc-slider .fsc-slider__frames {{ gap: {gap}px; }}\n"
        ));

        css.push_str(&format!("{media} {{\n{rules}}}\n"));
    }

    // Degraded mode: every slide visible in a plain stack.
    css.push_str(&format!(
        ".{FALLBACK_CLASS} .{WRAPPER_CLASS} {{ display: block; }}\n\
         .{FALLBACK_CLASS} .{SLIDE_CLASS} {{ width: 100%; margin-bottom: var(--fsc-gap, 10px); }}\n\
         .{TAB_STRIP_CLASS} {{ display: flex; flex-wrap: wrap; gap: 8px; margin: 8px 0; }}\n"
    ));

    css
}

/// Install (or replace) the document's single dynamic stylesheet. Only one
/// such node may exist; regeneration replaces it, never appends.
pub fn ensure_stylesheet(config: &SliderConfig) -> Result<(), JsValue> {
    let doc = document();
    if let Some(existing) = doc.get_element_by_id(DYNAMIC_STYLE_ID) {
        existing.remove();
    }

    let style: HtmlElement = doc.create_element("style")?.unchecked_into();
    style.set_id(DYNAMIC_STYLE_ID);
    style.set_text_content(Some(&dynamic_css(config)));

    let head = doc.head().ok_or_else(|| JsValue::from_str("document has no head"))?;
    head.append_child(&style)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SliderConfig;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> SliderConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SliderConfig::from_attributes(&map)
    }

    #[test]
    fn property_set_covers_both_theming_scopes() {
        let properties = custom_properties(&config(&[
            ("arrowColor", "#112233"),
            ("dotColorActive", "#445566"),
        ]));
        let find = |name: &str| {
            properties
                .iter()
                .find(|(property, _)| *property == name)
                .map(|(_, value)| value.clone())
        };
        assert_eq!(find("--swiper-navigation-color").as_deref(), Some("#112233"));
        assert_eq!(find("--swiper-pagination-color").as_deref(), Some("#445566"));
        assert!(find("--fsc-frame-border-radius").is_some());
    }

    #[test]
    fn timing_function_is_exported_verbatim() {
        let properties = custom_properties(&config(&[(
            "animationEasing",
            "cubic-bezier(0.165,0.840,0.440,1.000)",
        )]));
        assert!(properties
            .iter()
            .any(|(p, v)| *p == "--fsc-timing-function" && v == "cubic-bezier(0.165,0.840,0.440,1.000)"));
    }

    #[test]
    fn stylesheet_has_one_media_block_per_tier() {
        let css = dynamic_css(&config(&[]));
        assert!(css.contains("@media (min-width: 1140px)"));
        assert!(css.contains("@media (min-width: 1024px) and (max-width: 1139px)"));
        assert!(css.contains("@media (max-width: 1023px)"));
    }

    #[test]
    fn frame_width_rules_account_for_gaps() {
        let css = dynamic_css(&config(&[("gap", "30")]));
        // Three slides in view leave two 30px gaps.
        assert!(css.contains("[data-slides-desktop=\"3\"] .fsc-frame { flex: 0 0 calc((100% - 60px) / 3)"));
    }

    #[test]
    fn fallback_stack_rules_are_present() {
        let css = dynamic_css(&config(&[]));
        assert!(css.contains(".fsc-slider--fallback .swiper-wrapper { display: block; }"));
    }
}
