//! Binding and adapter for the Swiper animation engine.
//!
//! The engine is a page-level script; the binding goes through a
//! `wasm_bindgen` extern block against the `Swiper` global, with `catch`
//! on the constructor so a throw surfaces as a recoverable error instead
//! of an aborted instance.

use crate::breakpoints::ActiveLayout;
use crate::config::MIN_FRAMES;
use crate::engine::{CarouselEngine, EngineInitError};
use crate::settings::{Effect, EffectDirection, SliderConfig};
use crate::structure::SliderStructure;
use log::debug;
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    /// The engine's instance type; only the API surface the adapter needs.
    #[derive(Clone)]
    pub type Swiper;

    #[wasm_bindgen(catch, constructor, js_class = "Swiper")]
    fn new(element: &Element, options: &JsValue) -> Result<Swiper, JsValue>;

    #[wasm_bindgen(method, js_name = slideNext)]
    fn slide_next(this: &Swiper);

    #[wasm_bindgen(method, js_name = slidePrev)]
    fn slide_prev(this: &Swiper);

    #[wasm_bindgen(method, js_name = slideTo)]
    fn slide_to(this: &Swiper, index: u32);

    #[wasm_bindgen(method, js_name = slideToLoop)]
    fn slide_to_loop(this: &Swiper, index: u32);

    #[wasm_bindgen(method, getter, js_name = realIndex)]
    fn real_index(this: &Swiper) -> u32;

    #[wasm_bindgen(method)]
    fn on(this: &Swiper, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method, js_name = destroy)]
    fn destroy_instance(this: &Swiper, delete_instance: bool, cleanup_styles: bool);
}

fn engine_global_present() -> bool {
    js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("Swiper"))
        .map(|v| v.is_function())
        .unwrap_or(false)
}

// ── Native options tree ───────────────────────────────────────────────────
// Serialized with the JSON-compatible serializer so maps land as plain
// objects. Element-bearing blocks (navigation, pagination) are attached
// afterwards via Reflect, since live nodes cannot pass through serde.

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SwiperOptions {
    direction: &'static str,
    speed: u32,
    #[serde(rename = "loop")]
    looping: bool,
    slides_per_view: f32,
    slides_per_group: u32,
    space_between: u32,
    slides_offset_before: u32,
    slides_offset_after: u32,
    centered_slides: bool,
    effect: &'static str,
    allow_touch_move: bool,
    touch_ratio: f32,
    keyboard: KeyboardOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    grid: Option<GridOptions>,
    breakpoints: BTreeMap<u32, BreakpointOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fade_effect: Option<FadeEffectOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    flip_effect: Option<FlipEffectOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coverflow_effect: Option<CoverflowEffectOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cube_effect: Option<CubeEffectOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    creative_effect: Option<CreativeEffectOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cards_effect: Option<CardsEffectOptions>,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct KeyboardOptions {
    enabled: bool,
    only_in_viewport: bool,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct GridOptions {
    rows: u32,
    fill: &'static str,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct BreakpointOptions {
    slides_per_view: f32,
    slides_per_group: u32,
    space_between: u32,
    slides_offset_before: u32,
    slides_offset_after: u32,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct FadeEffectOptions {
    cross_fade: bool,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct FlipEffectOptions {
    slide_shadows: bool,
    limit_rotation: bool,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct CoverflowEffectOptions {
    rotate: f32,
    stretch: f32,
    depth: f32,
    modifier: f32,
    slide_shadows: bool,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct CubeEffectOptions {
    slide_shadows: bool,
    shadow: bool,
    shadow_offset: f32,
    shadow_scale: f32,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct CreativeEffectOptions {
    prev: CreativeTransform,
    next: CreativeTransform,
}

#[derive(Serialize, Debug, PartialEq)]
struct CreativeTransform {
    translate: (&'static str, i32, i32),
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct CardsEffectOptions {
    slide_shadows: bool,
    rotate: bool,
}

/// Translate the typed configuration into the engine's native options.
/// The phone tier is the base; tablet and desktop enter through the
/// native breakpoints map keyed by their min-widths. Exactly one
/// effect-specific block is populated.
pub fn build_options(config: &SliderConfig) -> SwiperOptions {
    let tier_options = |tier: &crate::settings::BreakpointSettings| BreakpointOptions {
        slides_per_view: tier.slides_per_view,
        slides_per_group: tier.slides_per_scroll,
        space_between: tier.gap_px,
        slides_offset_before: tier.inner_padding_px,
        slides_offset_after: tier.inner_padding_px,
    };

    let mut breakpoints = BTreeMap::new();
    breakpoints.insert(config.tablet.min_width_px, tier_options(&config.tablet));
    breakpoints.insert(config.desktop.min_width_px, tier_options(&config.desktop));

    let direction = match config.effect {
        Effect::Slide => config.effect_direction.as_str(),
        _ => EffectDirection::Horizontal.as_str(),
    };

    SwiperOptions {
        direction,
        speed: config.transition_duration_ms,
        looping: config.loop_enabled(),
        slides_per_view: config.phone.slides_per_view,
        slides_per_group: config.phone.slides_per_scroll,
        space_between: config.phone.gap_px,
        slides_offset_before: config.phone.inner_padding_px,
        slides_offset_after: config.phone.inner_padding_px,
        centered_slides: config.centered_slides,
        effect: config.effect.as_str(),
        allow_touch_move: config.touch.enabled,
        touch_ratio: config.touch.drag_sensitivity,
        keyboard: KeyboardOptions {
            enabled: config.keyboard_enabled,
            only_in_viewport: true,
        },
        grid: (config.grid.rows > 1).then(|| GridOptions {
            rows: config.grid.rows,
            fill: config.grid.fill.as_str(),
        }),
        breakpoints,
        fade_effect: (config.effect == Effect::Fade).then(|| FadeEffectOptions { cross_fade: true }),
        flip_effect: (config.effect == Effect::Flip).then(|| FlipEffectOptions {
            slide_shadows: false,
            limit_rotation: true,
        }),
        coverflow_effect: (config.effect == Effect::Coverflow).then(|| CoverflowEffectOptions {
            rotate: 50.0,
            stretch: 0.0,
            depth: 100.0,
            modifier: 1.0,
            slide_shadows: true,
        }),
        cube_effect: (config.effect == Effect::Cube).then(|| CubeEffectOptions {
            slide_shadows: true,
            shadow: true,
            shadow_offset: 20.0,
            shadow_scale: 0.94,
        }),
        creative_effect: (config.effect == Effect::Creative).then(|| CreativeEffectOptions {
            prev: CreativeTransform {
                translate: ("-120%", 0, -500),
            },
            next: CreativeTransform {
                translate: ("120%", 0, -500),
            },
        }),
        cards_effect: (config.effect == Effect::Cards).then(|| CardsEffectOptions {
            slide_shadows: true,
            rotate: true,
        }),
    }
}

fn options_js(config: &SliderConfig, structure: &SliderStructure) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let options = build_options(config)
        .serialize(&serializer)
        .map_err(JsValue::from)?;

    if let (Some(prev), Some(next)) = (structure.prev_button(), structure.next_button()) {
        let nav = js_sys::Object::new();
        js_sys::Reflect::set(&nav, &"prevEl".into(), prev.as_ref())?;
        js_sys::Reflect::set(&nav, &"nextEl".into(), next.as_ref())?;
        js_sys::Reflect::set(&options, &"navigation".into(), &nav)?;
    }

    if let Some(dots) = structure.pagination() {
        let pagination = js_sys::Object::new();
        js_sys::Reflect::set(&pagination, &"el".into(), dots.as_ref())?;
        js_sys::Reflect::set(&pagination, &"clickable".into(), &JsValue::TRUE)?;
        js_sys::Reflect::set(&options, &"pagination".into(), &pagination)?;
    }

    Ok(options)
}

/// Adapter owning the engine instance and its event closures.
pub struct SwiperEngine {
    swiper: Option<Swiper>,
    looping: bool,
    in_flight: Rc<Cell<bool>>,
    last_index: Rc<Cell<usize>>,
    callbacks: Rc<RefCell<Vec<Rc<dyn Fn(usize)>>>>,
    _on_transition_start: Closure<dyn FnMut()>,
    _on_transition_end: Closure<dyn FnMut()>,
}

impl SwiperEngine {
    /// Construct the engine on the built structure. Any failure here is
    /// recoverable by the caller (fallback slider).
    pub fn mount(
        structure: &SliderStructure,
        config: &SliderConfig,
    ) -> Result<SwiperEngine, EngineInitError> {
        if structure.slides().len() < MIN_FRAMES {
            return Err(EngineInitError::TooFewFrames(structure.slides().len()));
        }
        if !engine_global_present() {
            return Err(EngineInitError::MissingDependency);
        }

        let options = options_js(config, structure)
            .map_err(|err| EngineInitError::ConstructionFailed(describe(&err)))?;

        let swiper = Swiper::new(structure.root(), &options)
            .map_err(|err| EngineInitError::ConstructionFailed(describe(&err)))?;

        let in_flight = Rc::new(Cell::new(false));
        let last_index = Rc::new(Cell::new(0_usize));
        let callbacks: Rc<RefCell<Vec<Rc<dyn Fn(usize)>>>> = Rc::new(RefCell::new(Vec::new()));

        // The engine resets per-slide transition CSS, so the configured
        // timing function is pushed back on every transition start.
        let on_transition_start = {
            let in_flight = in_flight.clone();
            let wrapper = structure.wrapper().clone();
            let timing_function = config.timing_function.clone();
            Closure::<dyn FnMut()>::new(move || {
                in_flight.set(true);
                let _ = wrapper
                    .style()
                    .set_property("transition-timing-function", &timing_function);
            })
        };

        let on_transition_end = {
            let in_flight = in_flight.clone();
            let last_index = last_index.clone();
            let callbacks = callbacks.clone();
            let swiper = swiper.clone();
            Closure::<dyn FnMut()>::new(move || {
                in_flight.set(false);
                let index = swiper.real_index() as usize;
                last_index.set(index);
                debug!("transition settled at index {index}");
                for callback in callbacks.borrow().iter() {
                    callback(index);
                }
            })
        };

        swiper.on(
            "slideChangeTransitionStart",
            on_transition_start.as_ref().unchecked_ref(),
        );
        swiper.on(
            "slideChangeTransitionEnd",
            on_transition_end.as_ref().unchecked_ref(),
        );

        let _ = structure
            .wrapper()
            .style()
            .set_property("transition-timing-function", &config.timing_function);

        Ok(SwiperEngine {
            swiper: Some(swiper),
            looping: config.loop_enabled(),
            in_flight,
            last_index,
            callbacks,
            _on_transition_start: on_transition_start,
            _on_transition_end: on_transition_end,
        })
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

impl CarouselEngine for SwiperEngine {
    fn next(&mut self) {
        if self.in_flight.get() {
            return;
        }
        if let Some(swiper) = &self.swiper {
            swiper.slide_next();
        }
    }

    fn previous(&mut self) {
        if self.in_flight.get() {
            return;
        }
        if let Some(swiper) = &self.swiper {
            swiper.slide_prev();
        }
    }

    fn go_to(&mut self, index: usize) {
        if self.in_flight.get() {
            return;
        }
        if let Some(swiper) = &self.swiper {
            if self.looping {
                swiper.slide_to_loop(index as u32);
            } else {
                swiper.slide_to(index as u32);
            }
        }
    }

    fn current_index(&self) -> usize {
        self.last_index.get()
    }

    fn set_on_slide_change(&mut self, callback: Rc<dyn Fn(usize)>) {
        self.callbacks.borrow_mut().push(callback);
    }

    fn relayout(&mut self, _layout: &ActiveLayout) {
        // The engine's native breakpoints already re-resolve geometry.
    }

    fn destroy(&mut self) {
        if let Some(swiper) = self.swiper.take() {
            swiper.destroy_instance(true, true);
        }
        self.in_flight.set(false);
    }
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

    fn effect_block_count(options: &SwiperOptions) -> usize {
        [
            options.fade_effect.is_some(),
            options.flip_effect.is_some(),
            options.coverflow_effect.is_some(),
            options.cube_effect.is_some(),
            options.creative_effect.is_some(),
            options.cards_effect.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    #[test]
    fn slide_effect_has_no_effect_block() {
        let options = build_options(&config(&[]));
        assert_eq!(options.effect, "slide");
        assert_eq!(effect_block_count(&options), 0);
    }

    #[test]
    fn exactly_one_effect_block_per_effect() {
        for effect in ["fade", "flip", "coverflow", "creative", "cube", "cards"] {
            let options = build_options(&config(&[("effect", effect)]));
            assert_eq!(options.effect, effect);
            assert_eq!(effect_block_count(&options), 1, "effect {effect}");
        }
    }

    #[test]
    fn breakpoints_are_keyed_by_min_width() {
        let options = build_options(&config(&[
            ("slidesDesktop", "3"),
            ("slidesTablet", "2"),
            ("slidesPhone", "1"),
        ]));
        // Base options describe the phone tier.
        assert_eq!(options.slides_per_view, 1.0);
        assert_eq!(options.breakpoints[&1024].slides_per_view, 2.0);
        assert_eq!(options.breakpoints[&1140].slides_per_view, 3.0);
    }

    #[test]
    fn carousel_mode_turns_on_loop() {
        assert!(build_options(&config(&[("mode", "carousel")])).looping);
        assert!(!build_options(&config(&[])).looping);
    }

    #[test]
    fn vertical_direction_applies_only_to_slide() {
        let options = build_options(&config(&[("effectDirection", "vertical")]));
        assert_eq!(options.direction, "vertical");
        let options = build_options(&config(&[
            ("effect", "cube"),
            ("effectDirection", "vertical"),
        ]));
        assert_eq!(options.direction, "horizontal");
    }

    #[test]
    fn grid_block_only_with_multiple_rows() {
        assert!(build_options(&config(&[])).grid.is_none());
        let options = build_options(&config(&[("gridRows", "2"), ("gridFill", "column")]));
        let grid = options.grid.expect("grid block");
        assert_eq!(grid.rows, 2);
        assert_eq!(grid.fill, "column");
    }

    #[test]
    fn touch_and_keyboard_flow_through() {
        let options = build_options(&config(&[
            ("touchSwipe", "false"),
            ("touchRatio", "0.5"),
            ("keyboard", "false"),
        ]));
        assert!(!options.allow_touch_move);
        assert_eq!(options.touch_ratio, 0.5);
        assert!(!options.keyboard.enabled);
    }
}