//! Browser-side tests for the DOM-bound components. These need a real DOM
//! and run under `wasm-pack test`; on other targets the file is empty.

#![cfg(target_arch = "wasm32")]

use flex_carousel::breakpoints::ActiveLayout;
use flex_carousel::breakpoints::Tier;
use flex_carousel::engine::CarouselEngine;
use flex_carousel::fallback::FallbackEngine;
use flex_carousel::instance::CarouselInstance;
use flex_carousel::settings::SliderConfig;
use flex_carousel::structure::{collect_frames, SliderStructure};
use flex_carousel::styling::ensure_stylesheet;
use flex_carousel::tabs::resolve_title;
use std::collections::HashMap;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn config(pairs: &[(&str, &str)]) -> SliderConfig {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    SliderConfig::from_attributes(&map)
}

fn container_with_frames(frame_html: &[&str]) -> HtmlElement {
    let container: HtmlElement = document().create_element("div").unwrap().unchecked_into();
    container.set_class_name("fsc-slider");
    for html in frame_html {
        let frame: HtmlElement = document().create_element("div").unwrap().unchecked_into();
        frame.set_class_name("fsc-frame");
        frame.set_inner_html(html);
        container.append_child(&frame).unwrap();
    }
    document().body().unwrap().append_child(&container).unwrap();
    container
}

fn plain_frames(count: usize) -> Vec<&'static str> {
    (0..count).map(|_| "<p>content</p>").collect()
}

fn layout() -> ActiveLayout {
    ActiveLayout {
        tier: Tier::Phone,
        slides_per_view: 1.0,
        slides_per_scroll: 1,
        gap_px: 10,
        inner_padding_px: 0,
    }
}

#[wasm_bindgen_test]
fn build_then_teardown_restores_dom_exactly() {
    let container = container_with_frames(&plain_frames(3));
    let before = container.outer_html();

    let frames = collect_frames(&container);
    let mut structure = SliderStructure::build(&container, &frames, &config(&[])).unwrap();
    assert_ne!(container.outer_html(), before);

    structure.teardown();
    assert_eq!(container.outer_html(), before);
    container.remove();
}

#[wasm_bindgen_test]
fn teardown_twice_is_a_noop() {
    let container = container_with_frames(&plain_frames(2));
    let frames = collect_frames(&container);
    let mut structure = SliderStructure::build(&container, &frames, &config(&[])).unwrap();
    structure.teardown();
    let after_first = container.outer_html();
    structure.teardown();
    assert_eq!(container.outer_html(), after_first);
    container.remove();
}

#[wasm_bindgen_test]
fn frames_keep_their_order_and_content() {
    let container = container_with_frames(&[
        "<h2>First</h2><img src='a.png' alt='one' data-kind='x'>",
        "<h2>Second</h2>",
        "<h2>Third</h2>",
    ]);
    let frames = collect_frames(&container);
    let structure = SliderStructure::build(&container, &frames, &config(&[])).unwrap();

    let slides = structure.slides();
    assert_eq!(slides.len(), 3);
    assert!(slides[0].inner_html().contains("First"));
    assert!(slides[0].inner_html().contains("data-kind=\"x\""));
    assert!(slides[1].inner_html().contains("Second"));
    assert!(slides[2].inner_html().contains("Third"));

    // Originals are hidden, not removed.
    for frame in &frames {
        assert_eq!(frame.style().get_property_value("display").unwrap(), "none");
    }
    container.remove();
}

#[wasm_bindgen_test]
fn single_frame_container_stays_static() {
    let container = container_with_frames(&plain_frames(1));
    let before = container.outer_html();
    assert!(CarouselInstance::mount(&container).is_none());
    assert_eq!(container.outer_html(), before);
    container.remove();
}

#[wasm_bindgen_test]
fn mount_without_engine_uses_fallback_and_destroy_restores() {
    // No Swiper global is loaded in the test page, so the mount must
    // recover through the fallback slider.
    let container = container_with_frames(&plain_frames(3));
    let before = container.outer_html();

    let mut instance = CarouselInstance::mount(&container).expect("instance");
    assert!(container.has_attribute("data-fsc-ready"));

    instance.destroy();
    assert_eq!(container.outer_html(), before);

    // Second destroy is observably a no-op.
    instance.destroy();
    assert_eq!(container.outer_html(), before);
    container.remove();
}

#[wasm_bindgen_test]
fn fallback_navigation_clamps_like_the_primary_engine() {
    let container = container_with_frames(&plain_frames(3));
    let frames = collect_frames(&container);
    let structure = SliderStructure::build(&container, &frames, &config(&[])).unwrap();

    let mut engine = FallbackEngine::mount(&structure, &layout()).unwrap();
    assert_eq!(engine.current_index(), 0);

    engine.previous();
    assert_eq!(engine.current_index(), 0);

    engine.next();
    assert_eq!(engine.current_index(), 1);
    engine.next();
    assert_eq!(engine.current_index(), 2);
    engine.next();
    assert_eq!(engine.current_index(), 2);

    engine.go_to(99);
    assert_eq!(engine.current_index(), 2);
    engine.go_to(0);
    assert_eq!(engine.current_index(), 0);

    engine.destroy();
    engine.destroy();
    container.remove();
}

#[wasm_bindgen_test]
fn title_resolution_chain() {
    let container = container_with_frames(&[
        "<h3>Heading Title</h3>",
        "<img src='b.png' alt='Alt Title'>",
        "<p>nothing to use</p>",
    ]);
    let frames = collect_frames(&container);
    frames[0]
        .set_attribute("data-frame-title", "Explicit Title")
        .unwrap();

    assert_eq!(resolve_title(&frames[0], 0), "Explicit Title");
    frames[0].remove_attribute("data-frame-title").unwrap();
    assert_eq!(resolve_title(&frames[0], 0), "Heading Title");
    assert_eq!(resolve_title(&frames[1], 1), "Alt Title");
    assert_eq!(resolve_title(&frames[2], 2), "Frame 3");
    container.remove();
}

#[wasm_bindgen_test]
fn tab_strip_keeps_one_contiguous_active_range() {
    let container = container_with_frames(&plain_frames(4));
    container
        .set_attribute("data-show-text-navigation", "true")
        .unwrap();

    let mut instance = CarouselInstance::mount(&container).expect("instance");
    let tabs = container
        .query_selector_all(".fsc-slider__tab")
        .unwrap();
    assert_eq!(tabs.length(), 4);

    let active = || {
        let list = container
            .query_selector_all(".fsc-slider__tab--active")
            .unwrap();
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|n| n.dyn_into::<HtmlElement>().ok())
            .collect::<Vec<_>>()
    };
    assert_eq!(active().len(), 1);

    // Drive the fallback engine through a few transitions; after each one
    // exactly one tab remains highlighted.
    let dots = container.query_selector_all(".fsc-slider__dot").unwrap();
    for i in 0..dots.length() {
        let dot: HtmlElement = dots.item(i).unwrap().unchecked_into();
        dot.click();
        assert_eq!(active().len(), 1);
    }

    instance.destroy();
    container.remove();
}

#[wasm_bindgen_test]
fn dynamic_stylesheet_is_a_singleton() {
    ensure_stylesheet(&config(&[])).unwrap();
    ensure_stylesheet(&config(&[("gap", "30")])).unwrap();

    let sheets = document().query_selector_all("#fsc-dynamic-css").unwrap();
    assert_eq!(sheets.length(), 1);
    let sheet: HtmlElement = sheets.item(0).unwrap().unchecked_into();
    assert!(sheet.text_content().unwrap().contains("60px"));
}

#[wasm_bindgen_test]
fn containers_are_never_double_instantiated() {
    let container = container_with_frames(&plain_frames(2));
    let instance = CarouselInstance::mount(&container).expect("instance");
    assert!(CarouselInstance::mount(&container).is_none());
    drop(instance);
    container.remove();
}
