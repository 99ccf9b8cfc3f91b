//! Frontend behavior for frame-based slider/carousel markup.
//!
//! The crate attaches to rendered containers (`.fsc-slider` holding
//! `.fsc-frame` children), reads their `data-*` configuration, rebuilds
//! the markup for the animation engine and keeps navigation, text tabs,
//! autoplay and theming in sync. When the engine cannot be constructed the
//! carousel degrades to a dependency-free stacked slider instead of
//! breaking the page.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub mod autoplay;
pub mod breakpoints;
pub mod config;
pub mod engine;
pub mod fallback;
pub mod instance;
pub mod navigation;
pub mod observer;
pub mod settings;
pub mod structure;
pub mod styling;
pub mod swiper;
pub mod tabs;
pub mod utils;

/// Module entry point: set up diagnostics, then discover carousels once
/// the document is ready and keep watching for injected ones.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let document = gloo_utils::document();
    if document.ready_state() == "loading" {
        let on_ready = Closure::once(observer::boot);
        let _ = document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        );
        // Page-lifetime listener; fires once and is never detached.
        on_ready.forget();
    } else {
        observer::boot();
    }
}
