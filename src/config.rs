//! Crate-level configuration constants.

// Markup contract
pub const CONTAINER_SELECTOR: &str = ".fsc-slider";
pub const FRAME_SELECTOR: &str = ".fsc-frame";
pub const READY_ATTR: &str = "data-fsc-ready";
pub const FRAME_TITLE_ATTR: &str = "data-frame-title";

// Injected structure classes (engine contract)
pub const ENGINE_ROOT_CLASS: &str = "swiper";
pub const WRAPPER_CLASS: &str = "swiper-wrapper";
pub const SLIDE_CLASS: &str = "swiper-slide";
pub const PREV_BUTTON_CLASS: &str = "swiper-button-prev";
pub const NEXT_BUTTON_CLASS: &str = "swiper-button-next";
pub const PAGINATION_CLASS: &str = "swiper-pagination";
pub const FALLBACK_CLASS: &str = "fsc-slider--fallback";
pub const FALLBACK_DOT_CLASS: &str = "fsc-slider__dot";
pub const FALLBACK_DOT_ACTIVE_CLASS: &str = "fsc-slider__dot--active";
pub const SLIDE_ACTIVE_CLASS: &str = "fsc-slide--active";
pub const TAB_STRIP_CLASS: &str = "fsc-slider__tabs";
pub const TAB_CLASS: &str = "fsc-slider__tab";
pub const TAB_ACTIVE_CLASS: &str = "fsc-slider__tab--active";

// Dynamic stylesheet singleton
pub const DYNAMIC_STYLE_ID: &str = "fsc-dynamic-css";

// Breakpoint defaults (px)
pub const DEFAULT_BREAKPOINT_DESKTOP: u32 = 1140;
pub const DEFAULT_BREAKPOINT_TABLET: u32 = 1024;
pub const DEFAULT_BREAKPOINT_PHONE: u32 = 768;

// Per-tier gap defaults (px), overridable by a single data-gap value
pub const DEFAULT_GAP_DESKTOP: u32 = 20;
pub const DEFAULT_GAP_TABLET: u32 = 15;
pub const DEFAULT_GAP_PHONE: u32 = 10;

// Behavior defaults
pub const DEFAULT_AUTOPLAY_DELAY_MS: u32 = 5000;
pub const DEFAULT_TRANSITION_MS: u32 = 500;
pub const DEFAULT_TIMING_FUNCTION: &str = "ease";
pub const DEFAULT_TOUCH_RATIO: f32 = 1.0;
pub const MIN_FRAMES: usize = 2;

// Largest slides-per-view the dynamic stylesheet generates width rules for
pub const MAX_SLIDES_PER_VIEW_RULES: u32 = 6;
