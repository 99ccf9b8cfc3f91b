//! Typed slider configuration, parsed once per instance from the
//! container's attribute bag.
//!
//! Every field has a documented default; malformed or missing values fall
//! back to that default without erroring. Downstream components only ever
//! see the typed, validated structure.

use crate::config::*;
use crate::utils::{is_safe_shadow, is_valid_color, is_valid_timing_function};
use log::debug;
use std::collections::HashMap;
use std::str::FromStr;

/// Flat string-keyed attribute bag. Implemented for the container's
/// `dataset` on the DOM side and for plain maps in tests.
pub trait AttributeSource {
    fn get(&self, key: &str) -> Option<String>;
}

impl AttributeSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl AttributeSource for web_sys::DomStringMap {
    fn get(&self, key: &str) -> Option<String> {
        web_sys::DomStringMap::get(self, key)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliderMode {
    /// Endless looping navigation.
    Carousel,
    /// Finite, clamps at first/last.
    Slider,
}

impl SliderMode {
    pub fn loop_enabled(self) -> bool {
        matches!(self, SliderMode::Carousel)
    }
}

impl FromStr for SliderMode {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "carousel" => Ok(SliderMode::Carousel),
            "slider" => Ok(SliderMode::Slider),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    Slide,
    Fade,
    Flip,
    Coverflow,
    Creative,
    Cube,
    Cards,
}

impl Effect {
    /// Effects that the engine can only render with a single visible slide.
    pub fn requires_single_slide(self) -> bool {
        matches!(self, Effect::Flip | Effect::Creative | Effect::Cube | Effect::Cards)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Effect::Slide => "slide",
            Effect::Fade => "fade",
            Effect::Flip => "flip",
            Effect::Coverflow => "coverflow",
            Effect::Creative => "creative",
            Effect::Cube => "cube",
            Effect::Cards => "cards",
        }
    }
}

impl FromStr for Effect {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "slide" => Ok(Effect::Slide),
            "fade" => Ok(Effect::Fade),
            "flip" => Ok(Effect::Flip),
            "coverflow" => Ok(Effect::Coverflow),
            "creative" => Ok(Effect::Creative),
            "cube" => Ok(Effect::Cube),
            "cards" => Ok(Effect::Cards),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectDirection {
    Horizontal,
    Vertical,
}

impl EffectDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            EffectDirection::Horizontal => "horizontal",
            EffectDirection::Vertical => "vertical",
        }
    }
}

impl FromStr for EffectDirection {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "horizontal" => Ok(EffectDirection::Horizontal),
            "vertical" => Ok(EffectDirection::Vertical),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridFill {
    Row,
    Column,
}

impl GridFill {
    pub fn as_str(self) -> &'static str {
        match self {
            GridFill::Row => "row",
            GridFill::Column => "column",
        }
    }
}

impl FromStr for GridFill {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "row" => Ok(GridFill::Row),
            "column" => Ok(GridFill::Column),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TabPosition {
    Above,
    Below,
}

impl FromStr for TabPosition {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "above" => Ok(TabPosition::Above),
            "below" => Ok(TabPosition::Below),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutoplayConfig {
    pub enabled: bool,
    pub delay_ms: u32,
    pub pause_on_hover: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchConfig {
    pub enabled: bool,
    /// Drag sensitivity multiplier, > 0.
    pub drag_sensitivity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    pub rows: u32,
    pub fill: GridFill,
}

/// Layout parameters for one viewport tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BreakpointSettings {
    pub min_width_px: u32,
    /// Fractional values (e.g. 1.5) peek the edge of the next frame.
    pub slides_per_view: f32,
    pub slides_per_scroll: u32,
    pub inner_padding_px: u32,
    pub gap_px: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TabStyle {
    pub font_size: u32,
    pub font_weight: String,
    pub text_align: String,
    pub padding: u32,
    pub border_radius: u32,
    pub border_width: u32,
    pub text_color: String,
    pub text_color_active: String,
    pub background_color: String,
    pub background_color_active: String,
    pub border_color: String,
    pub border_color_active: String,
    pub box_shadow: String,
    pub box_shadow_active: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrowStyle {
    pub color: String,
    pub background_color: String,
    pub size: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DotStyle {
    pub color: String,
    pub color_active: String,
    pub size: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameStyle {
    pub border_color: String,
    pub border_width: u32,
    pub border_radius: u32,
    pub box_shadow: String,
}

/// Immutable per-instance settings, derived once at init.
#[derive(Clone, Debug, PartialEq)]
pub struct SliderConfig {
    pub mode: SliderMode,
    pub autoplay: AutoplayConfig,
    pub touch: TouchConfig,
    pub keyboard_enabled: bool,
    pub effect: Effect,
    pub effect_direction: EffectDirection,
    pub centered_slides: bool,
    pub transition_duration_ms: u32,
    pub timing_function: String,
    pub grid: GridConfig,
    pub desktop: BreakpointSettings,
    pub tablet: BreakpointSettings,
    pub phone: BreakpointSettings,
    pub show_arrows: bool,
    pub show_dots: bool,
    pub show_text_tabs: bool,
    pub tab_position: TabPosition,
    pub tab_style: TabStyle,
    pub arrow_style: ArrowStyle,
    pub dot_style: DotStyle,
    pub frame_style: FrameStyle,
}

impl SliderConfig {
    pub fn loop_enabled(&self) -> bool {
        self.mode.loop_enabled()
    }

    /// Parse the attribute bag into a fully-populated configuration and
    /// apply the cross-field invariants. Never fails; bad values are
    /// replaced by their defaults.
    pub fn from_attributes(source: &dyn AttributeSource) -> SliderConfig {
        let mut config = SliderConfig::parse(source);
        config.validate();
        config
    }

    fn parse(source: &dyn AttributeSource) -> SliderConfig {
        // A single data-gap overrides the per-tier gap defaults.
        let gap_override = parse_opt::<u32>(source, "gap");

        let breakpoint = |tier: &str, default_min: u32, default_gap: u32| BreakpointSettings {
            min_width_px: parse_or(source, &format!("breakpoint{tier}"), default_min),
            slides_per_view: parse_or(source, &format!("slides{tier}"), 1.0_f32),
            slides_per_scroll: parse_or(source, &format!("slidesScroll{tier}"), 1_u32).max(1),
            inner_padding_px: parse_or(source, &format!("innerPadding{tier}"), 0_u32),
            gap_px: gap_override.unwrap_or(default_gap),
        };

        SliderConfig {
            mode: parse_or(source, "mode", SliderMode::Slider),
            autoplay: AutoplayConfig {
                enabled: parse_or(source, "autoPlay", false),
                delay_ms: parse_or(source, "autoPlaySpeed", DEFAULT_AUTOPLAY_DELAY_MS),
                pause_on_hover: parse_or(source, "autoPlayPauseOnHover", true),
            },
            touch: TouchConfig {
                enabled: parse_or(source, "touchSwipe", true),
                drag_sensitivity: positive_or(
                    parse_or(source, "touchRatio", DEFAULT_TOUCH_RATIO),
                    DEFAULT_TOUCH_RATIO,
                ),
            },
            keyboard_enabled: parse_or(source, "keyboard", true),
            effect: parse_or(source, "effect", Effect::Slide),
            effect_direction: parse_or(source, "effectDirection", EffectDirection::Horizontal),
            centered_slides: parse_or(source, "centeredSlides", false),
            transition_duration_ms: parse_or(source, "animationSpeed", DEFAULT_TRANSITION_MS),
            timing_function: validated_string(
                source,
                "animationEasing",
                DEFAULT_TIMING_FUNCTION,
                is_valid_timing_function,
            ),
            grid: GridConfig {
                rows: parse_or(source, "gridRows", 1_u32).max(1),
                fill: parse_or(source, "gridFill", GridFill::Row),
            },
            desktop: breakpoint("Desktop", DEFAULT_BREAKPOINT_DESKTOP, DEFAULT_GAP_DESKTOP),
            tablet: breakpoint("Tablet", DEFAULT_BREAKPOINT_TABLET, DEFAULT_GAP_TABLET),
            phone: breakpoint("Phone", DEFAULT_BREAKPOINT_PHONE, DEFAULT_GAP_PHONE),
            show_arrows: parse_or(source, "showNavigation", true),
            show_dots: parse_or(source, "showDots", true),
            show_text_tabs: parse_or(source, "showTextNavigation", false),
            tab_position: parse_or(source, "textNavigationPosition", TabPosition::Below),
            tab_style: TabStyle {
                font_size: parse_or(source, "tabFontSize", 14_u32),
                font_weight: plain_string(source, "tabFontWeight", "normal"),
                text_align: plain_string(source, "tabTextAlign", "center"),
                padding: parse_or(source, "tabPadding", 8_u32),
                border_radius: parse_or(source, "tabBorderRadius", 4_u32),
                border_width: parse_or(source, "tabBorderWidth", 1_u32),
                text_color: color(source, "tabTextColor", "#333333"),
                text_color_active: color(source, "tabTextColorActive", "#ffffff"),
                background_color: color(source, "tabBackgroundColor", "#f5f5f5"),
                background_color_active: color(source, "tabBackgroundColorActive", "#007cba"),
                border_color: color(source, "tabBorderColor", "#dddddd"),
                border_color_active: color(source, "tabBorderColorActive", "#007cba"),
                box_shadow: shadow(source, "tabBoxShadow", "0 1px 3px rgba(0,0,0,0.1)"),
                box_shadow_active: shadow(source, "tabBoxShadowActive", "0 2px 6px rgba(0,0,0,0.2)"),
            },
            arrow_style: ArrowStyle {
                color: color(source, "arrowColor", "#333333"),
                background_color: color(source, "arrowBackgroundColor", "rgba(255,255,255,0.8)"),
                size: parse_or(source, "arrowSize", 40_u32),
            },
            dot_style: DotStyle {
                color: color(source, "dotColor", "#cccccc"),
                color_active: color(source, "dotColorActive", "#007cba"),
                size: parse_or(source, "dotSize", 10_u32),
            },
            frame_style: FrameStyle {
                border_color: color(source, "frameBorderColor", "#dddddd"),
                border_width: parse_or(source, "frameBorderWidth", 0_u32),
                border_radius: parse_or(source, "frameBorderRadius", 0_u32),
                box_shadow: shadow(source, "frameBoxShadow", "none"),
            },
        }
    }

    /// Cross-field invariants. Runs after parsing, so the engine adapters
    /// never have to defend against inconsistent combinations.
    fn validate(&mut self) {
        for tier in [&mut self.desktop, &mut self.tablet, &mut self.phone] {
            if tier.slides_per_view < 1.0 || !tier.slides_per_view.is_finite() {
                tier.slides_per_view = 1.0;
            }
        }

        // Fade cannot show multiple slides coherently.
        if self.effect == Effect::Fade && self.max_slides_per_view() > 1.0 {
            debug!("fade with multiple visible slides, downgrading to slide effect");
            self.effect = Effect::Slide;
        }

        // 3D-style effects render exactly one slide.
        if self.effect.requires_single_slide() {
            for tier in [&mut self.desktop, &mut self.tablet, &mut self.phone] {
                tier.slides_per_view = 1.0;
                tier.slides_per_scroll = 1;
            }
        }
    }

    fn max_slides_per_view(&self) -> f32 {
        self.desktop
            .slides_per_view
            .max(self.tablet.slides_per_view)
            .max(self.phone.slides_per_view)
    }
}

fn parse_opt<T: FromStr>(source: &dyn AttributeSource, key: &str) -> Option<T> {
    let raw = source.get(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            debug!("ignoring malformed attribute {key}={raw:?}");
            None
        }
    }
}

fn parse_or<T: FromStr>(source: &dyn AttributeSource, key: &str, default: T) -> T {
    parse_opt(source, key).unwrap_or(default)
}

fn positive_or(value: f32, default: f32) -> f32 {
    if value > 0.0 && value.is_finite() {
        value
    } else {
        default
    }
}

fn plain_string(source: &dyn AttributeSource, key: &str, default: &str) -> String {
    match source.get(key) {
        Some(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => default.to_string(),
    }
}

fn validated_string(
    source: &dyn AttributeSource,
    key: &str,
    default: &str,
    valid: fn(&str) -> bool,
) -> String {
    match source.get(key) {
        Some(value) if valid(value.trim()) => value.trim().to_string(),
        Some(value) => {
            debug!("ignoring malformed attribute {key}={value:?}");
            default.to_string()
        }
        None => default.to_string(),
    }
}

fn color(source: &dyn AttributeSource, key: &str, default: &str) -> String {
    validated_string(source, key, default, is_valid_color)
}

fn shadow(source: &dyn AttributeSource, key: &str, default: &str) -> String {
    validated_string(source, key, default, is_safe_shadow)
}

// `bool` attributes are serialized as the literal strings "true"/"false",
// which `bool::FromStr` already accepts; enums plug in via their FromStr
// impls above, so parse_or covers every field type uniformly.
