//! Viewport-width to layout-tier resolution.
//!
//! The engine's native breakpoint mechanism owns slide geometry once it is
//! mounted; this resolver exists for everything the engine does not cover:
//! the tab strip's visible-range computation, fallback relayout, and index
//! re-clamping when a resize crosses a tier boundary.

use crate::settings::{BreakpointSettings, SliderConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Desktop,
    Tablet,
    Phone,
}

/// Layout parameters active at the current viewport width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveLayout {
    pub tier: Tier,
    pub slides_per_view: f32,
    pub slides_per_scroll: u32,
    pub gap_px: u32,
    pub inner_padding_px: u32,
}

impl ActiveLayout {
    fn from_settings(tier: Tier, settings: &BreakpointSettings) -> ActiveLayout {
        ActiveLayout {
            tier,
            slides_per_view: settings.slides_per_view,
            slides_per_scroll: settings.slides_per_scroll,
            gap_px: settings.gap_px,
            inner_padding_px: settings.inner_padding_px,
        }
    }
}

/// Current viewport width in CSS pixels, 0 outside a browsing context.
pub fn viewport_width() -> u32 {
    gloo_utils::window()
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0) as u32
}

/// Select the active tier by descending width thresholds: desktop when the
/// viewport is at least its min-width, else tablet, else phone.
pub fn resolve(config: &SliderConfig, viewport_width: u32) -> ActiveLayout {
    if viewport_width >= config.desktop.min_width_px {
        ActiveLayout::from_settings(Tier::Desktop, &config.desktop)
    } else if viewport_width >= config.tablet.min_width_px {
        ActiveLayout::from_settings(Tier::Tablet, &config.tablet)
    } else {
        ActiveLayout::from_settings(Tier::Phone, &config.phone)
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

    #[test]
    fn selects_tier_by_descending_thresholds() {
        let config = config(&[
            ("slidesDesktop", "3"),
            ("slidesTablet", "2"),
            ("slidesPhone", "1"),
        ]);

        assert_eq!(resolve(&config, 1920).tier, Tier::Desktop);
        assert_eq!(resolve(&config, 1140).tier, Tier::Desktop);
        assert_eq!(resolve(&config, 1139).tier, Tier::Tablet);
        assert_eq!(resolve(&config, 1024).tier, Tier::Tablet);
        assert_eq!(resolve(&config, 1023).tier, Tier::Phone);
        assert_eq!(resolve(&config, 320).tier, Tier::Phone);
    }

    #[test]
    fn layout_carries_tier_parameters() {
        let config = config(&[
            ("slidesDesktop", "3"),
            ("slidesScrollDesktop", "2"),
            ("innerPaddingDesktop", "24"),
        ]);
        let layout = resolve(&config, 1440);
        assert_eq!(layout.slides_per_view, 3.0);
        assert_eq!(layout.slides_per_scroll, 2);
        assert_eq!(layout.inner_padding_px, 24);
        assert_eq!(layout.gap_px, 20);
    }

    #[test]
    fn custom_thresholds_are_honored() {
        let config = config(&[("breakpointDesktop", "1600"), ("breakpointTablet", "900")]);
        assert_eq!(resolve(&config, 1500).tier, Tier::Tablet);
        assert_eq!(resolve(&config, 899).tier, Tier::Phone);
    }
}
