use once_cell::sync::Lazy;
use regex::Regex;

// Compiled patterns for attribute validation
static EASING_KEYWORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(linear|ease|ease-in|ease-out|ease-in-out|step-start|step-end)$").unwrap());
static CUBIC_BEZIER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^cubic-bezier\(\s*-?\d+(\.\d+)?\s*(,\s*-?\d+(\.\d+)?\s*){3}\)$").unwrap()
});
static STEPS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^steps\(\s*\d+\s*(,\s*(jump-start|jump-end|jump-none|jump-both|start|end)\s*)?\)$")
        .unwrap()
});
static HEX_COLOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap());
static FUNC_COLOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(rgb|rgba|hsl|hsla)\([^)]*\)$").unwrap());
static NAMED_COLOR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").unwrap());

/// Check whether a string is a CSS easing expression we are willing to
/// write into transition styles (keyword, `cubic-bezier(...)` or `steps(...)`).
pub fn is_valid_timing_function(input: &str) -> bool {
    let trimmed = input.trim();
    EASING_KEYWORD_REGEX.is_match(trimmed)
        || CUBIC_BEZIER_REGEX.is_match(trimmed)
        || STEPS_REGEX.is_match(trimmed)
}

/// Loose CSS color validation: hex, rgb()/rgba()/hsl()/hsla() or a named
/// keyword. Values come from editor-controlled attributes, so this only
/// guards against markup that would break the generated style text.
pub fn is_valid_color(input: &str) -> bool {
    let trimmed = input.trim();
    HEX_COLOR_REGEX.is_match(trimmed)
        || FUNC_COLOR_REGEX.is_match(trimmed)
        || NAMED_COLOR_REGEX.is_match(trimmed)
}

/// Box shadows are free-form (`0 2px 6px rgba(...)` or `none`); reject only
/// characters that could terminate a style declaration early.
pub fn is_safe_shadow(input: &str) -> bool {
    !input.is_empty() && !input.contains(';') && !input.contains('{') && !input.contains('}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_easing_keywords_and_functions() {
        assert!(is_valid_timing_function("ease-in-out"));
        assert!(is_valid_timing_function("linear"));
        assert!(is_valid_timing_function("cubic-bezier(0.165, 0.840, 0.440, 1.000)"));
        assert!(is_valid_timing_function("cubic-bezier(0.5,-0.25,0.1,1)"));
        assert!(is_valid_timing_function("steps(4, jump-end)"));
    }

    #[test]
    fn rejects_malformed_easing() {
        assert!(!is_valid_timing_function("swing"));
        assert!(!is_valid_timing_function("cubic-bezier(1,2,3)"));
        assert!(!is_valid_timing_function("cubic-bezier(a,b,c,d)"));
        assert!(!is_valid_timing_function(""));
    }

    #[test]
    fn validates_colors() {
        assert!(is_valid_color("#007cba"));
        assert!(is_valid_color("#fff"));
        assert!(is_valid_color("#00000080"));
        assert!(is_valid_color("rgba(0, 0, 0, 0.1)"));
        assert!(is_valid_color("hsl(200, 50%, 50%)"));
        assert!(is_valid_color("tomato"));
        assert!(!is_valid_color("#12"));
        assert!(!is_valid_color("url(evil)"));
        assert!(!is_valid_color("red; background: blue"));
    }

    #[test]
    fn shadow_guard() {
        assert!(is_safe_shadow("0 1px 3px rgba(0,0,0,0.1)"));
        assert!(is_safe_shadow("none"));
        assert!(!is_safe_shadow("0 0 0 red; color: blue"));
        assert!(!is_safe_shadow(""));
    }
}
