//! Navigation index arithmetic shared by both engine implementations.
//!
//! The state is only ever mutated through confirmed transitions: controls
//! request a move, the engine decides, and the returned index is the one
//! that actually became current.

/// How many whole slides fit in view; a 1.5 peek still advances one whole
/// slide at a time, so the floor drives the maximum index.
fn whole_slides(slides_per_view: f32) -> usize {
    (slides_per_view.floor() as usize).max(1)
}

/// How many slides a visible range spans; a peeked slide counts as visible
/// so its tab highlights too.
fn span(slides_per_view: f32) -> usize {
    (slides_per_view.ceil() as usize).max(1)
}

#[derive(Clone, Debug)]
pub struct NavigationState {
    frame_count: usize,
    slides_per_view: f32,
    slides_per_scroll: usize,
    looping: bool,
    current: usize,
}

impl NavigationState {
    pub fn new(
        frame_count: usize,
        slides_per_view: f32,
        slides_per_scroll: usize,
        looping: bool,
    ) -> NavigationState {
        NavigationState {
            frame_count,
            slides_per_view,
            slides_per_scroll: slides_per_scroll.max(1),
            looping,
            current: 0,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Highest index that still fills the view.
    pub fn max_index(&self) -> usize {
        self.frame_count.saturating_sub(whole_slides(self.slides_per_view))
    }

    /// `[current, current + visible span - 1]`, clamped to frame bounds.
    pub fn visible_range(&self) -> (usize, usize) {
        visible_range(self.current, self.slides_per_view, self.frame_count)
    }

    /// Advance by one scroll step. Returns the confirmed index, or `None`
    /// when the request is dropped (already at the end, non-looping).
    pub fn next(&mut self) -> Option<usize> {
        let max = self.max_index();
        if self.current >= max {
            if self.looping && max > 0 {
                self.current = 0;
                return Some(0);
            }
            return None;
        }
        self.current = (self.current + self.slides_per_scroll).min(max);
        Some(self.current)
    }

    /// Step back by one scroll step; wraps to the last valid index in
    /// looping mode.
    pub fn previous(&mut self) -> Option<usize> {
        if self.current == 0 {
            let max = self.max_index();
            if self.looping && max > 0 {
                self.current = max;
                return Some(max);
            }
            return None;
        }
        self.current = self.current.saturating_sub(self.slides_per_scroll);
        Some(self.current)
    }

    /// Jump to an index, clamped into the valid range. `None` when the
    /// clamped target is already current.
    pub fn go_to(&mut self, index: usize) -> Option<usize> {
        let target = index.min(self.max_index());
        if target == self.current {
            return None;
        }
        self.current = target;
        Some(target)
    }

    /// Apply new layout parameters after a breakpoint crossing. The index
    /// is clamped into the new range, never reset.
    pub fn relayout(&mut self, slides_per_view: f32, slides_per_scroll: usize) {
        self.slides_per_view = slides_per_view;
        self.slides_per_scroll = slides_per_scroll.max(1);
        self.current = self.current.min(self.max_index());
    }
}

/// Visible range as a standalone computation, for callers that track the
/// index elsewhere (the real engine owns its own).
pub fn visible_range(current: usize, slides_per_view: f32, frame_count: usize) -> (usize, usize) {
    if frame_count == 0 {
        return (0, 0);
    }
    let last = frame_count - 1;
    let start = current.min(last);
    let end = (start + span(slides_per_view) - 1).min(last);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_range_with_two_in_view() {
        let nav = NavigationState::new(5, 2.0, 1, false);
        assert_eq!(nav.visible_range(), (0, 1));
    }

    #[test]
    fn next_steps_by_scroll_and_clamps() {
        for scroll in 1..=3 {
            let mut nav = NavigationState::new(5, 2.0, scroll, false);
            let confirmed = nav.next().unwrap();
            assert_eq!(confirmed, scroll.min(3));
            let (start, end) = nav.visible_range();
            assert_eq!(start, confirmed);
            assert_eq!(end, (confirmed + 1).min(4));
            assert!(end <= 4);
        }
    }

    #[test]
    fn non_looping_previous_at_start_is_dropped() {
        let mut nav = NavigationState::new(5, 1.0, 1, false);
        assert_eq!(nav.previous(), None);
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn looping_previous_wraps_to_last_valid_index() {
        let mut nav = NavigationState::new(5, 2.0, 1, true);
        assert_eq!(nav.previous(), Some(3));
        assert_eq!(nav.current(), nav.max_index());
    }

    #[test]
    fn non_looping_next_at_end_is_dropped() {
        let mut nav = NavigationState::new(3, 1.0, 1, false);
        nav.go_to(2);
        assert_eq!(nav.next(), None);
        assert_eq!(nav.current(), 2);
    }

    #[test]
    fn looping_next_at_end_wraps_to_start() {
        let mut nav = NavigationState::new(3, 1.0, 1, true);
        nav.go_to(2);
        assert_eq!(nav.next(), Some(0));
    }

    #[test]
    fn go_to_clamps_into_range() {
        let mut nav = NavigationState::new(5, 2.0, 1, false);
        assert_eq!(nav.go_to(99), Some(3));
        // Clamped target equal to current is a no-op.
        assert_eq!(nav.go_to(99), None);
    }

    #[test]
    fn go_to_current_is_dropped() {
        let mut nav = NavigationState::new(5, 1.0, 1, false);
        assert_eq!(nav.go_to(0), None);
    }

    #[test]
    fn fractional_peek_counts_as_visible() {
        let nav = NavigationState::new(5, 1.5, 1, false);
        assert_eq!(nav.visible_range(), (0, 1));
        assert_eq!(nav.max_index(), 4);
    }

    #[test]
    fn relayout_clamps_but_never_resets() {
        let mut nav = NavigationState::new(6, 1.0, 1, false);
        nav.go_to(5);
        nav.relayout(3.0, 1);
        assert_eq!(nav.current(), 3);
        nav.relayout(1.0, 1);
        assert_eq!(nav.current(), 3);
    }

    #[test]
    fn single_frame_has_no_moves() {
        let mut nav = NavigationState::new(1, 1.0, 1, true);
        assert_eq!(nav.next(), None);
        assert_eq!(nav.previous(), None);
        assert_eq!(nav.max_index(), 0);
    }
}
