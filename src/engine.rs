//! Engine contract shared by the real animation engine and the fallback.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A mounted engine as shared by controls that request transitions
/// (tabs, autoplay) and the instance that owns teardown.
pub type SharedEngine = Rc<RefCell<Box<dyn CarouselEngine>>>;

/// A mounted carousel engine. Transition requests made while a transition
/// is in flight are dropped, not queued; the internal index never
/// corrupts. `destroy` is idempotent.
pub trait CarouselEngine {
    fn next(&mut self);
    fn previous(&mut self);
    fn go_to(&mut self, index: usize);
    fn current_index(&self) -> usize;
    /// Subscribe to "new stable index selected"; fired exactly once per
    /// completed transition. Callbacks must not call back into the engine.
    fn set_on_slide_change(&mut self, callback: Rc<dyn Fn(usize)>);
    /// Layout parameters changed (viewport crossed a tier boundary).
    fn relayout(&mut self, layout: &crate::breakpoints::ActiveLayout);
    fn destroy(&mut self);
}

/// Why the real engine could not be mounted. Recovered by switching to the
/// fallback slider; logged, never shown to end users.
#[derive(Debug)]
pub enum EngineInitError {
    /// The engine script is not loaded on the page.
    MissingDependency,
    /// The engine constructor threw.
    ConstructionFailed(String),
    /// Fewer frames than a carousel needs.
    TooFewFrames(usize),
}

impl fmt::Display for EngineInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineInitError::MissingDependency => {
                write!(f, "animation engine global is not available")
            }
            EngineInitError::ConstructionFailed(detail) => {
                write!(f, "animation engine construction threw: {}", detail)
            }
            EngineInitError::TooFewFrames(count) => {
                write!(f, "need at least 2 frames, found {}", count)
            }
        }
    }
}

impl std::error::Error for EngineInitError {}
