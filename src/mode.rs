//! Desktop/mobile mode detection from the viewport width.

use serde::{Deserialize, Serialize};

/// Which physics run: the hanging pendulum on desktop, scroll coupling on mobile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewportMode {
    Desktop,
    Mobile,
}

impl ViewportMode {
    pub fn is_mobile(self) -> bool {
        matches!(self, ViewportMode::Mobile)
    }
}

/// Mobile when the viewport is strictly narrower than `breakpoint`.
pub fn detect_mode(viewport_width: f64, breakpoint: f64) -> ViewportMode {
    if viewport_width < breakpoint {
        ViewportMode::Mobile
    } else {
        ViewportMode::Desktop
    }
}

/// Tracks the current mode across resizes.
#[derive(Debug, Clone)]
pub struct ModeDetector {
    breakpoint: f64,
    current: Option<ViewportMode>,
}

impl ModeDetector {
    pub fn new(breakpoint: f64) -> Self {
        ModeDetector { breakpoint, current: None }
    }

    pub fn current(&self) -> Option<ViewportMode> {
        self.current
    }

    /// Re-evaluate for a new width. Returns the new mode if it changed,
    /// including the first evaluation.
    pub fn update(&mut self, viewport_width: f64) -> Option<ViewportMode> {
        let mode = detect_mode(viewport_width, self.breakpoint);
        if self.current == Some(mode) {
            return None;
        }
        log::debug!("viewport {viewport_width}px -> {mode:?}");
        self.current = Some(mode);
        Some(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_is_exclusive() {
        assert_eq!(detect_mode(999.9, 1000.0), ViewportMode::Mobile);
        assert_eq!(detect_mode(1000.0, 1000.0), ViewportMode::Desktop);
    }

    #[test]
    fn reports_only_changes() {
        let mut d = ModeDetector::new(1000.0);
        assert_eq!(d.update(1280.0), Some(ViewportMode::Desktop));
        assert_eq!(d.update(1100.0), None);
        assert_eq!(d.update(640.0), Some(ViewportMode::Mobile));
        assert_eq!(d.current(), Some(ViewportMode::Mobile));
    }
}
