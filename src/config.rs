//! Tuning constants and the page contract (element ids and classes).
//!
//! Everything here is plain data with production values in `Default`. Tests
//! build their own values where they need different thresholds.

/// Ids, classes and selectors the page is expected to carry.
#[derive(Debug, Clone)]
pub struct Selectors {
    pub navbar_id: &'static str,
    pub toggle_id: &'static str,
    pub links_panel_id: &'static str,
    pub link_selector: &'static str,
    pub section_selector: &'static str,
    pub year_id: &'static str,
    pub hero_id: &'static str,
    pub canvas_id: &'static str,
    /// Elements that get the reveal class at startup.
    pub reveal_targets: &'static str,
    pub reveal_selector: &'static str,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            navbar_id: "navbar",
            toggle_id: "navToggle",
            links_panel_id: "navLinks",
            link_selector: ".nav-link",
            section_selector: ".section",
            year_id: "currentYear",
            hero_id: "hero",
            canvas_id: "heroCanvas",
            reveal_targets: ".about-text, .highlight-card, .brand-card, .contact-card, .contact-map",
            reveal_selector: ".reveal",
        }
    }
}

/// Class names used as the DOM projection of navigation state.
pub mod class {
    pub const SCROLLED: &str = "scrolled";
    pub const OPEN: &str = "open";
    pub const ACTIVE: &str = "active";
    pub const REVEAL: &str = "reveal";
    pub const VISIBLE: &str = "visible";
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavConfig {
    /// Navbar gets the scrolled class strictly above this offset.
    pub scrolled_threshold: f64,
    /// Added to the scroll offset to form the probe point.
    pub probe_lead_in: f64,
    /// Distance above the viewport bottom an element must cross to reveal.
    pub reveal_margin: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold: 50.0,
            probe_lead_in: 150.0,
            reveal_margin: 120.0,
        }
    }
}

/// Values the particle network needs regardless of viewport class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleTuning {
    /// Viewports narrower than this use the compact table.
    pub compact_below: f64,
    pub resize_debounce_ms: u32,
    pub touch_release_ms: u32,
    /// Attraction impulse scale at zero distance.
    pub attraction: f64,
}

impl Default for ParticleTuning {
    fn default() -> Self {
        Self {
            compact_below: 768.0,
            resize_debounce_ms: 200,
            touch_release_ms: 600,
            attraction: 0.01,
        }
    }
}

impl ParticleTuning {
    pub fn is_compact(&self, viewport_width: f64) -> bool {
        viewport_width < self.compact_below
    }
}

#[derive(Debug, Clone, Default)]
pub struct SiteConfig {
    pub selectors: Selectors,
    pub nav: NavConfig,
    pub particles: ParticleTuning,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_boundary() {
        let t = ParticleTuning::default();
        assert!(t.is_compact(400.0));
        assert!(t.is_compact(767.9));
        assert!(!t.is_compact(768.0));
        assert!(!t.is_compact(1024.0));
    }
}
