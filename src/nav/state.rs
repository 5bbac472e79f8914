//! Navigation state and its pure transitions.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Menu {
    #[default]
    Closed,
    Open,
}

impl Menu {
    pub fn toggled(self) -> Self {
        match self {
            Menu::Closed => Menu::Open,
            Menu::Open => Menu::Closed,
        }
    }

    /// Page scroll is locked while the mobile menu covers it.
    pub fn locks_scroll(self) -> bool {
        self == Menu::Open
    }
}

/// Where a document click landed, relative to the mobile menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Menu,
    Toggle,
    Elsewhere,
}

/// Vertical extent of a page section in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpan {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reveal {
    #[default]
    Hidden,
    Visible,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NavState {
    pub scrolled: bool,
    pub menu: Menu,
    /// Index into the section list, in document order.
    pub active: Option<usize>,
}

pub fn is_scrolled(offset: f64, threshold: f64) -> bool {
    offset > threshold
}

/// First section, in document order, whose span contains `probe`.
pub fn active_section(sections: &[SectionSpan], probe: f64) -> Option<usize> {
    sections.iter().position(|s| s.contains(probe))
}

/// One-way reveal transition.
pub fn reveal(current: Reveal, top: f64, viewport_height: f64, margin: f64) -> Reveal {
    match current {
        Reveal::Visible => Reveal::Visible,
        Reveal::Hidden if top < viewport_height - margin => Reveal::Visible,
        Reveal::Hidden => Reveal::Hidden,
    }
}
