use crate::config::NavConfig;

use super::state::{self, ClickTarget, Menu, NavState, Reveal, SectionSpan};

/// The slice of the document the navigation controller reads and writes.
///
/// Reads report geometry; `show_*` calls project state onto the DOM and must
/// be idempotent.
pub trait Page {
    fn scroll_offset(&self) -> f64;
    fn viewport_height(&self) -> f64;
    /// Sections in document order.
    fn sections(&self) -> Vec<SectionSpan>;
    /// Viewport-relative top of every reveal-flagged element, stable order.
    fn reveal_tops(&self) -> Vec<f64>;

    fn show_scrolled(&mut self, scrolled: bool);
    fn show_menu(&mut self, menu: Menu);
    fn show_active(&mut self, section_id: Option<&str>);
    fn show_revealed(&mut self, index: usize);
    fn show_year(&mut self, year: i32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Window,
    Document,
    Toggle,
    Link,
}

/// What a subscribed listener feeds the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Scroll,
    ToggleMenu,
    FollowLink,
    /// Needs the click target, resolved by the caller only for this action.
    DocumentClick,
}

impl Action {
    pub fn to_event(self, click_target: impl FnOnce() -> ClickTarget) -> PageEvent {
        match self {
            Action::Scroll => PageEvent::Scroll,
            Action::ToggleMenu => PageEvent::ToggleClick,
            Action::FollowLink => PageEvent::LinkClick,
            Action::DocumentClick => PageEvent::DocumentClick(click_target()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    pub source: Source,
    pub event: &'static str,
    pub passive: bool,
    pub action: Action,
}

/// Listener table. A click on the toggle reaches its own listener before
/// bubbling to the document listener, which then sees `ClickTarget::Toggle`.
pub const SUBSCRIPTIONS: [Subscription; 4] = [
    Subscription { source: Source::Window, event: "scroll", passive: true, action: Action::Scroll },
    Subscription { source: Source::Toggle, event: "click", passive: false, action: Action::ToggleMenu },
    Subscription { source: Source::Link, event: "click", passive: false, action: Action::FollowLink },
    Subscription { source: Source::Document, event: "click", passive: false, action: Action::DocumentClick },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// Runs navbar styling, then section highlight, then reveal.
    Scroll,
    ToggleClick,
    LinkClick,
    DocumentClick(ClickTarget),
}

pub struct NavController<P: Page> {
    page: P,
    config: NavConfig,
    state: NavState,
    reveals: Vec<Reveal>,
}

impl<P: Page> NavController<P> {
    pub fn new(page: P, config: NavConfig) -> Self {
        Self {
            page,
            config,
            state: NavState::default(),
            reveals: Vec::new(),
        }
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    /// Startup pass: stamp the year and sync every scroll-derived state.
    pub fn init(&mut self, year: i32) {
        self.page.show_year(year);
        self.state.scrolled = state::is_scrolled(self.page.scroll_offset(), self.config.scrolled_threshold);
        self.page.show_scrolled(self.state.scrolled);
        self.page.show_menu(self.state.menu);
        self.highlight(true);
        self.check_reveal();
    }

    pub fn handle(&mut self, event: PageEvent) {
        match event {
            PageEvent::Scroll => {
                self.update_scrolled();
                self.highlight(false);
                self.check_reveal();
            }
            PageEvent::ToggleClick => self.set_menu(self.state.menu.toggled()),
            PageEvent::LinkClick => self.set_menu(Menu::Closed),
            PageEvent::DocumentClick(ClickTarget::Elsewhere) if self.state.menu == Menu::Open => {
                self.set_menu(Menu::Closed)
            }
            PageEvent::DocumentClick(_) => {}
        }
    }

    fn update_scrolled(&mut self) {
        let scrolled = state::is_scrolled(self.page.scroll_offset(), self.config.scrolled_threshold);
        if scrolled != self.state.scrolled {
            self.state.scrolled = scrolled;
            self.page.show_scrolled(scrolled);
        }
    }

    fn set_menu(&mut self, menu: Menu) {
        self.state.menu = menu;
        self.page.show_menu(menu);
    }

    fn highlight(&mut self, force: bool) {
        let sections = self.page.sections();
        let probe = self.page.scroll_offset() + self.config.probe_lead_in;
        let active = state::active_section(&sections, probe);
        if force || active != self.state.active {
            self.state.active = active;
            self.page.show_active(active.map(|i| sections[i].id.as_str()));
        }
    }

    fn check_reveal(&mut self) {
        let tops = self.page.reveal_tops();
        if self.reveals.len() < tops.len() {
            self.reveals.resize(tops.len(), Reveal::Hidden);
        }
        let vh = self.page.viewport_height();
        for (i, top) in tops.into_iter().enumerate() {
            let before = self.reveals[i];
            let after = state::reveal(before, top, vh, self.config.reveal_margin);
            if before != after {
                self.reveals[i] = after;
                self.page.show_revealed(i);
            }
        }
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.reveals.get(index) == Some(&Reveal::Visible)
    }
}
