//! Navbar styling, mobile menu, active-section highlight and scroll reveal.

mod controller;
mod state;

pub use controller::{Action, NavController, Page, PageEvent, Source, Subscription, SUBSCRIPTIONS};
pub use state::{active_section, is_scrolled, reveal, ClickTarget, Menu, NavState, Reveal, SectionSpan};
