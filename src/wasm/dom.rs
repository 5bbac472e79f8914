use std::cell::RefCell;
use std::rc::Rc;

use chrono::Datelike;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, Node, Window,
};

use crate::config::{class, Selectors, SiteConfig};
use crate::error::Result;
use crate::nav::{ClickTarget, Menu, NavController, Page, SectionSpan, Source, SUBSCRIPTIONS};

/// Navigation-related elements of the live document. Element lists are
/// captured once in `locate`; reveal elements added later are not tracked.
pub struct DomPage {
    window: Window,
    body: Option<HtmlElement>,
    navbar: Option<Element>,
    toggle: Option<Element>,
    panel: Option<Element>,
    links: Vec<Element>,
    sections: Vec<HtmlElement>,
    reveals: Vec<Element>,
    year: Option<Element>,
}

impl DomPage {
    /// Look up every element once and flag the reveal targets. Missing pieces
    /// are tolerated; the matching behavior simply never shows.
    pub fn locate(window: &Window, document: &Document, sel: &Selectors) -> Result<Self> {
        for el in query_all(document, sel.reveal_targets)? {
            el.class_list().add_1(class::REVEAL)?;
        }

        Ok(Self {
            window: window.clone(),
            body: document.body(),
            navbar: document.get_element_by_id(sel.navbar_id),
            toggle: document.get_element_by_id(sel.toggle_id),
            panel: document.get_element_by_id(sel.links_panel_id),
            links: query_all(document, sel.link_selector)?,
            sections: query_all(document, sel.section_selector)?
                .into_iter()
                .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
                .collect(),
            reveals: query_all(document, sel.reveal_selector)?,
            year: document.get_element_by_id(sel.year_id),
        })
    }

    pub fn click_target(&self, target: Option<EventTarget>) -> ClickTarget {
        let node = target.and_then(|t| t.dyn_into::<Node>().ok());
        let inside = |el: &Option<Element>| el.as_ref().map_or(false, |el| el.contains(node.as_ref()));
        if inside(&self.panel) {
            ClickTarget::Menu
        } else if inside(&self.toggle) {
            ClickTarget::Toggle
        } else {
            ClickTarget::Elsewhere
        }
    }

    fn targets(&self, source: Source, document: &Document) -> Vec<EventTarget> {
        match source {
            Source::Window => vec![self.window.clone().into()],
            Source::Document => vec![document.clone().into()],
            Source::Toggle => self.toggle.iter().cloned().map(Into::into).collect(),
            Source::Link => self.links.iter().cloned().map(Into::into).collect(),
        }
    }
}

impl Page for DomPage {
    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn sections(&self) -> Vec<SectionSpan> {
        self.sections
            .iter()
            .map(|s| SectionSpan {
                id: s.id(),
                top: s.offset_top() as f64,
                height: s.offset_height() as f64,
            })
            .collect()
    }

    fn reveal_tops(&self) -> Vec<f64> {
        self.reveals
            .iter()
            .map(|el| el.get_bounding_client_rect().top())
            .collect()
    }

    fn show_scrolled(&mut self, scrolled: bool) {
        if let Some(navbar) = &self.navbar {
            set_class(navbar, class::SCROLLED, scrolled);
        }
    }

    fn show_menu(&mut self, menu: Menu) {
        let open = menu == Menu::Open;
        for el in self.toggle.iter().chain(self.panel.iter()) {
            set_class(el, class::OPEN, open);
        }
        if let Some(body) = &self.body {
            let style = body.style();
            let res = if menu.locks_scroll() {
                style.set_property("overflow", "hidden")
            } else {
                style.remove_property("overflow").map(|_| ())
            };
            if res.is_err() {
                log::warn!("could not update body overflow");
            }
        }
    }

    fn show_active(&mut self, section_id: Option<&str>) {
        let href = section_id.map(|id| format!("#{id}"));
        for link in &self.links {
            let on = href.is_some() && link.get_attribute("href") == href;
            set_class(link, class::ACTIVE, on);
        }
    }

    fn show_revealed(&mut self, index: usize) {
        if let Some(el) = self.reveals.get(index) {
            set_class(el, class::VISIBLE, true);
        }
    }

    fn show_year(&mut self, year: i32) {
        if let Some(el) = &self.year {
            el.set_text_content(Some(&year.to_string()));
        }
    }
}

/// Build the controller, sync it with the current scroll position and hook up
/// every listener from `SUBSCRIPTIONS`.
pub fn start(window: &Window, document: &Document, config: &SiteConfig) -> Result<()> {
    let page = DomPage::locate(window, document, &config.selectors)?;
    let controller = Rc::new(RefCell::new(NavController::new(page, config.nav)));
    controller.borrow_mut().init(chrono::Local::now().year());

    for sub in SUBSCRIPTIONS {
        let targets = controller.borrow().page().targets(sub.source, document);
        for target in targets {
            let controller = controller.clone();
            listen(&target, sub.event, sub.passive, move |event: Event| {
                let page_event = sub
                    .action
                    .to_event(|| controller.borrow().page().click_target(event.target()));
                controller.borrow_mut().handle(page_event);
            })?;
        }
    }
    Ok(())
}

/// Attach a listener for the lifetime of the page.
pub(crate) fn listen<F>(target: &EventTarget, name: &str, passive: bool, f: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
    let opts = AddEventListenerOptions::new();
    opts.set_passive(passive);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        name,
        closure.as_ref().unchecked_ref(),
        &opts,
    )?;
    closure.forget();
    Ok(())
}

fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn set_class(el: &Element, name: &str, on: bool) {
    if el.class_list().toggle_with_force(name, on).is_err() {
        log::warn!("could not set class `{name}`");
    }
}
