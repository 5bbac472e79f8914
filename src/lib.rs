#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Client-side behavior for the marketing site: navigation chrome and the hero
//! particle network. Browser wiring lives in `wasm`; everything else is plain
//! Rust that runs under host tests.

pub mod config;
pub mod error;
pub mod nav;
pub mod particles;

pub use config::SiteConfig;
pub use error::SiteError;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use log::Level;
    use wasm_bindgen::prelude::*;

    use crate::{SiteConfig, SiteError};

    pub(crate) mod dom;
    pub(crate) mod render;
    pub(crate) mod timer;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        // A second init (several test modules in one page) only fails to replace the logger.
        console_log::init_with_level(Level::Info).ok();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let config = SiteConfig::default();

        settle("navigation", dom::start(&window, &document, &config));
        settle("particle network", render::start(&window, &document, &config).map(drop));

        log::info!("Website initialized successfully.");
        Ok(())
    }

    /// Each feature starts independently; missing markup only disables that feature.
    fn settle(feature: &str, result: Result<(), SiteError>) {
        match result {
            Ok(()) => {}
            Err(err) if err.is_absent() => log::debug!("{feature} disabled: {err}"),
            Err(err) => log::warn!("{feature} failed to start: {err}"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::dom::DomPage;
#[cfg(target_arch = "wasm32")]
pub use wasm::render::{start as start_particle_network, CanvasSurface, ParticleNetwork};
#[cfg(target_arch = "wasm32")]
pub use wasm::timer::Debounce;
