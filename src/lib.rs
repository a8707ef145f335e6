//! Kiki site core crate.
//!
//! Interactivity for the portfolio page: the light/dark theme, the kiki cat
//! widget and the draggable about window. The controllers (`theme`, `cat`,
//! `modal`) are plain Rust state machines usable on the host; `dom` wires
//! them to the live document and is only reached through `start_site()`.

use std::cell::Cell;

use wasm_bindgen::prelude::*;

pub mod cat;
pub mod config;
mod dom;
mod error;
pub mod geometry;
pub mod links;
pub mod modal;
mod rng;
pub mod task;
pub mod theme;

pub use config::SiteConfig;
pub use error::SiteError;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Entrypoints (call once the DOM has loaded)
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_site() -> Result<(), JsValue> {
    install(SiteConfig::default()).map_err(JsValue::from)
}

/// Same as `start_site()` with a JSON override of the default configuration.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_site_with_config(json: &str) -> Result<(), JsValue> {
    let config = SiteConfig::from_json(json)?;
    install(config).map_err(JsValue::from)
}

/// Flip the theme from page script; returns the new mode name.
#[wasm_bindgen]
pub fn toggle_theme() -> String {
    dom::theme::toggle().as_str().to_string()
}

/// Force a mode from page script. Anything but "light" selects dark.
#[wasm_bindgen]
pub fn apply_theme(mode: &str) {
    dom::theme::apply(theme::ThemePreference::from_stored(mode));
}

thread_local! {
    static INSTALLED: Cell<bool> = const { Cell::new(false) };
}

/// Listeners are forgotten once wired, so a second install would double
/// every handler. Later calls are ignored.
fn install(config: SiteConfig) -> Result<(), SiteError> {
    let doc = dom::document()?;
    if INSTALLED.with(|flag| flag.replace(true)) {
        gloo::console::warn!("kiki-site: already started, ignoring");
        return Ok(());
    }
    let SiteConfig { theme, cat, modal, links } = config;

    // Cat listeners toggle the theme, so the theme controller goes in first.
    let mode = dom::theme::install(theme)?;
    let cat = dom::cat::install(&doc, cat);
    let triggers = dom::modal::install(&doc, modal)?;
    let anchors = dom::links::install(&doc, &links)?;

    gloo::console::log!(format!(
        "kiki-site ready: theme={mode} cat={cat} about-triggers={triggers} anchors={anchors}"
    ));
    Ok(())
}
