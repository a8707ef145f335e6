use std::cell::RefCell;

use crate::SiteError;
use crate::config::ThemeConfig;
use crate::theme::{ThemeController, ThemePreference};

use super::{BodyClasses, LocalStorageStore};

type LiveTheme = ThemeController<LocalStorageStore, BodyClasses>;

thread_local! {
    static THEME: RefCell<Option<LiveTheme>> = const { RefCell::new(None) };
}

/// Restore the saved theme onto `<body>` and keep the controller for toggles.
pub(crate) fn install(config: ThemeConfig) -> Result<ThemePreference, SiteError> {
    let win = super::window()?;
    let doc = super::document()?;
    let body = super::body(&doc)?;
    let mut controller = ThemeController::new(config, LocalStorageStore::open(&win), BodyClasses::new(body));
    let mode = controller.restore();
    THEME.with(|cell| cell.replace(Some(controller)));
    Ok(mode)
}

pub(crate) fn apply(mode: ThemePreference) {
    THEME.with(|cell| {
        if let Some(theme) = cell.borrow_mut().as_mut() {
            if !theme.apply_theme(mode) {
                gloo::console::warn!("theme: could not persist", mode.as_str());
            }
        }
    });
}

/// Flip the theme. Before `install` this is a no-op reporting light.
pub(crate) fn toggle() -> ThemePreference {
    THEME.with(|cell| match cell.borrow_mut().as_mut() {
        Some(theme) => theme.toggle_theme(),
        None => ThemePreference::Light,
    })
}
