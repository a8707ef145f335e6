use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::SiteError;
use crate::config::LinkConfig;
use crate::links::fragment_selector;

/// Contact button and smooth in-page scrolling. Returns the number of
/// fragment anchors intercepted.
pub(crate) fn install(doc: &Document, config: &LinkConfig) -> Result<u32, SiteError> {
    if let Some(contact) = doc.get_element_by_id(&config.contact_id) {
        let href = config.contact_href.clone();
        EventListener::new(&contact, "click", move |_| {
            let navigated = super::window()
                .and_then(|win| win.location().set_href(&href).map_err(SiteError::from));
            if let Err(err) = navigated {
                gloo::console::warn!("contact: navigation failed", err.to_string());
            }
        })
        .forget();
    }

    if !config.smooth_scroll {
        return Ok(0);
    }
    let anchors = doc.query_selector_all(r##"a[href^="#"]"##)?;
    let mut wired = 0;
    for i in 0..anchors.length() {
        let Some(anchor) = anchors.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let doc = doc.clone();
        let link = anchor.clone();
        EventListener::new_with_options(
            &anchor,
            "click",
            gloo::events::EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                let href = link.get_attribute("href").unwrap_or_default();
                // An invalid selector throws; treat it like a missing target.
                let target = fragment_selector(&href).and_then(|sel| doc.query_selector(sel).ok().flatten());
                if let Some(target) = target {
                    let opts = ScrollIntoViewOptions::new();
                    opts.set_behavior(ScrollBehavior::Smooth);
                    opts.set_block(ScrollLogicalPosition::Start);
                    target.scroll_into_view_with_scroll_into_view_options(&opts);
                }
            },
        )
        .forget();
        wired += 1;
    }
    Ok(wired)
}
