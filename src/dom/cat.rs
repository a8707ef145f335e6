use std::cell::RefCell;
use std::collections::HashMap;

use gloo::events::EventListener;
use gloo::timers::callback::{Interval, Timeout};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use crate::cat::{CatController, CatEffect, CatEvent, CatTimer};
use crate::config::CatConfig;
use crate::geometry::Point;
use crate::rng;

struct CatRuntime {
    controller: CatController,
    widget: HtmlElement,
    speech: Option<Element>,
    timers: HashMap<CatTimer, Timeout>,
}

thread_local! {
    static CAT: RefCell<Option<CatRuntime>> = const { RefCell::new(None) };
}

/// Wire the cat widget. Returns `false` when the page has no cat.
pub(crate) fn install(doc: &Document, config: CatConfig) -> bool {
    let Some(widget) = super::html_by_id(doc, &config.widget_id) else {
        gloo::console::log!("cat: no widget, skipping", config.widget_id.clone());
        return false;
    };
    let speech = doc.get_element_by_id(&config.speech_id);
    if speech.is_none() {
        gloo::console::warn!("cat: no speech bubble", config.speech_id.clone());
    }
    let idle_ms = config.idle_interval_ms;

    EventListener::new(&widget, "click", |event| {
        event.prevent_default();
        event.stop_propagation();
        let theme = super::theme::toggle();
        dispatch(CatEvent::Clicked { theme });
    })
    .forget();

    let tracked = widget.clone();
    EventListener::new(doc, "mousemove", move |event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let center = super::rect_center(&tracked.get_bounding_client_rect());
        let pointer = Point::new(event.client_x() as f64, event.client_y() as f64);
        dispatch(CatEvent::PointerMoved { center, pointer });
    })
    .forget();

    Interval::new(idle_ms, || {
        let phrases = CAT.with(|cell| {
            cell.borrow()
                .as_ref()
                .map_or(0, |rt| rt.controller.config().idle_phrases.len())
        });
        dispatch(CatEvent::IdleTick {
            roll: rng::unit(),
            pick: rng::index(phrases),
        });
    })
    .forget();

    let runtime = CatRuntime {
        controller: CatController::new(config),
        widget,
        speech,
        timers: HashMap::new(),
    };
    CAT.with(|cell| cell.replace(Some(runtime)));
    true
}

fn dispatch(event: CatEvent) {
    CAT.with(|cell| {
        if let Some(rt) = cell.borrow_mut().as_mut() {
            for effect in rt.controller.handle(event) {
                rt.apply(effect);
            }
        }
    });
}

impl CatRuntime {
    fn apply(&mut self, effect: CatEffect) {
        match effect {
            CatEffect::SetSpeech(text) => {
                if let Some(speech) = &self.speech {
                    speech.set_text_content(Some(&text));
                }
            }
            CatEffect::SetSpeaking(on) => {
                let class = &self.controller.config().speaking_class;
                let classes = self.widget.class_list();
                let _ = if on { classes.add_1(class) } else { classes.remove_1(class) };
            }
            CatEffect::SetExcited(on) => {
                let animation = if on { self.controller.config().excited_animation.as_str() } else { "" };
                let _ = self.widget.style().set_property("animation", animation);
            }
            CatEffect::SetPupilOffset(offset) => {
                self.style_pupils(&format!("translate({}px, {}px)", offset.x, offset.y));
            }
            CatEffect::ClearPupils => self.style_pupils(""),
            CatEffect::Schedule { timer, task, delay_ms } => {
                // Replacing the entry drops (clears) the superseded timeout.
                let timeout = Timeout::new(delay_ms, move || {
                    dispatch(CatEvent::TimerElapsed { timer, task });
                });
                self.timers.insert(timer, timeout);
            }
        }
    }

    fn style_pupils(&self, transform: &str) {
        let Ok(pupils) = self.widget.query_selector_all(&self.controller.config().pupil_selector) else {
            return;
        };
        for i in 0..pupils.length() {
            if let Some(pupil) = pupils.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
                let _ = pupil.style().set_property("transform", transform);
            }
        }
    }
}
