use std::cell::RefCell;
use std::collections::HashMap;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{AnimationFrame, request_animation_frame};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

use crate::SiteError;
use crate::config::ModalConfig;
use crate::geometry::Point;
use crate::modal::markup::about_window_html;
use crate::modal::{
    CloseReason, InstanceId, ModalController, ModalEffect, ModalEvent, ModalTimer, PointerKind,
};

struct ModalRuntime {
    controller: ModalController,
    document: Document,
    body: HtmlElement,
    element: Option<HtmlElement>,
    /// Close control, backdrop and header listeners; live as long as the element.
    element_listeners: Vec<EventListener>,
    escape: Option<EventListener>,
    drag_listeners: Vec<EventListener>,
    timers: HashMap<ModalTimer, Timeout>,
    frame: Option<AnimationFrame>,
}

thread_local! {
    static MODAL: RefCell<Option<ModalRuntime>> = const { RefCell::new(None) };
}

/// Hook the about triggers. Returns how many were found.
pub(crate) fn install(doc: &Document, config: ModalConfig) -> Result<usize, SiteError> {
    let body = super::body(doc)?;
    let mut wired = 0;
    for id in &config.trigger_ids {
        match doc.get_element_by_id(id) {
            Some(trigger) => {
                EventListener::new(&trigger, "click", |_| dispatch(ModalEvent::Trigger)).forget();
                wired += 1;
            }
            None => gloo::console::log!("about: trigger not on page", id.clone()),
        }
    }
    let runtime = ModalRuntime {
        controller: ModalController::new(config),
        document: doc.clone(),
        body,
        element: None,
        element_listeners: Vec::new(),
        escape: None,
        drag_listeners: Vec::new(),
        timers: HashMap::new(),
        frame: None,
    };
    MODAL.with(|cell| cell.replace(Some(runtime)));
    Ok(wired)
}

fn dispatch(event: ModalEvent) {
    MODAL.with(|cell| {
        if let Some(rt) = cell.borrow_mut().as_mut() {
            rt.run(event);
        }
    });
}

fn on_frame() {
    MODAL.with(|cell| {
        if let Some(rt) = cell.borrow_mut().as_mut() {
            let Some(element) = &rt.element else {
                return;
            };
            let window = super::rect_size(&element.get_bounding_client_rect());
            let Ok(win) = super::window() else {
                return;
            };
            let viewport = super::viewport(&win);
            rt.run(ModalEvent::Frame { window, viewport });
        }
    });
}

fn mouse_point(event: &MouseEvent) -> Point {
    Point::new(event.client_x() as f64, event.client_y() as f64)
}

fn touch_point(event: &TouchEvent) -> Option<Point> {
    let touch = event.touches().get(0)?;
    Some(Point::new(touch.client_x() as f64, touch.client_y() as f64))
}

impl ModalRuntime {
    fn run(&mut self, event: ModalEvent) {
        for effect in self.controller.handle(event) {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: ModalEffect) {
        match effect {
            ModalEffect::Mount(id) => {
                if let Err(err) = self.mount(id) {
                    gloo::console::warn!("about: mount failed", err.to_string());
                }
            }
            ModalEffect::Unmount(id) => {
                self.element_listeners.clear();
                if let Some(element) = self.element.take() {
                    element.remove();
                }
                gloo::console::log!("about: closed", id.0);
            }
            ModalEffect::SetVisible(on) => {
                if let Some(element) = &self.element {
                    let class = &self.controller.config().visible_class;
                    let classes = element.class_list();
                    let _ = if on { classes.add_1(class) } else { classes.remove_1(class) };
                }
            }
            ModalEffect::SetScrollLocked(locked) => {
                let _ = self
                    .body
                    .style()
                    .set_property("overflow", if locked { "hidden" } else { "" });
            }
            ModalEffect::AttachEscape => {
                let listener = EventListener::new(&self.document, "keydown", |event| {
                    if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                        dispatch(ModalEvent::KeyDown { key: event.key() });
                    }
                });
                self.escape = Some(listener);
            }
            ModalEffect::DetachEscape => self.escape = None,
            ModalEffect::AttachDrag(kind) => self.attach_drag(kind),
            ModalEffect::DetachDrag(_) => self.drag_listeners.clear(),
            ModalEffect::RequestFrame => {
                self.frame = Some(request_animation_frame(|_| on_frame()));
            }
            ModalEffect::SetPosition(origin) => {
                if let Some(element) = &self.element {
                    let style = element.style();
                    let _ = style.set_property("left", &format!("{}px", origin.x));
                    let _ = style.set_property("top", &format!("{}px", origin.y));
                    let _ = style.set_property("transform", "none");
                    let _ = style.set_property("margin", "0");
                }
            }
            ModalEffect::Schedule { timer, task, delay_ms } => {
                let timeout = Timeout::new(delay_ms, move || {
                    dispatch(ModalEvent::TimerElapsed { timer, task });
                });
                self.timers.insert(timer, timeout);
            }
        }
    }

    fn mount(&mut self, id: InstanceId) -> Result<(), SiteError> {
        let cfg = self.controller.config().clone();
        let element: HtmlElement = self
            .document
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SiteError::NotHtml(cfg.window_class.clone()))?;
        element.set_class_name(&cfg.window_class);
        element.set_inner_html(&about_window_html(&cfg));
        self.body.append_child(&element)?;

        let mut listeners = Vec::new();

        if let Some(close) = element.query_selector(&format!("#{}", cfg.close_id))? {
            listeners.push(EventListener::new(&close, "click", |_| {
                dispatch(ModalEvent::Close(CloseReason::CloseControl));
            }));
        }

        let backdrop = element.clone();
        listeners.push(EventListener::new(&element, "click", move |event| {
            let target = event.target();
            if target.as_ref() == Some(AsRef::<EventTarget>::as_ref(&backdrop)) {
                dispatch(ModalEvent::Close(CloseReason::Backdrop));
            }
        }));

        if let Some(header) = element.query_selector(&format!("#{}", cfg.header_id))? {
            let window_el = element.clone();
            let close_class = cfg.close_class.clone();
            listeners.push(EventListener::new(&header, "mousedown", move |event| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                press(event, PointerKind::Mouse, mouse_point(mouse), &window_el, &close_class);
            }));

            let window_el = element.clone();
            let close_class = cfg.close_class.clone();
            listeners.push(EventListener::new_with_options(
                &header,
                "touchstart",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    let Some(pointer) = event.dyn_ref::<TouchEvent>().and_then(touch_point) else {
                        return;
                    };
                    press(event, PointerKind::Touch, pointer, &window_el, &close_class);
                },
            ));
        }

        self.element = Some(element);
        self.element_listeners = listeners;
        gloo::console::log!("about: opened", id.0);
        Ok(())
    }

    fn attach_drag(&mut self, kind: PointerKind) {
        let (move_event, release_event) = kind.tracking_events();
        let on_move = EventListener::new_with_options(
            &self.document,
            move_event,
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let pointer = match kind {
                    PointerKind::Mouse => event.dyn_ref::<MouseEvent>().map(mouse_point),
                    PointerKind::Touch => event.dyn_ref::<TouchEvent>().and_then(touch_point),
                };
                if let Some(pointer) = pointer {
                    event.prevent_default();
                    dispatch(ModalEvent::Move { kind, pointer });
                }
            },
        );
        let on_release = EventListener::new(&self.document, release_event, move |_| {
            dispatch(ModalEvent::Release { kind });
        });
        self.drag_listeners = vec![on_move, on_release];
    }
}

fn press(event: &Event, kind: PointerKind, pointer: Point, window_el: &HtmlElement, close_class: &str) {
    let on_close_control = super::target_has_class(event.target(), close_class);
    if !on_close_control {
        event.prevent_default();
    }
    let window_origin = super::rect_origin(&window_el.get_bounding_client_rect());
    dispatch(ModalEvent::Press { kind, pointer, window_origin, on_close_control });
}
