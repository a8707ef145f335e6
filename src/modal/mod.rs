//! About window: a single floating panel that opens, can be dragged by its
//! header, and closes with an exit animation.
//!
//! Lifecycle: `Closed -> Opening -> Open -> Closing -> Closed`. The reveal
//! (`visible` class) lands one short tick after mount so the CSS transition
//! runs; on close the class is dropped at once and the element is detached
//! after the teardown delay. Both delays are [`TaskSlot`]s, so a timer that
//! outlives its instance is ignored instead of tearing down a newer window.
//!
//! Like the cat, the controller is a pure transition over [`ModalEvent`]s and
//! hands back [`ModalEffect`]s for the DOM layer.

pub mod drag;
pub mod markup;

use crate::config::ModalConfig;
use crate::geometry::{Point, Size};
use crate::task::{TaskId, TaskSlot};

pub use drag::{DragSession, DragState, PointerKind};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModalPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InstanceId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseReason {
    CloseControl,
    /// Click landed on the window element itself, outside its content.
    Backdrop,
    Escape,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModalTimer {
    Reveal,
    Teardown,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ModalEvent {
    /// About trigger clicked.
    Trigger,
    Close(CloseReason),
    KeyDown { key: String },
    TimerElapsed { timer: ModalTimer, task: TaskId },
    Press {
        kind: PointerKind,
        pointer: Point,
        window_origin: Point,
        on_close_control: bool,
    },
    Move { kind: PointerKind, pointer: Point },
    /// Animation frame requested by [`ModalEffect::RequestFrame`].
    Frame { window: Size, viewport: Size },
    Release { kind: PointerKind },
}

#[derive(Clone, Debug, PartialEq)]
pub enum ModalEffect {
    Mount(InstanceId),
    Unmount(InstanceId),
    SetVisible(bool),
    SetScrollLocked(bool),
    AttachEscape,
    DetachEscape,
    AttachDrag(PointerKind),
    DetachDrag(PointerKind),
    RequestFrame,
    /// Absolute top-left; replaces the centering transform.
    SetPosition(Point),
    Schedule { timer: ModalTimer, task: TaskId, delay_ms: u32 },
}

pub struct ModalController {
    config: ModalConfig,
    phase: ModalPhase,
    instance: Option<InstanceId>,
    next_instance: u32,
    escape_attached: bool,
    scroll_locked: bool,
    reveal: TaskSlot,
    teardown: TaskSlot,
    drag: DragState,
    position: Option<Point>,
}

impl ModalController {
    pub fn new(config: ModalConfig) -> Self {
        Self {
            config,
            phase: ModalPhase::Closed,
            instance: None,
            next_instance: 0,
            escape_attached: false,
            scroll_locked: false,
            reveal: TaskSlot::new(),
            teardown: TaskSlot::new(),
            drag: DragState::default(),
            position: None,
        }
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn instance(&self) -> Option<InstanceId> {
        self.instance
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Whether a move / release of `kind` is part of the running drag.
    pub fn tracks(&self, kind: PointerKind) -> bool {
        self.drag.accepts(kind)
    }

    /// Last position written by a drag, `None` while still centred.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn config(&self) -> &ModalConfig {
        &self.config
    }

    pub fn handle(&mut self, event: ModalEvent) -> Vec<ModalEffect> {
        match event {
            ModalEvent::Trigger => self.on_trigger(),
            ModalEvent::Close(_) => self.begin_close(),
            ModalEvent::KeyDown { key } => {
                if key == "Escape" && self.escape_attached {
                    self.begin_close()
                } else {
                    Vec::new()
                }
            }
            ModalEvent::TimerElapsed { timer, task } => self.on_timer(timer, task),
            ModalEvent::Press { kind, pointer, window_origin, on_close_control } => {
                self.on_press(kind, pointer, window_origin, on_close_control)
            }
            ModalEvent::Move { kind, pointer } => {
                if self.instance.is_some() && self.drag.track(kind, pointer) {
                    vec![ModalEffect::RequestFrame]
                } else {
                    Vec::new()
                }
            }
            ModalEvent::Frame { window, viewport } => {
                let next = self.drag.frame(window, viewport);
                match (self.instance, next) {
                    (Some(_), Some(origin)) => {
                        self.position = Some(origin);
                        vec![ModalEffect::SetPosition(origin)]
                    }
                    _ => Vec::new(),
                }
            }
            ModalEvent::Release { kind } => match self.drag.release(kind) {
                Some(session) => vec![ModalEffect::DetachDrag(session.kind)],
                None => Vec::new(),
            },
        }
    }

    fn on_trigger(&mut self) -> Vec<ModalEffect> {
        if self.instance.is_some() {
            return self.destroy();
        }
        let id = InstanceId(self.next_instance);
        self.next_instance = self.next_instance.wrapping_add(1);
        self.instance = Some(id);
        self.phase = ModalPhase::Opening;
        self.position = None;
        self.escape_attached = true;
        self.scroll_locked = true;
        vec![
            ModalEffect::Mount(id),
            ModalEffect::SetScrollLocked(true),
            ModalEffect::AttachEscape,
            ModalEffect::Schedule {
                timer: ModalTimer::Reveal,
                task: self.reveal.arm(),
                delay_ms: self.config.reveal_delay_ms,
            },
        ]
    }

    fn begin_close(&mut self) -> Vec<ModalEffect> {
        if !matches!(self.phase, ModalPhase::Opening | ModalPhase::Open) {
            return Vec::new();
        }
        self.phase = ModalPhase::Closing;
        self.reveal.cancel();
        let mut effects = vec![ModalEffect::SetVisible(false)];
        self.release_page(&mut effects);
        effects.push(ModalEffect::Schedule {
            timer: ModalTimer::Teardown,
            task: self.teardown.arm(),
            delay_ms: self.config.teardown_delay_ms,
        });
        effects
    }

    /// Detach the current instance right away, whatever its phase.
    fn destroy(&mut self) -> Vec<ModalEffect> {
        let mut effects = Vec::new();
        self.reveal.cancel();
        self.teardown.cancel();
        self.release_page(&mut effects);
        if let Some(id) = self.instance.take() {
            effects.push(ModalEffect::Unmount(id));
        }
        self.phase = ModalPhase::Closed;
        effects
    }

    // Scroll lock, Escape listener and drag listeners all go with the instance.
    fn release_page(&mut self, effects: &mut Vec<ModalEffect>) {
        if let Some(session) = self.drag.reset() {
            effects.push(ModalEffect::DetachDrag(session.kind));
        }
        if self.escape_attached {
            self.escape_attached = false;
            effects.push(ModalEffect::DetachEscape);
        }
        if self.scroll_locked {
            self.scroll_locked = false;
            effects.push(ModalEffect::SetScrollLocked(false));
        }
    }

    fn on_timer(&mut self, timer: ModalTimer, task: TaskId) -> Vec<ModalEffect> {
        match timer {
            ModalTimer::Reveal if self.reveal.fire(task) && self.phase == ModalPhase::Opening => {
                self.phase = ModalPhase::Open;
                vec![ModalEffect::SetVisible(true)]
            }
            ModalTimer::Teardown
                if self.teardown.fire(task) && self.phase == ModalPhase::Closing =>
            {
                self.destroy()
            }
            _ => Vec::new(),
        }
    }

    fn on_press(
        &mut self,
        kind: PointerKind,
        pointer: Point,
        window_origin: Point,
        on_close_control: bool,
    ) -> Vec<ModalEffect> {
        if on_close_control || !matches!(self.phase, ModalPhase::Opening | ModalPhase::Open) {
            return Vec::new();
        }
        if self.drag.press(kind, pointer, window_origin) {
            vec![ModalEffect::AttachDrag(kind)]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduled(effects: &[ModalEffect], which: ModalTimer) -> Option<TaskId> {
        effects.iter().find_map(|e| match e {
            ModalEffect::Schedule { timer, task, .. } if *timer == which => Some(*task),
            _ => None,
        })
    }

    fn opened() -> ModalController {
        let mut modal = ModalController::new(ModalConfig::default());
        let fx = modal.handle(ModalEvent::Trigger);
        let reveal = scheduled(&fx, ModalTimer::Reveal).unwrap();
        modal.handle(ModalEvent::TimerElapsed { timer: ModalTimer::Reveal, task: reveal });
        modal
    }

    fn escape() -> ModalEvent {
        ModalEvent::KeyDown { key: "Escape".into() }
    }

    #[test]
    fn test_open_mounts_and_locks_scroll() {
        let mut modal = ModalController::new(ModalConfig::default());
        let fx = modal.handle(ModalEvent::Trigger);
        assert_eq!(fx[0], ModalEffect::Mount(InstanceId(0)));
        assert!(fx.contains(&ModalEffect::SetScrollLocked(true)));
        assert!(fx.contains(&ModalEffect::AttachEscape));
        assert_eq!(modal.phase(), ModalPhase::Opening);

        let reveal = scheduled(&fx, ModalTimer::Reveal).unwrap();
        let fx = modal.handle(ModalEvent::TimerElapsed { timer: ModalTimer::Reveal, task: reveal });
        assert_eq!(fx, vec![ModalEffect::SetVisible(true)]);
        assert_eq!(modal.phase(), ModalPhase::Open);
    }

    #[test]
    fn test_double_trigger_leaves_nothing_open() {
        let mut modal = ModalController::new(ModalConfig::default());
        modal.handle(ModalEvent::Trigger);
        let fx = modal.handle(ModalEvent::Trigger);
        assert!(fx.contains(&ModalEffect::Unmount(InstanceId(0))));
        assert!(fx.contains(&ModalEffect::SetScrollLocked(false)));
        assert!(fx.contains(&ModalEffect::DetachEscape));
        assert_eq!(modal.instance(), None);
        assert_eq!(modal.phase(), ModalPhase::Closed);
    }

    #[test]
    fn test_close_animates_then_detaches() {
        let mut modal = opened();
        let fx = modal.handle(ModalEvent::Close(CloseReason::CloseControl));
        assert_eq!(fx[0], ModalEffect::SetVisible(false));
        assert!(fx.contains(&ModalEffect::SetScrollLocked(false)));
        assert_eq!(modal.phase(), ModalPhase::Closing);
        assert!(modal.instance().is_some());

        let teardown = scheduled(&fx, ModalTimer::Teardown).unwrap();
        let fx = modal.handle(ModalEvent::TimerElapsed { timer: ModalTimer::Teardown, task: teardown });
        assert_eq!(fx, vec![ModalEffect::Unmount(InstanceId(0))]);
        assert_eq!(modal.phase(), ModalPhase::Closed);
    }

    #[test]
    fn test_second_close_while_closing_is_noop() {
        let mut modal = opened();
        modal.handle(ModalEvent::Close(CloseReason::Backdrop));
        assert!(modal.handle(ModalEvent::Close(CloseReason::CloseControl)).is_empty());
        assert!(modal.handle(escape()).is_empty());
    }

    #[test]
    fn test_escape_closes_once() {
        let mut modal = opened();
        let fx = modal.handle(escape());
        assert!(fx.contains(&ModalEffect::DetachEscape));
        assert_eq!(modal.phase(), ModalPhase::Closing);
    }

    #[test]
    fn test_escape_when_closed_is_noop() {
        let mut modal = ModalController::new(ModalConfig::default());
        assert!(modal.handle(escape()).is_empty());
        assert!(modal.handle(ModalEvent::KeyDown { key: "Enter".into() }).is_empty());
        assert_eq!(modal.phase(), ModalPhase::Closed);
    }

    #[test]
    fn test_stale_teardown_spares_new_instance() {
        let mut modal = opened();
        let fx = modal.handle(ModalEvent::Close(CloseReason::Escape));
        let stale = scheduled(&fx, ModalTimer::Teardown).unwrap();
        // Trigger during the exit animation removes the old window at once...
        modal.handle(ModalEvent::Trigger);
        // ...and the next trigger opens a fresh one.
        let fx = modal.handle(ModalEvent::Trigger);
        assert_eq!(fx[0], ModalEffect::Mount(InstanceId(1)));
        let fx = modal.handle(ModalEvent::TimerElapsed { timer: ModalTimer::Teardown, task: stale });
        assert!(fx.is_empty());
        assert_eq!(modal.instance(), Some(InstanceId(1)));
    }

    #[test]
    fn test_close_during_opening_skips_reveal() {
        let mut modal = ModalController::new(ModalConfig::default());
        let fx = modal.handle(ModalEvent::Trigger);
        let reveal = scheduled(&fx, ModalTimer::Reveal).unwrap();
        modal.handle(ModalEvent::Close(CloseReason::CloseControl));
        let fx = modal.handle(ModalEvent::TimerElapsed { timer: ModalTimer::Reveal, task: reveal });
        assert!(fx.is_empty());
        assert_eq!(modal.phase(), ModalPhase::Closing);
    }

    #[test]
    fn test_drag_round_trip() {
        let mut modal = opened();
        let fx = modal.handle(ModalEvent::Press {
            kind: PointerKind::Mouse,
            pointer: Point::new(300.0, 200.0),
            window_origin: Point::new(280.0, 190.0),
            on_close_control: false,
        });
        assert_eq!(fx, vec![ModalEffect::AttachDrag(PointerKind::Mouse)]);
        assert!(modal.tracks(PointerKind::Mouse));

        let fx = modal.handle(ModalEvent::Move { kind: PointerKind::Mouse, pointer: Point::new(420.0, 260.0) });
        assert_eq!(fx, vec![ModalEffect::RequestFrame]);
        let fx = modal.handle(ModalEvent::Frame {
            window: Size::new(500.0, 400.0),
            viewport: Size::new(1200.0, 800.0),
        });
        assert_eq!(fx, vec![ModalEffect::SetPosition(Point::new(400.0, 250.0))]);
        assert_eq!(modal.position(), Some(Point::new(400.0, 250.0)));

        let fx = modal.handle(ModalEvent::Release { kind: PointerKind::Mouse });
        assert_eq!(fx, vec![ModalEffect::DetachDrag(PointerKind::Mouse)]);
        assert!(modal.handle(ModalEvent::Move { kind: PointerKind::Mouse, pointer: Point::new(0.0, 0.0) }).is_empty());
    }

    #[test]
    fn test_press_on_close_control_does_not_drag() {
        let mut modal = opened();
        let fx = modal.handle(ModalEvent::Press {
            kind: PointerKind::Touch,
            pointer: Point::new(10.0, 10.0),
            window_origin: Point::new(0.0, 0.0),
            on_close_control: true,
        });
        assert!(fx.is_empty());
        assert!(!modal.is_dragging());
    }

    #[test]
    fn test_close_mid_drag_detaches_listeners() {
        let mut modal = opened();
        modal.handle(ModalEvent::Press {
            kind: PointerKind::Touch,
            pointer: Point::new(10.0, 10.0),
            window_origin: Point::new(0.0, 0.0),
            on_close_control: false,
        });
        let fx = modal.handle(escape());
        assert!(fx.contains(&ModalEffect::DetachDrag(PointerKind::Touch)));
        assert!(!modal.is_dragging());
    }
}
