//! Header drag for the about window.
//!
//! Mouse and touch go through the same session type. A move only records the
//! desired top-left and asks for one animation frame; the frame does the
//! viewport clamp and produces the position to write. Several moves between
//! two frames collapse into the last one.

use crate::geometry::{Point, Size, clamp_origin};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Mouse,
    Touch,
}

impl PointerKind {
    /// Document-level (move, release) event names listened to during a session.
    pub fn tracking_events(self) -> (&'static str, &'static str) {
        match self {
            PointerKind::Mouse => ("mousemove", "mouseup"),
            PointerKind::Touch => ("touchmove", "touchend"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub kind: PointerKind,
    /// Pointer position relative to the window's top-left at press time.
    pub offset: Point,
}

impl DragSession {
    pub fn begin(kind: PointerKind, pointer: Point, window_origin: Point) -> Self {
        Self { kind, offset: pointer - window_origin }
    }

    /// Unclamped top-left that keeps the grab point under `pointer`.
    pub fn origin_for(&self, pointer: Point) -> Point {
        pointer - self.offset
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DragState {
    session: Option<DragSession>,
    pending: Option<Point>,
    frame_requested: bool,
}

impl DragState {
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Whether a move of `kind` belongs to the running session.
    pub fn accepts(&self, kind: PointerKind) -> bool {
        self.session.is_some_and(|s| s.kind == kind)
    }

    /// Start a session. Returns `false` if one is already running.
    pub fn press(&mut self, kind: PointerKind, pointer: Point, window_origin: Point) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.session = Some(DragSession::begin(kind, pointer, window_origin));
        true
    }

    /// Record a move. Returns `true` when a new animation frame must be requested.
    pub fn track(&mut self, kind: PointerKind, pointer: Point) -> bool {
        let Some(session) = self.session.filter(|s| s.kind == kind) else {
            return false;
        };
        self.pending = Some(session.origin_for(pointer));
        if self.frame_requested {
            false
        } else {
            self.frame_requested = true;
            true
        }
    }

    /// Consume the pending move, clamped so `window` stays inside `viewport`.
    pub fn frame(&mut self, window: Size, viewport: Size) -> Option<Point> {
        self.frame_requested = false;
        self.pending
            .take()
            .map(|origin| clamp_origin(origin, window, viewport))
    }

    /// End the session of `kind`. Returns the ended session.
    pub fn release(&mut self, kind: PointerKind) -> Option<DragSession> {
        if self.accepts(kind) { self.session.take() } else { None }
    }

    /// Drop everything, including a move still waiting for its frame.
    pub fn reset(&mut self) -> Option<DragSession> {
        self.pending = None;
        self.frame_requested = false;
        self.session.take()
    }
}
