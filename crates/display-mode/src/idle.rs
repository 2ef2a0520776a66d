//! Idle fade for the toggle control.
//!
//! The control fades after a quiet period and wakes on nearby or direct
//! interaction. This is presentation only: it never reads or writes the
//! display mode, and the controller never waits on it.
//!
//! Time is passed in explicitly. The host owns the actual timer and asks
//! [`IdleFade::next_deadline`] when to call [`IdleFade::tick`]; there is at
//! most one pending deadline at any time.

use std::time::{Duration, Instant};

use crate::config::IdleConfig;

/// An axis-aligned box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Whether `(x, y)` lies within `margin` of this box (edges inclusive).
    pub fn contains_within(&self, x: f64, y: f64, margin: f64) -> bool {
        x >= self.left - margin
            && x <= self.right + margin
            && y >= self.top - margin
            && y <= self.bottom + margin
    }
}

/// Document events the idle fade reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activity {
    HoverEnter,
    HoverLeave,
    FocusIn,
    FocusOut,
    PointerMove { x: f64, y: f64 },
    TouchStart { x: f64, y: f64 },
    PointerDown,
    KeyDown,
    Scroll,
    Resize,
}

/// Idle-fade state for one control.
#[derive(Debug, Clone)]
pub struct IdleFade {
    delay: Duration,
    proximity: f64,
    disabled: bool,
    bounds: Option<Rect>,
    deadline: Option<Instant>,
    hovered: bool,
    focused: bool,
    idle: bool,
}

impl IdleFade {
    pub fn new(config: &IdleConfig) -> Self {
        Self {
            delay: config.delay(),
            proximity: config.proximity_px,
            disabled: config.coarse_pointer,
            bounds: None,
            deadline: None,
            hovered: false,
            focused: false,
            idle: false,
        }
    }

    /// Arms the first deadline. Call once the control is on screen.
    pub fn start(&mut self, now: Instant) {
        self.rearm(now);
    }

    /// Records the control's bounding box for proximity checks.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
    }

    pub fn is_idle(&self) -> bool {
        self.idle
    }

    /// When the host should call [`tick`](IdleFade::tick) next, if at all.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Feeds an activity event. Returns `true` if the idle state changed.
    pub fn handle(&mut self, activity: Activity, now: Instant) -> bool {
        if self.disabled {
            return false;
        }
        let was_idle = self.idle;
        match activity {
            Activity::HoverEnter => {
                self.hovered = true;
                self.wake(now);
            }
            Activity::FocusIn => {
                self.focused = true;
                self.wake(now);
            }
            Activity::HoverLeave => {
                self.hovered = false;
                self.rearm(now);
            }
            Activity::FocusOut => {
                self.focused = false;
                self.rearm(now);
            }
            Activity::PointerMove { x, y } | Activity::TouchStart { x, y } => {
                if self.is_near(x, y) {
                    self.wake(now);
                }
            }
            Activity::PointerDown | Activity::KeyDown => self.wake(now),
            Activity::Scroll | Activity::Resize => self.rearm(now),
        }
        was_idle != self.idle
    }

    /// Fires the deadline if it has passed. Returns `true` if the control just went idle.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline && !self.held() => {
                self.deadline = None;
                let changed = !self.idle;
                self.idle = true;
                changed
            }
            _ => false,
        }
    }

    fn held(&self) -> bool {
        self.hovered || self.focused
    }

    fn is_near(&self, x: f64, y: f64) -> bool {
        self.bounds
            .map_or(false, |b| b.contains_within(x, y, self.proximity))
    }

    fn wake(&mut self, now: Instant) {
        self.idle = false;
        self.rearm(now);
    }

    // Replaces any pending deadline; hover or focus suspends it.
    fn rearm(&mut self, now: Instant) {
        if self.disabled || self.held() {
            self.deadline = None;
        } else {
            self.deadline = Some(now + self.delay);
        }
    }
}
