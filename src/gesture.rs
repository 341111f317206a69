//! Tap and long-press recognition for pointer input.
//!
//! Terminal runtimes deliver mouse input as discrete events, so the widget
//! accepts them as [`PointerEvent`]s that carry their own timestamps. A
//! press followed by a release on the same line is a tap; a press held for
//! the long-press timeout is a long press. The timeout is delivered as a
//! [`LongPressMsg`] tick so a long press fires while the button is still
//! held, and a release that arrives after the timeout without the tick
//! having been processed still counts as a long press.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, Instant};

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// What happened to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Primary button pressed.
    Down,
    /// Pointer moved with the button held.
    Drag,
    /// Primary button released.
    Up,
    /// Wheel scrolled towards the top of the content.
    WheelUp,
    /// Wheel scrolled towards the bottom of the content.
    WheelDown,
}

/// A pointer event in widget-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// Event kind.
    pub kind: PointerKind,
    /// Column relative to the widget.
    pub column: u16,
    /// Line relative to the widget.
    pub line: u16,
    /// When the event happened.
    pub at: Instant,
}

impl PointerEvent {
    /// Creates an event stamped with the current time.
    pub fn new(kind: PointerKind, column: u16, line: u16) -> Self {
        Self::at(kind, column, line, Instant::now())
    }

    /// Creates an event with an explicit timestamp.
    pub fn at(kind: PointerKind, column: u16, line: u16, at: Instant) -> Self {
        Self {
            kind,
            column,
            line,
            at,
        }
    }
}

/// A recognised gesture, located by the line it started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Short press and release.
    Tap {
        /// Line of the press.
        line: u16,
    },
    /// Press held past the long-press timeout.
    LongPress {
        /// Line of the press.
        line: u16,
    },
}

/// Delivered when a press has been held for the long-press timeout.
#[derive(Debug, Clone)]
pub struct LongPressMsg {
    /// The detector this message belongs to.
    pub id: i64,
    seq: u64,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    line: u16,
    at: Instant,
    seq: u64,
    moved: bool,
    fired: bool,
}

/// Recognises taps and long presses.
#[derive(Debug, Clone)]
pub struct GestureDetector {
    id: i64,
    long_press_timeout: Duration,
    slop: u16,
    press: Option<Press>,
    seq: u64,
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureDetector {
    /// Creates a detector with a 500ms long-press timeout and no movement
    /// tolerance.
    pub fn new() -> Self {
        Self {
            id: next_id(),
            long_press_timeout: Duration::from_millis(500),
            slop: 0,
            press: None,
            seq: 0,
        }
    }

    /// Sets the long-press timeout.
    pub fn with_long_press_timeout(mut self, timeout: Duration) -> Self {
        self.long_press_timeout = timeout;
        self
    }

    /// Sets how many lines the pointer may move before a press turns into a
    /// drag.
    pub fn with_slop(mut self, lines: u16) -> Self {
        self.slop = lines;
        self
    }

    /// The identifier used to route [`LongPressMsg`]s.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The long-press timeout.
    pub fn long_press_timeout(&self) -> Duration {
        self.long_press_timeout
    }

    /// Whether a press is in progress.
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Starts a press. Returns the command that delivers the long-press
    /// timeout.
    pub fn on_down(&mut self, line: u16, at: Instant) -> Cmd {
        self.seq += 1;
        self.press = Some(Press {
            line,
            at,
            seq: self.seq,
            moved: false,
            fired: false,
        });
        let id = self.id;
        let seq = self.seq;
        bubbletea_tick(self.long_press_timeout, move |_| {
            Box::new(LongPressMsg { id, seq }) as Msg
        })
    }

    /// Tracks pointer movement. Moving past the slop cancels tap and
    /// long-press recognition for this press.
    pub fn on_drag(&mut self, line: u16) {
        if let Some(press) = self.press.as_mut() {
            if line.abs_diff(press.line) > self.slop {
                press.moved = true;
            }
        }
    }

    /// Ends a press and reports the gesture it completed, if any.
    pub fn on_up(&mut self, at: Instant) -> Option<Gesture> {
        let press = self.press.take()?;
        if press.moved || press.fired {
            return None;
        }
        let line = press.line;
        if at.saturating_duration_since(press.at) >= self.long_press_timeout {
            Some(Gesture::LongPress { line })
        } else {
            Some(Gesture::Tap { line })
        }
    }

    /// Handles a [`LongPressMsg`]. Fires a long press when the message
    /// belongs to the press still being held.
    pub fn on_long_press(&mut self, msg: &LongPressMsg) -> Option<Gesture> {
        if msg.id != self.id {
            return None;
        }
        let press = self.press.as_mut()?;
        if press.seq != msg.seq || press.moved || press.fired {
            return None;
        }
        press.fired = true;
        Some(Gesture::LongPress { line: press.line })
    }

    /// Creates the long-press message for the current press, if any.
    pub fn long_press_msg(&self) -> Option<LongPressMsg> {
        self.press.map(|p| LongPressMsg {
            id: self.id,
            seq: p.seq,
        })
    }

    /// Drops the current press.
    pub fn cancel(&mut self) {
        self.press = None;
    }
}
