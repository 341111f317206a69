//! Pull-to-refresh gesture detection and the refreshing indicator.
//!
//! [`PullToRefresh`] wraps the top of a list. A press on the list while it
//! is scrolled to the top, followed by a drag downwards of at least
//! [`trigger_distance`](PullToRefresh::trigger_distance) lines and a release,
//! is the refresh gesture. The owner decides whether the gesture actually
//! starts a refresh and then turns the indicator on with
//! [`set_refreshing`](PullToRefresh::set_refreshing).
//!
//! While refreshing, the indicator animates like a spinner: each [`TickMsg`]
//! advances one frame and the frame colour cycles through the configured
//! colour scheme.
//!
//! ```rust
//! use bubbletea_refresh_list::pull::PullToRefresh;
//!
//! let mut pull = PullToRefresh::new();
//! assert!(pull.begin_drag(0, true));
//! pull.drag_to(4);
//! assert!(pull.release());
//!
//! let _tick = pull.set_refreshing(true);
//! assert!(pull.is_refreshing());
//! ```

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use lipgloss_extras::prelude::*;
use tracing::trace;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

const DEFAULT_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Advances the refreshing indicator by one frame.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The indicator this tick belongs to.
    pub id: i64,
    tag: i64,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    start: u16,
    current: u16,
}

/// Drag-to-refresh detector and refreshing indicator.
#[derive(Debug, Clone)]
pub struct PullToRefresh {
    enabled: bool,
    refreshing: bool,
    trigger_distance: u16,
    drag: Option<Drag>,
    colors: Vec<String>,
    frames: Vec<String>,
    fps: Duration,
    frame: usize,
    /// Text shown next to the spinner while refreshing.
    pub refreshing_text: String,
    /// Text shown while dragging before the trigger distance.
    pub pull_text: String,
    /// Text shown while dragging past the trigger distance.
    pub release_text: String,
    id: i64,
    tag: i64,
}

impl Default for PullToRefresh {
    fn default() -> Self {
        Self::new()
    }
}

impl PullToRefresh {
    /// Creates an enabled detector with a three-line trigger distance.
    pub fn new() -> Self {
        Self {
            enabled: true,
            refreshing: false,
            trigger_distance: 3,
            drag: None,
            colors: vec!["#7D56F4".to_string()],
            frames: DEFAULT_FRAMES.iter().map(|f| f.to_string()).collect(),
            fps: Duration::from_millis(100),
            frame: 0,
            refreshing_text: "Refreshing…".to_string(),
            pull_text: "↓ Pull to refresh".to_string(),
            release_text: "↑ Release to refresh".to_string(),
            id: next_id(),
            tag: 0,
        }
    }

    /// Sets how many lines the pointer must travel to trigger a refresh.
    pub fn with_trigger_distance(mut self, lines: u16) -> Self {
        self.trigger_distance = lines.max(1);
        self
    }

    /// The identifier used to route [`TickMsg`]s.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The trigger distance in lines.
    pub fn trigger_distance(&self) -> u16 {
        self.trigger_distance
    }

    /// Enables or disables gesture detection. Disabling cancels a drag.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.drag = None;
        }
    }

    /// Whether gesture detection is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the refreshing indicator is on.
    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Whether a pull is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Sets the indicator colour scheme; frames cycle through it.
    /// An empty scheme is ignored.
    pub fn set_colors<S: Into<String>>(&mut self, colors: Vec<S>) {
        let colors: Vec<String> = colors.into_iter().map(Into::into).collect();
        if !colors.is_empty() {
            self.colors = colors;
        }
    }

    /// The indicator colour scheme.
    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    /// Turns the indicator on or off.
    ///
    /// Turning it on returns the command that starts the animation.
    /// Turning it off invalidates any tick already in flight.
    pub fn set_refreshing(&mut self, refreshing: bool) -> Option<Cmd> {
        if self.refreshing == refreshing {
            return None;
        }
        self.refreshing = refreshing;
        self.tag += 1;
        if refreshing {
            self.frame = 0;
            self.drag = None;
            Some(self.tick())
        } else {
            None
        }
    }

    /// Starts a pull at viewport line `line`. Only starts when enabled, not
    /// refreshing and the list is at its top.
    pub fn begin_drag(&mut self, line: u16, at_top: bool) -> bool {
        if !self.enabled || self.refreshing || !at_top {
            return false;
        }
        self.drag = Some(Drag {
            start: line,
            current: line,
        });
        true
    }

    /// Moves an in-progress pull to `line`. Returns the pulled distance.
    pub fn drag_to(&mut self, line: u16) -> u16 {
        match self.drag.as_mut() {
            Some(drag) => {
                drag.current = line;
                drag.current.saturating_sub(drag.start)
            }
            None => 0,
        }
    }

    /// The distance pulled so far.
    pub fn pulled(&self) -> u16 {
        self.drag
            .map(|d| d.current.saturating_sub(d.start))
            .unwrap_or(0)
    }

    /// Ends a pull. Returns `true` when the pull went far enough to count as
    /// the refresh gesture.
    pub fn release(&mut self) -> bool {
        let fired = self.pulled() >= self.trigger_distance && self.drag.is_some();
        self.drag = None;
        trace!(fired, "pull released");
        fired
    }

    /// Drops an in-progress pull without firing.
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Lines the indicator currently takes up. A press that has not moved
    /// yet takes none.
    pub fn height(&self) -> usize {
        usize::from(self.refreshing || self.pulled() > 0)
    }

    /// Creates a tick message for this indicator.
    pub fn tick_msg(&self) -> TickMsg {
        TickMsg {
            id: self.id,
            tag: self.tag,
        }
    }

    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.fps, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    /// Advances the animation on a matching [`TickMsg`].
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        let tick = msg.downcast_ref::<TickMsg>()?;
        if tick.id != self.id || tick.tag != self.tag || !self.refreshing {
            return None;
        }
        self.frame = (self.frame + 1) % self.frames.len().max(1);
        self.tag += 1;
        Some(self.tick())
    }

    /// Renders the indicator line, or an empty string when it takes no space.
    pub fn view(&self) -> String {
        if self.refreshing {
            let frame = self.frames.get(self.frame).map(String::as_str).unwrap_or("");
            let color = &self.colors[self.frame % self.colors.len()];
            let style = Style::new().foreground(Color::from(color.as_str()));
            return format!("{} {}", style.render(frame), self.refreshing_text);
        }
        if self.pulled() > 0 {
            if self.pulled() >= self.trigger_distance {
                return self.release_text.clone();
            }
            return self.pull_text.clone();
        }
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_past_trigger_fires() {
        let mut pull = PullToRefresh::new().with_trigger_distance(2);
        assert!(pull.begin_drag(1, true));
        assert_eq!(pull.height(), 0);
        assert_eq!(pull.view(), "");
        assert_eq!(pull.drag_to(2), 1);
        assert_eq!(pull.height(), 1);
        assert_eq!(pull.view(), pull.pull_text);
        assert_eq!(pull.drag_to(4), 3);
        assert_eq!(pull.view(), pull.release_text);
        assert!(pull.release());
        assert!(!pull.is_dragging());
    }

    #[test]
    fn test_short_pull_does_not_fire() {
        let mut pull = PullToRefresh::new();
        assert!(pull.begin_drag(0, true));
        pull.drag_to(1);
        assert!(!pull.release());
    }

    #[test]
    fn test_drag_requires_top_and_enabled() {
        let mut pull = PullToRefresh::new();
        assert!(!pull.begin_drag(0, false));
        pull.set_enabled(false);
        assert!(!pull.begin_drag(0, true));
        assert!(!pull.release());
    }

    #[test]
    fn test_no_drag_while_refreshing() {
        let mut pull = PullToRefresh::new();
        assert!(pull.set_refreshing(true).is_some());
        assert!(pull.set_refreshing(true).is_none());
        assert!(!pull.begin_drag(0, true));
        assert_eq!(pull.height(), 1);
        assert!(pull.set_refreshing(false).is_none());
        assert_eq!(pull.height(), 0);
    }

    #[test]
    fn test_ticks_advance_only_while_refreshing() {
        let mut pull = PullToRefresh::new();
        let stale: Msg = Box::new(pull.tick_msg());
        assert!(pull.update(&stale).is_none());

        pull.set_refreshing(true);
        let tick: Msg = Box::new(pull.tick_msg());
        assert!(pull.update(&tick).is_some());
        // Each tick is consumed once.
        assert!(pull.update(&tick).is_none());
        assert!(pull.update(&stale).is_none());

        let other = PullToRefresh::new();
        let foreign: Msg = Box::new(other.tick_msg());
        assert!(pull.update(&foreign).is_none());
    }

    #[test]
    fn test_colors_cycle_and_ignore_empty() {
        let mut pull = PullToRefresh::new();
        pull.set_colors(vec!["red", "green", "blue"]);
        assert_eq!(pull.colors().len(), 3);
        pull.set_colors(Vec::<String>::new());
        assert_eq!(pull.colors().len(), 3);

        pull.set_refreshing(true);
        let view = lipgloss_extras::lipgloss::strip_ansi(&pull.view());
        assert!(view.contains("Refreshing…"));
    }
}
