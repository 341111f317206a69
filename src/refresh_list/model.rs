//! Input handling and the refresh/load-more triggers.

use std::ops::Range;
use std::time::Duration;

use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Msg};
use tracing::{debug, trace};

use super::{join, FadeMsg, Model};
use crate::adapter::WrappingAdapter;
use crate::container::{ListContainer, RowHeights};
use crate::gesture::{Gesture, LongPressMsg, PointerEvent, PointerKind};
use crate::row::RowProvider;

/// Lines scrolled per wheel notch.
const WHEEL_LINES: isize = 3;

/// Row heights read from the adapter on demand. Item rows include the
/// decoration line.
pub(super) struct Heights<'a, P> {
    adapter: Option<&'a WrappingAdapter<P>>,
    rows: usize,
    divider: usize,
}

impl<'a, P: RowProvider> Heights<'a, P> {
    /// Borrows only the adapter, so the container stays free to mutate.
    pub(super) fn of(adapter: &'a Option<WrappingAdapter<P>>, container: &ListContainer) -> Self {
        let adapter = adapter.as_ref();
        Self {
            adapter,
            rows: adapter.map_or(0, RowProvider::row_count),
            divider: usize::from(container.item_decoration().is_some()),
        }
    }
}

impl<P: RowProvider> RowHeights for Heights<'_, P> {
    fn len(&self) -> usize {
        self.rows
    }

    fn height(&self, row: usize) -> usize {
        let Some(adapter) = self.adapter.filter(|_| row < self.rows) else {
            return 0;
        };
        let height = adapter.row_height(row);
        if height > 0 && adapter.row_type(row).is_item() {
            height + self.divider
        } else {
            height
        }
    }
}

impl<P: RowProvider> Model<P> {
    /// Number of leading positions that are caller items.
    pub(super) fn item_rows(&self) -> usize {
        match self.adapter.as_ref() {
            Some(adapter) if adapter.row_count() > 0 && !adapter.is_empty_status() => {
                adapter.item_count()
            }
            _ => 0,
        }
    }

    pub(super) fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        if !self.focus {
            return None;
        }
        let page = self.page_rows() as isize;
        let items = self.item_rows() as isize;
        if self.keymap.cursor_up.matches(key_msg) {
            self.move_cursor(-1)
        } else if self.keymap.cursor_down.matches(key_msg) {
            self.move_cursor(1)
        } else if self.keymap.page_up.matches(key_msg) {
            self.move_cursor(-page)
        } else if self.keymap.page_down.matches(key_msg) {
            self.move_cursor(page)
        } else if self.keymap.go_to_start.matches(key_msg) {
            self.move_cursor(-items.max(1))
        } else if self.keymap.go_to_end.matches(key_msg) {
            self.move_cursor(items.max(1))
        } else if self.keymap.refresh.matches(key_msg) {
            self.start_refresh()
        } else if self.keymap.select.matches(key_msg) {
            self.dispatch_item(self.cursor, false)
        } else if self.keymap.long_press.matches(key_msg) {
            self.dispatch_item(self.cursor, true)
        } else {
            None
        }
    }

    fn page_rows(&self) -> usize {
        let heights = Heights::of(&self.adapter, &self.container);
        self.container.visible_rows(&heights).len().max(1)
    }

    /// One keyboard scroll gesture: start dragging in the direction of
    /// `delta`, move the cursor, bring it into view and settle.
    pub(super) fn move_cursor(&mut self, delta: isize) -> Option<Cmd> {
        self.container.begin_scroll(delta);
        let items = self.item_rows();
        if items > 0 {
            self.cursor = if delta < 0 {
                self.cursor.saturating_sub(delta.unsigned_abs())
            } else {
                (self.cursor + delta.unsigned_abs()).min(items - 1)
            };
            let heights = Heights::of(&self.adapter, &self.container);
            self.container.ensure_visible(self.cursor, &heights);
        }
        trace!(delta, cursor = self.cursor, "cursor moved");
        self.settle_scroll()
    }

    fn settle_scroll(&mut self) -> Option<Cmd> {
        if self.container.settle() {
            self.on_scroll_idle()
        } else {
            None
        }
    }

    /// Runs when scrolling comes to rest. Starts a load-more when the user
    /// scrolled down to the end of the list, otherwise hides the footer.
    pub(super) fn on_scroll_idle(&mut self) -> Option<Cmd> {
        let heights = Heights::of(&self.adapter, &self.container);
        let last_visible = self.container.last_visible_row(&heights);
        let scrolled_down = self.container.last_delta() > 0;
        let idle = self.activity.is_idle();
        let has_listener = self.on_load_more.is_some();
        let adapter = self.adapter.as_mut()?;
        let row_count = adapter.row_count();
        let at_end = last_visible.is_some_and(|last| last + 1 == row_count);

        let triggers = scrolled_down
            && at_end
            && adapter.is_footer_enabled()
            && !adapter.is_empty_status()
            && idle
            && has_listener;
        if !triggers {
            if adapter.is_footer_enabled() {
                adapter.set_footer_visible(false);
            }
            return None;
        }
        if !self.activity.try_begin_load_more() {
            return None;
        }
        adapter.set_footer_visible(true);
        let heights = Heights::of(&self.adapter, &self.container);
        self.container.ensure_visible(row_count - 1, &heights);
        debug!(row_count, "load more requested");
        self.on_load_more.as_mut().and_then(|listener| listener())
    }

    /// Starts a refresh if the guards allow it and returns the indicator
    /// animation together with the listener's command.
    pub(super) fn start_refresh(&mut self) -> Option<Cmd> {
        if !self.pull_refresh_enabled {
            debug!("refresh ignored, pull refresh disabled");
            return None;
        }
        if self.on_refresh.is_none() {
            debug!("refresh ignored, no listener");
            return None;
        }
        if !self.activity.try_begin_refresh() {
            return None;
        }
        let tick = self.pull.set_refreshing(true);
        let cmd = self.on_refresh.as_mut().and_then(|listener| listener());
        join(tick, cmd)
    }

    /// Invokes the tap or long-press listener for `row` if it is an item.
    pub(super) fn dispatch_item(&mut self, row: usize, long: bool) -> Option<Cmd> {
        let adapter = self.adapter.as_ref()?;
        if !adapter.is_item_row(row) {
            trace!(row, "gesture on a non-item row ignored");
            return None;
        }
        let holder = adapter.holder_at(row).ok()?;
        let listener = if long {
            self.on_item_long_click.as_mut()
        } else {
            self.on_item_click.as_mut()
        }?;
        debug!(row, long, "item gesture");
        listener(&holder, row)
    }

    /// Line where the rows start, below the pull indicator.
    fn rows_top(&self) -> u16 {
        self.pull.height() as u16
    }

    fn row_at(&self, content_line: u16) -> Option<usize> {
        let heights = Heights::of(&self.adapter, &self.container);
        self.container.row_at_line(usize::from(content_line), &heights)
    }

    /// Handles one pointer event in widget-local coordinates.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<Cmd> {
        if !self.focus {
            return None;
        }
        match event.kind {
            PointerKind::WheelUp | PointerKind::WheelDown => {
                let delta = if event.kind == PointerKind::WheelUp {
                    -WHEEL_LINES
                } else {
                    WHEEL_LINES
                };
                let heights = Heights::of(&self.adapter, &self.container);
                self.container.scroll_by(delta, &heights);
                let visible = self.container.visible_rows(&heights);
                self.keep_cursor_in_view(visible);
                self.settle_scroll()
            }
            PointerKind::Down => {
                let at_top = self.container.offset() == 0;
                self.pull.begin_drag(event.line, at_top && self.activity.is_idle());
                let content_line = event.line.checked_sub(self.rows_top())?;
                self.row_at(content_line)?;
                let gestures = self.gestures.as_mut()?;
                Some(gestures.on_down(content_line, event.at))
            }
            PointerKind::Drag => {
                self.pull.drag_to(event.line);
                if let Some(gestures) = self.gestures.as_mut() {
                    gestures.on_drag(event.line.saturating_sub(self.pull.height() as u16));
                }
                None
            }
            PointerKind::Up => {
                let pulled = self.pull.pulled() > 0;
                let fired = self.pull.release();
                let gesture = self.gestures.as_mut().and_then(|g| g.on_up(event.at));
                if fired {
                    return self.start_refresh();
                }
                if pulled {
                    return None;
                }
                match gesture? {
                    Gesture::Tap { line } => {
                        let row = self.row_at(line)?;
                        self.dispatch_item(row, false)
                    }
                    Gesture::LongPress { line } => {
                        let row = self.row_at(line)?;
                        self.dispatch_item(row, true)
                    }
                }
            }
        }
    }

    pub(super) fn handle_long_press(&mut self, msg: &LongPressMsg) -> Option<Cmd> {
        let gestures = self.gestures.as_mut()?;
        match gestures.on_long_press(msg)? {
            Gesture::LongPress { line } | Gesture::Tap { line } => {
                let row = self.row_at(line)?;
                self.dispatch_item(row, true)
            }
        }
    }

    fn keep_cursor_in_view(&mut self, visible: Range<usize>) {
        let items = self.item_rows();
        if items == 0 || visible.is_empty() {
            return;
        }
        let last_item = (visible.end - 1).min(items - 1);
        self.cursor = self.cursor.clamp(visible.start.min(last_item), last_item);
    }

    /// Schedules the end of the insertion highlight.
    pub(super) fn fade_cmd(&mut self) -> Option<Cmd> {
        let duration: Duration = self.container.item_animator().duration()?;
        self.fade_tag += 1;
        let id = self.id;
        let tag = self.fade_tag;
        Some(bubbletea_tick(duration, move |_| {
            Box::new(FadeMsg { id, tag }) as Msg
        }))
    }

    /// Creates the fade message the next fade tick will deliver.
    pub fn fade_msg(&self) -> FadeMsg {
        FadeMsg {
            id: self.id,
            tag: self.fade_tag,
        }
    }
}
