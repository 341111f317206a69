//! Construction, listener registration and the completion notifications.

use bubbletea_rs::Cmd;
use tracing::{debug, warn};

use super::model::Heights;
use super::{Activity, Model, RefreshListKeyMap, RefreshListStyles};
use crate::adapter::{AdapterStatus, WrappingAdapter};
use crate::container::{ItemAnimator, ItemDecoration, ListContainer, RowChange, RowHeights};
use crate::error::{Error, Result};
use crate::gesture::GestureDetector;
use crate::pull::PullToRefresh;
use crate::row::{RowHolder, RowProvider};

impl<P: RowProvider> Model<P> {
    /// Creates a focused list of the given size with no adapter.
    ///
    /// The list counts as laid out once it has a non-zero height, either from
    /// here or from a later [`set_size`](Self::set_size).
    pub fn new(width: usize, height: usize) -> Self {
        let mut container = ListContainer::new(width, 0);
        container.set_size(width, height);
        Self {
            container,
            pull: PullToRefresh::new(),
            adapter: None,
            activity: Activity::Idle,
            pull_refresh_enabled: true,
            pending_pull_refresh: false,
            gestures: None,
            on_refresh: None,
            on_load_more: None,
            on_item_click: None,
            on_item_long_click: None,
            cursor: 0,
            focus: true,
            fade_tag: 0,
            id: super::next_id(),
            keymap: RefreshListKeyMap::default(),
            styles: RefreshListStyles::default(),
        }
    }

    /// Sets the adapter (builder pattern).
    pub fn with_adapter(mut self, adapter: WrappingAdapter<P>) -> Self {
        self.set_adapter(adapter);
        self
    }

    /// Sets the styles (builder pattern).
    pub fn with_styles(mut self, styles: RefreshListStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Sets the pull distance that triggers a refresh (builder pattern).
    pub fn with_trigger_distance(mut self, lines: u16) -> Self {
        self.pull = std::mem::take(&mut self.pull).with_trigger_distance(lines);
        self
    }

    /// The identifier used to route this list's messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Attaches an adapter, replacing any previous one, and scrolls to the top.
    pub fn set_adapter(&mut self, adapter: WrappingAdapter<P>) {
        self.adapter = Some(adapter);
        self.cursor = 0;
        let heights = Heights::of(&self.adapter, &self.container);
        self.container.ensure_visible(0, &heights);
        debug!(rows = heights.len(), "adapter attached");
    }

    /// The attached adapter.
    pub fn adapter(&self) -> Option<&WrappingAdapter<P>> {
        self.adapter.as_ref()
    }

    /// Mutable access to the attached adapter. Report data changes with the
    /// `notify_*` methods afterwards.
    pub fn adapter_mut(&mut self) -> Option<&mut WrappingAdapter<P>> {
        self.adapter.as_mut()
    }

    /// Registers the refresh listener. The last registration wins.
    pub fn set_on_pull_refresh_listener<F>(&mut self, listener: F)
    where
        F: FnMut() -> Option<Cmd> + Send + 'static,
    {
        self.on_refresh = Some(Box::new(listener));
    }

    /// Registers the load-more listener. The last registration wins.
    pub fn set_on_load_more_listener<F>(&mut self, listener: F)
    where
        F: FnMut() -> Option<Cmd> + Send + 'static,
    {
        self.on_load_more = Some(Box::new(listener));
    }

    /// Registers the item tap listener. The last registration wins.
    pub fn set_on_item_click_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&RowHolder, usize) -> Option<Cmd> + Send + 'static,
    {
        self.on_item_click = Some(Box::new(listener));
        self.install_gestures();
    }

    /// Registers the item long-press listener. The last registration wins.
    pub fn set_on_item_long_click_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&RowHolder, usize) -> Option<Cmd> + Send + 'static,
    {
        self.on_item_long_click = Some(Box::new(listener));
        self.install_gestures();
    }

    fn install_gestures(&mut self) {
        if self.gestures.is_none() {
            self.gestures = Some(GestureDetector::new());
            debug!("gesture detector installed");
        }
    }

    /// The pointer gesture detector, installed with the first item listener.
    pub fn gesture_detector(&self) -> Option<&GestureDetector> {
        self.gestures.as_ref()
    }

    /// Reports that a refresh finished and `count` rows were prepended.
    ///
    /// With `count > 0` the empty row is replaced if it was showing, the new
    /// rows are announced at position 0 and the list scrolls to the top. The
    /// indicator is always turned off and the list leaves `Refreshing`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoAdapter`] when no adapter is attached.
    pub fn notify_refresh_completed(&mut self, count: usize) -> Result<Option<Cmd>> {
        let adapter = self.adapter.as_mut().ok_or(Error::NoAdapter)?;
        let mut fade = None;
        if count > 0 {
            if adapter.status() == AdapterStatus::Empty {
                self.container.notify_removed(0);
                adapter.set_status(AdapterStatus::Normal);
            }
            self.container.notify_inserted(0, count);
            self.scroll_to_row(0);
            fade = self.fade_cmd();
        }
        self.pull.set_refreshing(false);
        self.activity.finish_refresh();
        debug!(count, "refresh completed");
        Ok(fade)
    }

    /// Reports that a load-more finished and `count` rows were appended.
    ///
    /// With `count > 0` the new rows are announced before the footer and the
    /// list scrolls to the first of them. The footer is hidden, its stale
    /// trailing position is announced as removed and the list leaves
    /// `LoadingMore`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoAdapter`] when no adapter is attached.
    pub fn notify_load_more_completed(&mut self, count: usize) -> Result<Option<Cmd>> {
        let adapter = self.adapter.as_mut().ok_or(Error::NoAdapter)?;
        adapter.set_footer_visible(false);
        let footer_enabled = adapter.is_footer_enabled();
        let item_count = adapter.item_count();
        let mut fade = None;
        if count > 0 {
            if count > item_count {
                warn!(count, item_count, "more rows reported than the provider holds");
            }
            let start = item_count.saturating_sub(count);
            self.container.notify_inserted(start, count);
            self.scroll_to_row(start);
            fade = self.fade_cmd();
        }
        if footer_enabled {
            let row_count = self.adapter.as_ref().map_or(0, |a| a.row_count());
            self.container.notify_removed(row_count);
        }
        self.activity.finish_load_more();
        debug!(count, "load more completed");
        Ok(fade)
    }

    /// Enables or disables pull-to-refresh. Disabling cancels a pull in
    /// progress; a refresh already running is left to complete.
    pub fn set_pull_refresh_enabled(&mut self, enabled: bool) {
        self.pull_refresh_enabled = enabled;
        self.pull.set_enabled(enabled);
        if !enabled {
            self.pending_pull_refresh = false;
        }
    }

    /// Whether pull-to-refresh is enabled.
    pub fn is_pull_refresh_enabled(&self) -> bool {
        self.pull_refresh_enabled
    }

    /// Starts a refresh as if the user had pulled.
    ///
    /// Before the first layout the request is remembered and runs when the
    /// list first gets a size.
    pub fn pull_refresh(&mut self) -> Option<Cmd> {
        if !self.container.is_laid_out() {
            debug!("pull refresh deferred until layout");
            self.pending_pull_refresh = true;
            return None;
        }
        self.start_refresh()
    }

    /// Sets the size. The first non-zero height runs a deferred
    /// [`pull_refresh`](Self::pull_refresh).
    pub fn set_size(&mut self, width: usize, height: usize) -> Option<Cmd> {
        let first = self.container.set_size(width, height);
        let heights = Heights::of(&self.adapter, &self.container);
        self.container.ensure_visible(self.cursor, &heights);
        if first && std::mem::take(&mut self.pending_pull_refresh) {
            debug!("running deferred pull refresh");
            return self.start_refresh();
        }
        None
    }

    /// Width in columns.
    pub fn width(&self) -> usize {
        self.container.width()
    }

    /// Height in lines.
    pub fn height(&self) -> usize {
        self.container.height()
    }

    /// Sets or clears the divider drawn under item rows.
    pub fn set_item_decoration(&mut self, decoration: Option<ItemDecoration>) {
        self.container.set_item_decoration(decoration);
    }

    /// Sets how inserted rows are animated.
    pub fn set_item_animator(&mut self, animator: ItemAnimator) {
        self.container.set_item_animator(animator);
    }

    /// Sets the colours the refreshing indicator cycles through.
    pub fn set_refresh_indicator_colors<S: Into<String>>(&mut self, colors: Vec<S>) {
        self.pull.set_colors(colors);
    }

    /// Scrolls so that `row` is visible and moves the cursor to it when it is
    /// an item row.
    pub fn scroll_to_row(&mut self, row: usize) {
        let heights = Heights::of(&self.adapter, &self.container);
        self.container.scroll_to_row(row, &heights);
        let items = self.item_rows();
        if items > 0 {
            self.cursor = row.min(items - 1);
        }
    }

    /// Whether a refresh is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.activity.is_refreshing()
    }

    /// Whether a load-more is in flight.
    pub fn is_loading_more(&self) -> bool {
        self.activity.is_loading_more()
    }

    /// What the list is busy with.
    pub fn activity(&self) -> Activity {
        self.activity
    }

    /// The cursor row.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The underlying row container.
    pub fn container(&self) -> &ListContainer {
        &self.container
    }

    /// Drains the row change notifications recorded so far.
    pub fn take_changes(&mut self) -> Vec<RowChange> {
        self.container.take_changes()
    }

    /// The pull-to-refresh indicator.
    pub fn pull_indicator(&self) -> &PullToRefresh {
        &self.pull
    }
}
