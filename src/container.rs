//! The scrollable row container underneath the refresh list.
//!
//! [`ListContainer`] knows nothing about row content. It asks a
//! [`RowHeights`] for the height of a position (zero for hidden rows) and
//! only ever walks the rows around the viewport. It tracks:
//!
//! - the viewport: size, first visible row and whether a layout pass happened,
//! - scrolling: the current [`ScrollState`] and the last scroll delta,
//! - change notifications: position-addressed inserts and removals, with the
//!   freshly inserted rows highlighted while an [`ItemAnimator`] is set,
//! - an optional [`ItemDecoration`] drawn under item rows.

use std::ops::Range;
use std::time::Duration;

use lipgloss_extras::prelude::*;
use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Heights of the rows in a list, one per position.
///
/// Lookups happen only for rows near the viewport, so implementations may
/// compute heights on demand.
pub trait RowHeights {
    /// Number of row positions.
    fn len(&self) -> usize;

    /// Height in lines of the row at `row`. Zero for hidden rows.
    fn height(&self, row: usize) -> usize;

    /// Whether there are no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RowHeights for [usize] {
    fn len(&self) -> usize {
        <[usize]>::len(self)
    }

    fn height(&self, row: usize) -> usize {
        self.get(row).copied().unwrap_or(0)
    }
}

impl RowHeights for Vec<usize> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn height(&self, row: usize) -> usize {
        self.as_slice().height(row)
    }
}

/// Scroll state of the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollState {
    /// Not scrolling.
    #[default]
    Idle,
    /// Moving in response to user input.
    Dragging,
    /// Finishing a programmatic or momentum scroll.
    Settling,
}

/// A position-addressed change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowChange {
    /// `count` rows were inserted at `start`.
    Inserted {
        /// First inserted position.
        start: usize,
        /// Number of inserted rows.
        count: usize,
        /// Whether the insertion is animated.
        animated: bool,
    },
    /// The row at `position` was removed.
    Removed {
        /// Removed position.
        position: usize,
        /// Whether the removal is animated.
        animated: bool,
    },
}

/// How inserted rows are animated.
#[derive(Debug, Clone)]
pub enum ItemAnimator {
    /// Rows appear without animation.
    None,
    /// Inserted rows render with `style` until `duration` elapses.
    Highlight {
        /// Style applied to fresh rows.
        style: Style,
        /// How long fresh rows stay highlighted.
        duration: Duration,
    },
}

impl Default for ItemAnimator {
    fn default() -> Self {
        ItemAnimator::Highlight {
            style: Style::new().bold(true),
            duration: Duration::from_millis(300),
        }
    }
}

impl ItemAnimator {
    /// The highlight duration, or `None` when not animating.
    pub fn duration(&self) -> Option<Duration> {
        match self {
            ItemAnimator::None => None,
            ItemAnimator::Highlight { duration, .. } => Some(*duration),
        }
    }
}

/// A divider line drawn below each item row.
#[derive(Debug, Clone)]
pub struct ItemDecoration {
    /// Character repeated across the row width.
    pub divider: char,
    /// Style for the divider line.
    pub style: Style,
}

impl ItemDecoration {
    /// Creates a divider decoration.
    pub fn new(divider: char) -> Self {
        Self {
            divider,
            style: Style::new(),
        }
    }

    /// Sets the divider style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Renders the divider for a row `width` columns wide.
    pub fn render(&self, width: usize) -> String {
        let line: String = std::iter::repeat(self.divider).take(width.max(1)).collect();
        self.style.render(&line)
    }
}

/// Viewport and scroll bookkeeping for a list of rows.
#[derive(Debug, Clone)]
pub struct ListContainer {
    width: usize,
    height: usize,
    laid_out: bool,
    offset: usize,
    scroll_state: ScrollState,
    last_delta: isize,
    scroll_target: Option<usize>,
    changes: Vec<RowChange>,
    highlighted: Vec<Range<usize>>,
    animator: ItemAnimator,
    decoration: Option<ItemDecoration>,
}

impl ListContainer {
    /// Creates a container. It counts as laid out once it receives a
    /// non-zero height through [`set_size`](Self::set_size).
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            laid_out: false,
            offset: 0,
            scroll_state: ScrollState::Idle,
            last_delta: 0,
            scroll_target: None,
            changes: Vec::new(),
            highlighted: Vec::new(),
            animator: ItemAnimator::default(),
            decoration: None,
        }
    }

    /// Applies a layout pass. Returns `true` on the first pass with a
    /// non-zero height.
    pub fn set_size(&mut self, width: usize, height: usize) -> bool {
        self.width = width;
        self.height = height;
        let first = !self.laid_out && height > 0;
        if height > 0 {
            self.laid_out = true;
        }
        first
    }

    /// Width in columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in lines.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether a layout pass has happened.
    pub fn is_laid_out(&self) -> bool {
        self.laid_out
    }

    /// The first row position in the viewport.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Current scroll state.
    pub fn scroll_state(&self) -> ScrollState {
        self.scroll_state
    }

    /// The delta of the most recent scroll. Positive means the user moved
    /// down through the content.
    pub fn last_delta(&self) -> isize {
        self.last_delta
    }

    /// The row most recently passed to [`scroll_to_row`](Self::scroll_to_row).
    pub fn scroll_target(&self) -> Option<usize> {
        self.scroll_target
    }

    /// Starts a user scroll in the direction of `delta` without moving.
    pub fn begin_scroll(&mut self, delta: isize) {
        self.last_delta = delta;
        self.scroll_state = ScrollState::Dragging;
    }

    /// Scrolls the viewport by `delta` rows, clamped to the content.
    /// Returns how far it actually moved.
    pub fn scroll_by<H: RowHeights + ?Sized>(&mut self, delta: isize, heights: &H) -> isize {
        self.begin_scroll(delta);
        let before = self.offset;
        let max = max_offset(heights, self.height);
        self.offset = if delta < 0 {
            before.saturating_sub(delta.unsigned_abs())
        } else {
            (before + delta.unsigned_abs()).min(max.max(before))
        };
        let moved = self.offset as isize - before as isize;
        trace!(delta, moved, offset = self.offset, "container scrolled");
        moved
    }

    /// Moves to `Idle`. Returns `true` if the state changed.
    pub fn settle(&mut self) -> bool {
        let changed = self.scroll_state != ScrollState::Idle;
        self.scroll_state = ScrollState::Idle;
        changed
    }

    /// Scrolls the least amount needed to show `row` and remembers it as
    /// the scroll target.
    pub fn scroll_to_row<H: RowHeights + ?Sized>(&mut self, row: usize, heights: &H) {
        self.scroll_target = Some(row);
        self.scroll_state = ScrollState::Settling;
        self.ensure_visible(row, heights);
        trace!(row, offset = self.offset, "container scrolled to row");
    }

    /// Adjusts the offset so that `row` is inside the viewport.
    pub fn ensure_visible<H: RowHeights + ?Sized>(&mut self, row: usize, heights: &H) {
        if heights.is_empty() {
            self.offset = 0;
            return;
        }
        let row = row.min(heights.len() - 1);
        if row < self.offset {
            self.offset = row;
            return;
        }
        // Walk up from `row` while the rows above it still fit.
        let mut first = row;
        let mut used = heights.height(row);
        while first > self.offset {
            let above = heights.height(first - 1);
            if used + above > self.height {
                break;
            }
            used += above;
            first -= 1;
        }
        self.offset = first;
    }

    /// The last row at least partially inside the viewport.
    ///
    /// Zero-height rows touching the bottom edge count as visible.
    pub fn last_visible_row<H: RowHeights + ?Sized>(&self, heights: &H) -> Option<usize> {
        if self.height == 0 {
            return None;
        }
        let mut used = 0;
        let mut last = None;
        for i in self.offset..heights.len() {
            let h = heights.height(i);
            if used > self.height || (used == self.height && h > 0) {
                break;
            }
            last = Some(i);
            used += h;
        }
        last
    }

    /// Positions currently in the viewport.
    pub fn visible_rows<H: RowHeights + ?Sized>(&self, heights: &H) -> Range<usize> {
        match self.last_visible_row(heights) {
            Some(last) => self.offset..last + 1,
            None => self.offset..self.offset,
        }
    }

    /// Resolves a viewport line to the row drawn there.
    pub fn row_at_line<H: RowHeights + ?Sized>(&self, line: usize, heights: &H) -> Option<usize> {
        if line >= self.height {
            return None;
        }
        let mut top = 0;
        for i in self.offset..heights.len() {
            let h = heights.height(i);
            if h > 0 && line >= top && line < top + h {
                return Some(i);
            }
            top += h;
            if top > line {
                break;
            }
        }
        None
    }

    /// Records that `count` rows were inserted at `start`.
    pub fn notify_inserted(&mut self, start: usize, count: usize) {
        let animated = self.animator.duration().is_some();
        for range in &mut self.highlighted {
            if range.start >= start {
                range.start += count;
                range.end += count;
            }
        }
        if animated && count > 0 {
            self.highlighted.push(start..start + count);
        }
        self.changes.push(RowChange::Inserted {
            start,
            count,
            animated,
        });
        trace!(start, count, animated, "rows inserted");
    }

    /// Records that the row at `position` was removed.
    pub fn notify_removed(&mut self, position: usize) {
        let animated = self.animator.duration().is_some();
        for range in &mut self.highlighted {
            if range.start > position {
                range.start -= 1;
                range.end -= 1;
            } else if range.contains(&position) {
                range.end -= 1;
            }
        }
        self.highlighted.retain(|r| !r.is_empty());
        self.changes.push(RowChange::Removed { position, animated });
        trace!(position, animated, "row removed");
    }

    /// Notifications recorded since the last [`take_changes`](Self::take_changes).
    pub fn changes(&self) -> &[RowChange] {
        &self.changes
    }

    /// Drains the recorded notifications.
    pub fn take_changes(&mut self) -> Vec<RowChange> {
        std::mem::take(&mut self.changes)
    }

    /// Whether `row` is still highlighted from a recent insertion.
    pub fn is_highlighted(&self, row: usize) -> bool {
        self.highlighted.iter().any(|r| r.contains(&row))
    }

    /// Ends all insertion highlights.
    pub fn clear_highlights(&mut self) {
        self.highlighted.clear();
    }

    /// Sets the insertion animator.
    pub fn set_item_animator(&mut self, animator: ItemAnimator) {
        if animator.duration().is_none() {
            self.highlighted.clear();
        }
        self.animator = animator;
    }

    /// The insertion animator.
    pub fn item_animator(&self) -> &ItemAnimator {
        &self.animator
    }

    /// Sets or clears the item decoration.
    pub fn set_item_decoration(&mut self, decoration: Option<ItemDecoration>) {
        self.decoration = decoration;
    }

    /// The item decoration, if any.
    pub fn item_decoration(&self) -> Option<&ItemDecoration> {
        self.decoration.as_ref()
    }
}

impl Default for ListContainer {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

/// The largest offset that still fills the viewport from the bottom.
fn max_offset<H: RowHeights + ?Sized>(heights: &H, height: usize) -> usize {
    let mut used = 0;
    let mut idx = heights.len();
    while idx > 0 {
        let h = heights.height(idx - 1);
        if used + h > height {
            break;
        }
        used += h;
        idx -= 1;
    }
    idx.min(heights.len().saturating_sub(1))
}

/// Truncates `line` to `width` display columns, ending with `…` when cut.
///
/// Width is measured without ANSI escapes. A cut line loses its styling.
/// A width of zero leaves the line untouched.
pub(crate) fn fit_width(line: &str, width: usize) -> String {
    if width == 0 {
        return line.to_string();
    }
    let plain = strip_ansi_escapes::strip_str(line);
    if UnicodeWidthStr::width(plain.as_str()) <= width {
        return line.to_string();
    }
    let budget = width - 1;
    let mut out = String::new();
    let mut used = 0;
    for g in plain.graphemes(true) {
        let w = UnicodeWidthStr::width(g);
        if used + w > budget {
            break;
        }
        out.push_str(g);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ones(n: usize) -> Vec<usize> {
        vec![1; n]
    }

    #[test]
    fn test_first_layout_is_reported_once() {
        let mut c = ListContainer::new(0, 0);
        assert!(!c.is_laid_out());
        assert!(!c.set_size(40, 0));
        assert!(c.set_size(40, 10));
        assert!(!c.set_size(40, 12));
        assert!(c.is_laid_out());
    }

    #[test]
    fn test_scroll_by_clamps_to_content() {
        let mut c = ListContainer::new(20, 3);
        let heights = ones(5);
        assert_eq!(c.scroll_by(10, &heights), 2);
        assert_eq!(c.offset(), 2);
        assert_eq!(c.scroll_state(), ScrollState::Dragging);
        assert_eq!(c.last_delta(), 10);
        assert_eq!(c.scroll_by(-5, &heights), -2);
        assert_eq!(c.offset(), 0);
        assert!(c.settle());
        assert!(!c.settle());
    }

    #[test]
    fn test_scroll_does_not_move_when_content_fits() {
        let mut c = ListContainer::new(20, 10);
        assert_eq!(c.scroll_by(1, &ones(3)), 0);
        assert_eq!(c.last_delta(), 1);
    }

    #[test]
    fn test_last_visible_row_counts_hidden_footer() {
        let c = ListContainer::new(20, 3);
        // Three items fill the viewport, the hidden footer touches the edge.
        let hidden_footer: &[usize] = &[1, 1, 1, 0];
        assert_eq!(c.last_visible_row(hidden_footer), Some(3));
        // A visible footer does not fit.
        let shown_footer: &[usize] = &[1, 1, 1, 1];
        assert_eq!(c.last_visible_row(shown_footer), Some(2));
        assert_eq!(c.visible_rows(shown_footer), 0..3);
    }

    #[test]
    fn test_last_visible_row_includes_partial_row() {
        let c = ListContainer::new(20, 3);
        let heights: &[usize] = &[2, 2, 2];
        assert_eq!(c.last_visible_row(heights), Some(1));
    }

    #[test]
    fn test_ensure_visible_moves_minimally() {
        let mut c = ListContainer::new(20, 3);
        let heights = ones(10);
        c.ensure_visible(5, &heights);
        assert_eq!(c.offset(), 3);
        c.ensure_visible(4, &heights);
        assert_eq!(c.offset(), 3);
        c.ensure_visible(1, &heights);
        assert_eq!(c.offset(), 1);
    }

    struct CountedRows {
        len: usize,
        lookups: std::cell::Cell<usize>,
    }

    impl RowHeights for CountedRows {
        fn len(&self) -> usize {
            self.len
        }

        fn height(&self, _row: usize) -> usize {
            self.lookups.set(self.lookups.get() + 1);
            1
        }
    }

    #[test]
    fn test_lookups_stay_near_the_viewport() {
        let rows = CountedRows {
            len: 1_000_000,
            lookups: std::cell::Cell::new(0),
        };
        let mut c = ListContainer::new(20, 5);
        c.ensure_visible(999_999, &rows);
        assert_eq!(c.offset(), 999_995);
        assert_eq!(c.scroll_by(-2, &rows), -2);
        assert_eq!(c.visible_rows(&rows), 999_993..999_998);
        assert_eq!(c.row_at_line(4, &rows), Some(999_997));
        assert!(rows.lookups.get() < 40, "{} lookups", rows.lookups.get());
    }

    #[test]
    fn test_ensure_visible_skips_hidden_rows() {
        let mut c = ListContainer::new(20, 2);
        let heights: &[usize] = &[1, 1, 1, 0, 1];
        c.ensure_visible(4, heights);
        assert_eq!(c.offset(), 2);
    }

    #[test]
    fn test_scroll_to_row_records_target() {
        let mut c = ListContainer::new(20, 3);
        c.scroll_to_row(7, &ones(10));
        assert_eq!(c.scroll_target(), Some(7));
        assert_eq!(c.offset(), 5);
        assert_eq!(c.scroll_state(), ScrollState::Settling);
        c.scroll_to_row(0, &ones(10));
        assert_eq!(c.offset(), 0);
    }

    #[test]
    fn test_row_at_line() {
        let mut c = ListContainer::new(20, 4);
        let heights: &[usize] = &[2, 0, 1, 1, 1];
        assert_eq!(c.row_at_line(0, heights), Some(0));
        assert_eq!(c.row_at_line(1, heights), Some(0));
        assert_eq!(c.row_at_line(2, heights), Some(2));
        assert_eq!(c.row_at_line(4, heights), None);
        c.scroll_by(2, heights);
        assert_eq!(c.row_at_line(0, heights), Some(2));
    }

    #[test]
    fn test_change_notifications_and_highlights() {
        let mut c = ListContainer::new(20, 5);
        c.notify_inserted(0, 2);
        assert!(c.is_highlighted(0));
        assert!(c.is_highlighted(1));
        c.notify_inserted(0, 1);
        assert!(c.is_highlighted(0));
        assert!(c.is_highlighted(2));
        c.notify_removed(0);
        assert!(c.is_highlighted(0));
        assert!(c.is_highlighted(1));
        assert!(!c.is_highlighted(2));

        let changes = c.take_changes();
        assert_eq!(changes.len(), 3);
        assert_eq!(
            changes[0],
            RowChange::Inserted {
                start: 0,
                count: 2,
                animated: true
            }
        );
        assert!(c.changes().is_empty());

        c.clear_highlights();
        assert!(!c.is_highlighted(0));
    }

    #[test]
    fn test_without_animator_nothing_is_highlighted() {
        let mut c = ListContainer::new(20, 5);
        c.set_item_animator(ItemAnimator::None);
        c.notify_inserted(0, 3);
        assert!(!c.is_highlighted(0));
        assert_eq!(
            c.changes(),
            &[RowChange::Inserted {
                start: 0,
                count: 3,
                animated: false
            }]
        );
    }

    #[test]
    fn test_fit_width() {
        assert_eq!(fit_width("hello", 10), "hello");
        assert_eq!(fit_width("hello world", 6), "hello…");
        assert_eq!(fit_width("日本語テキスト", 5), "日本…");
        assert_eq!(fit_width("anything", 0), "anything");
    }
}
