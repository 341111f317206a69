//! Rows and the providers that produce them.
//!
//! A list is a sequence of rows addressed by position. A [`RowProvider`]
//! says how many rows exist, what type each row is, how to create an empty
//! [`RowHolder`] for a type and how to bind a position's content into a
//! holder. Providers can be decorated by other providers; see
//! [`WrappingAdapter`](crate::adapter::WrappingAdapter).
//!
//! ```rust
//! use bubbletea_refresh_list::row::{RowHolder, RowProvider, RowType, VecRows};
//!
//! let rows = VecRows::new(vec!["alpha", "beta"]);
//! let mut holder = rows.create_holder(rows.row_type(1));
//! rows.bind(&mut holder, 1);
//! assert_eq!(holder.lines(), &["beta".to_string()]);
//! assert_eq!(holder.row_type(), RowType::Item(0));
//! ```

use std::fmt::Display;

/// The kind of a row.
///
/// Caller providers use [`RowType::Item`] with their own discriminator;
/// `Footer` and `Empty` are reserved for the synthetic rows injected by the
/// wrapping adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowType {
    /// A caller item row, tagged with a caller-defined view type.
    Item(u16),
    /// The trailing load-more indicator row.
    Footer,
    /// The placeholder row shown instead of all rows when there are no items.
    Empty,
}

impl RowType {
    /// Whether this is a caller item row.
    pub fn is_item(self) -> bool {
        matches!(self, RowType::Item(_))
    }
}

/// A rendered row: its type, its text lines and whether it takes up space.
///
/// Hidden holders have a height of zero but still occupy a position in the
/// row address space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowHolder {
    row_type: RowType,
    lines: Vec<String>,
    visible: bool,
}

impl RowHolder {
    /// Creates an empty, visible holder of the given type.
    pub fn new(row_type: RowType) -> Self {
        Self {
            row_type,
            lines: Vec::new(),
            visible: true,
        }
    }

    /// Creates a holder pre-filled with `text`, split on newlines.
    pub fn with_text(row_type: RowType, text: impl AsRef<str>) -> Self {
        let mut holder = Self::new(row_type);
        holder.set_text(text);
        holder
    }

    /// The row type this holder was created for.
    pub fn row_type(&self) -> RowType {
        self.row_type
    }

    /// Replaces the content with `text`, split on newlines.
    pub fn set_text(&mut self, text: impl AsRef<str>) {
        self.lines = text.as_ref().lines().map(str::to_string).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
    }

    /// The content lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether the holder takes up space when rendered.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Shows or hides the holder.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Number of terminal lines the holder occupies.
    pub fn height(&self) -> usize {
        if self.visible {
            self.lines.len()
        } else {
            0
        }
    }
}

/// Supplies rows to a list.
///
/// Only `row_count` and `bind` are required. The default `row_type` tags
/// every row `Item(0)` and the default `create_holder` returns a blank
/// holder of the requested type.
pub trait RowProvider {
    /// Number of rows in the address space.
    fn row_count(&self) -> usize;

    /// The type of the row at `position`.
    fn row_type(&self, _position: usize) -> RowType {
        RowType::Item(0)
    }

    /// Creates a holder able to display rows of `row_type`.
    fn create_holder(&self, row_type: RowType) -> RowHolder {
        RowHolder::new(row_type)
    }

    /// Writes the content for `position` into `holder`.
    fn bind(&self, holder: &mut RowHolder, position: usize);
}

/// A provider over an owned vector of displayable items.
///
/// Each item renders as its `Display` output.
#[derive(Debug, Clone, Default)]
pub struct VecRows<T> {
    items: Vec<T>,
}

impl<T: Display> VecRows<T> {
    /// Wraps `items`.
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// The items, in row order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Mutable access for callers that add or remove items before notifying
    /// the list.
    pub fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }
}

impl<T: Display> RowProvider for VecRows<T> {
    fn row_count(&self) -> usize {
        self.items.len()
    }

    fn bind(&self, holder: &mut RowHolder, position: usize) {
        if let Some(item) = self.items.get(position) {
            holder.set_text(item.to_string());
        }
    }
}
