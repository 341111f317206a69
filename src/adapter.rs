//! A row provider decorator that adds a load-more footer and an empty view.
//!
//! [`WrappingAdapter`] presents one row sequence built from a caller's
//! provider:
//!
//! - `[items..., footer]` when a footer view is configured,
//! - `[items...]` without one,
//! - `[empty]` when the caller has no items and an empty view is configured.
//!
//! The footer is always the last row and the empty row is always the only
//! row. Adapter status is derived: every call to
//! [`row_count`](RowProvider::row_count) recomputes it from the wrapped
//! provider.
//!
//! ```rust
//! use bubbletea_refresh_list::adapter::{AdapterStatus, WrappingAdapter};
//! use bubbletea_refresh_list::row::{RowProvider, RowType, VecRows};
//!
//! let adapter = WrappingAdapter::builder()
//!     .provider(VecRows::<String>::new(vec![]))
//!     .footer_view("Loading more…")
//!     .empty_view("Nothing here yet")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(adapter.row_count(), 1);
//! assert_eq!(adapter.row_type(0), RowType::Empty);
//! assert_eq!(adapter.status(), AdapterStatus::Empty);
//! ```

use std::cell::Cell;

use crate::error::{Error, Result};
use crate::row::{RowHolder, RowProvider, RowType};

/// Whether the adapter is showing the empty row or regular rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdapterStatus {
    /// Regular item rows, possibly followed by the footer.
    #[default]
    Normal,
    /// The single empty row.
    Empty,
}

/// Decorates a [`RowProvider`] with a footer row and an empty row.
#[derive(Debug)]
pub struct WrappingAdapter<P> {
    inner: P,
    footer: Option<RowHolder>,
    empty: Option<RowHolder>,
    empty_status: Cell<bool>,
    status: Cell<AdapterStatus>,
}

/// Builder for [`WrappingAdapter`]. Building without a provider fails.
#[derive(Debug)]
pub struct WrappingAdapterBuilder<P> {
    provider: Option<P>,
    footer: Option<String>,
    empty: Option<String>,
}

impl<P> Default for WrappingAdapterBuilder<P> {
    fn default() -> Self {
        Self {
            provider: None,
            footer: None,
            empty: None,
        }
    }
}

impl<P: RowProvider> WrappingAdapterBuilder<P> {
    /// Sets the provider to wrap.
    pub fn provider(mut self, provider: P) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Sets the footer view text, which also enables load-more.
    pub fn footer_view(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }

    /// Sets the view shown when the provider has no rows.
    pub fn empty_view(mut self, text: impl Into<String>) -> Self {
        self.empty = Some(text.into());
        self
    }

    /// Builds the adapter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingProvider`] when no provider was supplied.
    pub fn build(self) -> Result<WrappingAdapter<P>> {
        let inner = self.provider.ok_or(Error::MissingProvider)?;
        Ok(WrappingAdapter::new(inner, self.footer, self.empty))
    }
}

impl<P: RowProvider> WrappingAdapter<P> {
    /// Wraps `inner` with an optional footer view and an optional empty view.
    ///
    /// The footer starts hidden; the list shows it while loading more.
    pub fn new(inner: P, footer: Option<String>, empty: Option<String>) -> Self {
        let footer = footer.map(|text| {
            let mut holder = RowHolder::with_text(RowType::Footer, text);
            holder.set_visible(false);
            holder
        });
        let empty = empty.map(|text| RowHolder::with_text(RowType::Empty, text));
        Self {
            inner,
            footer,
            empty,
            empty_status: Cell::new(false),
            status: Cell::new(AdapterStatus::Normal),
        }
    }

    /// Starts a builder.
    pub fn builder() -> WrappingAdapterBuilder<P> {
        WrappingAdapterBuilder::default()
    }

    /// The wrapped provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Mutable access to the wrapped provider.
    ///
    /// Callers change their data through this and then report the change
    /// with the list's `notify_*` methods.
    pub fn inner_mut(&mut self) -> &mut P {
        &mut self.inner
    }

    /// Number of rows in the wrapped provider.
    pub fn item_count(&self) -> usize {
        self.inner.row_count()
    }

    /// Whether a footer view was configured. Load-more requires one.
    pub fn is_footer_enabled(&self) -> bool {
        self.footer.is_some()
    }

    /// Whether an empty view was configured.
    pub fn is_empty_view_present(&self) -> bool {
        self.empty.is_some()
    }

    /// Whether the last row count query found the empty row active.
    pub fn is_empty_status(&self) -> bool {
        self.empty_status.get()
    }

    /// The last observed status.
    pub fn status(&self) -> AdapterStatus {
        self.status.get()
    }

    pub(crate) fn set_status(&self, status: AdapterStatus) {
        self.status.set(status);
    }

    /// Whether the footer row is currently shown.
    pub fn is_footer_visible(&self) -> bool {
        self.footer.as_ref().is_some_and(RowHolder::is_visible)
    }

    /// Shows or hides the footer row. No-op without a footer.
    pub fn set_footer_visible(&mut self, visible: bool) {
        if let Some(footer) = self.footer.as_mut() {
            footer.set_visible(visible);
        }
    }

    /// Whether `position` maps to a caller item rather than a synthetic row.
    pub fn is_item_row(&self, position: usize) -> bool {
        position < self.row_count() && self.row_type(position).is_item()
    }

    /// Height in lines of the row at `position`, zero when hidden or out of
    /// range. Only item rows are bound to measure them.
    pub fn row_height(&self, position: usize) -> usize {
        if position >= self.row_count() {
            return 0;
        }
        match self.row_type(position) {
            RowType::Footer => self.footer.as_ref().map_or(0, RowHolder::height),
            RowType::Empty => self.empty.as_ref().map_or(0, RowHolder::height),
            row_type @ RowType::Item(_) => {
                let mut holder = self.inner.create_holder(row_type);
                self.inner.bind(&mut holder, position);
                holder.height()
            }
        }
    }

    /// Creates and binds the holder for `position`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowOutOfRange`] when `position` is past the last row.
    pub fn holder_at(&self, position: usize) -> Result<RowHolder> {
        let row_count = self.row_count();
        if position >= row_count {
            return Err(Error::RowOutOfRange {
                position,
                row_count,
            });
        }
        let mut holder = self.create_holder(self.row_type(position));
        self.bind(&mut holder, position);
        Ok(holder)
    }
}

impl<P: RowProvider> RowProvider for WrappingAdapter<P> {
    fn row_count(&self) -> usize {
        let count = self.inner.row_count();
        if count == 0 && self.empty.is_some() {
            self.empty_status.set(true);
            self.status.set(AdapterStatus::Empty);
            return 1;
        }
        self.empty_status.set(false);
        if self.footer.is_some() {
            count + 1
        } else {
            count
        }
    }

    fn row_type(&self, position: usize) -> RowType {
        let row_count = self.row_count();
        if self.empty_status.get() && self.inner.row_count() == 0 {
            return RowType::Empty;
        }
        if self.footer.is_some() && position + 1 == row_count {
            return RowType::Footer;
        }
        self.inner.row_type(position)
    }

    fn create_holder(&self, row_type: RowType) -> RowHolder {
        match row_type {
            RowType::Empty => self
                .empty
                .clone()
                .unwrap_or_else(|| RowHolder::new(RowType::Empty)),
            RowType::Footer => self
                .footer
                .clone()
                .unwrap_or_else(|| RowHolder::new(RowType::Footer)),
            RowType::Item(_) => self.inner.create_holder(row_type),
        }
    }

    fn bind(&self, holder: &mut RowHolder, position: usize) {
        if position < self.inner.row_count() {
            self.inner.bind(holder, position);
        }
    }
}
