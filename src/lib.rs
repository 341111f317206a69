#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-refresh-list/")]

//! # bubbletea-refresh-list
//!
//! A scrollable list component for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! with pull-to-refresh, load-more on scroll, a load-more footer row and an
//! empty-state row.
//!
//! ## Overview
//!
//! The list follows the Elm Architecture like every bubbletea-rs component:
//! `update()` consumes messages and may return a command, `view()` renders a
//! string. Your data stays in your own [`RowProvider`]; the list reaches it
//! only through that trait.
//!
//! - [`row`]: the `RowProvider` capability and the `RowHolder` render unit
//! - [`adapter`]: `WrappingAdapter`, which adds the footer and empty rows
//! - [`container`]: viewport, scroll state and change notifications
//! - [`pull`]: the pull gesture and the refreshing indicator
//! - [`gesture`]: tap and long-press recognition for pointer input
//! - [`deferred`]: cancellable delayed tasks on a virtual clock
//! - [`refresh_list`]: the `Model` that ties them together
//!
//! ## Refresh and load-more
//!
//! The list never fetches anything itself. It calls your listener and waits
//! for you to report back:
//!
//! ```rust
//! use bubbletea_refresh_list::prelude::*;
//!
//! let adapter = WrappingAdapter::builder()
//!     .provider(VecRows::new(vec!["first".to_string()]))
//!     .footer_view("Loading more…")
//!     .build()
//!     .unwrap();
//!
//! let mut list = RefreshList::new(40, 10).with_adapter(adapter);
//! list.set_on_pull_refresh_listener(|| None);
//!
//! let _cmd = list.pull_refresh();
//! assert!(list.is_refreshing());
//!
//! // Later, once the new data is in place:
//! list.adapter_mut().unwrap().inner_mut().items_mut().insert(0, "newest".to_string());
//! list.notify_refresh_completed(1).unwrap();
//! assert!(!list.is_refreshing());
//! ```
//!
//! ## Focus Management
//!
//! The list implements the [`Component`] trait. A blurred list ignores keys
//! and pointer input:
//!
//! ```rust
//! use bubbletea_refresh_list::prelude::*;
//! use bubbletea_rs::Cmd;
//!
//! fn handle_focus<T: Component>(component: &mut T) {
//!     let _cmd: Option<Cmd> = component.focus();
//!     assert!(component.focused());
//!     component.blur();
//!     assert!(!component.focused());
//! }
//!
//! let mut list: RefreshList<VecRows<String>> = RefreshList::new(40, 10);
//! handle_focus(&mut list);
//! ```

pub mod adapter;
pub mod container;
pub mod deferred;
pub mod error;
pub mod gesture;
pub mod key;
pub mod pull;
pub mod refresh_list;
pub mod row;

use bubbletea_rs::Cmd;

/// Focus management for components that take keyboard input.
///
/// A focused component handles input; a blurred one ignores it. Parents use
/// this to move focus between several components.
pub trait Component {
    /// Focuses the component. May return a command to run on focus.
    fn focus(&mut self) -> Option<Cmd>;

    /// Blurs the component, dropping any gesture in progress.
    fn blur(&mut self);

    /// Whether the component is focused.
    fn focused(&self) -> bool;
}

pub use adapter::{AdapterStatus, WrappingAdapter, WrappingAdapterBuilder};
pub use container::{
    ItemAnimator, ItemDecoration, ListContainer, RowChange, RowHeights, ScrollState,
};
pub use deferred::{Deferred, DueMsg, TaskHandle};
pub use error::{Error, Result};
pub use gesture::{Gesture, GestureDetector, LongPressMsg, PointerEvent, PointerKind};
pub use key::{matches, Binding, Help as KeyHelp, KeyMap, KeyPress};
pub use pull::{PullToRefresh, TickMsg as PullTickMsg};
pub use refresh_list::{
    Activity, FadeMsg, ItemListener, Listener, Model as RefreshList, RefreshListKeyMap,
    RefreshListStyles,
};
pub use row::{RowHolder, RowProvider, RowType, VecRows};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_refresh_list::prelude::*;
///
/// let rows = VecRows::new(vec!["a", "b"]);
/// assert_eq!(rows.row_count(), 2);
/// ```
pub mod prelude {
    pub use crate::adapter::{AdapterStatus, WrappingAdapter};
    pub use crate::container::{ItemAnimator, ItemDecoration, RowChange};
    pub use crate::deferred::{Deferred, TaskHandle};
    pub use crate::error::{Error, Result};
    pub use crate::gesture::{PointerEvent, PointerKind};
    pub use crate::key::{Binding, KeyMap};
    pub use crate::refresh_list::{
        Activity, Model as RefreshList, RefreshListKeyMap, RefreshListStyles,
    };
    pub use crate::row::{RowHolder, RowProvider, RowType, VecRows};
    pub use crate::Component;
}
