//! A scrollable list with pull-to-refresh and load-more.
//!
//! `Model<P>` wraps a caller's [`RowProvider`] in a
//! [`WrappingAdapter`](crate::adapter::WrappingAdapter) and composes three
//! behaviours around a [`ListContainer`](crate::container::ListContainer):
//!
//! - **Pull to refresh**: pressing at the top of the list and dragging down,
//!   or pressing `r`, invokes the refresh listener. The caller reloads its
//!   data and reports back with `notify_refresh_completed`.
//! - **Load more**: a downward scroll that comes to rest with the last row in
//!   view shows the footer row and invokes the load-more listener. The caller
//!   appends data and reports back with `notify_load_more_completed`.
//! - **Item taps**: taps and long presses on item rows, by pointer or by
//!   `enter`/`m` on the cursor row, invoke the item listeners. The footer and
//!   empty rows never do.
//!
//! Refreshing and loading more never overlap; see [`Activity`].
//!
//! ### Input
//! Keys go through [`RefreshListKeyMap`]. Pointer input arrives as
//! [`PointerEvent`](crate::gesture::PointerEvent) messages in widget-local
//! coordinates. An unfocused list ignores both.
//!
//! ### Layout
//! The list sizes itself from `WindowSizeMsg`, or from
//! [`set_size`](Model::set_size) when embedded in a larger layout. A
//! `pull_refresh` requested before the first size arrives runs once it does.
//!
//! ```rust
//! use bubbletea_refresh_list::adapter::WrappingAdapter;
//! use bubbletea_refresh_list::refresh_list::Model;
//! use bubbletea_refresh_list::row::VecRows;
//!
//! let adapter = WrappingAdapter::builder()
//!     .provider(VecRows::new(vec!["one", "two", "three"]))
//!     .footer_view("Loading more…")
//!     .empty_view("No items")
//!     .build()
//!     .unwrap();
//!
//! let mut list = Model::new(40, 10);
//! list.set_adapter(adapter);
//! list.set_on_pull_refresh_listener(|| None);
//! list.set_on_load_more_listener(|| None);
//! assert!(!list.is_refreshing());
//! ```

mod api;
mod keys;
mod model;
mod rendering;
mod state;


pub use keys::RefreshListKeyMap;
pub use rendering::RefreshListStyles;
pub use state::Activity;

use std::sync::atomic::{AtomicI64, Ordering};

use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg, WindowSizeMsg};

use crate::adapter::WrappingAdapter;
use crate::container::ListContainer;
use crate::gesture::{GestureDetector, LongPressMsg, PointerEvent};
use crate::pull::{PullToRefresh, TickMsg};
use crate::row::{RowHolder, RowProvider};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Listener for refresh and load-more requests.
pub type Listener = Box<dyn FnMut() -> Option<Cmd> + Send>;

/// Listener for taps and long presses. Receives the bound row and its
/// position.
pub type ItemListener = Box<dyn FnMut(&RowHolder, usize) -> Option<Cmd> + Send>;

/// Ends the highlight of freshly inserted rows.
#[derive(Debug, Clone)]
pub struct FadeMsg {
    /// The list this message belongs to.
    pub id: i64,
    tag: i64,
}

/// The refresh list widget.
pub struct Model<P: RowProvider> {
    pub(super) container: ListContainer,
    pub(super) pull: PullToRefresh,
    pub(super) adapter: Option<WrappingAdapter<P>>,
    pub(super) activity: Activity,
    pub(super) pull_refresh_enabled: bool,
    pub(super) pending_pull_refresh: bool,
    pub(super) gestures: Option<GestureDetector>,
    pub(super) on_refresh: Option<Listener>,
    pub(super) on_load_more: Option<Listener>,
    pub(super) on_item_click: Option<ItemListener>,
    pub(super) on_item_long_click: Option<ItemListener>,
    pub(super) cursor: usize,
    pub(super) focus: bool,
    pub(super) fade_tag: i64,
    pub(super) id: i64,
    /// Key bindings.
    pub keymap: RefreshListKeyMap,
    /// Row and indicator styles.
    pub styles: RefreshListStyles,
}

impl<P: RowProvider> std::fmt::Debug for Model<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.id)
            .field("activity", &self.activity)
            .field("cursor", &self.cursor)
            .field("offset", &self.container.offset())
            .field("has_adapter", &self.adapter.is_some())
            .finish()
    }
}

/// Runs both commands when both are present.
pub(super) fn join(a: Option<Cmd>, b: Option<Cmd>) -> Option<Cmd> {
    match (a, b) {
        (Some(a), Some(b)) => Some(bubbletea_rs::batch(vec![a, b])),
        (a, b) => a.or(b),
    }
}

impl<P: RowProvider + Send + 'static> BubbleTeaModel for Model<P> {
    /// Creates a focused, 80x24 list with no adapter.
    fn init() -> (Self, Option<Cmd>) {
        (Self::new(80, 24), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            return self.set_size(size.width as usize, size.height as usize);
        }
        if msg.downcast_ref::<TickMsg>().is_some() {
            return self.pull.update(&msg);
        }
        if let Some(fade) = msg.downcast_ref::<FadeMsg>() {
            if fade.id == self.id && fade.tag == self.fade_tag {
                self.container.clear_highlights();
            }
            return None;
        }
        if let Some(long_press) = msg.downcast_ref::<LongPressMsg>() {
            return self.handle_long_press(long_press);
        }
        if let Some(event) = msg.downcast_ref::<PointerEvent>() {
            return self.handle_pointer(*event);
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key_msg);
        }
        None
    }

    fn view(&self) -> String {
        self.render()
    }
}

impl<P: RowProvider> crate::Component for Model<P> {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
        self.pull.cancel_drag();
        if let Some(gestures) = self.gestures.as_mut() {
            gestures.cancel();
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
