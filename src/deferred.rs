//! Cancellable delayed tasks on a virtual clock.
//!
//! [`Deferred`] holds payloads that become due after a delay. Time only
//! moves when the owner says so:
//!
//! - [`advance`](Deferred::advance) moves the virtual clock forward and
//!   returns every payload that became due, in due order. Tests use this to
//!   step through simulated latency deterministically.
//! - [`tick_cmd`](Deferred::tick_cmd) bridges to real time: it returns a
//!   `bubbletea_rs` command that delivers a [`DueMsg`] after the remaining
//!   delay, and [`update`](Deferred::update) turns that message back into the
//!   payload.
//!
//! Cancelled tasks never fire, whichever way time moves.
//!
//! ```rust
//! use bubbletea_refresh_list::deferred::Deferred;
//! use std::time::Duration;
//!
//! let mut queue = Deferred::new();
//! let slow = queue.schedule(Duration::from_millis(1000), "refresh");
//! queue.schedule(Duration::from_millis(500), "load more");
//!
//! assert_eq!(queue.advance(Duration::from_millis(600)), vec!["load more"]);
//! assert!(queue.cancel(slow));
//! assert!(queue.advance(Duration::from_secs(5)).is_empty());
//! ```

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use tracing::trace;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Identifies a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

/// Delivered by [`Deferred::tick_cmd`] when a task is due in real time.
#[derive(Debug, Clone)]
pub struct DueMsg {
    /// The queue this message belongs to.
    pub id: i64,
    /// The task that is due.
    pub handle: TaskHandle,
}

#[derive(Debug)]
struct Task<T> {
    handle: TaskHandle,
    due: Duration,
    payload: T,
}

/// A queue of delayed, cancellable payloads.
#[derive(Debug)]
pub struct Deferred<T> {
    id: i64,
    now: Duration,
    next_handle: u64,
    tasks: Vec<Task<T>>,
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deferred<T> {
    /// Creates an empty queue with its clock at zero.
    pub fn new() -> Self {
        Self {
            id: next_id(),
            now: Duration::ZERO,
            next_handle: 0,
            tasks: Vec::new(),
        }
    }

    /// The identifier used to route [`DueMsg`]s.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of tasks still waiting.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Whether `handle` is still waiting.
    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|t| t.handle == handle)
    }

    /// Schedules `payload` to become due after `delay`.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TaskHandle {
        self.next_handle += 1;
        let handle = TaskHandle(self.next_handle);
        let due = self.now + delay;
        // Keep tasks ordered by due time, then by scheduling order.
        let idx = self.tasks.partition_point(|t| t.due <= due);
        self.tasks.insert(
            idx,
            Task {
                handle,
                due,
                payload,
            },
        );
        trace!(?handle, ?delay, "task scheduled");
        handle
    }

    /// Cancels a task. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.handle != handle);
        before != self.tasks.len()
    }

    /// Cancels every waiting task.
    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    /// Moves the clock forward by `by` and returns the payloads that became
    /// due, earliest first.
    pub fn advance(&mut self, by: Duration) -> Vec<T> {
        self.now += by;
        let due = self.tasks.partition_point(|t| t.due <= self.now);
        self.tasks.drain(..due).map(|t| t.payload).collect()
    }

    /// Delay until the earliest waiting task, if any.
    pub fn next_due_in(&self) -> Option<Duration> {
        self.tasks.first().map(|t| t.due.saturating_sub(self.now))
    }

    /// A command that delivers a [`DueMsg`] for `handle` once its remaining
    /// delay has passed in real time. `None` if the task is not waiting.
    pub fn tick_cmd(&self, handle: TaskHandle) -> Option<Cmd> {
        let task = self.tasks.iter().find(|t| t.handle == handle)?;
        let delay = task.due.saturating_sub(self.now);
        let id = self.id;
        Some(bubbletea_tick(delay, move |_| {
            Box::new(DueMsg { id, handle }) as Msg
        }))
    }

    /// Resolves a [`DueMsg`] for this queue into its payload.
    ///
    /// The clock jumps to the task's due time if it was behind. Messages for
    /// cancelled tasks or other queues yield `None`.
    pub fn update(&mut self, msg: &Msg) -> Option<T> {
        let due = msg.downcast_ref::<DueMsg>()?;
        if due.id != self.id {
            return None;
        }
        let idx = self.tasks.iter().position(|t| t.handle == due.handle)?;
        let task = self.tasks.remove(idx);
        if task.due > self.now {
            self.now = task.due;
        }
        Some(task.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tasks_fire_in_due_order() {
        let mut q = Deferred::new();
        q.schedule(Duration::from_millis(300), 3);
        q.schedule(Duration::from_millis(100), 1);
        q.schedule(Duration::from_millis(200), 2);
        q.schedule(Duration::from_millis(100), 11);

        assert_eq!(q.next_due_in(), Some(Duration::from_millis(100)));
        assert_eq!(q.advance(Duration::from_millis(150)), vec![1, 11]);
        assert_eq!(q.advance(Duration::from_millis(150)), vec![2, 3]);
        assert_eq!(q.pending(), 0);
        assert_eq!(q.now(), Duration::from_millis(300));
    }

    #[test]
    fn test_cancelled_task_never_fires() {
        let mut q = Deferred::new();
        let h = q.schedule(Duration::from_millis(10), "x");
        assert!(q.is_pending(h));
        assert!(q.cancel(h));
        assert!(!q.cancel(h));
        assert!(q.advance(Duration::from_secs(1)).is_empty());
        assert!(q.tick_cmd(h).is_none());
    }

    #[test]
    fn test_due_message_resolves_payload() {
        let mut q = Deferred::new();
        let h = q.schedule(Duration::from_millis(500), "refresh");
        assert!(q.tick_cmd(h).is_some());

        let msg: Msg = Box::new(DueMsg { id: q.id(), handle: h });
        assert_eq!(q.update(&msg), Some("refresh"));
        assert_eq!(q.now(), Duration::from_millis(500));
        // Delivered once.
        assert_eq!(q.update(&msg), None);
    }

    #[test]
    fn test_due_message_for_other_queue_is_ignored() {
        let mut a = Deferred::new();
        let b: Deferred<&str> = Deferred::new();
        let h = a.schedule(Duration::from_millis(5), "a");
        let msg: Msg = Box::new(DueMsg { id: b.id(), handle: h });
        assert_eq!(a.update(&msg), None);
        assert!(a.is_pending(h));
    }
}
