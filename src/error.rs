//! Error types for the refresh list component.

use thiserror::Error;

/// Errors reported by the refresh list and its adapter.
///
/// Every variant describes caller misuse; the component itself performs no
/// I/O and has no other failure modes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A [`WrappingAdapter`](crate::adapter::WrappingAdapter) was built
    /// without a row provider to wrap.
    #[error("adapter is missing a wrapped row provider")]
    MissingProvider,

    /// The operation needs an adapter but none has been attached with
    /// [`Model::set_adapter`](crate::refresh_list::Model::set_adapter).
    #[error("no adapter attached to the list")]
    NoAdapter,

    /// A row position outside the current row address space.
    #[error("row {position} is out of range (row count {row_count})")]
    RowOutOfRange {
        /// The requested position.
        position: usize,
        /// The row count at the time of the request.
        row_count: usize,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::MissingProvider.to_string(),
            "adapter is missing a wrapped row provider"
        );
        assert_eq!(
            Error::RowOutOfRange {
                position: 7,
                row_count: 3
            }
            .to_string(),
            "row 7 is out of range (row count 3)"
        );
    }
}
