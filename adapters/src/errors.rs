//! Custom error types specific to the `adapters` crate.
//!
//! These cover connectivity failures, API-level rejections, and rows that
//! cannot be decoded into records, providing a unified error surface for
//! every store implementation.

use thiserror::Error;

/// Errors raised by a `SheetStore` implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store could not be reached at all.
    #[error("store connection error: {0}")]
    Connection(String),

    /// The store answered with a non-success status.
    #[error("store API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// A stored row could not be decoded into a record.
    #[error("malformed row: {0}")]
    MalformedRow(String),

    /// A column index outside the fixed schema was requested.
    #[error("column index {0} out of range")]
    ColumnOutOfRange(usize),
}
