//! Core `adapters` crate for abstracting spreadsheet store interactions.
//!
//! This crate defines the `SheetStore` trait, which outlines the narrow set
//! of operations the registration service needs from a spreadsheet-backed
//! store, and provides the concrete implementations (Google Sheets REST,
//! in-memory).

pub mod errors;
pub mod google;
pub mod memory;
pub mod models;

// Re-exports for convenience
pub use errors::StoreError;
pub use google::{GoogleSheetsConnection, GoogleSheetsStore};
pub use memory::InMemorySheetStore;
pub use models::{Registrant, COLUMNS, REGISTER_NO_COLUMN};

use async_trait::async_trait;

/// Narrow interface over the external spreadsheet store.
///
/// The store offers no transactional or locking guarantees: every operation
/// is a single round-trip whose failure is surfaced to the caller as-is,
/// never retried. Read-then-write sequences built on top of this trait are
/// inherently racy against other clients of the same sheet.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Every stored data row as a structured record.
    ///
    /// A header-only or completely empty store yields an empty vector.
    async fn fetch_all_rows(&self) -> Result<Vec<Registrant>, StoreError>;

    /// Every value in one zero-based column, header included as the first
    /// element. Callers are expected to skip the header.
    async fn fetch_column(&self, index: usize) -> Result<Vec<String>, StoreError>;

    /// Append one row at the end of the store.
    async fn append_row(&self, values: &[String]) -> Result<(), StoreError>;
}
