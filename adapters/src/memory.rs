//! In-memory `SheetStore` implementation.
//!
//! Backs the test suite and serves as a fallback backend when no external
//! sheet is configured. It mirrors the observable contract of the REST
//! store: a header row plus appended data rows, nothing more.

use tokio::sync::Mutex;

use crate::errors::StoreError;
use crate::models::{Registrant, COLUMNS};
use crate::SheetStore;
use async_trait::async_trait;

/// Process-local sheet: a header row followed by appended data rows.
pub struct InMemorySheetStore {
    rows: Mutex<Vec<Vec<String>>>,
}

impl InMemorySheetStore {
    /// Create an empty store holding only the header row.
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    /// Create a store pre-seeded with data rows (header added automatically).
    pub fn with_rows(data_rows: Vec<Vec<String>>) -> Self {
        let mut rows = Vec::with_capacity(data_rows.len() + 1);
        rows.push(COLUMNS.iter().map(|c| c.to_string()).collect());
        rows.extend(data_rows);
        Self {
            rows: Mutex::new(rows),
        }
    }
}

impl Default for InMemorySheetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SheetStore for InMemorySheetStore {
    async fn fetch_all_rows(&self) -> Result<Vec<Registrant>, StoreError> {
        let rows = self.rows.lock().await;
        rows.iter().skip(1).map(|r| Registrant::from_row(r)).collect()
    }

    async fn fetch_column(&self, index: usize) -> Result<Vec<String>, StoreError> {
        if index >= COLUMNS.len() {
            return Err(StoreError::ColumnOutOfRange(index));
        }
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .map(|r| r.get(index).cloned().unwrap_or_default())
            .collect())
    }

    async fn append_row(&self, values: &[String]) -> Result<(), StoreError> {
        self.rows.lock().await.push(values.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn empty_store_has_no_records() {
        let store = InMemorySheetStore::new();
        assert!(store.fetch_all_rows().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn column_fetch_includes_header() {
        let store = InMemorySheetStore::with_rows(vec![row(&["1", "Asha", "21CS001"])]);
        let column = store.fetch_column(2).await.unwrap();
        assert_eq!(column, vec!["Register No".to_string(), "21CS001".to_string()]);
    }

    #[tokio::test]
    async fn appended_rows_come_back_in_order() {
        let store = InMemorySheetStore::new();
        store
            .append_row(&row(&["1", "Asha", "21CS001", "a@x.in", "1", "Female", "Hostel", "CSE", "", ""]))
            .await
            .unwrap();
        store
            .append_row(&row(&["2", "Ravi", "21CS002", "r@x.in", "2", "Male", "Day-Scholar", "AI", "", ""]))
            .await
            .unwrap();

        let records = store.fetch_all_rows().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].serial_no, 1);
        assert_eq!(records[1].register_no, "21CS002");
    }

    #[tokio::test]
    async fn out_of_range_column_is_rejected() {
        let store = InMemorySheetStore::new();
        let err = store.fetch_column(10).await.unwrap_err();
        assert!(matches!(err, StoreError::ColumnOutOfRange(10)));
    }
}
