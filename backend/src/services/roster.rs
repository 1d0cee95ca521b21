//! Admin roster workflow: list every stored record and export the current
//! snapshot as a spreadsheet or a PDF.
//!
//! Exports are never cached; each request re-fetches and re-serializes, so
//! a download always reflects the store at the time of the request.

use std::sync::Arc;

use clubreg_adapters::{Registrant, SheetStore, COLUMNS};
use serde::Serialize;

use crate::errors::AppError;
use crate::export::{self, Cell, Table};

/// Listing payload.
///
/// An empty store is a valid roster with `total == 0`, deliberately
/// distinguishable from a store error.
#[derive(Serialize, Debug)]
pub struct MemberRoster {
    pub total: usize,
    pub members: Vec<Registrant>,
}

pub struct RosterService {
    store: Arc<dyn SheetStore>,
}

impl RosterService {
    pub fn new(store: Arc<dyn SheetStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<MemberRoster, AppError> {
        let members = self.store.fetch_all_rows().await?;
        Ok(MemberRoster {
            total: members.len(),
            members,
        })
    }

    pub async fn export_xlsx(&self) -> Result<Vec<u8>, AppError> {
        let table = self.snapshot().await?;
        Ok(export::xlsx::encode(&table)?)
    }

    pub async fn export_pdf(&self) -> Result<Vec<u8>, AppError> {
        let table = self.snapshot().await?;
        Ok(export::pdf::encode(&table)?)
    }

    async fn snapshot(&self) -> Result<Table, AppError> {
        let members = self.store.fetch_all_rows().await?;
        Ok(to_table(&members))
    }
}

/// Lay the roster out as an export dataset, schema column order preserved.
/// Serials become numeric cells; everything else stays text.
fn to_table(members: &[Registrant]) -> Table {
    let columns = COLUMNS.iter().map(|c| c.to_string()).collect();
    let rows = members
        .iter()
        .map(|m| {
            vec![
                Cell::Number(f64::from(m.serial_no)),
                Cell::text(&m.name),
                Cell::text(&m.register_no),
                Cell::text(&m.email),
                Cell::text(&m.mobile),
                Cell::text(&m.gender),
                Cell::text(&m.stay_type),
                Cell::text(&m.department),
                Cell::text(&m.interests),
                Cell::text(&m.languages),
            ]
        })
        .collect();
    Table { columns, rows }
}

#[cfg(test)]
mod tests {
    use clubreg_adapters::InMemorySheetStore;

    use super::*;

    fn member(serial: u32, name: &str, register_no: &str) -> Vec<String> {
        Registrant {
            serial_no: serial,
            name: name.to_string(),
            register_no: register_no.to_string(),
            email: format!("{register_no}@example.com"),
            mobile: "9876543210".to_string(),
            gender: "Female".to_string(),
            stay_type: "Hostel".to_string(),
            department: "CSE".to_string(),
            interests: "AI".to_string(),
            languages: "Python, C".to_string(),
        }
        .to_row()
    }

    #[tokio::test]
    async fn empty_store_lists_as_zero_members() {
        let service = RosterService::new(Arc::new(InMemorySheetStore::new()));
        let roster = service.list().await.unwrap();
        assert_eq!(roster.total, 0);
        assert!(roster.members.is_empty());
    }

    #[tokio::test]
    async fn roster_reflects_stored_rows() {
        let store = InMemorySheetStore::with_rows(vec![
            member(1, "Asha", "21CS001"),
            member(2, "Ravi", "21CS002"),
        ]);
        let service = RosterService::new(Arc::new(store));
        let roster = service.list().await.unwrap();
        assert_eq!(roster.total, 2);
        assert_eq!(roster.members[1].name, "Ravi");
    }

    #[tokio::test]
    async fn snapshot_keeps_schema_order_and_serial_as_number() {
        let store = InMemorySheetStore::with_rows(vec![member(1, "Asha", "21CS001")]);
        let service = RosterService::new(Arc::new(store));
        let table = service.snapshot().await.unwrap();

        assert_eq!(table.columns[0], "Serial No");
        assert_eq!(table.columns[9], "Languages");
        assert_eq!(table.rows[0][0], Cell::Number(1.0));
        assert_eq!(table.rows[0][2], Cell::text("21CS001"));
    }
}
