//! Shared data models for the `adapters` crate.
//!
//! These define the fixed sheet schema and the `Registrant` record that
//! backend services and store implementations exchange, keeping every
//! adapter on a consistent data format.

use serde::{Deserialize, Serialize};

use crate::errors::StoreError;

/// Fixed store schema. The sheet carries this as its header row.
pub const COLUMNS: [&str; 10] = [
    "Serial No",
    "Name",
    "Register No",
    "Email",
    "Mobile",
    "Gender",
    "Stay Type",
    "Department",
    "Interests",
    "Languages",
];

/// Zero-based index of the `Register No` column, the uniqueness key.
pub const REGISTER_NO_COLUMN: usize = 2;

/// One registrant row, in its stored form.
///
/// Multi-select fields (`interests`, `languages`) hold the `", "`-joined
/// string exactly as it sits in the sheet; an empty selection is `""`.
/// Records are append-only: nothing in the system updates or deletes them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Registrant {
    pub serial_no: u32,
    pub name: String,
    pub register_no: String,
    pub email: String,
    pub mobile: String,
    pub gender: String,
    pub stay_type: String,
    pub department: String,
    pub interests: String,
    pub languages: String,
}

impl Registrant {
    /// Render the record as a store row in schema order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.serial_no.to_string(),
            self.name.clone(),
            self.register_no.clone(),
            self.email.clone(),
            self.mobile.clone(),
            self.gender.clone(),
            self.stay_type.clone(),
            self.department.clone(),
            self.interests.clone(),
            self.languages.clone(),
        ]
    }

    /// Decode one store row.
    ///
    /// Missing trailing cells are treated as empty; a serial that does not
    /// parse as a positive integer makes the row malformed.
    pub fn from_row(row: &[String]) -> Result<Self, StoreError> {
        let cell = |index: usize| row.get(index).cloned().unwrap_or_default();

        let serial_cell = cell(0);
        let serial_no = serial_cell.trim().parse::<u32>().map_err(|_| {
            StoreError::MalformedRow(format!("serial {serial_cell:?} is not a positive integer"))
        })?;

        Ok(Self {
            serial_no,
            name: cell(1),
            register_no: cell(2),
            email: cell(3),
            mobile: cell(4),
            gender: cell(5),
            stay_type: cell(6),
            department: cell(7),
            interests: cell(8),
            languages: cell(9),
        })
    }
}
