//! Google Sheets-backed `SheetStore` implementation.
//!
//! A deliberately narrow client over the Sheets v4 values API: one GET for
//! range reads, one POST for appends. Token acquisition, retries, and quota
//! handling all live outside this crate; the adapter is a pass-through.

use serde::Deserialize;

use crate::errors::StoreError;
use crate::models::{Registrant, COLUMNS};
use crate::SheetStore;
use async_trait::async_trait;

/// Default endpoint of the Sheets values API.
pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";

/// Connection settings for one spreadsheet.
#[derive(Deserialize, Debug, Clone)]
pub struct GoogleSheetsConnection {
    pub spreadsheet_id: String,
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    /// Pre-issued bearer token. Obtaining and refreshing it is the
    /// caller's concern.
    pub token: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_sheet_name() -> String {
    "Sheet1".to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

/// Sheets v4 values API client.
pub struct GoogleSheetsStore {
    http: reqwest::Client,
    conn: GoogleSheetsConnection,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl GoogleSheetsStore {
    pub fn new(conn: GoogleSheetsConnection) -> Self {
        Self {
            http: reqwest::Client::new(),
            conn,
        }
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.conn.api_base, self.conn.spreadsheet_id, range
        )
    }

    async fn get_range(&self, range: &str) -> Result<Vec<Vec<String>>, StoreError> {
        tracing::debug!(%range, "fetching sheet range");
        let response = self
            .http
            .get(self.values_url(range))
            .bearer_auth(&self.conn.token)
            .send()
            .await
            .map_err(|err| StoreError::Connection(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ValueRange = response
            .json()
            .await
            .map_err(|err| StoreError::Connection(err.to_string()))?;
        Ok(body.values)
    }
}

/// A1-notation range covering one whole column.
fn column_range(sheet_name: &str, index: usize) -> Result<String, StoreError> {
    // The fixed schema never grows past column Z.
    if index >= 26 {
        return Err(StoreError::ColumnOutOfRange(index));
    }
    let letter = (b'A' + index as u8) as char;
    Ok(format!("{sheet_name}!{letter}:{letter}"))
}

#[async_trait]
impl SheetStore for GoogleSheetsStore {
    async fn fetch_all_rows(&self) -> Result<Vec<Registrant>, StoreError> {
        let rows = self.get_range(&self.conn.sheet_name).await?;
        rows.iter().skip(1).map(|r| Registrant::from_row(r)).collect()
    }

    async fn fetch_column(&self, index: usize) -> Result<Vec<String>, StoreError> {
        if index >= COLUMNS.len() {
            return Err(StoreError::ColumnOutOfRange(index));
        }
        let range = column_range(&self.conn.sheet_name, index)?;
        let rows = self.get_range(&range).await?;
        Ok(rows
            .into_iter()
            .map(|row| row.into_iter().next().unwrap_or_default())
            .collect())
    }

    async fn append_row(&self, values: &[String]) -> Result<(), StoreError> {
        tracing::debug!(cells = values.len(), "appending sheet row");
        let url = format!(
            "{}:append?valueInputOption=RAW",
            self.values_url(&format!("{}!A1", self.conn.sheet_name))
        );
        let body = serde_json::json!({ "values": [values] });

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.conn.token)
            .json(&body)
            .send()
            .await
            .map_err(|err| StoreError::Connection(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_ranges_use_a1_notation() {
        assert_eq!(column_range("Sheet1", 0).unwrap(), "Sheet1!A:A");
        assert_eq!(column_range("Members", 2).unwrap(), "Members!C:C");
    }

    #[test]
    fn column_range_past_z_is_rejected() {
        assert!(matches!(
            column_range("Sheet1", 26),
            Err(StoreError::ColumnOutOfRange(26))
        ));
    }

    #[test]
    fn value_range_without_values_field_is_empty() {
        let body: ValueRange = serde_json::from_str(r#"{"range":"Sheet1!A:J"}"#).unwrap();
        assert!(body.values.is_empty());
    }
}
