use crate::acquire;
use crate::constants::{ARCORE_SOURCE, COL_MANUFACTURER, COL_MODEL_NAME};
use crate::dedup::{Collision, DedupPolicy, KeyFolding};
use crate::error::{DeviceListError, Result};
use crate::parser::CsvRow;
use crate::sources::clean_model;
use crate::types::{DeviceRecord, DeviceSource};
use std::time::Duration;
use tracing::instrument;

/// Google's ARCore supported-device list, downloaded as CSV
pub struct ArcoreSource {
    url: String,
    client: reqwest::Client,
}

impl ArcoreSource {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let url = url.into();
        let client = acquire::build_client(timeout).map_err(|source| DeviceListError::Fetch {
            url: url.clone(),
            source,
        })?;
        Ok(Self { url, client })
    }
}

#[async_trait::async_trait]
impl DeviceSource for ArcoreSource {
    fn source_name(&self) -> &'static str {
        ARCORE_SOURCE
    }

    fn location(&self) -> String {
        self.url.clone()
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_csv(&self) -> Result<Vec<u8>> {
        println!("Downloading CSV from {}...", self.url);
        let text = acquire::fetch_text(&self.client, &self.url).await?;
        Ok(text.into_bytes())
    }

    fn normalize_row(&self, row: &CsvRow) -> Vec<DeviceRecord> {
        let manufacturer = row.get(COL_MANUFACTURER).trim();
        if manufacturer.is_empty() {
            return Vec::new();
        }
        match clean_model(row.get(COL_MODEL_NAME)) {
            Some(model) => vec![DeviceRecord::new(manufacturer, model)],
            None => Vec::new(),
        }
    }

    fn dedup_policy(&self) -> DedupPolicy {
        DedupPolicy::new(KeyFolding::Exact, Collision::FirstWins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> ArcoreSource {
        ArcoreSource::new("https://example.invalid/devices.csv", None).unwrap()
    }

    fn row(manufacturer: &str, model: &str) -> CsvRow {
        [("Manufacturer", manufacturer), ("Model Name", model)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_fields_are_trimmed() {
        let records = source().normalize_row(&row("  Samsung ", " Galaxy S21\t"));
        assert_eq!(records, vec![DeviceRecord::new("Samsung", "Galaxy S21")]);
    }

    #[test]
    fn test_rows_missing_either_field_are_dropped() {
        assert!(source().normalize_row(&row("Apple", "")).is_empty());
        assert!(source().normalize_row(&row("   ", "Pixel 6")).is_empty());
        assert!(source().normalize_row(&CsvRow::default()).is_empty());
    }

    #[test]
    fn test_models_lose_line_breaks_and_placeholders() {
        let records = source().normalize_row(&row("Acme", "Widget\nPro"));
        assert_eq!(records, vec![DeviceRecord::new("Acme", "WidgetPro")]);
        assert!(source().normalize_row(&row("Acme", "-")).is_empty());
        assert!(source().normalize_row(&row("Acme", " -\r\n")).is_empty());
    }

    #[test]
    fn test_records_carry_no_status() {
        let records = source().normalize_row(&row("Google", "Pixel 6"));
        assert_eq!(records[0].status, None);
    }
}
