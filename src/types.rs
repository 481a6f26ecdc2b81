use crate::dedup::DedupPolicy;
use crate::error::Result;
use crate::parser::CsvRow;
use serde::{Deserialize, Serialize};

/// Support state derived from the tri-state `Adapted` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportStatus {
    Supported,
    Unsupported,
    Unknown,
}

impl SupportStatus {
    /// `true` / `false` (any case, surrounding whitespace ignored); everything else is unknown.
    pub fn from_flag(flag: &str) -> Self {
        match flag.trim().to_lowercase().as_str() {
            "true" => SupportStatus::Supported,
            "false" => SupportStatus::Unsupported,
            _ => SupportStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SupportStatus::Supported => "supported",
            SupportStatus::Unsupported => "unsupported",
            SupportStatus::Unknown => "unknown",
        }
    }
}

/// One normalized device entry as written to the output JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub manufacturer: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SupportStatus>,
}

impl DeviceRecord {
    pub fn new(manufacturer: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            model: model.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: SupportStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Core trait that every device list source implements
#[async_trait::async_trait]
pub trait DeviceSource: Send + Sync {
    /// Unique identifier for this source, used in logs and metrics
    fn source_name(&self) -> &'static str;

    /// Human readable location of the raw CSV (URL or path)
    fn location(&self) -> String;

    /// Obtain the raw CSV bytes
    async fn fetch_csv(&self) -> Result<Vec<u8>>;

    /// Map one parsed row onto zero or more records. Never fails; bad rows yield nothing.
    fn normalize_row(&self, row: &CsvRow) -> Vec<DeviceRecord>;

    /// How records sharing a key are collapsed
    fn dedup_policy(&self) -> DedupPolicy;
}
