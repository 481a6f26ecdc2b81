use crate::acquire;
use crate::constants::{
    COL_ADAPTED, COL_BRAND, COL_DEVICE_MODEL_NAME, COL_MODEL, LIGAR_SOURCE, SENTINEL,
};
use crate::dedup::{Collision, DedupPolicy, KeyFolding};
use crate::error::Result;
use crate::parser::CsvRow;
use crate::sources::clean_model;
use crate::types::{DeviceRecord, DeviceSource, SupportStatus};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::instrument;

/// Which model columns become records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ModelPolicy {
    /// Device model name and Model each produce their own record
    #[default]
    #[value(name = "multi")]
    MultiCandidate,
    /// Device model name, falling back to Model
    #[value(name = "single")]
    SingleCandidate,
}

/// LiGAR adaptation export, read from a local CSV file
pub struct LigarSource {
    path: PathBuf,
    policy: ModelPolicy,
}

impl LigarSource {
    pub fn new(path: impl Into<PathBuf>, policy: ModelPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
        }
    }

    fn candidates<'a>(&self, row: &'a CsvRow) -> Vec<&'a str> {
        let usable = |v: &str| !v.is_empty() && v != SENTINEL;
        let device_model_name = row.get(COL_DEVICE_MODEL_NAME).trim();
        let model = row.get(COL_MODEL).trim();

        match self.policy {
            ModelPolicy::MultiCandidate => {
                let mut out = Vec::with_capacity(2);
                if usable(device_model_name) {
                    out.push(device_model_name);
                }
                if usable(model) && model != device_model_name {
                    out.push(model);
                }
                out
            }
            ModelPolicy::SingleCandidate => {
                if usable(device_model_name) {
                    vec![device_model_name]
                } else {
                    vec![model]
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl DeviceSource for LigarSource {
    fn source_name(&self) -> &'static str {
        LIGAR_SOURCE
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch_csv(&self) -> Result<Vec<u8>> {
        println!("Reading CSV from {}...", self.path.display());
        acquire::read_bytes(&self.path).await
    }

    fn normalize_row(&self, row: &CsvRow) -> Vec<DeviceRecord> {
        let brand = row.get(COL_BRAND).trim();
        if brand.is_empty() {
            return Vec::new();
        }
        let status = SupportStatus::from_flag(row.get(COL_ADAPTED));

        let mut records: Vec<DeviceRecord> = Vec::new();
        for candidate in self.candidates(row) {
            let Some(model) = clean_model(candidate) else {
                continue;
            };
            // Two columns can collapse to the same text once line breaks are gone.
            if records.iter().any(|r| r.model == model) {
                continue;
            }
            records.push(DeviceRecord::new(brand, model).with_status(status));
        }
        records
    }

    fn dedup_policy(&self) -> DedupPolicy {
        DedupPolicy::new(KeyFolding::CaseInsensitive, Collision::LastWins)
    }
}
