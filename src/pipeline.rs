use crate::dedup::{DeviceCatalog, Insertion};
use crate::error::Result;
use crate::parser::parse_rows;
use crate::types::{DeviceRecord, DeviceSource};
use metrics::{counter, histogram};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Result of a complete pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub source_name: String,
    pub rows_read: usize,
    pub records_normalized: usize,
    pub rows_dropped: usize,
    pub duplicates: usize,
    pub unique_records: usize,
    pub output_file: String,
}

pub struct Pipeline;

impl Pipeline {
    /// Parse, normalize and deduplicate raw CSV for `source`.
    pub fn build_catalog(
        source: &dyn DeviceSource,
        csv_data: &[u8],
    ) -> Result<(DeviceCatalog, RowStats)> {
        let rows = parse_rows(csv_data)?;
        let mut catalog = DeviceCatalog::new(source.dedup_policy());
        let mut stats = RowStats {
            rows_read: rows.len(),
            ..RowStats::default()
        };

        for (i, row) in rows.iter().enumerate() {
            let records = source.normalize_row(row);
            if records.is_empty() {
                debug!("Dropping row {}: no usable manufacturer/model", i + 1);
                stats.rows_dropped += 1;
                continue;
            }
            stats.records_normalized += records.len();
            for record in records {
                if catalog.insert(record) != Insertion::New {
                    debug!("Row {} duplicates an earlier device", i + 1);
                }
            }
        }
        Ok((catalog, stats))
    }

    /// Run acquire → parse → normalize → dedupe → write for one source.
    #[instrument(skip(source), fields(source_name = %source.source_name()))]
    pub async fn run_for_source(
        source: &dyn DeviceSource,
        output: &Path,
    ) -> Result<PipelineResult> {
        let name = source.source_name();
        counter!("device_pipeline_runs_total", "source" => name).increment(1);
        let t_pipeline = std::time::Instant::now();

        match Self::run_inner(source, output).await {
            Ok(result) => {
                histogram!("device_pipeline_duration_seconds", "source" => name)
                    .record(t_pipeline.elapsed().as_secs_f64());
                Ok(result)
            }
            Err(e) => {
                counter!("device_pipeline_errors_total", "source" => name).increment(1);
                Err(e)
            }
        }
    }

    async fn run_inner(source: &dyn DeviceSource, output: &Path) -> Result<PipelineResult> {
        let name = source.source_name();

        // Step 1: Acquire
        info!("Acquiring CSV from {}", source.location());
        let csv_data = source.fetch_csv().await?;

        // Step 2-4: Parse, normalize, deduplicate
        println!("Parsing CSV...");
        let (catalog, stats) = Self::build_catalog(source, &csv_data)?;
        counter!("device_rows_read_total", "source" => name).increment(stats.rows_read as u64);
        counter!("device_rows_dropped_total", "source" => name)
            .increment(stats.rows_dropped as u64);
        counter!("device_duplicates_total", "source" => name)
            .increment(catalog.duplicates() as u64);
        info!(
            "Normalized {} records from {} rows ({} dropped, {} duplicates)",
            stats.records_normalized,
            stats.rows_read,
            stats.rows_dropped,
            catalog.duplicates()
        );

        let duplicates = catalog.duplicates();
        let records = catalog.into_records();
        println!("Found {} unique devices.", records.len());

        // Step 5: Write
        println!("Writing to {}...", output.display());
        Self::persist_to_json(&records, output)?;
        counter!("device_records_written_total", "source" => name)
            .increment(records.len() as u64);
        info!("Saved {} devices to {}", records.len(), output.display());

        Ok(PipelineResult {
            source_name: name.to_string(),
            rows_read: stats.rows_read,
            records_normalized: stats.records_normalized,
            rows_dropped: stats.rows_dropped,
            duplicates,
            unique_records: records.len(),
            output_file: output.display().to_string(),
        })
    }

    /// Persist records as a pretty-printed JSON array, replacing any existing file
    pub fn persist_to_json(records: &[DeviceRecord], output: &Path) -> Result<()> {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json_content = serde_json::to_string_pretty(records)?;
        fs::write(output, json_content)?;
        Ok(())
    }
}

/// Per-row counters gathered while building a catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowStats {
    pub rows_read: usize,
    pub records_normalized: usize,
    pub rows_dropped: usize,
}
