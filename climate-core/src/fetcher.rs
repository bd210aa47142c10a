use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Serializer, Value, ser::PrettyFormatter};
use std::path::Path;
use tracing::{error, info};

use crate::{
    Config,
    error::FetchError,
    model::{DateRange, RequestSpec, YearOutcome, YearReport},
    source::{ClimateSource, source_from_config},
};

/// Fetches one season per year and stores each raw response as a JSON file.
///
/// Years are processed one after another. A failed year is reported and
/// skipped; only filesystem errors abort the run.
#[derive(Debug)]
pub struct Fetcher {
    config: Config,
    source: Box<dyn ClimateSource>,
}

impl Fetcher {
    pub fn new(config: Config, source: Box<dyn ClimateSource>) -> Self {
        Self { config, source }
    }

    /// Fetcher backed by the real HTTP source.
    pub fn from_config(config: Config) -> Result<Self> {
        let source = source_from_config(&config)?;
        Ok(Self::new(config, source))
    }

    /// Fetch every configured year.
    pub async fn run_configured(&self) -> Result<Vec<YearReport>> {
        self.run(&self.config.years).await
    }

    /// Fetch `years` in order, returning one report per year.
    ///
    /// Every year must map to a calendar date; otherwise the run fails
    /// before the output directory is touched or any request is sent.
    pub async fn run(&self, years: &[i32]) -> Result<Vec<YearReport>> {
        let seasons = years
            .iter()
            .map(|&year| DateRange::season(year).map(|range| (year, range)))
            .collect::<Result<Vec<_>>>()?;

        self.prepare_output_dir().await?;

        let spec = self.config.request_spec();
        let mut reports = Vec::with_capacity(seasons.len());

        for (idx, &(year, range)) in seasons.iter().enumerate() {
            info!(year, "Starting fetch for year {year} (June 1st - Sept 30th)");
            info!(
                year,
                "Requesting data for {} to {}...",
                range.start_param(),
                range.end_param()
            );

            let outcome = match self.fetch_year(&spec, &range).await {
                Ok(doc) => {
                    let path = self.config.output_path(year);
                    write_pretty_json(&path, &doc).await?;
                    info!(year, path = %path.display(), "SUCCESS: Data saved to {}", path.display());
                    YearOutcome::Saved(path)
                }
                Err(err) => {
                    error!(year, "ERROR: Failed to fetch data for {year}: {err}");
                    YearOutcome::Failed(err)
                }
            };

            reports.push(YearReport { year, outcome });

            if idx + 1 < seasons.len() && !self.config.pause.is_zero() {
                tokio::time::sleep(self.config.pause).await;
            }
        }

        Ok(reports)
    }

    async fn fetch_year(&self, spec: &RequestSpec, range: &DateRange) -> Result<Value, FetchError> {
        let body = self.source.fetch_daily(spec, range).await?;
        serde_json::from_str(&body).map_err(|e| FetchError::decode(&body, e))
    }

    /// Create the output directory and make sure files can be written there.
    async fn prepare_output_dir(&self) -> Result<()> {
        let dir = &self.config.output_dir;

        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

        let check_dir = dir.clone();
        tokio::task::spawn_blocking(move || tempfile::tempfile_in(check_dir))
            .await
            .context("Output directory check did not complete")?
            .with_context(|| format!("Output directory is not writable: {}", dir.display()))?;

        info!("Ensured directory '{}' exists.", dir.display());
        Ok(())
    }
}

async fn write_pretty_json(path: &Path, doc: &Value) -> Result<()> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    doc.serialize(&mut ser).context("Failed to serialize climate payload")?;

    tokio::fs::write(path, buf)
        .await
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}
