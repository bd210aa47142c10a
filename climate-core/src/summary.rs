//! Weekly aggregates over a saved season, the way the farm game consumes
//! the files: 14 consecutive 7-day weeks starting June 1st.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;

use crate::error::SummaryError;

/// POWER's marker for a missing daily value.
pub const FILL_VALUE: f64 = -999.0;

pub const WEEKS_PER_SEASON: usize = 14;
pub const DAYS_PER_WEEK: usize = 7;

const TEMPERATURE: &str = "T2M";
const PRECIPITATION: &str = "PRECTOTCORR";
const SOIL_WETNESS: &str = "GWETPROF";
const IRRADIANCE: &str = "ALLSKY_SFC_SW_DWN";

/// Daily means for one week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyAverages {
    pub temperature_c: f64,
    pub rainfall_mm: f64,
    /// Root-zone wetness scaled to percent.
    pub soil_moisture_pct: f64,
    pub irradiance_mj_m2: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyClimate {
    /// 1-based.
    pub week: u32,
    pub valid_days: usize,
    /// `None` when no day of the week had a temperature reading.
    pub averages: Option<WeeklyAverages>,
}

/// Read a file written by the fetcher.
pub fn load_season(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read season file: {}", path.display()))?;

    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse season file: {}", path.display()))
}

pub fn summarize(doc: &Value) -> Result<Vec<WeeklyClimate>, SummaryError> {
    let temperature = series(doc, TEMPERATURE).ok_or(SummaryError::MissingSeries(TEMPERATURE))?;
    let rain = series(doc, PRECIPITATION);
    let soil = series(doc, SOIL_WETNESS);
    let irradiance = series(doc, IRRADIANCE);

    // YYYYMMDD keys sort chronologically.
    let mut dates: Vec<&String> = temperature.keys().collect();
    dates.sort();

    let weeks = (0..WEEKS_PER_SEASON)
        .map(|w| {
            let start = (w * DAYS_PER_WEEK).min(dates.len());
            let end = (start + DAYS_PER_WEEK).min(dates.len());

            let mut sums = [0.0_f64; 4];
            let mut count = 0usize;

            for date in &dates[start..end] {
                let Some(t) = reading(Some(temperature), date) else {
                    continue;
                };

                sums[0] += t;
                sums[1] += reading(rain, date).unwrap_or(0.0);
                sums[2] += reading(soil, date).unwrap_or(0.0);
                sums[3] += reading(irradiance, date).unwrap_or(0.0);
                count += 1;
            }

            let averages = (count > 0).then(|| {
                let n = count as f64;
                WeeklyAverages {
                    temperature_c: sums[0] / n,
                    rainfall_mm: sums[1] / n,
                    soil_moisture_pct: sums[2] / n * 100.0,
                    irradiance_mj_m2: sums[3] / n,
                }
            });

            WeeklyClimate { week: w as u32 + 1, valid_days: count, averages }
        })
        .collect();

    Ok(weeks)
}

fn series<'a>(doc: &'a Value, code: &str) -> Option<&'a Map<String, Value>> {
    doc.get("properties")?.get("parameter")?.get(code)?.as_object()
}

fn reading(series: Option<&Map<String, Value>>, date: &str) -> Option<f64> {
    series?.get(date)?.as_f64().filter(|v| *v != FILL_VALUE)
}
