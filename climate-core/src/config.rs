use anyhow::{Result, anyhow};
use std::{path::PathBuf, time::Duration};

use crate::model::{Location, RequestSpec};

/// Base URL for the NASA POWER daily point API.
pub const POWER_DAILY_POINT_URL: &str = "https://power.larc.nasa.gov/api/temporal/daily/point";

/// Mawsynram, Meghalaya.
pub const DEFAULT_LOCATION: Location = Location {
    name: "mawsynram",
    latitude: 25.2970,
    longitude: 91.5822,
};

pub const DEFAULT_YEARS: [i32; 3] = [2024, 2023, 2022];

pub const DEFAULT_OUTPUT_DIR: &str = "src/data";

/// Renewable-energy community.
pub const DEFAULT_COMMUNITY: &str = "RE";

pub const DEFAULT_PARAMETERS: [&str; 4] = ["T2M", "PRECTOTCORR", "GWETPROF", "ALLSKY_SFC_SW_DWN"];

pub const DEFAULT_FORMAT: &str = "JSON";

pub const DEFAULT_PAUSE: Duration = Duration::from_secs(1);

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

pub const USER_AGENT: &str = concat!("climate-fetch/", env!("CARGO_PKG_VERSION"));

/// Everything a run needs. There is no config file: `Default` carries the
/// built-in constants and callers override single fields.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub location: Location,
    pub community: String,
    pub parameters: Vec<String>,
    pub format: String,

    /// Years to fetch, processed in this order.
    pub years: Vec<i32>,

    pub output_dir: PathBuf,

    /// Sleep between two consecutive requests.
    pub pause: Duration,

    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: POWER_DAILY_POINT_URL.to_string(),
            location: DEFAULT_LOCATION,
            community: DEFAULT_COMMUNITY.to_string(),
            parameters: DEFAULT_PARAMETERS.iter().map(|p| p.to_string()).collect(),
            format: DEFAULT_FORMAT.to_string(),
            years: DEFAULT_YEARS.to_vec(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            pause: DEFAULT_PAUSE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Common query parameters shared by every year's request.
    pub fn request_spec(&self) -> RequestSpec {
        RequestSpec {
            location: self.location,
            community: self.community.clone(),
            parameters: self.parameters.clone(),
            format: self.format.clone(),
        }
    }

    /// Replace the year list if `years` is non-empty.
    pub fn override_years(&mut self, years: Vec<i32>) {
        if !years.is_empty() {
            self.years = years;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.years.is_empty() {
            return Err(anyhow!("No years configured; nothing to fetch."));
        }

        if let Some(year) = self.years.iter().find(|y| !(1..=9999).contains(*y)) {
            return Err(anyhow!("Year {year} is out of range (expected 1..=9999)."));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(anyhow!("Output directory must not be empty."));
        }

        if self.parameters.is_empty() {
            return Err(anyhow!("At least one variable code must be requested."));
        }

        Ok(())
    }

    /// Where the file for `year` is written.
    pub fn output_path(&self, year: i32) -> PathBuf {
        self.output_dir.join(self.location.file_name(year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_mawsynram_season_fetch() {
        let cfg = Config::default();

        assert_eq!(cfg.years, vec![2024, 2023, 2022]);
        assert_eq!(cfg.location.name, "mawsynram");
        assert_eq!(cfg.output_dir, PathBuf::from("src/data"));
        assert_eq!(cfg.pause, Duration::from_secs(1));
        assert_eq!(cfg.parameters.join(","), "T2M,PRECTOTCORR,GWETPROF,ALLSKY_SFC_SW_DWN");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_years() {
        let cfg = Config { years: vec![], ..Config::default() };
        let err = cfg.validate().unwrap_err();

        assert!(err.to_string().contains("No years configured"));
    }

    #[test]
    fn validate_rejects_out_of_range_year() {
        let cfg = Config { years: vec![2024, 0], ..Config::default() };
        let err = cfg.validate().unwrap_err();

        assert!(err.to_string().contains("Year 0 is out of range"));
    }

    #[test]
    fn override_years_keeps_defaults_when_none_given() {
        let mut cfg = Config::default();

        cfg.override_years(vec![]);
        assert_eq!(cfg.years, DEFAULT_YEARS.to_vec());

        cfg.override_years(vec![2020]);
        assert_eq!(cfg.years, vec![2020]);
    }

    #[test]
    fn output_path_is_named_after_location_and_year() {
        let cfg = Config { output_dir: PathBuf::from("out"), ..Config::default() };

        assert_eq!(cfg.output_path(2024), PathBuf::from("out").join("mawsynram-2024.json"));
    }
}
