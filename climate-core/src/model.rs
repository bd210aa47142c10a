use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use std::path::PathBuf;

use crate::error::FetchError;

/// A named point on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn file_name(&self, year: i32) -> String {
        format!("{}-{}.json", self.name, year)
    }
}

/// Inclusive date range sent as `start`/`end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// June 1st through September 30th of `year`.
    pub fn season(year: i32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, 6, 1);
        let end = NaiveDate::from_ymd_opt(year, 9, 30);

        match (start, end) {
            (Some(start), Some(end)) => Ok(Self { start, end }),
            _ => Err(anyhow!("Year {year} cannot be represented as a calendar date")),
        }
    }

    pub fn start_param(&self) -> String {
        self.start.format("%Y%m%d").to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format("%Y%m%d").to_string()
    }
}

/// Query parameters common to every request of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub location: Location,
    pub community: String,
    pub parameters: Vec<String>,
    pub format: String,
}

impl RequestSpec {
    /// Common parameters merged with `range`, in wire order.
    pub fn query(&self, range: &DateRange) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", self.location.latitude.to_string()),
            ("longitude", self.location.longitude.to_string()),
            ("community", self.community.clone()),
            ("parameters", self.parameters.join(",")),
            ("format", self.format.clone()),
            ("start", range.start_param()),
            ("end", range.end_param()),
        ]
    }
}

/// What happened to a single year.
#[derive(Debug)]
pub enum YearOutcome {
    Saved(PathBuf),
    Failed(FetchError),
}

#[derive(Debug)]
pub struct YearReport {
    pub year: i32,
    pub outcome: YearOutcome,
}

impl YearReport {
    pub fn is_saved(&self) -> bool {
        matches!(self.outcome, YearOutcome::Saved(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn season_is_june_first_to_september_thirtieth() {
        for year in [1981, 2000, 2022, 2023, 2024] {
            let range = DateRange::season(year).expect("valid year");

            assert_eq!(range.start_param(), format!("{year}0601"));
            assert_eq!(range.end_param(), format!("{year}0930"));
        }
    }

    #[test]
    fn season_rejects_unrepresentable_year() {
        assert!(DateRange::season(i32::MAX).is_err());
    }

    #[test]
    fn query_merges_common_params_with_dates() {
        let spec = Config::default().request_spec();
        let range = DateRange::season(2024).unwrap();

        let query = spec.query(&range);

        assert_eq!(
            query,
            vec![
                ("latitude", "25.297".to_string()),
                ("longitude", "91.5822".to_string()),
                ("community", "RE".to_string()),
                ("parameters", "T2M,PRECTOTCORR,GWETPROF,ALLSKY_SFC_SW_DWN".to_string()),
                ("format", "JSON".to_string()),
                ("start", "20240601".to_string()),
                ("end", "20240930".to_string()),
            ]
        );
    }

    #[test]
    fn file_name_uses_location_and_year() {
        let loc = Location { name: "mawsynram", latitude: 25.2970, longitude: 91.5822 };
        assert_eq!(loc.file_name(2024), "mawsynram-2024.json");
    }
}
