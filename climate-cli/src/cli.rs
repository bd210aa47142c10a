use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use climate_core::{
    Config, DateRange, Fetcher, WeeklyClimate, YearOutcome, source::power::request_url,
    summarize, summary::load_season,
};
use std::{path::PathBuf, time::Duration};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "climate", version, about = "Seasonal NASA POWER climate fetcher")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Overrides shared by the subcommands that touch the output directory.
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Directory holding `<location>-<year>.json` files.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download June 1st - Sept 30th daily data for each year and save it.
    Fetch {
        /// Year to fetch; repeat for several. Defaults to 2024, 2023, 2022.
        #[arg(long = "year")]
        years: Vec<i32>,

        #[command(flatten)]
        output: OutputArgs,

        /// Pause between requests in milliseconds.
        #[arg(long)]
        pause_ms: Option<u64>,
    },

    /// Print the request that would be sent for each year, without sending it.
    Plan {
        #[arg(long = "year")]
        years: Vec<i32>,
    },

    /// Print weekly averages from a previously saved year.
    Summarize {
        #[arg(long)]
        year: i32,

        #[command(flatten)]
        output: OutputArgs,
    },
}

impl Command {
    /// Built-in configuration with this command's overrides applied.
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = Config::default();

        match self {
            Command::Fetch { years, output, pause_ms } => {
                config.override_years(years.clone());
                if let Some(dir) = &output.output_dir {
                    config.output_dir = dir.clone();
                }
                if let Some(ms) = pause_ms {
                    config.pause = Duration::from_millis(*ms);
                }
            }
            Command::Plan { years } => config.override_years(years.clone()),
            Command::Summarize { year, output } => {
                config.years = vec![*year];
                if let Some(dir) = &output.output_dir {
                    config.output_dir = dir.clone();
                }
            }
        }

        config.validate()?;
        Ok(config)
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = self.command.config()?;

        match self.command {
            Command::Fetch { .. } => {
                let fetcher = Fetcher::from_config(config)?;
                let reports = fetcher.run_configured().await?;

                let saved = reports.iter().filter(|r| r.is_saved()).count();
                println!("\nDone: {saved} saved, {} failed.", reports.len() - saved);
                for report in reports.iter().filter(|r| !r.is_saved()) {
                    if let YearOutcome::Failed(err) = &report.outcome {
                        println!("  {}: {err}", report.year);
                    }
                }
            }
            Command::Plan { .. } => {
                let spec = config.request_spec();
                for &year in &config.years {
                    let range = DateRange::season(year)?;
                    let url = request_url(&config.base_url, &spec, &range)?;
                    println!(
                        "{year}: {} -> {}\n  GET {url}\n  -> {}",
                        range.start_param(),
                        range.end_param(),
                        config.output_path(year).display()
                    );
                }
            }
            Command::Summarize { year, .. } => {
                let path = config.output_path(year);
                let doc = load_season(&path)?;
                let weeks = summarize(&doc)
                    .with_context(|| format!("Cannot summarize {}", path.display()))?;

                println!("{} {year} (June 1st - Sept 30th)", config.location.name);
                println!("{}", format_header());
                for week in &weeks {
                    println!("{}", format_week(week));
                }
            }
        }

        Ok(())
    }
}

fn format_header() -> String {
    format!(
        "{:>4}  {:>4}  {:>13}  {:>8}  {:>12}  {:>15}",
        "week", "days", "rain (mm/day)", "temp (C)", "soil moist %", "irr (MJ/m2/day)"
    )
}

fn format_week(week: &WeeklyClimate) -> String {
    match &week.averages {
        Some(avg) => format!(
            "{:>4}  {:>4}  {:>13.1}  {:>8.1}  {:>12.0}  {:>15.1}",
            week.week,
            week.valid_days,
            avg.rainfall_mm,
            avg.temperature_c,
            avg.soil_moisture_pct,
            avg.irradiance_mj_m2
        ),
        None => format!("{:>4}  {:>4}  no data", week.week, week.valid_days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use climate_core::summary::WeeklyAverages;

    #[test]
    fn fetch_without_flags_uses_defaults() {
        let cli = Cli::try_parse_from(["climate", "fetch"]).unwrap();
        let cfg = cli.command.config().unwrap();

        assert_eq!(cfg.years, vec![2024, 2023, 2022]);
        assert_eq!(cfg.output_dir, PathBuf::from("src/data"));
        assert_eq!(cfg.pause, Duration::from_secs(1));
    }

    #[test]
    fn fetch_flags_override_config() {
        let cli = Cli::try_parse_from([
            "climate", "fetch", "--year", "2020", "--year", "2019", "--output-dir", "out",
            "--pause-ms", "250",
        ])
        .unwrap();
        let cfg = cli.command.config().unwrap();

        assert_eq!(cfg.years, vec![2020, 2019]);
        assert_eq!(cfg.output_dir, PathBuf::from("out"));
        assert_eq!(cfg.pause, Duration::from_millis(250));
    }

    #[test]
    fn invalid_year_is_rejected() {
        let cli = Cli::try_parse_from(["climate", "plan", "--year", "0"]).unwrap();
        let err = cli.command.config().unwrap_err();

        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn summarize_requires_year() {
        assert!(Cli::try_parse_from(["climate", "summarize"]).is_err());
    }

    #[test]
    fn formats_weeks_with_and_without_data() {
        let full = WeeklyClimate {
            week: 3,
            valid_days: 7,
            averages: Some(WeeklyAverages {
                temperature_c: 21.04,
                rainfall_mm: 96.26,
                soil_moisture_pct: 88.6,
                irradiance_mj_m2: 12.34,
            }),
        };
        let empty = WeeklyClimate { week: 4, valid_days: 0, averages: None };

        assert_eq!(format_week(&full), "   3     7           96.3      21.0            89             12.3");
        assert_eq!(format_week(&empty), "   4     0  no data");
    }
}
