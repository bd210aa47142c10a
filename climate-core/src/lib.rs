//! Core library for the `climate` CLI.
//!
//! This crate defines:
//! - Built-in run configuration (location, years, variables, output dir)
//! - The NASA POWER daily point source behind the `ClimateSource` trait
//! - The sequential per-year `Fetcher` and its per-year outcomes
//! - Weekly summaries over saved seasons
//!
//! It is used by `climate-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod source;
pub mod summary;

pub use config::Config;
pub use error::{FetchError, SummaryError};
pub use fetcher::Fetcher;
pub use model::{DateRange, Location, RequestSpec, YearOutcome, YearReport};
pub use source::{ClimateSource, power::PowerSource};
pub use summary::{WeeklyClimate, summarize};
