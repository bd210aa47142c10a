use crate::{
    Config,
    error::FetchError,
    model::{DateRange, RequestSpec},
    source::power::PowerSource,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod power;

/// Something that can answer a daily-data request with a raw body.
#[async_trait]
pub trait ClimateSource: Send + Sync + Debug {
    async fn fetch_daily(&self, spec: &RequestSpec, range: &DateRange) -> Result<String, FetchError>;
}

/// Construct the HTTP-backed source described by `config`.
pub fn source_from_config(config: &Config) -> anyhow::Result<Box<dyn ClimateSource>> {
    let boxed: Box<dyn ClimateSource> = Box::new(PowerSource::new(config)?);
    Ok(boxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_from_default_config_builds() {
        let source = source_from_config(&Config::default());
        assert!(source.is_ok());
    }
}
