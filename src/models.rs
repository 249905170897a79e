use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Logical simulation time. Signed so that invalid negative inputs survive
/// parsing and are rejected by validation instead of wrapping.
pub type Time = i64;

pub const DEFAULT_SNAPSHOT_PERIOD: Time = 500;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SimConfig {
    pub tellers: usize,
    pub arrival: DurationProfile,
    pub service: DurationProfile,
    pub time_limit: Time,
    #[serde(default = "default_snapshot_period")]
    pub snapshot_period: Time,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct DurationProfile {
    pub mean: Time,
    pub variance: Time,
}

impl DurationProfile {
    pub fn new(mean: Time, variance: Time) -> Self {
        Self { mean, variance }
    }

    fn validate(&self, label: &'static str) -> Result<(), ConfigError> {
        if self.variance < 0 {
            return Err(ConfigError::NegativeVariance(label, self.variance));
        }
        if self.mean <= 0 {
            return Err(ConfigError::NonPositiveMean(label, self.mean));
        }
        if self.mean < self.variance {
            return Err(ConfigError::MeanBelowVariance(
                label,
                self.mean,
                self.variance,
            ));
        }
        if self.mean.checked_add(self.variance).is_none() {
            return Err(ConfigError::DurationOverflow(
                label,
                self.mean,
                self.variance,
            ));
        }
        Ok(())
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tellers == 0 {
            return Err(ConfigError::TellersZero);
        }
        self.arrival.validate("arrival")?;
        self.service.validate("service")?;
        if self.snapshot_period <= 0 {
            return Err(ConfigError::NonPositiveSnapshotPeriod(
                self.snapshot_period,
            ));
        }
        if self.time_limit < 0 {
            return Err(ConfigError::NegativeTimeLimit(self.time_limit));
        }
        Ok(())
    }

    pub fn seed_label(&self) -> String {
        match self.seed {
            Some(seed) => seed.to_string(),
            None => "entropy".to_string(),
        }
    }
}

fn default_snapshot_period() -> Time {
    DEFAULT_SNAPSHOT_PERIOD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SimConfig {
        SimConfig {
            tellers: 2,
            arrival: DurationProfile::new(10, 3),
            service: DurationProfile::new(25, 5),
            time_limit: 100,
            snapshot_period: DEFAULT_SNAPSHOT_PERIOD,
            seed: None,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert_eq!(config().validate(), Ok(()));
    }

    #[test]
    fn zero_tellers_rejected() {
        let mut config = config();
        config.tellers = 0;
        assert_eq!(config.validate(), Err(ConfigError::TellersZero));
    }

    #[test]
    fn negative_variance_rejected() {
        let mut config = config();
        config.service.variance = -1;
        let err = config.validate().unwrap_err();
        assert_eq!(err, ConfigError::NegativeVariance("service", -1));
        assert_eq!(
            err.to_string(),
            "service variance must not be negative (got -1)"
        );
    }

    #[test]
    fn mean_below_variance_rejected() {
        let mut config = config();
        config.arrival = DurationProfile::new(2, 5);
        assert_eq!(
            config.validate(),
            Err(ConfigError::MeanBelowVariance("arrival", 2, 5))
        );
    }

    #[test]
    fn duration_range_overflow_rejected() {
        let mut config = config();
        config.arrival = DurationProfile::new(Time::MAX, 1);
        let err = config.validate().unwrap_err();
        assert_eq!(err, ConfigError::DurationOverflow("arrival", Time::MAX, 1));

        config.arrival = DurationProfile::new(Time::MAX, 0);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn zero_snapshot_period_rejected() {
        let mut config = config();
        config.snapshot_period = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveSnapshotPeriod(0))
        );
    }

    #[test]
    fn toml_defaults_snapshot_period_and_seed() {
        let parsed: SimConfig = toml::from_str(
            r#"
tellers = 1
time_limit = 50

[arrival]
mean = 10
variance = 0

[service]
mean = 5
variance = 0
"#,
        )
        .unwrap();
        assert_eq!(parsed.snapshot_period, DEFAULT_SNAPSHOT_PERIOD);
        assert_eq!(parsed.seed, None);
        assert_eq!(parsed.seed_label(), "entropy");
    }
}
