use crate::error::{Result, SweepError};

pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const BYTES_PER_MB: f64 = 1e6;

pub const DEFAULT_MIN_AGE_DAYS: f64 = 365.0;
pub const DEFAULT_LARGE_SIZE_MB: f64 = 100.0;
pub const DEFAULT_LARGE_AGE_DAYS: f64 = 64.0;

/// Deletion thresholds and run mode for a sweep.
///
/// Ages are in seconds and sizes in bytes. With `destroy` unset the sweep is a
/// dry run: decisions and counters are computed but nothing is removed.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdConfig {
    pub min_age_seconds: f64,
    pub large_min_size_bytes: f64,
    pub large_min_age_seconds: f64,
    pub destroy: bool,
    pub verbose: bool,
}

impl ThresholdConfig {
    /// Build a config from user-facing units (days and megabytes).
    pub fn from_days(min_age_days: f64, large_size_mb: f64, large_age_days: f64) -> Result<Self> {
        let config = Self {
            min_age_seconds: min_age_days * SECONDS_PER_DAY,
            large_min_size_bytes: large_size_mb * BYTES_PER_MB,
            large_min_age_seconds: large_age_days * SECONDS_PER_DAY,
            destroy: false,
            verbose: false,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_destroy(mut self, destroy: bool) -> Self {
        self.destroy = destroy;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Reject negative, NaN or infinite thresholds.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("age", self.min_age_seconds),
            ("largesize", self.large_min_size_bytes),
            ("largeage", self.large_min_age_seconds),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(SweepError::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// True when an entry of this age has passed the main staleness threshold.
    pub fn is_stale(&self, age_seconds: f64) -> bool {
        age_seconds > self.min_age_seconds
    }

    /// True when a file is both over the size threshold and older than the large-file age.
    pub fn is_large_and_aging(&self, size_bytes: u64, age_seconds: f64) -> bool {
        size_bytes as f64 > self.large_min_size_bytes && age_seconds > self.large_min_age_seconds
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            min_age_seconds: DEFAULT_MIN_AGE_DAYS * SECONDS_PER_DAY,
            large_min_size_bytes: DEFAULT_LARGE_SIZE_MB * BYTES_PER_MB,
            large_min_age_seconds: DEFAULT_LARGE_AGE_DAYS * SECONDS_PER_DAY,
            destroy: false,
            verbose: false,
        }
    }
}
