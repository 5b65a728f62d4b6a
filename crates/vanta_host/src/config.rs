//! Runtime configuration.

use crate::error::HostError;

/// Environment variable overriding [`TickConfig::tick_rate`].
pub const TICK_RATE_ENV: &str = "VANTA_TICK_RATE";

/// Environment variable overriding [`TickConfig::max_ticks`].
pub const MAX_TICKS_ENV: &str = "VANTA_MAX_TICKS";

/// Configuration for the script runtime's frame loop.
#[derive(Debug, Clone, PartialEq)]
pub struct TickConfig {
    /// Target ticks per second.
    pub tick_rate: f64,
    /// Maximum number of ticks to run (0 = unlimited).
    pub max_ticks: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_ticks: 0,
        }
    }
}

impl TickConfig {
    /// Defaults, overridden by `VANTA_TICK_RATE` and `VANTA_MAX_TICKS` when set.
    pub fn from_env() -> Result<Self, HostError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HostError> {
        let mut config = Self::default();

        if let Some(value) = lookup(TICK_RATE_ENV) {
            config.tick_rate = value
                .trim()
                .parse()
                .map_err(|_| HostError::InvalidEnv {
                    var: TICK_RATE_ENV,
                    value: value.clone(),
                })?;
        }
        if let Some(value) = lookup(MAX_TICKS_ENV) {
            config.max_ticks = value
                .trim()
                .parse()
                .map_err(|_| HostError::InvalidEnv {
                    var: MAX_TICKS_ENV,
                    value: value.clone(),
                })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject tick rates that are not finite and positive.
    pub fn validate(&self) -> Result<(), HostError> {
        if self.tick_rate.is_finite() && self.tick_rate > 0.0 {
            Ok(())
        } else {
            Err(HostError::InvalidTickRate(self.tick_rate))
        }
    }

    /// Seconds per tick.
    #[must_use]
    pub fn tick_seconds(&self) -> f64 {
        1.0 / self.tick_rate
    }
}
