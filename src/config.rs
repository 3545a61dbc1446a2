// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::vcd::Timestamp;

/// One clock cycle of the reference simulation, in dump time units.
pub const DEFAULT_TICK_WIDTH: Timestamp = 50_000;
pub const DEFAULT_REPORT_INTERVAL: Timestamp = 1_000_000_000_000;
pub const DEFAULT_REPORT_UNIT: &str = "ms";

/// Progress messages while the body is read. Purely cosmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressConfig {
    /// dump time units between two messages, 0 disables them
    pub interval: Timestamp,
    /// label printed after `time / interval`
    pub unit: String,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        ProgressConfig {
            interval: DEFAULT_REPORT_INTERVAL,
            unit: DEFAULT_REPORT_UNIT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// first sample time
    pub start_time: Timestamp,
    /// distance between two samples
    pub tick_width: Timestamp,
    pub report: ProgressConfig,
    /// where the `{signal}_proc.dat` files go
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            start_time: 0,
            tick_width: DEFAULT_TICK_WIDTH,
            report: ProgressConfig::default(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.tick_width == 0 {
            return Err(Error::InvalidConfig(
                "tick width must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.start_time, 0);
        assert_eq!(config.tick_width, 50_000);
        assert_eq!(config.report.unit, "ms");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_tick_width_is_rejected() {
        let config = Config {
            tick_width: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }
}
