use sand_core::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pacing of the simulation driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Maximum trajectory length; reaching it ends the run.
    pub capacity: usize,
    /// Points advanced per timer tick.
    pub points_per_tick: usize,
    /// Target simulation speed, used to derive the tick interval.
    pub points_per_second: u64,
    /// Publish a step-count status every this many points.
    pub status_every: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            points_per_tick: 250,
            points_per_second: 100_000,
            status_every: 1000,
        }
    }
}

impl DriverConfig {
    /// Timer period in whole milliseconds, never below one.
    pub fn tick_interval(&self) -> Duration {
        let millis = self.points_per_tick as u64 * 1000 / self.points_per_second.max(1);
        Duration::from_millis(millis.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_interval() {
        assert_eq!(DriverConfig::default().tick_interval(), Duration::from_millis(2));
    }

    #[test]
    fn test_interval_never_zero() {
        let config = DriverConfig {
            points_per_tick: 1,
            points_per_second: 1_000_000,
            ..DriverConfig::default()
        };
        assert_eq!(config.tick_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DriverConfig = serde_json::from_str(r#"{ "capacity": 1200 }"#).unwrap();
        assert_eq!(config.capacity, 1200);
        assert_eq!(config.points_per_tick, 250);
    }
}
