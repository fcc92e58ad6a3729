use sand_core::{Error, ParameterKind, SimulationParameters};
use sand_driver::DriverConfig;
use sand_render::RenderSettings;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

use crate::error::AppError;

/// Everything a run needs, as stored in a JSON config file.
///
/// Missing fields fall back to their defaults, so a file only has to name
/// what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Drawing surface size in pixels.
    pub width: u32,
    pub height: u32,
    pub parameters: SimulationParameters,
    pub driver: DriverConfig,
    pub render: RenderSettings,
    /// Dots per inch for `--print` pages.
    pub print_dpi: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            parameters: SimulationParameters::default(),
            driver: DriverConfig::default(),
            render: RenderSettings::default(),
            print_dpi: 150,
        }
    }
}

/// Largest trajectory a config may ask for.
pub const MAX_CAPACITY: usize = 5_000_000;

impl AppConfig {
    /// Reject values the entry fields would not accept, and pacing or
    /// physics settings the driver cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        for kind in ParameterKind::ALL {
            let value = match kind {
                ParameterKind::PeriodRatio => self.parameters.period_ratio,
                ParameterKind::Drag => self.parameters.drag,
            };
            let (min, max) = kind.range();
            if !(min..=max).contains(&value) {
                return Err(Error::InvalidParameterInput {
                    kind,
                    input: value.to_string(),
                }
                .into());
            }
        }
        let period_x = self.parameters.period_x;
        if !(period_x.is_finite() && period_x > 0.0) {
            return Err(invalid("parameters.period_x", format!("{period_x} is not a positive period")));
        }
        if self.driver.points_per_tick == 0 {
            return Err(invalid("driver.points_per_tick", "must be at least 1".to_string()));
        }
        if self.driver.capacity > MAX_CAPACITY {
            return Err(invalid(
                "driver.capacity",
                format!("{} exceeds the limit of {MAX_CAPACITY}", self.driver.capacity),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> AppError {
    AppError::InvalidConfig { field, reason }
}

/// Save a config file to disk as JSON.
pub fn save_config(path: &Path, config: &AppConfig) -> io::Result<()> {
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, json)
}

/// Load a config file from disk.
pub fn load_config(path: &Path) -> io::Result<AppConfig> {
    let json = std::fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sand.json");
        let mut config = AppConfig::default();
        config.parameters.drag = 0.02;
        config.driver.capacity = 8000;
        save_config(&path, &config).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{ "width": 320, "parameters": { "period_ratio": 1.5 } }"#).unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.width, 320);
        assert_eq!(config.height, 600);
        assert_eq!(config.parameters.period_ratio, 1.5);
        assert_eq!(config.parameters.drag, SimulationParameters::default().drag);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());
        config.parameters.drag = 0.75;
        assert!(matches!(
            config.validate(),
            Err(AppError::Parameter(Error::InvalidParameterInput {
                kind: ParameterKind::Drag,
                ..
            }))
        ));
    }

    #[test]
    fn test_validate_rejects_unrunnable_settings() {
        let mut config = AppConfig::default();
        config.driver.points_per_tick = 0;
        assert!(matches!(
            config.validate(),
            Err(AppError::InvalidConfig { field: "driver.points_per_tick", .. })
        ));

        let mut config = AppConfig::default();
        config.parameters.period_x = 0.0;
        assert!(matches!(
            config.validate(),
            Err(AppError::InvalidConfig { field: "parameters.period_x", .. })
        ));
        config.parameters.period_x = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.driver.capacity = usize::MAX;
        assert!(matches!(
            config.validate(),
            Err(AppError::InvalidConfig { field: "driver.capacity", .. })
        ));
        config.driver.capacity = MAX_CAPACITY;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_json_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ width: ").unwrap();
        let err = load_config(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
