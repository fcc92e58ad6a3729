//! Print-style export of the whole trajectory to a PNG page.

use glam::UVec2;
use sand_core::Trajectory;
use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;

use crate::raster::RasterSurface;
use crate::renderer::{IncrementalRenderer, InkMode, Target};

/// Where and how large to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub output_path: PathBuf,
    /// Page size in device pixels.
    pub width: u32,
    pub height: u32,
}

impl ExportConfig {
    /// Page of `inches` at `dpi` dots per inch.
    pub fn for_page(output_path: impl Into<PathBuf>, inches: (f64, f64), dpi: u32) -> Self {
        Self {
            output_path: output_path.into(),
            width: (inches.0 * f64::from(dpi)).round() as u32,
            height: (inches.1 * f64::from(dpi)).round() as u32,
        }
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }
}

/// What a finished export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub output_path: PathBuf,
    pub segments: usize,
}

/// Failures while printing. None of these touch the trajectory.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The page has no drawable area.
    #[error("page is empty ({width}x{height})")]
    EmptyPage { width: u32, height: u32 },

    /// Nothing to print yet.
    #[error("no trajectory to print")]
    NoTrajectory,

    /// The finished page could not be written.
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl ExportError {
    /// Numeric code shown next to the description in error reports.
    pub fn code(&self) -> i32 {
        match self {
            ExportError::EmptyPage { .. } => 1,
            ExportError::NoTrajectory => 2,
            ExportError::Write { source, .. } => match source {
                image::ImageError::IoError(e) => e.raw_os_error().unwrap_or(3),
                _ => 3,
            },
        }
    }
}

/// Paint the whole trajectory on a fresh page and save it as PNG.
///
/// The renderer's print mapping is resized to the page first.
pub fn export_history(
    renderer: &mut IncrementalRenderer,
    trajectory: &Trajectory,
    config: &ExportConfig,
) -> Result<ExportReport, ExportError> {
    if trajectory.is_empty() {
        return Err(ExportError::NoTrajectory);
    }
    let size = config.size();
    if size.x == 0 || size.y == 0 {
        return Err(ExportError::EmptyPage {
            width: size.x,
            height: size.y,
        });
    }

    let started = Instant::now();
    renderer.set_page_size(size);
    let mut page = RasterSurface::new(size, renderer.settings().paper);
    let segments = renderer.paint_full_history(&mut page, trajectory, Target::Print, InkMode::Paper);

    page.save_png(&config.output_path).map_err(|source| ExportError::Write {
        path: config.output_path.clone(),
        source,
    })?;

    log::info!(
        "Printed {} segments to {:?} in {:?}",
        segments,
        config.output_path,
        started.elapsed()
    );
    Ok(ExportReport {
        output_path: config.output_path.clone(),
        segments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::RenderSettings;
    use sand_core::{advance, Point, SimulationParameters};

    fn renderer() -> IncrementalRenderer {
        IncrementalRenderer::new(RenderSettings::default())
    }

    fn trajectory(steps: usize) -> Trajectory {
        let mut t = Trajectory::new(steps + 1);
        t.reset(Point::new(0.5, 0.2));
        let params = SimulationParameters::default();
        for _ in 0..steps {
            advance(&mut t, &params).unwrap();
        }
        t
    }

    #[test]
    fn test_page_from_inches() {
        let c = ExportConfig::for_page("out.png", (8.5, 11.0), 300);
        assert_eq!(c.size(), UVec2::new(2550, 3300));
    }

    #[test]
    fn test_export_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.png");
        let config = ExportConfig {
            output_path: path.clone(),
            width: 300,
            height: 200,
        };
        let report = export_history(&mut renderer(), &trajectory(500), &config).unwrap();
        assert_eq!(report.segments, 500);
        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (300, 200));
        assert!(img.pixels().any(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn test_export_to_missing_directory_fails_with_code() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig {
            output_path: dir.path().join("missing").join("page.png"),
            width: 50,
            height: 50,
        };
        let err = export_history(&mut renderer(), &trajectory(10), &config).unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }));
        assert!(err.code() != 0);
        assert!(err.to_string().contains("failed to write"));
    }

    #[test]
    fn test_export_rejects_empty_page_and_trajectory() {
        let config = ExportConfig {
            output_path: PathBuf::from("unused.png"),
            width: 0,
            height: 10,
        };
        let err = export_history(&mut renderer(), &trajectory(3), &config).unwrap_err();
        assert_eq!(err.code(), 1);
        let err = export_history(&mut renderer(), &Trajectory::new(4), &config).unwrap_err();
        assert_eq!(err.code(), 2);
    }
}
