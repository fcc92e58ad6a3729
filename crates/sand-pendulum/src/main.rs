//! # Sand Pendulum
//!
//! Runs the pendulum to completion on an offscreen surface and saves the
//! drawing.
//!
//! ```bash
//! sand-pendulum --seed 0.6,0.45 -o sand.png
//! sand-pendulum --ratio 1.5 --drag 0.02 --print page.png
//! RUST_LOG=debug sand-pendulum --config sand.json
//! ```

mod cli;
mod config;
mod error;

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use crossbeam::channel::{unbounded, Receiver};
use glam::UVec2;
use sand_core::{ParameterKind, Point};
use sand_driver::{DriverEvent, DriverThread, PendulumDriver, SimCommand, Status, TickTimer};
use sand_render::{ExportConfig, RasterSurface, ViewportMapping};
use tracing_subscriber::EnvFilter;

use crate::cli::CliOptions;
use crate::config::{load_config, save_config, AppConfig};
use crate::error::AppError;

const DEFAULT_SEED: Point = Point { x: 0.6, y: 0.45 };
const LETTER_INCHES: (f64, f64) = (8.5, 11.0);

fn main() -> ExitCode {
    init_logging();
    let cli = CliOptions::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn effective_config(cli: &CliOptions) -> Result<AppConfig, AppError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path).map_err(|source| AppError::Config {
            path: path.clone(),
            source,
        })?,
        None => AppConfig::default(),
    };

    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if let Some(capacity) = cli.capacity {
        config.driver.capacity = capacity;
    }
    if let Some(text) = &cli.ratio {
        config.parameters.period_ratio = ParameterKind::PeriodRatio.parse(text)?;
    }
    if let Some(text) = &cli.drag {
        config.parameters.drag = ParameterKind::Drag.parse(text)?;
    }
    config.validate()?;
    Ok(config)
}

/// The command that starts the run. A click has to land on the drawing.
fn start_command(cli: &CliOptions, config: &AppConfig) -> Result<SimCommand, AppError> {
    let Some(pixel) = cli.click else {
        return Ok(SimCommand::Seed(cli.seed.unwrap_or(DEFAULT_SEED)));
    };
    let size = UVec2::new(config.width, config.height);
    let inside = pixel.x >= 0
        && pixel.y >= 0
        && (pixel.x as u32) < size.x
        && (pixel.y as u32) < size.y;
    let mapped = ViewportMapping::for_client(size).to_normalized(pixel).is_some();
    if !(inside && mapped) {
        return Err(AppError::ClickOutside {
            pixel,
            width: size.x,
            height: size.y,
        });
    }
    Ok(SimCommand::Click(pixel))
}

fn run(cli: CliOptions) -> Result<(), AppError> {
    let config = effective_config(&cli)?;
    let start = start_command(&cli, &config)?;
    if let Some(path) = &cli.write_config {
        save_config(path, &config).map_err(|source| AppError::Config {
            path: path.clone(),
            source,
        })?;
        log::info!("Wrote configuration to {path:?}");
        return Ok(());
    }

    let (commands_tx, commands_rx) = unbounded();
    let (events_tx, events_rx) = unbounded();
    let surface = RasterSurface::new(UVec2::new(config.width, config.height), config.render.background);
    let driver = PendulumDriver::new(surface, TickTimer::new(), commands_rx, config.driver)
        .with_parameters(config.parameters)
        .with_render_settings(config.render)
        .with_events(events_tx);
    let mut thread = DriverThread::spawn(driver, commands_tx).map_err(AppError::Spawn)?;

    let started = Instant::now();
    thread.send(start);
    wait_for_done(&events_rx)?;
    let elapsed = started.elapsed();

    if let Some(path) = &cli.print {
        let page = ExportConfig::for_page(path.clone(), LETTER_INCHES, config.print_dpi);
        thread.send(SimCommand::Export(page));
        wait_for_export(&events_rx)?;
    }

    let driver = thread.stop().ok_or(AppError::DriverStopped)?;
    log::info!("Drew {} points in {elapsed:?}", driver.trajectory().len());
    driver
        .surface()
        .save_png(&cli.output)
        .map_err(|source| AppError::Save {
            path: cli.output.clone(),
            source,
        })?;
    log::info!("Saved {:?}", cli.output);
    Ok(())
}

fn wait_for_done(events: &Receiver<DriverEvent>) -> Result<(), AppError> {
    for event in events.iter() {
        match event {
            DriverEvent::Status(Status::Done) => return Ok(()),
            DriverEvent::Status(status) => log::debug!("{status}"),
            DriverEvent::InvalidInput { kind, input } => {
                log::warn!("rejected {kind} input {input:?}");
            }
            other => log::debug!("{other:?}"),
        }
    }
    Err(AppError::DriverStopped)
}

fn wait_for_export(events: &Receiver<DriverEvent>) -> Result<(), AppError> {
    for event in events.iter() {
        if let DriverEvent::ExportFinished(result) = event {
            let path = result.map_err(AppError::Export)?;
            log::info!("Printed to {path:?}");
            return Ok(());
        }
    }
    Err(AppError::DriverStopped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(args: &[&str]) -> CliOptions {
        let mut argv = vec!["sand-pendulum"];
        argv.extend_from_slice(args);
        CliOptions::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_default_start_is_a_seed() {
        let cli = options(&[]);
        let config = effective_config(&cli).unwrap();
        assert!(matches!(
            start_command(&cli, &config).unwrap(),
            SimCommand::Seed(p) if p == DEFAULT_SEED
        ));
    }

    #[test]
    fn test_click_inside_surface_is_kept() {
        let cli = options(&["--click", "10,20", "--width", "100", "--height", "50"]);
        let config = effective_config(&cli).unwrap();
        assert!(matches!(
            start_command(&cli, &config).unwrap(),
            SimCommand::Click(p) if p == glam::IVec2::new(10, 20)
        ));
    }

    #[test]
    fn test_click_outside_surface_is_an_error() {
        let cli = options(&["--click", "5000,5000", "--capacity", "10"]);
        let config = effective_config(&cli).unwrap();
        let err = start_command(&cli, &config).unwrap_err();
        assert!(matches!(err, AppError::ClickOutside { .. }));
        assert_eq!(err.exit_code(), 2);

        // A one-pixel-wide surface has no drawing radius.
        let cli = options(&["--click", "0,0", "--width", "1"]);
        let config = effective_config(&cli).unwrap();
        assert!(matches!(
            start_command(&cli, &config),
            Err(AppError::ClickOutside { .. })
        ));
    }

    #[test]
    fn test_run_with_bad_click_returns_instead_of_waiting() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.png");
        let cli = options(&[
            "--click",
            "5000,5000",
            "--capacity",
            "10",
            "-o",
            output.to_str().unwrap(),
        ]);
        assert!(matches!(run(cli), Err(AppError::ClickOutside { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn test_cli_capacity_is_validated() {
        let cli = options(&["--capacity", "18446744073709551615"]);
        assert!(matches!(
            effective_config(&cli),
            Err(AppError::InvalidConfig { field: "driver.capacity", .. })
        ));
    }

    #[test]
    fn test_short_run_saves_image() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.png");
        let cli = options(&[
            "--capacity",
            "600",
            "--width",
            "120",
            "--height",
            "90",
            "-o",
            output.to_str().unwrap(),
        ]);
        run(cli).unwrap();
        assert!(output.exists());
    }
}
