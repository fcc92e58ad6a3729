use std::path::PathBuf;

use clap::Parser;
use glam::IVec2;
use sand_core::Point;

/// Command line options for the sand pendulum.
#[derive(Parser, Debug)]
#[command(author, version, about = "Draws the trace of a damped two-axis sand pendulum")]
pub struct CliOptions {
    /// JSON configuration file. Command line options override it.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Surface width in pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Surface height in pixels.
    #[arg(long)]
    pub height: Option<u32>,

    /// Starting point in normalized coordinates, as `x,y`.
    #[arg(long, value_name = "X,Y", value_parser = parse_point, conflicts_with = "click")]
    pub seed: Option<Point>,

    /// Starting point as a surface pixel, as `x,y`.
    #[arg(long, value_name = "X,Y", value_parser = parse_pixel)]
    pub click: Option<IVec2>,

    /// Period ratio, as typed into its entry field (1 to 50).
    #[arg(long, value_name = "TEXT", allow_hyphen_values = true)]
    pub ratio: Option<String>,

    /// Drag, as typed into its entry field (0 to 0.5).
    #[arg(long, value_name = "TEXT", allow_hyphen_values = true)]
    pub drag: Option<String>,

    /// Number of points to draw before stopping.
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Where to save the finished screen image.
    #[arg(short, long, value_name = "PNG", default_value = "sand.png")]
    pub output: PathBuf,

    /// Also print the trajectory to a letter-size page image.
    #[arg(long, value_name = "PNG")]
    pub print: Option<PathBuf>,

    /// Write the effective configuration to FILE and exit.
    #[arg(long, value_name = "FILE")]
    pub write_config: Option<PathBuf>,
}

fn split_pair(text: &str) -> Result<(&str, &str), String> {
    text.split_once(',')
        .map(|(a, b)| (a.trim(), b.trim()))
        .ok_or_else(|| format!("expected `x,y`, got `{text}`"))
}

pub fn parse_point(text: &str) -> Result<Point, String> {
    let (x, y) = split_pair(text)?;
    let x: f64 = x.parse().map_err(|e| format!("bad x `{x}`: {e}"))?;
    let y: f64 = y.parse().map_err(|e| format!("bad y `{y}`: {e}"))?;
    let point = Point::new(x, y);
    if !point.is_finite() {
        return Err(format!("`{text}` is not a finite point"));
    }
    Ok(point)
}

pub fn parse_pixel(text: &str) -> Result<IVec2, String> {
    let (x, y) = split_pair(text)?;
    let x: i32 = x.parse().map_err(|e| format!("bad x `{x}`: {e}"))?;
    let y: i32 = y.parse().map_err(|e| format!("bad y `{y}`: {e}"))?;
    Ok(IVec2::new(x, y))
}
