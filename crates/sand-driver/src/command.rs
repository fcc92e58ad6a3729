use glam::{IVec2, UVec2};
use sand_core::{ParameterKind, Point, SliderAction};
use sand_render::{ExportConfig, ExportError};
use std::path::PathBuf;

use crate::status::Status;

/// Requests from the host, delivered to the driver over a channel.
#[derive(Debug, Clone)]
pub enum SimCommand {
    /// Pointer press at a surface pixel; starts a new trajectory there.
    Click(IVec2),
    /// Start a new trajectory at a normalized point.
    Seed(Point),
    /// The surface's client area changed size.
    Resize(UVec2),
    /// A parameter slider moved.
    Slider {
        kind: ParameterKind,
        action: SliderAction,
    },
    /// Text was typed into a parameter field.
    EnterText { kind: ParameterKind, text: String },
    /// Print the whole trajectory to a page image.
    Export(ExportConfig),
    /// The surface is being destroyed.
    Teardown,
}

/// Notifications from the driver back to the host.
#[derive(Debug)]
pub enum DriverEvent {
    Status(Status),
    /// A parameter changed; `text` and `position` are what the field and
    /// slider should now show.
    Parameter {
        kind: ParameterKind,
        value: f64,
        position: i32,
        text: String,
    },
    /// Typed text was rejected. The host should beep.
    InvalidInput { kind: ParameterKind, input: String },
    ExportFinished(Result<PathBuf, ExportError>),
}
