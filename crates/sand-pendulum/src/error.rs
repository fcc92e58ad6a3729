use std::io;
use std::path::PathBuf;

use glam::IVec2;
use sand_render::ExportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("cannot read config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("click at {pixel} is outside the {width}x{height} surface")]
    ClickOutside { pixel: IVec2, width: u32, height: u32 },

    #[error(transparent)]
    Parameter(#[from] sand_core::Error),

    #[error("cannot start the driver thread: {0}")]
    Spawn(#[source] io::Error),

    #[error("driver stopped before finishing")]
    DriverStopped,

    #[error("print failed (error {code}): {0}", code = .0.code())]
    Export(#[source] ExportError),

    #[error("failed to save {path:?}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl AppError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config { .. }
            | AppError::InvalidConfig { .. }
            | AppError::ClickOutside { .. }
            | AppError::Parameter(_) => 2,
            _ => 1,
        }
    }
}
