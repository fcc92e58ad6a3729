pub mod surface;
pub mod viewport;
pub mod settings;
pub mod renderer;
pub mod raster;
pub mod export;

pub use export::{export_history, ExportConfig, ExportError, ExportReport};
pub use raster::RasterSurface;
pub use renderer::{IncrementalRenderer, InkMode, Target};
pub use settings::RenderSettings;
pub use surface::{Colour, DrawSurface, Pen};
pub use viewport::ViewportMapping;
