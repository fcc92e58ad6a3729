use serde::{Deserialize, Serialize};

use crate::surface::Colour;

/// Colours and pen widths used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Screen background, also the shadow ink for on-screen strokes.
    pub background: Colour,
    /// Paper colour for exports, also the shadow ink for printed strokes.
    pub paper: Colour,
    /// Colour of the main stroke.
    pub ink: Colour,
    /// Width of the main stroke in device pixels.
    pub ink_width: u32,
    /// Width of the offset shadow stroke in device pixels.
    pub shadow_width: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            background: Colour::SAND,
            paper: Colour::WHITE,
            ink: Colour::BLACK,
            ink_width: 1,
            shadow_width: 1,
        }
    }
}
