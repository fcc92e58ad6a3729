pub mod error;
pub mod point;
pub mod trajectory;
pub mod integrator;
pub mod parameter;

pub use error::{Error, Result};
pub use point::Point;
pub use trajectory::{Trajectory, DEFAULT_CAPACITY};
pub use integrator::{advance, step};
pub use parameter::{
    ParameterControls, ParameterKind, SimulationParameters, Slider, SliderAction, SLIDER_RANGE,
};
