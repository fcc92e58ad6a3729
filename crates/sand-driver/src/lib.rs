pub mod config;
pub mod status;
pub mod state;
pub mod command;
pub mod timer;
pub mod driver;
pub mod runner;

pub use command::{DriverEvent, SimCommand};
pub use config::DriverConfig;
pub use driver::PendulumDriver;
pub use runner::DriverThread;
pub use state::DriverState;
pub use status::{Status, APP_NAME};
pub use timer::{ManualTimer, TickTimer, TimerService};
