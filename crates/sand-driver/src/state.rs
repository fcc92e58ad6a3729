/// Lifecycle of the periodic driver.
///
/// ```text
/// Idle --tick--> Running --burst ends--> Idle
/// Running --tick--> LateCatchup --burst ends--> Running (next burst at once)
/// Running --capacity--> Done
/// any --teardown--> Dead
/// any --seed--> Idle (timer restarted)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    /// Waiting for the next tick (or for a first seed).
    #[default]
    Idle,
    /// Inside a burst.
    Running,
    /// A tick arrived during the current burst; another burst follows.
    LateCatchup,
    /// The trajectory is full.
    Done,
    /// The owning surface is gone.
    Dead,
}

impl DriverState {
    pub fn is_busy(&self) -> bool {
        matches!(self, DriverState::Running | DriverState::LateCatchup)
    }
}
