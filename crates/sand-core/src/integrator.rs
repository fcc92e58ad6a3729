//! The pendulum's rule of motion.
//!
//! Along each axis the bob is pulled toward the centre in proportion to its
//! distance, with a strength chosen to give that axis its period, and the
//! resulting velocity is scaled down by the drag. The axes never interact;
//! the pattern comes from their periods being slightly mismatched.

use crate::error::Result;
use crate::parameter::SimulationParameters;
use crate::point::Point;
use crate::trajectory::Trajectory;

/// Compute the next position from the last two points of `trajectory`.
///
/// The trajectory must have been seeded. Calling this on an empty store
/// is a bug in the caller and panics.
pub fn step(trajectory: &Trajectory, params: &SimulationParameters) -> Point {
    let Some((previous, current)) = trajectory.tail() else {
        panic!("pendulum step requires a seeded trajectory");
    };
    debug_assert!(!trajectory.is_full(), "pendulum step on a full trajectory");

    let (xf, yf) = params.axis_factors();
    let ax = (current.x - previous.x) - current.x / (xf * xf);
    let ay = (current.y - previous.y) - current.y / (yf * yf);
    let damping = params.damping();

    Point::new(current.x + ax * damping, current.y + ay * damping)
}

/// Step and append in one go, returning the new point's index.
pub fn advance(trajectory: &mut Trajectory, params: &SimulationParameters) -> Result<usize> {
    let next = step(trajectory, params);
    trajectory.append(next)
}
