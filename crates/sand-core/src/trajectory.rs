use std::ops::Index;

use crate::error::{Error, Result};
use crate::point::Point;

/// Maximum number of points a trajectory holds unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 50_000;

/// Bounded, append-only history of pendulum positions.
///
/// Index 0 is the seed chosen by the user. After that the only mutation is
/// `append` until the store is full, at which point it is frozen until the
/// next `reset`.
#[derive(Debug, Clone)]
pub struct Trajectory {
    points: Vec<Point>,
    capacity: usize,
}

impl Trajectory {
    /// Create an empty store. A capacity of zero is raised to one so that a
    /// seed always fits. At most `DEFAULT_CAPACITY` points are reserved up
    /// front; larger stores grow as they fill.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: Vec::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity,
        }
    }

    /// Discard the history and start over from `seed` at index 0.
    pub fn reset(&mut self, seed: Point) {
        self.points.clear();
        self.points.push(seed);
    }

    /// Append a point, returning its index.
    pub fn append(&mut self, point: Point) -> Result<usize> {
        if self.is_full() {
            return Err(Error::CapacityExceeded { capacity: self.capacity });
        }
        self.points.push(point);
        Ok(self.points.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.points.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn at(&self, index: usize) -> Result<Point> {
        self.points.get(index).copied().ok_or(Error::IndexOutOfRange {
            index,
            len: self.points.len(),
        })
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// The last point and the one before it. With a single point both are
    /// the seed, which gives the pendulum zero initial velocity.
    pub fn tail(&self) -> Option<(Point, Point)> {
        let current = self.last()?;
        let previous = match self.points.len() {
            1 => current,
            n => self.points[n - 2],
        };
        Some((previous, current))
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The segment ending at `index`, i.e. points `index - 1` and `index`.
    pub fn segment(&self, index: usize) -> Option<(Point, Point)> {
        if index == 0 || index >= self.points.len() {
            return None;
        }
        Some((self.points[index - 1], self.points[index]))
    }
}

impl Default for Trajectory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Index<usize> for Trajectory {
    type Output = Point;
    fn index(&self, index: usize) -> &Point {
        match self.points.get(index) {
            Some(p) => p,
            None => panic!(
                "trajectory index out of bounds: {index}, length is {}",
                self.points.len()
            ),
        }
    }
}
