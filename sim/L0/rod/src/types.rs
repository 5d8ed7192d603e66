//! Core types for rod kinematic state.

use nalgebra::{Matrix3, Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, RodError};

/// Kinematic state of a discretized Cosserat rod.
///
/// Every array is indexed by node and has the same length `N >= 1`.
/// Node 0 is the start of the rod and node `N - 1` the end.
///
/// Each director matrix stores the material frame row-wise: row `i` is the
/// director `d_i` expressed in the lab frame.
///
/// The fields are public so an integrator can update them in place between
/// boundary condition calls. Code that changes the lengths is responsible for
/// keeping them equal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RodState {
    /// Node positions in the lab frame.
    pub position: Vec<Point3<f64>>,
    /// Material frames (directors stored as rows).
    pub directors: Vec<Matrix3<f64>>,
    /// Node linear velocities.
    pub velocity: Vec<Vector3<f64>>,
    /// Angular velocities.
    pub omega: Vec<Vector3<f64>>,
}

impl RodState {
    /// Assemble a rod state from its four arrays.
    ///
    /// # Errors
    ///
    /// Returns [`RodError::EmptyRod`] when there are no nodes and
    /// [`RodError::LengthMismatch`] when the arrays disagree on length.
    pub fn new(
        position: Vec<Point3<f64>>,
        directors: Vec<Matrix3<f64>>,
        velocity: Vec<Vector3<f64>>,
        omega: Vec<Vector3<f64>>,
    ) -> Result<Self> {
        let expected = position.len();
        if expected == 0 {
            return Err(RodError::EmptyRod);
        }

        for (field, actual) in [
            ("directors", directors.len()),
            ("velocity", velocity.len()),
            ("omega", omega.len()),
        ] {
            if actual != expected {
                return Err(RodError::LengthMismatch {
                    field,
                    expected,
                    actual,
                });
            }
        }

        Ok(Self {
            position,
            directors,
            velocity,
            omega,
        })
    }

    /// Create a straight rod at rest with `num_nodes` evenly spaced nodes.
    ///
    /// All directors are the identity. A single-node rod sits at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`RodError::EmptyRod`] if `num_nodes` is zero.
    pub fn straight(start: Point3<f64>, end: Point3<f64>, num_nodes: usize) -> Result<Self> {
        if num_nodes == 0 {
            return Err(RodError::EmptyRod);
        }

        let direction = end - start;
        let segments = num_nodes.saturating_sub(1).max(1) as f64;
        let position = (0..num_nodes)
            .map(|i| start + direction * (i as f64 / segments))
            .collect();

        Ok(Self {
            position,
            directors: vec![Matrix3::identity(); num_nodes],
            velocity: vec![Vector3::zeros(); num_nodes],
            omega: vec![Vector3::zeros(); num_nodes],
        })
    }

    /// Number of nodes.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.position.len()
    }

    /// Index of the start node (always 0).
    #[must_use]
    pub const fn start_index(&self) -> usize {
        0
    }

    /// Index of the end node (`N - 1`).
    #[must_use]
    pub fn end_index(&self) -> usize {
        self.num_nodes().saturating_sub(1)
    }

    /// Overwrite the position and directors at `index`.
    #[inline]
    pub fn set_pose(&mut self, index: usize, position: Point3<f64>, directors: Matrix3<f64>) {
        self.position[index] = position;
        self.directors[index] = directors;
    }

    /// Overwrite the velocity and angular velocity at `index`.
    #[inline]
    pub fn set_rates(&mut self, index: usize, velocity: Vector3<f64>, omega: Vector3<f64>) {
        self.velocity[index] = velocity;
        self.omega[index] = omega;
    }

    /// Zero the velocity and angular velocity at `index`.
    #[inline]
    pub fn zero_rates(&mut self, index: usize) {
        self.set_rates(index, Vector3::zeros(), Vector3::zeros());
    }
}
