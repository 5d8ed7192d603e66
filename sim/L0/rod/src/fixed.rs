//! Clamped boundary conditions.
//!
//! - [`OneEndFixedRod`] - Cantilever clamp of the start node
//! - [`FixedNodes`] - Clamp of an arbitrary set of nodes
//!
//! Both hold snapshots taken at construction. The rod they are later applied
//! to can change freely without affecting the clamp target.

use nalgebra::{Matrix3, Point3};
use smallvec::SmallVec;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constraints::ConstraintApplier;
use crate::error::{Result, RodError};
use crate::types::RodState;

/// Clamp of the start node.
///
/// `constrain_values` pins node 0 to the stored pose and `constrain_rates`
/// zeroes its velocity and angular velocity. Time is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OneEndFixedRod {
    fixed_position: Point3<f64>,
    fixed_directors: Matrix3<f64>,
}

impl OneEndFixedRod {
    /// Create a clamp at the given pose.
    #[must_use]
    pub const fn new(fixed_position: Point3<f64>, fixed_directors: Matrix3<f64>) -> Self {
        Self {
            fixed_position,
            fixed_directors,
        }
    }

    /// Clamp node 0 at its current pose.
    #[must_use]
    pub fn from_rod(rod: &RodState) -> Self {
        let start = rod.start_index();
        Self::new(rod.position[start], rod.directors[start])
    }

    /// Target position of node 0.
    #[must_use]
    pub const fn fixed_position(&self) -> &Point3<f64> {
        &self.fixed_position
    }

    /// Target directors of node 0.
    #[must_use]
    pub const fn fixed_directors(&self) -> &Matrix3<f64> {
        &self.fixed_directors
    }
}

impl ConstraintApplier for OneEndFixedRod {
    fn constrain_values(&self, rod: &mut RodState, _time: f64) {
        let start = rod.start_index();
        rod.set_pose(start, self.fixed_position, self.fixed_directors);
    }

    fn constrain_rates(&self, rod: &mut RodState, _time: f64) {
        let start = rod.start_index();
        rod.zero_rates(start);
    }
}

/// Clamp of selected nodes.
///
/// Positions and velocities are constrained at `nodes`; directors and
/// angular velocities at `elements`. The two lists are independent so a
/// node can be held in place while remaining free to rotate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FixedNodes {
    nodes: SmallVec<[usize; 2]>,
    positions: SmallVec<[Point3<f64>; 2]>,
    elements: SmallVec<[usize; 2]>,
    directors: SmallVec<[Matrix3<f64>; 2]>,
}

impl FixedNodes {
    /// Snapshot the given nodes and elements of `rod`.
    ///
    /// # Errors
    ///
    /// Returns [`RodError::IndexOutOfBounds`] if any index is past the last node.
    pub fn from_rod(rod: &RodState, nodes: &[usize], elements: &[usize]) -> Result<Self> {
        let n = rod.num_nodes();
        for &index in nodes.iter().chain(elements) {
            if index >= n {
                return Err(RodError::index_out_of_bounds(format!(
                    "index {index} on a rod with {n} nodes"
                )));
            }
        }

        debug!(
            nodes = nodes.len(),
            elements = elements.len(),
            "fixing rod nodes"
        );

        Ok(Self {
            nodes: SmallVec::from_slice(nodes),
            positions: nodes.iter().map(|&i| rod.position[i]).collect(),
            elements: SmallVec::from_slice(elements),
            directors: elements.iter().map(|&i| rod.directors[i]).collect(),
        })
    }

    /// Clamp both ends of `rod` in position and orientation.
    #[must_use]
    pub fn both_ends(rod: &RodState) -> Self {
        let mut ends: SmallVec<[usize; 2]> = SmallVec::new();
        ends.push(rod.start_index());
        if rod.end_index() != rod.start_index() {
            ends.push(rod.end_index());
        }

        Self {
            positions: ends.iter().map(|&i| rod.position[i]).collect(),
            directors: ends.iter().map(|&i| rod.directors[i]).collect(),
            nodes: ends.clone(),
            elements: ends,
        }
    }

    /// Constrained node indices.
    #[must_use]
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Constrained element indices.
    #[must_use]
    pub fn elements(&self) -> &[usize] {
        &self.elements
    }
}

impl ConstraintApplier for FixedNodes {
    fn constrain_values(&self, rod: &mut RodState, _time: f64) {
        for (&i, position) in self.nodes.iter().zip(&self.positions) {
            rod.position[i] = *position;
        }
        for (&i, directors) in self.elements.iter().zip(&self.directors) {
            rod.directors[i] = *directors;
        }
    }

    fn constrain_rates(&self, rod: &mut RodState, _time: f64) {
        for &i in &self.nodes {
            rod.velocity[i].fill(0.0);
        }
        for &i in &self.elements {
            rod.omega[i].fill(0.0);
        }
    }
}
