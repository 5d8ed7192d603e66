//! The boundary condition interface and its dispatchers.
//!
//! - [`ConstraintApplier`] - What an integrator calls every sub-step
//! - [`BoundaryCondition`] - Tagged union over the built-in conditions
//! - [`ConstraintSet`] - Ordered list of conditions applied together
//!
//! # Integrator contract
//!
//! ```text
//! For each sub-step at time t:
//!   bc.constrain_values(rod, t)   // kinematic overwrite of x, Q
//!   ... compute forces, advance state ...
//!   bc.constrain_rates(rod, t)    // kinematic overwrite of v, ω
//! ```
//!
//! The order is chosen by the integrator. Both calls are idempotent for a
//! fixed `(rod, t)` and only touch the indices a condition owns.

use crate::fixed::{FixedNodes, OneEndFixedRod};
use crate::free::FreeRod;
use crate::helical::HelicalBucklingBc;
use crate::types::RodState;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A kinematic constraint on a rod.
pub trait ConstraintApplier {
    /// Overwrite the constrained positions and directors.
    fn constrain_values(&self, rod: &mut RodState, time: f64);

    /// Overwrite the constrained velocities and angular velocities.
    fn constrain_rates(&self, rod: &mut RodState, time: f64);
}

impl<T: ConstraintApplier + ?Sized> ConstraintApplier for Box<T> {
    fn constrain_values(&self, rod: &mut RodState, time: f64) {
        (**self).constrain_values(rod, time);
    }

    fn constrain_rates(&self, rod: &mut RodState, time: f64) {
        (**self).constrain_rates(rod, time);
    }
}

/// Type of boundary condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BoundaryConditionKind {
    /// No constraint.
    Free,
    /// Start node clamped.
    OneEndFixed,
    /// Arbitrary nodes clamped.
    FixedNodes,
    /// Time-dependent twist of both ends.
    HelicalBuckling,
}

/// Any of the built-in boundary conditions.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BoundaryCondition {
    /// No-op.
    Free(FreeRod),
    /// Clamp of node 0.
    OneEndFixed(OneEndFixedRod),
    /// Clamp of selected nodes.
    FixedNodes(FixedNodes),
    /// Helical buckling twist.
    HelicalBuckling(HelicalBucklingBc),
}

impl BoundaryCondition {
    /// Get the type of this boundary condition.
    #[must_use]
    pub const fn kind(&self) -> BoundaryConditionKind {
        match self {
            Self::Free(_) => BoundaryConditionKind::Free,
            Self::OneEndFixed(_) => BoundaryConditionKind::OneEndFixed,
            Self::FixedNodes(_) => BoundaryConditionKind::FixedNodes,
            Self::HelicalBuckling(_) => BoundaryConditionKind::HelicalBuckling,
        }
    }
}

impl Default for BoundaryCondition {
    fn default() -> Self {
        Self::Free(FreeRod)
    }
}

impl ConstraintApplier for BoundaryCondition {
    fn constrain_values(&self, rod: &mut RodState, time: f64) {
        match self {
            Self::Free(c) => c.constrain_values(rod, time),
            Self::OneEndFixed(c) => c.constrain_values(rod, time),
            Self::FixedNodes(c) => c.constrain_values(rod, time),
            Self::HelicalBuckling(c) => c.constrain_values(rod, time),
        }
    }

    fn constrain_rates(&self, rod: &mut RodState, time: f64) {
        match self {
            Self::Free(c) => c.constrain_rates(rod, time),
            Self::OneEndFixed(c) => c.constrain_rates(rod, time),
            Self::FixedNodes(c) => c.constrain_rates(rod, time),
            Self::HelicalBuckling(c) => c.constrain_rates(rod, time),
        }
    }
}

impl From<FreeRod> for BoundaryCondition {
    fn from(c: FreeRod) -> Self {
        Self::Free(c)
    }
}

impl From<OneEndFixedRod> for BoundaryCondition {
    fn from(c: OneEndFixedRod) -> Self {
        Self::OneEndFixed(c)
    }
}

impl From<FixedNodes> for BoundaryCondition {
    fn from(c: FixedNodes) -> Self {
        Self::FixedNodes(c)
    }
}

impl From<HelicalBucklingBc> for BoundaryCondition {
    fn from(c: HelicalBucklingBc) -> Self {
        Self::HelicalBuckling(c)
    }
}

/// Boundary conditions applied one after another in insertion order.
///
/// Later entries win where two conditions own the same index.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstraintSet {
    conditions: Vec<BoundaryCondition>,
}

impl ConstraintSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a boundary condition.
    pub fn push(&mut self, condition: impl Into<BoundaryCondition>) {
        self.conditions.push(condition.into());
    }

    /// Builder-style [`ConstraintSet::push`].
    #[must_use]
    pub fn with(mut self, condition: impl Into<BoundaryCondition>) -> Self {
        self.push(condition);
        self
    }

    /// Number of conditions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Whether the set holds no conditions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Iterate over the conditions in application order.
    pub fn iter(&self) -> impl Iterator<Item = &BoundaryCondition> {
        self.conditions.iter()
    }
}

impl ConstraintApplier for ConstraintSet {
    fn constrain_values(&self, rod: &mut RodState, time: f64) {
        for condition in &self.conditions {
            condition.constrain_values(rod, time);
        }
    }

    fn constrain_rates(&self, rod: &mut RodState, time: f64) {
        for condition in &self.conditions {
            condition.constrain_rates(rod, time);
        }
    }
}
