//! The unconstrained rod.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constraints::ConstraintApplier;
use crate::types::RodState;

/// Boundary condition that leaves the rod untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FreeRod;

impl ConstraintApplier for FreeRod {
    fn constrain_values(&self, _rod: &mut RodState, _time: f64) {}

    fn constrain_rates(&self, _rod: &mut RodState, _time: f64) {}
}
