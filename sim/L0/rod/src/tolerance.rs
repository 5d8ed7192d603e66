//! Numerical tolerance used when comparing rod states.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use nalgebra::{Matrix3, Point3, Vector3};

use crate::types::RodState;

/// Absolute/relative tolerance pair.
///
/// Passed explicitly wherever two floating point results are compared;
/// nothing in the crate reads a global tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tolerance {
    /// Absolute tolerance.
    pub atol: f64,
    /// Relative tolerance.
    pub rtol: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::strict()
    }
}

impl Tolerance {
    /// Tight tolerance for exact kinematic overwrites (atol = 1e-12).
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            atol: 1e-12,
            rtol: 0.0,
        }
    }

    /// Tolerance for comparisons against published six-digit reference values.
    #[must_use]
    pub const fn reference() -> Self {
        Self {
            atol: 1e-6,
            rtol: 0.0,
        }
    }

    /// Set the absolute tolerance.
    #[must_use]
    pub const fn with_atol(mut self, atol: f64) -> Self {
        self.atol = atol;
        self
    }

    /// Set the relative tolerance.
    #[must_use]
    pub const fn with_rtol(mut self, rtol: f64) -> Self {
        self.rtol = rtol;
        self
    }

    /// `|actual - expected| <= atol + rtol * |expected|`.
    #[must_use]
    pub fn approx_eq(&self, actual: f64, expected: f64) -> bool {
        (actual - expected).abs() <= self.atol + self.rtol * expected.abs()
    }

    /// Component-wise [`Tolerance::approx_eq`] on vectors.
    #[must_use]
    pub fn vector_eq(&self, actual: &Vector3<f64>, expected: &Vector3<f64>) -> bool {
        actual
            .iter()
            .zip(expected.iter())
            .all(|(a, e)| self.approx_eq(*a, *e))
    }

    /// Component-wise [`Tolerance::approx_eq`] on points.
    #[must_use]
    pub fn point_eq(&self, actual: &Point3<f64>, expected: &Point3<f64>) -> bool {
        self.vector_eq(&actual.coords, &expected.coords)
    }

    /// Element-wise [`Tolerance::approx_eq`] on 3x3 matrices.
    #[must_use]
    pub fn matrix_eq(&self, actual: &Matrix3<f64>, expected: &Matrix3<f64>) -> bool {
        actual
            .iter()
            .zip(expected.iter())
            .all(|(a, e)| self.approx_eq(*a, *e))
    }

    /// Compare every array of two rod states.
    ///
    /// States with different node counts never compare equal.
    #[must_use]
    pub fn rod_eq(&self, actual: &RodState, expected: &RodState) -> bool {
        actual.num_nodes() == expected.num_nodes()
            && actual
                .position
                .iter()
                .zip(&expected.position)
                .all(|(a, e)| self.point_eq(a, e))
            && actual
                .directors
                .iter()
                .zip(&expected.directors)
                .all(|(a, e)| self.matrix_eq(a, e))
            && actual
                .velocity
                .iter()
                .zip(&expected.velocity)
                .all(|(a, e)| self.vector_eq(a, e))
            && actual
                .omega
                .iter()
                .zip(&expected.omega)
                .all(|(a, e)| self.vector_eq(a, e))
    }
}
