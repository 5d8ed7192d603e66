//! Boundary conditions for Cosserat rod simulation.
//!
//! A boundary condition overwrites part of a rod's kinematic state at fixed
//! node indices. The time integrator owns the stepping loop and calls the
//! two operations of [`ConstraintApplier`] each sub-step:
//!
//! - `constrain_values` - positions and directors
//! - `constrain_rates` - velocities and angular velocities
//!
//! # Boundary Conditions
//!
//! | Type | Nodes | Behaviour |
//! |------|-------|-----------|
//! | [`FreeRod`] | none | No-op |
//! | [`OneEndFixedRod`] | 0 | Clamp to a stored pose, zero rates |
//! | [`FixedNodes`] | any | Clamp selected nodes/elements |
//! | [`HelicalBucklingBc`] | 0, N-1 | Timed twist and shortening, then hold |
//!
//! Interior nodes are never touched by the end conditions.
//!
//! # Rod Layout
//!
//! ```text
//! ●───●───●───●───●
//! 0   1   2   3   N-1
//! start           end
//! ```
//!
//! # Quick Start
//!
//! ```
//! use sim_rod::{
//!     ConstraintApplier, ConstraintSet, HelicalBucklingBc, HelicalBucklingConfig, RodState,
//! };
//! use nalgebra::Point3;
//!
//! let mut rod = RodState::straight(Point3::origin(), Point3::new(100.0, 0.0, 0.0), 20)?;
//! let bc = HelicalBucklingBc::from_rod(&rod, HelicalBucklingConfig::default());
//! let constraints = ConstraintSet::new().with(bc);
//!
//! let dt = 0.5;
//! let mut time = 0.0;
//! for _ in 0..10 {
//!     constraints.constrain_values(&mut rod, time);
//!     // ... integrator computes forces and advances the rod ...
//!     constraints.constrain_rates(&mut rod, time);
//!     time += dt;
//! }
//! # Ok::<(), sim_rod::RodError>(())
//! ```
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**.

#![doc(html_root_url = "https://docs.rs/sim-rod/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(missing_docs)]
// Allow precision loss when converting indices to f64 - these are small values
#![allow(clippy::cast_precision_loss)]
// Test-related lints - these are style preferences
#![cfg_attr(test, allow(clippy::uninlined_format_args, clippy::float_cmp))]

pub mod constraints;
pub mod error;
pub mod fixed;
pub mod free;
pub mod helical;
pub mod tolerance;
pub mod types;

// Re-export main types at crate root
pub use constraints::{BoundaryCondition, BoundaryConditionKind, ConstraintApplier, ConstraintSet};
pub use error::{Result, RodError};
pub use fixed::{FixedNodes, OneEndFixedRod};
pub use free::FreeRod;
pub use helical::{HelicalBucklingBc, HelicalBucklingConfig, TwistPhase, TwistRamp};
pub use tolerance::Tolerance;
pub use types::RodState;
