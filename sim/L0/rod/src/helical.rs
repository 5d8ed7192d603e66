//! Boundary condition for helical buckling experiments.
//!
//! Both ends of a straight rod are driven towards each other while being
//! twisted in opposite directions about the rod axis. After `twisting_time`
//! the ends are held still and the rod is left to buckle into a helix.
//!
//! # Drive
//!
//! ```text
//!  start                                  end
//!    ●────────────────────────────────────●
//!   ⟲ +ω x̂                              ⟳ -ω x̂
//!   → +v x̂                              ← -v x̂
//! ```
//!
//! The relative twist between the ends after the drive is
//! `2π · number_of_rotations` and the relative shortening is `slack`. Each end
//! carries half of it, so the rod as a whole picks up no net rigid rotation
//! or translation.
//!
//! # Phases
//!
//! | time                  | rates at ends       |
//! |-----------------------|---------------------|
//! | `t < twisting_time`   | driven (see above)  |
//! | `t >= twisting_time`  | zero                |
//!
//! Positions and directors are always written with the post-drive pose.

use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::{Matrix3, Point3, Rotation3, Unit, Vector3};
use tracing::{debug, trace, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constraints::ConstraintApplier;
use crate::error::{Result, RodError};
use crate::types::RodState;

/// Time profile of the end rates during the twisting phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TwistRamp {
    /// Constant rates, switched off abruptly at `twisting_time`.
    #[default]
    Constant,
    /// Rates follow `(π/2) cos(π t / 2T)`, so the completed fraction of the
    /// drive is `sin(π t / 2T)` and the rates vanish at release.
    Sinusoidal,
}

/// Phase of the helical buckling drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TwistPhase {
    /// Ends are driven.
    Twisting,
    /// Ends are held at rest.
    Released,
}

/// Parameters of the helical buckling drive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HelicalBucklingConfig {
    /// Duration of the twisting phase (seconds). Must be positive.
    pub twisting_time: f64,
    /// Total end-to-end shortening imposed by the drive.
    pub slack: f64,
    /// Total relative revolutions between the two ends.
    pub number_of_rotations: f64,
    /// Rate profile during the twisting phase.
    pub ramp: TwistRamp,
}

impl Default for HelicalBucklingConfig {
    fn default() -> Self {
        Self {
            twisting_time: 500.0,
            slack: 3.0,
            number_of_rotations: 27.0,
            ramp: TwistRamp::Constant,
        }
    }
}

impl HelicalBucklingConfig {
    /// Create a config with a constant rate profile.
    #[must_use]
    pub const fn new(twisting_time: f64, slack: f64, number_of_rotations: f64) -> Self {
        Self {
            twisting_time,
            slack,
            number_of_rotations,
            ramp: TwistRamp::Constant,
        }
    }

    /// Set the rate profile.
    #[must_use]
    pub const fn with_ramp(mut self, ramp: TwistRamp) -> Self {
        self.ramp = ramp;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RodError::InvalidConfig`] for a non-finite or non-positive
    /// `twisting_time`, or a non-finite `slack` or `number_of_rotations`.
    pub fn validate(&self) -> Result<()> {
        if !self.twisting_time.is_finite() || self.twisting_time <= 0.0 {
            return Err(RodError::invalid_config(format!(
                "twisting_time must be positive and finite, got {}",
                self.twisting_time
            )));
        }

        if !self.slack.is_finite() {
            return Err(RodError::invalid_config("slack must be finite"));
        }

        if !self.number_of_rotations.is_finite() {
            return Err(RodError::invalid_config(
                "number_of_rotations must be finite",
            ));
        }

        Ok(())
    }

    /// Relative angular speed between the ends, `2π · rotations / T`.
    #[must_use]
    pub fn omega_bc(&self) -> f64 {
        2.0 * PI * self.number_of_rotations / self.twisting_time
    }

    /// Relative approach speed of the ends, `slack / T`.
    #[must_use]
    pub fn v_bc(&self) -> f64 {
        self.slack / self.twisting_time
    }

    /// Rotation of each end at the end of the drive, `π · rotations`.
    #[must_use]
    pub fn end_rotation_angle(&self) -> f64 {
        self.number_of_rotations * PI
    }
}

/// Helical buckling boundary condition.
///
/// All targets are derived once at construction from copies of the initial
/// end poses.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HelicalBucklingBc {
    config: HelicalBucklingConfig,
    axis: Unit<Vector3<f64>>,
    /// Linear velocity of the start end while twisting (end gets the negation).
    shrink_velocity: Vector3<f64>,
    /// Angular velocity of the start end while twisting (end gets the negation).
    twist_velocity: Vector3<f64>,
    final_start_position: Point3<f64>,
    final_end_position: Point3<f64>,
    final_start_directors: Matrix3<f64>,
    final_end_directors: Matrix3<f64>,
}

impl HelicalBucklingBc {
    /// Create the boundary condition from the initial end poses.
    ///
    /// Parameters are not checked: a non-positive `twisting_time` or
    /// coincident end positions produce meaningless targets. Use
    /// [`HelicalBucklingBc::try_new`] for validated construction.
    #[must_use]
    pub fn new(
        position_start: Point3<f64>,
        position_end: Point3<f64>,
        director_start: Matrix3<f64>,
        director_end: Matrix3<f64>,
        twisting_time: f64,
        slack: f64,
        number_of_rotations: f64,
    ) -> Self {
        Self::with_config(
            position_start,
            position_end,
            director_start,
            director_end,
            HelicalBucklingConfig::new(twisting_time, slack, number_of_rotations),
        )
    }

    /// Create the boundary condition with an explicit configuration.
    #[must_use]
    pub fn with_config(
        position_start: Point3<f64>,
        position_end: Point3<f64>,
        director_start: Matrix3<f64>,
        director_end: Matrix3<f64>,
        config: HelicalBucklingConfig,
    ) -> Self {
        if config.twisting_time <= 0.0 {
            warn!(
                twisting_time = config.twisting_time,
                "helical buckling drive with non-positive twisting time"
            );
        }

        let axis = Unit::new_normalize(position_end - position_start);
        let half_slack = 0.5 * config.slack;
        let theta = config.end_rotation_angle();

        // Post-twist frames are R(±θ) Q, rotation on the lab side.
        let start_rotation = Rotation3::from_axis_angle(&axis, theta);
        let end_rotation = Rotation3::from_axis_angle(&axis, -theta);

        let bc = Self {
            axis,
            shrink_velocity: axis.into_inner() * (0.5 * config.v_bc()),
            twist_velocity: axis.into_inner() * (0.5 * config.omega_bc()),
            final_start_position: position_start + axis.into_inner() * half_slack,
            final_end_position: position_end - axis.into_inner() * half_slack,
            final_start_directors: start_rotation.matrix() * director_start,
            final_end_directors: end_rotation.matrix() * director_end,
            config,
        };

        debug!(
            twisting_time = config.twisting_time,
            omega_bc = config.omega_bc(),
            v_bc = config.v_bc(),
            end_rotation = theta,
            "helical buckling boundary condition"
        );

        bc
    }

    /// Validated construction.
    ///
    /// # Errors
    ///
    /// Returns [`RodError::InvalidConfig`] if the configuration fails
    /// [`HelicalBucklingConfig::validate`] or the end positions coincide.
    pub fn try_new(
        position_start: Point3<f64>,
        position_end: Point3<f64>,
        director_start: Matrix3<f64>,
        director_end: Matrix3<f64>,
        config: HelicalBucklingConfig,
    ) -> Result<Self> {
        config.validate()?;

        let length = (position_end - position_start).norm();
        if !length.is_finite() || length <= 0.0 {
            return Err(RodError::invalid_config(
                "start and end positions must be distinct",
            ));
        }

        Ok(Self::with_config(
            position_start,
            position_end,
            director_start,
            director_end,
            config,
        ))
    }

    /// Build from the current end poses of `rod`.
    #[must_use]
    pub fn from_rod(rod: &RodState, config: HelicalBucklingConfig) -> Self {
        let (start, end) = (rod.start_index(), rod.end_index());
        Self::with_config(
            rod.position[start],
            rod.position[end],
            rod.directors[start],
            rod.directors[end],
            config,
        )
    }

    /// The drive parameters.
    #[must_use]
    pub const fn config(&self) -> &HelicalBucklingConfig {
        &self.config
    }

    /// Twist axis, pointing from the start to the end of the rod.
    #[must_use]
    pub const fn axis(&self) -> &Unit<Vector3<f64>> {
        &self.axis
    }

    /// Phase at `time`. `time == twisting_time` is already released.
    #[must_use]
    pub fn phase(&self, time: f64) -> TwistPhase {
        if time >= self.config.twisting_time {
            TwistPhase::Released
        } else {
            TwistPhase::Twisting
        }
    }

    /// `sin(π t / 2T)` with `t` clamped to `[0, T]`.
    #[must_use]
    pub fn ramp(&self, time: f64) -> f64 {
        let t = time.clamp(0.0, self.config.twisting_time);
        (FRAC_PI_2 * t / self.config.twisting_time).sin()
    }

    /// Multiplier applied to the nominal end rates at `time`.
    #[must_use]
    pub fn rate_scale(&self, time: f64) -> f64 {
        match (self.phase(time), self.config.ramp) {
            (TwistPhase::Released, _) => 0.0,
            (TwistPhase::Twisting, TwistRamp::Constant) => 1.0,
            (TwistPhase::Twisting, TwistRamp::Sinusoidal) => {
                let t = time.max(0.0);
                FRAC_PI_2 * (FRAC_PI_2 * t / self.config.twisting_time).cos()
            }
        }
    }

    /// Start and end positions after the drive.
    #[must_use]
    pub const fn final_positions(&self) -> (Point3<f64>, Point3<f64>) {
        (self.final_start_position, self.final_end_position)
    }

    /// Start and end directors after the drive.
    #[must_use]
    pub const fn final_directors(&self) -> (Matrix3<f64>, Matrix3<f64>) {
        (self.final_start_directors, self.final_end_directors)
    }
}

impl ConstraintApplier for HelicalBucklingBc {
    fn constrain_values(&self, rod: &mut RodState, _time: f64) {
        let (start, end) = (rod.start_index(), rod.end_index());
        rod.set_pose(start, self.final_start_position, self.final_start_directors);
        rod.set_pose(end, self.final_end_position, self.final_end_directors);
    }

    fn constrain_rates(&self, rod: &mut RodState, time: f64) {
        let (start, end) = (rod.start_index(), rod.end_index());
        let phase = self.phase(time);
        trace!(time, ?phase, "helical buckling rates");

        match phase {
            TwistPhase::Released => {
                rod.zero_rates(start);
                rod.zero_rates(end);
            }
            TwistPhase::Twisting => {
                let scale = self.rate_scale(time);
                let velocity = self.shrink_velocity * scale;
                let omega = self.twist_velocity * scale;
                rod.set_rates(start, velocity, omega);
                rod.set_rates(end, -velocity, -omega);
            }
        }
    }
}
