// rtsim_sim/src/config/structs.rs

use nalgebra::Vector3;
use rtsim_core::geodetic::Geodetic;
use rtsim_core::moniker::Moniker;
use rtsim_core::world::{WGS84_INVERSE_FLATTENING, WGS84_ROTATION_RATE, WGS84_SEMI_MAJOR_AXIS};
use serde::Deserialize;

use crate::error::{Result, ScenarioError};
use crate::profiles::MotionProfile;
use crate::utils::serde_helpers;

/// Upper bound on the number of time samples a scenario may request.
pub const MAX_SAMPLES: usize = 10_000_000;

// =========================================================================
// == Top-Level Scenario ==
// =========================================================================

/// The root of the data parsed from a scenario `.toml` file.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    pub testbed: TestbedConfig,

    #[serde(default)] // WGS84 if the [world] section is missing
    pub world: WorldConfig,

    pub time: TimeConfig,

    #[serde(default)]
    pub mount: ComponentConfig,

    #[serde(default)]
    pub body: ComponentConfig,

    // The TOML has `[[axes]]`, listed from the body outward.
    #[serde(default)]
    pub axes: Vec<AxisConfig>,
}

// =========================================================================
// == Sections ==
// =========================================================================

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct TestbedConfig {
    pub name: Moniker,
    /// Validated on load: latitude, longitude, height and local gravity.
    pub location: Geodetic,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WorldConfig {
    pub name: String,
    /// m
    pub semi_major_axis: f64,
    /// `inf` for a sphere.
    pub inverse_flattening: f64,
    /// rad/s
    pub rotation_rate: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: "Earth".to_string(),
            semi_major_axis: WGS84_SEMI_MAJOR_AXIS,
            inverse_flattening: WGS84_INVERSE_FLATTENING,
            rotation_rate: WGS84_ROTATION_RATE,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TimeConfig {
    #[serde(default)]
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl TimeConfig {
    /// Uniform samples from `start` to `stop` inclusive.
    ///
    /// A `stop` that is not a whole number of steps past `start` is rounded
    /// down to the last full step.
    pub fn samples(&self) -> Result<Vec<f64>> {
        if !(self.start.is_finite() && self.stop.is_finite() && self.step.is_finite()) {
            return Err(ScenarioError::Time("start, stop and step must be finite"));
        }
        if self.step <= 0.0 {
            return Err(ScenarioError::Time("step must be positive"));
        }
        if self.stop < self.start {
            return Err(ScenarioError::Time("stop must not precede start"));
        }

        // Tolerate accumulated rounding in (stop - start) / step.
        let intervals = ((self.stop - self.start) / self.step + 1e-9).floor();
        if intervals >= MAX_SAMPLES as f64 {
            return Err(ScenarioError::Time("too many samples; increase step or shorten the run"));
        }
        let intervals = intervals as usize;
        Ok((0..=intervals)
            .map(|i| self.start + i as f64 * self.step)
            .collect())
    }
}

// =========================================================================
// == Helper Structs for Nested Configuration ==
// =========================================================================

/// A position (m) and orientation (deg in the file, rad once loaded).
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PoseConfig {
    #[serde(with = "serde_helpers::vec3_f64_from_array", default)]
    pub position: Vector3<f64>,

    #[serde(with = "serde_helpers::vec3_rad_from_deg_array", default)]
    pub orientation: Vector3<f64>,
}

/// The mount or the body: a named, fixed pose.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ComponentConfig {
    pub name: Option<Moniker>,

    #[serde(with = "serde_helpers::vec3_f64_from_array", default)]
    pub position: Vector3<f64>,

    #[serde(with = "serde_helpers::vec3_rad_from_deg_array", default)]
    pub orientation: Vector3<f64>,
}

impl ComponentConfig {
    pub fn pose(&self) -> PoseConfig {
        PoseConfig {
            position: self.position,
            orientation: self.orientation,
        }
    }

    pub fn name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.name.as_ref().map_or(fallback, Moniker::as_str)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AxisConfig {
    pub name: Moniker,

    /// Where the axis sits in its parent, and how it is oriented there.
    #[serde(default)]
    pub zero: PoseConfig,

    /// Structural misalignment, held constant over the run.
    #[serde(default)]
    pub misalignment: PoseConfig,

    #[serde(default)]
    pub rotation: MotionProfile,
}
