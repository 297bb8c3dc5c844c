// rtsim_core/src/world.rs

use crate::error::{Result, RtsimError};
use crate::frame::Frame;
use crate::moniker::Moniker;
use crate::pva::{ConstantPva, TimePva};
use crate::validate;
use nalgebra::Vector3;
use std::f64::consts::TAU;
use tracing::debug;

// --- WGS84 defining parameters ---
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;
pub const WGS84_INVERSE_FLATTENING: f64 = 298.257_223_563;
pub const WGS84_ROTATION_RATE: f64 = 7.292_115_146_706_4e-5;

/// The rotating reference body the testbed sits on.
#[derive(Debug, Clone)]
pub struct World {
    moniker: Moniker,
    /// Semi-major axis `a`, m.
    a: f64,
    /// First eccentricity squared `e^2`.
    e2: f64,
    /// Rotation rate `omega_ie`, rad/s.
    omega_ie: f64,
    /// Populated by `process`.
    frame: Option<Frame>,
}

impl World {
    /// Creates a world from its ellipsoid and rotation rate.
    ///
    /// An infinite `inverse_flattening` describes a sphere.
    pub fn new(
        moniker: &str,
        semi_major_axis: f64,
        inverse_flattening: f64,
        rotation_rate: f64,
    ) -> Result<Self> {
        let moniker = Moniker::new(moniker)?;
        let a = validate::greater_than("semi_major_axis", semi_major_axis, 0.0)?;
        let e2 = eccentricity_squared(inverse_flattening)?;
        let omega_ie = validate::in_range("rotation_rate", rotation_rate, 0.0, TAU)?;

        Ok(Self {
            moniker,
            a,
            e2,
            omega_ie,
            frame: None,
        })
    }

    pub fn wgs84(moniker: &str) -> Result<Self> {
        Self::new(
            moniker,
            WGS84_SEMI_MAJOR_AXIS,
            WGS84_INVERSE_FLATTENING,
            WGS84_ROTATION_RATE,
        )
    }

    pub fn moniker(&self) -> &Moniker {
        &self.moniker
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.a
    }

    pub fn eccentricity_squared(&self) -> f64 {
        self.e2
    }

    pub fn rotation_rate(&self) -> f64 {
        self.omega_ie
    }

    pub fn set_moniker(&mut self, value: &str) -> Result<()> {
        self.moniker = Moniker::new(value)?;
        Ok(())
    }

    pub fn set_semi_major_axis(&mut self, value: f64) -> Result<()> {
        self.a = validate::greater_than("semi_major_axis", value, 0.0)?;
        Ok(())
    }

    pub fn set_inverse_flattening(&mut self, value: f64) -> Result<()> {
        self.e2 = eccentricity_squared(value)?;
        Ok(())
    }

    pub fn set_rotation_rate(&mut self, value: f64) -> Result<()> {
        self.omega_ie = validate::in_range("rotation_rate", value, 0.0, TAU)?;
        Ok(())
    }

    /// The world frame from the last `process` call, if any.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub(crate) fn require_frame(&self) -> Result<&Frame> {
        self.frame
            .as_ref()
            .ok_or_else(|| RtsimError::WorldNotProcessed(self.moniker.to_string()))
    }

    /// Computes the world frame at every relative time in `time` (s),
    /// replacing any previous frame.
    ///
    /// The resulting orientation matrices are transposed, so `C` maps
    /// inertial components into world components.
    pub fn process(&mut self, time: &[f64]) -> Result<&Frame> {
        if time.is_empty() {
            return Err(RtsimError::EmptySeries { name: "time" });
        }
        time.iter().try_for_each(|t| validate::finite("time", *t).map(|_| ()))?;

        debug!(
            world = %self.moniker,
            steps = time.len(),
            omega_ie = self.omega_ie,
            "processing world rotation"
        );

        let steps = time.len();
        let rate = Vector3::new(0.0, 0.0, self.omega_ie);
        let theta = time
            .iter()
            .map(|t| Vector3::new(0.0, 0.0, self.omega_ie * t))
            .collect();

        let angular = TimePva::new(theta, vec![rate; steps], vec![Vector3::zeros(); steps])?;
        let mut frame = Frame::new(ConstantPva::zeros(), angular);
        frame.transpose_orientation();

        Ok(&*self.frame.insert(frame))
    }
}

fn eccentricity_squared(inverse_flattening: f64) -> Result<f64> {
    if inverse_flattening == f64::INFINITY {
        return Ok(0.0);
    }
    let inverse_flattening = validate::greater_than("inverse_flattening", inverse_flattening, 1.0)?;
    let f = 1.0 / inverse_flattening;
    Ok(f * (2.0 - f))
}
