// rtsim_core/src/geodetic.rs

use crate::error::Result;
use crate::frame::Frame;
use crate::validate;
use crate::world::World;
use nalgebra::Vector3;
use serde::Deserialize;
use std::f64::consts::FRAC_PI_2;

/// Where the testbed sits on the world, and the gravity measured there.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawGeodetic")]
pub struct Geodetic {
    latitude_deg: f64,
    longitude_deg: f64,
    height_m: f64,
    gravity: f64,
}

impl Geodetic {
    pub fn new(latitude_deg: f64, longitude_deg: f64, height_m: f64, gravity: f64) -> Result<Self> {
        Ok(Self {
            latitude_deg: validate::in_range("latitude", latitude_deg, -90.0, 90.0)?,
            longitude_deg: validate::in_range("longitude", longitude_deg, -180.0, 180.0)?,
            height_m: validate::finite("height", height_m)?,
            gravity: validate::at_least("gravity", gravity, 0.0)?,
        })
    }

    /// Geodetic latitude, deg.
    pub fn latitude(&self) -> f64 {
        self.latitude_deg
    }

    /// Longitude, deg.
    pub fn longitude(&self) -> f64 {
        self.longitude_deg
    }

    /// Height above the ellipsoid, m.
    pub fn height(&self) -> f64 {
        self.height_m
    }

    /// Local gravity magnitude, m/s^2.
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Earth-centred, earth-fixed position of this location on `world`.
    pub fn to_ecef(&self, world: &World) -> Vector3<f64> {
        let (sin_phi, cos_phi) = self.latitude_deg.to_radians().sin_cos();
        let (sin_lam, cos_lam) = self.longitude_deg.to_radians().sin_cos();
        let e2 = world.eccentricity_squared();

        // Prime-vertical radius of curvature.
        let m_phi = world.semi_major_axis() / (1.0 - e2 * sin_phi * sin_phi).sqrt();

        Vector3::new(
            (m_phi + self.height_m) * cos_phi * cos_lam,
            (m_phi + self.height_m) * cos_phi * sin_lam,
            (m_phi * (1.0 - e2) + self.height_m) * sin_phi,
        )
    }

    /// Orientation angles of the local-level frame relative to the world frame.
    pub fn local_level_orientation(&self) -> Vector3<f64> {
        let phi = self.latitude_deg.to_radians();
        let lam = self.longitude_deg.to_radians();
        Vector3::new(0.0, -(FRAC_PI_2 + phi), lam)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGeodetic {
    latitude_deg: f64,
    longitude_deg: f64,
    height_m: f64,
    gravity: f64,
}

impl TryFrom<RawGeodetic> for Geodetic {
    type Error = crate::error::RtsimError;

    fn try_from(raw: RawGeodetic) -> Result<Self> {
        Geodetic::new(raw.latitude_deg, raw.longitude_deg, raw.height_m, raw.gravity)
    }
}

/// Builds the Fixed navigation (local-level) frame for `location` on `world`.
pub fn navigation_frame(world: &World, location: &Geodetic) -> Result<Frame> {
    Frame::fixed(location.to_ecef(world), location.local_level_orientation())
}
