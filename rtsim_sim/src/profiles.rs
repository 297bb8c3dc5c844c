// rtsim_sim/src/profiles.rs

//! Commanded axis rotations, sampled analytically into angular PVAs.
//!
//! Angles are given per component in degrees in the scenario file and are
//! already in radians by the time a profile is built.

use nalgebra::Vector3;
use rtsim_core::frame::Frame;
use rtsim_core::pva::{ConstantPva, TimePva, VectorSeries};
use serde::Deserialize;
use std::f64::consts::TAU;

use crate::utils::serde_helpers;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "type")] // The "type" field picks the variant
#[serde(rename_all = "PascalCase")] // e.g., "ConstantRate" in TOML maps to `ConstantRate`
pub enum MotionProfile {
    /// Held at a constant angle.
    Stationary {
        #[serde(with = "serde_helpers::vec3_rad_from_deg_array", default)]
        angle: Vector3<f64>,
    },
    ConstantRate {
        #[serde(with = "serde_helpers::vec3_rad_from_deg_array", default)]
        initial: Vector3<f64>,
        /// deg/s
        #[serde(with = "serde_helpers::vec3_rad_from_deg_array")]
        rate: Vector3<f64>,
    },
    ConstantAcceleration {
        #[serde(with = "serde_helpers::vec3_rad_from_deg_array", default)]
        initial: Vector3<f64>,
        /// deg/s at t = 0
        #[serde(with = "serde_helpers::vec3_rad_from_deg_array", default)]
        rate: Vector3<f64>,
        /// deg/s^2
        #[serde(with = "serde_helpers::vec3_rad_from_deg_array")]
        acceleration: Vector3<f64>,
    },
    /// `offset + amplitude * sin(2 pi f t + phase)` per component.
    Sinusoid {
        #[serde(with = "serde_helpers::vec3_rad_from_deg_array")]
        amplitude: Vector3<f64>,
        frequency_hz: f64,
        #[serde(with = "serde_helpers::vec3_rad_from_deg_array", default)]
        phase: Vector3<f64>,
        #[serde(with = "serde_helpers::vec3_rad_from_deg_array", default)]
        offset: Vector3<f64>,
    },
}

impl Default for MotionProfile {
    fn default() -> Self {
        MotionProfile::Stationary {
            angle: Vector3::zeros(),
        }
    }
}

impl MotionProfile {
    pub fn get_type_str(&self) -> &str {
        match self {
            MotionProfile::Stationary { .. } => "Stationary",
            MotionProfile::ConstantRate { .. } => "ConstantRate",
            MotionProfile::ConstantAcceleration { .. } => "ConstantAcceleration",
            MotionProfile::Sinusoid { .. } => "Sinusoid",
        }
    }

    /// Reason the profile cannot be sampled, if any.
    pub fn check(&self) -> Option<&'static str> {
        match self {
            MotionProfile::Sinusoid { frequency_hz, .. }
                if !frequency_hz.is_finite() || *frequency_hz < 0.0 =>
            {
                Some("frequency_hz must be a finite, non-negative number")
            }
            _ => None,
        }
    }

    /// Angle, rate and angular acceleration at time `t` (s).
    fn at(&self, t: f64) -> (Vector3<f64>, Vector3<f64>, Vector3<f64>) {
        match self {
            MotionProfile::Stationary { angle } => (*angle, Vector3::zeros(), Vector3::zeros()),
            MotionProfile::ConstantRate { initial, rate } => {
                (initial + rate * t, *rate, Vector3::zeros())
            }
            MotionProfile::ConstantAcceleration {
                initial,
                rate,
                acceleration,
            } => (
                initial + rate * t + acceleration * (0.5 * t * t),
                rate + acceleration * t,
                *acceleration,
            ),
            MotionProfile::Sinusoid {
                amplitude,
                frequency_hz,
                phase,
                offset,
            } => {
                let w = TAU * frequency_hz;
                let arg = Vector3::repeat(w * t) + phase;
                let sin = arg.map(f64::sin);
                let cos = arg.map(f64::cos);
                (
                    offset + amplitude.component_mul(&sin),
                    amplitude.component_mul(&cos) * w,
                    -amplitude.component_mul(&sin) * (w * w),
                )
            }
        }
    }

    /// Samples the profile at every entry of `time`.
    pub fn sample(&self, time: &[f64]) -> rtsim_core::error::Result<TimePva> {
        let mut p = VectorSeries::with_capacity(time.len());
        let mut v = VectorSeries::with_capacity(time.len());
        let mut a = VectorSeries::with_capacity(time.len());
        for &t in time {
            let (pt, vt, at) = self.at(t);
            p.push(pt);
            v.push(vt);
            a.push(at);
        }
        TimePva::new(p, v, a)
    }

    /// The Rotating frame an axis is driven with.
    pub fn rotation_frame(&self, time: &[f64]) -> rtsim_core::error::Result<Frame> {
        Ok(Frame::new(ConstantPva::zeros(), self.sample(time)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rtsim_core::frame::FrameType;

    #[derive(Deserialize)]
    struct Holder {
        rotation: MotionProfile,
    }

    fn parse(text: &str) -> MotionProfile {
        toml::from_str::<Holder>(text).unwrap().rotation
    }

    #[test]
    fn profiles_are_tagged_by_type() {
        let profile = parse("[rotation]\ntype = \"ConstantRate\"\nrate = [0.0, 0.0, 360.0]");
        assert_eq!(profile.get_type_str(), "ConstantRate");
        match profile {
            MotionProfile::ConstantRate { initial, rate } => {
                assert_eq!(initial, Vector3::zeros());
                assert_abs_diff_eq!(rate, Vector3::new(0.0, 0.0, TAU), epsilon = 1e-12);
            }
            other => panic!("unexpected profile {other:?}"),
        }
        assert!(toml::from_str::<Holder>("[rotation]\ntype = \"Wobble\"").is_err());
    }

    #[test]
    fn constant_rate_integrates_linearly() {
        let profile = MotionProfile::ConstantRate {
            initial: Vector3::new(0.0, 0.0, 1.0),
            rate: Vector3::new(0.0, 0.0, 2.0),
        };
        let pva = profile.sample(&[0.0, 0.5, 1.0]).unwrap();
        assert_eq!(pva.p()[2], Vector3::new(0.0, 0.0, 3.0));
        assert!(pva.v().iter().all(|v| *v == Vector3::new(0.0, 0.0, 2.0)));
        assert!(pva.a().iter().all(|a| *a == Vector3::zeros()));
    }

    #[test]
    fn constant_acceleration_ramps_the_rate() {
        let profile = MotionProfile::ConstantAcceleration {
            initial: Vector3::zeros(),
            rate: Vector3::new(1.0, 0.0, 0.0),
            acceleration: Vector3::new(2.0, 0.0, 0.0),
        };
        let pva = profile.sample(&[2.0]).unwrap();
        assert_eq!(pva.p()[0], Vector3::new(6.0, 0.0, 0.0));
        assert_eq!(pva.v()[0], Vector3::new(5.0, 0.0, 0.0));
        assert_eq!(pva.a()[0], Vector3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn sinusoid_derivatives_match_finite_differences() {
        let profile = MotionProfile::Sinusoid {
            amplitude: Vector3::new(0.1, 0.0, 0.3),
            frequency_hz: 2.0,
            phase: Vector3::new(0.0, 0.0, 0.5),
            offset: Vector3::new(0.0, 0.2, 0.0),
        };
        let h = 1e-6;
        let t = 0.37;
        let pva = profile.sample(&[t - h, t, t + h]).unwrap();

        let v_fd = (pva.p()[2] - pva.p()[0]) / (2.0 * h);
        let a_fd = (pva.v()[2] - pva.v()[0]) / (2.0 * h);
        assert_abs_diff_eq!(pva.v()[1], v_fd, epsilon = 1e-5);
        assert_abs_diff_eq!(pva.a()[1], a_fd, epsilon = 1e-4);
        assert_eq!(pva.p()[1].y, 0.2);
    }

    #[test]
    fn negative_frequency_is_flagged() {
        let profile = MotionProfile::Sinusoid {
            amplitude: Vector3::zeros(),
            frequency_hz: -1.0,
            phase: Vector3::zeros(),
            offset: Vector3::zeros(),
        };
        assert!(profile.check().is_some());
        assert!(MotionProfile::default().check().is_none());
    }

    #[test]
    fn rotation_frames_are_rotating() {
        let frame = MotionProfile::default().rotation_frame(&[0.0, 0.1]).unwrap();
        assert_eq!(frame.frame_type(), FrameType::Rotating);
        assert_eq!(frame.angular().len(), 2);
    }
}
