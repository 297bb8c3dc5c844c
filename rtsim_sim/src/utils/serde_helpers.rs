// rtsim_sim/src/utils/serde_helpers.rs

pub mod vec3_f64_from_array {
    use nalgebra::Vector3;
    use serde::{self, Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vector3<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let arr: [f64; 3] = Deserialize::deserialize(deserializer)?;
        Ok(Vector3::from(arr))
    }
}

/// Angles (or angular rates) written in degrees, stored in radians.
pub mod vec3_rad_from_deg_array {
    use nalgebra::Vector3;
    use serde::{self, Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vector3<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let arr: [f64; 3] = Deserialize::deserialize(deserializer)?;
        Ok(Vector3::new(
            arr[0].to_radians(),
            arr[1].to_radians(),
            arr[2].to_radians(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector3;
    use serde::Deserialize;
    use std::f64::consts::PI;

    #[derive(Deserialize)]
    struct Pose {
        #[serde(with = "vec3_f64_from_array")]
        position: Vector3<f64>,
        #[serde(with = "vec3_rad_from_deg_array")]
        orientation: Vector3<f64>,
    }

    #[test]
    fn degrees_become_radians() {
        let pose: Pose =
            toml::from_str("position = [0.0, 0.0, 0.0254]\norientation = [0.0, 180.0, -90.0]")
                .unwrap();
        assert_eq!(pose.position, Vector3::new(0.0, 0.0, 0.0254));
        assert_abs_diff_eq!(pose.orientation, Vector3::new(0.0, PI, -PI / 2.0), epsilon = 1e-15);
    }

    #[test]
    fn short_arrays_are_rejected() {
        assert!(toml::from_str::<Pose>("position = [0.0, 0.0]\norientation = [0.0, 0.0, 0.0]").is_err());
    }
}
