// rtsim_sim/src/config/mod.rs

//! Loading and validating scenario files from disk.

mod catalog;

pub mod structs;

use figment::{
    providers::{Format, Toml},
    Figment,
};
use std::path::Path;
use tracing::info;

use crate::error::{Result, ScenarioError};
pub use catalog::{discover_scenarios, ScenarioCatalog};
pub use structs::{AxisConfig, ComponentConfig, PoseConfig, ScenarioConfig, TimeConfig, WorldConfig};

/// Loads one scenario file.
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig> {
    // Figment treats a missing file as an empty source, so check first.
    if !path.is_file() {
        return Err(ScenarioError::NotFound(path.to_path_buf()));
    }
    info!("Loading scenario from: {:?}", path);

    Figment::new()
        .merge(Toml::file(path))
        .extract()
        .map_err(|e| ScenarioError::Load {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
}

/// Parses scenario text that did not come from a file.
pub fn parse_scenario(text: &str) -> Result<ScenarioConfig> {
    Ok(toml::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::MotionProfile;
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector3;
    use std::f64::consts::PI;

    const MINIMAL: &str = r#"
        [testbed]
        name = "Bench"
        location = { latitude_deg = 35.0, longitude_deg = -106.5, height_m = 1600.0, gravity = 9.79 }

        [time]
        stop = 1.0
        step = 0.25
    "#;

    #[test]
    fn minimal_scenario_uses_defaults() {
        let config = parse_scenario(MINIMAL).unwrap();
        assert_eq!(config.testbed.name.as_str(), "Bench");
        assert_eq!(config.world, WorldConfig::default());
        assert!(config.axes.is_empty());
        assert_eq!(config.mount, ComponentConfig::default());
        assert_eq!(config.time.samples().unwrap(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn axes_keep_their_file_order() {
        let text = format!(
            "{MINIMAL}\n{}",
            r#"
            [[axes]]
            name = "Inner"
            zero = { position = [0.0, 0.0, -0.0762], orientation = [0.0, 180.0, 0.0] }
            rotation = { type = "ConstantRate", rate = [0.0, 0.0, 90.0] }

            [[axes]]
            name = "Outer"
            "#
        );
        let config = parse_scenario(&text).unwrap();
        let names: Vec<_> = config.axes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Inner", "Outer"]);

        let inner = &config.axes[0];
        assert_abs_diff_eq!(inner.zero.orientation, Vector3::new(0.0, PI, 0.0), epsilon = 1e-15);
        assert_eq!(inner.rotation.get_type_str(), "ConstantRate");
        assert_eq!(config.axes[1].rotation, MotionProfile::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let text = format!("{MINIMAL}\n[world]\nname = \"Earth\"\nflattening = 0.003\n");
        assert!(matches!(parse_scenario(&text), Err(ScenarioError::Parse(_))));
    }

    #[test]
    fn out_of_range_location_fails_to_parse() {
        let text = MINIMAL.replace("latitude_deg = 35.0", "latitude_deg = 95.0");
        let err = parse_scenario(&text).unwrap_err();
        assert!(err.to_string().contains("latitude"), "{err}");
    }

    #[test]
    fn time_section_is_validated() {
        let bad_step = TimeConfig {
            start: 0.0,
            stop: 1.0,
            step: 0.0,
        };
        assert!(matches!(bad_step.samples(), Err(ScenarioError::Time(_))));

        let reversed = TimeConfig {
            start: 2.0,
            stop: 1.0,
            step: 0.1,
        };
        assert!(matches!(reversed.samples(), Err(ScenarioError::Time(_))));

        let single = TimeConfig {
            start: 3.0,
            stop: 3.0,
            step: 0.1,
        };
        assert_eq!(single.samples().unwrap(), vec![3.0]);

        let uneven = TimeConfig {
            start: 0.0,
            stop: 1.0,
            step: 0.3,
        };
        assert_eq!(uneven.samples().unwrap().len(), 4);
    }

    #[test]
    fn oversized_runs_are_refused_before_allocating() {
        let huge = TimeConfig {
            start: 0.0,
            stop: 1e12,
            step: 1e-6,
        };
        assert!(matches!(huge.samples(), Err(ScenarioError::Time(_))));

        // One sample past the cap.
        let just_over = TimeConfig {
            start: 0.0,
            stop: structs::MAX_SAMPLES as f64,
            step: 1.0,
        };
        assert!(matches!(just_over.samples(), Err(ScenarioError::Time(_))));
    }

    #[test]
    fn missing_files_are_reported() {
        let err = load_scenario(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ScenarioError::NotFound(_)));
    }
}
