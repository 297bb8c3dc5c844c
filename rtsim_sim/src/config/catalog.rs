// rtsim_sim/src/config/catalog.rs

//! Discovers every scenario file under a directory.

use figment::{
    providers::{Format, Toml},
    Figment,
};
use std::{collections::BTreeMap, path::Path};
use tracing::{error, info, warn};
use walkdir::WalkDir;

use super::structs::ScenarioConfig;
use crate::error::{Result, ScenarioError};

/// Every scenario that loaded successfully, keyed by its path relative to
/// the search root with separators replaced by dots
/// (e.g. "bench.sart_single_axis").
#[derive(Default, Debug)]
pub struct ScenarioCatalog(pub BTreeMap<String, ScenarioConfig>);

impl ScenarioCatalog {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Walks `root` and parses every `.toml` file as a scenario.
///
/// Files that fail to parse are logged and skipped.
pub fn discover_scenarios(root: &Path) -> Result<ScenarioCatalog> {
    if !root.is_dir() {
        return Err(ScenarioError::MissingDirectory(root.to_path_buf()));
    }

    info!("Discovering scenarios in: {:?}", root);
    let mut catalog = ScenarioCatalog::default();

    for entry in WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|e| {
            !e.file_type().is_dir() && e.path().extension().is_some_and(|ext| ext == "toml")
        })
    {
        let path = entry.path();
        let Ok(relative) = path.strip_prefix(root) else {
            warn!("Skipping {:?}: outside of {:?}", path, root);
            continue;
        };
        let key = relative
            .with_extension("")
            .to_string_lossy()
            .replace(std::path::MAIN_SEPARATOR, ".");

        match Figment::new().merge(Toml::file(path)).extract::<ScenarioConfig>() {
            Ok(config) => {
                info!("Loaded scenario: '{}'", key);
                catalog.0.insert(key, config);
            }
            Err(e) => {
                error!("Failed to load scenario from {:?}: {}", path, e);
            }
        }
    }

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn assets() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../assets/scenarios")
    }

    #[test]
    fn bundled_scenarios_are_discovered() {
        let catalog = discover_scenarios(&assets()).unwrap();
        assert!(catalog.0.contains_key("sart_single_axis"));
        assert!(catalog.0.contains_key("two_axis_sinusoid"));
    }

    #[test]
    fn missing_directory_is_an_error() {
        assert!(matches!(
            discover_scenarios(Path::new("no/such/dir")),
            Err(ScenarioError::MissingDirectory(_))
        ));
    }
}
