// rtsim_sim/src/lib.rs

// Scenario runner around `rtsim_core`: loads testbed descriptions from TOML,
// drives the kinematic chain and reports the results.
pub mod cli;
pub mod config;
pub mod error;
pub mod profiles;
pub mod report;
pub mod scenario;
pub mod utils;
