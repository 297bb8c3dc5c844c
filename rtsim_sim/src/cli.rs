// rtsim_sim/src/cli.rs

use clap::Parser;
use rtsim_core::testbed::{Quantity, Reference};
use std::path::PathBuf;

/// RTSim: rotary-table testbed kinematics from scenario files.
///
/// Runs one scenario (or every scenario in a directory) and prints the
/// motion the system under test experiences.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(
        short,
        long,
        default_value = "assets/scenarios/sart_single_axis.toml"
    )]
    pub scenario: PathBuf,

    /// Run every scenario found under this directory instead.
    #[arg(long)]
    pub scenario_dir: Option<PathBuf>,

    /// Quantities to report (la, sf, av, aa or full names). Defaults to all.
    #[arg(short, long = "quantity", value_delimiter = ',')]
    pub quantities: Vec<Quantity>,

    /// Reference frames to report (inertial, body). Defaults to both.
    #[arg(short, long = "reference", value_delimiter = ',')]
    pub references: Vec<Reference>,

    /// Report linear quantities in units of local gravity.
    #[arg(long, default_value_t = false)]
    pub in_g: bool,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn selected_quantities(&self) -> Vec<Quantity> {
        if self.quantities.is_empty() {
            Quantity::ALL.to_vec()
        } else {
            self.quantities.clone()
        }
    }

    pub fn selected_references(&self) -> Vec<Reference> {
        if self.references.is_empty() {
            vec![Reference::Inertial, Reference::Body]
        } else {
            self.references.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_everything() {
        let cli = Cli::try_parse_from(["rtsim"]).unwrap();
        assert_eq!(cli.scenario, PathBuf::from("assets/scenarios/sart_single_axis.toml"));
        assert_eq!(cli.selected_quantities(), Quantity::ALL.to_vec());
        assert_eq!(cli.selected_references().len(), 2);
        assert!(!cli.in_g);
    }

    #[test]
    fn selections_accept_short_names_and_lists() {
        let cli = Cli::try_parse_from(["rtsim", "-q", "sf,av", "--reference", "body", "--in-g"])
            .unwrap();
        assert_eq!(
            cli.selected_quantities(),
            vec![Quantity::SpecificForce, Quantity::AngularVelocity]
        );
        assert_eq!(cli.selected_references(), vec![Reference::Body]);
        assert!(cli.in_g);

        assert!(Cli::try_parse_from(["rtsim", "-q", "jerk"]).is_err());
    }
}
