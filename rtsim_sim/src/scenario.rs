// rtsim_sim/src/scenario.rs

//! Turns a loaded [`ScenarioConfig`] into a ready-to-run testbed and its
//! per-axis inputs.

use rtsim_core::prelude::*;
use tracing::{debug, info};

use crate::config::{PoseConfig, ScenarioConfig};
use crate::error::{Result, ScenarioError};

/// A testbed together with the time base and per-axis inputs it runs on.
#[derive(Debug, Clone)]
pub struct Scenario {
    testbed: Testbed,
    time: Vec<f64>,
    misalignments: Vec<Frame>,
    rotations: Vec<Frame>,
}

impl Scenario {
    pub fn from_config(config: &ScenarioConfig) -> Result<Self> {
        let time = config.time.samples()?;

        let world = World::new(
            &config.world.name,
            config.world.semi_major_axis,
            config.world.inverse_flattening,
            config.world.rotation_rate,
        )?;
        let mount = Mount::new(config.mount.name_or("Mount"), fixed_frame(&config.mount.pose())?)?;
        let body = Body::new(config.body.name_or("Body"), fixed_frame(&config.body.pose())?)?;

        let mut axes = Vec::with_capacity(config.axes.len());
        let mut misalignments = Vec::with_capacity(config.axes.len());
        let mut rotations = Vec::with_capacity(config.axes.len());

        for axis in &config.axes {
            if let Some(reason) = axis.rotation.check() {
                return Err(ScenarioError::Profile {
                    axis: axis.name.to_string(),
                    reason,
                });
            }
            debug!(
                axis = %axis.name,
                profile = axis.rotation.get_type_str(),
                "building axis"
            );

            axes.push(Axis::new(axis.name.as_str(), fixed_frame(&axis.zero)?)?);
            misalignments.push(misalignment_frame(&axis.misalignment, time.len())?);
            rotations.push(axis.rotation.rotation_frame(&time)?);
        }

        let testbed = Testbed::new(
            config.testbed.name.as_str(),
            config.testbed.location,
            TestbedComponents {
                world,
                axes,
                mount,
                body,
            },
        )?;

        Ok(Self {
            testbed,
            time,
            misalignments,
            rotations,
        })
    }

    pub fn testbed(&self) -> &Testbed {
        &self.testbed
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn run(&mut self) -> Result<&TestbedOutputs> {
        info!(
            testbed = %self.testbed.moniker(),
            samples = self.time.len(),
            "Running scenario"
        );
        Ok(self
            .testbed
            .process(&self.time, &self.misalignments, &self.rotations)?)
    }
}

fn fixed_frame(pose: &PoseConfig) -> rtsim_core::error::Result<Frame> {
    Frame::fixed(pose.position, pose.orientation)
}

/// A constant pose repeated over `samples` steps, so it classifies as Full.
fn misalignment_frame(pose: &PoseConfig, samples: usize) -> rtsim_core::error::Result<Frame> {
    let linear = TimePva::repeat(&ConstantPva::at_rest(pose.position)?, samples)?;
    let angular = TimePva::repeat(&ConstantPva::at_rest(pose.orientation)?, samples)?;
    Ok(Frame::new(linear, angular))
}
