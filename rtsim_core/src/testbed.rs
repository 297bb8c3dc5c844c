// rtsim_core/src/testbed.rs

use crate::axis::Axis;
use crate::body::Body;
use crate::error::{AxisInput, Result, RtsimError};
use crate::frame::{Frame, MatrixSeries};
use crate::geodetic::{navigation_frame, Geodetic};
use crate::moniker::Moniker;
use crate::mount::Mount;
use crate::pva::{ConstantPva, Pva, VectorSeries};
use crate::world::World;
use nalgebra::Vector3;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

// =========================================================================
// == Result selection ==
// =========================================================================

/// One of the four motion quantities a testbed run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    LinearAcceleration,
    SpecificForce,
    AngularVelocity,
    AngularAcceleration,
}

impl Quantity {
    pub const ALL: [Quantity; 4] = [
        Quantity::LinearAcceleration,
        Quantity::SpecificForce,
        Quantity::AngularVelocity,
        Quantity::AngularAcceleration,
    ];

    /// True for the quantities measured in m/s^2.
    pub fn is_linear(self) -> bool {
        matches!(self, Quantity::LinearAcceleration | Quantity::SpecificForce)
    }

    /// SI unit symbol of the unscaled series.
    pub fn unit(self) -> &'static str {
        match self {
            Quantity::LinearAcceleration | Quantity::SpecificForce => "m/s^2",
            Quantity::AngularVelocity => "rad/s",
            Quantity::AngularAcceleration => "rad/s^2",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Quantity::LinearAcceleration => "linear_acceleration",
            Quantity::SpecificForce => "specific_force",
            Quantity::AngularVelocity => "angular_velocity",
            Quantity::AngularAcceleration => "angular_acceleration",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quantity {
    type Err = RtsimError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().replace('-', "_").to_ascii_lowercase();
        let short = match wanted.as_str() {
            "la" => Some(Quantity::LinearAcceleration),
            "sf" => Some(Quantity::SpecificForce),
            "av" => Some(Quantity::AngularVelocity),
            "aa" => Some(Quantity::AngularAcceleration),
            _ => None,
        };
        short
            .or_else(|| Quantity::ALL.into_iter().find(|q| q.as_str() == wanted))
            .ok_or_else(|| RtsimError::UnknownName {
                kind: "quantity",
                value: s.to_string(),
            })
    }
}

/// The frame a result series is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reference {
    Inertial,
    Body,
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Inertial => f.write_str("inertial"),
            Reference::Body => f.write_str("body"),
        }
    }
}

impl FromStr for Reference {
    type Err = RtsimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inertial" | "i" => Ok(Reference::Inertial),
            "body" | "b" => Ok(Reference::Body),
            _ => Err(RtsimError::UnknownName {
                kind: "reference frame",
                value: s.to_string(),
            }),
        }
    }
}

// =========================================================================
// == Outputs ==
// =========================================================================

/// The four derived motion series, all expressed in one reference frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Motion {
    pub angular_acceleration: VectorSeries,
    pub angular_velocity: VectorSeries,
    pub linear_acceleration: VectorSeries,
    pub specific_force: VectorSeries,
}

impl Motion {
    pub fn get(&self, quantity: Quantity) -> &[Vector3<f64>] {
        match quantity {
            Quantity::LinearAcceleration => &self.linear_acceleration,
            Quantity::SpecificForce => &self.specific_force,
            Quantity::AngularVelocity => &self.angular_velocity,
            Quantity::AngularAcceleration => &self.angular_acceleration,
        }
    }

    fn with_capacity(steps: usize) -> Self {
        Self {
            angular_acceleration: VectorSeries::with_capacity(steps),
            angular_velocity: VectorSeries::with_capacity(steps),
            linear_acceleration: VectorSeries::with_capacity(steps),
            specific_force: VectorSeries::with_capacity(steps),
        }
    }

    fn push(
        &mut self,
        angular_acceleration: Vector3<f64>,
        angular_velocity: Vector3<f64>,
        linear_acceleration: Vector3<f64>,
        specific_force: Vector3<f64>,
    ) {
        self.angular_acceleration.push(angular_acceleration);
        self.angular_velocity.push(angular_velocity);
        self.linear_acceleration.push(linear_acceleration);
        self.specific_force.push(specific_force);
    }

    fn rotated(&self, c: &MatrixSeries) -> Result<Self> {
        Ok(Self {
            angular_acceleration: c.apply(&self.angular_acceleration)?,
            angular_velocity: c.apply(&self.angular_velocity)?,
            linear_acceleration: c.apply(&self.linear_acceleration)?,
            specific_force: c.apply(&self.specific_force)?,
        })
    }
}

/// Everything one successful `Testbed::process` call produces.
///
/// Every series holds exactly one sample per entry of `time`.
#[derive(Debug, Clone, PartialEq)]
pub struct TestbedOutputs {
    pub time: Vec<f64>,
    /// Body-to-inertial orientation `Cib` at every sample.
    pub body_to_inertial: MatrixSeries,
    pub inertial: Motion,
    pub body: Motion,
    /// Local gravity used for the specific force, m/s^2.
    pub gravity: f64,
}

impl TestbedOutputs {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn motion(&self, reference: Reference) -> &Motion {
        match reference {
            Reference::Inertial => &self.inertial,
            Reference::Body => &self.body,
        }
    }

    pub fn series(&self, quantity: Quantity, reference: Reference) -> &[Vector3<f64>] {
        self.motion(reference).get(quantity)
    }

    /// A linear series divided by local gravity.
    ///
    /// `None` for angular quantities, or when gravity is zero.
    pub fn series_in_g(&self, quantity: Quantity, reference: Reference) -> Option<VectorSeries> {
        if !quantity.is_linear() || self.gravity == 0.0 {
            return None;
        }
        Some(
            self.series(quantity, reference)
                .iter()
                .map(|v| v / self.gravity)
                .collect(),
        )
    }
}

// =========================================================================
// == Testbed ==
// =========================================================================

/// The components a testbed is assembled from.
///
/// `axes` is ordered from the body outward to the world.
#[derive(Debug, Clone)]
pub struct TestbedComponents {
    pub world: World,
    pub axes: Vec<Axis>,
    pub mount: Mount,
    pub body: Body,
}

#[derive(Debug, Clone)]
pub struct Testbed {
    moniker: Moniker,
    location: Geodetic,
    world: World,
    axes: Vec<Axis>,
    mount: Mount,
    body: Body,
    /// Local-level frame, rebuilt whenever the location or world changes.
    nav: Frame,
    outputs: Option<TestbedOutputs>,
}

impl Testbed {
    pub fn new(moniker: &str, location: Geodetic, components: TestbedComponents) -> Result<Self> {
        let moniker = Moniker::new(moniker)?;
        let TestbedComponents {
            world,
            axes,
            mount,
            body,
        } = components;
        let nav = navigation_frame(&world, &location)?;

        debug!(
            testbed = %moniker,
            axes = axes.len(),
            latitude = location.latitude(),
            longitude = location.longitude(),
            "assembled testbed"
        );

        Ok(Self {
            moniker,
            location,
            world,
            axes,
            mount,
            body,
            nav,
            outputs: None,
        })
    }

    pub fn moniker(&self) -> &Moniker {
        &self.moniker
    }

    pub fn location(&self) -> &Geodetic {
        &self.location
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn navigation_frame(&self) -> &Frame {
        &self.nav
    }

    /// Results of the last successful `process` call.
    pub fn outputs(&self) -> Option<&TestbedOutputs> {
        self.outputs.as_ref()
    }

    pub fn set_moniker(&mut self, value: &str) -> Result<()> {
        self.moniker = Moniker::new(value)?;
        Ok(())
    }

    pub fn set_location(&mut self, location: Geodetic) -> Result<()> {
        self.nav = navigation_frame(&self.world, &location)?;
        self.location = location;
        Ok(())
    }

    pub fn set_world(&mut self, world: World) -> Result<()> {
        self.nav = navigation_frame(&world, &self.location)?;
        self.world = world;
        Ok(())
    }

    /// Drives the chain over `time` (s) and stores the resulting motion.
    ///
    /// `misalignments[i]` and `rotations[i]` belong to `axes()[i]`. Each of
    /// their series must hold one sample or `time.len()` samples.
    pub fn process(
        &mut self,
        time: &[f64],
        misalignments: &[Frame],
        rotations: &[Frame],
    ) -> Result<&TestbedOutputs> {
        check_axis_count(AxisInput::Misalignments, self.axes.len(), misalignments.len())?;
        check_axis_count(AxisInput::Rotations, self.axes.len(), rotations.len())?;

        let mut world = self.world.clone();
        world.process(time)?;
        let steps = time.len();

        for (mu, rho) in misalignments.iter().zip(rotations) {
            check_samples("misalignments", mu.linear().len(), steps)?;
            check_samples("misalignments", mu.angular().len(), steps)?;
            check_samples("rotations", rho.angular().len(), steps)?;
        }

        info!(testbed = %self.moniker, steps, axes = self.axes.len(), "processing testbed");

        // --- Body outward to the last axis ---
        let mount_c = self.mount.frame().c().at(0);
        let mut alpha: Pva = ConstantPva::at_rest(
            self.mount.frame().linear().p_at(0) + mount_c * self.body.frame().linear().p_at(0),
        )?
        .into();
        let mut omega: Pva = ConstantPva::zeros().into();
        let mut cib = MatrixSeries::single(mount_c * self.body.frame().c().at(0));

        for ((axis, mu), rho) in self.axes.iter().zip(misalignments).zip(rotations) {
            let step = axis.process(mu, rho, &alpha, &omega)?;
            cib = step.orientation.compose(&cib)?;
            alpha = step.alpha.into();
            omega = step.omega.into();
        }

        // --- Into the inertial frame ---
        let world_frame = world.require_frame()?;
        let c_nav = self.nav.c().at(0);
        let p_nav = self.nav.linear().p_at(0);
        let gravity = Vector3::new(0.0, 0.0, -self.location.gravity());

        let c_in = world_frame.c().compose(&MatrixSeries::single(c_nav))?;
        let cib = c_in.compose(&cib)?;

        let mut inertial = Motion::with_capacity(steps);
        for i in 0..steps {
            let c_w = world_frame.c().at(i);
            let omega_w = world_frame.omega().at(i);
            let c_in = c_in.at(i);

            let aaiib = omega_w * c_in * omega.v_at(i) + c_in * omega.a_at(i);
            let aviib = world_frame.angular().v_at(i) + c_in * omega.v_at(i);
            let laiib = omega_w * omega_w * c_w * p_nav
                + omega_w * omega_w * c_in * alpha.p_at(i)
                + 2.0 * omega_w * c_in * alpha.v_at(i)
                + c_in * alpha.a_at(i);
            let sfiib = laiib + c_in * gravity;

            inertial.push(aaiib, aviib, laiib, sfiib);
        }

        let body = inertial.rotated(&cib.transpose())?;

        self.world = world;
        let outputs = self.outputs.insert(TestbedOutputs {
            time: time.to_vec(),
            body_to_inertial: cib,
            inertial,
            body,
            gravity: self.location.gravity(),
        });
        Ok(&*outputs)
    }
}

fn check_axis_count(kind: AxisInput, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(RtsimError::AxisCount {
            kind,
            expected,
            found,
        });
    }
    Ok(())
}

fn check_samples(name: &'static str, found: usize, expected: usize) -> Result<()> {
    if found != 1 && found != expected {
        return Err(RtsimError::SampleCount {
            name,
            expected,
            found,
        });
    }
    Ok(())
}
