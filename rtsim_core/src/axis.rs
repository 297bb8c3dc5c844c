// rtsim_core/src/axis.rs

use crate::error::Result;
use crate::frame::{Frame, FrameType, MatrixSeries};
use crate::moniker::Moniker;
use crate::pva::{Pva, TimePva, VectorSeries};
use crate::validate;
use nalgebra::Vector3;
use tracing::trace;

/// One rotational joint of the testbed's serial chain.
#[derive(Debug, Clone)]
pub struct Axis {
    moniker: Moniker,
    /// Zero frame, always Fixed.
    zeta: Frame,
}

/// Everything one `Axis::process` call produces.
///
/// The caller folds `orientation` into its running body-to-inertial matrix
/// instead of reading the misalignment and rotation back off the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisStep {
    /// Linear motion of the body point, expressed in this axis' parent.
    pub alpha: TimePva,
    /// Angular motion, expressed in this axis' parent. Position is always zero.
    pub omega: TimePva,
    /// `zeta.C * mu.C * rho.C` at every sample.
    pub orientation: MatrixSeries,
}

impl Axis {
    pub fn new(moniker: &str, zeta: Frame) -> Result<Self> {
        let moniker = Moniker::new(moniker)?;
        zeta.require("zeta", FrameType::Fixed)?;
        Ok(Self { moniker, zeta })
    }

    pub fn moniker(&self) -> &Moniker {
        &self.moniker
    }

    pub fn zeta(&self) -> &Frame {
        &self.zeta
    }

    pub fn set_moniker(&mut self, value: &str) -> Result<()> {
        self.moniker = Moniker::new(value)?;
        Ok(())
    }

    pub fn set_zeta(&mut self, zeta: Frame) -> Result<()> {
        zeta.require("zeta", FrameType::Fixed)?;
        self.zeta = zeta;
        Ok(())
    }

    /// Carries the linear (`alpha`) and angular (`omega`) motion inherited
    /// from the next link toward the body one link further toward the world.
    ///
    /// `mu` is the axis misalignment and must be a Full frame; `rho` is the
    /// commanded rotation and must be a Rotating frame. Every series involved
    /// must hold either one sample or the common sample count.
    pub fn process(&self, mu: &Frame, rho: &Frame, alpha: &Pva, omega: &Pva) -> Result<AxisStep> {
        mu.require("mu", FrameType::Full)?;
        rho.require("rho", FrameType::Rotating)?;

        let steps = validate::broadcast_len(&[
            ("mu.linear", mu.linear().len()),
            ("mu.angular", mu.angular().len()),
            ("rho.angular", rho.angular().len()),
            ("alpha", alpha.len()),
            ("omega", omega.len()),
        ])?;

        trace!(axis = %self.moniker, steps, "processing axis");

        let c_zeta = self.zeta.c().at(0);
        let p_zeta = self.zeta.linear().p_at(0);

        let mut lin_p = VectorSeries::with_capacity(steps);
        let mut lin_v = VectorSeries::with_capacity(steps);
        let mut lin_a = VectorSeries::with_capacity(steps);
        let mut ang_v = VectorSeries::with_capacity(steps);
        let mut ang_a = VectorSeries::with_capacity(steps);
        let mut orientation = Vec::with_capacity(steps);

        for i in 0..steps {
            // --- Rotation frame and its time derivatives ---
            let c_rho = rho.c().at(i);
            let omega_rho = rho.omega().at(i);
            let c_rho_dot = omega_rho * c_rho;
            let c_rho_ddot = rho.omega_dot().at(i) * c_rho + omega_rho * omega_rho * c_rho;

            // --- Linear branch ---
            let (p, v, a) = (alpha.p_at(i), alpha.v_at(i), alpha.a_at(i));

            lin_a.push(
                c_zeta
                    * (mu.linear().a_at(i)
                        + c_rho_ddot.transpose() * p
                        + 2.0 * c_rho_dot.transpose() * v
                        + c_rho * a),
            );
            lin_v.push(c_zeta * (mu.linear().v_at(i) + c_rho_dot.transpose() * p + c_rho * v));
            lin_p.push(p_zeta + c_zeta * (mu.linear().p_at(i) + c_rho * p));

            // --- Angular branch ---
            let c_mu = mu.c().at(i);
            let w_in = omega.v_at(i);
            let w_rho = rho.angular().v_at(i) + c_rho * w_in;
            let w_rho_dot = rho.angular().a_at(i) + omega_rho * c_rho * w_in + c_rho * omega.a_at(i);

            ang_v.push(c_zeta * (mu.angular().v_at(i) + c_mu * w_rho));
            ang_a.push(
                c_zeta * (mu.angular().a_at(i) + mu.omega().at(i) * c_mu * w_rho + c_mu * w_rho_dot),
            );

            orientation.push(c_zeta * c_mu * c_rho);
        }

        Ok(AxisStep {
            alpha: TimePva::new(lin_p, lin_v, lin_a)?,
            omega: TimePva::new(vec![Vector3::zeros(); steps], ang_v, ang_a)?,
            orientation: MatrixSeries::from_vec(orientation)?,
        })
    }
}
