// rtsim_core/src/pva.rs

//! Position / velocity / acceleration triples, either constant or sampled
//! over time.

use crate::error::Result;
use crate::validate;
use nalgebra::Vector3;

/// A time-indexed series of 3-vectors, one per sample.
pub type VectorSeries = Vec<Vector3<f64>>;

/// Reads sample `i` from a series that may hold a single broadcast sample.
#[inline]
pub(crate) fn sample(series: &[Vector3<f64>], i: usize) -> Vector3<f64> {
    if series.len() == 1 {
        series[0]
    } else {
        series[i]
    }
}

// =========================================================================
// == Constant PVA ==
// =========================================================================

/// A time-invariant position, velocity and acceleration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantPva {
    p: Vector3<f64>,
    v: Vector3<f64>,
    a: Vector3<f64>,
}

impl ConstantPva {
    pub fn new(p: Vector3<f64>, v: Vector3<f64>, a: Vector3<f64>) -> Result<Self> {
        validate::vector("p", &p)?;
        validate::vector("v", &v)?;
        validate::vector("a", &a)?;
        Ok(Self { p, v, a })
    }

    pub fn zeros() -> Self {
        Self {
            p: Vector3::zeros(),
            v: Vector3::zeros(),
            a: Vector3::zeros(),
        }
    }

    /// A stationary point (or orientation) at `p`.
    pub fn at_rest(p: Vector3<f64>) -> Result<Self> {
        Self::new(p, Vector3::zeros(), Vector3::zeros())
    }

    pub fn p(&self) -> &Vector3<f64> {
        &self.p
    }

    pub fn v(&self) -> &Vector3<f64> {
        &self.v
    }

    pub fn a(&self) -> &Vector3<f64> {
        &self.a
    }

    pub fn set_p(&mut self, value: Vector3<f64>) -> Result<()> {
        validate::vector("p", &value)?;
        self.p = value;
        Ok(())
    }

    pub fn set_v(&mut self, value: Vector3<f64>) -> Result<()> {
        validate::vector("v", &value)?;
        self.v = value;
        Ok(())
    }

    pub fn set_a(&mut self, value: Vector3<f64>) -> Result<()> {
        validate::vector("a", &value)?;
        self.a = value;
        Ok(())
    }
}

// =========================================================================
// == Time-varying PVA ==
// =========================================================================

/// A position, velocity and acceleration sampled at `T >= 1` time steps.
///
/// All three series always share the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct TimePva {
    p: VectorSeries,
    v: VectorSeries,
    a: VectorSeries,
}

impl TimePva {
    pub fn new(p: VectorSeries, v: VectorSeries, a: VectorSeries) -> Result<Self> {
        validate::series("p", &p, None)?;
        validate::series("v", &v, Some(p.len()))?;
        validate::series("a", &a, Some(p.len()))?;
        Ok(Self { p, v, a })
    }

    pub fn zeros(samples: usize) -> Result<Self> {
        let zeros = vec![Vector3::zeros(); samples];
        Self::new(zeros.clone(), zeros.clone(), zeros)
    }

    /// Repeats a constant triple over `samples` time steps.
    pub fn repeat(constant: &ConstantPva, samples: usize) -> Result<Self> {
        Self::new(
            vec![constant.p; samples],
            vec![constant.v; samples],
            vec![constant.a; samples],
        )
    }

    pub fn len(&self) -> usize {
        self.p.len()
    }

    pub fn is_empty(&self) -> bool {
        self.p.is_empty()
    }

    pub fn p(&self) -> &[Vector3<f64>] {
        &self.p
    }

    pub fn v(&self) -> &[Vector3<f64>] {
        &self.v
    }

    pub fn a(&self) -> &[Vector3<f64>] {
        &self.a
    }

    pub fn set_p(&mut self, value: VectorSeries) -> Result<()> {
        validate::series("p", &value, Some(self.len()))?;
        self.p = value;
        Ok(())
    }

    pub fn set_v(&mut self, value: VectorSeries) -> Result<()> {
        validate::series("v", &value, Some(self.len()))?;
        self.v = value;
        Ok(())
    }

    pub fn set_a(&mut self, value: VectorSeries) -> Result<()> {
        validate::series("a", &value, Some(self.len()))?;
        self.a = value;
        Ok(())
    }
}

// =========================================================================
// == Either variant ==
// =========================================================================

/// A PVA that is either constant or time-varying.
#[derive(Debug, Clone, PartialEq)]
pub enum Pva {
    Constant(ConstantPva),
    Time(TimePva),
}

impl Pva {
    pub fn is_time_varying(&self) -> bool {
        matches!(self, Pva::Time(_))
    }

    /// Number of stored samples; a constant PVA holds one.
    pub fn len(&self) -> usize {
        match self {
            Pva::Constant(_) => 1,
            Pva::Time(pva) => pva.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn p_series(&self) -> &[Vector3<f64>] {
        match self {
            Pva::Constant(pva) => std::slice::from_ref(&pva.p),
            Pva::Time(pva) => &pva.p,
        }
    }

    pub fn v_series(&self) -> &[Vector3<f64>] {
        match self {
            Pva::Constant(pva) => std::slice::from_ref(&pva.v),
            Pva::Time(pva) => &pva.v,
        }
    }

    pub fn a_series(&self) -> &[Vector3<f64>] {
        match self {
            Pva::Constant(pva) => std::slice::from_ref(&pva.a),
            Pva::Time(pva) => &pva.a,
        }
    }

    /// Position at sample `i`, broadcasting a single sample to every index.
    pub fn p_at(&self, i: usize) -> Vector3<f64> {
        sample(self.p_series(), i)
    }

    pub fn v_at(&self, i: usize) -> Vector3<f64> {
        sample(self.v_series(), i)
    }

    pub fn a_at(&self, i: usize) -> Vector3<f64> {
        sample(self.a_series(), i)
    }
}

impl From<ConstantPva> for Pva {
    fn from(value: ConstantPva) -> Self {
        Pva::Constant(value)
    }
}

impl From<TimePva> for Pva {
    fn from(value: TimePva) -> Self {
        Pva::Time(value)
    }
}
