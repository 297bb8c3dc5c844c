// rtsim_core/src/frame.rs

use crate::error::{Result, RtsimError};
use crate::pva::{sample, ConstantPva, Pva, VectorSeries};
use crate::validate;
use nalgebra::{Matrix3, Vector3};
use std::fmt;

// =========================================================================
// == Frame classification ==
// =========================================================================

/// The kinematic category of a frame, set by which of its two PVAs vary
/// in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameType {
    /// Constant linear, constant angular.
    Fixed,
    /// Constant linear, time-varying angular.
    Rotating,
    /// Time-varying linear, constant angular.
    Translocating,
    /// Time-varying linear and angular.
    Full,
}

impl FrameType {
    // Indexed by [linear is time-varying][angular is time-varying].
    const TABLE: [[FrameType; 2]; 2] = [
        [FrameType::Fixed, FrameType::Rotating],
        [FrameType::Translocating, FrameType::Full],
    ];

    pub fn classify(linear: &Pva, angular: &Pva) -> Self {
        Self::TABLE[linear.is_time_varying() as usize][angular.is_time_varying() as usize]
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FrameType::Fixed => "Fixed",
            FrameType::Rotating => "Rotating",
            FrameType::Translocating => "Translocating",
            FrameType::Full => "Full",
        };
        f.write_str(label)
    }
}

// =========================================================================
// == Stacked 3x3 matrices ==
// =========================================================================

/// One 3x3 matrix per time sample.
///
/// Always stored stacked, even for a single sample. Callers that need the
/// bare matrix of a constant frame use [`MatrixSeries::squeeze`].
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixSeries(Vec<Matrix3<f64>>);

impl MatrixSeries {
    pub fn single(matrix: Matrix3<f64>) -> Self {
        Self(vec![matrix])
    }

    pub fn from_vec(matrices: Vec<Matrix3<f64>>) -> Result<Self> {
        if matrices.is_empty() {
            return Err(RtsimError::EmptySeries { name: "matrices" });
        }
        Ok(Self(matrices))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Matrix at sample `i`, broadcasting a single matrix to every index.
    #[inline]
    pub fn at(&self, i: usize) -> Matrix3<f64> {
        if self.0.len() == 1 {
            self.0[0]
        } else {
            self.0[i]
        }
    }

    /// The bare matrix if this series holds exactly one sample.
    pub fn squeeze(&self) -> Option<&Matrix3<f64>> {
        match self.0.as_slice() {
            [single] => Some(single),
            _ => None,
        }
    }

    pub fn as_slice(&self) -> &[Matrix3<f64>] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Matrix3<f64>> {
        self.0.iter()
    }

    pub fn transpose(&self) -> Self {
        Self(self.0.iter().map(|m| m.transpose()).collect())
    }

    pub(crate) fn transpose_in_place(&mut self) {
        self.0.iter_mut().for_each(|m| m.transpose_mut());
    }

    /// Per-sample product `self[i] * rhs[i]`, broadcasting single samples.
    pub fn compose(&self, rhs: &MatrixSeries) -> Result<Self> {
        let steps = validate::broadcast_len(&[("lhs", self.len()), ("rhs", rhs.len())])?;
        Ok(Self((0..steps).map(|i| self.at(i) * rhs.at(i)).collect()))
    }

    /// Per-sample product `self[i] * v[i]`, broadcasting single samples.
    pub fn apply(&self, v: &[Vector3<f64>]) -> Result<VectorSeries> {
        let steps = validate::broadcast_len(&[("matrices", self.len()), ("vectors", v.len())])?;
        Ok((0..steps).map(|i| self.at(i) * sample(v, i)).collect())
    }
}

// =========================================================================
// == Matrix helpers ==
// =========================================================================

/// Direction cosine matrix for a single orientation vector `(alpha, beta, gamma)`.
pub fn dcm(v: &Vector3<f64>) -> Matrix3<f64> {
    let (sin_alpha, cos_alpha) = v.x.sin_cos();
    let (sin_beta, cos_beta) = v.y.sin_cos();
    let (sin_gamma, cos_gamma) = v.z.sin_cos();

    Matrix3::new(
        cos_beta * cos_gamma,
        sin_alpha * sin_beta * cos_gamma - cos_alpha * sin_gamma,
        sin_alpha * sin_gamma + cos_alpha * sin_beta * cos_gamma,
        cos_beta * sin_gamma,
        sin_alpha * sin_beta * sin_gamma + cos_alpha * cos_gamma,
        -sin_alpha * cos_gamma + cos_alpha * sin_beta * sin_gamma,
        -sin_beta,
        sin_alpha * cos_beta,
        cos_alpha * cos_beta,
    )
}

/// Cross-product matrix of `v`, so that `skew(v) * x == v.cross(&x)`.
pub fn skew(v: &Vector3<f64>) -> Matrix3<f64> {
    let mut s = Matrix3::zeros();
    s[(0, 1)] = -v.z;
    s[(0, 2)] = v.y;
    s[(1, 0)] = v.z;
    s[(1, 2)] = -v.x;
    s[(2, 0)] = -v.y;
    s[(2, 1)] = v.x;
    s
}

/// Direction cosine matrices for every orientation sample.
pub fn orientation_to_dcm(v: &[Vector3<f64>]) -> MatrixSeries {
    MatrixSeries(v.iter().map(dcm).collect())
}

/// Skew-symmetric matrices for every vector sample.
pub fn skew_symmetric(v: &[Vector3<f64>]) -> MatrixSeries {
    MatrixSeries(v.iter().map(skew).collect())
}

// =========================================================================
// == Frame ==
// =========================================================================

/// A coordinate frame described by a linear PVA and an angular PVA.
///
/// The orientation matrix `C`, angular-rate matrix `Omega` and
/// angular-acceleration matrix `Omega_dot` are derived once here.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    linear: Pva,
    angular: Pva,
    frame_type: FrameType,
    c: MatrixSeries,
    omega: MatrixSeries,
    omega_dot: MatrixSeries,
}

impl Frame {
    pub fn new(linear: impl Into<Pva>, angular: impl Into<Pva>) -> Self {
        let linear = linear.into();
        let angular = angular.into();
        let frame_type = FrameType::classify(&linear, &angular);

        let c = orientation_to_dcm(angular.p_series());
        let omega = skew_symmetric(angular.v_series());
        let omega_dot = skew_symmetric(angular.a_series());

        Self {
            linear,
            angular,
            frame_type,
            c,
            omega,
            omega_dot,
        }
    }

    /// A Fixed frame at `position` with orientation angles `orientation` (rad).
    pub fn fixed(position: Vector3<f64>, orientation: Vector3<f64>) -> Result<Self> {
        Ok(Self::new(
            ConstantPva::at_rest(position)?,
            ConstantPva::at_rest(orientation)?,
        ))
    }

    /// A Fixed frame at the origin with identity orientation.
    pub fn identity() -> Self {
        Self::new(ConstantPva::zeros(), ConstantPva::zeros())
    }

    pub fn linear(&self) -> &Pva {
        &self.linear
    }

    pub fn angular(&self) -> &Pva {
        &self.angular
    }

    pub fn frame_type(&self) -> FrameType {
        self.frame_type
    }

    /// Orientation (direction cosine) matrices.
    pub fn c(&self) -> &MatrixSeries {
        &self.c
    }

    /// Skew-symmetric angular velocity matrices.
    pub fn omega(&self) -> &MatrixSeries {
        &self.omega
    }

    /// Skew-symmetric angular acceleration matrices.
    pub fn omega_dot(&self) -> &MatrixSeries {
        &self.omega_dot
    }

    /// Returns `self` if it is of the `expected` category, otherwise an error
    /// naming the argument it was passed as.
    pub fn require(&self, name: &'static str, expected: FrameType) -> Result<&Self> {
        if self.frame_type != expected {
            return Err(RtsimError::FrameType {
                name,
                expected,
                found: self.frame_type,
            });
        }
        Ok(self)
    }

    // Only the world uses this, to flip its generic DCM into the
    // inertial-to-world convention.
    pub(crate) fn transpose_orientation(&mut self) {
        self.c.transpose_in_place();
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Coordinate Frame", self.frame_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pva::TimePva;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, TAU};

    fn time_pva(samples: usize) -> TimePva {
        TimePva::zeros(samples).unwrap()
    }

    #[test]
    fn frame_type_follows_the_pva_variants() {
        let cases = [
            (Frame::new(ConstantPva::zeros(), ConstantPva::zeros()), FrameType::Fixed),
            (Frame::new(ConstantPva::zeros(), time_pva(5)), FrameType::Rotating),
            (Frame::new(time_pva(5), ConstantPva::zeros()), FrameType::Translocating),
            (Frame::new(time_pva(5), time_pva(5)), FrameType::Full),
        ];
        for (frame, expected) in cases {
            assert_eq!(frame.frame_type(), expected);
            assert_eq!(frame.to_string(), format!("{expected} Coordinate Frame"));
        }
    }

    #[test]
    fn require_names_the_offending_argument() {
        let rotating = Frame::new(ConstantPva::zeros(), time_pva(2));
        assert!(rotating.require("rho", FrameType::Rotating).is_ok());
        assert_eq!(
            rotating.require("mu", FrameType::Full),
            Err(RtsimError::FrameType {
                name: "mu",
                expected: FrameType::Full,
                found: FrameType::Rotating,
            })
        );
    }

    #[test]
    fn zero_orientation_is_identity_and_zero_rate_is_zero() {
        assert_eq!(dcm(&Vector3::zeros()), Matrix3::identity());
        assert_eq!(skew(&Vector3::zeros()), Matrix3::zeros());

        let frame = Frame::identity();
        assert_eq!(frame.c().squeeze(), Some(&Matrix3::identity()));
        assert_eq!(frame.omega().squeeze(), Some(&Matrix3::zeros()));
        assert_eq!(frame.omega_dot().squeeze(), Some(&Matrix3::zeros()));
    }

    #[test]
    fn single_sample_squeezes_and_stacks_do_not() {
        let one = orientation_to_dcm(&[Vector3::new(0.1, 0.2, 0.3)]);
        assert_eq!(one.len(), 1);
        assert!(one.squeeze().is_some());

        let many = skew_symmetric(&vec![Vector3::new(1.0, 2.0, 3.0); 7]);
        assert_eq!(many.len(), 7);
        assert!(many.squeeze().is_none());
    }

    #[test]
    fn dcm_is_orthonormal_for_arbitrary_angles() {
        let angles: Vec<Vector3<f64>> = (0..50)
            .map(|i| {
                let t = i as f64 * 0.37;
                Vector3::new(t.sin() * TAU, (1.3 * t).cos() * TAU, t * 2.1 - 7.0)
            })
            .collect();
        for c in orientation_to_dcm(&angles).iter() {
            assert_abs_diff_eq!(c.transpose() * c, Matrix3::identity(), epsilon = 1e-12);
            assert_abs_diff_eq!(c.determinant(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn dcm_matches_elementary_rotations() {
        // A quarter turn about z maps x onto y.
        let c = dcm(&Vector3::new(0.0, 0.0, FRAC_PI_2));
        assert_abs_diff_eq!(c * Vector3::x(), Vector3::y(), epsilon = 1e-15);

        // Elements follow the documented layout.
        let v = Vector3::new(0.3, -0.4, 1.1);
        let c = dcm(&v);
        assert_abs_diff_eq!(c[(2, 0)], -(v.y.sin()), epsilon = 1e-15);
        assert_abs_diff_eq!(c[(2, 1)], v.x.sin() * v.y.cos(), epsilon = 1e-15);
        assert_abs_diff_eq!(c[(0, 0)], v.y.cos() * v.z.cos(), epsilon = 1e-15);
    }

    #[test]
    fn skew_matrix_is_the_cross_product() {
        let v = Vector3::new(1.0, -2.0, 0.5);
        let x = Vector3::new(0.3, 4.0, -1.0);
        assert_abs_diff_eq!(skew(&v) * x, v.cross(&x), epsilon = 1e-15);
        assert_eq!(skew(&v).transpose(), -skew(&v));
    }

    #[test]
    fn compose_and_apply_broadcast_single_samples() {
        let stack = orientation_to_dcm(&[
            Vector3::new(0.0, 0.0, 0.1),
            Vector3::new(0.0, 0.0, 0.2),
            Vector3::new(0.0, 0.0, 0.3),
        ]);
        let single = MatrixSeries::single(Matrix3::identity() * 2.0);

        let product = single.compose(&stack).unwrap();
        assert_eq!(product.len(), 3);
        assert_eq!(product.at(2), stack.at(2) * 2.0);

        let rotated = stack.apply(&[Vector3::x()]).unwrap();
        assert_eq!(rotated.len(), 3);
        assert_abs_diff_eq!(rotated[1], stack.at(1) * Vector3::x(), epsilon = 1e-15);

        let short = MatrixSeries::from_vec(vec![Matrix3::identity(); 2]).unwrap();
        assert!(short.compose(&stack).is_err());
    }

    #[test]
    fn transpose_in_place_flips_every_sample() {
        let mut frame = Frame::new(
            ConstantPva::zeros(),
            TimePva::new(
                vec![Vector3::new(0.0, 0.0, 0.5), Vector3::new(0.0, 0.0, 1.0)],
                vec![Vector3::zeros(); 2],
                vec![Vector3::zeros(); 2],
            )
            .unwrap(),
        );
        let before = frame.c().clone();
        frame.transpose_orientation();
        assert_eq!(frame.c(), &before.transpose());
    }
}
