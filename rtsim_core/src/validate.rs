// rtsim_core/src/validate.rs

//! Scalar and vector precondition checks shared by every component.
//!
//! Each check either returns the value unchanged or the matching
//! [`RtsimError`], so constructors and setters can chain them with `?`.

use crate::error::{Result, RtsimError};
use nalgebra::Vector3;

pub fn finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RtsimError::NotFinite { name, value })
    }
}

pub fn at_least(name: &'static str, value: f64, min: f64) -> Result<f64> {
    let value = finite(name, value)?;
    if value < min {
        return Err(RtsimError::BelowMinimum { name, value, min });
    }
    Ok(value)
}

pub fn greater_than(name: &'static str, value: f64, min: f64) -> Result<f64> {
    let value = finite(name, value)?;
    if value <= min {
        return Err(RtsimError::NotGreaterThan { name, value, min });
    }
    Ok(value)
}

pub fn in_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<f64> {
    let value = at_least(name, value, min)?;
    if value > max {
        return Err(RtsimError::AboveMaximum { name, value, max });
    }
    Ok(value)
}

pub fn vector(name: &'static str, value: &Vector3<f64>) -> Result<()> {
    if value.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(RtsimError::NonFiniteVector { name })
    }
}

/// Checks that a time-indexed series is non-empty, has `expected` samples
/// when given, and contains only finite vectors.
pub fn series(name: &'static str, value: &[Vector3<f64>], expected: Option<usize>) -> Result<()> {
    if value.is_empty() {
        return Err(RtsimError::EmptySeries { name });
    }
    if let Some(expected) = expected {
        if value.len() != expected {
            return Err(RtsimError::SeriesLength {
                name,
                expected,
                found: value.len(),
            });
        }
    }
    value.iter().try_for_each(|v| vector(name, v))
}

/// Resolves the common sample count of several series that broadcast
/// against each other: each length must be 1 or the largest length.
pub fn broadcast_len(lengths: &[(&'static str, usize)]) -> Result<usize> {
    let target = lengths.iter().map(|(_, len)| *len).max().unwrap_or(1);
    for &(name, len) in lengths {
        if len == 0 {
            return Err(RtsimError::EmptySeries { name });
        }
        if len != 1 && len != target {
            return Err(RtsimError::SampleCount {
                name,
                expected: target,
                found: len,
            });
        }
    }
    Ok(target.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_checks_report_the_violated_bound() {
        assert_eq!(in_range("lat", 45.0, -90.0, 90.0), Ok(45.0));
        assert!(matches!(
            in_range("lat", -90.1, -90.0, 90.0),
            Err(RtsimError::BelowMinimum { name: "lat", .. })
        ));
        assert!(matches!(
            in_range("lat", 90.1, -90.0, 90.0),
            Err(RtsimError::AboveMaximum { name: "lat", .. })
        ));
        assert!(matches!(
            at_least("g", f64::NAN, 0.0),
            Err(RtsimError::NotFinite { name: "g", .. })
        ));
        assert!(matches!(
            greater_than("a", 0.0, 0.0),
            Err(RtsimError::NotGreaterThan { name: "a", .. })
        ));
    }

    #[test]
    fn series_rejects_empty_and_mismatched_lengths() {
        let two = vec![Vector3::zeros(); 2];
        assert!(series("p", &two, Some(2)).is_ok());
        assert_eq!(
            series("p", &[], None),
            Err(RtsimError::EmptySeries { name: "p" })
        );
        assert_eq!(
            series("v", &two, Some(3)),
            Err(RtsimError::SeriesLength {
                name: "v",
                expected: 3,
                found: 2
            })
        );
        let bad = vec![Vector3::new(0.0, f64::INFINITY, 0.0)];
        assert_eq!(
            series("a", &bad, None),
            Err(RtsimError::NonFiniteVector { name: "a" })
        );
    }

    #[test]
    fn broadcast_len_accepts_singletons() {
        assert_eq!(broadcast_len(&[("mu", 5), ("alpha", 1), ("rho", 5)]), Ok(5));
        assert_eq!(broadcast_len(&[("alpha", 1), ("omega", 1)]), Ok(1));
        assert_eq!(
            broadcast_len(&[("mu", 5), ("rho", 4)]),
            Err(RtsimError::SampleCount {
                name: "rho",
                expected: 5,
                found: 4
            })
        );
    }
}
