// rtsim_core/src/error.rs

use crate::frame::FrameType;
use std::fmt;
use thiserror::Error;

/// Which per-axis input sequence a cardinality check was run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisInput {
    Misalignments,
    Rotations,
}

impl fmt::Display for AxisInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisInput::Misalignments => write!(f, "misalignment"),
            AxisInput::Rotations => write!(f, "rotation"),
        }
    }
}

/// Every way the kinematic engine can reject its input.
///
/// All variants are raised synchronously at construction or at the start of a
/// `process` call, before any caller-visible result is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RtsimError {
    // --- Shape errors ---
    #[error("expected `{name}` to have at least one time sample")]
    EmptySeries { name: &'static str },

    #[error("expected `{name}` to have {expected} samples, found {found}")]
    SeriesLength {
        name: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("expected `{name}` to have 1 or {expected} samples, found {found}")]
    SampleCount {
        name: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("expected every component of `{name}` to be finite")]
    NonFiniteVector { name: &'static str },

    // --- Frame category errors ---
    #[error("expected `{name}` to be a {expected} frame, found a {found} frame")]
    FrameType {
        name: &'static str,
        expected: FrameType,
        found: FrameType,
    },

    // --- Numeric range errors ---
    #[error("expected `{name}` to be a finite number, found {value}")]
    NotFinite { name: &'static str, value: f64 },

    #[error("expected `{name}` = {value} to be at least {min}")]
    BelowMinimum {
        name: &'static str,
        value: f64,
        min: f64,
    },

    #[error("expected `{name}` = {value} to be greater than {min}")]
    NotGreaterThan {
        name: &'static str,
        value: f64,
        min: f64,
    },

    #[error("expected `{name}` = {value} to be at most {max}")]
    AboveMaximum {
        name: &'static str,
        value: f64,
        max: f64,
    },

    // --- Cardinality errors ---
    #[error("expected {expected} {kind} frames (one per axis), found {found}")]
    AxisCount {
        kind: AxisInput,
        expected: usize,
        found: usize,
    },

    // --- String errors ---
    #[error("expected moniker to be a non-empty string")]
    EmptyMoniker,

    #[error("expected moniker '{value}' to be at most {max} characters, found {len}")]
    MonikerTooLong {
        value: String,
        len: usize,
        max: usize,
    },

    // --- Selection errors ---
    #[error("unknown {kind} '{value}'")]
    UnknownName { kind: &'static str, value: String },

    // --- Ordering errors ---
    #[error("world '{0}' has no frame yet; call `process` first")]
    WorldNotProcessed(String),
}

pub type Result<T> = std::result::Result<T, RtsimError>;
