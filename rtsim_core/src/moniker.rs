// rtsim_core/src/moniker.rs

use crate::error::{Result, RtsimError};
use serde::Deserialize;
use std::fmt;

/// Longest moniker accepted, in characters.
pub const MAX_MONIKER_LEN: usize = 140;

/// The human-readable name carried by every testbed component.
///
/// Always non-empty and at most [`MAX_MONIKER_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Moniker(String);

impl Moniker {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let len = value.chars().count();
        if len == 0 {
            return Err(RtsimError::EmptyMoniker);
        }
        if len > MAX_MONIKER_LEN {
            return Err(RtsimError::MonikerTooLong {
                value,
                len,
                max: MAX_MONIKER_LEN,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Moniker {
    type Error = RtsimError;

    fn try_from(value: String) -> Result<Self> {
        Moniker::new(value)
    }
}

impl fmt::Display for Moniker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
