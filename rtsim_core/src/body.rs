// rtsim_core/src/body.rs

use crate::error::Result;
use crate::frame::{Frame, FrameType};
use crate::moniker::Moniker;

/// The system under test, positioned and oriented relative to its mount.
#[derive(Debug, Clone)]
pub struct Body {
    moniker: Moniker,
    frame: Frame,
}

impl Body {
    /// `frame` must be Fixed.
    pub fn new(moniker: &str, frame: Frame) -> Result<Self> {
        let moniker = Moniker::new(moniker)?;
        frame.require("frame", FrameType::Fixed)?;
        Ok(Self { moniker, frame })
    }

    pub fn moniker(&self) -> &Moniker {
        &self.moniker
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Replaces the body's pose. A non-Fixed `frame` leaves it unchanged.
    pub fn set_frame(&mut self, frame: Frame) -> Result<()> {
        frame.require("frame", FrameType::Fixed)?;
        self.frame = frame;
        Ok(())
    }
}
