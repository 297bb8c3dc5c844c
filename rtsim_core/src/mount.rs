// rtsim_core/src/mount.rs

use crate::error::Result;
use crate::frame::{Frame, FrameType};
use crate::moniker::Moniker;

/// The fixture that holds the system under test on the innermost axis.
#[derive(Debug, Clone)]
pub struct Mount {
    moniker: Moniker,
    frame: Frame,
}

impl Mount {
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

    pub fn set_frame(&mut self, frame: Frame) -> Result<()> {
        frame.require("frame", FrameType::Fixed)?;
        self.frame = frame;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RtsimError;
    use crate::pva::{ConstantPva, TimePva};
    use nalgebra::Vector3;

    #[test]
    fn accepts_only_fixed_frames() {
        let fixed = Frame::fixed(Vector3::new(0.0, 0.0, 0.0254), Vector3::zeros()).unwrap();
        let mut mount = Mount::new("Generic", fixed).unwrap();
        assert_eq!(mount.moniker().as_str(), "Generic");

        let rotating = Frame::new(ConstantPva::zeros(), TimePva::zeros(3).unwrap());
        assert!(matches!(
            Mount::new("Generic", rotating.clone()),
            Err(RtsimError::FrameType { name: "frame", found: FrameType::Rotating, .. })
        ));
        assert!(mount.set_frame(rotating).is_err());
        assert_eq!(mount.frame().linear().p_at(0), Vector3::new(0.0, 0.0, 0.0254));
    }
}
