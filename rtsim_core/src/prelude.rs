// rtsim_core/src/prelude.rs

// --- Errors ---
pub use crate::error::{AxisInput, Result, RtsimError};

// --- Motion primitives ---
pub use crate::frame::{Frame, FrameType, MatrixSeries};
pub use crate::pva::{ConstantPva, Pva, TimePva, VectorSeries};

// --- Chain components ---
pub use crate::axis::{Axis, AxisStep};
pub use crate::body::Body;
pub use crate::geodetic::Geodetic;
pub use crate::mount::Mount;
pub use crate::testbed::{Motion, Quantity, Reference, Testbed, TestbedComponents, TestbedOutputs};
pub use crate::world::World;
