// rtsim_core/src/lib.rs

// Kinematic engine for rotary-table testbeds: frames, axes and the chain
// driver that turns commanded rotations into inertial and body motion.
pub mod axis;
pub mod body;
pub mod error;
pub mod frame;
pub mod geodetic;
pub mod moniker;
pub mod mount;
pub mod prelude;
pub mod pva;
pub mod testbed;
pub mod validate;
pub mod world;
