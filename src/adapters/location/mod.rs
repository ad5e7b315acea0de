//! Location provider adapters.

pub mod configured;

pub use configured::ConfiguredLocation;
