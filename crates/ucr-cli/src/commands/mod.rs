//! CLI command implementations.

pub mod common;
pub mod optimize;
pub mod paths;
pub mod synth;
pub mod topologies;
