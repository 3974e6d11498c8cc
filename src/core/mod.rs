//! Core application primitives (orchestration)

pub mod monitor;

pub use monitor::*;
