//! Signal classification, crossing detection and divergence checks.

pub mod classifier;
pub mod crossing;
pub mod divergence;

pub use classifier::*;
pub use crossing::*;
pub use divergence::*;
