//! Market structure descriptors: trailing price range

pub mod range;

pub use range::*;
