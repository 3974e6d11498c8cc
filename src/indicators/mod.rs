pub mod engine;
pub mod error;
pub mod validation;

pub mod momentum;
pub mod structure;
pub mod volatility;

pub use engine::{compute, last_pair};
pub use error::IndicatorError;
pub use validation::*;
