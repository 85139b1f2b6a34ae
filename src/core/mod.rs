//! Core invoice types and the total-calculation engine.
//!
//! The engine is a pure function of (lines, regime, global discount,
//! deposit): it owns no state, never fails, and is recomputed in full on
//! every change.

mod compute;
mod currencies;
mod error;
mod numbering;
mod types;
mod validation;

pub use compute::*;
pub use currencies::*;
pub use error::*;
pub use numbering::*;
pub use types::*;
pub use validation::*;
