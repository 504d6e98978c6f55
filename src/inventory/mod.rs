//! Inventory of one array
//!
//! [`factory::create`] reads the model out of the SID and returns a
//! [`Collector`] whose steps match that hardware generation.

pub mod collector;
pub mod factory;

pub use collector::{Collector, Generation, StepOutcome};
pub use factory::create;
