//! Intersection Simulation Library
//!
//! A four-way signaled intersection simulation that can run on virtual
//! time or, with the `realtime` feature, on tokio timers.

pub mod simulation;

#[cfg(feature = "realtime")]
pub mod runner;
