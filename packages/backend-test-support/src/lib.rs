//! Test support utilities for the bunker backend.
//!
//! Unified logging initialization for integration tests plus helpers for
//! asserting the problem+json error contract without depending on backend
//! types.

pub mod logging;
pub mod problem_details;
