//! # Integration Flows
//!
//! Exercises the processor end to end against the in-memory state service.

pub mod concurrency;
pub mod flows;
