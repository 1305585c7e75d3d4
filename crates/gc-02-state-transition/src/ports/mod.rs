//! # Ports
//!
//! Inbound handler API and outbound state-service traits.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
