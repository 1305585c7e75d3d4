//! # Adapters
//!
//! Port implementations and boundary codecs.

pub mod address_locks;
pub mod memory_state;
pub mod payload;

pub use address_locks::{AddressGuard, AddressLockTable};
pub use memory_state::InMemoryState;
pub use payload::{decode_payload, encode_payload};
