//! # Domain Module
//!
//! Commands, records, the control rule and the invariants guarding them.

pub mod canonical;
pub mod command;
pub mod control;
pub mod effects;
pub mod entities;
pub mod errors;
pub mod invariants;

pub use command::*;
pub use control::*;
pub use effects::*;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
