//! # Domain Module
//!
//! Address value object and the deriver that produces it.

pub mod deriver;
pub mod value_objects;

pub use deriver::*;
pub use value_objects::*;
