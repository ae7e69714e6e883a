//! Shared data model for Parlance lexicon content.

pub mod defs;
pub mod validate;

pub use defs::*;
pub use validate::{ValidationError, validate_lexicon};
