//! Synthetic registry values
//!
//! Values come from two separate paths. [`ordinal`] is a pure function of
//! the record's position and reproduces exactly across runs. [`random`]
//! draws from a caller-supplied RNG and only has range guarantees.

pub mod ordinal;
pub mod random;
pub mod tables;

pub use ordinal::{Classification, OrdinalFields};
pub use random::{RandomFields, Share};
