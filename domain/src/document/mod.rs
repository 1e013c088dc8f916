//! Document analysis domain.
//!
//! Value objects describing what the remote analysis service reports about an
//! uploaded document, and what it answers to questions about it.

pub mod value_objects;
