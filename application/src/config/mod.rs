//! Application-level configuration.
//!
//! - [`ChatParams`]: parameters forwarded with every chat turn

mod chat_params;

pub use chat_params::{ChatParams, DEFAULT_TOP_K};
