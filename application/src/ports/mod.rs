//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod analysis_gateway;
pub mod content_resolver;
pub mod conversation_logger;
