//! Interactive chat module
//!
//! Provides a readline-based interactive session over an
//! [`ObservableSessionState`](docchat_application::ObservableSessionState).

mod command;
mod repl;

pub use command::ReplCommand;
pub use repl::ChatRepl;
