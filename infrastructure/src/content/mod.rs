//! Document content adapters.
//!
//! Provides [`FileContentResolver`], the filesystem implementation of the
//! [`ContentResolver`](docchat_application::ContentResolver) port.

mod file_resolver;

pub use file_resolver::FileContentResolver;
