//! Platform packaging backends.

pub mod macos;
