//! Installer packager for the MacHyperVSupport userspace daemons.
//!
//! Builds the `MacHyperVSupportTools` multi-package installer from an Xcode
//! build directory:
//! - one flat component package per daemon
//! - bundle-style packages for Mac OS X 10.4 where a legacy build exists
//! - a zipped `.mpkg` with a distribution descriptor tying them together
//!
//! It can be used both as a CLI tool (an Xcode build phase) and as a library.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
