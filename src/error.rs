//! Error types for the command line surface.
//!
//! Pipeline failures live in [`crate::bundler::Error`]; this module wraps them
//! together with argument and environment problems detected by the CLI.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type returned by [`crate::cli::run`]
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Packaging pipeline errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// A build parameter is neither in the environment nor on the command line.
    ///
    /// `TARGET_BUILD_DIR` is only ever set by an Xcode build phase, so its
    /// absence means the tool was started by hand.
    #[error("{variable} is not set (pass {flag}). This tool must not be run outside of Xcode")]
    MissingEnvironment {
        /// Environment variable name
        variable: &'static str,
        /// Equivalent command line flag
        flag: &'static str,
    },

    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}
