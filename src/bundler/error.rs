//! Error type for the packaging pipeline.
//!
//! Provides the [`Error`] enum, the [`bail!`](crate::bail) macro and two
//! extension traits used throughout the bundler:
//!
//! - [`Context`] attaches a message to a failing `Result` or an empty `Option`
//! - [`ErrorExt`] attaches the attempted action and the path to an I/O error

use std::fmt::Display;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while building payloads, packages and the final archive.
#[derive(Error, Debug)]
pub enum Error {
    /// Free-form failure message.
    #[error("{0}")]
    GenericError(String),

    /// An underlying error with a description of what was being attempted.
    #[error("{context}: {source}")]
    Context {
        /// What was being attempted
        context: String,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },

    /// Filesystem operation failed on a specific path.
    #[error("{action} {}: {source}", path.display())]
    Fs {
        /// Attempted action, e.g. "copying daemon binary"
        action: String,
        /// Path the action was applied to
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Raw I/O error without path information.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A required external tool could not be located.
    #[error("required tool `{tool}` not found: {source}")]
    ToolNotFound {
        /// Tool name or configured path
        tool: String,
        /// Lookup failure
        #[source]
        source: which::Error,
    },

    /// An external tool exited unsuccessfully.
    #[error("{tool} failed ({status}): {stderr}")]
    ToolFailed {
        /// Tool name
        tool: String,
        /// Exit status description
        status: String,
        /// Diagnostic output captured from the tool
        stderr: String,
    },

    /// Property list serialization failed.
    #[error("plist error: {0}")]
    Plist(#[from] plist::Error),

    /// Zip archive creation failed.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Directory traversal failed.
    #[error("directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// A traversed path was not below its root.
    #[error("path prefix error: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),
}

/// Returns early with an [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}

/// Attaches a human readable context message to a failure.
pub trait Context<T> {
    /// Wraps the failure with a fixed message.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Wraps the failure with a lazily built message.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> Context<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context {
            context: context.to_string(),
            source: Box::new(e.into()),
        })
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context {
            context: f().to_string(),
            source: Box::new(e.into()),
        })
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Attaches the attempted action and path to I/O failures.
pub trait ErrorExt<T> {
    /// Converts an I/O error into [`Error::Fs`].
    fn fs_context(self, action: &str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, action: &str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::Fs {
            action: action.to_string(),
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}
