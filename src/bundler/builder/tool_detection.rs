//! External tool detection and availability checking.
//!
//! `pkgbuild` is needed for every component package; `pkgutil` only when a
//! legacy bundle package has to be reassembled from an expanded flat package.

use crate::bundler::{Error, Result, Settings};
use std::path::{Path, PathBuf};

/// Resolved locations of the packaging tools.
#[derive(Debug, Clone)]
pub struct Toolchain {
    pkgbuild: PathBuf,
    pkgutil: Option<PathBuf>,
}

impl Toolchain {
    /// Creates a toolchain from already resolved tool paths.
    pub fn new(pkgbuild: impl Into<PathBuf>, pkgutil: Option<PathBuf>) -> Self {
        Self {
            pkgbuild: pkgbuild.into(),
            pkgutil,
        }
    }

    /// Resolves the tools a run with these settings will invoke.
    ///
    /// `pkgutil` is only looked up when at least one legacy binary exists.
    pub fn detect(settings: &Settings) -> Result<Self> {
        let pkgbuild = resolve_tool(settings.pkgbuild())?;

        let needs_pkgutil = settings
            .modules()
            .iter()
            .any(|module| settings.legacy_binary_path(module).is_file());

        let pkgutil = if needs_pkgutil {
            Some(resolve_tool(settings.pkgutil())?)
        } else {
            log::debug!("No legacy binaries present - pkgutil not required");
            None
        };

        Ok(Self { pkgbuild, pkgutil })
    }

    /// Path of `pkgbuild`.
    pub fn pkgbuild(&self) -> &Path {
        &self.pkgbuild
    }

    /// Path of `pkgutil`.
    ///
    /// Errors if `pkgutil` was not resolved during detection.
    pub fn pkgutil(&self) -> Result<&Path> {
        self.pkgutil.as_deref().ok_or_else(|| {
            Error::GenericError("pkgutil was not resolved for this run".into())
        })
    }
}

/// Resolves a tool name through `PATH`, or validates an explicit path.
pub fn resolve_tool(tool: &Path) -> Result<PathBuf> {
    match which::which(tool) {
        Ok(path) => {
            log::debug!("Found {} at: {}", tool.display(), path.display());
            Ok(path)
        }
        Err(source) => Err(Error::ToolNotFound {
            tool: tool.display().to_string(),
            source,
        }),
    }
}
