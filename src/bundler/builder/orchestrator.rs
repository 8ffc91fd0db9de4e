//! Main packaging orchestration.
//!
//! This module provides the [`Bundler`] that runs the full pipeline, from
//! daemon binaries to the zipped installer.

use crate::bundler::{
    InstallerArtifact, Result, Settings,
    error::ErrorExt,
    platform::macos::{self, pkg::ModuleComponents},
    utils::fs,
};

use super::{checksum::calculate_sha256, tool_detection::Toolchain};

/// Main packaging orchestrator.
///
/// Packages every configured daemon module, assembles the multi-package
/// installer and compresses it. Any failure aborts the run; nothing is
/// retried.
///
/// # Examples
///
/// ```no_run
/// use hvtools_bundler::bundler::{Bundler, Settings};
///
/// # async fn example(settings: Settings) -> hvtools_bundler::bundler::Result<()> {
/// let bundler = Bundler::new(settings)?;
/// let artifact = bundler.bundle().await?;
/// println!("SHA256: {}", artifact.checksum);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler {
    settings: Settings,
    toolchain: Toolchain,
}

impl Bundler {
    /// Creates a bundler, resolving the packaging tools up front.
    ///
    /// Fails if `pkgbuild` cannot be found, or if `pkgutil` cannot be found
    /// while a legacy binary is present.
    pub fn new(settings: Settings) -> Result<Self> {
        let toolchain = Toolchain::detect(&settings)?;
        Ok(Self::with_toolchain(settings, toolchain))
    }

    /// Creates a bundler with an already resolved toolchain.
    pub fn with_toolchain(settings: Settings, toolchain: Toolchain) -> Self {
        Self {
            settings,
            toolchain,
        }
    }

    /// Runs the packaging pipeline.
    ///
    /// # Process
    /// 1. Recreate the scratch directory `<build>/pkg_build`
    /// 2. Build the component packages of every module, in order
    /// 3. Assemble the `.mpkg` bundle
    /// 4. Zip it next to the build products
    /// 5. Measure and checksum the archive
    pub async fn bundle(&self) -> Result<InstallerArtifact> {
        let scratch = self.settings.pkg_build_directory();
        log::info!("Preparing scratch directory {}", scratch.display());
        fs::create_dir_all(&scratch, true).await?;

        let mut components: Vec<ModuleComponents> = Vec::new();
        for module in self.settings.modules() {
            components.push(macos::package_module(&self.settings, &self.toolchain, module).await?);
        }

        let mpkg_path = macos::mpkg::assemble_mpkg(&self.settings, &components).await?;
        let archive_path =
            macos::archive::compress_mpkg(&mpkg_path, &self.settings.archive_path()).await?;

        let size = tokio::fs::metadata(&archive_path)
            .await
            .fs_context("reading artifact metadata", &archive_path)?
            .len();
        let checksum = calculate_sha256(&archive_path).await?;

        Ok(InstallerArtifact {
            archive_path,
            mpkg_path,
            size,
            checksum,
            components: components
                .iter()
                .flat_map(ModuleComponents::packages)
                .map(|package| package.identifier.clone())
                .collect(),
        })
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the resolved packaging tools.
    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }
}
