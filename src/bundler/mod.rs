//! Installer packaging for the MacHyperVSupport userspace daemons.
//!
//! Turns the daemon binaries of an Xcode build into a single zipped
//! multi-package installer (`.mpkg`) offering one choice per daemon, with
//! separate Mac OS X 10.4 packages where a legacy build exists.
//!
//! # Pipeline
//!
//! | Stage | Output |
//! |-------|--------|
//! | Payload | `<build>/pkg_build/<Name>/Library/...` |
//! | Component package | `<build>/pkg_build/<Name>.pkg` (flat) or `<Name>Tiger.pkg/` (bundle) |
//! | Multi-package | `<build>/pkg_build/MacHyperVSupportTools-<version>-<config>.mpkg` |
//! | Archive | `<build>/MacHyperVSupportTools-<version>-<config>.mpkg.zip` |
//!
//! # Integration
//!
//! ```no_run
//! use hvtools_bundler::bundler::{Bundler, PackageSettings, SettingsBuilder};
//!
//! # async fn example() -> hvtools_bundler::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .build_directory("/DerivedData/Build/Products/Release")
//!     .project_directory("/src/MacHyperVSupport")
//!     .package_settings(PackageSettings {
//!         version: "0.9.6".into(),
//!         ..Default::default()
//!     })
//!     .build()?;
//!
//! let artifact = Bundler::new(settings)?.bundle().await?;
//! println!("{} ({} bytes)", artifact.archive_path.display(), artifact.size);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod builder;
pub mod error;
pub(crate) mod platform;
mod settings;
pub(crate) mod utils;

// Public re-exports
pub use builder::{Bundler, Toolchain};
pub use error::{Error, Result};
pub use platform::macos::mpkg::Distribution;
pub use platform::macos::pkg::{ComponentPackage, ModuleComponents, PackageFormat};
pub use settings::{
    DaemonModule, PackageSettings, PayloadLayout, Settings, SettingsBuilder,
    configuration_from_build_dir,
};

/// The result of a successful packaging run.
///
/// # Fields
///
/// - `archive_path`: the zip archive handed to distribution
/// - `mpkg_path`: the unzipped multi-package left in the scratch directory
/// - `size`: archive size in bytes
/// - `checksum`: SHA-256 of the archive
/// - `components`: identifiers of every packaged component, in installer order
#[derive(Debug, Clone)]
pub struct InstallerArtifact {
    /// Path of the zip archive.
    pub archive_path: std::path::PathBuf,

    /// Path of the assembled `.mpkg` bundle.
    pub mpkg_path: std::path::PathBuf,

    /// Archive size in bytes.
    pub size: u64,

    /// SHA-256 checksum of the archive, lowercase hex.
    pub checksum: String,

    /// Identifiers of the component packages inside the installer.
    pub components: Vec<String>,
}
