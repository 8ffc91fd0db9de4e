//! Component package builders.
//!
//! - [`build_flat_package`] produces a single-file package with `pkgbuild`
//! - [`build_bundle_package`] produces a directory-style package for
//!   installers that predate flat packages (Mac OS X 10.4)

mod bundle;
pub(crate) mod command;

pub use bundle::build_bundle_package;

use crate::bundler::{DaemonModule, Result, Settings, Toolchain};
use std::path::{Path, PathBuf};

/// On-disk format of a component package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageFormat {
    /// Single xar archive file.
    Flat,
    /// `.pkg` directory with `Contents/Info.plist` and a pax archive.
    Bundle,
}

impl std::fmt::Display for PackageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackageFormat::Flat => write!(f, "flat"),
            PackageFormat::Bundle => write!(f, "bundle"),
        }
    }
}

/// A built component package.
#[derive(Debug, Clone)]
pub struct ComponentPackage {
    /// Package name; doubles as the installer choice id.
    pub name: String,

    /// Reverse-domain package identifier.
    pub identifier: String,

    /// Package file (flat) or directory (bundle).
    pub path: PathBuf,

    /// Payload root the package was built from.
    pub payload_dir: PathBuf,

    /// On-disk format.
    pub format: PackageFormat,
}

impl ComponentPackage {
    /// File name of the package artifact, e.g. `FileCopyTool.pkg`.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{}.pkg", self.name))
    }
}

/// Packages produced for one daemon module.
#[derive(Debug, Clone)]
pub struct ModuleComponents {
    /// The module these packages install.
    pub module: DaemonModule,

    /// Package for current systems.
    pub standard: ComponentPackage,

    /// Package for Mac OS X 10.4, present only when a legacy binary was built.
    pub legacy: Option<ComponentPackage>,
}

impl ModuleComponents {
    /// Standard package followed by the legacy package, if any.
    pub fn packages(&self) -> impl Iterator<Item = &ComponentPackage> {
        std::iter::once(&self.standard).chain(self.legacy.as_ref())
    }
}

/// Builds a flat package from a payload directory.
///
/// The package is written to `<scratch>/<package_name>.pkg`. Any `pkgbuild`
/// failure aborts with the tool's diagnostic output.
pub async fn build_flat_package(
    settings: &Settings,
    toolchain: &Toolchain,
    package_name: &str,
    payload_dir: &Path,
    scripts_dir: Option<&Path>,
) -> Result<ComponentPackage> {
    let identifier = settings.package().package_identifier(package_name);
    let pkg_path = settings.component_package_path(package_name);

    log::info!(
        "Building flat package {}, payload path: {}",
        identifier,
        payload_dir.display()
    );
    command::pkgbuild(
        settings,
        toolchain,
        payload_dir,
        &identifier,
        scripts_dir,
        &pkg_path,
    )
    .await?;

    log::info!("✓ Flat package built at {}", pkg_path.display());

    Ok(ComponentPackage {
        name: package_name.to_string(),
        identifier,
        path: pkg_path,
        payload_dir: payload_dir.to_path_buf(),
        format: PackageFormat::Flat,
    })
}
