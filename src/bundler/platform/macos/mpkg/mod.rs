//! Multi-package (`.mpkg`) assembly.
//!
//! ```text
//! MacHyperVSupportTools-<version>-<configuration>.mpkg/
//! └── Contents/
//!     ├── distribution.dist
//!     ├── Packages/
//!     │   ├── FileCopyTool.pkg
//!     │   ├── FileCopyToolTiger.pkg/
//!     │   └── ...
//!     └── Resources/
//!         └── English.lproj/
//!             ├── License.txt
//!             └── Localizable.strings
//! ```

mod distribution;
mod template;

pub use distribution::Distribution;

use super::pkg::{ModuleComponents, PackageFormat};
use crate::bundler::{
    Settings,
    error::{Context, ErrorExt, Result},
    utils::fs,
};
use std::path::PathBuf;

/// Assembles the `.mpkg` bundle from built component packages.
///
/// Any previous bundle at the same path is removed first. Returns the bundle
/// path.
pub async fn assemble_mpkg(
    settings: &Settings,
    components: &[ModuleComponents],
) -> Result<PathBuf> {
    let mpkg_path = settings.mpkg_path();
    let contents = mpkg_path.join("Contents");
    let packages_dir = contents.join("Packages");
    let english_lproj = contents.join("Resources").join("English.lproj");

    log::info!(
        "Assembling {} ({})",
        settings.mpkg_file_name(),
        settings.package().mpkg_identifier()
    );

    fs::create_dir_all(&mpkg_path, true).await?;
    fs::create_dir_all(&packages_dir, false).await?;
    fs::create_dir_all(&english_lproj, false).await?;

    for package in components.iter().flat_map(ModuleComponents::packages) {
        let dest = packages_dir.join(package.file_name());
        log::debug!("Adding {} package {}", package.format, dest.display());
        let copied = match package.format {
            PackageFormat::Flat => fs::copy_file(&package.path, &dest).await,
            PackageFormat::Bundle => fs::copy_dir(&package.path, &dest).await,
        };
        copied.with_context(|| format!("copying component package {}", package.path.display()))?;
    }

    let license = settings.license_path();
    fs::copy_file(&license, &english_lproj.join(distribution::LICENSE_FILE))
        .await
        .with_context(|| format!("copying license {}", license.display()))?;

    let strings = settings.localizable_strings_path();
    fs::copy_file(&strings, &english_lproj.join("Localizable.strings"))
        .await
        .with_context(|| format!("copying localized strings {}", strings.display()))?;

    let script_path = settings.installer_script_path();
    let script = tokio::fs::read_to_string(&script_path)
        .await
        .fs_context("reading installer script", &script_path)?;

    let distribution = Distribution::build(settings, components, script).await?;
    let dist_path = contents.join("distribution.dist");
    tokio::fs::write(&dist_path, distribution.render()?)
        .await
        .fs_context("writing distribution descriptor", &dist_path)?;

    log::info!("✓ Multi-package assembled at {}", mpkg_path.display());
    Ok(mpkg_path)
}
