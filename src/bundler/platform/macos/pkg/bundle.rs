//! Bundle-style (directory) package creation.
//!
//! The Mac OS X 10.4 installer cannot read flat packages. A bundle package is
//! assembled from the pieces of a flat one:
//!
//! ```text
//! <Name>.pkg/
//! └── Contents/
//!     ├── Archive.bom          (Bom from the expanded flat package)
//!     ├── Archive.pax.gz       (Payload from the expanded flat package)
//!     ├── Info.plist
//!     └── Resources/
//!         ├── postinstall      (optional)
//!         └── English.lproj/
//!             └── Description.plist
//! ```

use super::{ComponentPackage, PackageFormat, command};
use crate::bundler::{
    Settings, Toolchain,
    error::{Context, ErrorExt, Result},
    utils::fs,
};
use serde::Serialize;
use std::path::Path;

/// `Contents/Info.plist` of a bundle package.
#[derive(Debug, Serialize)]
struct InfoPlist<'a> {
    #[serde(rename = "CFBundleIdentifier")]
    bundle_identifier: &'a str,
    #[serde(rename = "CFBundleShortVersionString")]
    short_version: &'a str,
    #[serde(rename = "IFPkgFlagAllowBackRev")]
    allow_back_rev: bool,
    #[serde(rename = "IFPkgFlagAuthorizationAction")]
    authorization_action: &'a str,
    #[serde(rename = "IFPkgFlagDefaultLocation")]
    default_location: &'a str,
    #[serde(rename = "IFPkgFlagFollowLinks")]
    follow_links: bool,
    #[serde(rename = "IFPkgFlagInstallFat")]
    install_fat: bool,
    #[serde(rename = "IFPkgFlagIsRequired")]
    is_required: bool,
    #[serde(rename = "IFPkgFlagOverwritePermissions")]
    overwrite_permissions: bool,
    #[serde(rename = "IFPkgFlagRelocatable")]
    relocatable: bool,
    #[serde(rename = "IFPkgFlagRestartAction")]
    restart_action: &'a str,
    #[serde(rename = "IFPkgFlagRootVolumeOnly")]
    root_volume_only: bool,
    #[serde(rename = "IFPkgFlagUpdateInstalledLanguages")]
    update_installed_languages: bool,
    #[serde(rename = "IFPkgFormatVersion")]
    format_version: f64,
}

impl<'a> InfoPlist<'a> {
    fn new(identifier: &'a str, version: &'a str, install_location: &'a str) -> Self {
        Self {
            bundle_identifier: identifier,
            short_version: version,
            allow_back_rev: false,
            authorization_action: "RootAuthorization",
            default_location: install_location,
            follow_links: true,
            install_fat: false,
            is_required: true,
            overwrite_permissions: false,
            relocatable: false,
            restart_action: "NoRestart",
            root_volume_only: true,
            update_installed_languages: false,
            format_version: 0.1,
        }
    }
}

/// `Contents/Resources/English.lproj/Description.plist` of a bundle package.
#[derive(Debug, Serialize)]
struct DescriptionPlist<'a> {
    #[serde(rename = "IFPkgDescriptionDescription")]
    description: String,
    #[serde(rename = "IFPkgDescriptionTitle")]
    title: &'a str,
    #[serde(rename = "IFPkgDescriptionVersion")]
    version: &'a str,
}

fn write_plist<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    plist::to_file_xml(path, value).with_context(|| format!("writing {}", path.display()))
}

/// Builds a bundle package from a payload directory.
///
/// # Process
/// 1. Build a flat package into a temporary directory with `pkgbuild`
/// 2. Expand it with `pkgutil --expand` to recover `Bom` and `Payload`
/// 3. Lay out `<Name>.pkg/Contents` and copy both files in
/// 4. Write `Info.plist` and `Description.plist`
/// 5. Copy the postinstall script, if given
///
/// The temporary directory is removed when this function returns, whether it
/// succeeds or not.
pub async fn build_bundle_package(
    settings: &Settings,
    toolchain: &Toolchain,
    package_name: &str,
    friendly_name: &str,
    payload_dir: &Path,
    postinstall: Option<&Path>,
) -> Result<ComponentPackage> {
    let package = settings.package();
    let identifier = package.package_identifier(package_name);
    let pkg_path = settings.component_package_path(package_name);
    let contents = pkg_path.join("Contents");
    let resources = contents.join("Resources");
    let english_lproj = resources.join("English.lproj");

    log::info!(
        "Building bundle package {}, payload path: {}",
        identifier,
        payload_dir.display()
    );

    let temp_dir = tempfile::Builder::new()
        .prefix("hvtools-pkg-")
        .tempdir()
        .fs_context("creating temporary directory for", &pkg_path)?;
    let temp_pkg = temp_dir.path().join(format!("{package_name}.pkg"));
    let expanded = temp_dir.path().join("expanded");

    log::debug!("Building temporary flat package to {}", temp_pkg.display());
    command::pkgbuild(settings, toolchain, payload_dir, &identifier, None, &temp_pkg).await?;

    log::debug!("Expanding temporary package to {}", expanded.display());
    command::pkgutil_expand(toolchain, &temp_pkg, &expanded).await?;

    fs::create_dir_all(&english_lproj, false).await?;

    fs::copy_file(&expanded.join("Bom"), &contents.join("Archive.bom"))
        .await
        .context("copying bill of materials from expanded package")?;
    fs::copy_file(&expanded.join("Payload"), &contents.join("Archive.pax.gz"))
        .await
        .context("copying payload archive from expanded package")?;

    write_plist(
        &contents.join("Info.plist"),
        &InfoPlist::new(&identifier, &package.version, &package.install_location),
    )?;
    write_plist(
        &english_lproj.join("Description.plist"),
        &DescriptionPlist {
            description: format!(
                "This package contains {} {}.",
                friendly_name, package.version
            ),
            title: friendly_name,
            version: &package.version,
        },
    )?;

    if let Some(script) = postinstall {
        fs::copy_file(script, &resources.join("postinstall"))
            .await
            .with_context(|| format!("copying postinstall script {}", script.display()))?;
    }

    // tempfile removes the flat package and its expansion
    drop(temp_dir);

    log::info!("✓ Bundle package built at {}", pkg_path.display());

    Ok(ComponentPackage {
        name: package_name.to_string(),
        identifier,
        path: pkg_path,
        payload_dir: payload_dir.to_path_buf(),
        format: PackageFormat::Bundle,
    })
}
