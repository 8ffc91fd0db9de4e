//! macOS installer packaging.
//!
//! Each daemon module becomes one flat component package, plus a bundle
//! package for Mac OS X 10.4 when a `-tiger` build exists. The component
//! packages are then gathered into a multi-package installer and zipped.
//!
//! # Architecture
//!
//! - `payload` - payload trees mirroring the install root
//! - `pkg` - flat and bundle component packages via `pkgbuild`/`pkgutil`
//! - `mpkg` - the `.mpkg` bundle and its distribution descriptor
//! - `archive` - zip compression of the finished `.mpkg`

pub mod archive;
pub mod mpkg;
pub mod payload;
pub mod pkg;

#[cfg(all(test, unix))]
pub(crate) mod test_support;

use crate::bundler::{DaemonModule, Settings, Toolchain, error::Result};
use pkg::ModuleComponents;

/// Builds the component packages of one daemon module.
///
/// # Process
/// 1. Lay out the standard payload and build a flat package, passing the
///    daemon's source directory as the scripts directory when it exists
/// 2. If `<daemon>-tiger` exists in the build directory, lay out the legacy
///    payload and build a bundle package, adding the daemon's postinstall
///    script when one exists
pub async fn package_module(
    settings: &Settings,
    toolchain: &Toolchain,
    module: &DaemonModule,
) -> Result<ModuleComponents> {
    log::info!("Packaging {} ({})", module.friendly_name(), module.daemon());

    let payload = payload::create_daemon_payload_layout(settings, module.name(), module).await?;
    let scripts_dir = settings.module_source_directory(module);
    let standard = pkg::build_flat_package(
        settings,
        toolchain,
        module.name(),
        &payload,
        scripts_dir.is_dir().then_some(scripts_dir.as_path()),
    )
    .await?;

    let legacy = if settings.legacy_binary_path(module).is_file() {
        let legacy_name = module.legacy_name();
        let payload =
            payload::create_legacy_payload_layout(settings, &legacy_name, module).await?;
        let postinstall = settings.postinstall_path(module);
        let package = pkg::build_bundle_package(
            settings,
            toolchain,
            &legacy_name,
            module.friendly_name(),
            &payload,
            postinstall.is_file().then_some(postinstall.as_path()),
        )
        .await?;
        Some(package)
    } else {
        log::debug!("No legacy build of {}, skipping bundle package", module.daemon());
        None
    };

    Ok(ModuleComponents {
        module: module.clone(),
        standard,
        legacy,
    })
}
