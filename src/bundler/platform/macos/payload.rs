//! Payload tree construction.
//!
//! A payload mirrors the install root: the daemon executable goes to
//! `Library/Application Support/MacHyperVSupport/` and its launchd property
//! list to `Library/LaunchDaemons/`.

use crate::bundler::{
    DaemonModule, Settings,
    error::{Context, ErrorExt, Result},
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Directories of a freshly created payload tree.
struct PayloadTree {
    root: PathBuf,
    app_support: PathBuf,
    launch_daemons: PathBuf,
}

async fn create_payload_tree(settings: &Settings, package_name: &str) -> Result<PayloadTree> {
    log::info!("Creating payload layout for {}", package_name);

    let root = settings.payload_directory(package_name);
    let app_support = root.join(&settings.layout().app_support_dir);
    let launch_daemons = root.join(&settings.layout().launch_daemons_dir);

    fs::create_dir_all(&app_support, false).await?;
    fs::create_dir_all(&launch_daemons, false).await?;
    log::debug!("Payload layout at {}", root.display());

    Ok(PayloadTree {
        root,
        app_support,
        launch_daemons,
    })
}

/// Picks the universal binary when it exists and is strictly newer than the
/// standard one, otherwise the standard binary.
pub fn select_daemon_binary<'a>(standard: &'a Path, universal: &'a Path) -> Result<&'a Path> {
    if !universal.is_file() {
        return Ok(standard);
    }

    let universal_mtime = std::fs::metadata(universal)
        .and_then(|m| m.modified())
        .fs_context("reading modification time of", universal)?;
    let standard_mtime = std::fs::metadata(standard)
        .and_then(|m| m.modified())
        .fs_context("reading modification time of", standard)?;

    if universal_mtime > standard_mtime {
        log::debug!("Using newer universal binary {}", universal.display());
        Ok(universal)
    } else {
        Ok(standard)
    }
}

async fn copy_launchd_plist(plist: &Path, launch_daemons: &Path) -> Result<()> {
    let plist_name = plist
        .file_name()
        .with_context(|| format!("invalid launchd plist path: {}", plist.display()))?;
    let dest = launch_daemons.join(plist_name);

    fs::copy_file(plist, &dest)
        .await
        .with_context(|| format!("copying launchd plist {}", plist.display()))?;
    log::debug!("Created {}", dest.display());
    Ok(())
}

/// Builds the payload for a module's standard package.
///
/// The daemon is installed under the standard binary's file name even when
/// the universal build is the one copied.
///
/// # Returns
/// The payload root directory.
pub async fn create_daemon_payload_layout(
    settings: &Settings,
    package_name: &str,
    module: &DaemonModule,
) -> Result<PathBuf> {
    let tree = create_payload_tree(settings, package_name).await?;

    let standard = settings.binary_path(module);
    let universal = settings.universal_binary_path(module);
    let source = select_daemon_binary(&standard, &universal)?;

    let dest = tree.app_support.join(module.daemon());
    fs::copy_file(source, &dest)
        .await
        .with_context(|| format!("copying daemon binary {}", source.display()))?;
    log::debug!("Created {}", dest.display());

    copy_launchd_plist(&settings.launchd_plist_path(module), &tree.launch_daemons).await?;

    Ok(tree.root)
}

/// Builds the payload for a module's legacy package.
///
/// The legacy binary is installed with its variant suffix stripped, so
/// `hvfilecopyd-tiger` lands as `hvfilecopyd`.
///
/// # Returns
/// The payload root directory.
pub async fn create_legacy_payload_layout(
    settings: &Settings,
    package_name: &str,
    module: &DaemonModule,
) -> Result<PathBuf> {
    let tree = create_payload_tree(settings, package_name).await?;

    let source = settings.legacy_binary_path(module);
    let file_name = source
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("invalid legacy binary path: {}", source.display()))?;
    let installed_name = settings.layout().legacy_install_name(file_name);

    let dest = tree.app_support.join(installed_name);
    fs::copy_file(&source, &dest)
        .await
        .with_context(|| format!("copying legacy daemon binary {}", source.display()))?;
    log::debug!("Created {}", dest.display());

    copy_launchd_plist(&settings.launchd_plist_path(module), &tree.launch_daemons).await?;

    Ok(tree.root)
}
