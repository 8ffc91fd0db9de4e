//! Zip compression of the assembled `.mpkg`.
//!
//! Entries are stored relative to the bundle's parent directory, so the
//! archive unpacks to a single `<name>.mpkg/` tree. Directory entries are
//! written explicitly and unix permission bits are recorded, keeping the
//! daemons and the postinstall scripts executable after extraction.

use crate::bundler::{
    Error,
    error::{Context, ErrorExt, Result},
    utils::fs,
};
use std::path::{Path, PathBuf};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// Compresses `mpkg_path` into the zip archive at `archive_path`.
///
/// An existing archive is replaced. Returns the archive path.
pub async fn compress_mpkg(mpkg_path: &Path, archive_path: &Path) -> Result<PathBuf> {
    log::info!(
        "Compressing {} to {}",
        mpkg_path.display(),
        archive_path.display()
    );

    fs::remove_file(archive_path).await?;

    let root = mpkg_path
        .parent()
        .with_context(|| format!("invalid mpkg path: {}", mpkg_path.display()))?
        .to_path_buf();
    let source = mpkg_path.to_path_buf();
    let dest = archive_path.to_path_buf();

    tokio::task::spawn_blocking(move || write_archive(&root, &source, &dest))
        .await
        .map_err(|e| Error::GenericError(format!("Archive task panicked: {}", e)))??;

    log::info!("✓ Archive written to {}", archive_path.display());
    Ok(archive_path.to_path_buf())
}

fn write_archive(root: &Path, source: &Path, dest: &Path) -> Result<()> {
    let file = std::fs::File::create(dest).fs_context("creating archive", dest)?;
    let mut writer = ZipWriter::new(file);
    let base = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in walkdir::WalkDir::new(source).sort_by_file_name() {
        let entry = entry?;
        let name = entry_name(entry.path().strip_prefix(root)?);
        let options = base.unix_permissions(permissions(&entry.metadata()?));

        if entry.file_type().is_dir() {
            writer.add_directory(name, options)?;
        } else if entry.file_type().is_file() {
            writer.start_file(name, options)?;
            let mut input = std::fs::File::open(entry.path())
                .fs_context("opening archive entry", entry.path())?;
            std::io::copy(&mut input, &mut writer)
                .fs_context("compressing archive entry", entry.path())?;
        } else {
            log::warn!("Skipping non-regular file {}", entry.path().display());
        }
    }

    writer.finish()?;
    Ok(())
}

/// Zip entry names always use `/`, whatever the host separator.
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(unix)]
fn permissions(metadata: &std::fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn permissions(metadata: &std::fs::Metadata) -> u32 {
    if metadata.is_dir() { 0o755 } else { 0o644 }
}
