//! Build configuration defaulting.

use std::path::Path;

/// Derives the Xcode configuration name from the build products directory.
///
/// Xcode places products in `Build/Products/<Configuration>/`, so the parent
/// of the target build directory names the configuration. Only `Debug` and
/// `Sanitize` are recognized; everything else is treated as `Release`.
pub fn configuration_from_build_dir(build_dir: &Path) -> &'static str {
    match build_dir
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
    {
        Some("Debug") => "Debug",
        Some("Sanitize") => "Sanitize",
        _ => "Release",
    }
}
