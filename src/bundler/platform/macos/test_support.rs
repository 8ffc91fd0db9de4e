//! Stand-ins for `pkgbuild` and `pkgutil` used by unit tests.

use crate::bundler::{PackageSettings, Settings, SettingsBuilder, Toolchain};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Writes an executable `/bin/sh` script and returns its path.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// `pkgbuild` that writes a small archive to its last argument.
pub const FAKE_PKGBUILD: &str = r#"for last; do :; done
printf 'xar!fake-flat-package' > "$last"
"#;

/// `pkgutil --expand <pkg> <dir>` that produces `Bom` and `Payload`.
pub const FAKE_PKGUTIL: &str = r#"mkdir -p "$3"
printf 'bom-of-%s' "$(basename "$2")" > "$3/Bom"
printf 'payload' > "$3/Payload"
"#;

/// Toolchain backed by the fake tools, written into `dir`.
pub fn fake_toolchain(dir: &Path) -> Toolchain {
    let pkgbuild = write_script(dir, "pkgbuild", FAKE_PKGBUILD);
    let pkgutil = write_script(dir, "pkgutil", FAKE_PKGUTIL);
    Toolchain::new(pkgbuild, Some(pkgutil))
}

/// Settings rooted at `<root>/build` and `<root>/project`.
pub fn settings_in(root: &Path) -> Settings {
    let build = root.join("build");
    let project = root.join("project");
    std::fs::create_dir_all(&build).unwrap();
    std::fs::create_dir_all(&project).unwrap();

    SettingsBuilder::new()
        .build_directory(build)
        .project_directory(project)
        .configuration("Release")
        .package_settings(PackageSettings {
            version: "0.9.6".into(),
            ..Default::default()
        })
        .build()
        .unwrap()
}
