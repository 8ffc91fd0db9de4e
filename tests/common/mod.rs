//! Fixture for end-to-end runs: an Xcode-like build directory, a project
//! checkout and stand-ins for `pkgbuild` and `pkgutil`.

#![allow(dead_code)]

use assert_cmd::Command;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const DAEMONS: [(&str, &str); 4] = [
    ("FileCopyTool", "hvfilecopyd"),
    ("ShutdownTool", "hvshutdownd"),
    ("SnapshotTool", "hvsnapshotd"),
    ("TimeSyncTool", "hvtimesyncd"),
];

pub const ARCHIVE_NAME: &str = "MacHyperVSupportTools-0.9.6-Release.mpkg.zip";

const PKGBUILD: &str = r#"#!/bin/sh
for last; do :; done
printf 'xar!fake-flat-package' > "$last"
"#;

const PKGUTIL: &str = r#"#!/bin/sh
mkdir -p "$3"
printf 'bom' > "$3/Bom"
printf 'payload' > "$3/Payload"
"#;

pub struct Fixture {
    _temp: TempDir,
    pub build_dir: PathBuf,
    pub project_dir: PathBuf,
    pub pkgbuild: PathBuf,
    pub pkgutil: PathBuf,
}

fn write_executable(path: &Path, contents: &[u8]) {
    std::fs::write(path, contents).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

impl Fixture {
    /// Build products for all four daemons, no legacy variants.
    pub fn new() -> Self {
        Self::with_build_dir("Build/Products/Release")
    }

    /// Like [`Fixture::new`] with the build products at `relative_build_dir`.
    pub fn with_build_dir(relative_build_dir: &str) -> Self {
        let temp = tempfile::tempdir().unwrap();
        let build_dir = temp.path().join(relative_build_dir);
        let project_dir = temp.path().join("MacHyperVSupport");
        let tools_dir = temp.path().join("tools");
        for dir in [&build_dir, &tools_dir, &project_dir.join("Tools/package")] {
            std::fs::create_dir_all(dir).unwrap();
        }

        std::fs::write(project_dir.join("LICENSE.txt"), "BSD 3-Clause License\n").unwrap();
        std::fs::write(
            project_dir.join("Tools/package/Localizable_EN.strings"),
            "\"MacHyperVSupportTools_title\" = \"MacHyperVSupport Tools\";\n",
        )
        .unwrap();
        std::fs::write(
            project_dir.join("Tools/package/scripts.js"),
            "function installCheckScript() { return true; }\n\
             function checkIfTiger() { return system.compareVersions(system.version.ProductVersion, '10.5') < 0; }\n",
        )
        .unwrap();

        for (_, daemon) in DAEMONS {
            write_executable(&build_dir.join(daemon), &vec![0xcf; 1500]);
            let source_dir = project_dir.join("Tools/Daemons").join(daemon);
            std::fs::create_dir_all(&source_dir).unwrap();
            std::fs::write(
                source_dir.join(format!("fish.goldfish64.{daemon}.plist")),
                "<?xml version=\"1.0\"?><plist version=\"1.0\"><dict/></plist>\n",
            )
            .unwrap();
        }

        let pkgbuild = tools_dir.join("pkgbuild");
        let pkgutil = tools_dir.join("pkgutil");
        write_executable(&pkgbuild, PKGBUILD.as_bytes());
        write_executable(&pkgutil, PKGUTIL.as_bytes());

        Self {
            _temp: temp,
            build_dir,
            project_dir,
            pkgbuild,
            pkgutil,
        }
    }

    /// Adds a `-tiger` build and a postinstall script for one daemon.
    pub fn with_legacy(self, daemon: &str) -> Self {
        write_executable(
            &self.build_dir.join(format!("{daemon}-tiger")),
            &vec![0xfe; 1200],
        );
        write_executable(
            &self
                .project_dir
                .join("Tools/Daemons")
                .join(daemon)
                .join("postinstall"),
            b"#!/bin/sh\nlaunchctl load /Library/LaunchDaemons\n",
        );
        self
    }

    /// Replaces `pkgbuild` with a tool that always fails.
    pub fn with_failing_pkgbuild(self) -> Self {
        write_executable(
            &self.pkgbuild,
            b"#!/bin/sh\necho 'pkgbuild: Invalid component' >&2\nexit 1\n",
        );
        self
    }

    pub fn scratch(&self) -> PathBuf {
        self.build_dir.join("pkg_build")
    }

    pub fn archive(&self) -> PathBuf {
        self.build_dir.join(ARCHIVE_NAME)
    }

    pub fn mpkg(&self) -> PathBuf {
        self.scratch().join("MacHyperVSupportTools-0.9.6-Release.mpkg")
    }

    pub fn distribution(&self) -> String {
        std::fs::read_to_string(self.mpkg().join("Contents/distribution.dist")).unwrap()
    }

    /// The packager with a clean environment plus the Xcode variables.
    pub fn command(&self) -> Command {
        let mut cmd = bare_command();
        cmd.env("TARGET_BUILD_DIR", &self.build_dir)
            .env("PROJECT_DIR", &self.project_dir)
            .env("MODULE_VERSION", "0.9.6")
            .env("PKGBUILD", &self.pkgbuild)
            .env("PKGUTIL", &self.pkgutil);
        cmd
    }
}

/// The packager binary with none of the Xcode variables set.
#[allow(deprecated)]
pub fn bare_command() -> Command {
    let mut cmd = Command::cargo_bin("hvtools_bundler").unwrap();
    for variable in [
        "TARGET_BUILD_DIR",
        "PROJECT_DIR",
        "CONFIGURATION",
        "MODULE_VERSION",
        "PKGBUILD",
        "PKGUTIL",
        "RUST_LOG",
    ] {
        cmd.env_remove(variable);
    }
    cmd.env("NO_COLOR", "1");
    cmd
}
