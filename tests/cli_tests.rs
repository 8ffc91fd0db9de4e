//! End-to-end runs of the packager binary against fake packaging tools.

#![cfg(unix)]

mod common;

use common::{DAEMONS, Fixture, bare_command};
use predicates::prelude::*;
use std::os::unix::fs::PermissionsExt;

fn top_level_pkg_refs(xml: &str) -> Vec<(String, String)> {
    let doc = roxmltree::Document::parse(xml).unwrap();
    doc.root_element()
        .children()
        .filter(|n| n.has_tag_name("pkg-ref"))
        .map(|n| {
            (
                n.attribute("id").unwrap().to_string(),
                n.attribute("installKBytes").unwrap().to_string(),
            )
        })
        .collect()
}

#[test]
fn missing_build_dir_fails_with_message() {
    bare_command()
        .env("PROJECT_DIR", "/tmp")
        .env("MODULE_VERSION", "0.9.6")
        .assert()
        .code(255)
        .stderr(predicate::str::contains("TARGET_BUILD_DIR"))
        .stderr(predicate::str::contains(
            "This tool must not be run outside of Xcode",
        ));
}

#[test]
fn payloads_hold_daemons_and_launchd_plists() {
    let fixture = Fixture::new();

    fixture.command().assert().success();

    for (name, daemon) in DAEMONS {
        let payload = fixture.scratch().join(name);
        let binary = payload
            .join("Library/Application Support/MacHyperVSupport")
            .join(daemon);
        assert!(binary.is_file(), "missing {}", binary.display());
        assert_eq!(
            std::fs::metadata(&binary).unwrap().permissions().mode() & 0o111,
            0o111
        );
        assert!(
            payload
                .join("Library/LaunchDaemons")
                .join(format!("fish.goldfish64.{daemon}.plist"))
                .is_file()
        );
        assert!(fixture.scratch().join(format!("{name}.pkg")).is_file());
    }
    assert!(fixture.archive().is_file());
}

#[test]
fn no_legacy_binaries_means_no_tiger_entries() {
    let fixture = Fixture::new();

    fixture.command().assert().success();

    let xml = fixture.distribution();
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let outline_lines: Vec<&str> = doc
        .descendants()
        .filter(|n| n.has_tag_name("line"))
        .filter_map(|n| n.attribute("choice"))
        .collect();
    let choice_ids: Vec<&str> = doc
        .descendants()
        .filter(|n| n.has_tag_name("choice"))
        .filter_map(|n| n.attribute("id"))
        .collect();
    let package_ids: Vec<&str> = doc
        .descendants()
        .filter(|n| n.has_tag_name("pkg-ref"))
        .filter_map(|n| n.attribute("id"))
        .collect();

    assert_eq!(outline_lines.len(), 4);
    assert_eq!(choice_ids.len(), 4);
    assert!(!outline_lines.iter().any(|c| c.ends_with("Tiger")));
    assert!(!choice_ids.iter().any(|id| id.ends_with("Tiger")));
    assert!(!package_ids.iter().any(|id| id.ends_with("Tiger")));
    assert_eq!(top_level_pkg_refs(&xml).len(), 4);

    let packaged: Vec<String> = std::fs::read_dir(fixture.mpkg().join("Contents/Packages"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(packaged.len(), 4);
    assert!(!packaged.iter().any(|name| name.ends_with("Tiger.pkg")));
}

#[test]
fn legacy_binary_adds_bundle_package() {
    let fixture = Fixture::new().with_legacy("hvshutdownd");

    fixture.command().assert().success();

    let bundle = fixture
        .mpkg()
        .join("Contents/Packages/ShutdownToolTiger.pkg/Contents");
    assert!(bundle.join("Info.plist").is_file());
    assert!(bundle.join("Archive.bom").is_file());
    assert!(bundle.join("Archive.pax.gz").is_file());
    assert!(bundle.join("Resources/postinstall").is_file());
    assert!(
        fixture
            .scratch()
            .join("ShutdownToolTiger/Library/Application Support/MacHyperVSupport/hvshutdownd")
            .is_file()
    );

    let ids: Vec<String> = top_level_pkg_refs(&fixture.distribution())
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    assert_eq!(
        ids,
        [
            "fish.goldfish64.pkg.MacHyperVSupport.FileCopyTool",
            "fish.goldfish64.pkg.MacHyperVSupport.ShutdownTool",
            "fish.goldfish64.pkg.MacHyperVSupport.ShutdownToolTiger",
            "fish.goldfish64.pkg.MacHyperVSupport.SnapshotTool",
            "fish.goldfish64.pkg.MacHyperVSupport.TimeSyncTool",
        ]
    );
}

#[test]
fn distribution_is_well_formed_with_positive_sizes() {
    let fixture = Fixture::new().with_legacy("hvfilecopyd");

    fixture.command().assert().success();

    let xml = fixture.distribution();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    let refs = top_level_pkg_refs(&xml);
    assert_eq!(refs.len(), 5);
    for (id, kbytes) in refs {
        let kbytes: u64 = kbytes.parse().unwrap();
        assert!(kbytes > 0, "{id} has installKBytes {kbytes}");
    }
}

#[test]
fn configuration_defaults_from_build_directory() {
    let fixture = Fixture::with_build_dir("Build/Products/Debug/Tools");
    let archive_name = "MacHyperVSupportTools-0.9.6-Debug.mpkg.zip";

    fixture
        .command()
        .assert()
        .success()
        .stdout(predicate::str::contains(archive_name));

    assert!(fixture.build_dir.join(archive_name).is_file());
    assert!(!fixture.archive().exists());
}

#[test]
fn explicit_configuration_overrides_build_directory() {
    let fixture = Fixture::with_build_dir("Build/Products/Debug/Tools");

    fixture
        .command()
        .env("CONFIGURATION", "Sanitize")
        .assert()
        .success();

    assert!(
        fixture
            .build_dir
            .join("MacHyperVSupportTools-0.9.6-Sanitize.mpkg.zip")
            .is_file()
    );
}

#[test]
fn empty_build_dir_is_treated_as_missing() {
    bare_command()
        .env("TARGET_BUILD_DIR", "")
        .env("PROJECT_DIR", "/tmp")
        .env("MODULE_VERSION", "0.9.6")
        .assert()
        .code(255)
        .stderr(predicate::str::contains(
            "This tool must not be run outside of Xcode",
        ));
}

#[test]
fn missing_legacy_builds_are_reported() {
    let fixture = Fixture::new();

    fixture
        .command()
        .assert()
        .success()
        .stdout(predicate::str::contains("Daemons").and(predicate::str::contains("→").not()))
        .stderr(predicate::str::contains("Mac OS X 10.4"));

    Fixture::new()
        .with_legacy("hvsnapshotd")
        .command()
        .assert()
        .success()
        .stderr(predicate::str::contains("Mac OS X 10.4").not());
}

#[test]
fn failing_pkgbuild_aborts_without_archive() {
    let fixture = Fixture::new().with_failing_pkgbuild();

    fixture
        .command()
        .assert()
        .failure()
        .stderr(predicate::str::contains("pkgbuild: Invalid component"));

    assert!(!fixture.archive().exists());
}

#[test]
fn missing_pkgutil_is_reported_when_legacy_build_exists() {
    let fixture = Fixture::new().with_legacy("hvtimesyncd");

    fixture
        .command()
        .env("PKGUTIL", "/nonexistent/pkgutil")
        .assert()
        .failure()
        .stderr(predicate::str::contains("pkgutil"));

    assert!(!fixture.archive().exists());
}
