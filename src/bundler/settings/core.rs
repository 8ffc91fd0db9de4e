//! Core Settings struct and path derivation.

use super::{DaemonModule, PackageSettings, PayloadLayout};
use std::path::{Path, PathBuf};

/// Main settings for a packaging run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). Every path the
/// pipeline touches is derived here from the build directory, the project
/// directory and a [`DaemonModule`].
///
/// # Examples
///
/// ```no_run
/// use hvtools_bundler::bundler::{PackageSettings, SettingsBuilder};
///
/// # fn example() -> hvtools_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .build_directory("/DerivedData/Build/Products/Release")
///     .project_directory("/src/MacHyperVSupport")
///     .package_settings(PackageSettings {
///         version: "0.9.6".into(),
///         ..Default::default()
///     })
///     .build()?;
///
/// assert_eq!(settings.configuration(), "Release");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    package: PackageSettings,
    layout: PayloadLayout,
    build_directory: PathBuf,
    project_directory: PathBuf,
    configuration: String,
    modules: Vec<DaemonModule>,
    pkgbuild: PathBuf,
    pkgutil: PathBuf,
}

impl Settings {
    /// Returns the package metadata.
    pub fn package(&self) -> &PackageSettings {
        &self.package
    }

    /// Returns the installed file layout.
    pub fn layout(&self) -> &PayloadLayout {
        &self.layout
    }

    /// Returns the version string.
    pub fn version_string(&self) -> &str {
        &self.package.version
    }

    /// Returns the build configuration name (Debug, Sanitize, Release, ...).
    pub fn configuration(&self) -> &str {
        &self.configuration
    }

    /// Directory holding the daemon build products.
    pub fn build_directory(&self) -> &Path {
        &self.build_directory
    }

    /// Root of the source checkout.
    pub fn project_directory(&self) -> &Path {
        &self.project_directory
    }

    /// Modules to package, in installer order.
    pub fn modules(&self) -> &[DaemonModule] {
        &self.modules
    }

    /// Configured `pkgbuild` name or path.
    pub fn pkgbuild(&self) -> &Path {
        &self.pkgbuild
    }

    /// Configured `pkgutil` name or path.
    pub fn pkgutil(&self) -> &Path {
        &self.pkgutil
    }

    /// Scratch directory holding payloads and component packages.
    pub fn pkg_build_directory(&self) -> PathBuf {
        self.build_directory.join(&self.layout.scratch_dir)
    }

    /// Payload root for the package with the given name.
    pub fn payload_directory(&self, package_name: &str) -> PathBuf {
        self.pkg_build_directory().join(package_name)
    }

    /// Output path of the component package with the given name.
    pub fn component_package_path(&self, package_name: &str) -> PathBuf {
        self.pkg_build_directory()
            .join(format!("{package_name}.pkg"))
    }

    /// Standard daemon binary, e.g. `<build>/hvfilecopyd`.
    pub fn binary_path(&self, module: &DaemonModule) -> PathBuf {
        self.build_directory.join(module.daemon())
    }

    /// Universal daemon binary, e.g. `<build>/hvfilecopyd-universal`.
    pub fn universal_binary_path(&self, module: &DaemonModule) -> PathBuf {
        self.build_directory
            .join(format!("{}{}", module.daemon(), self.layout.universal_suffix))
    }

    /// Legacy daemon binary, e.g. `<build>/hvfilecopyd-tiger`.
    pub fn legacy_binary_path(&self, module: &DaemonModule) -> PathBuf {
        self.build_directory
            .join(format!("{}{}", module.daemon(), self.layout.legacy_suffix))
    }

    /// Source directory of a daemon. Doubles as the flat package scripts directory.
    pub fn module_source_directory(&self, module: &DaemonModule) -> PathBuf {
        self.project_directory
            .join("Tools")
            .join("Daemons")
            .join(module.daemon())
    }

    /// launchd property list of a daemon.
    pub fn launchd_plist_path(&self, module: &DaemonModule) -> PathBuf {
        self.module_source_directory(module).join(format!(
            "{}.{}.plist",
            self.package.launchd_label_prefix,
            module.daemon()
        ))
    }

    /// Post-install script shipped with legacy bundle packages.
    pub fn postinstall_path(&self, module: &DaemonModule) -> PathBuf {
        self.module_source_directory(module).join("postinstall")
    }

    /// Installer resources shared by all packages.
    pub fn installer_resources_directory(&self) -> PathBuf {
        self.project_directory.join("Tools").join("package")
    }

    /// License text shown by the installer.
    pub fn license_path(&self) -> PathBuf {
        self.project_directory.join("LICENSE.txt")
    }

    /// English localized strings for choice titles and messages.
    pub fn localizable_strings_path(&self) -> PathBuf {
        self.installer_resources_directory()
            .join("Localizable_EN.strings")
    }

    /// JavaScript embedded into the distribution descriptor.
    pub fn installer_script_path(&self) -> PathBuf {
        self.installer_resources_directory().join("scripts.js")
    }

    /// File name of the multi-package, e.g. `MacHyperVSupportTools-0.9.6-Release.mpkg`.
    pub fn mpkg_file_name(&self) -> String {
        format!(
            "{}-{}-{}.mpkg",
            self.package.mpkg_name, self.package.version, self.configuration
        )
    }

    /// Path of the assembled multi-package bundle inside the scratch directory.
    pub fn mpkg_path(&self) -> PathBuf {
        self.pkg_build_directory().join(self.mpkg_file_name())
    }

    /// Path of the final zip archive in the build directory.
    pub fn archive_path(&self) -> PathBuf {
        self.build_directory
            .join(format!("{}.zip", self.mpkg_file_name()))
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        package: PackageSettings,
        layout: PayloadLayout,
        build_directory: PathBuf,
        project_directory: PathBuf,
        configuration: String,
        modules: Vec<DaemonModule>,
        pkgbuild: PathBuf,
        pkgutil: PathBuf,
    ) -> Self {
        Self {
            package,
            layout,
            build_directory,
            project_directory,
            configuration,
            modules,
            pkgbuild,
            pkgutil,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::SettingsBuilder;
    use super::*;

    fn settings() -> Settings {
        SettingsBuilder::new()
            .build_directory("/Build/Products/Debug/Tools")
            .project_directory("/src/MacHyperVSupport")
            .package_settings(PackageSettings {
                version: "1.2.3".into(),
                ..Default::default()
            })
            .build()
            .unwrap()
    }

    #[test]
    fn derives_module_paths() {
        let settings = settings();
        let module = &settings.modules()[0];

        assert_eq!(
            settings.binary_path(module),
            Path::new("/Build/Products/Debug/Tools/hvfilecopyd")
        );
        assert_eq!(
            settings.universal_binary_path(module),
            Path::new("/Build/Products/Debug/Tools/hvfilecopyd-universal")
        );
        assert_eq!(
            settings.legacy_binary_path(module),
            Path::new("/Build/Products/Debug/Tools/hvfilecopyd-tiger")
        );
        assert_eq!(
            settings.launchd_plist_path(module),
            Path::new(
                "/src/MacHyperVSupport/Tools/Daemons/hvfilecopyd/fish.goldfish64.hvfilecopyd.plist"
            )
        );
    }

    #[test]
    fn derives_mpkg_names() {
        let settings = settings();
        assert_eq!(
            settings.mpkg_file_name(),
            "MacHyperVSupportTools-1.2.3-Debug.mpkg"
        );
        assert_eq!(
            settings.archive_path(),
            Path::new("/Build/Products/Debug/Tools/MacHyperVSupportTools-1.2.3-Debug.mpkg.zip")
        );
        assert_eq!(
            settings.component_package_path("ShutdownToolTiger"),
            Path::new("/Build/Products/Debug/Tools/pkg_build/ShutdownToolTiger.pkg")
        );
    }
}
