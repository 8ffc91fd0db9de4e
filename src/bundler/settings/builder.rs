//! Builder for constructing Settings.

use super::{
    DaemonModule, PackageSettings, PayloadLayout, Settings,
    configuration::configuration_from_build_dir,
};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use hvtools_bundler::bundler::{PackageSettings, SettingsBuilder};
///
/// # fn example() -> hvtools_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .build_directory("build/Release")
///     .project_directory(".")
///     .configuration("Release")
///     .package_settings(PackageSettings {
///         version: "0.9.6".into(),
///         ..Default::default()
///     })
///     .pkgbuild("/usr/bin/pkgbuild")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    build_directory: Option<PathBuf>,
    project_directory: Option<PathBuf>,
    configuration: Option<String>,
    package_settings: Option<PackageSettings>,
    layout: PayloadLayout,
    modules: Option<Vec<DaemonModule>>,
    pkgbuild: Option<PathBuf>,
    pkgutil: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the directory holding the daemon build products.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn build_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.build_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the source checkout root.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn project_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the build configuration name.
    ///
    /// Default: derived from the build directory's parent folder.
    pub fn configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = Some(configuration.into());
        self
    }

    /// Sets package metadata.
    ///
    /// # Required
    ///
    /// This field is required for building, and its version must not be empty.
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    /// Sets the installed file layout.
    ///
    /// Default: [`PayloadLayout::default`]
    pub fn layout(mut self, layout: PayloadLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the modules to package.
    ///
    /// Default: [`DaemonModule::standard_set`]
    pub fn modules(mut self, modules: Vec<DaemonModule>) -> Self {
        self.modules = Some(modules);
        self
    }

    /// Sets the `pkgbuild` name or path.
    ///
    /// Default: `pkgbuild` (looked up in `PATH`)
    pub fn pkgbuild<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.pkgbuild = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the `pkgutil` name or path.
    ///
    /// Default: `pkgutil` (looked up in `PATH`)
    pub fn pkgutil<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.pkgutil = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing:
    /// - `build_directory`
    /// - `project_directory`
    /// - `package_settings` (with a non-empty version)
    pub fn build(self) -> crate::bundler::Result<Settings> {
        use crate::bundler::error::Context;

        let build_directory = self
            .build_directory
            .context("build_directory is required")?;
        let project_directory = self
            .project_directory
            .context("project_directory is required")?;
        let package = self
            .package_settings
            .context("package_settings is required")?;

        if package.version.trim().is_empty() {
            crate::bail!("package version must not be empty");
        }

        let configuration = self
            .configuration
            .unwrap_or_else(|| configuration_from_build_dir(&build_directory).to_string());

        Ok(Settings::new(
            package,
            self.layout,
            build_directory,
            project_directory,
            configuration,
            self.modules.unwrap_or_else(DaemonModule::standard_set),
            self.pkgbuild.unwrap_or_else(|| PathBuf::from("pkgbuild")),
            self.pkgutil.unwrap_or_else(|| PathBuf::from("pkgutil")),
        ))
    }
}
