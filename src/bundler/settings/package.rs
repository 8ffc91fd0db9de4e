//! Package identity and versioning.

/// Reverse-domain prefix of every component package identifier.
pub const DEFAULT_PKG_IDENTIFIER_PREFIX: &str = "fish.goldfish64.pkg.MacHyperVSupport";

/// Reverse-domain prefix of the multi-package identifier.
pub const DEFAULT_MPKG_IDENTIFIER_PREFIX: &str = "fish.goldfish64.mpkg";

/// Base name of the multi-package installer.
pub const DEFAULT_MPKG_NAME: &str = "MacHyperVSupportTools";

/// Prefix of the launchd labels, and therefore of the plist file names.
pub const DEFAULT_LAUNCHD_LABEL_PREFIX: &str = "fish.goldfish64";

/// Only `/` is supported as the install location.
pub const DEFAULT_INSTALL_LOCATION: &str = "/";

/// Package metadata and identity.
///
/// Identifiers are built by joining a prefix and a name with a dot, e.g.
/// `fish.goldfish64.pkg.MacHyperVSupport.FileCopyTool`.
///
/// # Examples
///
/// ```
/// use hvtools_bundler::bundler::PackageSettings;
///
/// let settings = PackageSettings {
///     version: "0.9.6".into(),
///     ..Default::default()
/// };
/// assert_eq!(
///     settings.package_identifier("ShutdownTool"),
///     "fish.goldfish64.pkg.MacHyperVSupport.ShutdownTool"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct PackageSettings {
    /// Version string stamped into every package (`MODULE_VERSION`).
    pub version: String,

    /// Prefix for component package identifiers.
    pub pkg_identifier_prefix: String,

    /// Prefix for the multi-package identifier.
    pub mpkg_identifier_prefix: String,

    /// Multi-package name, also used as the installer title key.
    pub mpkg_name: String,

    /// Prefix shared by the launchd labels of all daemons.
    pub launchd_label_prefix: String,

    /// Install location passed to `pkgbuild`.
    pub install_location: String,
}

impl Default for PackageSettings {
    fn default() -> Self {
        Self {
            version: String::new(),
            pkg_identifier_prefix: DEFAULT_PKG_IDENTIFIER_PREFIX.to_string(),
            mpkg_identifier_prefix: DEFAULT_MPKG_IDENTIFIER_PREFIX.to_string(),
            mpkg_name: DEFAULT_MPKG_NAME.to_string(),
            launchd_label_prefix: DEFAULT_LAUNCHD_LABEL_PREFIX.to_string(),
            install_location: DEFAULT_INSTALL_LOCATION.to_string(),
        }
    }
}

impl PackageSettings {
    /// Identifier of the component package with the given name.
    pub fn package_identifier(&self, package_name: &str) -> String {
        format!("{}.{}", self.pkg_identifier_prefix, package_name)
    }

    /// Identifier of the multi-package installer.
    pub fn mpkg_identifier(&self) -> String {
        format!("{}.{}", self.mpkg_identifier_prefix, self.mpkg_name)
    }
}
