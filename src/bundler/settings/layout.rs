//! Installed file layout and build product naming.

/// Where daemon files land relative to the install root, and how the
/// build products for each binary variant are named.
#[derive(Debug, Clone)]
pub struct PayloadLayout {
    /// Directory holding daemon executables.
    pub app_support_dir: String,

    /// Directory holding launchd property lists.
    pub launch_daemons_dir: String,

    /// Suffix of the fat binary built alongside the standard one.
    pub universal_suffix: String,

    /// Suffix of the Mac OS X 10.4 binary. Stripped on install.
    pub legacy_suffix: String,

    /// Scratch directory name created under the build directory.
    pub scratch_dir: String,
}

impl Default for PayloadLayout {
    fn default() -> Self {
        Self {
            app_support_dir: "Library/Application Support/MacHyperVSupport".to_string(),
            launch_daemons_dir: "Library/LaunchDaemons".to_string(),
            universal_suffix: "-universal".to_string(),
            legacy_suffix: "-tiger".to_string(),
            scratch_dir: "pkg_build".to_string(),
        }
    }
}

impl PayloadLayout {
    /// Installed name of a legacy binary: the legacy suffix is removed.
    ///
    /// ```
    /// use hvtools_bundler::bundler::PayloadLayout;
    ///
    /// let layout = PayloadLayout::default();
    /// assert_eq!(layout.legacy_install_name("hvshutdownd-tiger"), "hvshutdownd");
    /// assert_eq!(layout.legacy_install_name("hvshutdownd"), "hvshutdownd");
    /// ```
    pub fn legacy_install_name<'a>(&self, file_name: &'a str) -> &'a str {
        file_name
            .strip_suffix(self.legacy_suffix.as_str())
            .unwrap_or(file_name)
    }
}
