//! Command line argument parsing and validation.
//!
//! Every parameter can come from the Xcode build environment or from a flag;
//! a flag wins over the environment.

use crate::bundler::{PackageSettings, Settings, SettingsBuilder};
use crate::error::{CliError, Result};
use clap::Parser;
use path_absolutize::Absolutize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Installer packager for the MacHyperVSupport daemons
#[derive(Parser, Debug)]
#[command(
    name = "hvtools_bundler",
    version,
    about = "Packages the MacHyperVSupport daemons into a zipped .mpkg installer",
    long_about = "Packages the MacHyperVSupport daemons into a zipped .mpkg installer.

Runs as an Xcode build phase: the build directory, project directory,
configuration and version are taken from TARGET_BUILD_DIR, PROJECT_DIR,
CONFIGURATION and MODULE_VERSION.

Output:
  $TARGET_BUILD_DIR/MacHyperVSupportTools-<version>-<configuration>.mpkg.zip

Exit code 0 = archive guaranteed to exist at the output path."
)]
pub struct Args {
    /// Directory holding the daemon build products
    #[arg(long, env = "TARGET_BUILD_DIR", value_name = "DIR", value_parser = parse_path)]
    pub build_dir: Option<PathBuf>,

    /// Root of the MacHyperVSupport source checkout
    #[arg(long, env = "PROJECT_DIR", value_name = "DIR", value_parser = parse_path)]
    pub project_dir: Option<PathBuf>,

    /// Build configuration (Debug, Sanitize, Release); derived from the build
    /// directory name when absent
    #[arg(long, env = "CONFIGURATION", value_name = "NAME")]
    pub configuration: Option<String>,

    /// Version stamped into every package
    #[arg(long = "module-version", env = "MODULE_VERSION", value_name = "VERSION")]
    pub module_version: Option<String>,

    /// pkgbuild executable name or path
    #[arg(long, env = "PKGBUILD", default_value = "pkgbuild", value_name = "PATH")]
    pub pkgbuild: PathBuf,

    /// pkgutil executable name or path
    #[arg(long, env = "PKGUTIL", default_value = "pkgutil", value_name = "PATH")]
    pub pkgutil: PathBuf,

    /// Print detailed progress
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Accepts empty values so that an empty Xcode variable is reported as
/// missing by [`Args::validate`] rather than rejected by clap.
fn parse_path(value: &str) -> std::result::Result<PathBuf, std::convert::Infallible> {
    Ok(PathBuf::from(value))
}

/// An empty value counts as unset.
fn require<'a, T: AsRef<OsStr> + ?Sized>(
    value: Option<&'a T>,
    variable: &'static str,
    flag: &'static str,
) -> std::result::Result<&'a T, CliError> {
    value
        .filter(|value| !value.as_ref().is_empty())
        .ok_or(CliError::MissingEnvironment { variable, flag })
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(path.absolutize()?.into_owned())
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    ///
    /// Checks presence only; whether the directories hold the expected files
    /// is discovered by the pipeline.
    pub fn validate(&self) -> std::result::Result<(), CliError> {
        require(self.build_dir.as_deref(), "TARGET_BUILD_DIR", "--build-dir")?;
        require(self.project_dir.as_deref(), "PROJECT_DIR", "--project-dir")?;
        let version = require(
            self.module_version.as_deref(),
            "MODULE_VERSION",
            "--module-version",
        )?;

        if version.trim().is_empty() {
            return Err(CliError::InvalidArguments {
                reason: "module version cannot be empty".to_string(),
            });
        }
        if self
            .configuration
            .as_deref()
            .is_some_and(|configuration| configuration.trim().is_empty())
        {
            return Err(CliError::InvalidArguments {
                reason: "configuration cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Builds packaging settings from validated arguments.
    pub fn to_settings(&self) -> Result<Settings> {
        self.validate()?;

        let build_dir = require(self.build_dir.as_deref(), "TARGET_BUILD_DIR", "--build-dir")?;
        let project_dir = require(self.project_dir.as_deref(), "PROJECT_DIR", "--project-dir")?;
        let version = require(
            self.module_version.as_deref(),
            "MODULE_VERSION",
            "--module-version",
        )?;

        let mut builder = SettingsBuilder::new()
            .build_directory(absolute(build_dir)?)
            .project_directory(absolute(project_dir)?)
            .package_settings(PackageSettings {
                version: version.trim().to_string(),
                ..Default::default()
            })
            .pkgbuild(&self.pkgbuild)
            .pkgutil(&self.pkgutil);
        if let Some(configuration) = &self.configuration {
            builder = builder.configuration(configuration.trim());
        }

        Ok(builder.build()?)
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output = super::OutputManager::new(args.verbose, args.quiet);

        Self { output }
    }
}

impl RuntimeConfig {
    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
