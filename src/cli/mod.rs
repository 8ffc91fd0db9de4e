//! Command line interface for the installer packager.
//!
//! Parses the Xcode build parameters, runs the [`Bundler`] and reports the
//! resulting archive.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::bundler::Bundler;
use crate::error::Result;

/// Main CLI entry point
///
/// Returns the process exit code on success; any error is returned to the
/// caller, which reports it and exits with a failure status.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let config = RuntimeConfig::from(&args);
    execute(&args, &config).await?;
    Ok(0)
}

async fn execute(args: &Args, config: &RuntimeConfig) -> Result<()> {
    let settings = args.to_settings()?;

    config.section(&format!(
        "Packaging MacHyperVSupport tools {} ({})",
        settings.version_string(),
        settings.configuration()
    ))?;
    config.verbose_println(&format!(
        "Build directory: {}",
        settings.build_directory().display()
    ))?;
    config.verbose_println(&format!(
        "Project directory: {}",
        settings.project_directory().display()
    ))?;

    let bundler = Bundler::new(settings)?;
    let settings = bundler.settings();
    config.section("Daemons")?;
    for module in settings.modules() {
        config.indent(&format!("{} ({})", module.friendly_name(), module.daemon()))?;
    }
    if !settings
        .modules()
        .iter()
        .any(|module| settings.legacy_binary_path(module).is_file())
    {
        config.warn("no -tiger builds found; the installer will not support Mac OS X 10.4")?;
    }

    let artifact = bundler.bundle().await?;

    config.success(&format!("Created {}", artifact.archive_path.display()))?;
    config.indent(&format!("Size: {} bytes", artifact.size))?;
    config.indent(&format!("SHA256: {}", artifact.checksum))?;
    for component in &artifact.components {
        config.verbose_println(component)?;
    }

    Ok(())
}
