//! Invocation of the platform packaging tools.
//!
//! Every call captures stdout/stderr and turns a non-zero exit status into
//! [`Error::ToolFailed`] carrying the tool's diagnostic output.

use crate::bundler::{Error, Result, Settings, Toolchain};
use std::ffi::OsStr;
use std::path::Path;
use tokio::process::Command;

/// Runs `program` with `args` and fails unless it exits successfully.
pub(crate) async fn run_tool<I, S>(tool: &str, program: &Path, args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command.args(args);
    log::debug!("Running {:?}", command.as_std());

    let output = command
        .output()
        .await
        .map_err(|e| Error::GenericError(format!("Failed to execute {}: {}", tool, e)))?;

    if !output.status.success() {
        let mut diagnostics = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if diagnostics.is_empty() {
            diagnostics = String::from_utf8_lossy(&output.stdout).trim().to_string();
        }
        return Err(Error::ToolFailed {
            tool: tool.to_string(),
            status: output.status.to_string(),
            stderr: diagnostics,
        });
    }

    Ok(())
}

/// `pkgbuild --root <payload> --identifier <id> --version <v> --install-location <loc> [--scripts <dir>] <output>`
pub(crate) async fn pkgbuild(
    settings: &Settings,
    toolchain: &Toolchain,
    payload_dir: &Path,
    identifier: &str,
    scripts_dir: Option<&Path>,
    output: &Path,
) -> Result<()> {
    let package = settings.package();
    let mut args: Vec<&OsStr> = vec![
        OsStr::new("--root"),
        payload_dir.as_os_str(),
        OsStr::new("--identifier"),
        OsStr::new(identifier),
        OsStr::new("--version"),
        OsStr::new(&package.version),
        OsStr::new("--install-location"),
        OsStr::new(&package.install_location),
    ];
    if let Some(scripts) = scripts_dir {
        args.push(OsStr::new("--scripts"));
        args.push(scripts.as_os_str());
    }
    args.push(output.as_os_str());

    run_tool("pkgbuild", toolchain.pkgbuild(), args).await
}

/// `pkgutil --expand <package> <destination>`
///
/// `destination` must not exist yet.
pub(crate) async fn pkgutil_expand(
    toolchain: &Toolchain,
    package: &Path,
    destination: &Path,
) -> Result<()> {
    run_tool(
        "pkgutil",
        toolchain.pkgutil()?,
        [
            OsStr::new("--expand"),
            package.as_os_str(),
            destination.as_os_str(),
        ],
    )
    .await
}
