//! Packaging run orchestration.
//!
//! - [`orchestrator`] - the [`Bundler`] driving a full run
//! - [`tool_detection`] - locating `pkgbuild` and `pkgutil`
//! - [`checksum`] - SHA-256 of the finished archive

mod checksum;
mod orchestrator;
mod tool_detection;

pub use orchestrator::Bundler;
pub use tool_detection::Toolchain;
