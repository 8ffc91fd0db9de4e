//! Configuration structures for a packaging run.
//!
//! Provides the package identity, the installed file layout, the daemon
//! module table, and the [`SettingsBuilder`] that assembles them into
//! [`Settings`].

mod builder;
mod configuration;
mod core;
mod layout;
mod module;
mod package;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use configuration::configuration_from_build_dir;
pub use core::Settings;
pub use layout::PayloadLayout;
pub use module::DaemonModule;
pub use package::PackageSettings;
