//! Daemon module descriptors.

/// One daemon shipped by the installer.
///
/// A module produces a standard component package named [`name`](Self::name)
/// and, when a legacy binary was built, a second package named
/// [`legacy_name`](Self::legacy_name) for Mac OS X 10.4.
///
/// All file locations are derived from [`daemon`](Self::daemon) by
/// [`Settings`](super::Settings).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonModule {
    name: String,
    friendly_name: String,
    daemon: String,
}

impl DaemonModule {
    /// Creates a module descriptor.
    pub fn new(
        name: impl Into<String>,
        friendly_name: impl Into<String>,
        daemon: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            friendly_name: friendly_name.into(),
            daemon: daemon.into(),
        }
    }

    /// The four daemons that make up MacHyperVSupport's userspace tools.
    pub fn standard_set() -> Vec<Self> {
        vec![
            Self::new("FileCopyTool", "Hyper-V File Copy Daemon", "hvfilecopyd"),
            Self::new("ShutdownTool", "Hyper-V Shutdown Daemon", "hvshutdownd"),
            Self::new("SnapshotTool", "Hyper-V Snapshot Daemon", "hvsnapshotd"),
            Self::new(
                "TimeSyncTool",
                "Hyper-V Time Synchronization Daemon",
                "hvtimesyncd",
            ),
        ]
    }

    /// Package and installer choice name, e.g. `FileCopyTool`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human readable name used in bundle package descriptions.
    pub fn friendly_name(&self) -> &str {
        &self.friendly_name
    }

    /// Daemon executable name, e.g. `hvfilecopyd`.
    pub fn daemon(&self) -> &str {
        &self.daemon
    }

    /// Package and choice name of the legacy variant, e.g. `FileCopyToolTiger`.
    pub fn legacy_name(&self) -> String {
        format!("{}Tiger", self.name)
    }
}
