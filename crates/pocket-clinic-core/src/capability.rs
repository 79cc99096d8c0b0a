//! Capabilities the host may ask about before offering a feature.

use std::fmt;

/// A feature the data core may or may not provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Backing up or syncing records to a remote service
    RemoteSync,
    /// Exporting records to a file
    Export,
    /// Importing records from a file
    Import,
}

impl Capability {
    pub const ALL: [Capability; 3] = [Capability::RemoteSync, Capability::Export, Capability::Import];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::RemoteSync => "remote_sync",
            Capability::Export => "export",
            Capability::Import => "import",
        }
    }

    /// None of the capabilities are implemented yet.
    pub fn is_supported(&self) -> bool {
        match self {
            Capability::RemoteSync | Capability::Export | Capability::Import => false,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_supported_yet() {
        assert!(Capability::ALL.iter().all(|c| !c.is_supported()));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Capability::RemoteSync.to_string(), "remote_sync");
    }
}
