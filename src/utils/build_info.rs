/// Build metadata embedded by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
}

impl BuildMetadata {
    /// Single-line summary printed by the `version` command.
    pub fn summary(&self) -> String {
        format!(
            "Tracker Core v{} ({} {}, built {} for {})",
            self.version, self.git_hash, self.git_status, self.timestamp, self.target
        )
    }
}

pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("TRACKER_CORE_BUILD_HASH").unwrap_or("unknown"),
        git_status: option_env!("TRACKER_CORE_BUILD_STATUS").unwrap_or("unknown"),
        timestamp: option_env!("TRACKER_CORE_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("TRACKER_CORE_BUILD_TARGET").unwrap_or("unknown"),
    }
}
