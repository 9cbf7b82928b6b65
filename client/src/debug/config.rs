//! Diagnostics configuration from environment variables

use std::path::PathBuf;

/// Diagnostics configuration
#[derive(Debug, Clone)]
pub struct DebugConfig {
    /// Log directory (for rotation)
    pub log_dir: PathBuf,
    /// Log level filter (e.g., "client=debug,info")
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_level: "client=info,warn".to_string(),
        }
    }
}

impl DebugConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let log_dir = std::env::var("BANK_CLIENT_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("logs"));

        Self {
            log_dir,
            log_level: std::env::var("BANK_CLIENT_LOG")
                .unwrap_or_else(|_| "client=info,warn".to_string()),
        }
    }

    /// Check if debug logging is enabled
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_is_info() {
        let config = DebugConfig::default();
        assert_eq!(config.log_level, "client=info,warn");
        assert!(!config.is_debug_enabled());
    }
}
