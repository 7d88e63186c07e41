use crate::config::default_tooltip;

use serde::{Deserialize, Serialize};

/// Tray icon configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrayConfig {
    /// Hover text shown when the app starts.
    #[serde(default = "default_tooltip")]
    pub tooltip: String,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            tooltip: default_tooltip(),
        }
    }
}
