use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Icon image locations. Missing entries use the built-in icons.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IconConfig {
    /// Icon shown at startup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<PathBuf>,
    /// Icon swapped in by "Toggle icon".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate: Option<PathBuf>,
}
