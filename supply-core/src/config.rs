// Configuration
//
// Tunables load from JSON with every field optional; anything absent falls
// back to the built-in defaults.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SupplyError};
use crate::keeper::KeeperConfig;
use crate::restock::RestockConfig;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplyConfig {
    pub keeper: KeeperConfig,
    pub restock: RestockConfig,
}

impl SupplyConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| SupplyError::Config(e.to_string()))
    }
}
