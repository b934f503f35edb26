use crate::auth::AdminCredentials;
use crate::types::*;
use print_quote::RateCard;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Shop-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    /// JSON file backing the order book and file registry
    pub store_path: PathBuf,
    /// Prefix for every key written to the store
    pub namespace: String,
    pub rates: RateCard,
    pub admin: AdminCredentials,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("pshop-store.json"),
            namespace: "xerox".to_string(),
            rates: RateCard::default(),
            admin: AdminCredentials::default(),
        }
    }
}

impl ShopConfig {
    /// Load configuration from a JSON file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config: ShopConfig = serde_json::from_slice(&bytes)
            .map_err(|e| OrderError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, using defaults when the file does not exist
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match Self::load(path).await {
            Err(OrderError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Save configuration to a JSON file
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| OrderError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.store_path.as_os_str().is_empty() {
            return Err(OrderError::Config("No store path specified".to_string()));
        }
        self.rates.validate()?;
        Ok(())
    }
}
