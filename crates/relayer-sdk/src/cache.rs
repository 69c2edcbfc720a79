//! Registered-VK cache abstractions
//!
//! The workflow consults an injected key-value store to avoid
//! re-registering unchanged VKs. Keys are VK fingerprints
//! ([`crate::VkMaterial::fingerprint`]); values are the verbatim
//! registration payloads, success or failure alike. Entries never expire.

use crate::error::{RelayerError, Result};
use crate::types::VkRegistration;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Key-value store for registration payloads, keyed by VK fingerprint.
///
/// Implementations must serialize concurrent writers for the same
/// fingerprint.
pub trait VkCache {
    fn get(&self, fingerprint: &str) -> Result<Option<VkRegistration>>;
    fn put(&self, fingerprint: &str, registration: &VkRegistration) -> Result<()>;
}

/// In-memory cache for tests and short-lived processes.
#[derive(Debug, Default)]
pub struct MemoryVkCache {
    entries: Mutex<HashMap<String, VkRegistration>>,
}

impl MemoryVkCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VkCache for MemoryVkCache {
    fn get(&self, fingerprint: &str) -> Result<Option<VkRegistration>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| RelayerError::Cache(e.to_string()))?;
        Ok(entries.get(fingerprint).cloned())
    }

    fn put(&self, fingerprint: &str, registration: &VkRegistration) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| RelayerError::Cache(e.to_string()))?;
        entries.insert(fingerprint.to_owned(), registration.clone());
        Ok(())
    }
}

/// One JSON file per fingerprint under a directory.
///
/// The directory is created lazily on the first write.
#[derive(Debug, Clone)]
pub struct JsonFileVkCache {
    dir: PathBuf,
}

impl JsonFileVkCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self, fingerprint: &str) -> PathBuf {
        self.dir.join(format!("{fingerprint}.json"))
    }
}

impl VkCache for JsonFileVkCache {
    fn get(&self, fingerprint: &str) -> Result<Option<VkRegistration>> {
        let path = self.entry_path(fingerprint);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| RelayerError::Cache(format!("read {}: {e}", path.display())))?;
        let registration = serde_json::from_str(&text)
            .map_err(|e| RelayerError::Cache(format!("parse {}: {e}", path.display())))?;
        Ok(Some(registration))
    }

    fn put(&self, fingerprint: &str, registration: &VkRegistration) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| RelayerError::Cache(format!("create {}: {e}", self.dir.display())))?;
        let path = self.entry_path(fingerprint);
        let text = serde_json::to_string_pretty(registration)
            .map_err(|e| RelayerError::Cache(e.to_string()))?;
        fs::write(&path, text)
            .map_err(|e| RelayerError::Cache(format!("write {}: {e}", path.display())))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_cache_round_trip() {
        let cache = MemoryVkCache::new();
        assert_eq!(cache.get("fp").unwrap(), None);

        let registration = VkRegistration(json!({"vkHash": "0xabc"}));
        cache.put("fp", &registration).unwrap();
        assert_eq!(cache.get("fp").unwrap(), Some(registration));
        assert_eq!(cache.get("other").unwrap(), None);
    }

    #[test]
    fn test_file_cache_round_trip_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let registration = VkRegistration(json!({"meta": {"vkHash": "0xdef"}}));

        let writer = JsonFileVkCache::new(dir.path().join("vk-cache"));
        writer.put("fp", &registration).unwrap();

        let reader = JsonFileVkCache::new(dir.path().join("vk-cache"));
        assert_eq!(reader.get("fp").unwrap(), Some(registration));
        assert_eq!(reader.get("missing").unwrap(), None);
    }

    #[test]
    fn test_file_cache_keeps_failure_payloads() {
        let dir = tempfile::tempdir().unwrap();
        let cache = JsonFileVkCache::new(dir.path());
        let failure = VkRegistration(json!({"code": "REGISTER_VK_FAILED"}));
        cache.put("fp", &failure).unwrap();
        let cached = cache.get("fp").unwrap().unwrap();
        assert_eq!(cached.vk_hash(), None);
    }
}
