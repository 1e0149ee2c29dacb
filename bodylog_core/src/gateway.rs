//! Storage gateway: durable key-value object storage.
//!
//! The gateway persists whole JSON-serializable objects under explicit
//! string keys. Callers always pass the key; there is no ambient default.
//! Writes are last-writer-wins over the full object.

use crate::{Error, Result};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Object store trait for persisting aggregates
pub trait ObjectGateway {
    /// Load the object stored under `key`, or None if the key is absent
    fn load_object<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>>;

    /// Store `value` under `key`, overwriting any prior value
    fn save_object<T: Serialize>(&self, key: &str, value: &T) -> Result<()>;
}

/// File-backed gateway keeping one JSON document per key.
///
/// Reads take a shared lock. Writes go to a temp file in the same
/// directory, take an exclusive lock, sync, then rename over the target so
/// a crashed writer never leaves a half-written record behind.
pub struct JsonFileGateway {
    dir: PathBuf,
}

impl JsonFileGateway {
    /// Create a gateway rooted at the given data directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl ObjectGateway for JsonFileGateway {
    fn load_object<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(&path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        let read_result = reader.read_to_string(&mut contents);
        file.unlock()?;
        read_result?;

        let value = serde_json::from_str::<T>(&contents)?;
        tracing::debug!("Loaded object {:?} from {:?}", key, path);
        Ok(Some(value))
    }

    fn save_object<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);

        let temp = NamedTempFile::new_in(&self.dir)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(value)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        // Atomically replace the previous record
        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved object {:?} to {:?}", key, path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let gateway = JsonFileGateway::new(temp_dir.path());

        let doc = Doc {
            name: "example".into(),
            count: 3,
        };
        gateway.save_object("doc", &doc).unwrap();

        let loaded: Option<Doc> = gateway.load_object("doc").unwrap();
        assert_eq!(loaded, Some(doc));
    }

    #[test]
    fn test_absent_key_returns_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let gateway = JsonFileGateway::new(temp_dir.path());

        let loaded: Option<Doc> = gateway.load_object("missing").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_overwrites_prior_value() {
        let temp_dir = tempfile::tempdir().unwrap();
        let gateway = JsonFileGateway::new(temp_dir.path());

        gateway
            .save_object("doc", &Doc { name: "a".into(), count: 1 })
            .unwrap();
        gateway
            .save_object("doc", &Doc { name: "b".into(), count: 2 })
            .unwrap();

        let loaded: Doc = gateway.load_object("doc").unwrap().unwrap();
        assert_eq!(loaded.name, "b");
        assert_eq!(loaded.count, 2);
    }

    #[test]
    fn test_corrupt_record_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let gateway = JsonFileGateway::new(temp_dir.path());

        std::fs::write(temp_dir.path().join("doc.json"), "{ invalid json }").unwrap();

        let result: Result<Option<Doc>> = gateway.load_object("doc");
        assert!(result.is_err());
    }

    #[test]
    fn test_atomic_save_leaves_no_stray_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let gateway = JsonFileGateway::new(temp_dir.path());

        gateway
            .save_object("doc", &Doc { name: "a".into(), count: 1 })
            .unwrap();

        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "doc.json")
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only doc.json, found extras: {:?}",
            extras
        );
    }
}
