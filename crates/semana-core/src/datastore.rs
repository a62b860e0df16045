use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use semana_agenda::{KeyValueStorage, StorageError};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Key-value storage backed by one `<key>.json` file per key in the
/// data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    pub data_dir: PathBuf,
}

impl FileStorage {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let data_dir = data_dir.to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        info!(data_dir = %data_dir.display(), "opened datastore");
        Ok(Self { data_dir })
    }

    pub fn path_for(&self, key: &str) -> anyhow::Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(anyhow!("invalid storage key: {key:?}"));
        }
        Ok(self.data_dir.join(format!("{key}.json")))
    }

    #[tracing::instrument(skip(self))]
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => {
                debug!(file = %path.display(), bytes = text.len(), "read stored value");
                Ok(Some(text))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("failed reading {}", path.display())),
        }
    }

    #[tracing::instrument(skip(self, value))]
    fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let path = self.path_for(key)?;
        debug!(file = %path.display(), bytes = value.len(), "writing value atomically");

        let mut temp = NamedTempFile::new_in(&self.data_dir)?;
        temp.write_all(value.as_bytes())?;
        temp.flush()?;
        temp.persist(&path)
            .map_err(|err| anyhow!("failed to persist {}: {}", path.display(), err))?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.read(key)
            .map_err(|err| StorageError::new(format!("{err:#}")))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.write(key, value)
            .map_err(|err| StorageError::new(format!("{err:#}")))
    }
}

#[cfg(test)]
mod tests {
    use semana_agenda::KeyValueStorage;
    use tempfile::tempdir;

    use super::FileStorage;

    #[test]
    fn missing_key_reads_as_none_and_writes_round_trip() {
        let temp = tempdir().expect("tempdir");
        let mut storage = FileStorage::open(temp.path()).expect("open storage");
        assert_eq!(storage.get_item("weeklyAgenda").expect("read"), None);

        storage
            .set_item("weeklyAgenda", "{}")
            .expect("write value");
        assert_eq!(
            storage.get_item("weeklyAgenda").expect("read back"),
            Some("{}".to_string())
        );
        assert!(temp.path().join("weeklyAgenda.json").exists());
    }

    #[test]
    fn rejects_keys_that_escape_the_data_dir() {
        let temp = tempdir().expect("tempdir");
        let storage = FileStorage::open(temp.path()).expect("open storage");
        assert!(storage.path_for("../evil").is_err());
        assert!(storage.get_item("").is_err());
    }
}
