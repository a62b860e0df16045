use std::collections::HashMap;

use tracing::{
  debug,
  info
};

use crate::error::{
  PersistenceError,
  StorageError
};
use crate::schedule::Schedule;

pub const DEFAULT_STORAGE_KEY: &str =
  "weeklyAgenda";

/// String key-value backend the schedule is persisted into.
pub trait KeyValueStorage {
  fn get_item(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>;

  fn set_item(
    &mut self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError>;
}

/// In-process storage. `fail_writes` simulates a full quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
  items:           HashMap<String, String>,
  pub fail_writes: bool
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_item(
    mut self,
    key: &str,
    value: &str
  ) -> Self {
    self.items.insert(
      key.to_string(),
      value.to_string()
    );
    self
  }
}

impl KeyValueStorage for MemoryStorage {
  fn get_item(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>
  {
    Ok(self.items.get(key).cloned())
  }

  fn set_item(
    &mut self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError> {
    if self.fail_writes {
      return Err(StorageError::new(
        "storage quota exceeded"
      ));
    }
    self.items.insert(
      key.to_string(),
      value.to_string()
    );
    Ok(())
  }
}

/// Reads and writes the schedule under a single storage key.
#[derive(Debug, Clone)]
pub struct Store<S> {
  storage: S,
  key:     String
}

impl<S: KeyValueStorage> Store<S> {
  pub fn new(storage: S) -> Self {
    Self::with_key(
      storage,
      DEFAULT_STORAGE_KEY
    )
  }

  pub fn with_key(
    storage: S,
    key: impl Into<String>
  ) -> Self {
    Self {
      storage,
      key: key.into()
    }
  }

  pub fn key(&self) -> &str {
    &self.key
  }

  pub fn storage(&self) -> &S {
    &self.storage
  }

  /// Absent value yields an empty schedule.
  #[tracing::instrument(skip(self), fields(key = %self.key))]
  pub fn load(
    &self
  ) -> Result<Schedule, PersistenceError>
  {
    let raw = self
      .storage
      .get_item(&self.key)
      .map_err(|source| {
        PersistenceError::Read {
          key: self.key.clone(),
          source
        }
      })?;

    let Some(raw) = raw else {
      debug!(
        "no stored schedule; starting \
         empty"
      );
      return Ok(Schedule::new());
    };

    let schedule = Schedule::from_json(
      &raw
    )
    .map_err(|source| {
      PersistenceError::Decode {
        key: self.key.clone(),
        source
      }
    })?;

    info!(
      tasks = schedule.len(),
      "loaded schedule"
    );
    Ok(schedule)
  }

  #[tracing::instrument(skip(self, schedule), fields(key = %self.key))]
  pub fn save(
    &mut self,
    schedule: &Schedule
  ) -> Result<(), PersistenceError> {
    let json = schedule
      .to_json()
      .map_err(PersistenceError::Encode)?;
    self
      .storage
      .set_item(&self.key, &json)
      .map_err(|source| {
        PersistenceError::Write {
          key: self.key.clone(),
          source
        }
      })?;
    debug!(
      tasks = schedule.len(),
      bytes = json.len(),
      "saved schedule"
    );
    Ok(())
  }
}
