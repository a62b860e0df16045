use thiserror::Error;

use crate::task::TaskId;

#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum ValidationError {
  #[error("description is required")]
  MissingDescription,
  #[error("day is required")]
  MissingDay,
  #[error("time is required")]
  MissingTime,
  #[error("expected HH:MM time, got {0:?}")]
  InvalidTime(String),
  #[error("unknown day: {0}")]
  UnknownDay(String),
  #[error("unknown locale: {0}")]
  UnknownLocale(String)
}

/// Failure reported by a key-value backend.
#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
#[error("{message}")]
pub struct StorageError {
  pub message: String
}

impl StorageError {
  pub fn new(
    message: impl Into<String>
  ) -> Self {
    Self {
      message: message.into()
    }
  }
}

/// A persisted payload that does not match the schedule schema.
#[derive(Debug, Error)]
pub enum ScheduleDecodeError {
  #[error("malformed schedule json: {0}")]
  Json(#[from] serde_json::Error),
  #[error(
    "task {id} on {day} has an empty description"
  )]
  EmptyDescription {
    day: String,
    id:  TaskId
  },
  #[error("task on {day} has an empty id")]
  EmptyId { day: String },
  #[error(
    "task {id} on {day} has invalid time {time:?}"
  )]
  InvalidTime {
    day:  String,
    id:   TaskId,
    time: String
  },
  #[error("duplicate task id {0}")]
  DuplicateId(TaskId)
}

#[derive(Debug, Error)]
pub enum PersistenceError {
  #[error(
    "failed reading stored schedule under {key}: {source}"
  )]
  Read {
    key:    String,
    #[source]
    source: StorageError
  },
  #[error(
    "failed writing schedule under {key}: {source}"
  )]
  Write {
    key:    String,
    #[source]
    source: StorageError
  },
  #[error(
    "discarded stored schedule under {key}: {source}"
  )]
  Decode {
    key:    String,
    #[source]
    source: ScheduleDecodeError
  },
  #[error("failed encoding schedule: {0}")]
  Encode(#[source] serde_json::Error)
}

#[derive(Debug, Error)]
pub enum AgendaError {
  #[error(transparent)]
  Validation(#[from] ValidationError),
  #[error(transparent)]
  Persistence(#[from] PersistenceError)
}
