use std::fmt;

use chrono::{
  DateTime,
  NaiveTime,
  Utc
};
use serde::{
  Deserialize,
  Serialize
};

use crate::day::Day;

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
  pub fn new(
    value: impl Into<String>
  ) -> Self {
    Self(value.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  fn as_millis(&self) -> Option<i64> {
    self.0.parse::<i64>().ok()
  }
}

impl fmt::Display for TaskId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for TaskId {
  fn from(value: &str) -> Self {
    Self(value.to_string())
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(deny_unknown_fields)]
pub struct Task {
  pub id:          TaskId,
  #[serde(alias = "task")]
  pub description: String,
  pub time:        String
}

impl Task {
  pub fn new(
    id: TaskId,
    description: impl Into<String>,
    time: impl Into<String>
  ) -> Self {
    Self {
      id,
      description: description.into(),
      time: time.into()
    }
  }

  /// Display form of the time slot.
  pub fn time_label(&self) -> String {
    format_time(&self.time)
  }
}

/// Values an external form submits for a task.
#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
)]
pub struct TaskDraft {
  pub description: String,
  pub day:         Option<Day>,
  pub time:        String
}

impl TaskDraft {
  pub fn new(
    description: impl Into<String>,
    day: Day,
    time: impl Into<String>
  ) -> Self {
    Self {
      description: description.into(),
      day:         Some(day),
      time:        time.into()
    }
  }
}

/// Renders `HH:MM` from a stored time, keeping the first two
/// colon-separated fields.
pub fn format_time(raw: &str) -> String {
  let mut parts = raw.split(':');
  match (parts.next(), parts.next()) {
    | (Some(hours), Some(minutes)) => {
      format!("{hours}:{minutes}")
    }
    | _ => raw.to_string()
  }
}

/// Accepts `H:MM` or `HH:MM` and returns the zero-padded `HH:MM`
/// form the schedule stores.
pub fn normalize_time(
  raw: &str
) -> Option<String> {
  NaiveTime::parse_from_str(
    raw.trim(),
    "%H:%M"
  )
  .ok()
  .map(|time| {
    time.format("%H:%M").to_string()
  })
}

/// Strict `HH:MM` check used by the schedule decoder.
pub fn is_valid_time(raw: &str) -> bool {
  let bytes = raw.as_bytes();
  if bytes.len() != 5
    || bytes[2] != b':'
  {
    return false;
  }
  let digits = |a: u8, b: u8| {
    if a.is_ascii_digit()
      && b.is_ascii_digit()
    {
      Some(
        u32::from(a - b'0') * 10
          + u32::from(b - b'0')
      )
    } else {
      None
    }
  };
  matches!(
    (
      digits(bytes[0], bytes[1]),
      digits(bytes[3], bytes[4])
    ),
    (Some(h), Some(m)) if h < 24 && m < 60
  )
}

/// Mints time-derived task ids that never repeat within one
/// manager.
#[derive(Debug, Clone, Default)]
pub struct IdMinter {
  last:  i64,
  spill: u64
}

impl IdMinter {
  /// Seeds the minter past every numeric id already in use.
  pub fn seeded<'a>(
    existing: impl Iterator<Item = &'a TaskId>
  ) -> Self {
    let last = existing
      .filter_map(TaskId::as_millis)
      .max()
      .unwrap_or(0);
    Self { last, spill: 0 }
  }

  pub fn next_id(
    &mut self,
    now: DateTime<Utc>
  ) -> TaskId {
    let millis = now.timestamp_millis();
    if millis > self.last {
      self.last = millis;
    } else if let Some(next) =
      self.last.checked_add(1)
    {
      self.last = next;
    } else {
      // numeric space exhausted
      self.spill += 1;
      return TaskId(format!(
        "{}-{}",
        self.last, self.spill
      ));
    }
    TaskId(self.last.to_string())
  }
}
