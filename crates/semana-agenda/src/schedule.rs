use std::collections::{
  BTreeMap,
  BTreeSet
};

use serde::Serialize;

use crate::day::Day;
use crate::error::ScheduleDecodeError;
use crate::task::{
  Task,
  TaskId,
  is_valid_time
};

/// Day to task-list mapping. Lists are kept sorted by time and
/// a day is present only while it holds at least one task.
#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  PartialEq,
  Eq,
)]
#[serde(transparent)]
pub struct Schedule {
  days: BTreeMap<Day, Vec<Task>>
}

impl Schedule {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_empty(&self) -> bool {
    self.days.is_empty()
  }

  pub fn len(&self) -> usize {
    self
      .days
      .values()
      .map(Vec::len)
      .sum()
  }

  /// Tasks for `day`, empty when the day has none.
  pub fn tasks(
    &self,
    day: Day
  ) -> &[Task] {
    self
      .days
      .get(&day)
      .map(Vec::as_slice)
      .unwrap_or(&[])
  }

  pub fn days(
    &self
  ) -> impl Iterator<Item = (Day, &[Task])>
  {
    self.days.iter().map(|(day, tasks)| {
      (*day, tasks.as_slice())
    })
  }

  pub fn ids(
    &self
  ) -> impl Iterator<Item = &TaskId> {
    self
      .days
      .values()
      .flatten()
      .map(|task| &task.id)
  }

  pub fn find(
    &self,
    id: &TaskId
  ) -> Option<(Day, &Task)> {
    self.days.iter().find_map(
      |(day, tasks)| {
        tasks
          .iter()
          .find(|task| &task.id == id)
          .map(|task| (*day, task))
      }
    )
  }

  /// Appends `task` to `day` and re-sorts that day. Equal times
  /// keep insertion order.
  pub fn insert(
    &mut self,
    day: Day,
    task: Task
  ) {
    let tasks =
      self.days.entry(day).or_default();
    tasks.push(task);
    tasks.sort_by(|a, b| {
      a.time.cmp(&b.time)
    });
  }

  /// Removes the task with `id` from whichever day holds it and
  /// prunes days left empty.
  pub fn remove(
    &mut self,
    id: &TaskId
  ) -> Option<(Day, Task)> {
    let mut removed = None;
    for (day, tasks) in &mut self.days {
      if let Some(idx) = tasks
        .iter()
        .position(|task| &task.id == id)
      {
        removed =
          Some((*day, tasks.remove(idx)));
        break;
      }
    }
    self
      .days
      .retain(|_, tasks| !tasks.is_empty());
    removed
  }

  pub fn to_json(
    &self
  ) -> Result<String, serde_json::Error> {
    serde_json::to_string(self)
  }

  /// Decodes a persisted payload, rejecting it wholesale when any
  /// task breaks the schema.
  pub fn from_json(
    raw: &str
  ) -> Result<Self, ScheduleDecodeError> {
    let days: BTreeMap<Day, Vec<Task>> =
      serde_json::from_str(raw)?;

    let mut seen = BTreeSet::new();
    let mut schedule = Schedule::new();
    for (day, tasks) in days {
      for task in tasks {
        if task.id.as_str().trim().is_empty()
        {
          return Err(
            ScheduleDecodeError::EmptyId {
              day: day.to_string()
            }
          );
        }
        if task
          .description
          .trim()
          .is_empty()
        {
          return Err(ScheduleDecodeError::EmptyDescription {
            day: day.to_string(),
            id:  task.id
          });
        }
        if !is_valid_time(&task.time) {
          return Err(ScheduleDecodeError::InvalidTime {
            day:  day.to_string(),
            id:   task.id,
            time: task.time
          });
        }
        if !seen.insert(task.id.clone()) {
          return Err(
            ScheduleDecodeError::DuplicateId(
              task.id
            )
          );
        }
        schedule.insert(day, task);
      }
    }

    Ok(schedule)
  }
}

#[cfg(test)]
mod tests {
  use super::Schedule;
  use crate::day::Day;
  use crate::error::ScheduleDecodeError;
  use crate::task::{
    Task,
    TaskId
  };

  fn task(
    id: &str,
    description: &str,
    time: &str
  ) -> Task {
    Task::new(
      TaskId::new(id),
      description,
      time
    )
  }

  #[test]
  fn insert_keeps_day_sorted_by_time() {
    let mut schedule = Schedule::new();
    schedule.insert(
      Day::Tuesday,
      task("1", "Team sync", "09:00")
    );
    schedule.insert(
      Day::Tuesday,
      task("2", "Standup", "08:30")
    );
    let times: Vec<&str> = schedule
      .tasks(Day::Tuesday)
      .iter()
      .map(|t| t.time.as_str())
      .collect();
    assert_eq!(times, vec!["08:30", "09:00"]);
  }

  #[test]
  fn removing_last_task_prunes_the_day() {
    let mut schedule = Schedule::new();
    schedule.insert(
      Day::Friday,
      task("7", "Review", "16:00")
    );
    let removed = schedule
      .remove(&TaskId::new("7"))
      .expect("task removed");
    assert_eq!(removed.0, Day::Friday);
    assert!(schedule.is_empty());
    assert_eq!(
      schedule.to_json().expect("encode"),
      "{}"
    );
  }

  #[test]
  fn decoding_sorts_and_prunes_empty_days() {
    let schedule = Schedule::from_json(
      r#"{"Monday":[],"Terça":[{"id":"2","task":"B","time":"10:00"},{"id":"1","task":"A","time":"08:00"}]}"#,
    )
    .expect("decode");
    assert_eq!(schedule.len(), 2);
    assert_eq!(
      schedule.tasks(Day::Tuesday)[0]
        .description,
      "A"
    );
    assert_eq!(schedule.days().count(), 1);
  }

  #[test]
  fn decoding_rejects_duplicate_ids_and_bad_times() {
    let dup = Schedule::from_json(
      r#"{"Monday":[{"id":"1","description":"A","time":"08:00"}],"Friday":[{"id":"1","description":"B","time":"09:00"}]}"#,
    );
    assert!(matches!(
      dup,
      Err(ScheduleDecodeError::DuplicateId(_))
    ));

    let bad_time = Schedule::from_json(
      r#"{"Monday":[{"id":"1","description":"A","time":"8am"}]}"#,
    );
    assert!(matches!(
      bad_time,
      Err(ScheduleDecodeError::InvalidTime { .. })
    ));

    assert!(matches!(
      Schedule::from_json("[1,2,3]"),
      Err(ScheduleDecodeError::Json(_))
    ));
    assert!(matches!(
      Schedule::from_json(r#"{"Someday":[]}"#),
      Err(ScheduleDecodeError::Json(_))
    ));
  }
}
