use chrono::{
  DateTime,
  Utc
};
use tracing::{
  debug,
  info,
  warn
};

use crate::day::{
  Day,
  Locale
};
use crate::error::{
  AgendaError,
  ValidationError
};
use crate::form::{
  EditPrefill,
  FormReset
};
use crate::notify::{
  Notification,
  NotificationKind,
  Notifier
};
use crate::schedule::Schedule;
use crate::store::{
  KeyValueStorage,
  Store
};
use crate::task::{
  IdMinter,
  Task,
  TaskDraft,
  TaskId,
  normalize_time
};
use crate::view::{
  ViewLabels,
  WeekView
};

#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
)]
pub enum EditSession {
  #[default]
  Idle,
  Editing(TaskId)
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
)]
pub enum SubmitAction {
  Added,
  Updated
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
  pub id:        TaskId,
  pub day:       Day,
  pub action:    SubmitAction,
  pub persisted: bool,
  pub reset:     FormReset
}

/// Owns the schedule, the edit session and the notification slot.
/// Every mutation persists through the store and rebuilds the view.
#[derive(Debug, Clone)]
pub struct AgendaManager<S> {
  store:    Store<S>,
  schedule: Schedule,
  session:  EditSession,
  minter:   IdMinter,
  notifier: Notifier,
  locale:   Locale,
  view:     WeekView
}

impl<S: KeyValueStorage> AgendaManager<S> {
  /// Loads the stored schedule. Unreadable or invalid payloads
  /// are discarded with a warning notification.
  #[tracing::instrument(skip(store, now))]
  pub fn open(
    store: Store<S>,
    locale: Locale,
    now: DateTime<Utc>
  ) -> Self {
    let labels =
      ViewLabels::for_locale(locale);
    let mut notifier = Notifier::default();
    let schedule = match store.load() {
      | Ok(schedule) => {
        notifier.show(
          NotificationKind::Success,
          labels.loaded,
          now
        );
        schedule
      }
      | Err(error) => {
        warn!(
          %error,
          "discarding stored schedule"
        );
        notifier.show(
          NotificationKind::Warning,
          labels.load_failed,
          now
        );
        Schedule::new()
      }
    };

    let minter =
      IdMinter::seeded(schedule.ids());
    let view =
      WeekView::build(&schedule, locale);
    info!(
      tasks = schedule.len(),
      "agenda ready"
    );

    Self {
      store,
      schedule,
      session: EditSession::Idle,
      minter,
      notifier,
      locale,
      view
    }
  }

  pub fn schedule(&self) -> &Schedule {
    &self.schedule
  }

  pub fn editing(&self) -> Option<&TaskId> {
    match &self.session {
      | EditSession::Idle => None,
      | EditSession::Editing(id) => {
        Some(id)
      }
    }
  }

  pub fn session(&self) -> &EditSession {
    &self.session
  }

  pub fn view(&self) -> &WeekView {
    &self.view
  }

  pub fn locale(&self) -> Locale {
    self.locale
  }

  pub fn labels(&self) -> ViewLabels {
    ViewLabels::for_locale(self.locale)
  }

  pub fn store(&self) -> &Store<S> {
    &self.store
  }

  pub fn find(
    &self,
    id: &TaskId
  ) -> Option<(Day, &Task)> {
    self.schedule.find(id)
  }

  pub fn notification(
    &self,
    now: DateTime<Utc>
  ) -> Option<&Notification> {
    self.notifier.visible(now)
  }

  pub fn latest_notification(
    &self
  ) -> Option<&Notification> {
    self.notifier.latest()
  }

  pub fn dismiss_notification(
    &mut self,
    seq: u64
  ) -> bool {
    self.notifier.dismiss(seq)
  }

  /// Adds a task, or replaces the task under edit keeping its id.
  /// Validation happens before anything is removed.
  #[tracing::instrument(skip(self, draft, now))]
  pub fn add_or_update(
    &mut self,
    draft: TaskDraft,
    now: DateTime<Utc>
  ) -> Result<SubmitOutcome, AgendaError>
  {
    let labels = self.labels();
    let (description, day, time) =
      match validate(&draft) {
        | Ok(valid) => valid,
        | Err(error) => {
          debug!(%error, "rejected task draft");
          self.notifier.show(
            NotificationKind::Error,
            labels.invalid,
            now
          );
          return Err(error.into());
        }
      };

    let (id, action) =
      match std::mem::take(
        &mut self.session
      ) {
        | EditSession::Editing(id) => {
          if self
            .schedule
            .remove(&id)
            .is_none()
          {
            warn!(
              id = %id,
              "task under edit vanished; \
               re-adding it"
            );
          }
          (id, SubmitAction::Updated)
        }
        | EditSession::Idle => {
          (
            self.fresh_id(now),
            SubmitAction::Added
          )
        }
      };

    self.schedule.insert(
      day,
      Task::new(
        id.clone(),
        description,
        time
      )
    );

    self.notifier.show(
      NotificationKind::Success,
      match action {
        | SubmitAction::Added => {
          labels.added
        }
        | SubmitAction::Updated => {
          labels.updated
        }
      },
      now
    );
    let persisted = self.commit(now);

    info!(
      id = %id,
      day = %day,
      ?action,
      "task saved"
    );
    Ok(SubmitOutcome {
      id,
      day,
      action,
      persisted,
      reset: FormReset
    })
  }

  /// Removes the task from whichever day holds it. Persists and
  /// re-renders even when nothing matched.
  #[tracing::instrument(skip(self, id, now), fields(id = %id))]
  pub fn remove(
    &mut self,
    id: &TaskId,
    notify: bool,
    now: DateTime<Utc>
  ) -> bool {
    let removed =
      self.schedule.remove(id).is_some();
    if removed && notify {
      let labels = self.labels();
      self.notifier.show(
        NotificationKind::Success,
        labels.removed,
        now
      );
    }
    if !removed {
      debug!("no task matched");
    }
    if self.editing() == Some(id) {
      self.session = EditSession::Idle;
    }
    self.commit(now);
    removed
  }

  /// Starts editing `id`. Unknown ids leave everything unchanged.
  #[tracing::instrument(skip(self, id), fields(id = %id))]
  pub fn begin_edit(
    &mut self,
    id: &TaskId
  ) -> Option<EditPrefill> {
    let (day, task) =
      self.schedule.find(id)?;
    let prefill = EditPrefill {
      id:         task.id.clone(),
      draft:      TaskDraft {
        description: task
          .description
          .clone(),
        day:         Some(day),
        time:        task.time.clone()
      },
      focus_form: true
    };
    self.session =
      EditSession::Editing(id.clone());
    debug!("edit session started");
    Some(prefill)
  }

  pub fn cancel_edit(
    &mut self
  ) -> FormReset {
    if let EditSession::Editing(id) =
      std::mem::take(&mut self.session)
    {
      debug!(id = %id, "edit session cancelled");
    }
    FormReset
  }

  fn fresh_id(
    &mut self,
    now: DateTime<Utc>
  ) -> TaskId {
    loop {
      let id = self.minter.next_id(now);
      if self.schedule.find(&id).is_none()
      {
        return id;
      }
    }
  }

  /// Saves and rebuilds the view. A failed save leaves the
  /// in-memory schedule authoritative and raises a warning.
  fn commit(
    &mut self,
    now: DateTime<Utc>
  ) -> bool {
    let saved =
      match self.store.save(&self.schedule) {
        | Ok(()) => true,
        | Err(error) => {
          warn!(%error, "failed to persist schedule");
          let labels = self.labels();
          self.notifier.show(
            NotificationKind::Warning,
            labels.save_failed,
            now
          );
          false
        }
      };
    self.refresh_view();
    saved
  }

  fn refresh_view(&mut self) {
    let next = WeekView::build(
      &self.schedule,
      self.locale
    );
    let changed: Vec<Day> = next
      .diff(&self.view)
      .into_iter()
      .map(|change| change.day)
      .collect();
    debug!(?changed, "week view rebuilt");
    self.view = next;
  }
}

fn validate(
  draft: &TaskDraft
) -> Result<(String, Day, String), ValidationError>
{
  let description =
    draft.description.trim();
  if description.is_empty() {
    return Err(
      ValidationError::MissingDescription
    );
  }
  let day = draft
    .day
    .ok_or(ValidationError::MissingDay)?;
  let time = draft.time.trim();
  if time.is_empty() {
    return Err(
      ValidationError::MissingTime
    );
  }
  let time = normalize_time(time)
    .ok_or_else(|| {
      ValidationError::InvalidTime(
        time.to_string()
      )
    })?;
  Ok((
    description.to_string(),
    day,
    time
  ))
}

#[cfg(test)]
mod tests {
  use chrono::{
    DateTime,
    Duration,
    TimeZone,
    Utc
  };

  use super::{
    AgendaManager,
    EditSession,
    SubmitAction
  };
  use crate::day::{
    Day,
    Locale
  };
  use crate::error::{
    AgendaError,
    ValidationError
  };
  use crate::notify::NotificationKind;
  use crate::store::{
    DEFAULT_STORAGE_KEY,
    KeyValueStorage,
    MemoryStorage,
    Store
  };
  use crate::task::{
    TaskDraft,
    TaskId
  };

  fn now() -> DateTime<Utc> {
    Utc
      .with_ymd_and_hms(
        2026, 3, 2, 9, 0, 0
      )
      .single()
      .expect("valid now")
  }

  fn manager() -> AgendaManager<MemoryStorage>
  {
    AgendaManager::open(
      Store::new(MemoryStorage::new()),
      Locale::En,
      now()
    )
  }

  fn descriptions(
    agenda: &AgendaManager<MemoryStorage>,
    day: Day
  ) -> Vec<String> {
    agenda
      .schedule()
      .tasks(day)
      .iter()
      .map(|task| task.description.clone())
      .collect()
  }

  #[test]
  fn adds_keep_tuesday_sorted() {
    let mut agenda = manager();
    agenda
      .add_or_update(
        TaskDraft::new(
          "Team sync",
          Day::Tuesday,
          "09:00"
        ),
        now()
      )
      .expect("add team sync");
    let outcome = agenda
      .add_or_update(
        TaskDraft::new(
          "Standup",
          Day::Tuesday,
          "08:30"
        ),
        now()
      )
      .expect("add standup");
    assert_eq!(
      outcome.action,
      SubmitAction::Added
    );
    assert!(outcome.persisted);
    assert_eq!(
      descriptions(&agenda, Day::Tuesday),
      vec!["Standup", "Team sync"]
    );
    assert_eq!(
      agenda
        .notification(now())
        .map(|note| note.message.as_str()),
      Some("Task added")
    );
  }

  #[test]
  fn editing_moves_task_and_keeps_id() {
    let mut agenda = manager();
    agenda
      .add_or_update(
        TaskDraft::new(
          "Team sync",
          Day::Tuesday,
          "09:00"
        ),
        now()
      )
      .expect("add team sync");
    let standup = agenda
      .add_or_update(
        TaskDraft::new(
          "Standup",
          Day::Tuesday,
          "08:30"
        ),
        now()
      )
      .expect("add standup")
      .id;

    let prefill = agenda
      .begin_edit(&standup)
      .expect("standup exists");
    assert_eq!(
      prefill.draft.day,
      Some(Day::Tuesday)
    );
    assert!(prefill.focus_form);

    let mut draft = prefill.draft;
    draft.day = Some(Day::Wednesday);
    let outcome = agenda
      .add_or_update(draft, now())
      .expect("update standup");

    assert_eq!(outcome.id, standup);
    assert_eq!(
      outcome.action,
      SubmitAction::Updated
    );
    assert_eq!(
      descriptions(&agenda, Day::Tuesday),
      vec!["Team sync"]
    );
    assert_eq!(
      descriptions(&agenda, Day::Wednesday),
      vec!["Standup"]
    );
    assert_eq!(agenda.schedule().len(), 2);
    assert_eq!(
      agenda.session(),
      &EditSession::Idle
    );
    assert_eq!(
      agenda
        .latest_notification()
        .map(|note| note.message.as_str()),
      Some("Task updated")
    );
  }

  #[test]
  fn empty_description_changes_nothing() {
    let mut agenda = manager();
    agenda
      .add_or_update(
        TaskDraft::new(
          "Team sync",
          Day::Tuesday,
          "09:00"
        ),
        now()
      )
      .expect("add team sync");
    let before = agenda.schedule().clone();

    let result = agenda.add_or_update(
      TaskDraft::new(
        "   ",
        Day::Tuesday,
        "10:00"
      ),
      now()
    );
    assert!(matches!(
      result,
      Err(AgendaError::Validation(
        ValidationError::MissingDescription
      ))
    ));
    assert_eq!(agenda.schedule(), &before);
    let note = agenda
      .notification(now())
      .expect("error shown");
    assert_eq!(
      note.kind,
      NotificationKind::Error
    );
  }

  #[test]
  fn invalid_edit_keeps_original_task_and_session() {
    let mut agenda = manager();
    let id = agenda
      .add_or_update(
        TaskDraft::new(
          "Gym",
          Day::Monday,
          "07:00"
        ),
        now()
      )
      .expect("add gym")
      .id;
    agenda.begin_edit(&id).expect("gym exists");

    let result = agenda.add_or_update(
      TaskDraft {
        description: "Gym".to_string(),
        day:         None,
        time:        "07:00".to_string()
      },
      now()
    );
    assert!(result.is_err());
    assert!(agenda.find(&id).is_some());
    assert_eq!(agenda.editing(), Some(&id));
  }

  #[test]
  fn removing_last_task_drops_day_and_notifies() {
    let mut agenda = manager();
    let id = agenda
      .add_or_update(
        TaskDraft::new(
          "Review",
          Day::Friday,
          "16:00"
        ),
        now()
      )
      .expect("add review")
      .id;
    assert!(agenda.remove(&id, true, now()));
    assert!(agenda.schedule().is_empty());
    assert_eq!(
      agenda
        .latest_notification()
        .map(|note| note.message.as_str()),
      Some("Task removed")
    );
    assert!(!agenda.remove(
      &TaskId::new("missing"),
      true,
      now()
    ));
  }

  #[test]
  fn begin_edit_on_unknown_id_is_a_no_op() {
    let mut agenda = manager();
    assert!(
      agenda
        .begin_edit(&TaskId::new("nope"))
        .is_none()
    );
    assert_eq!(
      agenda.session(),
      &EditSession::Idle
    );
  }

  #[test]
  fn cancel_edit_returns_to_idle_and_next_submit_adds() {
    let mut agenda = manager();
    let id = agenda
      .add_or_update(
        TaskDraft::new(
          "Gym",
          Day::Monday,
          "07:00"
        ),
        now()
      )
      .expect("add gym")
      .id;
    agenda.begin_edit(&id).expect("gym exists");
    agenda.cancel_edit();
    let outcome = agenda
      .add_or_update(
        TaskDraft::new(
          "Gym",
          Day::Monday,
          "07:00"
        ),
        now()
      )
      .expect("add second gym");
    assert_eq!(
      outcome.action,
      SubmitAction::Added
    );
    assert_ne!(outcome.id, id);
    assert_eq!(agenda.schedule().len(), 2);
  }

  #[test]
  fn failed_save_warns_but_keeps_memory_state() {
    let mut storage = MemoryStorage::new();
    storage.fail_writes = true;
    let mut agenda = AgendaManager::open(
      Store::new(storage),
      Locale::En,
      now()
    );
    let outcome = agenda
      .add_or_update(
        TaskDraft::new(
          "Gym",
          Day::Monday,
          "07:00"
        ),
        now()
      )
      .expect("add gym");
    assert!(!outcome.persisted);
    assert_eq!(agenda.schedule().len(), 1);
    let note = agenda
      .notification(
        now() + Duration::seconds(1)
      )
      .expect("warning shown");
    assert_eq!(
      note.kind,
      NotificationKind::Warning
    );
  }

  #[test]
  fn corrupt_storage_starts_empty_with_warning() {
    let storage = MemoryStorage::new()
      .with_item(
        DEFAULT_STORAGE_KEY,
        r#"{"Monday":"not a list"}"#
      );
    let agenda = AgendaManager::open(
      Store::new(storage),
      Locale::Pt,
      now()
    );
    assert!(agenda.schedule().is_empty());
    assert_eq!(
      agenda
        .notification(now())
        .map(|note| note.message.as_str()),
      Some("Erro ao carregar tarefas salvas")
    );
  }

  #[test]
  fn reopening_loads_what_was_saved() {
    let mut agenda = manager();
    agenda
      .add_or_update(
        TaskDraft::new(
          "Standup",
          Day::Tuesday,
          "08:30"
        ),
        now()
      )
      .expect("add standup");
    let storage =
      agenda.store().storage().clone();
    let reopened = AgendaManager::open(
      Store::new(storage),
      Locale::En,
      now()
    );
    assert_eq!(
      reopened.schedule(),
      agenda.schedule()
    );
    assert_eq!(
      reopened.view(),
      agenda.view()
    );
  }

  #[test]
  fn short_hours_are_padded_and_survive_reopen() {
    let mut agenda = manager();
    agenda
      .add_or_update(
        TaskDraft::new(
          "Team sync",
          Day::Tuesday,
          "09:00"
        ),
        now()
      )
      .expect("add team sync");
    agenda
      .add_or_update(
        TaskDraft::new(
          "Standup",
          Day::Tuesday,
          "8:30"
        ),
        now()
      )
      .expect("add standup");

    let times: Vec<&str> = agenda
      .schedule()
      .tasks(Day::Tuesday)
      .iter()
      .map(|task| task.time.as_str())
      .collect();
    assert_eq!(times, vec!["08:30", "09:00"]);

    let storage =
      agenda.store().storage().clone();
    let reopened = AgendaManager::open(
      Store::new(storage),
      Locale::En,
      now()
    );
    assert_eq!(
      reopened.schedule(),
      agenda.schedule()
    );
    assert_eq!(
      reopened
        .notification(now())
        .map(|note| note.kind),
      Some(NotificationKind::Success)
    );
  }

  #[test]
  fn malformed_time_is_rejected_without_saving() {
    let mut agenda = manager();
    for bad in ["8am", "09:00:00", "24:00"] {
      let result = agenda.add_or_update(
        TaskDraft::new(
          "Gym",
          Day::Monday,
          bad
        ),
        now()
      );
      assert!(matches!(
        result,
        Err(AgendaError::Validation(
          ValidationError::InvalidTime(_)
        ))
      ));
    }
    assert!(agenda.schedule().is_empty());
    assert_eq!(
      agenda
        .store()
        .storage()
        .get_item(DEFAULT_STORAGE_KEY)
        .expect("read storage"),
      None
    );
  }

  #[test]
  fn add_after_largest_numeric_id_still_mints_a_fresh_id() {
    let storage = MemoryStorage::new()
      .with_item(
        DEFAULT_STORAGE_KEY,
        r#"{"Monday":[{"id":"9223372036854775807","description":"Gym","time":"07:00"}]}"#
      );
    let mut agenda = AgendaManager::open(
      Store::new(storage),
      Locale::En,
      now()
    );
    let outcome = agenda
      .add_or_update(
        TaskDraft::new(
          "Read",
          Day::Monday,
          "21:00"
        ),
        now()
      )
      .expect("add read");
    assert_ne!(
      outcome.id,
      TaskId::new(i64::MAX.to_string())
    );
    assert_eq!(agenda.schedule().len(), 2);
  }
}
