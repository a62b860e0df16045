//! Weekly agenda domain: days, tasks, the persisted schedule and
//! the controller that mutates it. Free of native-only
//! dependencies so the browser front end can link it.

pub mod day;
pub mod error;
pub mod form;
pub mod manager;
pub mod notify;
pub mod schedule;
pub mod store;
pub mod task;
pub mod view;

pub use day::{
  Day,
  Locale
};
pub use error::{
  AgendaError,
  PersistenceError,
  ScheduleDecodeError,
  StorageError,
  ValidationError
};
pub use form::{
  EditPrefill,
  FormMode,
  FormReset,
  FormState
};
pub use manager::{
  AgendaManager,
  EditSession,
  SubmitAction,
  SubmitOutcome
};
pub use notify::{
  Notification,
  NotificationKind,
  Notifier
};
pub use schedule::Schedule;
pub use store::{
  DEFAULT_STORAGE_KEY,
  KeyValueStorage,
  MemoryStorage,
  Store
};
pub use task::{
  Task,
  TaskDraft,
  TaskId,
  normalize_time
};
pub use view::{
  ColumnBody,
  DayColumn,
  TaskCard,
  ViewLabels,
  WeekView
};
