use chrono::{
  DateTime,
  Duration,
  Utc
};

/// How long a notification stays visible.
pub const NOTIFICATION_TTL_MS: i64 =
  3_000;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
)]
pub enum NotificationKind {
  Success,
  Warning,
  Error
}

impl NotificationKind {
  pub fn css_class(self) -> &'static str {
    match self {
      | NotificationKind::Success => {
        "success"
      }
      | NotificationKind::Warning => {
        "warning"
      }
      | NotificationKind::Error => "error"
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
  pub kind:     NotificationKind,
  pub message:  String,
  pub shown_at: DateTime<Utc>,
  pub seq:      u64
}

impl Notification {
  pub fn hides_at(
    &self
  ) -> DateTime<Utc> {
    self.shown_at
      + Duration::milliseconds(
        NOTIFICATION_TTL_MS
      )
  }

  pub fn is_visible(
    &self,
    now: DateTime<Utc>
  ) -> bool {
    now < self.hides_at()
  }
}

/// Single-slot notification holder. A new message replaces the
/// current one and restarts its visibility window.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
  current:  Option<Notification>,
  next_seq: u64
}

impl Notifier {
  pub fn show(
    &mut self,
    kind: NotificationKind,
    message: impl Into<String>,
    now: DateTime<Utc>
  ) -> &Notification {
    self.next_seq += 1;
    let message = message.into();
    tracing::debug!(
      ?kind,
      seq = self.next_seq,
      %message,
      "notification shown"
    );
    self.current.insert(Notification {
      kind,
      message,
      shown_at: now,
      seq: self.next_seq
    })
  }

  pub fn visible(
    &self,
    now: DateTime<Utc>
  ) -> Option<&Notification> {
    self
      .current
      .as_ref()
      .filter(|note| note.is_visible(now))
  }

  /// Most recent notification regardless of expiry.
  pub fn latest(
    &self
  ) -> Option<&Notification> {
    self.current.as_ref()
  }

  /// Hides the current notification if it is still `seq`.
  pub fn dismiss(
    &mut self,
    seq: u64
  ) -> bool {
    if self
      .current
      .as_ref()
      .is_some_and(|note| note.seq == seq)
    {
      self.current = None;
      return true;
    }
    false
  }
}
