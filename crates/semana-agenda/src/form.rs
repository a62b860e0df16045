use crate::day::{
  Day,
  Locale
};
use crate::task::{
  TaskDraft,
  TaskId
};
use crate::view::ViewLabels;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
  Add,
  Update(TaskId)
}

/// Data handed to the form when an edit begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPrefill {
  pub id:         TaskId,
  pub draft:      TaskDraft,
  /// The form should scroll into view and take focus.
  pub focus_form: bool
}

/// Marker returned when the form must go back to its add state.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
)]
pub struct FormReset;

/// Input state of the task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
  pub description: String,
  pub day:         Option<Day>,
  pub time:        String,
  pub mode:        FormMode
}

impl Default for FormState {
  fn default() -> Self {
    Self {
      description: String::new(),
      day:         None,
      time:        String::new(),
      mode:        FormMode::Add
    }
  }
}

impl FormState {
  pub fn submit_label(
    &self,
    locale: Locale
  ) -> &'static str {
    let labels =
      ViewLabels::for_locale(locale);
    match self.mode {
      | FormMode::Add => labels.add,
      | FormMode::Update(_) => {
        labels.update
      }
    }
  }

  pub fn is_editing(&self) -> bool {
    matches!(
      self.mode,
      FormMode::Update(_)
    )
  }

  pub fn prefill(
    &mut self,
    prefill: &EditPrefill
  ) {
    self.description =
      prefill.draft.description.clone();
    self.day = prefill.draft.day;
    self.time =
      prefill.draft.time.clone();
    self.mode =
      FormMode::Update(prefill.id.clone());
  }

  pub fn reset(&mut self, _: FormReset) {
    *self = Self::default();
  }

  pub fn draft(&self) -> TaskDraft {
    TaskDraft {
      description: self.description.clone(),
      day:         self.day,
      time:        self.time.clone()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::{
    EditPrefill,
    FormReset,
    FormState
  };
  use crate::day::{
    Day,
    Locale
  };
  use crate::task::{
    TaskDraft,
    TaskId
  };

  #[test]
  fn label_toggles_with_edit_mode() {
    let mut form = FormState::default();
    assert_eq!(
      form.submit_label(Locale::En),
      "Add task"
    );
    form.prefill(&EditPrefill {
      id:         TaskId::new("5"),
      draft:      TaskDraft::new(
        "Standup",
        Day::Tuesday,
        "08:30"
      ),
      focus_form: true
    });
    assert!(form.is_editing());
    assert_eq!(
      form.submit_label(Locale::Pt),
      "Atualizar Tarefa"
    );
    assert_eq!(
      form.draft().day,
      Some(Day::Tuesday)
    );
    form.reset(FormReset);
    assert_eq!(form, FormState::default());
  }
}
