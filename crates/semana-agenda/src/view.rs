//! Declarative week grid.
//!
//! `WeekView::build` is a pure function of the schedule; front
//! ends either render the model directly (yew, terminal) or emit
//! `to_markup`. `diff` reports which columns changed between two
//! builds so a front end only touches those.

use crate::day::{
  Day,
  Locale
};
use crate::schedule::Schedule;
use crate::task::TaskId;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
)]
pub struct ViewLabels {
  pub empty_day:      &'static str,
  pub edit:           &'static str,
  pub delete:         &'static str,
  pub add:            &'static str,
  pub update:         &'static str,
  pub cancel_edit:    &'static str,
  pub confirm_delete: &'static str,
  pub loaded:         &'static str,
  pub added:          &'static str,
  pub updated:        &'static str,
  pub removed:        &'static str,
  pub invalid:        &'static str,
  pub load_failed:    &'static str,
  pub save_failed:    &'static str
}

impl ViewLabels {
  pub fn for_locale(
    locale: Locale
  ) -> Self {
    match locale {
      | Locale::En => {
        Self {
          empty_day:      "No tasks scheduled",
          edit:           "Edit",
          delete:         "X",
          add:            "Add task",
          update:         "Update task",
          cancel_edit:    "Cancel edit",
          confirm_delete: "Delete this task?",
          loaded:         "Agenda loaded",
          added:          "Task added",
          updated:        "Task updated",
          removed:        "Task removed",
          invalid:        "Fill in every field",
          load_failed:    "Could not load saved tasks",
          save_failed:    "Could not save tasks"
        }
      }
      | Locale::Pt => {
        Self {
          empty_day:      "Nenhuma tarefa agendada",
          edit:           "Editar",
          delete:         "X",
          add:            "Adicionar Tarefa",
          update:         "Atualizar Tarefa",
          cancel_edit:    "Cancelar Edição",
          confirm_delete: "Tem certeza que deseja excluir esta tarefa?",
          loaded:         "Agenda carregada com sucesso!",
          added:          "Tarefa adicionada com sucesso!",
          updated:        "Tarefa atualizada com sucesso!",
          removed:        "Tarefa removida com sucesso!",
          invalid:        "Preencha todos os campos corretamente",
          load_failed:    "Erro ao carregar tarefas salvas",
          save_failed:    "Erro ao salvar tarefas"
        }
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
  pub id:           TaskId,
  pub time_label:   String,
  pub description:  String,
  pub edit_label:   &'static str,
  pub delete_label: &'static str
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnBody {
  Tasks(Vec<TaskCard>),
  Empty(&'static str)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayColumn {
  pub day:    Day,
  pub class:  &'static str,
  pub header: String,
  pub body:   ColumnBody
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
)]
pub struct ColumnChange {
  pub day: Day
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekView {
  pub columns: Vec<DayColumn>
}

impl WeekView {
  pub fn build(
    schedule: &Schedule,
    locale: Locale
  ) -> Self {
    let labels =
      ViewLabels::for_locale(locale);
    let columns = Day::ALL
      .iter()
      .map(|&day| {
        let tasks = schedule.tasks(day);
        let body = if tasks.is_empty() {
          ColumnBody::Empty(
            labels.empty_day
          )
        } else {
          ColumnBody::Tasks(
            tasks
              .iter()
              .map(|task| TaskCard {
                id:           task.id.clone(),
                time_label:   task.time_label(),
                description:  task
                  .description
                  .clone(),
                edit_label:   labels.edit,
                delete_label: labels.delete
              })
              .collect()
          )
        };
        DayColumn {
          day,
          class: day.css_class(),
          header: day.header(locale),
          body
        }
      })
      .collect();

    Self { columns }
  }

  pub fn column(
    &self,
    day: Day
  ) -> Option<&DayColumn> {
    self
      .columns
      .iter()
      .find(|column| column.day == day)
  }

  /// Columns whose rendered content differs from `previous`.
  pub fn diff(
    &self,
    previous: &WeekView
  ) -> Vec<ColumnChange> {
    self
      .columns
      .iter()
      .filter(|column| {
        previous.column(column.day)
          != Some(*column)
      })
      .map(|column| ColumnChange {
        day: column.day
      })
      .collect()
  }

  pub fn to_markup(&self) -> String {
    let mut html = String::new();
    for column in &self.columns {
      html.push_str(&format!(
        "<div class=\"day-column {}\">\
         <div class=\"day-header\">{}</div>\
         <div class=\"tasks-container\" id=\"tasks-{}\">",
        column.class,
        escape_html(&column.header),
        column.day.name()
      ));
      match &column.body {
        | ColumnBody::Tasks(cards) => {
          for card in cards {
            let id = escape_html(
              card.id.as_str()
            );
            html.push_str(&format!(
              "<div class=\"task-item\">\
               <div class=\"task-time\">{}</div>\
               <div class=\"task-content\">{}</div>\
               <div class=\"task-actions\">\
               <button class=\"edit-btn\" data-id=\"{id}\">{}</button>\
               <button class=\"delete-btn\" data-id=\"{id}\">{}</button>\
               </div></div>",
              escape_html(&card.time_label),
              escape_html(&card.description),
              escape_html(card.edit_label),
              escape_html(card.delete_label)
            ));
          }
        }
        | ColumnBody::Empty(text) => {
          html.push_str(&format!(
            "<div class=\"empty-day\">{}</div>",
            escape_html(text)
          ));
        }
      }
      html.push_str("</div></div>");
    }
    html
  }
}

pub fn escape_html(raw: &str) -> String {
  let mut out =
    String::with_capacity(raw.len());
  for ch in raw.chars() {
    match ch {
      | '&' => out.push_str("&amp;"),
      | '<' => out.push_str("&lt;"),
      | '>' => out.push_str("&gt;"),
      | '"' => out.push_str("&quot;"),
      | '\'' => out.push_str("&#39;"),
      | other => out.push(other)
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::{
    ColumnBody,
    WeekView
  };
  use crate::day::{
    Day,
    Locale
  };
  use crate::schedule::Schedule;
  use crate::task::{
    Task,
    TaskId
  };

  fn sample() -> Schedule {
    let mut schedule = Schedule::new();
    schedule.insert(
      Day::Tuesday,
      Task::new(
        TaskId::new("1"),
        "Team sync",
        "09:00"
      )
    );
    schedule.insert(
      Day::Tuesday,
      Task::new(
        TaskId::new("2"),
        "<b>Standup</b>",
        "08:30"
      )
    );
    schedule
  }

  #[test]
  fn builds_seven_columns_monday_first() {
    let view = WeekView::build(
      &sample(),
      Locale::Pt
    );
    assert_eq!(view.columns.len(), 7);
    assert_eq!(
      view.columns[0].header,
      "Segunda-feira"
    );
    assert_eq!(
      view.columns[6].header,
      "Domingo"
    );
    assert!(matches!(
      view.columns[0].body,
      ColumnBody::Empty(
        "Nenhuma tarefa agendada"
      )
    ));
    let ColumnBody::Tasks(cards) =
      &view.columns[1].body
    else {
      panic!("tuesday should hold tasks");
    };
    assert_eq!(cards[0].time_label, "08:30");
  }

  #[test]
  fn rendering_twice_is_identical_and_diff_is_empty() {
    let schedule = sample();
    let first = WeekView::build(
      &schedule,
      Locale::En
    );
    let second = WeekView::build(
      &schedule,
      Locale::En
    );
    assert_eq!(
      first.to_markup(),
      second.to_markup()
    );
    assert!(second.diff(&first).is_empty());
  }

  #[test]
  fn diff_reports_only_touched_columns() {
    let mut schedule = sample();
    let before = WeekView::build(
      &schedule,
      Locale::En
    );
    schedule.insert(
      Day::Sunday,
      Task::new(
        TaskId::new("3"),
        "Call mom",
        "18:00"
      )
    );
    let after = WeekView::build(
      &schedule,
      Locale::En
    );
    let changed: Vec<Day> = after
      .diff(&before)
      .into_iter()
      .map(|change| change.day)
      .collect();
    assert_eq!(changed, vec![Day::Sunday]);
  }

  #[test]
  fn markup_escapes_descriptions() {
    let markup = WeekView::build(
      &sample(),
      Locale::En
    )
    .to_markup();
    assert!(markup.contains(
      "&lt;b&gt;Standup&lt;/b&gt;"
    ));
    assert!(
      markup.contains("data-id=\"2\"")
    );
    assert!(markup.contains(
      "<div class=\"empty-day\">No tasks scheduled</div>"
    ));
  }
}
