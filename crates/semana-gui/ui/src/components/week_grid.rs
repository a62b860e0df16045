use semana_agenda::{
  ColumnBody,
  DayColumn,
  TaskCard,
  TaskId,
  WeekView
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct WeekGridProps {
  pub view:      WeekView,
  pub on_edit:   Callback<TaskId>,
  pub on_delete: Callback<TaskId>
}

/// One column per weekday, Monday first.
#[function_component(WeekGrid)]
pub fn week_grid(
  props: &WeekGridProps
) -> Html {
  html! {
      <div class="week-grid">
          {
              for props.view.columns.iter().map(|column| {
                  day_column(column, &props.on_edit, &props.on_delete)
              })
          }
      </div>
  }
}

fn day_column(
  column: &DayColumn,
  on_edit: &Callback<TaskId>,
  on_delete: &Callback<TaskId>
) -> Html {
  let body = match &column.body {
    | ColumnBody::Tasks(cards) => {
      html! {
          <>
              { for cards.iter().map(|card| task_card(card, on_edit, on_delete)) }
          </>
      }
    }
    | ColumnBody::Empty(text) => {
      html! { <div class="empty-day">{ *text }</div> }
    }
  };

  html! {
      <div class={classes!("day-column", column.class)}>
          <div class="day-header">{ &column.header }</div>
          <div class="tasks-container">{ body }</div>
      </div>
  }
}

fn task_card(
  card: &TaskCard,
  on_edit: &Callback<TaskId>,
  on_delete: &Callback<TaskId>
) -> Html {
  let edit_id = card.id.clone();
  let delete_id = card.id.clone();
  let on_edit = on_edit.clone();
  let on_delete = on_delete.clone();

  html! {
      <div class="task-item">
          <div class="task-time">{ &card.time_label }</div>
          <div class="task-content">{ &card.description }</div>
          <div class="task-actions">
              <button class="edit-btn" data-id={card.id.to_string()} onclick={move |_| on_edit.emit(edit_id.clone())}>
                  { card.edit_label }
              </button>
              <button class="delete-btn" data-id={card.id.to_string()} onclick={move |_| on_delete.emit(delete_id.clone())}>
                  { card.delete_label }
              </button>
          </div>
      </div>
  }
}
