use semana_agenda::{
  Day,
  FormState,
  Locale,
  ViewLabels
};
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement,
  InputEvent,
  MouseEvent,
  SubmitEvent
};
use yew::{
  Callback,
  Html,
  NodeRef,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
  pub form:            FormState,
  pub locale:          Locale,
  pub description_ref: NodeRef,
  pub on_description:  Callback<String>,
  pub on_day:          Callback<Option<Day>>,
  pub on_time:         Callback<String>,
  pub on_submit:       Callback<()>,
  pub on_cancel:       Callback<()>
}

#[function_component(TaskForm)]
pub fn task_form(
  props: &TaskFormProps
) -> Html {
  let labels =
    ViewLabels::for_locale(props.locale);

  let onsubmit = {
    let on_submit = props.on_submit.clone();
    Callback::from(move |e: SubmitEvent| {
      e.prevent_default();
      on_submit.emit(());
    })
  };
  let oninput_description = {
    let on_description =
      props.on_description.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      on_description.emit(input.value());
    })
  };
  let onchange_day = {
    let on_day = props.on_day.clone();
    Callback::from(move |e: web_sys::Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      on_day
        .emit(select.value().parse::<Day>().ok());
    })
  };
  let oninput_time = {
    let on_time = props.on_time.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      on_time.emit(input.value());
    })
  };
  let onclick_cancel = {
    let on_cancel = props.on_cancel.clone();
    Callback::from(move |e: MouseEvent| {
      e.prevent_default();
      on_cancel.emit(());
    })
  };

  let selected = props.form.day;

  html! {
      <form id="taskForm" {onsubmit}>
          <input
              id="taskInput"
              type="text"
              ref={props.description_ref.clone()}
              value={props.form.description.clone()}
              oninput={oninput_description}
          />
          <select id="daySelect" onchange={onchange_day}>
              <option value="" selected={selected.is_none()}>{ "--" }</option>
              {
                  for Day::ALL.iter().map(|day| html! {
                      <option value={day.name()} selected={selected == Some(*day)}>
                          { day.label(props.locale) }
                      </option>
                  })
              }
          </select>
          <input
              id="timeInput"
              type="time"
              value={props.form.time.clone()}
              oninput={oninput_time}
          />
          <button type="submit" id="submitBtn">
              { props.form.submit_label(props.locale) }
          </button>
          {
              if props.form.is_editing() {
                  html! {
                      <button type="button" id="cancelEditBtn" onclick={onclick_cancel}>
                          { labels.cancel_edit }
                      </button>
                  }
              } else {
                  html! {}
              }
          }
      </form>
  }
}
