mod storage;

use std::rc::Rc;

use chrono::Utc;
use gloo::timers::callback::Timeout;
use semana_agenda::notify::NOTIFICATION_TTL_MS;
use semana_agenda::{
  AgendaManager,
  Day,
  FormState,
  Store,
  TaskId
};
use yew::{
  Callback,
  Html,
  Reducible,
  function_component,
  html,
  use_effect_with,
  use_node_ref,
  use_reducer
};

use crate::components::{
  NotificationBanner,
  TaskForm,
  WeekGrid
};
use storage::{
  LocalStorage,
  browser_locale
};

#[derive(Clone)]
struct AgendaState {
  agenda:    AgendaManager<LocalStorage>,
  form:      FormState,
  focus_seq: u64
}

enum AgendaAction {
  SetDescription(String),
  SetDay(Option<Day>),
  SetTime(String),
  Submit,
  BeginEdit(TaskId),
  CancelEdit,
  Remove(TaskId),
  Dismiss(u64)
}

impl AgendaState {
  fn load() -> Self {
    let agenda = AgendaManager::open(
      Store::new(LocalStorage),
      browser_locale(),
      Utc::now()
    );
    Self {
      agenda,
      form: FormState::default(),
      focus_seq: 0
    }
  }
}

impl Reducible for AgendaState {
  type Action = AgendaAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut next = (*self).clone();
    let now = Utc::now();

    match action {
      | AgendaAction::SetDescription(
        value
      ) => {
        next.form.description = value;
      }
      | AgendaAction::SetDay(day) => {
        next.form.day = day;
      }
      | AgendaAction::SetTime(value) => {
        next.form.time = value;
      }
      | AgendaAction::Submit => {
        let draft = next.form.draft();
        match next
          .agenda
          .add_or_update(draft, now)
        {
          | Ok(outcome) => {
            next.form.reset(outcome.reset);
          }
          | Err(error) => {
            tracing::debug!(
              %error,
              "submit rejected; keeping \
               form input"
            );
          }
        }
      }
      | AgendaAction::BeginEdit(id) => {
        if let Some(prefill) =
          next.agenda.begin_edit(&id)
        {
          next.form.prefill(&prefill);
          if prefill.focus_form {
            next.focus_seq += 1;
          }
        }
      }
      | AgendaAction::CancelEdit => {
        let reset =
          next.agenda.cancel_edit();
        next.form.reset(reset);
      }
      | AgendaAction::Remove(id) => {
        next.agenda.remove(&id, true, now);
        if next.agenda.editing().is_none()
          && next.form.is_editing()
        {
          next.form = FormState::default();
        }
      }
      | AgendaAction::Dismiss(seq) => {
        next
          .agenda
          .dismiss_notification(seq);
      }
    }

    Rc::new(next)
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let state =
    use_reducer(AgendaState::load);
  let form_ref = use_node_ref();
  let description_ref = use_node_ref();

  {
    let form_ref = form_ref.clone();
    let description_ref =
      description_ref.clone();
    use_effect_with(
      state.focus_seq,
      move |seq| {
        if *seq > 0 {
          if let Some(form) = form_ref
            .cast::<web_sys::Element>()
          {
            form.scroll_into_view();
          }
          if let Some(input) =
            description_ref.cast::<
              web_sys::HtmlInputElement
            >()
          {
            let _ = input.focus();
          }
        }
        || ()
      }
    );
  }

  let notification = state
    .agenda
    .latest_notification()
    .cloned();

  {
    let dispatcher =
      state.dispatcher();
    use_effect_with(
      notification
        .as_ref()
        .map(|note| note.seq),
      move |seq| {
        let timeout = seq.map(|seq| {
          Timeout::new(
            NOTIFICATION_TTL_MS as u32,
            move || {
              dispatcher.dispatch(
                AgendaAction::Dismiss(seq)
              );
            }
          )
        });
        move || drop(timeout)
      }
    );
  }

  let locale = state.agenda.locale();
  let labels = state.agenda.labels();

  let on_description = {
    let state = state.clone();
    Callback::from(move |value| {
      state.dispatch(
        AgendaAction::SetDescription(value)
      )
    })
  };
  let on_day = {
    let state = state.clone();
    Callback::from(move |day| {
      state.dispatch(AgendaAction::SetDay(
        day
      ))
    })
  };
  let on_time = {
    let state = state.clone();
    Callback::from(move |value| {
      state.dispatch(
        AgendaAction::SetTime(value)
      )
    })
  };
  let on_submit = {
    let state = state.clone();
    Callback::from(move |()| {
      state.dispatch(AgendaAction::Submit)
    })
  };
  let on_cancel = {
    let state = state.clone();
    Callback::from(move |()| {
      state
        .dispatch(AgendaAction::CancelEdit)
    })
  };
  let on_edit = {
    let state = state.clone();
    Callback::from(move |id| {
      state.dispatch(
        AgendaAction::BeginEdit(id)
      )
    })
  };
  let on_delete = {
    let state = state.clone();
    let question = labels.confirm_delete;
    Callback::from(move |id| {
      if gloo::dialogs::confirm(question) {
        state.dispatch(
          AgendaAction::Remove(id)
        );
      }
    })
  };

  html! {
      <main class="agenda">
          <section class="form-container" ref={form_ref}>
              <TaskForm
                  form={state.form.clone()}
                  {locale}
                  description_ref={description_ref}
                  {on_description}
                  {on_day}
                  {on_time}
                  {on_submit}
                  {on_cancel}
              />
          </section>
          <WeekGrid
              view={state.agenda.view().clone()}
              {on_edit}
              {on_delete}
          />
          <NotificationBanner note={notification} />
      </main>
  }
}
