use semana_agenda::Notification;
use yew::{
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct NotificationBannerProps {
  pub note: Option<Notification>
}

#[function_component(NotificationBanner)]
pub fn notification_banner(
  props: &NotificationBannerProps
) -> Html {
  let Some(note) = &props.note else {
    return html! {};
  };

  html! {
      <div class={classes!("notification", note.kind.css_class())} key={note.seq.to_string()}>
          { &note.message }
      </div>
  }
}
