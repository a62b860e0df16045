mod io_and_views;
mod task_ops;

use chrono::{
  DateTime,
  Utc
};
use semana_agenda::{
  AgendaManager,
  NotificationKind
};
use tracing::{
  debug,
  instrument
};

use crate::cli::Command;
use crate::config::Config;
use crate::datastore::FileStorage;
use crate::render::Renderer;

pub type Agenda =
  AgendaManager<FileStorage>;

#[instrument(skip(
  agenda, cfg, renderer, now
))]
pub fn dispatch(
  agenda: &mut Agenda,
  cfg: &Config,
  renderer: &mut Renderer,
  command: Command,
  now: DateTime<Utc>
) -> anyhow::Result<()> {
  if let Some(note) =
    agenda.latest_notification()
    && note.kind
      == NotificationKind::Warning
  {
    renderer.print_notification(note)?;
  }

  debug!(?command, "dispatching command");

  match command {
    | Command::Add {
      description,
      day,
      time
    } => {
      task_ops::cmd_add(
        agenda,
        renderer,
        description.join(" "),
        day,
        time,
        now
      )
    }
    | Command::Edit {
      id,
      description,
      day,
      time
    } => {
      task_ops::cmd_edit(
        agenda,
        renderer,
        &id,
        task_ops::EditArgs {
          description,
          day,
          time
        },
        now
      )
    }
    | Command::Remove { id, yes } => {
      task_ops::cmd_remove(
        agenda, cfg, renderer, &id, yes,
        now
      )
    }
    | Command::Show => {
      io_and_views::cmd_show(
        agenda, renderer
      )
    }
    | Command::Render { output } => {
      io_and_views::cmd_render(
        agenda,
        output.as_deref()
      )
    }
    | Command::Export => {
      io_and_views::cmd_export(agenda)
    }
    | Command::Days => {
      io_and_views::cmd_days(agenda)
    }
  }
}
