use std::io::{
  self,
  BufRead,
  Write
};

use anyhow::anyhow;
use chrono::{
  DateTime,
  Utc
};
use semana_agenda::{
  Day,
  TaskDraft,
  TaskId
};
use tracing::{
  info,
  instrument
};

use super::Agenda;
use crate::config::Config;
use crate::render::Renderer;

pub(super) struct EditArgs {
  pub description: Option<String>,
  pub day:         Option<Day>,
  pub time:        Option<String>
}

#[instrument(skip(
  agenda, renderer, description, now
))]
pub(super) fn cmd_add(
  agenda: &mut Agenda,
  renderer: &Renderer,
  description: String,
  day: Day,
  time: String,
  now: DateTime<Utc>
) -> anyhow::Result<()> {
  info!("command add");

  let result = agenda.add_or_update(
    TaskDraft::new(description, day, time),
    now
  );
  report(agenda, renderer)?;
  let outcome = result?;

  println!("Created task {}.", outcome.id);
  Ok(())
}

#[instrument(skip(
  agenda, renderer, args, now
))]
pub(super) fn cmd_edit(
  agenda: &mut Agenda,
  renderer: &Renderer,
  id: &str,
  args: EditArgs,
  now: DateTime<Utc>
) -> anyhow::Result<()> {
  info!("command edit");

  let id = TaskId::new(id);
  let prefill = agenda
    .begin_edit(&id)
    .ok_or_else(|| {
      anyhow!("no task with id {id}")
    })?;

  let mut draft = prefill.draft;
  if let Some(description) =
    args.description
  {
    draft.description = description;
  }
  if let Some(day) = args.day {
    draft.day = Some(day);
  }
  if let Some(time) = args.time {
    draft.time = time;
  }

  let result =
    agenda.add_or_update(draft, now);
  report(agenda, renderer)?;
  let outcome = result?;

  println!(
    "Updated task {} ({}).",
    outcome.id, outcome.day
  );
  Ok(())
}

#[instrument(skip(
  agenda, cfg, renderer, now
))]
pub(super) fn cmd_remove(
  agenda: &mut Agenda,
  cfg: &Config,
  renderer: &Renderer,
  id: &str,
  yes: bool,
  now: DateTime<Utc>
) -> anyhow::Result<()> {
  info!("command remove");

  let id = TaskId::new(id);
  let Some((day, task)) = agenda.find(&id)
  else {
    return Err(anyhow!(
      "no task with id {id}"
    ));
  };

  let confirm = cfg
    .get_bool("confirmation")
    .unwrap_or(true);
  if confirm && !yes {
    let question = format!(
      "{} [{day} {} {}] (yes/no) ",
      agenda.labels().confirm_delete,
      task.time_label(),
      task.description
    );
    if !ask(&question)? {
      println!("Task not deleted.");
      return Ok(());
    }
  }

  agenda.remove(&id, true, now);
  report(agenda, renderer)?;
  println!("Deleted task {id}.");
  Ok(())
}

/// Echoes the notification the last mutation produced.
fn report(
  agenda: &Agenda,
  renderer: &Renderer
) -> anyhow::Result<()> {
  if let Some(note) =
    agenda.latest_notification()
  {
    renderer.print_notification(note)?;
  }
  Ok(())
}

fn ask(
  question: &str
) -> anyhow::Result<bool> {
  let mut out = io::stdout().lock();
  write!(out, "{question}")?;
  out.flush()?;

  let mut answer = String::new();
  io::stdin()
    .lock()
    .read_line(&mut answer)?;
  Ok(matches!(
    answer
      .trim()
      .to_ascii_lowercase()
      .as_str(),
    "y" | "yes" | "s" | "sim"
  ))
}

