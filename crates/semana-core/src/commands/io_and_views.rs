use std::fs;
use std::path::Path;

use anyhow::Context;
use semana_agenda::Day;
use tracing::{
  info,
  instrument
};

use super::Agenda;
use crate::render::Renderer;

#[instrument(skip(agenda, renderer))]
pub(super) fn cmd_show(
  agenda: &Agenda,
  renderer: &mut Renderer
) -> anyhow::Result<()> {
  info!("command show");
  renderer.print_week(agenda.view())
}

#[instrument(skip(agenda))]
pub(super) fn cmd_render(
  agenda: &Agenda,
  output: Option<&Path>
) -> anyhow::Result<()> {
  info!("command render");

  let markup = agenda.view().to_markup();
  match output {
    | Some(path) => {
      fs::write(path, &markup)
        .with_context(|| {
          format!(
            "failed writing {}",
            path.display()
          )
        })?;
      println!(
        "Wrote week grid to {}.",
        path.display()
      );
    }
    | None => println!("{markup}")
  }
  Ok(())
}

#[instrument(skip(agenda))]
pub(super) fn cmd_export(
  agenda: &Agenda
) -> anyhow::Result<()> {
  info!("command export");

  let json = serde_json::to_string_pretty(
    agenda.schedule()
  )
  .context("failed to encode schedule")?;
  println!("{json}");
  Ok(())
}

#[instrument(skip(agenda))]
pub(super) fn cmd_days(
  agenda: &Agenda
) -> anyhow::Result<()> {
  let locale = agenda.locale();
  for day in Day::ALL {
    println!(
      "{:<10} {}",
      day.name(),
      day.header(locale)
    );
  }
  Ok(())
}
