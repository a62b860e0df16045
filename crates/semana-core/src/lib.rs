pub mod cli;
pub mod commands;
pub mod config;
pub mod datastore;
pub mod render;

use std::ffi::OsString;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use semana_agenda::{
  AgendaManager,
  Store
};
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let pre =
    cli::preprocess_args(&raw_args)?;
  let cli = cli::GlobalCli::parse_from(
    pre.cleaned_args
  );

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting semana CLI"
  );
  debug!(?pre.rc_overrides, "preprocessed rc overrides");

  let mut cfg = config::Config::load(
    cli.semanarc.as_deref()
  )?;
  cfg.apply_overrides(
    pre.rc_overrides.into_iter().chain(
      cli
        .rc_overrides
        .into_iter()
        .map(|kv| (kv.key, kv.value))
    )
  );

  let data_dir =
    config::resolve_data_dir(
      &cfg,
      cli.data.as_deref()
    )
    .context(
      "failed to resolve data \
       directory"
    )?;

  let storage =
    datastore::FileStorage::open(
      &data_dir
    )
    .with_context(|| {
      format!(
        "failed to open datastore at \
         {}",
        data_dir.display()
      )
    })?;

  let now = Utc::now();
  let mut agenda = AgendaManager::open(
    Store::with_key(
      storage,
      cfg.storage_key()
    ),
    cfg.locale()?,
    now
  );

  let mut renderer =
    render::Renderer::new(&cfg)?;
  let command = match cli.command {
    | Some(command) => command,
    | None => {
      cli::Command::from_default(
        &cfg
          .get("default.command")
          .unwrap_or_default()
      )?
    }
  };

  commands::dispatch(
    &mut agenda,
    &cfg,
    &mut renderer,
    command,
    now
  )?;

  info!("done");
  Ok(())
}
