use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser, Subcommand};
use semana_agenda::{Day, normalize_time};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct PreprocessedArgs {
    pub cleaned_args: Vec<OsString>,
    pub rc_overrides: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct KeyVal {
    pub key: String,
    pub value: String,
}

impl std::str::FromStr for KeyVal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got: {s}"))?;
        Ok(Self {
            key: k.trim().to_string(),
            value: v.trim().to_string(),
        })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "semana",
    version,
    about = "Semana: weekly agenda in the terminal",
    disable_help_subcommand = true
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[arg(
        long = "rc",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
        action = ArgAction::Append,
        global = true
    )]
    pub rc_overrides: Vec<KeyVal>,

    #[arg(long = "semanarc", global = true)]
    pub semanarc: Option<PathBuf>,

    #[arg(long = "data", global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Schedule a new task.
    Add {
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
        #[arg(long, value_parser = parse_day)]
        day: Day,
        #[arg(long, value_parser = parse_time)]
        time: String,
    },
    /// Change an existing task, keeping its id.
    Edit {
        id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_parser = parse_day)]
        day: Option<Day>,
        #[arg(long, value_parser = parse_time)]
        time: Option<String>,
    },
    /// Delete a task.
    #[command(aliases = ["delete", "rm"])]
    Remove {
        id: String,
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Print the week grid.
    Show,
    /// Write the week grid as HTML.
    Render {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the stored schedule as JSON.
    Export,
    /// List accepted day names.
    Days,
}

impl Command {
    /// Maps a `default.command` setting to a command without arguments.
    pub fn from_default(name: &str) -> anyhow::Result<Self> {
        match name.trim() {
            "show" | "" => Ok(Command::Show),
            "render" => Ok(Command::Render { output: None }),
            "export" => Ok(Command::Export),
            "days" => Ok(Command::Days),
            other => Err(anyhow!("unsupported default.command: {other}")),
        }
    }
}

fn parse_day(raw: &str) -> Result<Day, String> {
    raw.parse::<Day>().map_err(|err| err.to_string())
}

/// Accepts `H:MM` or `HH:MM` and normalizes to zero-padded `HH:MM`.
pub fn parse_time(raw: &str) -> Result<String, String> {
    normalize_time(raw).ok_or_else(|| format!("expected HH:MM, got {raw:?}"))
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

/// Pulls positional `rc.key=value` / `rc.key:value` overrides out of
/// the argument list before clap sees it.
#[tracing::instrument(skip_all)]
pub fn preprocess_args(raw: &[OsString]) -> anyhow::Result<PreprocessedArgs> {
    let mut cleaned = Vec::with_capacity(raw.len());
    let mut overrides: Vec<(String, String)> = Vec::new();

    let mut iter = raw.iter().cloned();
    if let Some(bin) = iter.next() {
        cleaned.push(bin);
    }

    for arg in iter {
        let s = arg.to_string_lossy();
        if let Some(rest) = s.strip_prefix("rc.") {
            let parsed = rest
                .split_once('=')
                .or_else(|| rest.split_once(':'))
                .map(|(k, v)| (format!("rc.{k}"), v.to_string()));

            if let Some((k, v)) = parsed {
                debug!(key = %k, value = %v, "captured positional rc override");
                overrides.push((k, v));
                continue;
            }
        }

        cleaned.push(arg);
    }

    Ok(PreprocessedArgs {
        cleaned_args: cleaned,
        rc_overrides: overrides,
    })
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use clap::Parser;
    use semana_agenda::Day;

    use super::{Command, GlobalCli, parse_time, preprocess_args};

    #[test]
    fn normalizes_single_digit_hours() {
        assert_eq!(parse_time("8:30"), Ok("08:30".to_string()));
        assert_eq!(parse_time("23:05"), Ok("23:05".to_string()));
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("noon").is_err());
    }

    #[test]
    fn parses_add_with_multiword_description() {
        let cli = GlobalCli::parse_from([
            "semana", "add", "Team", "sync", "--day", "tue", "--time", "9:00",
        ]);
        assert_eq!(
            cli.command,
            Some(Command::Add {
                description: vec!["Team".to_string(), "sync".to_string()],
                day: Day::Tuesday,
                time: "09:00".to_string(),
            })
        );
    }

    #[test]
    fn strips_positional_rc_overrides() {
        let raw: Vec<OsString> = ["semana", "rc.locale:pt", "show"]
            .into_iter()
            .map(OsString::from)
            .collect();
        let pre = preprocess_args(&raw).expect("preprocess");
        assert_eq!(
            pre.rc_overrides,
            vec![("rc.locale".to_string(), "pt".to_string())]
        );
        assert_eq!(pre.cleaned_args.len(), 2);
    }
}
