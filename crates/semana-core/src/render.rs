use std::io::{self, IsTerminal, Write};

use anyhow::anyhow;
use semana_agenda::{ColumnBody, Notification, NotificationKind, WeekView};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color_cfg = cfg.get("color").unwrap_or_else(|| "on".to_string());
        let color = match color_cfg.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" | "1" => true,
            "off" | "no" | "false" | "0" => false,
            other => return Err(anyhow!("invalid color setting: {other}")),
        };

        Ok(Self { color })
    }

    /// Seven-column table, one row per slot index.
    #[tracing::instrument(skip(self, view))]
    pub fn print_week(&mut self, view: &WeekView) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        let paint = self.color && io::stdout().is_terminal();
        write_week(&mut out, view, paint)
    }

    pub fn print_notification(&self, note: &Notification) -> anyhow::Result<()> {
        let mut err = io::stderr().lock();
        let code = match note.kind {
            NotificationKind::Success => "32",
            NotificationKind::Warning => "33",
            NotificationKind::Error => "31",
        };
        let text = if self.color && io::stderr().is_terminal() {
            paint(&note.message, code)
        } else {
            note.message.clone()
        };
        writeln!(err, "{text}")?;
        Ok(())
    }
}

pub fn write_week<W: Write>(writer: W, view: &WeekView, color: bool) -> anyhow::Result<()> {
    let headers: Vec<String> = view
        .columns
        .iter()
        .map(|column| column.header.clone())
        .collect();

    let cells: Vec<Vec<String>> = view
        .columns
        .iter()
        .map(|column| match &column.body {
            ColumnBody::Tasks(cards) => cards
                .iter()
                .map(|card| {
                    let time = if color {
                        paint(&card.time_label, "33")
                    } else {
                        card.time_label.clone()
                    };
                    format!("{time} {} [{}]", card.description, card.id)
                })
                .collect(),
            ColumnBody::Empty(text) => {
                if color {
                    vec![paint(text, "2")]
                } else {
                    vec![text.to_string()]
                }
            }
        })
        .collect();

    let depth = cells.iter().map(Vec::len).max().unwrap_or(0);
    let rows = (0..depth)
        .map(|idx| {
            cells
                .iter()
                .map(|column| column.get(idx).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    write_table(writer, headers, rows)
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for (header, width) in headers.iter().zip(&widths) {
        let padding = width.saturating_sub(UnicodeWidthStr::width(header.as_str()));
        write!(writer, "{}{} ", header, " ".repeat(padding))?;
    }
    writeln!(writer)?;

    for width in &widths {
        write!(writer, "{:-<width$} ", "", width = *width)?;
    }
    writeln!(writer)?;

    for row in rows {
        for (cell, width) in row.iter().zip(&widths) {
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = width.saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn paint(text: &str, code: &str) -> String {
    format!("\x1b[{code}m{text}\x1b[0m")
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
