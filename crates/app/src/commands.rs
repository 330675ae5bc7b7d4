use grocer_core::{ItemId, Selection, Session, SessionError};
use serde_json::json;
use std::io::{self, Write};
use thiserror::Error;

use crate::render::{self, Region, RenderError};

pub const HELP: &str = "\
Commands:
  list              show every aisle with item ids (* = selected)
  toggle <id>...    add or remove items from the cart
  reset             empty the cart
  receipt           show the receipt
  totals            show both totals
  show <region>     draw one region: aisles, receipt, totals, footnote or an aisle name
  json              dump totals, summary and receipt as JSON
  reload            fetch the price table again
  help              this text
  quit              exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Toggle(Vec<ItemId>),
    Reset,
    Receipt,
    Totals,
    Show(String),
    Json,
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command: '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("Invalid item id: '{0}'")]
    InvalidId(String),
}

impl std::str::FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Unknown(String::new()));
        };
        match head.to_lowercase().as_str() {
            "list" | "ls" => Ok(Command::List),
            "toggle" | "t" => {
                let ids = words
                    .map(|w| {
                        w.parse::<usize>()
                            .map(ItemId)
                            .map_err(|_| CommandError::InvalidId(w.to_string()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                if ids.is_empty() {
                    return Err(CommandError::MissingArgument("toggle"));
                }
                Ok(Command::Toggle(ids))
            }
            "reset" => Ok(Command::Reset),
            "receipt" => Ok(Command::Receipt),
            "totals" => Ok(Command::Totals),
            "show" => words
                .next()
                .map(|region| Command::Show(region.to_lowercase()))
                .ok_or(CommandError::MissingArgument("show")),
            "json" => Ok(Command::Json),
            "reload" => Ok(Command::Reload),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// What the input loop should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Reload,
    Quit,
}

/// Runs one command against the session. Failures local to the command are
/// logged and reported to `out`; only write errors propagate.
pub fn execute(session: &mut Session, command: Command, out: &mut impl Write) -> io::Result<Flow> {
    match command {
        Command::List => show(session, Region::Aisles, out)?,
        Command::Toggle(ids) => {
            for id in ids {
                match session.toggle(id) {
                    Ok(Selection::Selected) => writeln!(out, "+ {}", item_name(session, id))?,
                    Ok(Selection::Unselected) => writeln!(out, "- {}", item_name(session, id))?,
                    Err(e) => writeln!(out, "{e}")?,
                }
            }
            show(session, Region::Totals, out)?;
        }
        Command::Reset => match session.reset() {
            Ok(()) => show(session, Region::Totals, out)?,
            Err(e) => writeln!(out, "{e}")?,
        },
        Command::Receipt => show(session, Region::Receipt, out)?,
        Command::Totals => {
            show(session, Region::Totals, out)?;
            if let Some(change) = session.change_view() {
                writeln!(out, "{change}")?;
            }
        }
        Command::Show(name) => match name.parse::<Region>() {
            Ok(region) => show(session, region, out)?,
            Err(e) => {
                tracing::warn!("{e}, skipping");
                writeln!(out, "{e}")?;
            }
        },
        Command::Json => match snapshot(session) {
            Ok(value) => writeln!(out, "{value}")?,
            Err(e) => writeln!(out, "{e}")?,
        },
        Command::Reload => return Ok(Flow::Reload),
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn show(session: &Session, region: Region, out: &mut impl Write) -> io::Result<()> {
    match render::render_region(session, region, out) {
        Ok(()) => Ok(()),
        Err(RenderError::Io(e)) => Err(e),
        Err(e) => {
            tracing::warn!("Skipping {region:?}: {e}");
            writeln!(out, "{e}")
        }
    }
}

fn item_name(session: &Session, id: ItemId) -> String {
    session
        .catalog()
        .and_then(|c| c.get(id).ok())
        .map(|e| e.display_name.clone())
        .unwrap_or_else(|| id.to_string())
}

/// Totals, summary and receipt in one JSON document.
pub fn snapshot(session: &Session) -> Result<serde_json::Value, SessionError> {
    let (Some(totals), Some(summary), Some(receipt)) = (
        session.totals_view(),
        session.summary(),
        session.receipt_view(),
    ) else {
        return Err(SessionError::NotLoaded);
    };
    Ok(json!({
        "totals": totals,
        "summary": summary,
        "receipt": receipt,
    }))
}
