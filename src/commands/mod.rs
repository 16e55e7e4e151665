//! Command handlers for the hfin CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod auth;
mod delete;
mod excel;
mod init;
mod insert;
mod list;
mod menu;
mod report;
mod update;

use crate::args::OutputFormat;
use crate::model::Record;
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use tracing::{debug, info};

pub use auth::{login, logout, register, whoami};
pub use delete::delete;
pub use excel::{export, import, template, ImportOutcome};
pub use init::init;
pub use insert::insert;
pub use list::{list, show};
pub use menu::menu;
pub use report::report;
pub use update::update;

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Records rendered in the requested output format.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rows {
    /// JSON array of records.
    Json(serde_json::Value),
    /// Markdown table as a single formatted string.
    Table(String),
    /// CSV data as a properly escaped string.
    Csv(String),
}

impl Debug for Rows {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rows::Json(v) => write!(f, "Rows::Json({:?})", v),
            Rows::Table(s) => write!(f, "Rows::Table({} chars)", s.len()),
            Rows::Csv(s) => write!(f, "Rows::Csv({} chars)", s.len()),
        }
    }
}

impl Display for Rows {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rows::Json(v) => {
                if let Ok(s) = serde_json::to_string_pretty(v) {
                    write!(f, "{}", s)
                } else {
                    write!(f, "{:?}", v)
                }
            }
            Rows::Table(s) => write!(f, "{}", s),
            Rows::Csv(s) => write!(f, "{}", s),
        }
    }
}

impl Rows {
    pub fn render<R>(records: &[R], format: OutputFormat) -> Result<Self>
    where
        R: Record + Serialize,
    {
        let headers = R::headers();
        let cells = records.iter().map(Record::cells);
        match format {
            OutputFormat::Json => Ok(Rows::Json(
                serde_json::to_value(records).context("Unable to serialize the records")?,
            )),
            OutputFormat::Table => Ok(Rows::Table(markdown_table(headers, cells))),
            OutputFormat::Csv => {
                let mut writer = csv::Writer::from_writer(Vec::new());
                writer.write_record(headers)?;
                for row in cells {
                    writer.write_record(&row)?;
                }
                let bytes = writer
                    .into_inner()
                    .context("Unable to finish writing the CSV")?;
                Ok(Rows::Csv(String::from_utf8(bytes)?))
            }
        }
    }
}

/// A markdown table. Pipes inside cells are escaped.
pub(crate) fn markdown_table<H, I>(headers: &[H], rows: I) -> String
where
    H: AsRef<str>,
    I: IntoIterator<Item = Vec<String>>,
{
    let line = |cells: Vec<String>| format!("| {} |\n", cells.join(" | "));
    let escape = |s: &str| s.replace('|', "\\|");
    let mut out = line(headers.iter().map(|h| escape(h.as_ref())).collect());
    out.push_str(&line(headers.iter().map(|_| "---".to_string()).collect()));
    for row in rows {
        out.push_str(&line(row.iter().map(|c| escape(c.as_str())).collect()));
    }
    out
}

/// `count` followed by the right form of `singular`/`plural`.
pub(crate) fn counted(count: usize, singular: &str, plural: &str) -> String {
    format!("{count} {}", if count == 1 { singular } else { plural })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    #[test]
    fn test_markdown_table() {
        let rows = vec![Category::new(1, "Klaim | BPJS"), Category::new(2, "Umum")];
        let Rows::Table(table) = Rows::render(&rows, OutputFormat::Table).unwrap() else {
            panic!("expected a table");
        };
        assert_eq!(
            table,
            "| id | name |\n| --- | --- |\n| 1 | Klaim \\| BPJS |\n| 2 | Umum |\n"
        );
    }

    #[test]
    fn test_csv_rows() {
        let rows = vec![Category::new(1, "Gaji, Honor")];
        let rendered = Rows::render(&rows, OutputFormat::Csv).unwrap();
        assert_eq!(rendered.to_string(), "id,name\n1,\"Gaji, Honor\"\n");
    }
}
