//! Output formatting for query results.
//!
//! Every command renders either the human-readable text form of a summary or
//! its JSON serialisation.

use std::fmt::Display;
use std::io::{self, Write};

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text reports.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Write a summary to stdout in the requested format.
pub fn emit<T>(format: OutputFormat, value: &T) -> Result<()>
where
    T: Serialize + Display + ?Sized,
{
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_value(&mut handle, format, value)
}

/// Write an optional summary, printing `empty` in text mode when absent.
pub fn emit_optional<T>(format: OutputFormat, value: Option<&T>, empty: &str) -> Result<()>
where
    T: Serialize + Display,
{
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match (value, format) {
        (Some(value), _) => write_value(&mut handle, format, value),
        (None, OutputFormat::Text) => {
            writeln!(handle, "{empty}")?;
            Ok(())
        }
        (None, OutputFormat::Json) => {
            writeln!(handle, "null")?;
            Ok(())
        }
    }
}

/// Render a value into any writer.
pub fn write_value<W, T>(writer: &mut W, format: OutputFormat, value: &T) -> Result<()>
where
    W: Write,
    T: Serialize + Display + ?Sized,
{
    match format {
        OutputFormat::Text => writeln!(writer, "{value}")?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, value)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
