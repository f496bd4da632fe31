//! Output formatter: renders any [`Describe`] value as a table, JSON or YAML.
//!
//! Tables are drawn from the value's [`Describe`] projection. JSON and YAML
//! encode the value itself through its `Serialize` impl.
//!
//! The formatter holds the current output format and is shared by reference
//! for the whole shell lifetime, so `set output` affects later commands.

mod cell;
mod table;
mod value;

pub use cell::{format_cell, header_name, TIMESTAMP_FORMAT};
pub use table::NO_DATA;
pub use value::{Describe, DisplayValue, Field, Record};

use crate::error::ShellError;
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Selectable output encodings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Table, OutputFormat::Json, OutputFormat::Yaml];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(ShellError::Parse(format!(
                "invalid output format '{}' (expected table, json or yaml)",
                other
            ))),
        }
    }
}

/// Renders values according to the current format and writes them to a sink.
pub struct OutputFormatter {
    format: OutputFormat,
    sink: Box<dyn Write + Send>,
}

impl OutputFormatter {
    /// Formatter writing to standard output.
    pub fn new(format: OutputFormat) -> Self {
        Self::with_sink(format, Box::new(std::io::stdout()))
    }

    /// Formatter writing to an arbitrary sink.
    pub fn with_sink(format: OutputFormat, sink: Box<dyn Write + Send>) -> Self {
        Self { format, sink }
    }

    pub fn format_kind(&self) -> OutputFormat {
        self.format
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
    }

    /// Render a value to text without writing it.
    pub fn render<T>(&self, value: &T) -> Result<String, ShellError>
    where
        T: Describe + Serialize + ?Sized,
    {
        match self.format {
            OutputFormat::Table => Ok(table::render(&value.describe())),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?.trim_end().to_string()),
        }
    }

    /// Render a value and write it to the sink.
    pub fn format<T>(&mut self, value: &T) -> Result<(), ShellError>
    where
        T: Describe + Serialize + ?Sized,
    {
        let rendered = self.render(value)?;
        self.message(rendered)
    }

    /// Write a plain line, bypassing format selection.
    pub fn message(&mut self, text: impl AsRef<str>) -> Result<(), ShellError> {
        writeln!(self.sink, "{}", text.as_ref())?;
        self.sink.flush()?;
        Ok(())
    }
}
