mod formatters;

pub use formatters::{CsvFormatter, JsonFormatter, TextFormatter};

use anyhow::Result;
use frameseq_core::{FileInfo, INVALID_FRAME};
use serde::Serialize;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn from_string(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => anyhow::bail!("Unknown output format: {}", s),
        }
    }
}

/// Flat, serialisable view of one listing entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryRecord {
    pub name: String,
    pub directory: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub sequence: Option<String>,
    pub frame_count: u64,
    pub pad: usize,
    pub first_frame: Option<i64>,
    pub last_frame: Option<i64>,
}

impl From<&FileInfo> for EntryRecord {
    fn from(info: &FileInfo) -> Self {
        let sequence = info.sequence().filter(|s| s.is_valid());
        let bounds = sequence.and_then(|s| s.bounds());
        Self {
            name: info.file_name(INVALID_FRAME, false),
            directory: info.path().directory().to_string(),
            file_type: info.file_type().as_str().to_string(),
            sequence: sequence.map(|s| s.to_string()),
            frame_count: sequence.map_or(1, |s| s.len()),
            pad: sequence.map_or(0, |s| s.pad()),
            first_frame: bounds.map(|b| b.min),
            last_frame: bounds.map(|b| b.max),
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format a single entry
    fn format_single(&self, info: &FileInfo) -> Result<String>;

    /// Format a batch of entries
    fn format_batch(&self, infos: &[FileInfo]) -> Result<String> {
        let formatted: Result<Vec<String>> = infos.iter().map(|i| self.format_single(i)).collect();

        Ok(formatted?.join("\n"))
    }
}

/// Create a formatter based on output format
pub fn create_formatter(
    format: OutputFormat,
    use_color: bool,
    with_directory: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_color).with_directory(with_directory)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Csv => Box::new(CsvFormatter::new()),
    }
}
