use super::{EntryRecord, OutputFormatter};
use anyhow::Result;
use colored::*;
use frameseq_core::{FileInfo, FileType, INVALID_FRAME};

/// Text formatter for human-readable output
pub struct TextFormatter {
    use_color: bool,
    with_directory: bool,
    detailed: bool,
}

impl TextFormatter {
    pub fn new(use_color: bool) -> Self {
        Self {
            use_color,
            with_directory: false,
            detailed: false,
        }
    }

    /// Prefix names with their directory
    pub fn with_directory(mut self, with_directory: bool) -> Self {
        self.with_directory = with_directory;
        self
    }

    /// Print one block of fields per entry instead of one line
    pub fn detailed(mut self, detailed: bool) -> Self {
        self.detailed = detailed;
        self
    }

    fn colorize(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn name(&self, info: &FileInfo) -> String {
        let name = info.file_name(INVALID_FRAME, self.with_directory);
        match info.file_type() {
            FileType::Directory => self.colorize(&name, |s| s.blue().bold()),
            _ if info.is_sequence_valid() => self.colorize(&name, |s| s.green()),
            FileType::SequenceWildcard => self.colorize(&name, |s| s.yellow()),
            FileType::File => name,
        }
    }

    fn format_line(&self, info: &FileInfo) -> String {
        let name = self.name(info);
        match info.sequence() {
            Some(sequence) if sequence.is_valid() => {
                let count = self.colorize(&format!("[{} frames]", sequence.len()), |s| s.dimmed());
                format!("{name}  {count}")
            }
            _ => name,
        }
    }

    fn format_detail(&self, info: &FileInfo) -> String {
        let record = EntryRecord::from(info);
        let label = |text: &str| self.colorize(text, |s| s.yellow());

        let mut output = String::new();
        output.push_str(&format!("{} {}\n", label("Name:"), self.name(info)));
        output.push_str(&format!("{} {}\n", label("Directory:"), record.directory));
        output.push_str(&format!("{} {}\n", label("Type:"), record.file_type));

        if let Some(sequence) = info.sequence().filter(|s| s.is_valid()) {
            output.push_str(&format!("{} {}\n", label("Frames:"), sequence));
            output.push_str(&format!("{} {}\n", label("Count:"), record.frame_count));
            output.push_str(&format!("{} {}\n", label("Padding:"), record.pad));
            if let Some(first) = sequence.frame(0) {
                let last = sequence
                    .last_index()
                    .and_then(|index| sequence.frame(index))
                    .unwrap_or(first);
                output.push_str(&format!("{} {}\n", label("First:"), info.file_name(first, false)));
                output.push_str(&format!("{} {}\n", label("Last:"), info.file_name(last, false)));
            }
        }

        output
    }
}

impl OutputFormatter for TextFormatter {
    fn format_single(&self, info: &FileInfo) -> Result<String> {
        if self.detailed {
            Ok(self.format_detail(info))
        } else {
            Ok(self.format_line(info))
        }
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_single(&self, info: &FileInfo) -> Result<String> {
        let record = EntryRecord::from(info);
        if self.pretty {
            Ok(serde_json::to_string_pretty(&record)?)
        } else {
            Ok(serde_json::to_string(&record)?)
        }
    }

    fn format_batch(&self, infos: &[FileInfo]) -> Result<String> {
        let records: Vec<EntryRecord> = infos.iter().map(EntryRecord::from).collect();

        if self.pretty {
            Ok(serde_json::to_string_pretty(&records)?)
        } else {
            Ok(serde_json::to_string(&records)?)
        }
    }
}

/// CSV formatter for tabular output
#[derive(Default)]
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_single(&self, info: &FileInfo) -> Result<String> {
        self.format_batch(std::slice::from_ref(info))
    }

    fn format_batch(&self, infos: &[FileInfo]) -> Result<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);

        for info in infos {
            wtr.serialize(EntryRecord::from(info))?;
        }

        let data = wtr.into_inner()?;
        Ok(String::from_utf8(data)?)
    }
}
