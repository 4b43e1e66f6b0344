//! Directory listings grouped into sequences
//!
//! The core never touches the file system itself. A [`DirectoryReader`]
//! supplies `(name, is_directory)` pairs and [`directory_list`] folds them
//! into one [`FileInfo`] per sequence or standalone entry.

use crate::codec;
use crate::error::{IoError, Result, ValidationError};
use crate::file_info::{FileInfo, FileType, SequenceGroup};
use crate::frame::{FrameSequence, INVALID_FRAME};
use crate::path_name::PathName;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One raw entry reported by a [`DirectoryReader`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub is_directory: bool,
}

impl DirectoryEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: false,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: true,
        }
    }
}

/// Directory enumeration collaborator
pub trait DirectoryReader {
    /// List the entries of `path` in a stable order
    fn read_directory(&self, path: &Path) -> Result<Vec<DirectoryEntry>>;
}

impl<R: DirectoryReader + ?Sized> DirectoryReader for &R {
    fn read_directory(&self, path: &Path) -> Result<Vec<DirectoryEntry>> {
        (**self).read_directory(path)
    }
}

/// [`DirectoryReader`] backed by `std::fs`, sorted by name
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDirectoryReader;

impl FsDirectoryReader {
    pub fn new() -> Self {
        Self
    }
}

impl DirectoryReader for FsDirectoryReader {
    fn read_directory(&self, path: &Path) -> Result<Vec<DirectoryEntry>> {
        let read_dir = std::fs::read_dir(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => IoError::directory_not_found(path),
            std::io::ErrorKind::PermissionDenied => IoError::permission_denied(path, e),
            _ => IoError::from_std(e).with_path(path),
        })?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| IoError::from_std(e).with_path(path))?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    warn!("Non UTF-8 file name in {}: {:?}", path.display(), raw);
                    raw.to_string_lossy().into_owned()
                }
            };
            // Follows symlinks, so a link to a directory lists as one
            let is_directory = std::fs::metadata(entry.path())
                .map(|m| m.is_dir())
                .unwrap_or(false);
            entries.push(DirectoryEntry { name, is_directory });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("Read {} entries from {}", entries.len(), path.display());
        Ok(entries)
    }
}

/// How grouped sequences are reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceFormat {
    /// Every contiguous run is its own range, gaps are kept
    #[default]
    Sparse,
    /// One range from the first to the last frame
    Range,
}

/// Ordering of listing results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryListSort {
    /// Order in which entries were first seen
    #[default]
    Unsorted,
    Name,
}

/// Options for [`directory_list`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryListOptions {
    /// Group numbered files into sequences
    pub sequences: bool,
    /// Extensions eligible for grouping, with the leading dot; empty allows all
    pub sequence_extensions: Vec<String>,
    /// Include entries whose name starts with a dot
    pub show_hidden: bool,
    /// Case-insensitive substring the rendered name must contain
    pub filter_text: Option<String>,
    pub sequence_format: SequenceFormat,
    pub sort: DirectoryListSort,
    pub reverse_sort: bool,
    pub directories_first: bool,
}

impl Default for DirectoryListOptions {
    fn default() -> Self {
        Self {
            sequences: true,
            sequence_extensions: Vec::new(),
            show_hidden: true,
            filter_text: None,
            sequence_format: SequenceFormat::Sparse,
            sort: DirectoryListSort::Unsorted,
            reverse_sort: false,
            directories_first: false,
        }
    }
}

impl DirectoryListOptions {
    pub fn validate(&self) -> Result<()> {
        if let Some(ext) = self
            .sequence_extensions
            .iter()
            .find(|ext| !ext.starts_with('.') || ext.len() < 2)
        {
            return Err(ValidationError::invalid_parameter(
                "sequence_extensions",
                &format!("'{ext}' must start with '.' followed by the extension"),
            )
            .into());
        }
        Ok(())
    }

    fn groups_extension(&self, extension: &str) -> bool {
        self.sequence_extensions.is_empty()
            || self
                .sequence_extensions
                .iter()
                .any(|ext| ext.eq_ignore_ascii_case(extension))
    }

    fn matches_filter(&self, info: &FileInfo) -> bool {
        match self.filter_text.as_deref() {
            None | Some("") => true,
            Some(filter) => info
                .file_name(INVALID_FRAME, false)
                .to_lowercase()
                .contains(&filter.to_lowercase()),
        }
    }
}

enum Slot {
    Entry(FileInfo),
    Group(FileInfo, SequenceGroup),
}

/// List a directory, grouping numbered files into sequences
///
/// Groups keep the order in which their first member was seen. A group with
/// a single member is reported as a plain file without a sequence.
pub fn directory_list<R>(
    reader: &R,
    directory: &PathName,
    options: &DirectoryListOptions,
) -> Result<Vec<FileInfo>>
where
    R: DirectoryReader + ?Sized,
{
    options.validate()?;

    let dir_text = directory.get();
    let read_path = if dir_text.is_empty() { "." } else { dir_text.as_str() };
    let entries = reader.read_directory(Path::new(read_path))?;

    let mut slots: Vec<Slot> = Vec::with_capacity(entries.len());
    let mut by_name: HashMap<(String, String), Vec<usize>> = HashMap::new();
    let mut last_match: Option<usize> = None;

    for entry in entries {
        if entry.name == "." || entry.name == ".." {
            continue;
        }
        if !options.show_hidden && entry.name.starts_with('.') {
            continue;
        }

        let mut path = directory.clone();
        path.append(&entry.name);
        let info = if entry.is_directory {
            FileInfo::with_type(path, FileType::Directory)
        } else {
            FileInfo::new(path)
        };

        let eligible = options.sequences
            && !info.is_directory()
            && info.path().has_frame_number()
            && options.groups_extension(info.path().extension());
        if !eligible {
            slots.push(Slot::Entry(info));
            continue;
        }

        let number = info.path().number().to_string();
        if let Err(e) = codec::parse_frame(&number) {
            debug!("Not grouping {}: {e}", info.path());
            slots.push(Slot::Entry(info));
            continue;
        }
        let key = (
            info.path().base_name().to_string(),
            info.path().extension().to_string(),
        );
        let candidates = by_name.entry(key).or_default();

        // Consecutive entries usually continue the same sequence
        let order = last_match
            .filter(|i| candidates.contains(i))
            .into_iter()
            .chain(candidates.iter().copied());
        let mut joined = None;
        for index in order {
            if let Slot::Group(_, group) = &mut slots[index]
                && group.try_push(&number)?
            {
                joined = Some(index);
                break;
            }
        }

        match joined {
            Some(index) => last_match = Some(index),
            None => {
                let group = SequenceGroup::new(&number)?;
                candidates.push(slots.len());
                last_match = Some(slots.len());
                slots.push(Slot::Group(info, group));
            }
        }
    }

    let mut out: Vec<FileInfo> = slots
        .into_iter()
        .map(|slot| match slot {
            Slot::Entry(info) => info,
            Slot::Group(info, group) if group.len() < 2 => info,
            Slot::Group(mut info, group) => {
                let sequence = group.into_sequence();
                let sequence = match (options.sequence_format, sequence.bounds()) {
                    (SequenceFormat::Range, Some(bounds)) => {
                        FrameSequence::from_range(bounds, sequence.pad())
                    }
                    _ => sequence,
                };
                info.set_sequence(sequence);
                info
            }
        })
        .filter(|info| options.matches_filter(info))
        .collect();

    sort_entries(&mut out, options);
    debug!("Listed {} entries in {}", out.len(), read_path);
    Ok(out)
}

fn sort_entries(entries: &mut [FileInfo], options: &DirectoryListOptions) {
    match options.sort {
        DirectoryListSort::Name => {
            entries.sort_by_cached_key(|info| info.file_name(INVALID_FRAME, false));
            if options.reverse_sort {
                entries.reverse();
            }
        }
        DirectoryListSort::Unsorted => {
            if options.reverse_sort {
                entries.reverse();
            }
        }
    }
    if options.directories_first {
        entries.sort_by_key(|info| !info.is_directory());
    }
}

/// Find the sequence a path belongs to by listing its directory
///
/// Works for concrete frames and `#` wildcards alike. When nothing in the
/// directory matches, the path itself is returned as a plain entry.
pub fn find_sequence<R>(
    reader: &R,
    path: &PathName,
    options: &DirectoryListOptions,
) -> Result<FileInfo>
where
    R: DirectoryReader + ?Sized,
{
    let target = FileInfo::new(path.clone());
    let directory = PathName::new(path.directory());
    let options = DirectoryListOptions {
        sequences: true,
        filter_text: None,
        show_hidden: true,
        ..options.clone()
    };

    let found = directory_list(reader, &directory, &options)?
        .into_iter()
        .find(|info| info.is_compatible(&target));
    Ok(found.unwrap_or(target))
}

/// First entry of `list` that a wildcard (or any entry) is compatible with
pub fn match_wildcard<'a>(info: &FileInfo, list: &'a [FileInfo]) -> Option<&'a FileInfo> {
    list.iter().find(|candidate| info.is_compatible(candidate))
}
