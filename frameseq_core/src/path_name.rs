//! File path decomposition
//!
//! A [`PathName`] splits a path into four parts whose concatenation is the
//! original text:
//!
//! ```text
//! /tmp/render.0001.exr
//! |----||------||--||--|
//! directory  base  number  extension
//! ```
//!
//! Both `/` and `\` are accepted as separators regardless of host platform.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Path separator conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathSeparator {
    Unix,
    Windows,
}

impl PathSeparator {
    pub fn as_char(self) -> char {
        match self {
            Self::Unix => '/',
            Self::Windows => '\\',
        }
    }

    /// Separator convention of the host platform
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }
}

/// A path split into directory, base name, frame number and extension
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathName {
    directory: String,
    base_name: String,
    number: String,
    extension: String,
}

impl PathName {
    pub fn new(path: impl Into<String>) -> Self {
        let mut out = Self::default();
        out.set(path);
        out
    }

    pub fn is_separator(c: char) -> bool {
        c == '/' || c == '\\'
    }

    pub fn separator(style: PathSeparator) -> char {
        style.as_char()
    }

    pub fn current_separator() -> char {
        PathSeparator::current().as_char()
    }

    /// Replace the whole path, splitting it again
    pub fn set(&mut self, path: impl Into<String>) {
        #[allow(unused_mut)]
        let mut path = path.into();
        #[cfg(windows)]
        if path.ends_with(':') {
            path.push('\\');
        }
        let (directory, base_name, number, extension) = split_file_name(&path);
        self.directory = directory.to_string();
        self.base_name = base_name.to_string();
        self.number = number.to_string();
        self.extension = extension.to_string();
    }

    /// The full path text
    pub fn get(&self) -> String {
        let mut out = String::with_capacity(
            self.directory.len() + self.base_name.len() + self.number.len() + self.extension.len(),
        );
        out.push_str(&self.directory);
        out.push_str(&self.file_name());
        out
    }

    pub fn is_empty(&self) -> bool {
        self.directory.is_empty()
            && self.base_name.is_empty()
            && self.number.is_empty()
            && self.extension.is_empty()
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Base name, number and extension
    pub fn file_name(&self) -> String {
        format!("{}{}{}", self.base_name, self.number, self.extension)
    }

    pub fn set_directory(&mut self, directory: impl Into<String>) {
        self.directory = directory.into();
    }

    pub fn set_base_name(&mut self, base_name: impl Into<String>) {
        self.base_name = base_name.into();
    }

    pub fn set_number(&mut self, number: impl Into<String>) {
        self.number = number.into();
    }

    pub fn set_extension(&mut self, extension: impl Into<String>) {
        self.extension = extension.into();
    }

    /// Replace everything after the directory, splitting the new name
    pub fn set_file_name(&mut self, file_name: &str) {
        let path = format!("{}{}", self.directory, file_name);
        self.set(path);
    }

    /// True when the number is made of decimal digits only
    pub fn has_frame_number(&self) -> bool {
        !self.number.is_empty() && self.number.bytes().all(|b| b.is_ascii_digit())
    }

    /// True when the number is one or more `#` placeholders
    pub fn is_number_wildcard(&self) -> bool {
        !self.number.is_empty() && self.number.bytes().all(|b| b == b'#')
    }

    /// A lone `/` or a drive root such as `C:\`
    pub fn is_root(&self) -> bool {
        if !self.file_name().is_empty() {
            return false;
        }
        let dir = self.directory.as_bytes();
        match dir {
            [b'/'] => true,
            [drive, b':', sep] => drive.is_ascii_alphabetic() && (*sep == b'\\' || *sep == b'/'),
            _ => false,
        }
    }

    /// A UNC server path such as `\\server` or `\\server\`
    pub fn is_server(&self) -> bool {
        if self.directory == "\\\\" {
            return !self.base_name.is_empty();
        }
        if self.directory.len() > 3 && self.directory.starts_with("\\\\") && self.file_name().is_empty()
        {
            let host = &self.directory[2..self.directory.len() - 1];
            return self.directory.ends_with('\\') && !host.contains(['\\', '/']);
        }
        false
    }

    /// Separator convention used by this path
    ///
    /// Taken from the first separator in the text, falling back to the host
    /// convention for paths without one.
    pub fn separator_style(&self) -> PathSeparator {
        match self.directory.chars().find(|&c| Self::is_separator(c)) {
            Some('\\') => PathSeparator::Windows,
            Some(_) => PathSeparator::Unix,
            None => PathSeparator::current(),
        }
    }

    /// Remove the last path segment
    ///
    /// Returns false when only a root or a single segment remains.
    pub fn cd_up(&mut self) -> bool {
        let separator = self.separator_style().as_char();
        let mut segments = split_dir(&self.get());
        if segments.len() > 1 {
            segments.pop();
            self.set(join_dirs(&segments, separator));
            true
        } else {
            false
        }
    }

    /// Append a segment, inserting a separator between the two parts
    pub fn append(&mut self, segment: &str) {
        let separator = self.separator_style().as_char();
        let path = self.get();
        let joined = match path.chars().last() {
            Some(last) if Self::is_separator(last) => {
                format!("{path}{}", segment.trim_start_matches(Self::is_separator))
            }
            Some(_) if !segment.is_empty() => {
                format!(
                    "{path}{separator}{}",
                    segment.trim_start_matches(Self::is_separator)
                )
            }
            _ => format!("{path}{segment}"),
        };
        self.set(joined);
    }

    /// Path text used for equality and ordering
    fn comparison_key(&self) -> String {
        let mut path = self.get();
        remove_trailing_separator(&mut path);
        path
    }
}

impl From<&str> for PathName {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for PathName {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl From<&std::path::Path> for PathName {
    fn from(path: &std::path::Path) -> Self {
        Self::new(path.to_string_lossy().into_owned())
    }
}

impl fmt::Display for PathName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.get())
    }
}

impl PartialEq for PathName {
    fn eq(&self, other: &Self) -> bool {
        self.comparison_key() == other.comparison_key()
    }
}

impl Eq for PathName {}

impl Hash for PathName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.comparison_key().hash(state);
    }
}

impl PartialOrd for PathName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PathName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.comparison_key().cmp(&other.comparison_key())
    }
}

/// Split a path into `(directory, base name, number, extension)`
///
/// - the directory runs through the last separator
/// - the extension starts at the last `.` of the name unless that dot opens
///   the name
/// - the number is the trailing run of digits before the extension, or the
///   trailing run of `#` placeholders when there are no digits
pub fn split_file_name(path: &str) -> (&str, &str, &str, &str) {
    let name_start = path
        .rfind(PathName::is_separator)
        .map(|i| i + 1)
        .unwrap_or(0);
    let (directory, name) = path.split_at(name_start);

    let stem_end = match name.rfind('.') {
        Some(dot) if dot > 0 => dot,
        _ => name.len(),
    };
    let (stem, extension) = name.split_at(stem_end);

    let digits = trailing_run(stem, |b| b.is_ascii_digit());
    let number_len = if digits > 0 {
        digits
    } else {
        trailing_run(stem, |b| b == b'#')
    };
    let (base_name, number) = stem.split_at(stem.len() - number_len);

    (directory, base_name, number, extension)
}

fn trailing_run(text: &str, predicate: impl Fn(u8) -> bool) -> usize {
    text.bytes().rev().take_while(|&b| predicate(b)).count()
}

/// Split a path into its directory segments
///
/// A leading root (`/`, `\`, a drive such as `C:\` or a `\\server` prefix)
/// is kept as the first segment and empty segments are dropped.
pub fn split_dir(path: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = path;

    if let [drive, b':', sep, ..] = path.as_bytes()
        && drive.is_ascii_alphabetic()
        && PathName::is_separator(*sep as char)
    {
        out.push(path[..3].to_string());
        rest = &path[3..];
    } else if let Some(stripped) = rest.strip_prefix('/') {
        out.push("/".to_string());
        rest = stripped;
    } else if let Some(server) = rest.strip_prefix("\\\\") {
        let end = server.find('\\').unwrap_or(server.len());
        out.push(format!("\\\\{}", &server[..end]));
        rest = &server[end..];
    } else if let Some(stripped) = rest.strip_prefix('\\') {
        out.push("\\".to_string());
        rest = stripped;
    }

    out.extend(
        rest.split(PathName::is_separator)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string),
    );
    out
}

/// Join segments produced by [`split_dir`] with `separator`
pub fn join_dirs(segments: &[String], separator: char) -> String {
    let (mut out, rest) = match segments.split_first() {
        Some((first, rest)) if first.ends_with(PathName::is_separator) => (first.clone(), rest),
        _ => (String::new(), segments),
    };
    out.push_str(&rest.join(&separator.to_string()));
    out
}

/// Remove one trailing separator from paths longer than two characters
pub fn remove_trailing_separator(path: &mut String) {
    if path.chars().count() > 2 && path.ends_with(PathName::is_separator) {
        path.pop();
    }
}
