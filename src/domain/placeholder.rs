//! Placeholder extraction and substitution for command templates.
//!
//! Templates carry `{identifier}` tokens where the identifier is made of
//! ASCII letters, digits and underscores. Anything else between braces is
//! left untouched.

use super::models::CommandKind;
use crate::error::{PanelError, Result};
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("Invalid PLACEHOLDER_REGEX pattern"));

/// `now` rendering used for `{timestamp}` in screenshot commands.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReservedPlaceholder {
    LocalPath,
    RemotePath,
    PackageName,
    Timestamp,
}

impl ReservedPlaceholder {
    #[must_use]
    pub fn identifier(&self) -> &'static str {
        match self {
            ReservedPlaceholder::LocalPath => "local_path",
            ReservedPlaceholder::RemotePath => "remote_path",
            ReservedPlaceholder::PackageName => "package_name",
            ReservedPlaceholder::Timestamp => "timestamp",
        }
    }

    fn from_identifier(identifier: &str) -> Option<Self> {
        match identifier {
            "local_path" => Some(ReservedPlaceholder::LocalPath),
            "remote_path" => Some(ReservedPlaceholder::RemotePath),
            "package_name" => Some(ReservedPlaceholder::PackageName),
            "timestamp" => Some(ReservedPlaceholder::Timestamp),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Placeholder {
    Reserved(ReservedPlaceholder),
    Custom(String),
}

impl Placeholder {
    pub fn parse(identifier: &str) -> Self {
        ReservedPlaceholder::from_identifier(identifier)
            .map_or_else(|| Placeholder::Custom(identifier.to_string()), Placeholder::Reserved)
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Placeholder::Reserved(r) => r.identifier(),
            Placeholder::Custom(name) => name,
        }
    }

    /// How the panel should ask for this value.
    #[must_use]
    pub fn prompt(&self, kind: CommandKind) -> PromptSpec {
        use ReservedPlaceholder::{LocalPath, RemotePath};
        match (self, kind) {
            (Placeholder::Reserved(LocalPath), CommandKind::Upload) => PromptSpec {
                title: "Local file to upload".to_string(),
                mode: PromptMode::OpenPath,
            },
            (Placeholder::Reserved(LocalPath), CommandKind::Download) => PromptSpec {
                title: "Save to (empty = current directory)".to_string(),
                mode: PromptMode::SavePath,
            },
            (Placeholder::Reserved(RemotePath), CommandKind::Upload) => PromptSpec {
                title: "Destination path on the device".to_string(),
                mode: PromptMode::Text,
            },
            (Placeholder::Reserved(RemotePath), CommandKind::Download) => PromptSpec {
                title: "Remote file to download".to_string(),
                mode: PromptMode::Text,
            },
            (p, _) => PromptSpec {
                title: format!("Enter {}", p.identifier()),
                mode: PromptMode::Text,
            },
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.identifier())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    Text,
    /// A local file that must exist (upload source).
    OpenPath,
    /// A local destination; may be left empty.
    SavePath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSpec {
    pub title: String,
    pub mode: PromptMode,
}

/// Caller-supplied placeholder values: reserved identifiers in a closed map,
/// user-defined ones keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderValues {
    reserved: HashMap<ReservedPlaceholder, String>,
    custom: HashMap<String, String>,
}

impl PlaceholderValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, placeholder: &Placeholder, value: impl Into<String>) {
        match placeholder {
            Placeholder::Reserved(r) => {
                self.reserved.insert(*r, value.into());
            }
            Placeholder::Custom(name) => {
                self.custom.insert(name.clone(), value.into());
            }
        }
    }

    #[must_use]
    pub fn with(mut self, placeholder: &Placeholder, value: impl Into<String>) -> Self {
        self.insert(placeholder, value);
        self
    }

    #[must_use]
    pub fn get(&self, placeholder: &Placeholder) -> Option<&str> {
        match placeholder {
            Placeholder::Reserved(r) => self.reserved.get(r),
            Placeholder::Custom(name) => self.custom.get(name),
        }
        .map(String::as_str)
    }

    #[must_use]
    pub fn get_reserved(&self, reserved: ReservedPlaceholder) -> Option<&str> {
        self.reserved.get(&reserved).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reserved.is_empty() && self.custom.is_empty()
    }
}

/// Distinct placeholders found in `template`. Empty when there are none.
#[must_use]
pub fn extract(template: &str) -> BTreeSet<Placeholder> {
    PLACEHOLDER_REGEX
        .captures_iter(template)
        .map(|caps| Placeholder::parse(&caps[1]))
        .collect()
}

fn is_auto_resolved(placeholder: &Placeholder, kind: CommandKind) -> bool {
    kind == CommandKind::Screenshot
        && *placeholder == Placeholder::Reserved(ReservedPlaceholder::Timestamp)
}

/// Placeholders the user has to be asked for, in prompt order.
///
/// Order of first appearance, except that uploads ask for the local file
/// before the remote path and downloads ask for the remote path first.
#[must_use]
pub fn prompts_for(template: &str, kind: CommandKind) -> Vec<Placeholder> {
    let mut ordered: Vec<Placeholder> = Vec::new();
    for caps in PLACEHOLDER_REGEX.captures_iter(template) {
        let placeholder = Placeholder::parse(&caps[1]);
        if !is_auto_resolved(&placeholder, kind) && !ordered.contains(&placeholder) {
            ordered.push(placeholder);
        }
    }

    let rank = |p: &Placeholder| match (kind, p) {
        (CommandKind::Upload, Placeholder::Reserved(ReservedPlaceholder::LocalPath))
        | (CommandKind::Download, Placeholder::Reserved(ReservedPlaceholder::RemotePath)) => 0,
        (CommandKind::Upload, Placeholder::Reserved(ReservedPlaceholder::RemotePath))
        | (CommandKind::Download, Placeholder::Reserved(ReservedPlaceholder::LocalPath)) => 1,
        (CommandKind::Upload | CommandKind::Download, _) => 2,
        _ => 0,
    };
    ordered.sort_by_key(rank);
    ordered
}

/// Substitute every placeholder in `template`.
///
/// Screenshot commands get `{timestamp}` from `now`. Every other placeholder
/// must be present in `values`; the first one missing (in template order) is
/// reported. Substitution is a single pass, so values containing braces are
/// inserted verbatim.
pub fn resolve(
    template: &str,
    kind: CommandKind,
    values: &PlaceholderValues,
    now: NaiveDateTime,
) -> Result<String> {
    let timestamp = (kind == CommandKind::Screenshot).then(|| now.format(TIMESTAMP_FORMAT).to_string());

    let lookup = |placeholder: &Placeholder| -> Option<String> {
        if is_auto_resolved(placeholder, kind) {
            return timestamp.clone();
        }
        values.get(placeholder).map(str::to_string)
    };

    for caps in PLACEHOLDER_REGEX.captures_iter(template) {
        let placeholder = Placeholder::parse(&caps[1]);
        if lookup(&placeholder).is_none() {
            return Err(PanelError::MissingValue(placeholder.identifier().to_string()));
        }
    }

    let resolved = PLACEHOLDER_REGEX.replace_all(template, |caps: &Captures| {
        lookup(&Placeholder::parse(&caps[1])).unwrap_or_default()
    });
    Ok(resolved.into_owned())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSegment<'a> {
    Literal(&'a str),
    /// A `{identifier}` token, braces included.
    Placeholder(&'a str),
}

/// Split `template` into literal runs and placeholder tokens, for highlighting.
#[must_use]
pub fn split_template(template: &str) -> Vec<TemplateSegment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;
    for token in PLACEHOLDER_REGEX.find_iter(template) {
        if token.start() > last {
            segments.push(TemplateSegment::Literal(&template[last..token.start()]));
        }
        segments.push(TemplateSegment::Placeholder(token.as_str()));
        last = token.end();
    }
    if last < template.len() {
        segments.push(TemplateSegment::Literal(&template[last..]));
    }
    segments
}

/// Wrap a prompted value in double quotes so paths with spaces survive the shell.
#[must_use]
pub fn quote_value(value: &str) -> String {
    let already_quoted = value.len() >= 2 && value.starts_with('"') && value.ends_with('"');
    if already_quoted {
        value.to_string()
    } else {
        format!("\"{value}\"")
    }
}

/// Destination used when a download is confirmed without a local path.
#[must_use]
pub fn default_download_path(remote_path: &str, cwd: &Path) -> PathBuf {
    let trimmed = remote_path.trim().trim_matches('"');
    let basename = trimmed
        .rsplit(['/', '\\'])
        .find(|segment| !segment.is_empty())
        .unwrap_or("download");
    cwd.join(basename)
}
