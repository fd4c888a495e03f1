use crate::archive::BundleFile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum number of characters retained per artifact.
pub const MAX_ARTIFACT_CHARS: usize = 20_000;

/// Maximum number of characters retained for the uname and OS release summaries of a run.
pub const MAX_SUMMARY_CHARS: usize = 5_000;

/// The trailing `max_chars` characters of `text`.
#[must_use]
pub fn truncate_tail(text: &str, max_chars: usize) -> &str {
    let count = text.chars().count();
    if count <= max_chars {
        return text;
    }

    text.char_indices()
        .nth(count - max_chars)
        .map_or("", |(index, _)| text.split_at(index).1)
}

/// The leading `max_chars` characters of `text`.
#[must_use]
pub fn truncate_head(text: &str, max_chars: usize) -> &str {
    text.char_indices().nth(max_chars).map_or(text, |(index, _)| text.split_at(index).0)
}

/// Raw text retained for a run, keyed by bundle file.
///
/// Content is tail-truncated to [`MAX_ARTIFACT_CHARS`] on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Artifacts {
    files: BTreeMap<BundleFile, String>,
}

impl Artifacts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file: BundleFile, content: &str) {
        let _ = self.files.insert(file, truncate_tail(content, MAX_ARTIFACT_CHARS).to_string());
    }

    #[must_use]
    pub fn get(&self, file: BundleFile) -> Option<&str> {
        self.files.get(&file).map(String::as_str)
    }

    pub fn extend(&mut self, other: Self) {
        self.files.extend(other.files);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BundleFile, &str)> {
        self.files.iter().map(|(file, content)| (*file, content.as_str()))
    }
}
