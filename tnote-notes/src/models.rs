use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::errors::{NoteError, NotesResult};
use crate::frontmatter::Frontmatter;

/// One note found on disk. Built once per scan and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteRecord {
    filename: String,
    title: String,
    date: String,
    tags: Vec<String>,
}

impl NoteRecord {
    pub fn new(filename: impl Into<String>, front: Frontmatter) -> NotesResult<Self> {
        let filename = filename.into();
        if filename.is_empty() {
            return Err(NoteError::EmptyFilename);
        }

        Ok(Self {
            filename,
            title: front.title,
            date: front.date,
            tags: front.tags,
        })
    }

    /// Name relative to the note directory.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Title for display, falling back to the filename.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.filename
        } else {
            &self.title
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn path_in(&self, note_dir: &Path) -> PathBuf {
        note_dir.join(&self.filename)
    }
}

/// Input to the filter pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub directory: PathBuf,
    /// Tags a note must all carry; empty means no filter.
    pub required_tags: BTreeSet<String>,
}

impl ScanRequest {
    pub fn new<I, S>(directory: impl Into<PathBuf>, required_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            directory: directory.into(),
            required_tags: required_tags.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filename_rejected() {
        let err = NoteRecord::new("", Frontmatter::default()).unwrap_err();
        assert!(matches!(err, NoteError::EmptyFilename));
    }

    #[test]
    fn test_display_title_falls_back_to_filename() {
        let note = NoteRecord::new("20240101-a.md", Frontmatter::default()).unwrap();
        assert_eq!(note.display_title(), "20240101-a.md");
        assert!(note.tags().is_empty());

        let note = NoteRecord::new(
            "20240101-a.md",
            Frontmatter {
                title: "A".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(note.display_title(), "A");
    }

    #[test]
    fn test_scan_request_dedupes_tags() {
        let request = ScanRequest::new("/notes", ["b", "a", "b"]);
        assert_eq!(request.required_tags.len(), 2);
        assert!(request.required_tags.contains("a"));
    }
}
