//! Building and writing new notes.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::errors::{NoteError, NotesResult};
use crate::frontmatter::Frontmatter;

/// A note about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub tags: Vec<String>,
    pub date: NaiveDate,
}

impl NewNote {
    /// Repeated tags are dropped, first occurrence wins.
    pub fn new(title: impl Into<String>, tags: Vec<String>, date: NaiveDate) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            if !unique.contains(&tag) {
                unique.push(tag);
            }
        }

        Self {
            title: title.into().trim().to_string(),
            tags: unique,
            date,
        }
    }

    pub fn filename(&self, extension: &str) -> String {
        note_filename(self.date, &self.title, extension)
    }

    pub fn frontmatter(&self) -> Frontmatter {
        Frontmatter {
            title: self.title.clone(),
            date: self.date.format("%Y-%m-%d").to_string(),
            tags: self.tags.clone(),
        }
    }

    /// Full initial file contents: the frontmatter and an empty body line.
    pub fn contents(&self) -> String {
        let mut out = self.frontmatter().render();
        out.push('\n');
        out
    }
}

/// Lowercase ASCII alphanumerics, with every other run collapsed to `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// `YYYYMMDD-slug.ext`, or `YYYYMMDD.ext` when the title has no usable
/// characters.
pub fn note_filename(date: NaiveDate, title: &str, extension: &str) -> String {
    let stamp = date.format("%Y%m%d");
    let slug = slugify(title);
    if slug.is_empty() {
        format!("{stamp}{extension}")
    } else {
        format!("{stamp}-{slug}{extension}")
    }
}

/// Create `dir/filename` with `contents`, refusing to overwrite.
pub async fn write_new_note(dir: &Path, filename: &str, contents: &str) -> NotesResult<PathBuf> {
    let path = dir.join(filename);
    let write_err = |source| NoteError::Write {
        path: path.clone(),
        source,
    };

    tokio::fs::create_dir_all(dir).await.map_err(write_err)?;

    let mut file = match tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .await
    {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(NoteError::AlreadyExists(path.clone()));
        }
        Err(e) => return Err(write_err(e)),
    };

    file.write_all(contents.as_bytes()).await.map_err(write_err)?;
    file.flush().await.map_err(write_err)?;

    info!("Created note {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::parse_frontmatter;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Meeting Notes: Q1 / Plans!"), "meeting-notes-q1-plans");
        assert_eq!(slugify("  --hello--  "), "hello");
        assert_eq!(slugify("Café au lait"), "caf-au-lait");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_note_filename() {
        assert_eq!(note_filename(day(), "Big Idea", ".md"), "20240309-big-idea.md");
        assert_eq!(note_filename(day(), "", ".txt"), "20240309.txt");
    }

    #[test]
    fn test_new_note_contents_parse_back() {
        let note = NewNote::new(
            " Big Idea ",
            vec!["work".to_string(), "ideas".to_string(), "work".to_string()],
            day(),
        );
        assert_eq!(note.tags, vec!["work", "ideas"]);

        let front = parse_frontmatter(&note.contents()).unwrap();
        assert_eq!(front.title, "Big Idea");
        assert_eq!(front.date, "2024-03-09");
        assert_eq!(front.tags, vec!["work", "ideas"]);
    }

    #[tokio::test]
    async fn test_write_new_note_refuses_overwrite() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("notes");

        let path = write_new_note(&dir, "20240309.md", "---\n---\n").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "---\n---\n");

        let err = write_new_note(&dir, "20240309.md", "other").await.unwrap_err();
        assert!(matches!(err, NoteError::AlreadyExists(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "---\n---\n");
    }
}
