use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tnote_core::Settings;
use tracing::debug;

use crate::create::{NewNote, write_new_note};
use crate::errors::{NotesResult, ScanError};
use crate::models::{NoteRecord, ScanRequest};
use crate::order::sort_by_filename;
use crate::scanner::{collect_outcomes, list_notes, read_all};
use crate::tags::tags_match;

/// List, read, filter and sort the notes described by `request`.
///
/// Any unreadable note fails the whole call, but only after every note has
/// been attempted so the error lists all of them.
pub async fn find_notes_filtered(
    request: &ScanRequest,
    workers: usize,
) -> Result<Vec<NoteRecord>, ScanError> {
    let filenames = list_notes(&request.directory).await?;
    let outcomes = read_all(&request.directory, filenames, workers).await?;
    let notes = collect_outcomes(outcomes)?;

    let scanned = notes.len();
    let mut matched: Vec<NoteRecord> = notes
        .into_iter()
        .filter(|note| tags_match(&request.required_tags, note.tags()))
        .collect();
    sort_by_filename(&mut matched);

    debug!(
        "{} of {} notes match tags {:?}",
        matched.len(),
        scanned,
        request.required_tags
    );
    Ok(matched)
}

/// Note directory plus the settings the commands need from it.
#[derive(Debug, Clone)]
pub struct NoteStore {
    dir: PathBuf,
    extension: String,
    workers: usize,
}

impl NoteStore {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>, workers: usize) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
            workers,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.note_dir.clone(),
            settings.extension.clone(),
            settings.list_threads,
        )
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, note: &NoteRecord) -> PathBuf {
        note.path_in(&self.dir)
    }

    /// Notes carrying every tag in `required_tags`, sorted by filename.
    pub async fn find(&self, required_tags: &BTreeSet<String>) -> Result<Vec<NoteRecord>, ScanError> {
        let request = ScanRequest {
            directory: self.dir.clone(),
            required_tags: required_tags.clone(),
        };
        find_notes_filtered(&request, self.workers).await
    }

    /// Filename a new note would get in this store.
    pub fn filename_for(&self, note: &NewNote) -> String {
        note.filename(&self.extension)
    }

    pub async fn create(&self, note: &NewNote) -> NotesResult<PathBuf> {
        write_new_note(&self.dir, &self.filename_for(note), &note.contents()).await
    }
}
