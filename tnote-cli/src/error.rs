use tnote_core::SettingsError;
use tnote_notes::{NoteError, ScanError};

use crate::editor::EditorError;

/// Anything a command can fail with.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Note(#[from] NoteError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("picker task failed: {0}")]
    Picker(#[from] tokio::task::JoinError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
