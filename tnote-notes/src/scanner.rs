//! Directory listing and the worker pool that reads notes.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::errors::{NoteError, NoteFailure, ScanError};
use crate::frontmatter::parse_frontmatter;
use crate::models::NoteRecord;

/// Result of reading one note, keyed by its filename.
#[derive(Debug)]
pub struct NoteOutcome {
    pub filename: String,
    pub result: Result<NoteRecord, NoteError>,
}

type JobQueue = Arc<Mutex<mpsc::UnboundedReceiver<String>>>;

/// Names of the non-directory entries directly inside `dir`.
///
/// Entries are classified by their own file type, so a symlink is listed
/// as a note whatever it points at.
pub async fn list_notes(dir: &Path) -> Result<Vec<String>, ScanError> {
    let access = |source| ScanError::DirectoryAccess {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(access)?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(access)? {
        let file_type = entry.file_type().await.map_err(access)?;
        if file_type.is_dir() {
            continue;
        }

        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => warn!("Skipping note with non UTF-8 name: {:?}", raw),
        }
    }

    debug!("Listed {} notes in {}", names.len(), dir.display());
    Ok(names)
}

/// Read and parse one note.
pub async fn read_note(dir: &Path, filename: &str) -> Result<NoteRecord, NoteError> {
    let path = dir.join(filename);
    let raw = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| NoteError::Read {
            path: path.clone(),
            source,
        })?;
    let front = parse_frontmatter(&raw).map_err(|source| NoteError::Frontmatter { path, source })?;
    NoteRecord::new(filename, front)
}

/// Read every note on a pool of `workers` tasks.
///
/// Returns exactly one outcome per filename, in no particular order. The
/// call only returns once every worker has finished.
pub async fn read_all(
    dir: &Path,
    filenames: Vec<String>,
    workers: usize,
) -> Result<Vec<NoteOutcome>, ScanError> {
    let total = filenames.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    let width = workers.clamp(1, total);
    let dir: Arc<Path> = Arc::from(dir);
    let (job_tx, job_rx) = mpsc::unbounded_channel::<String>();
    let jobs: JobQueue = Arc::new(Mutex::new(job_rx));
    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<NoteOutcome>();

    let mut pool = JoinSet::new();
    for worker_id in 0..width {
        pool.spawn(read_worker(
            worker_id,
            Arc::clone(&dir),
            Arc::clone(&jobs),
            result_tx.clone(),
        ));
    }
    drop(result_tx);
    debug!("Reading {} notes with {} workers", total, width);

    for filename in filenames {
        // Only fails once every worker is gone; the join below says why.
        if job_tx.send(filename).is_err() {
            break;
        }
    }
    drop(job_tx);

    let mut outcomes = Vec::with_capacity(total);
    while let Some(outcome) = result_rx.recv().await {
        outcomes.push(outcome);
    }

    while let Some(joined) = pool.join_next().await {
        joined?;
    }

    Ok(outcomes)
}

async fn read_worker(
    worker_id: usize,
    dir: Arc<Path>,
    jobs: JobQueue,
    results: mpsc::UnboundedSender<NoteOutcome>,
) {
    let mut handled = 0usize;
    loop {
        let next = jobs.lock().await.recv().await;
        let Some(filename) = next else {
            break;
        };

        let result = read_note(&dir, &filename).await;
        handled += 1;
        if results.send(NoteOutcome { filename, result }).is_err() {
            break;
        }
    }
    debug!("Worker {} done after {} notes", worker_id, handled);
}

/// Split outcomes into notes, or fail with every per-note error.
///
/// Each failure is logged before the aggregate error is returned.
pub fn collect_outcomes(outcomes: Vec<NoteOutcome>) -> Result<Vec<NoteRecord>, ScanError> {
    let mut notes = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();

    for NoteOutcome { filename, result } in outcomes {
        match result {
            Ok(note) => notes.push(note),
            Err(error) => {
                warn!("note not read: {}", error);
                failures.push(NoteFailure { filename, error });
            }
        }
    }

    if failures.is_empty() {
        Ok(notes)
    } else {
        failures.sort_by(|a, b| a.filename.cmp(&b.filename));
        Err(ScanError::Aggregate(failures))
    }
}
