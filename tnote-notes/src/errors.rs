use std::path::PathBuf;

/// Problems decoding the metadata block at the top of a note.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrontmatterError {
    #[error("missing opening front matter delimiter (---)")]
    MissingOpeningDelimiter,
    #[error("unterminated front matter")]
    Unterminated,
    #[error("yaml parse error: {0}")]
    Yaml(String),
    #[error("front matter is not a mapping")]
    NotAMapping,
    #[error("field `{field}` must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}

/// Failure tied to a single note file.
#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("reading frontmatter of {path}: {source}")]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },
    #[error("writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("note already exists: {0}")]
    AlreadyExists(PathBuf),
    #[error("note filename must not be empty")]
    EmptyFilename,
}

/// A note that could not be read during a scan.
#[derive(Debug, thiserror::Error)]
#[error("{filename}: {error}")]
pub struct NoteFailure {
    pub filename: String,
    #[source]
    pub error: NoteError,
}

/// Whole-scan failure.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("cannot read note directory {path}: {source}")]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("not all notes could be read ({} failed)", .0.len())]
    Aggregate(Vec<NoteFailure>),
    #[error("note reader task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ScanError {
    /// Per-note failures carried by an aggregate error, empty otherwise.
    pub fn failures(&self) -> &[NoteFailure] {
        match self {
            Self::Aggregate(failures) => failures,
            _ => &[],
        }
    }
}

pub type NotesResult<T> = Result<T, NoteError>;
