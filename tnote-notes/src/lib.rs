//! Note discovery and filtering for tnote.
//!
//! Notes are flat files in a single directory, each opening with a YAML
//! frontmatter block. [`find_notes_filtered`] is the entry point every
//! command goes through: list the directory, read and parse every note on a
//! small worker pool, keep the notes carrying all required tags, and return
//! them sorted by filename.

pub mod create;
pub mod errors;
pub mod frontmatter;
pub mod models;
pub mod order;
pub mod pipeline;
pub mod scanner;
pub mod tags;

pub use create::{NewNote, note_filename, slugify, write_new_note};
pub use errors::{FrontmatterError, NoteError, NoteFailure, NotesResult, ScanError};
pub use frontmatter::{Frontmatter, parse_frontmatter, split_frontmatter};
pub use models::{NoteRecord, ScanRequest};
pub use order::sort_by_filename;
pub use pipeline::{NoteStore, find_notes_filtered};
pub use scanner::{NoteOutcome, collect_outcomes, list_notes, read_all, read_note};
pub use tags::{tag_counts, tags_match};
