use crate::models::NoteRecord;

/// Stable sort by filename, byte-wise ascending.
///
/// Filenames start with `YYYYMMDD`, so this is also oldest-first.
pub fn sort_by_filename(notes: &mut [NoteRecord]) {
    notes.sort_by(|a, b| a.filename().as_bytes().cmp(b.filename().as_bytes()));
}
