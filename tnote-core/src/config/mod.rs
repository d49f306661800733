//! Configuration management for tnote.
//!
//! Settings live in a small YAML file. The first file found among these
//! locations wins:
//!
//! - `$TNOTE_CONFIG_DIR/config.yaml` (override, mostly for tests)
//! - `~/.config/tnote/config.yaml`
//! - `~/.config/tnote/config.yml`
//! - `~/.tnote.yaml`
//! - `~/.tnote.yml`
//!
//! ```yaml
//! note_dir: $HOME/notes
//! extension: .md
//! editor: nvim
//! list_threads: 4
//! ```
//!
//! Only `note_dir` is required. The loaded [`Settings`] value is passed
//! explicitly to whatever needs it; nothing here is process-global.

mod expand;
mod settings;

pub use expand::expand_with;
pub use settings::{
    DEFAULT_EDITOR, DEFAULT_EXTENSION, DEFAULT_LIST_THREADS, Settings, SettingsError,
};
