//! Settings loaded from the YAML configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use yaml_rust2::{Yaml, YamlLoader};

use super::expand::expand_with;

/// Extension used for new notes when the config leaves it out.
pub const DEFAULT_EXTENSION: &str = ".md";
/// Editor used when neither the config nor `$EDITOR` names one.
pub const DEFAULT_EDITOR: &str = "vim";
/// Width of the note reading pool.
pub const DEFAULT_LIST_THREADS: usize = 4;

/// Config file locations relative to the home directory, in search order.
const SEARCH_LOCATIONS: [&str; 4] = [
    ".config/tnote/config.yaml",
    ".config/tnote/config.yml",
    ".tnote.yaml",
    ".tnote.yml",
];

/// Resolved tnote settings (all values filled with defaults).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding every note
    pub note_dir: PathBuf,
    /// Extension appended to new note filenames, always starting with `.`
    pub extension: String,
    /// Editor command line; extra words are passed as leading arguments
    pub editor: String,
    /// Number of workers reading notes concurrently
    pub list_threads: usize,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parse error in config: {0}")]
    Yaml(String),

    #[error("config: note_dir is not defined")]
    MissingNoteDir,

    #[error("config: {field} must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("no config file found (searched {})", format_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    #[error("home directory not found")]
    HomeDirNotFound,
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Settings {
    /// Settings for a note directory with every other value defaulted.
    pub fn with_note_dir(note_dir: impl Into<PathBuf>) -> Self {
        Self {
            note_dir: note_dir.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            editor: DEFAULT_EDITOR.to_string(),
            list_threads: DEFAULT_LIST_THREADS,
        }
    }

    /// Find and load the user's config file.
    pub fn load() -> Result<Self, SettingsError> {
        let path = Self::discover()?;
        Self::load_from(&path)
    }

    /// Load settings from a specific file, expanding variables against the
    /// process environment.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded configuration from {}", path.display());

        let home = dirs::home_dir().map(|p| p.to_string_lossy().into_owned());
        Self::from_yaml(&content, home.as_deref(), |name| std::env::var(name).ok())
    }

    /// Parse settings from YAML content.
    ///
    /// `lookup` resolves environment variables, both for `$VAR` expansion in
    /// `note_dir` and for the `EDITOR` fallback.
    pub fn from_yaml<F>(content: &str, home: Option<&str>, lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let docs =
            YamlLoader::load_from_str(content).map_err(|e| SettingsError::Yaml(e.to_string()))?;
        let doc = docs.into_iter().next().unwrap_or(Yaml::Null);
        if !matches!(doc, Yaml::Hash(_) | Yaml::Null) {
            return Err(SettingsError::InvalidField {
                field: "config",
                expected: "a mapping",
            });
        }

        let note_dir = optional_str(&doc, "note_dir")?
            .filter(|dir| !dir.trim().is_empty())
            .ok_or(SettingsError::MissingNoteDir)?;
        let note_dir = PathBuf::from(expand_with(&note_dir, home, &lookup));

        let extension = match optional_str(&doc, "extension")? {
            Some(ext) if !ext.trim().is_empty() => normalize_extension(ext.trim()),
            _ => DEFAULT_EXTENSION.to_string(),
        };

        let editor = optional_str(&doc, "editor")?
            .filter(|editor| !editor.trim().is_empty())
            .or_else(|| lookup("EDITOR").filter(|editor| !editor.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_EDITOR.to_string());

        let list_threads = match &doc["list_threads"] {
            Yaml::BadValue | Yaml::Null => DEFAULT_LIST_THREADS,
            Yaml::Integer(0) => DEFAULT_LIST_THREADS,
            Yaml::Integer(n) => usize::try_from(*n).map_err(|_| SettingsError::InvalidField {
                field: "list_threads",
                expected: "a non-negative integer",
            })?,
            _ => {
                return Err(SettingsError::InvalidField {
                    field: "list_threads",
                    expected: "a non-negative integer",
                });
            }
        };

        Ok(Self {
            note_dir,
            extension,
            editor,
            list_threads,
        })
    }

    /// Locate the config file, honouring `TNOTE_CONFIG_DIR` first.
    pub fn discover() -> Result<PathBuf, SettingsError> {
        let mut searched = Vec::new();

        if let Ok(override_dir) = std::env::var("TNOTE_CONFIG_DIR") {
            let path = PathBuf::from(override_dir).join("config.yaml");
            if path.is_file() {
                return Ok(path);
            }
            searched.push(path);
        }

        let home = dirs::home_dir().ok_or(SettingsError::HomeDirNotFound)?;
        for path in Self::candidate_paths(&home) {
            if path.is_file() {
                return Ok(path);
            }
            searched.push(path);
        }

        Err(SettingsError::NotFound { searched })
    }

    /// Config file candidates under `home`, in search order.
    pub fn candidate_paths(home: &Path) -> Vec<PathBuf> {
        SEARCH_LOCATIONS.iter().map(|loc| home.join(loc)).collect()
    }
}

fn optional_str(doc: &Yaml, key: &'static str) -> Result<Option<String>, SettingsError> {
    match &doc[key] {
        Yaml::BadValue | Yaml::Null => Ok(None),
        Yaml::String(s) | Yaml::Real(s) => Ok(Some(s.clone())),
        Yaml::Integer(n) => Ok(Some(n.to_string())),
        _ => Err(SettingsError::InvalidField {
            field: key,
            expected: "a string",
        }),
    }
}

fn normalize_extension(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}
