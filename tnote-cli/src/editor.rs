use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitStatus;

use tokio::process::Command;
use tracing::{info, warn};

/// Split the configured editor line into a program and its arguments,
/// with the note paths appended. Quoting follows shell rules.
pub fn editor_command(
    editor: &str,
    paths: &[PathBuf],
) -> Result<(String, Vec<OsString>), EditorError> {
    let mut words = shell_words::split(editor)?.into_iter();
    let program = words.next().ok_or(EditorError::NotConfigured)?;

    let mut args: Vec<OsString> = words.map(OsString::from).collect();
    args.extend(paths.iter().map(|p| p.clone().into_os_string()));
    Ok((program, args))
}

/// Open notes in the editor and wait for it to exit.
pub async fn open_in_editor(editor: &str, paths: &[PathBuf]) -> Result<(), EditorError> {
    let (program, args) = editor_command(editor, paths)?;
    info!("Opening {} note(s) with {}", paths.len(), program);

    let status = Command::new(&program)
        .args(&args)
        .status()
        .await
        .map_err(|source| EditorError::Spawn {
            program: program.clone(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        warn!("Editor {} exited with {}", program, status);
        Err(EditorError::Exited { program, status })
    }
}

/// Errors that can occur when launching the editor
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("no editor configured")]
    NotConfigured,
    #[error("cannot parse editor command: {0}")]
    Parse(#[from] shell_words::ParseError),
    #[error("failed to start editor `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("editor `{program}` exited with {status}")]
    Exited { program: String, status: ExitStatus },
}
