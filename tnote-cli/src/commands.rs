use std::collections::BTreeSet;
use std::io::{self, Write};

use chrono::Local;
use tnote_core::Settings;
use tnote_notes::{NewNote, NoteRecord, NoteStore, tag_counts};

use crate::cli::Command;
use crate::editor::open_in_editor;
use crate::error::CliError;
use crate::fuzzy::rank;
use crate::prompt::confirm;
use crate::tui::picker;

pub async fn dispatch(command: Command, settings: &Settings) -> Result<(), CliError> {
    let store = NoteStore::from_settings(settings);

    match command {
        Command::New { tags, yes, title } => {
            new_note(settings, &store, title.unwrap_or_default(), tags, yes).await
        }
        Command::List { tags, long, json } => list(&store, &required(tags), long, json).await,
        Command::Edit { tags, query } => {
            edit(settings, &store, &required(tags), query.as_deref().unwrap_or("")).await
        }
        Command::Tags => list_tags(&store).await,
    }
}

fn required(tags: Vec<String>) -> BTreeSet<String> {
    tags.into_iter().collect()
}

async fn new_note(
    settings: &Settings,
    store: &NoteStore,
    title: String,
    tags: Vec<String>,
    yes: bool,
) -> Result<(), CliError> {
    let note = NewNote::new(title, tags, Local::now().date_naive());
    let filename = store.filename_for(&note);

    if !yes {
        let question = format!("Create {}?", store.dir().join(&filename).display());
        if !confirm(&question, &mut io::stdin().lock(), &mut io::stdout())? {
            println!("Aborted.");
            return Ok(());
        }
    }

    let path = store.create(&note).await?;
    println!("Created {}", path.display());
    open_in_editor(&settings.editor, &[path]).await?;
    Ok(())
}

async fn list(
    store: &NoteStore,
    required: &BTreeSet<String>,
    long: bool,
    json: bool,
) -> Result<(), CliError> {
    let notes = store.find(required).await?;

    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &notes)?;
        writeln!(out)?;
        return Ok(());
    }

    for note in &notes {
        if long {
            writeln!(out, "{}", format_long(note))?;
        } else {
            writeln!(out, "{}", note.filename())?;
        }
    }
    Ok(())
}

/// `filename  date  title  [tags]`
pub fn format_long(note: &NoteRecord) -> String {
    format!(
        "{}  {:<10}  {}  [{}]",
        note.filename(),
        note.date(),
        note.title(),
        note.tags().join(", ")
    )
}

async fn edit(
    settings: &Settings,
    store: &NoteStore,
    required: &BTreeSet<String>,
    query: &str,
) -> Result<(), CliError> {
    let notes = store.find(required).await?;
    if notes.is_empty() {
        println!("No notes found.");
        return Ok(());
    }

    let choice = if query.trim().is_empty() {
        pick_blocking(&notes, query).await?
    } else {
        match rank(query, &notes).as_slice() {
            [] => {
                println!("No notes match '{query}'.");
                return Ok(());
            }
            [only] => Some(*only),
            _ => pick_blocking(&notes, query).await?,
        }
    };

    let Some(idx) = choice else {
        println!("Nothing selected.");
        return Ok(());
    };

    open_in_editor(&settings.editor, &[store.path_of(&notes[idx])]).await?;
    Ok(())
}

/// Run the interactive picker on a blocking thread.
async fn pick_blocking(notes: &[NoteRecord], query: &str) -> Result<Option<usize>, CliError> {
    let notes = notes.to_vec();
    let query = query.to_string();
    let choice = tokio::task::spawn_blocking(move || picker::pick(&notes, &query)).await??;
    Ok(choice)
}

async fn list_tags(store: &NoteStore) -> Result<(), CliError> {
    let notes = store.find(&BTreeSet::new()).await?;

    let mut out = io::stdout().lock();
    for (tag, count) in tag_counts(&notes) {
        writeln!(out, "{count:>5}  {tag}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tnote_notes::Frontmatter;

    #[test]
    fn test_format_long() {
        let note = NoteRecord::new(
            "20240101-a.md",
            Frontmatter {
                title: "A".to_string(),
                date: "2024-01-01".to_string(),
                tags: vec!["x".to_string(), "y".to_string()],
            },
        )
        .unwrap();
        assert_eq!(format_long(&note), "20240101-a.md  2024-01-01  A  [x, y]");

        let bare = NoteRecord::new("b.md", Frontmatter::default()).unwrap();
        assert_eq!(format_long(&bare), "b.md                []");
    }

    #[tokio::test]
    async fn test_list_tags_runs_on_empty_store() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = NoteStore::new(temp.path(), ".md", 2);
        list_tags(&store).await.unwrap();
    }
}
