use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Simple note tagging and searching tool.
#[derive(Debug, Parser)]
#[command(name = "tnote", version)]
pub struct Cli {
    /// Config file to use instead of searching the usual locations
    #[arg(long, global = true, env = "TNOTE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new note.
    #[command(visible_alias = "n")]
    New {
        /// Create note with tag(s)
        #[arg(short = 't', long = "tag", alias = "tags", value_name = "TAG")]
        tags: Vec<String>,

        /// Create note without prompting
        #[arg(short, long)]
        yes: bool,

        title: Option<String>,
    },

    /// List notes and filter by tags.
    #[command(visible_aliases = ["l", "ls"])]
    List {
        /// Only show notes with tag(s)
        #[arg(short = 't', long = "tag", alias = "tags", value_name = "TAG")]
        tags: Vec<String>,

        /// Long note listings
        #[arg(short, long)]
        long: bool,

        /// Print notes as JSON
        #[arg(long, conflicts_with = "long")]
        json: bool,
    },

    /// Search for and open a note.
    #[command(visible_alias = "e")]
    Edit {
        /// Only show notes with tag(s)
        #[arg(short = 't', long = "tag", alias = "tags", value_name = "TAG")]
        tags: Vec<String>,

        /// Initial fuzzy query; a single match opens directly
        query: Option<String>,
    },

    /// List tags across existing notes.
    #[command(visible_alias = "t")]
    Tags,
}
