use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "notekeeper")]
#[command(version, about = "Keep an ordered list of notes with a current selection")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding notes.db and config.json
    /// (defaults to $NOTEKEEPER_DIR, then ./.notekeeper)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new note and select it
    New {
        /// Title for the note (defaults to the configured default title)
        #[arg(long, short = 't')]
        title: Option<String>,

        /// Read content from stdin
        #[arg(long)]
        stdin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List notes, most recently touched first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note
    Show {
        /// Note ID or unique ID prefix
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change a note's title or content
    Edit {
        /// Note ID or unique ID prefix
        id: String,

        /// New title
        #[arg(long, short = 't')]
        title: Option<String>,

        /// New content
        #[arg(long, short = 'c', conflicts_with = "stdin")]
        content: Option<String>,

        /// Read new content from stdin
        #[arg(long)]
        stdin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a note
    Delete {
        /// Note ID or unique ID prefix
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Select a note, or clear the selection
    Select {
        /// Note ID or unique ID prefix
        #[arg(required_unless_present = "clear", conflicts_with = "clear")]
        id: Option<String>,

        /// Clear the current selection
        #[arg(long)]
        clear: bool,
    },

    /// Show the currently selected note
    Current {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
