//! Command-line interface parsing for MOTD Artisan
//!
//! Subcommands map one-to-one onto pipeline passes: fetch new art, show cached
//! art, list or clear the cache, the silent login hook, and manual import.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cache::ImportOptions;
use crate::display::RenderMode;

/// MOTD Artisan - Display AI-generated ASCII art as Message of the Day
#[derive(Parser, Debug)]
#[command(name = "motd-artisan")]
#[command(about = "Fetch, cache and display ASCII art as a message of the day")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch new ASCII art, cache it and display it
    Fetch {
        /// Custom prompt for art generation
        #[arg(short, long)]
        prompt: Option<String>,
    },

    /// Display cached ASCII art (random unless an id is given)
    Show {
        /// Display specific art by ID
        #[arg(short, long)]
        id: Option<String>,
        /// Display with border
        #[arg(short, long)]
        border: bool,
        /// Center the art in the terminal
        #[arg(short, long)]
        center: bool,
    },

    /// List all cached ASCII art
    List,

    /// Clear all cached ASCII art
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Display art for login (used by shell integration); never fails
    Login,

    /// Import a custom ASCII art file into the cache
    ///
    /// Example:
    ///   motd-artisan import myart.txt --id mylogo --description "Company logo"
    Import {
        /// File containing the art
        file: PathBuf,
        /// Custom ID for the art (default: derived from the content)
        #[arg(short, long)]
        id: Option<String>,
        /// Description of the art
        #[arg(short, long, default_value = "Manually imported art")]
        description: String,
        /// Theme category
        #[arg(short, long, default_value = "custom")]
        theme: String,
        /// Art style
        #[arg(short, long, default_value = "ASCII art")]
        style: String,
    },
}

impl Command {
    /// Render mode selected by `show` flags; border wins over center
    pub fn render_mode(border: bool, center: bool) -> RenderMode {
        if border {
            RenderMode::Bordered
        } else if center {
            RenderMode::Centered
        } else {
            RenderMode::Plain
        }
    }

    /// Import options carried by an `import` command
    pub fn import_options(&self) -> Option<ImportOptions> {
        match self {
            Command::Import {
                id,
                description,
                theme,
                style,
                ..
            } => Some(ImportOptions {
                id: id.clone(),
                description: description.clone(),
                theme: theme.clone(),
                style: style.clone(),
            }),
            _ => None,
        }
    }
}
