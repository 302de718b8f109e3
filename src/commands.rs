//! Command execution for MOTD Artisan
//!
//! Each subcommand performs one synchronous pass over the cache, optionally
//! preceded by a single fetch. Output goes to injected writers so the whole
//! pipeline can be driven from tests.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::cache::{ArtCache, CacheError, ImportOptions};
use crate::cli::Command;
use crate::config::{Config, ConfigError};
use crate::display::{ArtDisplay, RenderMode};
use crate::fetch::{ArtFetcher, FetchError};

/// Number of prompt characters shown by `list`
const PROMPT_PREVIEW_CHARS: usize = 50;

/// Errors that end a command with a non-zero exit status
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// No art is stored under the requested id
    #[error("Art with ID {0} not found")]
    NotFound(String),

    /// The cache holds no art and auto-fetch is disabled
    #[error("No art in cache. Run 'fetch' to get some!")]
    EmptyCache,

    /// An import source file could not be read
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The user declined a confirmation prompt
    #[error("Aborted!")]
    Aborted,

    /// Writing to the console failed
    #[error("Output error: {0}")]
    Io(#[from] io::Error),
}

impl AppError {
    /// Whether this is an expected user-facing outcome rather than a failure
    ///
    /// Such errors are printed as-is, without an `Error:` prefix.
    pub fn is_user_message(&self) -> bool {
        matches!(
            self,
            AppError::NotFound(_) | AppError::EmptyCache | AppError::Aborted
        )
    }
}

/// Console streams used by a command
pub struct Console<'a> {
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
    pub input: &'a mut dyn BufRead,
}

/// Runs `command` against `config`
///
/// `login` never returns an error; every other command reports failures to the caller.
pub async fn run(command: &Command, config: &Config, console: &mut Console<'_>) -> Result<(), AppError> {
    match command {
        Command::Fetch { prompt } => fetch(config, prompt.as_deref(), console).await,
        Command::Show { id, border, center } => {
            show(config, id.as_deref(), Command::render_mode(*border, *center), console).await
        }
        Command::List => list(config, console),
        Command::Clear { yes } => clear(config, *yes, console),
        Command::Login => {
            login(config, console.out);
            Ok(())
        }
        Command::Import { file, .. } => {
            let options = command.import_options().unwrap_or_default();
            import(config, file, &options, console)
        }
    }
}

/// Writes rendered art, logging instead of failing on output errors
fn render(display: &ArtDisplay, out: &mut dyn Write, art: &str, theme: Option<&str>, mode: RenderMode) {
    if let Err(e) = display.render_to(out, art, theme, mode) {
        tracing::debug!(error = %e, "failed to write art");
    }
}

async fn fetch(config: &Config, prompt: Option<&str>, console: &mut Console<'_>) -> Result<(), AppError> {
    let fetcher = ArtFetcher::new(config.fetch.clone())?;
    let mut cache = ArtCache::open(&config.cache)?;

    writeln!(console.out, "Fetching new ASCII art from OpenAI...")?;
    let fetched = fetcher.fetch(prompt).await?;

    let id = cache.save(&fetched.art, &fetched.prompt, &fetched.theme, &fetched.style)?;
    writeln!(console.out, "Art saved with ID: {}", id)?;

    let display = ArtDisplay::new(config.display.clone());
    render(&display, console.out, &fetched.art, Some(&fetched.theme), RenderMode::Plain);
    Ok(())
}

async fn show(
    config: &Config,
    id: Option<&str>,
    mode: RenderMode,
    console: &mut Console<'_>,
) -> Result<(), AppError> {
    let mut cache = ArtCache::open(&config.cache)?;

    if cache.is_empty() && config.auto_fetch {
        writeln!(console.err, "Cache is empty, fetching new art...")?;
        let fetcher = ArtFetcher::new(config.fetch.clone())?;
        let fetched = fetcher.fetch(None).await?;
        cache.save(&fetched.art, &fetched.prompt, &fetched.theme, &fetched.style)?;
    }

    let art = match id {
        Some(id) => cache
            .get_by_id(id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?,
        None => cache.get_random().ok_or(AppError::EmptyCache)?,
    };

    let display = ArtDisplay::new(config.display.clone());
    render(&display, console.out, &art, Some(config.theme()), mode);
    Ok(())
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

fn list(config: &Config, console: &mut Console<'_>) -> Result<(), AppError> {
    let cache = ArtCache::open(&config.cache)?;
    let records = cache.list();
    let out = &mut *console.out;

    if records.is_empty() {
        writeln!(out, "No art in cache")?;
        return Ok(());
    }

    writeln!(out, "Cached ASCII Art ({} items):", records.len())?;
    writeln!(out, "{}", "-".repeat(50))?;

    for record in &records {
        writeln!(out, "ID: {}", record.id)?;
        writeln!(out, "  Created: {}", record.created.to_rfc3339())?;
        writeln!(out, "  Theme: {}", or_na(&record.theme))?;
        writeln!(out, "  Style: {}", or_na(&record.style))?;
        if !record.prompt.is_empty() {
            let preview: String = record.prompt.chars().take(PROMPT_PREVIEW_CHARS).collect();
            writeln!(out, "  Prompt: {}...", preview)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Asks a yes/no question, defaulting to no
fn confirm(console: &mut Console<'_>, question: &str) -> Result<bool, AppError> {
    write!(console.out, "{} [y/N]: ", question)?;
    console.out.flush()?;

    let mut answer = String::new();
    console.input.read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn clear(config: &Config, yes: bool, console: &mut Console<'_>) -> Result<(), AppError> {
    if !yes && !confirm(console, "Are you sure you want to clear the cache?")? {
        return Err(AppError::Aborted);
    }

    let mut cache = ArtCache::open(&config.cache)?;
    cache.clear()?;
    writeln!(console.out, "Cache cleared successfully")?;
    Ok(())
}

/// Shows random cached art and nothing else
///
/// Used from shell startup files, so every failure is swallowed and an empty
/// cache prints nothing. No fetch is attempted.
pub fn login(config: &Config, out: &mut dyn Write) {
    let cache = match ArtCache::open(&config.cache) {
        Ok(cache) => cache,
        Err(e) => {
            tracing::debug!(error = %e, "login: cache unavailable");
            return;
        }
    };
    if let Some(art) = cache.get_random() {
        let display = ArtDisplay::new(config.display.clone());
        render(&display, out, &art, Some(config.theme()), RenderMode::Plain);
    }
}

fn import(
    config: &Config,
    file: &Path,
    options: &ImportOptions,
    console: &mut Console<'_>,
) -> Result<(), AppError> {
    let art = std::fs::read_to_string(file).map_err(|source| AppError::ReadFile {
        path: file.to_path_buf(),
        source,
    })?;

    let mut cache = ArtCache::open(&config.cache)?;
    let id = cache.import(&art, options)?;
    let art_file = cache.dir().join(format!("{}.txt", id));

    let out = &mut *console.out;
    writeln!(out, "✓ Successfully imported art with ID: {}", id)?;
    writeln!(out, "  File: {}", art_file.display())?;
    writeln!(out, "  Theme: {}", options.theme)?;
    writeln!(out, "  Style: {}", options.style)?;
    writeln!(out, "  Description: {}", options.description)?;
    writeln!(out)?;
    writeln!(out, "You can now use:")?;
    writeln!(out, "  motd-artisan show -i {}", id)?;
    Ok(())
}
