//! Rendering art to a writer

use std::io::{self, Write};

use rand::seq::SliceRandom;

use super::theme::{AnsiColor, Theme};
use crate::config::DisplayConfig;

/// How the art is laid out on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Printed as-is, colorized when colors are enabled
    #[default]
    Plain,
    /// Framed with `=` characters
    Bordered,
    /// Each line centered in the terminal
    Centered,
}

/// Renders ASCII art to the terminal
#[derive(Debug, Clone)]
pub struct ArtDisplay {
    config: DisplayConfig,
}

impl ArtDisplay {
    pub fn new(config: DisplayConfig) -> Self {
        Self { config }
    }

    /// Renders `art` into `out` (standard output in the binary)
    ///
    /// Centered mode falls back to plain text when the terminal width is unknown.
    pub fn render_to<W: Write + ?Sized>(
        &self,
        out: &mut W,
        art: &str,
        theme: Option<&str>,
        mode: RenderMode,
    ) -> io::Result<()> {
        let text = match mode {
            RenderMode::Plain => self.colorize(art, theme),
            RenderMode::Bordered => border_art(art, '='),
            RenderMode::Centered => match terminal_columns() {
                Some(columns) => center_art(art, columns),
                None => art.to_string(),
            },
        };
        writeln!(out, "{}", text)?;
        out.flush()
    }

    /// Applies the configured color policy to `art`
    fn colorize(&self, art: &str, theme: Option<&str>) -> String {
        if !self.config.use_color {
            return art.to_string();
        }
        if self.config.random_color {
            let color = AnsiColor::ALL
                .choose(&mut rand::thread_rng())
                .copied()
                .unwrap_or(AnsiColor::Cyan);
            return color.paint(art);
        }
        match theme.and_then(Theme::from_name) {
            Some(theme) => colorize_art(art, theme),
            None => AnsiColor::Cyan.paint(art),
        }
    }
}

/// Width of the terminal in columns, if it can be determined
fn terminal_columns() -> Option<usize> {
    match crossterm::terminal::size() {
        Ok((columns, _rows)) if columns > 0 => Some(columns as usize),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(error = %e, "terminal size unavailable, printing plain");
            None
        }
    }
}

/// Colors each non-blank line with the theme color for its line index
pub fn colorize_art(art: &str, theme: Theme) -> String {
    art.split('\n')
        .enumerate()
        .map(|(i, line)| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                theme.color_for_line(i).paint(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Frames `art` with `border_char`
///
/// The frame is as wide as the longest line plus four; every line is padded to
/// the longest line's width.
pub fn border_art(art: &str, border_char: char) -> String {
    let lines: Vec<&str> = art.split('\n').collect();
    let max_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let border: String = std::iter::repeat(border_char).take(max_width + 4).collect();

    let mut framed = Vec::with_capacity(lines.len() + 2);
    framed.push(border.clone());
    for line in lines {
        framed.push(format!(
            "{c} {line:<width$} {c}",
            c = border_char,
            line = line,
            width = max_width
        ));
    }
    framed.push(border);
    framed.join("\n")
}

/// Left-pads every line so it sits in the middle of `columns`
pub fn center_art(art: &str, columns: usize) -> String {
    art.split('\n')
        .map(|line| {
            let padding = columns.saturating_sub(line.chars().count()) / 2;
            format!("{}{}", " ".repeat(padding), line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
