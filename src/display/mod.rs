//! Terminal rendering of ASCII art
//!
//! Art can be printed plain (optionally colorized by theme), inside a border, or
//! centered in the terminal. Rendering never fails the command that requested it.

mod render;
pub mod theme;

pub use render::{border_art, center_art, colorize_art, ArtDisplay, RenderMode};
pub use theme::{AnsiColor, Theme};
