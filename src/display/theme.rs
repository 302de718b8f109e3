//! ANSI color tables and theme palettes

/// Escape sequence that resets all attributes
pub const RESET: &str = "\x1b[0m";

/// The sixteen standard ANSI foreground colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl AnsiColor {
    /// Every color, for random selection
    pub const ALL: [AnsiColor; 16] = [
        AnsiColor::Black,
        AnsiColor::Red,
        AnsiColor::Green,
        AnsiColor::Yellow,
        AnsiColor::Blue,
        AnsiColor::Magenta,
        AnsiColor::Cyan,
        AnsiColor::White,
        AnsiColor::BrightBlack,
        AnsiColor::BrightRed,
        AnsiColor::BrightGreen,
        AnsiColor::BrightYellow,
        AnsiColor::BrightBlue,
        AnsiColor::BrightMagenta,
        AnsiColor::BrightCyan,
        AnsiColor::BrightWhite,
    ];

    /// Foreground escape sequence for this color
    pub fn code(self) -> &'static str {
        match self {
            AnsiColor::Black => "\x1b[30m",
            AnsiColor::Red => "\x1b[31m",
            AnsiColor::Green => "\x1b[32m",
            AnsiColor::Yellow => "\x1b[33m",
            AnsiColor::Blue => "\x1b[34m",
            AnsiColor::Magenta => "\x1b[35m",
            AnsiColor::Cyan => "\x1b[36m",
            AnsiColor::White => "\x1b[37m",
            AnsiColor::BrightBlack => "\x1b[90m",
            AnsiColor::BrightRed => "\x1b[91m",
            AnsiColor::BrightGreen => "\x1b[92m",
            AnsiColor::BrightYellow => "\x1b[93m",
            AnsiColor::BrightBlue => "\x1b[94m",
            AnsiColor::BrightMagenta => "\x1b[95m",
            AnsiColor::BrightCyan => "\x1b[96m",
            AnsiColor::BrightWhite => "\x1b[97m",
        }
    }

    /// Wraps `text` in this color followed by a reset
    pub fn paint(self, text: &str) -> String {
        format!("{}{}{}", self.code(), text, RESET)
    }
}

/// Named color palettes cycled line by line over the art
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Cyberpunk,
    Nature,
    Retro,
    Space,
    Abstract,
    Fantasy,
    Monochrome,
}

impl Theme {
    /// Looks up a theme by its lowercase name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "cyberpunk" => Some(Theme::Cyberpunk),
            "nature" => Some(Theme::Nature),
            "retro" => Some(Theme::Retro),
            "space" => Some(Theme::Space),
            "abstract" => Some(Theme::Abstract),
            "fantasy" => Some(Theme::Fantasy),
            "monochrome" => Some(Theme::Monochrome),
            _ => None,
        }
    }

    /// Colors of the palette in cycling order
    pub fn palette(self) -> &'static [AnsiColor] {
        use AnsiColor::*;
        match self {
            Theme::Cyberpunk => &[Cyan, Magenta, BrightBlue, BrightMagenta],
            Theme::Nature => &[Green, BrightGreen, Yellow, BrightYellow],
            Theme::Retro => &[BrightCyan, BrightMagenta, BrightYellow, White],
            Theme::Space => &[Blue, BrightBlue, White, BrightWhite],
            Theme::Abstract => &[Red, Yellow, Blue, Green, Magenta, Cyan],
            Theme::Fantasy => &[BrightMagenta, BrightCyan, BrightYellow, BrightBlue],
            Theme::Monochrome => &[White, BrightWhite, BrightBlack],
        }
    }

    /// Color for the line at `index`
    pub fn color_for_line(self, index: usize) -> AnsiColor {
        let palette = self.palette();
        palette[index % palette.len()]
    }
}
