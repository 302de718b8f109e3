//! Prompt templates per theme

use rand::seq::SliceRandom;
use rand::Rng;

/// Theme used when the configured theme has no templates of its own
pub const FALLBACK_THEME: &str = "cyberpunk";

const CYBERPUNK: &[&str] = &[
    "Create ASCII art of a futuristic city skyline with neon signs",
    "Draw an ASCII robot or android face",
    "Create ASCII art of a cyberpunk hacker terminal",
    "Draw ASCII art of digital rain like in The Matrix",
];

const NATURE: &[&str] = &[
    "Create ASCII art of a mountain landscape",
    "Draw an ASCII tree with detailed branches",
    "Create ASCII art of ocean waves",
    "Draw ASCII art of a sunset or sunrise",
];

const ABSTRACT: &[&str] = &[
    "Create abstract geometric ASCII patterns",
    "Draw ASCII art with fractal-like patterns",
    "Create ASCII art with flowing organic shapes",
    "Draw ASCII mandala or kaleidoscope pattern",
];

const RETRO: &[&str] = &[
    "Create ASCII art of a retro computer terminal",
    "Draw ASCII art of an old-school arcade game screen",
    "Create ASCII art with 80s aesthetic",
    "Draw ASCII art of a vintage robot",
];

const SPACE: &[&str] = &[
    "Create ASCII art of a spaceship",
    "Draw ASCII art of planets and stars",
    "Create ASCII art of an astronaut",
    "Draw ASCII art of a galaxy or nebula",
];

const FANTASY: &[&str] = &[
    "Create ASCII art of a dragon",
    "Draw ASCII art of a castle",
    "Create ASCII art of a wizard or mage",
    "Draw ASCII art of a magical forest",
];

/// Returns the subject templates for `theme`, falling back to cyberpunk
pub fn templates_for(theme: &str) -> &'static [&'static str] {
    match theme {
        "cyberpunk" => CYBERPUNK,
        "nature" => NATURE,
        "abstract" => ABSTRACT,
        "retro" => RETRO,
        "space" => SPACE,
        "fantasy" => FANTASY,
        _ => CYBERPUNK,
    }
}

/// Builds a full prompt: a random subject for the theme plus style and size limits
pub fn generate_prompt<R: Rng + ?Sized>(
    theme: &str,
    style: &str,
    width: usize,
    height: usize,
    rng: &mut R,
) -> String {
    let base = templates_for(theme)
        .choose(rng)
        .copied()
        .unwrap_or(CYBERPUNK[0]);

    format!(
        "{}. Style: {}. Maximum width: {} characters. Maximum height: {} lines. \
         Use creative ASCII characters and ensure the art is visually interesting.",
        base, style, width, height
    )
}
