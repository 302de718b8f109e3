//! Configuration for MOTD Artisan
//!
//! All settings are read once, at startup, from environment variables (optionally
//! populated from `.env` files) and handed to each component as a plain struct.

use std::path::PathBuf;

use directories::ProjectDirs;
use thiserror::Error;

/// Default number of artworks kept in the cache
pub const DEFAULT_CACHE_SIZE: usize = 10;

/// Default OpenAI-compatible API root
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric setting could not be parsed
    #[error("Invalid value for {key}: '{value}' is not a non-negative integer")]
    InvalidNumber { key: String, value: String },

    /// A setting that must be positive was zero
    #[error("Invalid value for {key}: must be at least 1")]
    Zero { key: String },
}

/// Settings for the on-disk art cache
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Directory holding art, metadata and the index
    pub dir: PathBuf,
    /// Maximum number of entries kept by `save`
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("cache"),
            capacity: DEFAULT_CACHE_SIZE,
        }
    }
}

/// Settings for terminal rendering
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Whether ANSI colors are emitted at all
    pub use_color: bool,
    /// Paint the whole art in one randomly chosen color instead of the theme
    pub random_color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            random_color: false,
        }
    }
}

/// Settings for the art fetcher
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub style: String,
    pub theme: String,
    /// Maximum characters per line
    pub width: usize,
    /// Maximum number of lines
    pub height: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: "gpt-4".to_string(),
            style: "retro computer terminal".to_string(),
            theme: "cyberpunk".to_string(),
            width: 80,
            height: 24,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub cache: CacheConfig,
    pub display: DisplayConfig,
    pub fetch: FetchConfig,
    /// Fetch new art when `show` finds the cache empty
    pub auto_fetch: bool,
}

impl Config {
    /// Reads the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup
    ///
    /// Missing keys fall back to their defaults. Boolean flags are true only when
    /// the value is `true` (case-insensitive).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = FetchConfig::default();
        let string_or = |key: &str, default: String| lookup(key).unwrap_or(default);
        let flag = |key: &str, default: bool| {
            lookup(key)
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(default)
        };
        let number = |key: &str, default: usize| -> Result<usize, ConfigError> {
            match lookup(key) {
                None => Ok(default),
                Some(value) => value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber {
                        key: key.to_string(),
                        value,
                    }),
            }
        };

        let cache = CacheConfig {
            dir: lookup("MOTD_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| CacheConfig::default().dir),
            capacity: match number("CACHE_SIZE", DEFAULT_CACHE_SIZE)? {
                0 => {
                    return Err(ConfigError::Zero {
                        key: "CACHE_SIZE".to_string(),
                    })
                }
                n => n,
            },
        };

        let display = DisplayConfig {
            use_color: flag("DISPLAY_COLOR", true),
            random_color: flag("RANDOM_COLOR", false),
        };

        let fetch = FetchConfig {
            api_key: lookup("OPENAI_API_KEY").filter(|k| !k.is_empty()),
            base_url: string_or("OPENAI_BASE_URL", defaults.base_url),
            model: string_or("OPENAI_MODEL", defaults.model),
            style: string_or("ASCII_STYLE", defaults.style),
            theme: string_or("THEME", defaults.theme),
            width: number("ASCII_WIDTH", defaults.width)?,
            height: number("ASCII_HEIGHT", defaults.height)?,
        };

        Ok(Self {
            cache,
            display,
            fetch,
            auto_fetch: flag("AUTO_FETCH", true),
        })
    }

    /// Theme used for prompt generation and color cycling
    pub fn theme(&self) -> &str {
        &self.fetch.theme
    }
}

/// Location of the per-user dotenv file (`~/.config/motd-artisan/config.env` on Linux)
pub fn user_env_file() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "motd-artisan")?;
    Some(project_dirs.config_dir().join("config.env"))
}

/// Loads `./.env` and then the per-user config file into the process environment.
///
/// Variables already set in the environment win over both files.
pub fn load_env_files() {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "loaded env file");
    }
    if let Some(path) = user_env_file() {
        if path.exists() {
            match dotenvy::from_path(&path) {
                Ok(()) => tracing::debug!(path = %path.display(), "loaded env file"),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to load env file"),
            }
        }
    }
}
