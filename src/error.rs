//! Structured error types for the Verso composer.
//!
//! Configuration problems are fatal and surface before anything is drawn.
//! An empty input is not an error (it yields an empty layout), and a missing
//! measurement only stops the column fill, so neither appears here as a
//! session failure.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, VersoError>;

/// The unified error type returned by all public Verso API functions.
#[derive(Debug, Error)]
pub enum VersoError {
    /// Geometry or typography that cannot produce a page.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON configuration failed to parse.
    #[error("Failed to parse configuration: {source}{}", hint_suffix(.hint))]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },

    /// A custom font could not be loaded or parsed.
    #[error("Font error: {0}")]
    Font(String),

    /// A drawing surface failed to serialize its output.
    #[error("Render error: {0}")]
    Render(String),

    /// Reading input or writing output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for VersoError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the page configuration. Field names are camelCase (canvasWidth, columnCount, ...).".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        VersoError::Parse { source: e, hint }
    }
}
