//! Error types.
//!
//! Only level setup and config loading can fail. Rejected moves, empty
//! inventories and blocked shots are ordinary no-ops, not errors.

use std::path::PathBuf;

use crate::sim::words::Language;

/// Failure reported by a word source. Always recoverable: the level falls
/// back to a built-in word.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WordSourceError {
    /// The service is not configured or could not be reached.
    #[error("word source unavailable: {0}")]
    Unavailable(String),

    /// The service answered with something that is not a usable word.
    #[error("word source returned an unusable word {0:?}")]
    InvalidWord(String),
}

/// Level setup failed; the game enters the `Error` phase.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    /// Neither the source nor the built-in list produced a usable word.
    #[error("no usable word for level {level} ({language:?})")]
    NoWord { level: u32, language: Language },

    /// The maze has fewer free cells than the word has letters.
    #[error("maze has {available} free cells, word needs {needed}")]
    TooFewCells { needed: usize, available: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} parse error: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
