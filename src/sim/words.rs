//! Word supply for levels.
//!
//! The real word generator is an outside service, reached through the
//! `WordSource` trait. Whatever it returns is validated here; on any failure
//! the level falls back to a random entry from the built-in list for the
//! language, so level setup never waits on a broken service.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::error::{SetupError, WordSourceError};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Pt,
}

/// A target word and its clue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub hint: String,
}

impl WordEntry {
    pub fn new(word: &str, hint: &str) -> Self {
        WordEntry { word: word.to_string(), hint: hint.to_string() }
    }
}

/// Outside collaborator that picks the word for a level.
pub trait WordSource {
    /// `length` is the preferred word length for `level`; sources may ignore it.
    fn fetch(&mut self, level: u32, language: Language, length: usize) -> Result<WordEntry, WordSourceError>;
}

/// A source that is never reachable. Every level uses the built-in words.
#[derive(Clone, Copy, Debug, Default)]
pub struct Offline;

impl WordSource for Offline {
    fn fetch(&mut self, _level: u32, _language: Language, _length: usize) -> Result<WordEntry, WordSourceError> {
        Err(WordSourceError::Unavailable("no word service configured".into()))
    }
}

// ── Built-in words ──

const FALLBACK_EN: &[(&str, &str)] = &[
    ("CODE", "Instructions for a computer"),
    ("REACT", "A JavaScript library for UIs"),
    ("MAZE", "A complex network of paths"),
    ("LOGIC", "Reasoning conducted via validation"),
    ("PIXEL", "Tiny dot on a screen"),
    ("ALGO", "Short for algorithm"),
    ("DATA", "Facts and statistics"),
    ("NODE", "A point in a network"),
    ("LOOP", "Repeating sequence"),
    ("STACK", "LIFO data structure"),
];

const FALLBACK_PT: &[(&str, &str)] = &[
    ("CODIGO", "Instruções para um computador"),
    ("REACT", "Uma biblioteca JavaScript para UIs"),
    ("LABIRINTO", "Uma rede complexa de caminhos"),
    ("LOGICA", "Raciocínio conduzido via validação"),
    ("PIXEL", "Ponto minúsculo em uma tela"),
    ("DADOS", "Fatos e estatísticas"),
    ("REDE", "Conexão de computadores"),
    ("LOOP", "Sequência de repetição"),
    ("PILHA", "Estrutura de dados LIFO"),
    ("NUVEM", "Computação remota"),
];

pub fn fallback_words(language: Language) -> &'static [(&'static str, &'static str)] {
    match language {
        Language::En => FALLBACK_EN,
        Language::Pt => FALLBACK_PT,
    }
}

/// Upper-case the word and reject anything that is not a run of letters.
pub fn validate(entry: WordEntry) -> Result<WordEntry, WordSourceError> {
    let word = entry.word.trim().to_uppercase();
    if word.is_empty() || !word.chars().all(char::is_alphabetic) {
        return Err(WordSourceError::InvalidWord(entry.word));
    }
    Ok(WordEntry { word, hint: entry.hint.trim().to_string() })
}

/// Ask the source for a word; fall back to the built-in list on any failure.
pub fn resolve_word<R: Rng + ?Sized>(
    source: &mut dyn WordSource,
    level: u32,
    language: Language,
    length: usize,
    rng: &mut R,
) -> Result<WordEntry, SetupError> {
    match source.fetch(level, language, length).and_then(validate) {
        Ok(entry) => Ok(entry),
        Err(e) => {
            tracing::warn!(level, ?language, "{e}; using a built-in word");
            let &(word, hint) = fallback_words(language)
                .choose(rng)
                .ok_or(SetupError::NoWord { level, language })?;
            validate(WordEntry::new(word, hint)).map_err(|_| SetupError::NoWord { level, language })
        }
    }
}
