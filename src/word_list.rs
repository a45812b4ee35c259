use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;
use std::ffi::OsString;
use std::fmt::Debug;
use std::{fmt, fs};
use unicode_normalization::UnicodeNormalization;

use crate::types::{Token, TokenSeq};
use crate::util::tokenize;

/// A struct representing a word in the pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// The word as it is placed in a grid: lowercase, NFC-normalized, trimmed.
    pub normalized_string: String,

    /// The word as it appears in the user's word list.
    pub canonical_string: String,

    /// `normalized_string` split into two-character tokens.
    pub tokens: TokenSeq,
}

impl AsRef<[Token]> for Word {
    fn as_ref(&self) -> &[Token] {
        &self.tokens
    }
}

/// Given a canonical word string from a dictionary file, turn it into the normalized form we'll
/// use in the search. Only surrounding whitespace is removed.
#[must_use]
pub fn normalize_word(canonical: &str) -> String {
    canonical
        .trim()
        .to_lowercase()
        .nfc() // Normalize Unicode combining forms
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordListError {
    InvalidPath(String),
}

impl fmt::Display for WordListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordListError::InvalidPath(path) => write!(f, "Can’t read file: “{path}”"),
        }
    }
}

impl std::error::Error for WordListError {}

/// Configuration describing a source of word list entries, one word per line.
pub enum WordListSourceConfig {
    Memory { words: Vec<String> },
    File { path: OsString },
    FileContents { contents: &'static str },
}

fn load_words_from_source(
    source: &WordListSourceConfig,
    errors: &mut Vec<WordListError>,
) -> Vec<String> {
    match source {
        WordListSourceConfig::Memory { words } => words.clone(),

        WordListSourceConfig::File { path } => {
            if let Ok(contents) = fs::read_to_string(path) {
                contents.lines().map(String::from).collect()
            } else {
                errors.push(WordListError::InvalidPath(path.to_string_lossy().into()));
                vec![]
            }
        }

        WordListSourceConfig::FileContents { contents } => {
            contents.lines().map(String::from).collect()
        }
    }
}

/// The admissible word pool: every distinct word from the sources that has an even, non-zero
/// number of characters and no more than `max_tokens` tokens. Words are kept in token order
/// unless shuffled.
#[derive(Clone)]
pub struct WordList {
    pub words: Vec<Word>,

    /// The longest word allowed, in tokens.
    pub max_tokens: usize,

    /// Number of non-empty entries left out for having an odd length, too many tokens, or
    /// whitespace inside the word.
    pub skipped: usize,

    pub errors: Vec<WordListError>,
}

impl WordList {
    /// Construct a new `WordList` from the given sources. Earlier sources take precedence when the
    /// same normalized word appears more than once.
    #[must_use]
    pub fn new(source_configs: &[WordListSourceConfig], max_tokens: usize) -> WordList {
        let mut errors = vec![];
        let mut seen_words: HashSet<String> = HashSet::new();
        let mut skipped = 0;
        let mut words = vec![];

        for source in source_configs {
            for canonical in load_words_from_source(source, &mut errors) {
                let normalized = normalize_word(&canonical);
                let length = normalized.chars().count();
                if length == 0 {
                    continue;
                }
                // Interior whitespace could form a token indistinguishable from a blank cell.
                if length % 2 != 0
                    || length > 2 * max_tokens
                    || normalized.chars().any(char::is_whitespace)
                {
                    skipped += 1;
                    continue;
                }
                if !seen_words.insert(normalized.clone()) {
                    continue;
                }

                words.push(Word {
                    tokens: tokenize(&normalized),
                    canonical_string: canonical.trim().to_string(),
                    normalized_string: normalized,
                });
            }
        }

        words.sort_by(|a, b| a.tokens.cmp(&b.tokens));

        WordList {
            words,
            max_tokens,
            skipped,
            errors,
        }
    }

    /// Reorder the pool pseudo-randomly. The same seed always gives the same order.
    pub fn shuffle(&mut self, seed: u64) {
        let mut rng = SmallRng::seed_from_u64(seed);
        self.words.shuffle(&mut rng);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn get_source_errors(&self) -> &[WordListError] {
        &self.errors
    }
}

impl Debug for WordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordList")
            .field("words", &self.words.len())
            .field("max_tokens", &self.max_tokens)
            .field("skipped", &self.skipped)
            .finish_non_exhaustive()
    }
}
