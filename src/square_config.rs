use std::fmt;

use crate::types::TokenSeq;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptySide { side: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptySide { side } => write!(f, "Grid {side} must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// The dimensions of the grid to search for, measured in tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareConfig {
    pub width: usize,
    pub height: usize,
}

impl SquareConfig {
    pub fn new(width: usize, height: usize) -> Result<SquareConfig, ConfigError> {
        for (side, length) in [("width", width), ("height", height)] {
            if length == 0 {
                return Err(ConfigError::EmptySide { side });
            }
        }

        Ok(SquareConfig { width, height })
    }

    /// The longest word, in tokens, that needs at least one blank in one of the two directions.
    /// Anything longer can never be placed.
    #[must_use]
    pub fn max_word_tokens(&self) -> usize {
        self.width.max(self.height) - 1
    }
}

/// A completed grid: `height` rows, each a padded word of `width` tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub rows: Vec<TokenSeq>,
}

/// Turn a solution into one line per row, with blank tokens rendered as two spaces.
#[must_use]
pub fn render_grid(solution: &Solution) -> String {
    solution
        .rows
        .iter()
        .map(|row| row.iter().map(ToString::to_string).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
