use smallvec::SmallVec;
use std::fmt;

use crate::MAX_SIDE_LENGTH;

/// The atomic unit of a grid cell: a two-character digraph taken from a word, or the blank
/// filler token.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(pub [char; 2]);

/// The filler token, rendered as two spaces. It sorts before every digraph made of printable
/// characters.
pub const BLANK_TOKEN: Token = Token([' ', ' ']);

impl Token {
    #[must_use]
    pub fn is_blank(self) -> bool {
        self == BLANK_TOKEN
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0[0], self.0[1])
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string())
    }
}

/// An ordered run of tokens: a tokenized word, a padded word, or a column prefix.
pub type TokenSeq = SmallVec<[Token; MAX_SIDE_LENGTH]>;

/// An identifier for a row candidate, based on its index in `CandidateIndexes::rows`. Row ids are
/// assigned in lexicographic token order, so sorting ids sorts the candidates.
pub type RowId = usize;
