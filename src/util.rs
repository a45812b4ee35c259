use crate::types::{Token, TokenSeq};

/// Split a word into two-character tokens taken from the front. The word must have an even
/// number of characters; any trailing odd character is dropped, and the word list never passes
/// such words in.
#[must_use]
pub fn tokenize(word: &str) -> TokenSeq {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks_exact(2)
        .map(|pair| Token([pair[0], pair[1]]))
        .collect()
}

/// Remove blank tokens, leaving the word a padded sequence was built from.
#[must_use]
pub fn despace(tokens: &[Token]) -> TokenSeq {
    tokens.iter().copied().filter(|token| !token.is_blank()).collect()
}

/// The tokens of each column of a (possibly partial) grid, top to bottom.
pub fn column_words<'a, R: AsRef<[Token]>>(
    rows: &'a [R],
    width: usize,
) -> impl Iterator<Item = TokenSeq> + 'a {
    (0..width).map(move |col| rows.iter().map(|row| row.as_ref()[col]).collect())
}

/// Every row word followed by every column word, with blanks removed.
pub fn extract_words<'a, R: AsRef<[Token]>>(
    rows: &'a [R],
    width: usize,
) -> impl Iterator<Item = TokenSeq> + 'a {
    rows.iter()
        .map(|row| despace(row.as_ref()))
        .chain(column_words(rows, width).map(|col| despace(&col)))
}

/// Does the same word appear more than once across the rows and columns of the grid?
#[must_use]
pub fn has_duplicate_words<R: AsRef<[Token]>>(rows: &[R], width: usize) -> bool {
    let mut words: Vec<TokenSeq> = extract_words(rows, width).collect();
    let total = words.len();
    words.sort_unstable();
    words.dedup();
    words.len() != total
}
