//! Generation of every way a word can be stretched to a target length by interleaving blank
//! tokens among its own tokens.

use crate::types::{Token, TokenSeq, BLANK_TOKEN};

/// A lazy iterator over the ways of placing `space_count` copies of a filler token among the
/// tokens of a word. Each result corresponds to one size-`space_count` subset of positions in
/// `0..word.len() + space_count`, visited in lexicographic order of the subsets, so identical
/// blanks never produce duplicate arrangements.
#[derive(Debug, Clone)]
pub struct SpacedOut<'a> {
    word: &'a [Token],
    space: Token,

    /// The current subset of blank positions, strictly increasing. `None` once exhausted.
    positions: Option<Vec<usize>>,
}

impl<'a> SpacedOut<'a> {
    #[must_use]
    pub fn new(word: &'a [Token], space: Token, space_count: usize) -> SpacedOut<'a> {
        SpacedOut {
            word,
            space,
            positions: Some((0..space_count).collect()),
        }
    }

    fn build(&self, positions: &[usize]) -> TokenSeq {
        let mut word_iter = self.word.iter();
        let mut blanks = positions.iter().peekable();
        (0..self.word.len() + positions.len())
            .map(|idx| {
                if blanks.peek() == Some(&&idx) {
                    blanks.next();
                    self.space
                } else {
                    // There are exactly `word.len()` non-blank slots.
                    *word_iter.next().unwrap_or(&self.space)
                }
            })
            .collect()
    }
}

impl Iterator for SpacedOut<'_> {
    type Item = TokenSeq;

    fn next(&mut self) -> Option<TokenSeq> {
        let positions = self.positions.as_mut()?;
        let space_count = positions.len();
        let total_length = self.word.len() + space_count;
        let current = positions.clone();

        // Advance to the next combination: find the rightmost position that can still move right,
        // bump it, and reset everything after it to consecutive values.
        match (0..space_count)
            .rev()
            .find(|&idx| positions[idx] != idx + total_length - space_count)
        {
            Some(idx) => {
                positions[idx] += 1;
                for later in idx + 1..space_count {
                    positions[later] = positions[later - 1] + 1;
                }
            }
            None => self.positions = None,
        }

        Some(self.build(&current))
    }
}

/// Every arrangement of `word`'s tokens with `space_count` copies of `space` interleaved.
#[must_use]
pub fn pad(word: &[Token], space: Token, space_count: usize) -> SpacedOut<'_> {
    SpacedOut::new(word, space, space_count)
}

/// Is a word of `token_count` tokens admitted as a candidate for a slot of `length` tokens? It
/// needs at least one blank, and no more blanks than half the slot.
#[must_use]
pub fn admits_padding(token_count: usize, length: usize) -> bool {
    length
        .checked_sub(token_count)
        .is_some_and(|space_count| (1..=length / 2).contains(&space_count))
}

/// Lazily pad each word that fits a slot of `length` tokens, in word order and then padding
/// order. Words needing no blanks or too many blanks contribute nothing.
pub fn padded_words_of_length<'a, W: AsRef<[Token]>>(
    words: &'a [W],
    length: usize,
) -> impl Iterator<Item = TokenSeq> + 'a {
    words
        .iter()
        .map(|word| word.as_ref())
        .filter(move |word| admits_padding(word.len(), length))
        .flat_map(move |word| pad(word, BLANK_TOKEN, length - word.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::{despace, tokenize};

    fn render(tokens: &[Token]) -> String {
        tokens.iter().map(ToString::to_string).collect()
    }

    fn binomial(n: usize, k: usize) -> usize {
        (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
    }

    #[test]
    fn test_pad_lists_every_position_subset_in_order() {
        let word = tokenize("test");
        let padded: Vec<String> = pad(&word, BLANK_TOKEN, 1).map(|w| render(&w)).collect();
        assert_eq!(padded, vec!["  test", "te  st", "test  "]);

        let padded: Vec<String> = pad(&word, BLANK_TOKEN, 2).map(|w| render(&w)).collect();
        assert_eq!(
            padded,
            vec![
                "    test", "  te  st", "  test  ", "te    st", "te  st  ", "test    ",
            ]
        );
    }

    #[test]
    fn test_pad_counts_and_preserves_order() {
        let word = tokenize("abcdefgh");
        for space_count in 1..=4 {
            let padded: Vec<TokenSeq> = pad(&word, BLANK_TOKEN, space_count).collect();
            assert_eq!(padded.len(), binomial(word.len() + space_count, space_count));

            let mut distinct = padded.clone();
            distinct.sort();
            distinct.dedup();
            assert_eq!(distinct.len(), padded.len());

            for candidate in &padded {
                assert_eq!(candidate.len(), word.len() + space_count);
                assert_eq!(despace(candidate), word);
            }
        }
    }

    #[test]
    fn test_pad_with_no_spaces_yields_word_once() {
        let word = tokenize("test");
        let padded: Vec<TokenSeq> = pad(&word, BLANK_TOKEN, 0).collect();
        assert_eq!(padded, vec![word]);
    }

    #[test]
    fn test_pad_is_restartable() {
        let word = tokenize("test");
        let spaced = pad(&word, BLANK_TOKEN, 1);
        let first: Vec<TokenSeq> = spaced.clone().collect();
        let second: Vec<TokenSeq> = spaced.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_admits_padding() {
        assert!(admits_padding(2, 3));
        assert!(!admits_padding(3, 3));
        assert!(!admits_padding(1, 3));
        assert!(!admits_padding(4, 3));
        assert!(admits_padding(2, 4));
        assert!(admits_padding(3, 4));
        assert!(!admits_padding(1, 1));
    }

    #[test]
    fn test_padded_words_of_length() {
        let words = vec![tokenize("test"), tokenize("hi"), tokenize("longer")];
        let padded: Vec<String> = padded_words_of_length(&words, 3)
            .map(|w| render(&w))
            .collect();
        assert_eq!(padded, vec!["  test", "te  st", "test  "]);
    }

    #[test]
    fn test_padded_words_of_length_skips_exact_fits() {
        let words = vec![tokenize("pastry")];
        assert_eq!(padded_words_of_length(&words, 3).count(), 0);
        assert_eq!(padded_words_of_length(&words, 4).count(), 4);
    }
}
