use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::padding::padded_words_of_length;
use crate::types::{RowId, Token, TokenSeq};

/// For each column prefix, the set of tokens that extend it in at least one column candidate.
/// Prefixes of every length from zero up to one less than the column height are recorded, so the
/// empty prefix maps to the tokens that can start a column.
#[derive(Debug, Clone, Default)]
pub struct NextTokenIndex {
    pub next_tokens_by_prefix: HashMap<TokenSeq, HashSet<Token>>,
}

impl NextTokenIndex {
    /// Tokens that may follow `prefix`, or `None` if the prefix has no continuation.
    #[must_use]
    pub fn next_tokens(&self, prefix: &[Token]) -> Option<&HashSet<Token>> {
        self.next_tokens_by_prefix
            .get(prefix)
            .filter(|tokens| !tokens.is_empty())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.next_tokens_by_prefix.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.next_tokens_by_prefix.is_empty()
    }
}

/// Build a `NextTokenIndex` from the full set of column candidates.
#[must_use]
pub fn build_next_token_index<C: AsRef<[Token]>>(columns: &[C]) -> NextTokenIndex {
    let mut index = NextTokenIndex::default();
    for column in columns {
        let column = column.as_ref();
        for split in 0..column.len() {
            index
                .next_tokens_by_prefix
                .entry(column[..split].iter().copied().collect())
                .or_default()
                .insert(column[split]);
        }
    }
    index
}

/// For each `(position, token)` pair, the ids of the row candidates carrying that token at that
/// position, in ascending id order.
#[derive(Debug, Clone, Default)]
pub struct PositionalIndex {
    pub rows_by_cell: HashMap<(usize, Token), Vec<RowId>>,
}

impl PositionalIndex {
    #[must_use]
    pub fn rows_with(&self, position: usize, token: Token) -> &[RowId] {
        self.rows_by_cell
            .get(&(position, token))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Build a `PositionalIndex` over `rows`, using each row's index in the slice as its id.
#[must_use]
pub fn build_positional_index<R: AsRef<[Token]>>(rows: &[R]) -> PositionalIndex {
    let mut index = PositionalIndex::default();
    for (row_id, row) in rows.iter().enumerate() {
        for (position, &token) in row.as_ref().iter().enumerate() {
            index
                .rows_by_cell
                .entry((position, token))
                .or_default()
                .push(row_id);
        }
    }
    index
}

/// The immutable lookup structures backing one search: the row candidate pool, the order in
/// which first rows are tried, and both pruning indexes.
pub struct CandidateIndexes {
    pub width: usize,
    pub height: usize,

    /// Every distinct row candidate, sorted by token sequence. A `RowId` is an index into this.
    pub rows: Vec<TokenSeq>,

    /// Row ids in generation order (word pool order, then padding order), used for the first row.
    pub seed_order: Vec<RowId>,

    /// The number of distinct column candidates the next-token index was built from.
    pub column_count: usize,

    pub next_tokens: NextTokenIndex,
    pub positions: PositionalIndex,
}

impl CandidateIndexes {
    /// Pad the word pool for both grid dimensions and index the results.
    #[must_use]
    pub fn build<W: AsRef<[Token]>>(words: &[W], width: usize, height: usize) -> CandidateIndexes {
        let generated: Vec<TokenSeq> = padded_words_of_length(words, width).collect();

        let mut rows = generated.clone();
        rows.sort_unstable();
        rows.dedup();

        let mut seen: HashSet<RowId> = HashSet::with_capacity(rows.len());
        let seed_order = generated
            .iter()
            .filter_map(|row| rows.binary_search(row).ok())
            .filter(|&row_id| seen.insert(row_id))
            .collect();

        let mut columns: Vec<TokenSeq> = padded_words_of_length(words, height).collect();
        columns.sort_unstable();
        columns.dedup();

        CandidateIndexes {
            width,
            height,
            next_tokens: build_next_token_index(&columns),
            positions: build_positional_index(&rows),
            column_count: columns.len(),
            seed_order,
            rows,
        }
    }

    #[must_use]
    pub fn row(&self, row_id: RowId) -> &TokenSeq {
        &self.rows[row_id]
    }
}

impl fmt::Debug for CandidateIndexes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateIndexes")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("rows", &self.rows.len())
            .field("column_count", &self.column_count)
            .field("prefixes", &self.next_tokens.len())
            .finish_non_exhaustive()
    }
}
