//! This module implements the staggered word square search: a depth-first backtracking search that
//! places one row at a time. Before each placement, the next-token index and the positional index
//! are combined to find exactly the row candidates that keep every column extendable, so dead
//! branches are never entered. Complete grids are checked for repeated words before being emitted.

use std::time::{Duration, Instant};

use crate::candidate_index::CandidateIndexes;
use crate::search_log::SearchLog;
use crate::square_config::{Solution, SquareConfig};
use crate::types::{RowId, Token, TokenSeq};
use crate::util::has_duplicate_words;
use crate::CHECK_INVARIANTS;

/// A struct tracking stats about the search process.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub row_candidates: usize,
    pub column_candidates: usize,

    /// Number of rows placed, including ones that were later backtracked.
    pub states: usize,
    pub backtracks: usize,

    /// Complete grids rejected because a word appeared in them twice.
    pub duplicate_rejections: usize,
    pub solutions: usize,

    pub index_time: Duration,
    pub search_time: Duration,
}

/// Find the row candidates that can be appended to the partial grid `rows` without leaving any
/// column with a prefix that no column candidate starts with. The result is sorted by `RowId`,
/// which is lexicographic token order.
#[must_use]
pub fn possible_next_rows(indexes: &CandidateIndexes, rows: &[RowId]) -> Vec<RowId> {
    let mut possible: Option<Vec<RowId>> = None;
    let mut prefix = TokenSeq::new();

    for col in 0..indexes.width {
        prefix.clear();
        prefix.extend(rows.iter().map(|&row_id| indexes.row(row_id)[col]));

        let Some(next_tokens) = indexes.next_tokens.next_tokens(&prefix) else {
            return vec![];
        };

        // A row holds one token per position, so the per-token lists are disjoint.
        let mut column_rows: Vec<RowId> = next_tokens
            .iter()
            .flat_map(|&token| indexes.positions.rows_with(col, token).iter().copied())
            .collect();
        column_rows.sort_unstable();

        let narrowed = match possible {
            None => column_rows,
            Some(mut so_far) => {
                so_far.retain(|row_id| column_rows.binary_search(row_id).is_ok());
                so_far
            }
        };

        if narrowed.is_empty() {
            return vec![];
        }
        possible = Some(narrowed);
    }

    possible.unwrap_or_default()
}

/// Check that every row of `rows` only extends each column in a way some column candidate
/// allows.
#[must_use]
pub fn columns_are_extendable(indexes: &CandidateIndexes, rows: &[RowId]) -> bool {
    (0..indexes.width).all(|col| {
        let column: TokenSeq = rows.iter().map(|&row_id| indexes.row(row_id)[col]).collect();
        (0..column.len()).all(|depth| {
            indexes
                .next_tokens
                .next_tokens(&column[..depth])
                .is_some_and(|tokens| tokens.contains(&column[depth]))
        })
    })
}

/// The candidates available at one depth of the search, and how many have been tried.
#[derive(Debug)]
struct Frame {
    options: Vec<RowId>,
    next_option: usize,
}

/// A lazy iterator over every solution, in search order. The first row is tried in the order
/// the word pool generated it; every later row is tried in lexicographic order. Dropping the
/// iterator abandons the search.
pub struct Solutions<'a> {
    indexes: &'a CandidateIndexes,
    log: &'a dyn SearchLog,
    statistics: Statistics,

    /// `frames[d]` holds the options for row `d`. Rows are only ever placed below the current
    /// depth after truncating `rows`, so sibling branches never see each other's rows.
    frames: Vec<Frame>,
    rows: Vec<RowId>,
    started: bool,
}

impl<'a> Solutions<'a> {
    #[must_use]
    pub fn new(indexes: &'a CandidateIndexes, log: &'a dyn SearchLog) -> Solutions<'a> {
        Solutions {
            indexes,
            log,
            statistics: Statistics {
                row_candidates: indexes.rows.len(),
                column_candidates: indexes.column_count,
                ..Statistics::default()
            },
            frames: Vec::with_capacity(indexes.height),
            rows: Vec::with_capacity(indexes.height),
            started: false,
        }
    }

    #[must_use]
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    fn seed_frame(&self) -> Frame {
        let possible = possible_next_rows(self.indexes, &[]);
        Frame {
            options: self
                .indexes
                .seed_order
                .iter()
                .copied()
                .filter(|row_id| possible.binary_search(row_id).is_ok())
                .collect(),
            next_option: 0,
        }
    }

    fn current_grid(&self) -> Vec<&'a TokenSeq> {
        let indexes = self.indexes;
        self.rows.iter().map(|&row_id| indexes.row(row_id)).collect()
    }

    fn advance(&mut self) -> Option<Solution> {
        if !self.started {
            self.started = true;
            let seed_frame = self.seed_frame();
            self.frames.push(seed_frame);
        }

        loop {
            let depth = self.frames.len().checked_sub(1)?;
            let frame = &mut self.frames[depth];

            let Some(&row_id) = frame.options.get(frame.next_option) else {
                self.frames.pop();
                if depth > 0 {
                    self.statistics.backtracks += 1;
                }
                continue;
            };
            frame.next_option += 1;

            self.rows.truncate(depth);
            self.rows.push(row_id);
            self.statistics.states += 1;

            if CHECK_INVARIANTS && !columns_are_extendable(self.indexes, &self.rows) {
                panic!("Placed a row that breaks a column: {:?}", self.current_grid());
            }

            // A full grid is never extended further, whether or not it is accepted.
            if self.rows.len() == self.indexes.height {
                let grid = self.current_grid();
                if has_duplicate_words(&grid, self.indexes.width) {
                    self.statistics.duplicate_rejections += 1;
                    self.log
                        .log(format_args!("Skipping as has duplicate words: {grid:?}"));
                    continue;
                }

                self.statistics.solutions += 1;
                self.log.log(format_args!(
                    "Found solution after {} states",
                    self.statistics.states
                ));
                return Some(Solution {
                    rows: grid.into_iter().cloned().collect(),
                });
            }

            let options = possible_next_rows(self.indexes, &self.rows);
            if !options.is_empty() {
                self.frames.push(Frame {
                    options,
                    next_option: 0,
                });
            }
        }
    }
}

impl Iterator for Solutions<'_> {
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        let start = Instant::now();
        let result = self.advance();
        self.statistics.search_time += start.elapsed();
        result
    }
}

/// The result of a search: the first solution, if there is one, and how the search went.
#[derive(Debug)]
pub struct SearchOutcome {
    pub solution: Option<Solution>,
    pub statistics: Statistics,
}

/// Search for the first staggered word square made from `words`, taken in the given order.
pub fn find_word_square<W: AsRef<[Token]>>(
    words: &[W],
    config: &SquareConfig,
    log: &dyn SearchLog,
) -> SearchOutcome {
    let start = Instant::now();
    let indexes = CandidateIndexes::build(words, config.width, config.height);
    let index_time = start.elapsed();

    log.log(format_args!(
        "Considering {} word + space combinations for rows",
        indexes.rows.len()
    ));
    log.log(format_args!(
        "Considering {} word + space combinations for columns",
        indexes.column_count
    ));

    let mut solutions = Solutions::new(&indexes, log);
    let solution = solutions.next();

    let mut statistics = solutions.statistics().clone();
    statistics.index_time = index_time;

    SearchOutcome {
        solution,
        statistics,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::fmt;

    use crate::backtracking_search::*;
    use crate::search_log::NoopLog;
    use crate::square_config::render_grid;
    use crate::util::{column_words, despace, tokenize};

    fn pool(words: &[&str]) -> Vec<TokenSeq> {
        words.iter().map(|word| tokenize(word)).collect()
    }

    fn render_row(row: &[Token]) -> String {
        row.iter().map(ToString::to_string).collect()
    }

    fn render_rows(indexes: &CandidateIndexes, row_ids: &[RowId]) -> Vec<String> {
        row_ids
            .iter()
            .map(|&row_id| render_row(indexes.row(row_id)))
            .collect()
    }

    fn row_id(indexes: &CandidateIndexes, rendered: &str) -> RowId {
        (0..indexes.rows.len())
            .find(|&row_id| render_row(indexes.row(row_id)) == rendered)
            .expect("row should be a candidate")
    }

    fn first_solution(words: &[&str], width: usize, height: usize) -> Option<String> {
        let config = SquareConfig::new(width, height).unwrap();
        find_word_square(&pool(words), &config, &NoopLog)
            .solution
            .map(|solution| render_grid(&solution))
    }

    const SCENARIO_1: [&str; 6] = ["past", "near", "edge", "need", "page", "star"];
    const SCENARIO_2: [&str; 7] = ["with", "here", "deal", "that", "wide", "health", "threat"];

    #[test]
    fn test_find_3x3_square() {
        assert_eq!(
            first_solution(&SCENARIO_1, 3, 3).as_deref(),
            Some("  past\nne  ar\nedge  ")
        );
    }

    #[test]
    fn test_find_3x4_square() {
        assert_eq!(
            first_solution(&SCENARIO_2, 3, 4).as_deref(),
            Some("wi  th\n  here\ndeal  \n  that")
        );
    }

    #[test]
    fn test_pool_order_decides_first_row() {
        let mut words = SCENARIO_1.to_vec();
        words.sort_unstable();
        assert_eq!(
            first_solution(&words, 3, 3).as_deref(),
            Some("  need\npa  ge\nstar  ")
        );
    }

    #[test]
    fn test_search_is_deterministic() {
        let first = first_solution(&SCENARIO_1, 3, 3);
        let second = first_solution(&SCENARIO_1, 3, 3);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_pool_has_no_solution() {
        let config = SquareConfig::new(3, 3).unwrap();
        let outcome = find_word_square::<TokenSeq>(&[], &config, &NoopLog);
        assert!(outcome.solution.is_none());
        assert_eq!(outcome.statistics.row_candidates, 0);
        assert_eq!(outcome.statistics.states, 0);
    }

    #[test]
    fn test_pool_without_paddable_words_has_no_solution() {
        assert_eq!(first_solution(&["pastry", "nearby", "ab"], 3, 3), None);
        assert_eq!(first_solution(&SCENARIO_1, 1, 1), None);
        assert_eq!(first_solution(&SCENARIO_1, 2, 2), None);
    }

    #[test]
    fn test_single_row_grid_has_no_solution() {
        // With height 1 no column can take a blank (that needs 1 <= k <= 0), so there are no
        // column candidates and even the first row is pruned. Rows of width 3 still exist.
        let config = SquareConfig::new(3, 1).unwrap();
        let outcome = find_word_square(&pool(&["past"]), &config, &NoopLog);

        assert!(outcome.solution.is_none());
        assert_eq!(outcome.statistics.row_candidates, 3);
        assert_eq!(outcome.statistics.column_candidates, 0);
        assert_eq!(outcome.statistics.states, 0);
    }

    #[test]
    fn test_wide_grid_beyond_inline_capacity_runs_to_no_solution() {
        let config = SquareConfig::new(17, 3).unwrap();
        let outcome = find_word_square(&pool(&["abcdefghijklmnopqr", "past"]), &config, &NoopLog);

        assert!(outcome.solution.is_none());
        assert_eq!(outcome.statistics.row_candidates, 24310);
        assert_eq!(outcome.statistics.column_candidates, 3);
    }

    #[test]
    fn test_possible_next_rows() {
        let indexes = CandidateIndexes::build(&pool(&SCENARIO_1), 3, 3);

        assert_eq!(
            render_rows(&indexes, &possible_next_rows(&indexes, &[])),
            vec!["  need", "  past", "ne  ed", "need  ", "pa  st", "past  "]
        );

        let first = row_id(&indexes, "  past");
        assert_eq!(
            render_rows(&indexes, &possible_next_rows(&indexes, &[first])),
            vec!["edge  ", "ne  ar", "page  ", "past  ", "st  ar"]
        );

        let second = row_id(&indexes, "ne  ar");
        assert_eq!(
            render_rows(&indexes, &possible_next_rows(&indexes, &[first, second])),
            vec!["edge  "]
        );

        let dead_end = row_id(&indexes, "star  ");
        assert!(possible_next_rows(&indexes, &[dead_end]).is_empty());
    }

    #[test]
    fn test_every_solution_is_valid_and_duplicate_free() {
        let words = pool(&SCENARIO_1);
        let indexes = CandidateIndexes::build(&words, 3, 3);
        let mut solutions = Solutions::new(&indexes, &NoopLog);

        let found: Vec<Solution> = solutions.by_ref().collect();
        assert_eq!(found.len(), 2);
        assert_eq!(render_grid(&found[1]), "  need\npa  ge\nstar  ");

        for solution in &found {
            assert_eq!(solution.rows.len(), 3);
            assert!(!has_duplicate_words(&solution.rows, 3));

            let mut placed: Vec<TokenSeq> = solution.rows.iter().map(|row| despace(row)).collect();
            placed.extend(column_words(&solution.rows, 3).map(|col| despace(&col)));
            for word in placed {
                assert!(words.contains(&word), "{word:?} is not in the pool");
            }
        }

        let statistics = solutions.statistics();
        assert_eq!(statistics.solutions, 2);
        assert_eq!(statistics.duplicate_rejections, 8);
        assert_eq!(statistics.row_candidates, 18);
        assert_eq!(statistics.column_candidates, 18);
    }

    #[test]
    fn test_grids_with_repeated_words_are_rejected() {
        let messages = RefCell::new(Vec::<String>::new());
        let log = |message: fmt::Arguments<'_>| messages.borrow_mut().push(message.to_string());

        let indexes = CandidateIndexes::build(&pool(&["toto", "otto"]), 3, 3);
        let mut solutions = Solutions::new(&indexes, &log);

        assert!(solutions.next().is_none());
        assert_eq!(solutions.statistics().duplicate_rejections, 18);
        assert_eq!(
            messages
                .borrow()
                .iter()
                .filter(|message| message.starts_with("Skipping as has duplicate words"))
                .count(),
            18
        );
    }

    #[test]
    fn test_search_stops_at_full_height() {
        // A complete grid is final: no frame is opened for a row beyond `height`, even though the
        // search keeps going on later calls.
        let indexes = CandidateIndexes::build(&pool(&SCENARIO_1), 3, 3);
        let mut solutions = Solutions::new(&indexes, &NoopLog);

        let first = solutions.next().expect("Failed to find a solution");
        assert_eq!(first.rows.len(), 3);
        assert_eq!(solutions.frames.len(), 3);
        assert_eq!(solutions.rows.len(), 3);
        assert!(columns_are_extendable(&indexes, &solutions.rows));
    }

    #[test]
    fn test_search_can_be_abandoned_and_resumed() {
        let indexes = CandidateIndexes::build(&pool(&SCENARIO_1), 3, 3);

        let all: Vec<Solution> = Solutions::new(&indexes, &NoopLog).collect();
        let mut solutions = Solutions::new(&indexes, &NoopLog);
        assert_eq!(solutions.next().as_ref(), all.first());
        assert_eq!(solutions.next().as_ref(), all.get(1));
        assert!(solutions.next().is_none());
        assert!(solutions.next().is_none());
    }

    #[test]
    fn test_find_word_square_logs_pool_sizes() {
        let messages = RefCell::new(Vec::<String>::new());
        let log = |message: fmt::Arguments<'_>| messages.borrow_mut().push(message.to_string());

        let config = SquareConfig::new(3, 4).unwrap();
        let outcome = find_word_square(&pool(&SCENARIO_2), &config, &log);

        assert!(outcome.solution.is_some());
        assert_eq!(outcome.statistics.solutions, 1);
        assert_eq!(outcome.statistics.row_candidates, 15);
        assert_eq!(outcome.statistics.column_candidates, 38);

        let messages = messages.into_inner();
        assert_eq!(
            messages[0],
            "Considering 15 word + space combinations for rows"
        );
        assert_eq!(
            messages[1],
            "Considering 38 word + space combinations for columns"
        );
        assert!(messages[2].starts_with("Found solution after"));
    }
}
