#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod backtracking_search;
pub mod candidate_index;
pub mod padding;
pub mod search_log;
pub mod square_config;
pub mod types;
pub mod util;
pub mod word_list;

pub const CHECK_INVARIANTS: bool = cfg!(feature = "check_invariants");

/// Inline capacity of a token sequence. Longer grid sides are allowed and spill to the heap.
pub const MAX_SIDE_LENGTH: usize = 16;
