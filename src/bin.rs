use clap::Parser;
use staggered_squares::backtracking_search::{find_word_square, SearchOutcome};
use staggered_squares::search_log::{NoopLog, SearchLog, TracingLog};
use staggered_squares::square_config::{render_grid, SquareConfig};
use staggered_squares::word_list::{WordList, WordListSourceConfig};
use std::fmt::{Debug, Formatter};
use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

/// staggered-squares: find a grid of two-letter tokens whose rows and columns all spell distinct
/// words, with blank cells allowed inside them
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a word list with one word per line
    #[arg(long, default_value = "/usr/share/dict/words")]
    words_file: String,

    /// Grid width, in two-letter tokens
    #[arg(long, default_value_t = 3)]
    width: usize,

    /// Grid height, in two-letter tokens
    #[arg(long, default_value_t = 3)]
    height: usize,

    /// Report progress while searching
    #[arg(long)]
    verbose: bool,

    /// Print search statistics when done
    #[arg(long)]
    profile: bool,

    /// Shuffle the word list before searching
    #[arg(long)]
    randomise: bool,

    /// Seed for --randomise [default: derived from the current time]
    #[arg(long, requires = "randomise")]
    seed: Option<u64>,
}

struct Error(String);

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0) // Print error unquoted
    }
}

fn main() -> Result<(), Error> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SquareConfig::new(args.width, args.height).map_err(|e| Error(e.to_string()))?;
    tracing::debug!(width = config.width, height = config.height, "Searching");

    let mut word_list = WordList::new(
        &[WordListSourceConfig::File {
            path: args.words_file.clone().into(),
        }],
        config.max_word_tokens(),
    );

    if let Some(error) = word_list.get_source_errors().first() {
        return Err(Error(error.to_string()));
    }

    tracing::debug!(
        words = word_list.len(),
        skipped = word_list.skipped,
        "Total words selected from file"
    );

    if args.randomise {
        let seed = args.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |elapsed| elapsed.as_secs())
        });
        tracing::debug!(seed, "Shuffling word list");
        word_list.shuffle(seed);
    }

    let log: &dyn SearchLog = if args.verbose { &TracingLog } else { &NoopLog };
    let outcome = find_word_square(&word_list.words, &config, log);

    report(&outcome, args.profile, &mut std::io::stdout().lock())
        .map_err(|e| Error(format!("Couldn't write output: {e}")))
}

/// Write the grid, and nothing else, to `out`. Statistics go to stderr through the subscriber.
fn report(outcome: &SearchOutcome, profile: bool, out: &mut impl Write) -> io::Result<()> {
    match &outcome.solution {
        Some(solution) => writeln!(out, "{}", render_grid(solution))?,
        None => tracing::info!("No word square found"),
    }

    if profile {
        tracing::info!(statistics = ?outcome.statistics, "Search finished");
    }

    Ok(())
}
