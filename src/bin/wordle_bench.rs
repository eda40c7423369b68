/*
 * MIT License
 *
 * Copyright (c) 2022 Joseph Sacchini
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use clap::error::ErrorKind;
use clap::{ArgEnum, CommandFactory, Parser};
use std::error::Error;
use std::path::PathBuf;
use std::process;
use wordle_bench::wordle::*;
use wordle_bench::GIT_VERSION;

#[derive(ArgEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum PoolArg {
    Dictionary,
    Candidates,
}

/// Plays simulated wordle games with a greedy "fewest survivors" strategy and reports how many
/// guesses they took.
#[derive(Parser, Debug)]
#[clap(name = "wordle-bench", author, version, about, long_about = None)]
struct Options {
    /// word list, one five letter word per line
    #[clap(short, long, default_value = DEFAULT_DICTIONARY_FILE_NAME)]
    dictionary: PathBuf,

    /// file holding the precomputed opening guess (created when missing)
    #[clap(short, long, default_value = DEFAULT_CACHE_FILE_NAME)]
    cache: PathBuf,

    /// always compute the opening guess, never read or write the cache file
    #[clap(long)]
    no_cache: bool,

    /// play this many random targets instead of the whole dictionary
    #[clap(short = 'n', long)]
    sample: Option<usize>,

    /// seed for --sample
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// easy mode: repeated letters are all marked when the answer has the letter at all
    #[clap(short, long)]
    easy: bool,

    /// which words may be guessed after the opening guess
    #[clap(short, long, arg_enum, default_value = "dictionary")]
    pool: PoolArg,

    /// with --pool candidates, allow any dictionary word on this round
    #[clap(long)]
    full_pool_round: Option<u32>,

    /// solve a single word instead of running a benchmark
    #[clap(short, long)]
    target: Option<String>,

    /// print every guess of every game
    #[clap(short, long)]
    verbose: bool,

    /// print the results as json
    #[clap(long)]
    json: bool,

    /// fail on malformed lines in the word list instead of skipping them
    #[clap(long)]
    strict: bool,
}

impl Options {
    /// Fails when --full-pool-round is given without --pool candidates
    fn engine_config(&self) -> Result<EngineConfig, clap::Error> {
        let duplicates = if self.easy {
            DuplicatePolicy::LabelAll
        } else {
            DuplicatePolicy::Standard
        };

        let pool = match (self.pool, self.full_pool_round) {
            (PoolArg::Dictionary, None) => PoolPolicy::Dictionary,
            (PoolArg::Dictionary, Some(_)) => {
                return Err(Options::command().error(
                    ErrorKind::ArgumentConflict,
                    "--full-pool-round only applies with --pool candidates"));
            }
            (PoolArg::Candidates, None) => PoolPolicy::Candidates,
            (PoolArg::Candidates, Some(round)) => PoolPolicy::CandidatesExceptRound(round),
        };

        Ok(EngineConfig { duplicates, pool })
    }

    fn sample_mode(&self) -> SampleMode {
        match self.sample {
            Some(count) => SampleMode::Random { count, seed: self.seed },
            None => SampleMode::All,
        }
    }

    fn load_mode(&self) -> LoadMode {
        if self.strict {
            LoadMode::Strict
        } else {
            LoadMode::Lenient
        }
    }
}

fn main() {
    wordle_bench::init_logging();
    let opts = Options::parse();
    let config = match opts.engine_config() {
        Ok(config) => config,
        Err(err) => err.exit(),
    };

    if let Err(err) = run(&opts, config) {
        eprintln!("error: {}", err);
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        process::exit(1);
    }
}

fn run(opts: &Options, config: EngineConfig) -> Result<(), Box<dyn Error>> {
    log::debug!("wordle-bench build {} with {:?}", GIT_VERSION, opts);

    let dictionary = load_dictionary(&opts.dictionary, opts.load_mode())?;
    let engine = if opts.no_cache {
        Engine::new(dictionary, config, &mut NoCache)?
    } else {
        Engine::new(dictionary, config, &mut FileCache::new(&opts.cache))?
    };

    if !opts.json {
        println!(
            "Loaded {} words, opening with {}",
            engine.dictionary().len(),
            engine.first_guess());
        println!();
    }

    if let Some(target) = &opts.target {
        let record = engine.solve(target)?;
        if opts.json {
            println!("{}", serde_json::to_string_pretty(&record)?);
        } else {
            print_game(&record);
        }
        return Ok(());
    }

    let targets = sample_targets(engine.dictionary(), opts.sample_mode())?;
    let summary = run_benchmark(&engine, &targets, |idx, record| {
        if opts.verbose && !opts.json {
            println!("Wordle {}:", idx + 1);
            print_game(record);
            println!();
        }
    })?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary);
    }

    Ok(())
}

fn print_game(record: &GameRecord) {
    for (idx, step) in record.steps.iter().enumerate() {
        println!(
            "Guess #{}: {} {} ({} left)",
            idx + 1,
            step.guess,
            step.pattern,
            step.remaining);
    }
    println!(
        "The word was: {}. We found it in {} guesses!",
        record.target,
        record.num_guesses());
}
