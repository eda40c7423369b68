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

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use wordle_bench::wordle::*;

// how many alternatives to list next to the chosen opening guess
const N_RECOMMENDATIONS: usize = 10;

/// Computes the opening guess for a word list and writes it to the first guess cache file.
#[derive(Parser, Debug)]
#[clap(name = "gen-first-guess", author, version, about, long_about = None)]
struct Options {
    /// word list, one five letter word per line
    #[clap(short, long, default_value = DEFAULT_DICTIONARY_FILE_NAME)]
    dictionary: PathBuf,

    /// where to write the opening guess
    #[clap(short, long, default_value = DEFAULT_CACHE_FILE_NAME)]
    cache: PathBuf,

    /// score with easy mode duplicate marking
    #[clap(short, long)]
    easy: bool,

    /// how many of the best openers to print
    #[clap(short, long, default_value_t = N_RECOMMENDATIONS)]
    top: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    wordle_bench::init_logging();
    let opts = Options::parse();

    let dictionary = load_dictionary(&opts.dictionary, LoadMode::Lenient)?;
    let config = EngineConfig {
        duplicates: if opts.easy { DuplicatePolicy::LabelAll } else { DuplicatePolicy::Standard },
        ..EngineConfig::default()
    };

    // whatever is in the cache file right now gets replaced below
    let (dur, result) = timed(|| Engine::with_ranked_first_guesses(dictionary, config, opts.top));
    let (engine, ranked) = result?;

    let mut cache = FileCache::new(&opts.cache);
    cache.store(engine.first_guess())?;
    eprintln!(
        "done! wrote {} to {} in {:.2}s",
        engine.first_guess(),
        cache.path().display(),
        dur.as_secs_f64());

    let n = engine.dictionary().len();
    for (rank, scored) in ranked.iter().take(opts.top).enumerate() {
        println!(
            "{:>3}. {} score {:>9} expected remaining {:>8.3}",
            rank + 1,
            engine.dictionary().word(scored.id),
            scored.score,
            scored.score as f64 / n as f64);
    }

    Ok(())
}

fn timed<R, F>(f: F) -> (Duration, R)
    where F: FnOnce() -> R
{
    let start_at = Instant::now();
    let out = f();
    (start_at.elapsed(), out)
}
