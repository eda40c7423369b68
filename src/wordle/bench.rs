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

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::Instant;
use thiserror::Error;
use super::{data::*, game::*};

/// Which targets a benchmark plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleMode {
    /// every dictionary word, in dictionary order
    All,
    /// `count` distinct words drawn with a seeded rng
    Random { count: usize, seed: u64 },
}

#[derive(Error, Debug)]
pub enum BenchErr {
    #[error("a benchmark needs at least one game")]
    NoGames,
    #[error("cannot sample {requested} words from a dictionary of {available}")]
    SampleTooLarge { requested: usize, available: usize },
    #[error(transparent)]
    Solver(#[from] SolverErr),
}

///
/// Picks the targets to play. The rng lives and dies here, so the games themselves never see any
/// randomness: replaying a target always replays the same guesses.
///
pub fn sample_targets(dictionary: &Dictionary, mode: SampleMode) -> Result<Vec<&str>, BenchErr> {
    match mode {
        SampleMode::All => Ok(dictionary.words().iter().map(|w| w.as_str()).collect()),
        SampleMode::Random { count: 0, .. } => Err(BenchErr::NoGames),
        SampleMode::Random { count, seed } => {
            if count > dictionary.len() {
                return Err(BenchErr::SampleTooLarge {
                    requested: count,
                    available: dictionary.len(),
                });
            }

            let mut rng = StdRng::seed_from_u64(seed);
            Ok(dictionary
                .words()
                .choose_multiple(&mut rng, count)
                .map(|w| w.as_str())
                .collect())
        }
    }
}

///
/// Plays every target and summarizes the guess counts. `on_game` sees each finished game in
/// order (used for the verbose trace).
///
pub fn run_benchmark<F>(engine: &Engine, targets: &[&str], mut on_game: F) -> Result<Summary, BenchErr>
where
    F: FnMut(usize, &GameRecord),
{
    if targets.is_empty() {
        return Err(BenchErr::NoGames);
    }

    let start_at = Instant::now();
    let mut counts = Vec::with_capacity(targets.len());
    for (idx, target) in targets.iter().enumerate() {
        let record = engine.solve(target)?;
        counts.push(record.num_guesses());
        on_game(idx, &record);
    }

    log::info!(
        "played {} games in {:.2}s",
        counts.len(),
        start_at.elapsed().as_secs_f64());

    Summary::from_counts(&counts)
}

/// Aggregate guess counts over a benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub games: usize,
    pub min: usize,
    /// the upper median (sorted[n / 2]) so it is always an actual guess count
    pub median: usize,
    pub max: usize,
    pub mean: f64,
    /// (guesses, games) pairs in ascending order of guesses, zero counts omitted
    pub distribution: Vec<(usize, usize)>,
}

impl Summary {
    pub fn from_counts(counts: &[usize]) -> Result<Self, BenchErr> {
        if counts.is_empty() {
            return Err(BenchErr::NoGames);
        }

        let mut sorted = counts.to_vec();
        sorted.sort_unstable();
        let n = sorted.len();
        let total: usize = sorted.iter().sum();

        let distribution = (sorted[0]..=sorted[n - 1])
            .map(|guesses| (guesses, sorted.iter().filter(|c| **c == guesses).count()))
            .filter(|(_, games)| *games > 0)
            .collect();

        Ok(Self {
            games: n,
            min: sorted[0],
            median: sorted[n / 2],
            max: sorted[n - 1],
            mean: total as f64 / n as f64,
            distribution,
        })
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Here are the results over {} games!", self.games)?;
        writeln!(f, "Minimum # of Guesses: {}", self.min)?;
        writeln!(f, "Median # of Guesses: {}", self.median)?;
        writeln!(f, "Maximum # of Guesses: {}", self.max)?;
        writeln!(f, "Average # of Guesses: {:.3}", self.mean)?;
        writeln!(f)?;
        writeln!(f, "Guess distribution:")?;
        for (guesses, games) in &self.distribution {
            let pct = *games as f64 / self.games as f64 * 100.0;
            let bar = "█".repeat((games * 40 / self.games).max(1));
            writeln!(f, "  {:>2} guesses: {:>5} ({:>5.1}%) {}", guesses, games, pct, bar)?;
        }

        Ok(())
    }
}
