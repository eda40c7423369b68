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

use serde::{Deserialize, Serialize};
use std::time::Instant;
use thiserror::Error;
use super::{prelude::*, cache::*, color::*, data::*, index::*, select::*};

///
/// Which words may be played as the guess on a given round (the opening guess always comes from
/// the whole dictionary).
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolPolicy {
    /// any dictionary word, every round
    Dictionary,
    /// only words that could still be the answer
    Candidates,
    /// only candidates, except on the given round which may use any dictionary word
    CandidatesExceptRound(u32),
}

impl Default for PoolPolicy {
    fn default() -> Self {
        PoolPolicy::Dictionary
    }
}

impl PoolPolicy {
    pub fn uses_dictionary(&self, round: u32) -> bool {
        match self {
            PoolPolicy::Dictionary => true,
            PoolPolicy::Candidates => false,
            PoolPolicy::CandidatesExceptRound(r) => *r == round,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub duplicates: DuplicatePolicy,
    pub pool: PoolPolicy,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverErr {
    #[error("'{0}' is not in the dictionary")]
    UnknownTarget(String),
    #[error("no possible words remain")]
    NoCandidates,
    #[error("there are no guesses to choose from")]
    EmptyGuessPool,
    #[error("'{target}' was not solved within {limit} guesses")]
    GuessLimitExceeded { target: String, limit: usize },
}

///
/// Everything shared between games: the dictionary, its pattern index and the opening guess.
///
/// Built once (the index and opening guess are the expensive part) and then only read, so any
/// number of games can borrow the same Engine.
///
#[derive(Debug)]
pub struct Engine {
    dictionary: Dictionary,
    index: PatternIndex,
    config: EngineConfig,
    /// every WordId in ascending order, the "whole dictionary" guess pool
    all_ids: Vec<WordId>,
    first_guess: WordId,
}

impl Engine {
    ///
    /// Indexes `dictionary` and resolves the opening guess through `cache`: a cached word is used
    /// when it is in the dictionary, otherwise the guess is computed and written back.
    ///
    pub fn new<C>(dictionary: Dictionary, config: EngineConfig, cache: &mut C) -> Result<Self, SolverErr>
    where
        C: FirstGuessCache + ?Sized,
    {
        let mut out = Self::unresolved(dictionary, config);
        out.first_guess = out.resolve_first_guess(cache)?;
        Ok(out)
    }

    ///
    /// Ignores any cache and opens with the best ranked guess. Returns the `k` best openers (at
    /// least one) along with the Engine, so they are only scored once.
    ///
    pub fn with_ranked_first_guesses(
        dictionary: Dictionary,
        config: EngineConfig,
        k: usize,
    ) -> Result<(Self, Vec<ScoredGuess>), SolverErr> {
        let mut out = Self::unresolved(dictionary, config);
        let ranked = out.rank_first_guesses(k.max(1));
        out.first_guess = ranked.first().ok_or(SolverErr::EmptyGuessPool)?.id;
        Ok((out, ranked))
    }

    fn unresolved(dictionary: Dictionary, config: EngineConfig) -> Self {
        let index = PatternIndex::build(&dictionary, config.duplicates);
        let all_ids = dictionary.ids().collect();
        Self {
            dictionary,
            index,
            config,
            all_ids,
            first_guess: 0,
        }
    }

    fn resolve_first_guess<C>(&self, cache: &mut C) -> Result<WordId, SolverErr>
    where
        C: FirstGuessCache + ?Sized,
    {
        match cache.load() {
            Ok(Some(word)) => match self.dictionary.id_of(&word) {
                Some(id) => {
                    log::debug!("using cached first guess {}", word);
                    return Ok(id);
                }
                None => log::warn!("cached first guess {} is not in the dictionary, recomputing", word),
            },
            Ok(None) => log::debug!("no cached first guess, computing it"),
            Err(err) => log::warn!("could not read the first guess cache ({}), recomputing", err),
        }

        let start_at = Instant::now();
        let best = self.compute_first_guess()?;
        let word = self.dictionary.word(best.id);
        log::info!(
            "computed first guess {} (score={}) in {:.2}s",
            word,
            best.score,
            start_at.elapsed().as_secs_f64());

        if let Err(err) = cache.store(word) {
            log::warn!("could not store the first guess ({})", err);
        }

        Ok(best.id)
    }

    /// Runs the selector over the whole dictionary as both guess pool and candidates
    pub fn compute_first_guess(&self) -> Result<ScoredGuess, SolverErr> {
        select(&self.index, &self.all_ids, &CandidateSet::full(self.dictionary.len()))
    }

    /// The `k` best opening guesses, best first
    pub fn rank_first_guesses(&self, k: usize) -> Vec<ScoredGuess> {
        rank_guesses(&self.index, &self.all_ids, &CandidateSet::full(self.dictionary.len()), k)
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn first_guess(&self) -> &str {
        self.dictionary.word(self.first_guess)
    }

    ///
    /// Plays a whole game against `target` and returns every guess made. The same target always
    /// produces the same guesses.
    ///
    pub fn solve(&self, target: &str) -> Result<GameRecord, SolverErr> {
        let target = normalize_wordle_word(target);
        let target_id = self
            .dictionary
            .id_of(&target)
            .ok_or(SolverErr::UnknownTarget(target))?;

        let mut game = Game::new(self, target_id);
        let mut steps = Vec::new();
        while let Some(step) = game.step()? {
            log::trace!("{} guess #{}: {} {} ({} left)", game.target(), steps.len() + 1, step.guess, step.pattern, step.remaining);
            steps.push(step);
        }

        log::debug!("solved {} in {} guesses", game.target(), steps.len());
        Ok(GameRecord {
            target: game.target().to_string(),
            steps,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Start,
    Guessing,
    Solved,
}

///
/// One simulated game. Owns its candidate set exclusively, everything else is borrowed from the
/// Engine.
///
pub struct Game<'e> {
    engine: &'e Engine,
    target: WordId,
    candidates: CandidateSet,
    round: u32,
    state: GameState,
}

impl<'e> Game<'e> {
    pub fn new(engine: &'e Engine, target: WordId) -> Self {
        Self {
            engine,
            target,
            candidates: CandidateSet::full(engine.dictionary.len()),
            round: 0,
            state: GameState::Start,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn target(&self) -> &'e str {
        self.engine.dictionary.word(self.target)
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// how many guesses have been made
    pub fn round(&self) -> u32 {
        self.round
    }

    ///
    /// Makes the next guess. Returns Ok(None) once the game is solved.
    ///
    /// The candidate set only ever shrinks and always keeps the target: the target reproduces
    /// the exact pattern it just produced, so it is in every partition we intersect with.
    ///
    pub fn step(&mut self) -> Result<Option<Step>, SolverErr> {
        match self.state {
            GameState::Solved => return Ok(None),
            GameState::Start => self.state = GameState::Guessing,
            GameState::Guessing => {}
        }

        let engine = self.engine;
        let limit = engine.dictionary.len();
        if self.round as usize >= limit {
            return Err(SolverErr::GuessLimitExceeded {
                target: self.target().to_string(),
                limit,
            });
        }
        self.round += 1;

        let guess = if self.round == 1 {
            engine.first_guess
        } else if engine.config.pool.uses_dictionary(self.round) {
            select(&engine.index, &engine.all_ids, &self.candidates)?.id
        } else {
            select(&engine.index, self.candidates.ids(), &self.candidates)?.id
        };

        let code = engine.index.code(guess, self.target);
        let before = self.candidates.len();
        if guess == self.target {
            self.candidates = CandidateSet::from_ids(limit, [self.target]);
            self.state = GameState::Solved;
        } else {
            self.candidates.retain_partition(&engine.index, guess, code);
        }

        debug_assert!(self.candidates.len() <= before);
        if !self.candidates.contains(self.target) {
            return Err(SolverErr::NoCandidates);
        }

        Ok(Some(Step {
            guess: engine.dictionary.word(guess).to_string(),
            pattern: engine.index.pattern(guess, self.target),
            remaining: self.candidates.len(),
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub guess: String,
    pub pattern: FeedbackPattern,
    /// candidates left after this guess's feedback was applied
    pub remaining: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub target: String,
    pub steps: Vec<Step>,
}

impl GameRecord {
    pub fn num_guesses(&self) -> usize {
        self.steps.len()
    }

    pub fn guesses(&self) -> impl Iterator<Item = &str> + '_ {
        self.steps.iter().map(|s| s.guess.as_str())
    }

    pub fn is_solved(&self) -> bool {
        self.steps.last().map(|s| s.pattern.is_solved()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOY: [&str; 5] = ["CRANE", "SLATE", "TRACE", "PLATE", "GRAPE"];

    const SMALL: [&str; 24] = [
        "CRANE", "SLATE", "TRACE", "PLATE", "GRAPE", "CRATE", "RAISE", "ARISE", "STARE", "ROAST",
        "TOAST", "BEAST", "LEAST", "FEAST", "BLAST", "STEAL", "STALE", "SPEED", "CREEP", "ERASE",
        "HELLO", "LEVEL", "ABIDE", "FLOOR",
    ];

    fn engine(words: &[&str], config: EngineConfig) -> Engine {
        Engine::new(Dictionary::new(words).unwrap(), config, &mut NoCache).unwrap()
    }

    #[test]
    fn test_toy_first_guess_and_solve() {
        let engine = engine(&TOY, EngineConfig::default());
        assert_eq!(engine.first_guess(), "PLATE");

        let record = engine.solve("crane").unwrap();
        assert_eq!(record.target, "CRANE");
        assert!(record.num_guesses() <= 3);
        assert_eq!(record.guesses().collect::<Vec<_>>(), vec!["PLATE", "CRANE"]);
        assert!(record.is_solved());
        assert_eq!(record.steps[0].remaining, 1);
    }

    #[test]
    fn test_every_target_solves_with_every_policy() {
        let policies = [
            PoolPolicy::Dictionary,
            PoolPolicy::Candidates,
            PoolPolicy::CandidatesExceptRound(2),
        ];
        for duplicates in [DuplicatePolicy::Standard, DuplicatePolicy::LabelAll] {
            for pool in policies {
                let engine = engine(&SMALL, EngineConfig { duplicates, pool });
                for target in engine.dictionary().words() {
                    let record = engine.solve(target).unwrap();
                    assert!(record.is_solved(), "{:?} {:?} {}", duplicates, pool, target);
                    assert_eq!(record.guesses().last(), Some(target.as_str()));
                    assert!(record.num_guesses() <= engine.dictionary().len());
                }
            }
        }
    }

    #[test]
    fn test_candidates_shrink_and_keep_target() {
        let engine = engine(&SMALL, EngineConfig::default());
        for target in engine.dictionary().ids() {
            let mut game = Game::new(&engine, target);
            assert_eq!(game.state(), GameState::Start);
            let mut last = game.candidates().len();
            let mut guesses = 0;
            while let Some(step) = game.step().unwrap() {
                guesses += 1;
                assert_eq!(game.round(), guesses);
                assert!(step.remaining <= last);
                assert!(game.candidates().contains(target));
                last = step.remaining;
            }
            assert_eq!(game.state(), GameState::Solved);
            assert_eq!(game.candidates().ids(), &[target]);
            assert!(game.step().unwrap().is_none());
        }
    }

    #[test]
    fn test_feedback_in_record_matches_evaluator() {
        let engine = engine(&SMALL, EngineConfig::default());
        let record = engine.solve("FLOOR").unwrap();
        for step in &record.steps {
            assert_eq!(
                step.pattern,
                FeedbackPattern::evaluate(&step.guess, "FLOOR", DuplicatePolicy::Standard));
        }
    }

    #[test]
    fn test_solve_is_deterministic() {
        let a = engine(&SMALL, EngineConfig::default());
        let mut reversed = SMALL;
        reversed.reverse();
        let b = engine(&reversed, EngineConfig::default());
        for target in SMALL {
            assert_eq!(a.solve(target).unwrap(), a.solve(target).unwrap());
            assert_eq!(a.solve(target).unwrap(), b.solve(target).unwrap());
        }
    }

    #[test]
    fn test_unknown_target() {
        let engine = engine(&TOY, EngineConfig::default());
        assert_eq!(engine.solve("ZEBRA"), Err(SolverErr::UnknownTarget("ZEBRA".to_string())));
    }

    #[test]
    fn test_single_word_dictionary() {
        let engine = engine(&["CRANE"], EngineConfig::default());
        let record = engine.solve("CRANE").unwrap();
        assert_eq!(record.num_guesses(), 1);
        assert_eq!(record.steps[0].pattern, FeedbackPattern::ALL_GREEN);
    }

    #[test]
    fn test_cache_is_written_then_trusted() {
        let mut cache = MemoryCache::default();
        let first = Engine::new(Dictionary::new(TOY).unwrap(), EngineConfig::default(), &mut cache).unwrap();
        assert_eq!(cache.word(), Some("PLATE"));
        assert_eq!(cache.stores(), 1);
        assert_eq!(first.first_guess(), "PLATE");

        // a cached word is trusted as long as it is a dictionary word
        let mut cache = MemoryCache::with_word("GRAPE");
        let second = Engine::new(Dictionary::new(TOY).unwrap(), EngineConfig::default(), &mut cache).unwrap();
        assert_eq!(second.first_guess(), "GRAPE");
        assert_eq!(cache.stores(), 0);
        assert!(second.solve("CRANE").unwrap().is_solved());
    }

    #[test]
    fn test_cache_outside_dictionary_is_recomputed() {
        let mut cache = MemoryCache::with_word("ZEBRA");
        let engine = Engine::new(Dictionary::new(TOY).unwrap(), EngineConfig::default(), &mut cache).unwrap();
        assert_eq!(engine.first_guess(), "PLATE");
        assert_eq!(cache.word(), Some("PLATE"));
    }

    #[test]
    fn test_rank_first_guesses() {
        let engine = engine(&TOY, EngineConfig::default());
        let ranked = engine.rank_first_guesses(10);
        assert_eq!(ranked.len(), TOY.len());
        assert_eq!(engine.dictionary().word(ranked[0].id), "PLATE");
        assert_eq!(ranked[0], engine.compute_first_guess().unwrap());
    }

    #[test]
    fn test_ranked_engine_matches_computed_first_guess() {
        let (engine, ranked) =
            Engine::with_ranked_first_guesses(Dictionary::new(SMALL).unwrap(), EngineConfig::default(), 3).unwrap();
        let computed = self::engine(&SMALL, EngineConfig::default());
        assert_eq!(ranked.len(), 3);
        assert_eq!(engine.first_guess(), computed.first_guess());
        assert_eq!(engine.dictionary().word(ranked[0].id), computed.first_guess());
        assert_eq!(engine.solve("FLOOR").unwrap(), computed.solve("FLOOR").unwrap());

        let (_, ranked) =
            Engine::with_ranked_first_guesses(Dictionary::new(TOY).unwrap(), EngineConfig::default(), 0).unwrap();
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_pool_policy() {
        assert!(PoolPolicy::Dictionary.uses_dictionary(3));
        assert!(!PoolPolicy::Candidates.uses_dictionary(3));
        assert!(PoolPolicy::CandidatesExceptRound(3).uses_dictionary(3));
        assert!(!PoolPolicy::CandidatesExceptRound(3).uses_dictionary(2));
    }
}
