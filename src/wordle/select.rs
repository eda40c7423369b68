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

use std::cmp::Ordering;
use super::{prelude::*, color::*, game::SolverErr, index::*};

///
/// A possible guess and how poorly it splits the candidates.
///
/// score = Σ over every candidate answer of |candidates producing the same pattern as that answer|
///       = Σ over patterns of (bucket size)^2
///
/// It is n times the expected number of survivors after playing the guess, so lower is better, and
/// a guess that separates every candidate scores exactly n.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScoredGuess {
    pub id: WordId,
    pub score: u64,
    /// whether the guess could itself be the answer
    pub is_candidate: bool,
}

impl ScoredGuess {
    ///
    /// Whether `self` should replace `best` during a scan in pool order. Ties only go to a guess
    /// that could be the answer, and only when the current best can't be.
    ///
    pub fn beats(&self, best: &ScoredGuess) -> bool {
        match self.score.cmp(&best.score) {
            Ordering::Less => true,
            Ordering::Equal => self.is_candidate && !best.is_candidate,
            Ordering::Greater => false,
        }
    }

    /// Total order matching what select() picks first: score, then candidates, then WordId
    fn rank_cmp(&self, other: &ScoredGuess) -> Ordering {
        self.score
            .cmp(&other.score)
            .then_with(|| other.is_candidate.cmp(&self.is_candidate))
            .then_with(|| self.id.cmp(&other.id))
    }
}

pub fn score_guess(index: &PatternIndex, guess: WordId, candidates: &CandidateSet) -> ScoredGuess {
    let mut buckets = [0u32; FeedbackPattern::NUM_STATES];
    for &answer in candidates.ids() {
        buckets[index.code(guess, answer) as usize] += 1;
    }

    let score = buckets
        .iter()
        .map(|size| *size as u64 * *size as u64)
        .sum();

    ScoredGuess {
        id: guess,
        score,
        is_candidate: candidates.contains(guess),
    }
}

///
/// Picks the guess from `pool` that minimizes score_guess over `candidates`, scanning `pool` in
/// the order given (callers pass ascending WordIds, which makes the result reproducible).
///
/// Both inputs must be non-empty. An empty one means the game logic is broken, so it is reported
/// as an error rather than papered over.
///
pub fn select(index: &PatternIndex, pool: &[WordId], candidates: &CandidateSet) -> Result<ScoredGuess, SolverErr> {
    if candidates.is_empty() {
        return Err(SolverErr::NoCandidates);
    }

    let mut best: Option<ScoredGuess> = None;
    for &guess in pool {
        let scored = score_guess(index, guess, candidates);
        if best.map_or(true, |current| scored.beats(&current)) {
            best = Some(scored);
        }
    }

    let best = best.ok_or(SolverErr::EmptyGuessPool)?;
    log::trace!(
        "selected {} (score={}, candidate={}) from {} guesses over {} candidates",
        best.id,
        best.score,
        best.is_candidate,
        pool.len(),
        candidates.len());

    Ok(best)
}

///
/// The `k` best guesses from `pool`, best first, ordered consistently with select() (the first
/// entry is always what select() would return).
///
pub fn rank_guesses(index: &PatternIndex, pool: &[WordId], candidates: &CandidateSet, k: usize) -> Vec<ScoredGuess> {
    let mut scored: Vec<ScoredGuess> = pool
        .iter()
        .map(|guess| score_guess(index, *guess, candidates))
        .collect();

    scored.sort_unstable_by(ScoredGuess::rank_cmp);
    scored.truncate(k);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordle::data::Dictionary;

    fn toy() -> (Dictionary, PatternIndex) {
        let dict = Dictionary::new(["CRANE", "SLATE", "TRACE", "PLATE", "GRAPE"]).unwrap();
        let index = PatternIndex::build(&dict, DuplicatePolicy::Standard);
        (dict, index)
    }

    fn all_ids(dict: &Dictionary) -> Vec<WordId> {
        dict.ids().collect()
    }

    #[test]
    fn test_score_matches_count_matching_definition() {
        let (dict, index) = toy();
        let subsets = [
            CandidateSet::full(dict.len()),
            CandidateSet::from_ids(dict.len(), [0, 2, 3]),
            CandidateSet::from_ids(dict.len(), [4]),
        ];

        for candidates in &subsets {
            for guess in dict.ids() {
                let expected: usize = candidates
                    .ids()
                    .iter()
                    .map(|answer| index.count_matching(guess, index.code(guess, *answer), candidates))
                    .sum();
                assert_eq!(score_guess(&index, guess, candidates).score, expected as u64);
            }
        }
    }

    #[test]
    fn test_toy_scores() {
        let (dict, index) = toy();
        let all = CandidateSet::full(dict.len());
        let score_of = |w: &str| score_guess(&index, dict.id_of(w).unwrap(), &all).score;

        // PLATE is the only guess that separates all five words
        assert_eq!(score_of("PLATE"), 5);
        assert_eq!(score_of("CRANE"), 7);
        assert_eq!(score_of("SLATE"), 7);
        assert_eq!(score_of("TRACE"), 7);
        assert_eq!(score_of("GRAPE"), 7);
    }

    #[test]
    fn test_select_minimizes_score() {
        let (dict, index) = toy();
        let best = select(&index, &all_ids(&dict), &CandidateSet::full(dict.len())).unwrap();
        assert_eq!(dict.word(best.id), "PLATE");
        assert_eq!(best.score, 5);
        assert!(best.is_candidate);
    }

    #[test]
    fn test_single_candidate_is_selected() {
        let (dict, index) = toy();
        for target in dict.ids() {
            let candidates = CandidateSet::from_ids(dict.len(), [target]);
            let best = select(&index, &all_ids(&dict), &candidates).unwrap();
            assert_eq!(best.id, target, "every guess scores 1, the tie must go to the candidate");
        }
    }

    #[test]
    fn test_tie_prefers_candidate_over_earlier_non_candidate() {
        let (dict, index) = toy();
        // CRANE and TRACE separate GRAPE from TRACE equally well, but only TRACE can be the answer
        let candidates = CandidateSet::from_ids(
            dict.len(),
            [dict.id_of("GRAPE").unwrap(), dict.id_of("TRACE").unwrap()]);
        let pool = [dict.id_of("CRANE").unwrap(), dict.id_of("TRACE").unwrap()];
        let best = select(&index, &pool, &candidates).unwrap();
        assert_eq!(dict.word(best.id), "TRACE");
    }

    #[test]
    fn test_tie_keeps_first_candidate() {
        let a = ScoredGuess { id: 0, score: 4, is_candidate: true };
        let b = ScoredGuess { id: 1, score: 4, is_candidate: true };
        let c = ScoredGuess { id: 2, score: 4, is_candidate: false };
        assert!(!b.beats(&a));
        assert!(a.beats(&c));
        assert!(!c.beats(&a));
        assert!(ScoredGuess { id: 3, score: 3, is_candidate: false }.beats(&a));
    }

    #[test]
    fn test_empty_inputs_are_errors() {
        let (dict, index) = toy();
        assert_eq!(
            select(&index, &[], &CandidateSet::full(dict.len())),
            Err(SolverErr::EmptyGuessPool));
        assert_eq!(
            select(&index, &all_ids(&dict), &CandidateSet::from_ids(dict.len(), Vec::new())),
            Err(SolverErr::NoCandidates));
    }

    #[test]
    fn test_rank_agrees_with_select() {
        let (dict, index) = toy();
        let pool = all_ids(&dict);
        let subsets = [
            CandidateSet::full(dict.len()),
            CandidateSet::from_ids(dict.len(), [1, 4]),
            CandidateSet::from_ids(dict.len(), [2, 3]),
        ];
        for candidates in &subsets {
            let ranked = rank_guesses(&index, &pool, candidates, 3);
            assert_eq!(ranked.len(), 3);
            assert_eq!(ranked[0], select(&index, &pool, candidates).unwrap());
            assert!(ranked.windows(2).all(|w| w[0].score <= w[1].score));
        }
    }
}
