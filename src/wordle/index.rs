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

use std::time::Instant;
use super::{prelude::*, color::*, data::*};

const NUM_STATES: usize = FeedbackPattern::NUM_STATES;

///
/// Precomputed feedback for every (guess, answer) pair in a Dictionary, plus the answers grouped
/// by (guess, pattern).
///
/// Everything is laid out in flat Vecs indexed by WordId:
///   * codes[guess * n + answer] is the PatternCode of that pair (the pattern cache)
///   * the row members[guess * n .. (guess + 1) * n] holds every answer, sorted by the pattern it
///     produces against `guess` (then by WordId)
///   * offsets[guess * (NUM_STATES + 1) + code] is where the answers producing `code` start within
///     that row, and the next offset is where they end
///
/// Building this is O(n^2) evaluations and is done once per Engine. It is immutable afterwards.
///
#[derive(Clone, Debug)]
pub struct PatternIndex {
    n: usize,
    policy: DuplicatePolicy,
    codes: Vec<PatternCode>,
    members: Vec<WordId>,
    offsets: Vec<u32>,
}

impl PatternIndex {
    pub fn build(dictionary: &Dictionary, policy: DuplicatePolicy) -> Self {
        let start_at = Instant::now();
        let n = dictionary.len();
        let mut codes = Vec::with_capacity(n * n);
        let mut members = vec![0; n * n];
        let mut offsets = Vec::with_capacity(n * (NUM_STATES + 1));

        for (_, guess) in dictionary.iter() {
            let row_start = codes.len();
            codes.extend(
                dictionary
                    .words()
                    .iter()
                    .map(|answer| FeedbackPattern::evaluate(guess, answer, policy).code()));
            let row = &codes[row_start..];

            // counting sort of this row's answers by pattern code
            let mut bucket_sizes = [0u32; NUM_STATES];
            for &code in row {
                bucket_sizes[code as usize] += 1;
            }

            let offsets_start = offsets.len();
            let mut total = 0u32;
            offsets.push(0);
            for size in bucket_sizes {
                total += size;
                offsets.push(total);
            }

            let mut cursor: Vec<u32> = offsets[offsets_start..offsets_start + NUM_STATES].to_vec();
            for (answer, &code) in row.iter().enumerate() {
                let slot = &mut cursor[code as usize];
                members[row_start + *slot as usize] = answer as WordId;
                *slot += 1;
            }
        }

        log::debug!(
            "built pattern index for {} words ({:?} duplicates) in {:.2}s",
            n,
            policy,
            start_at.elapsed().as_secs_f64());

        Self { n, policy, codes, members, offsets }
    }

    /// Number of words the index was built over
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Cached feedback code of `guess` against `answer`
    #[inline]
    pub fn code(&self, guess: WordId, answer: WordId) -> PatternCode {
        self.codes[guess as usize * self.n + answer as usize]
    }

    pub fn pattern(&self, guess: WordId, answer: WordId) -> FeedbackPattern {
        let code = self.code(guess, answer);
        debug_assert!(FeedbackPattern::from_code(code).is_some());
        FeedbackPattern::from_code(code).unwrap_or_default()
    }

    ///
    /// Every dictionary word that would produce `code` when `guess` is played against it, in
    /// WordId order. Empty when no word produces that pattern.
    ///
    pub fn partition(&self, guess: WordId, code: PatternCode) -> &[WordId] {
        let row_start = guess as usize * self.n;
        let offset_idx = guess as usize * (NUM_STATES + 1) + code as usize;
        let start = self.offsets[offset_idx] as usize;
        let end = self.offsets[offset_idx + 1] as usize;
        &self.members[row_start + start..row_start + end]
    }

    /// |partition(guess, code) ∩ candidates|
    pub fn count_matching(&self, guess: WordId, code: PatternCode, candidates: &CandidateSet) -> usize {
        self.partition(guess, code)
            .iter()
            .filter(|id| candidates.contains(**id))
            .count()
    }
}

///
/// The words still consistent with every piece of feedback seen in one game.
///
/// Kept both as a sorted list (for iteration) and as a membership table (for O(1) contains), so
/// the table is sized to the whole dictionary.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateSet {
    members: Vec<WordId>,
    present: Vec<bool>,
}

impl CandidateSet {
    /// Every word of a dictionary of `n` words
    pub fn full(n: usize) -> Self {
        Self {
            members: (0..n as WordId).collect(),
            present: vec![true; n],
        }
    }

    /// A subset of a dictionary of `n` words. Out of range ids are ignored.
    pub fn from_ids<I: IntoIterator<Item = WordId>>(n: usize, ids: I) -> Self {
        let mut present = vec![false; n];
        for id in ids {
            if let Some(slot) = present.get_mut(id as usize) {
                *slot = true;
            }
        }

        let members = present
            .iter()
            .enumerate()
            .filter(|(_, p)| **p)
            .map(|(id, _)| id as WordId)
            .collect();

        Self { members, present }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: WordId) -> bool {
        self.present.get(id as usize).copied().unwrap_or(false)
    }

    /// Members in ascending WordId order
    pub fn ids(&self) -> &[WordId] {
        &self.members
    }

    ///
    /// Keeps only the members that would have produced `code` against `guess`: the intersection
    /// with partition(guess, code). Never adds members.
    ///
    pub fn retain_partition(&mut self, index: &PatternIndex, guess: WordId, code: PatternCode) {
        let kept: Vec<WordId> = index
            .partition(guess, code)
            .iter()
            .copied()
            .filter(|id| self.contains(*id))
            .collect();

        for &id in &self.members {
            self.present[id as usize] = false;
        }
        for &id in &kept {
            self.present[id as usize] = true;
        }

        self.members = kept;
    }
}
