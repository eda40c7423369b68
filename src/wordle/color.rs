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

use std::fmt::{Debug, Display, Formatter};
use std::ops::{Index, IndexMut};
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use self::Mark::*;
use super::prelude::*;

///
/// Every FeedbackPattern maps to a "code" which uniquely identifies it. Codes range over
/// [0, 3^WORD_SIZE) so they double as array/bucket indices in the pattern index.
///
pub type PatternCode = u8;

///
/// The three marks a square can receive:
///   * Gray = the letter is not in the answer (or every copy of it was already claimed by other
///            squares with the same letter)
///   * Yellow = the letter is in the answer, but not in this position
///   * Green = the letter is in the answer at this position
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    Gray,
    Yellow,
    Green,
}

impl Mark {
    pub const ALL: [Mark; 3] = [Gray, Yellow, Green];
    pub const NUM: usize = Self::ALL.len();

    pub fn ordinal(&self) -> PatternCode {
        match self {
            Gray => 0,
            Yellow => 1,
            Green => 2,
        }
    }

    pub fn from_ordinal(code: PatternCode) -> Option<Self> {
        Some(match code {
            0 => Gray,
            1 => Yellow,
            2 => Green,
            _ => return None,
        })
    }

    /// Reads a single mark: g/2 = green, y/1 = yellow, b/x/0/. = gray
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c.to_ascii_lowercase() {
            'g' | '2' => Green,
            'y' | '1' => Yellow,
            'b' | 'x' | '0' | '.' => Gray,
            _ => return None,
        })
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Gray => "⬛",
            Yellow => "🟨",
            Green => "🟩",
        }
    }
}

///
/// How repeated letters are scored.
///
/// Standard is the real game: every green and yellow consumes one copy of the letter from the
/// answer, so a guess never lights up more copies of a letter than the answer holds.
///
/// LabelAll ("easy mode") never consumes copies. Any guessed letter present anywhere in the answer
/// is at least yellow, no matter how many times it is repeated.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    Standard,
    LabelAll,
}

impl Default for DuplicatePolicy {
    fn default() -> Self {
        DuplicatePolicy::Standard
    }
}

pub type MarksArray = [Mark; WORD_SIZE];

/// One Mark per square, the outcome of comparing a guess against an answer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FeedbackPattern(pub MarksArray);

impl From<MarksArray> for FeedbackPattern {
    fn from(arr: MarksArray) -> Self {
        Self(arr)
    }
}

impl Index<usize> for FeedbackPattern {
    type Output = Mark;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<usize> for FeedbackPattern {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl FeedbackPattern {
    /// 3^WORD_SIZE, the number of distinct patterns (243 for five letters)
    pub const NUM_STATES: usize = Mark::NUM.pow(WORD_SIZE as u32);

    pub const ALL_GREEN: Self = Self([Green; WORD_SIZE]);

    ///
    /// Scores `guess` against `answer`.
    ///
    /// Two passes over the squares, sharing a per-letter budget seeded from the answer's letters:
    /// * the GREEN pass marks exact position matches and (under Standard) spends their budget
    /// * the YELLOW pass marks any remaining guessed letter that still has budget, spending it
    ///
    /// Greens have to claim their budget first. Otherwise "EERIE" against "BEAST" would yellow the
    /// first E and leave nothing for the green one right after it.
    ///
    pub fn evaluate(guess: &str, answer: &str, policy: DuplicatePolicy) -> Self {
        debug_assert!(is_wordle_str(guess), "bad guess {:?}", guess);
        debug_assert!(is_wordle_str(answer), "bad answer {:?}", answer);

        let spend = policy == DuplicatePolicy::Standard;
        let mut out = Self::default();
        let mut budget = count_letters(answer);
        let answer_bytes = answer.as_bytes();
        let guess_bytes = guess.as_bytes();

        // GREEN pass
        for i in 0..WORD_SIZE {
            let gc = guess_bytes[i];
            if gc == answer_bytes[i] {
                out[i] = Green;
                if spend {
                    budget[letter_idx(gc)] -= 1;
                }
            }
        }

        // YELLOW pass
        for i in 0..WORD_SIZE {
            if out[i] == Green {
                continue;
            }

            let counter = &mut budget[letter_idx(guess_bytes[i])];
            if *counter > 0 {
                out[i] = Yellow;
                if spend {
                    *counter -= 1;
                }
            }
        }

        out
    }

    ///
    /// Treats the marks as a WORD_SIZE digit base-3 number, with square 0 as the lowest digit.
    ///
    pub fn code(&self) -> PatternCode {
        let mut out = 0;
        let mut multiplier = 1;
        for mark in self.0 {
            out += mark.ordinal() * multiplier;
            multiplier = multiplier.wrapping_mul(Mark::NUM as PatternCode);
        }
        out
    }

    pub fn from_code(mut code: PatternCode) -> Option<Self> {
        if code as usize >= Self::NUM_STATES {
            return None;
        }

        let mut out = Self::default();
        for i in 0..WORD_SIZE {
            out[i] = Mark::from_ordinal(code % (Mark::NUM as PatternCode))?;
            code /= Mark::NUM as PatternCode;
        }

        Some(out)
    }

    pub fn is_solved(&self) -> bool {
        self.0.iter().all(|m| *m == Green)
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.0.iter().filter(|m| **m == mark).count()
    }

    /// Compact "gybbb" style rendering, accepted back by parse()
    pub fn to_letters(&self) -> String {
        self.0
            .iter()
            .map(|m| match m {
                Gray => 'b',
                Yellow => 'y',
                Green => 'g',
            })
            .collect()
    }
}

impl Default for FeedbackPattern {
    fn default() -> Self {
        Self([Gray; WORD_SIZE])
    }
}

impl Display for FeedbackPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for mark in &self.0 {
            f.write_str(mark.emoji())?;
        }

        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsePatternErr {
    #[error("pattern '{0}' must have exactly {} marks", WORD_SIZE)]
    WrongLength(String),
    #[error("'{0}' is not a mark (use g, y or b)")]
    BadMark(char),
}

impl FromStr for FeedbackPattern {
    type Err = ParsePatternErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.chars().count() != WORD_SIZE {
            return Err(ParsePatternErr::WrongLength(s.to_string()));
        }

        let mut out = Self::default();
        for (i, c) in s.chars().enumerate() {
            out[i] = Mark::from_char(c).ok_or(ParsePatternErr::BadMark(c))?;
        }

        Ok(out)
    }
}
