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

use super::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Default locations of the "input data", relative to the working directory
pub const DEFAULT_DICTIONARY_FILE_NAME: &str = "words.txt";
pub const DEFAULT_CACHE_FILE_NAME: &str = "first_guess.txt";

///
/// The closed set of words the game is played over: normalized, unique and sorted.
///
/// The sort is what fixes iteration order everywhere else (index building, guess selection
/// tie-breaks), so two Dictionaries built from the same words always behave identically no matter
/// what order the words were read in.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<String>,
}

/// What to do with a line that is not a valid word
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadMode {
    /// skip the line with a warning
    Lenient,
    /// fail the whole load
    Strict,
}

impl Default for LoadMode {
    fn default() -> Self {
        LoadMode::Lenient
    }
}

#[derive(Error, Debug)]
pub enum LoadDataErr {
    #[error("could not read dictionary file '{}'", .path.display())]
    MissingDictionaryFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("dictionary contains no words")]
    EmptyDictionary,
    #[error("line {line}: '{word}' is not a {} letter word", WORD_SIZE)]
    MalformedWord { line: usize, word: String },
    #[error("{count} words is more than the {limit} a dictionary can hold")]
    TooManyWords { count: usize, limit: usize },
}

impl Dictionary {
    ///
    /// Builds a dictionary out of already-separated words. Every word is normalized and must then
    /// pass is_wordle_str (there is no lenient mode here, callers handing us words directly are
    /// expected to hand us real words).
    ///
    pub fn new<I, S>(words: I) -> Result<Self, LoadDataErr>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .enumerate()
            .map(|(idx, raw)| {
                let word = normalize_wordle_word(raw.as_ref());
                if is_wordle_str(&word) {
                    Ok(word)
                } else {
                    Err(LoadDataErr::MalformedWord { line: idx + 1, word })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_normalized(words)
    }

    fn from_normalized(mut words: Vec<String>) -> Result<Self, LoadDataErr> {
        words.sort_unstable();
        words.dedup();
        if words.is_empty() {
            return Err(LoadDataErr::EmptyDictionary);
        }

        check_word_count(words.len())?;
        Ok(Self { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false, an empty Dictionary cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word(&self, id: WordId) -> &str {
        &self.words[id as usize]
    }

    pub fn id_of(&self, word: &str) -> Option<WordId> {
        self.words
            .binary_search_by(|w| w.as_str().cmp(word))
            .ok()
            .map(|idx| idx as WordId)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.id_of(word).is_some()
    }

    /// The stable default word (the lexicographically smallest one)
    pub fn first(&self) -> &str {
        &self.words[0]
    }

    pub fn ids(&self) -> impl ExactSizeIterator<Item = WordId> {
        0..self.words.len() as WordId
    }

    pub fn iter(&self) -> impl Iterator<Item = (WordId, &str)> + '_ {
        self.words
            .iter()
            .enumerate()
            .map(|(idx, w)| (idx as WordId, w.as_str()))
    }
}

// every WordId in 0..len must be representable
fn check_word_count(count: usize) -> Result<(), LoadDataErr> {
    let limit = WordId::MAX as usize;
    if count > limit {
        Err(LoadDataErr::TooManyWords { count, limit })
    } else {
        Ok(())
    }
}

///
/// Reads the word list at `path`: one word per line, case-insensitive. Only a failure to read the
/// file is an i/o error, lines that are not valid UTF-8 are malformed words like any other.
///
pub fn load_dictionary<P: AsRef<Path>>(path: P, mode: LoadMode) -> Result<Dictionary, LoadDataErr> {
    let path = path.as_ref();
    let raw = fs::read(path).map_err(|source| LoadDataErr::MissingDictionaryFile {
        path: path.to_path_buf(),
        source,
    })?;

    let out = parse_dictionary_bytes(&raw, mode)?;
    log::debug!("got {} words from {}", out.len(), path.display());
    Ok(out)
}

///
/// Parses word list text. Blank lines are ignored silently, anything else that does not normalize
/// to a word is handled according to `mode`.
///
pub fn parse_dictionary(raw: &str, mode: LoadMode) -> Result<Dictionary, LoadDataErr> {
    parse_dictionary_bytes(raw.as_bytes(), mode)
}

/// parse_dictionary over raw file contents, where any line may be invalid UTF-8
pub fn parse_dictionary_bytes(raw: &[u8], mode: LoadMode) -> Result<Dictionary, LoadDataErr> {
    let mut words = Vec::new();
    let mut skipped = 0usize;

    for (idx, line) in raw.split(|b| *b == b'\n').enumerate() {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let word = normalize_wordle_word(&String::from_utf8_lossy(line));
        if word.is_empty() {
            continue;
        }

        if is_wordle_str(&word) {
            words.push(word);
            continue;
        }

        match mode {
            LoadMode::Strict => return Err(LoadDataErr::MalformedWord { line: idx + 1, word }),
            LoadMode::Lenient => {
                log::warn!("skipping line {}: '{}' is not a {} letter word", idx + 1, word, WORD_SIZE);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        log::debug!("skipped {} malformed lines", skipped);
    }

    Dictionary::from_normalized(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_sorts_and_dedups() {
        let dict = parse_dictionary("slate\nCrane\n\n  trace \ncrane\n", LoadMode::Lenient).unwrap();
        assert_eq!(dict.words(), &["CRANE", "SLATE", "TRACE"]);
        assert_eq!(dict.first(), "CRANE");
        assert_eq!(dict.id_of("SLATE"), Some(1));
        assert_eq!(dict.id_of("PLATE"), None);
        assert_eq!(dict.word(2), "TRACE");
    }

    #[test]
    fn test_lenient_skips_malformed() {
        let dict = parse_dictionary("crane\ncranes\nc4ane\nslate\n", LoadMode::Lenient).unwrap();
        assert_eq!(dict.words(), &["CRANE", "SLATE"]);
    }

    #[test]
    fn test_strict_rejects_malformed() {
        match parse_dictionary("crane\ncranes\nslate\n", LoadMode::Strict) {
            Err(LoadDataErr::MalformedWord { line, word }) => {
                assert_eq!(line, 2);
                assert_eq!(word, "CRANES");
            }
            other => panic!("expected MalformedWord, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_dictionary() {
        assert!(matches!(
            parse_dictionary("\n\n", LoadMode::Lenient),
            Err(LoadDataErr::EmptyDictionary)
        ));
        assert!(matches!(
            parse_dictionary("toolong\nno\n", LoadMode::Lenient),
            Err(LoadDataErr::EmptyDictionary)
        ));
        assert!(matches!(
            Dictionary::new(Vec::<&str>::new()),
            Err(LoadDataErr::EmptyDictionary)
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("wordle-bench-definitely-missing.txt");
        let _ = fs::remove_file(&path);
        assert!(matches!(
            load_dictionary(&path, LoadMode::Lenient),
            Err(LoadDataErr::MissingDictionaryFile { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("wordle-bench-load-{}.txt", std::process::id()));
        fs::write(&path, "grape\nplate\n").unwrap();
        let dict = load_dictionary(&path, LoadMode::Strict).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(dict.words(), &["GRAPE", "PLATE"]);
    }

    #[test]
    fn test_invalid_utf8_lines() {
        let raw = b"crane\r\nslate\ncaf\xe9s\ntrace\n";

        let dict = parse_dictionary_bytes(raw, LoadMode::Lenient).unwrap();
        assert_eq!(dict.words(), &["CRANE", "SLATE", "TRACE"]);

        assert!(matches!(
            parse_dictionary_bytes(raw, LoadMode::Strict),
            Err(LoadDataErr::MalformedWord { line: 3, .. })
        ));
    }

    #[test]
    fn test_load_latin1_file() {
        let path = std::env::temp_dir().join(format!("wordle-bench-latin1-{}.txt", std::process::id()));
        fs::write(&path, b"crane\nslate\ncaf\xe9s\ntrace\n").unwrap();
        let lenient = load_dictionary(&path, LoadMode::Lenient);
        let strict = load_dictionary(&path, LoadMode::Strict);
        fs::remove_file(&path).unwrap();

        assert_eq!(lenient.unwrap().words(), &["CRANE", "SLATE", "TRACE"]);
        assert!(matches!(strict, Err(LoadDataErr::MalformedWord { line: 3, .. })));
    }

    #[test]
    fn test_word_count_limit() {
        let limit = WordId::MAX as usize;
        assert!(check_word_count(limit).is_ok());
        assert!(matches!(
            check_word_count(limit + 1),
            Err(LoadDataErr::TooManyWords { count, .. }) if count == limit + 1
        ));
    }

    #[test]
    fn test_new_rejects_bad_words() {
        assert!(matches!(
            Dictionary::new(["crane", "oops"]),
            Err(LoadDataErr::MalformedWord { line: 2, .. })
        ));
        assert_eq!(Dictionary::new(["crane"]).unwrap().len(), 1);
    }
}
