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

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use super::prelude::*;

///
/// Storage for the precomputed opening guess.
///
/// Computing the opening guess is the single most expensive step (the guess pool and the candidate
/// set are both the whole dictionary), so it is worth keeping between runs. It is only a
/// performance cache: a load failure just means the guess gets recomputed.
///
pub trait FirstGuessCache {
    /// Ok(None) means nothing is cached yet
    fn load(&self) -> Result<Option<String>, CacheErr>;

    fn store(&mut self, word: &str) -> Result<(), CacheErr>;
}

#[derive(Error, Debug)]
pub enum CacheErr {
    #[error("cache i/o failed")]
    Io(#[from] io::Error),
    #[error("cached first guess '{0}' is not a word")]
    Malformed(String),
}

/// A single word in a text file
#[derive(Clone, Debug)]
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FirstGuessCache for FileCache {
    fn load(&self) -> Result<Option<String>, CacheErr> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let word = normalize_wordle_word(&raw);
        if word.is_empty() {
            Ok(None)
        } else if is_wordle_str(&word) {
            Ok(Some(word))
        } else {
            Err(CacheErr::Malformed(word))
        }
    }

    fn store(&mut self, word: &str) -> Result<(), CacheErr> {
        fs::write(&self.path, format!("{}\n", word))?;
        log::debug!("wrote first guess {} to {}", word, self.path.display());
        Ok(())
    }
}

/// Keeps the word in memory only. Mostly useful for tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryCache {
    word: Option<String>,
    stores: usize,
}

impl MemoryCache {
    pub fn with_word(word: &str) -> Self {
        Self { word: Some(word.to_string()), stores: 0 }
    }

    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    /// how many times store() was called
    pub fn stores(&self) -> usize {
        self.stores
    }
}

impl FirstGuessCache for MemoryCache {
    fn load(&self) -> Result<Option<String>, CacheErr> {
        Ok(self.word.clone())
    }

    fn store(&mut self, word: &str) -> Result<(), CacheErr> {
        self.word = Some(word.to_string());
        self.stores += 1;
        Ok(())
    }
}

/// Never remembers anything, so the opening guess is computed every run
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCache;

impl FirstGuessCache for NoCache {
    fn load(&self) -> Result<Option<String>, CacheErr> {
        Ok(None)
    }

    fn store(&mut self, _word: &str) -> Result<(), CacheErr> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("wordle-bench-{}-{}.txt", name, std::process::id()))
    }

    #[test]
    fn test_file_cache_missing_is_empty() {
        let path = temp_path("cache-missing");
        let _ = fs::remove_file(&path);
        assert!(matches!(FileCache::new(&path).load(), Ok(None)));
    }

    #[test]
    fn test_file_cache_round_trip() {
        let path = temp_path("cache-store");
        let mut cache = FileCache::new(&path);
        cache.store("PLATE").unwrap();
        let loaded = cache.load().unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded.as_deref(), Some("PLATE"));
    }

    #[test]
    fn test_file_cache_normalizes_and_rejects_garbage() {
        let path = temp_path("cache-garbage");
        fs::write(&path, "  raise \n").unwrap();
        assert_eq!(FileCache::new(&path).load().unwrap().as_deref(), Some("RAISE"));

        fs::write(&path, "\n").unwrap();
        assert!(matches!(FileCache::new(&path).load(), Ok(None)));

        fs::write(&path, "not a word").unwrap();
        let result = FileCache::new(&path).load();
        fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(CacheErr::Malformed(_))));
    }

    #[test]
    fn test_memory_and_no_cache() {
        let mut memory = MemoryCache::default();
        assert!(matches!(memory.load(), Ok(None)));
        memory.store("CRANE").unwrap();
        assert_eq!(memory.word(), Some("CRANE"));
        assert_eq!(memory.stores(), 1);

        let mut none = NoCache;
        none.store("CRANE").unwrap();
        assert!(matches!(none.load(), Ok(None)));
    }
}
