// This file configures the constants that define the game being solved.
//
// The word length and alphabet are the only things that make this "wordle" rather than some other
// mastermind variant, so everything else in the crate is written against these constants.


// how many characters are in a word?
pub const WORD_SIZE: usize = 5;
// the first letter of the alphabet, words are normalized to uppercase
pub const FIRST_LETTER: u8 = b'A';
// the last letter of the alphabet
pub const LAST_LETTER: u8 = b'Z';
// how many letters are in the alphabet?
pub const ALPHABET_SIZE: usize = (LAST_LETTER - FIRST_LETTER) as usize + 1;

/// Index of a word within a Dictionary. u32 keeps the (guess x answer) tables at half the size of
/// usize ones.
pub type WordId = u32;

/// Returns the number of times each letter of the alphabet occurs in the argument. The &str should
/// be a normalized word (see is_wordle_str). The output is indexed by letter_idx.
pub fn count_letters(word: &str) -> [u8; ALPHABET_SIZE] {
    count_letters_bytes(word.as_bytes())
}

/// Same as count_letters, but over the raw ASCII bytes of a word
pub fn count_letters_bytes(word: &[u8]) -> [u8; ALPHABET_SIZE] {
    debug_assert!(is_wordle_str_bytes(word));
    let mut out = [0; ALPHABET_SIZE];
    for &letter in &word[..WORD_SIZE] {
        out[letter_idx(letter)] += 1;
    }

    out
}

/// Returns the index of the given letter within the alphabet ('A' = 0, 'B' = 1, etc...)
#[inline]
pub fn letter_idx(letter: u8) -> usize {
    (letter - FIRST_LETTER) as usize
}

/// Checks whether or not the passed string is a "wordle_str": exactly WORD_SIZE letters, all
/// within FIRST_LETTER..=LAST_LETTER
pub fn is_wordle_str(v: &str) -> bool {
    is_wordle_str_bytes(v.as_bytes())
}

pub fn is_wordle_str_bytes(v: &[u8]) -> bool {
    v.len() == WORD_SIZE && v.iter().all(is_normal_wordle_char)
}

pub fn is_normal_wordle_char(v: &u8) -> bool {
    (FIRST_LETTER..=LAST_LETTER).contains(v)
}

/// Given some input &str, try to clean it up such that it might be a wordle_str.
///
/// Only trims surrounding whitespace and uppercases, so the output still has to be checked with
/// is_wordle_str.
pub fn normalize_wordle_word(word: &str) -> String {
    word.trim().to_ascii_uppercase()
}
