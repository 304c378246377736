//! Word counting on top of `ChainedHashMap`.
//!
//! A word is a run of ASCII letters. Everything else separates words.
//! Runs longer than `MAX_WORD_LEN` are split into consecutive words.

use std::io::{self, BufRead};

use tracing::debug;

use crate::chained_hash_map::{ChainedHashMap, DEFAULT_KEY_SPACE};
use crate::error::Error;

pub const MAX_WORD_LEN: usize = 99;

fn peek_byte<R: BufRead>(reader: &mut R) -> io::Result<Option<u8>> {
    Ok(reader.fill_buf()?.first().copied())
}

/// Read the next word, or `None` at end of input.
pub fn read_word<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    loop {
        match peek_byte(reader)? {
            None => return Ok(None),
            Some(b) if b.is_ascii_alphabetic() => break,
            Some(_) => reader.consume(1),
        }
    }
    let mut word = String::new();
    while word.len() < MAX_WORD_LEN {
        match peek_byte(reader)? {
            Some(b) if b.is_ascii_alphabetic() => {
                word.push(char::from(b));
                reader.consume(1);
            }
            _ => break,
        }
    }
    Ok(Some(word))
}

/// Count occurrences of every word in `reader`.
pub fn count_words<R: BufRead>(mut reader: R) -> Result<ChainedHashMap<u64>, Error> {
    let mut counts = ChainedHashMap::new(DEFAULT_KEY_SPACE)?;
    let mut total = 0u64;
    while let Some(word) = read_word(&mut reader)? {
        counts.insert_with(&word, 1, |seen, one| seen + one);
        total += 1;
    }
    debug!(total, distinct = counts.len(), "counted words");
    Ok(counts)
}
