//! Username generator for sniping

use super::Charset;
use crate::error::{Result, UsernameForgeError};

/// Lazy cursor over every username of a fixed length.
///
/// The only state is an index into the fixed-radix counter, so taking the
/// first few names never touches the rest of the space.
#[derive(Debug, Clone)]
pub struct UsernameGenerator {
    charset: Charset,
    length: usize,
    current_index: u64,
    total: u64,
}

impl UsernameGenerator {
    /// Create a new generator for usernames of given length
    pub fn new(length: usize, charset: Charset) -> Result<Self> {
        let total = charset.total_combinations(length).ok_or_else(|| {
            UsernameForgeError::validation(format!(
                "{} usernames of length {} do not fit in a 64-bit counter",
                charset.chars().len(),
                length
            ))
        })?;

        Ok(Self {
            charset,
            length,
            current_index: 0,
            total,
        })
    }

    /// Get total number of combinations
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Get current progress index
    pub fn current_index(&self) -> u64 {
        self.current_index
    }

    /// Restart the sequence from the first username
    pub fn reset(&mut self) {
        self.current_index = 0;
    }

    /// Generate username at specific index, leftmost character varying slowest
    pub fn username_at(&self, index: u64) -> Option<String> {
        if index >= self.total {
            return None;
        }

        let chars = self.charset.chars();
        let base = chars.len() as u64;
        let mut result = vec![' '; self.length];
        let mut n = index;

        for i in (0..self.length).rev() {
            result[i] = chars[(n % base) as usize];
            n /= base;
        }

        Some(result.into_iter().collect())
    }

    /// Check if generator is exhausted
    pub fn is_exhausted(&self) -> bool {
        self.current_index >= self.total
    }

    /// Remaining count
    pub fn remaining(&self) -> u64 {
        self.total.saturating_sub(self.current_index)
    }
}

impl Iterator for UsernameGenerator {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let username = self.username_at(self.current_index)?;
        self.current_index += 1;
        Some(username)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining()).ok();
        (remaining.unwrap_or(usize::MAX), remaining)
    }
}
