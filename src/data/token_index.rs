use std::collections::HashMap;

use crate::error::{Result, W2vError};

/// Bijective mapping between vocabulary words and matrix row indices.
#[derive(Debug, Clone, Default)]
pub struct TokenIndex {
    index: HashMap<String, usize>,
    words: Vec<String>,
}

impl TokenIndex {
    /// Assigns index `i` to the `i`-th word. A repeated word is rejected.
    pub fn from_words<I, S>(words: I) -> Result<TokenIndex>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens = TokenIndex::default();
        for word in words {
            let word = word.into();
            if tokens.index.contains_key(&word) {
                return Err(W2vError::config(format!("duplicate vocabulary word {word:?}")));
            }
            tokens.index.insert(word.clone(), tokens.words.len());
            tokens.words.push(word);
        }
        Ok(tokens)
    }

    pub fn index_of(&self, word: &str) -> Result<usize> {
        self.index
            .get(word)
            .copied()
            .ok_or_else(|| W2vError::UnknownWord(word.to_string()))
    }

    pub fn word(&self, index: usize) -> Result<&str> {
        self.words
            .get(index)
            .map(String::as_str)
            .ok_or(W2vError::IndexOutOfRange { index, len: self.words.len() })
    }

    /// Words in index order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
