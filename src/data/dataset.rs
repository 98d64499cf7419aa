use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{Result, W2vError};

/// One center word and the ordered words around it. Repeats are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub center: String,
    pub words: Vec<String>,
}

impl Context {
    pub fn new<S: Into<String>, I, W>(center: S, words: I) -> Context
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        Context {
            center: center.into(),
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}

/// Source of random vocabulary draws.
///
/// Negative sampling calls `sample_token_idx`; the estimator calls
/// `get_random_context`. Implementations own their random state, so two
/// instances built from the same seed produce the same sequence.
pub trait Dataset {
    /// A random vocabulary index; uniform or corpus-weighted.
    fn sample_token_idx(&mut self) -> usize;

    /// A random center word with at most `2 * c` context words.
    fn get_random_context(&mut self, c: usize) -> Context;
}

/// Uniform sampler over a fixed word list.
///
/// `get_random_context(c)` always returns exactly `2 * c` context words, each
/// drawn independently, so the center may reappear in its own context.
pub struct UniformDataset {
    words: Vec<String>,
    rng: ChaCha8Rng,
}

impl UniformDataset {
    pub fn new<I, S>(words: I, seed: u64) -> Result<UniformDataset>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.is_empty() {
            return Err(W2vError::config("a dataset needs at least one word"));
        }
        Ok(UniformDataset { words, rng: ChaCha8Rng::seed_from_u64(seed) })
    }

    fn random_word(&mut self) -> String {
        let i = self.rng.gen_range(0..self.words.len());
        self.words[i].clone()
    }
}

impl Dataset for UniformDataset {
    fn sample_token_idx(&mut self) -> usize {
        self.rng.gen_range(0..self.words.len())
    }

    fn get_random_context(&mut self, c: usize) -> Context {
        let center = self.random_word();
        let words = (0..2 * c).map(|_| self.random_word()).collect();
        Context { center, words }
    }
}
