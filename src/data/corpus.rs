use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::data::dataset::{Context, Dataset};
use crate::data::token_index::TokenIndex;
use crate::error::{Result, W2vError};

/// Exponent applied to unigram counts for the negative-sampling distribution.
pub const UNIGRAM_POWER: f64 = 0.75;

/// Dataset over an in-memory tokenized corpus.
///
/// Negatives follow the unigram distribution raised to `UNIGRAM_POWER`.
/// Contexts come from a random position in a random sentence.
pub struct CorpusDataset {
    words: Vec<String>,
    /// Sentences as token indices; only sentences with at least two tokens.
    sentences: Vec<Vec<usize>>,
    negatives: WeightedIndex<f64>,
    rng: ChaCha8Rng,
}

impl CorpusDataset {
    pub fn new<S: AsRef<str>>(
        sentences: &[Vec<S>],
        tokens: &TokenIndex,
        seed: u64,
    ) -> Result<CorpusDataset> {
        let mut counts = vec![0usize; tokens.len()];
        let mut indexed = Vec::with_capacity(sentences.len());

        for sentence in sentences {
            let ids = sentence
                .iter()
                .map(|w| tokens.index_of(w.as_ref()))
                .collect::<Result<Vec<_>>>()?;
            ids.iter().for_each(|&i| counts[i] += 1);
            if ids.len() >= 2 {
                indexed.push(ids);
            }
        }

        if indexed.is_empty() {
            return Err(W2vError::config("corpus has no sentence with at least two words"));
        }

        let weights: Vec<f64> = counts.iter().map(|&c| (c as f64).powf(UNIGRAM_POWER)).collect();
        let negatives = WeightedIndex::new(&weights)
            .map_err(|e| W2vError::config(format!("invalid unigram weights: {e}")))?;

        Ok(CorpusDataset {
            words: tokens.words().to_vec(),
            sentences: indexed,
            negatives,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    pub fn num_sentences(&self) -> usize {
        self.sentences.len()
    }
}

impl Dataset for CorpusDataset {
    fn sample_token_idx(&mut self) -> usize {
        self.negatives.sample(&mut self.rng)
    }

    fn get_random_context(&mut self, c: usize) -> Context {
        // Every kept sentence has two tokens, so any c >= 1 yields a
        // non-empty context; c == 0 yields none.
        let sentence = &self.sentences[self.rng.gen_range(0..self.sentences.len())];
        let pos = self.rng.gen_range(0..sentence.len());

        let lo = pos.saturating_sub(c);
        let hi = (pos + c + 1).min(sentence.len());
        let words = (lo..hi)
            .filter(|&j| j != pos)
            .map(|j| self.words[sentence[j]].clone())
            .collect();

        Context { center: self.words[sentence[pos]].clone(), words }
    }
}
