pub mod corpus;
pub mod dataset;
pub mod token_index;

pub use corpus::CorpusDataset;
pub use dataset::{Context, Dataset, UniformDataset};
pub use token_index::TokenIndex;
