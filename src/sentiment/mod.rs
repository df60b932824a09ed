// Sentence-level polarity scoring and document-level aggregation.

pub mod aggregate;
pub mod lexicon;
pub mod traits;
pub mod vader;
