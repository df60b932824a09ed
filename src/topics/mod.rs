// Topic modeling: chunked pseudo-documents, a pruned term dictionary and a
// pluggable TopicModel (collapsed Gibbs LDA by default).

pub mod dictionary;
pub mod extractor;
pub mod lda;
pub mod traits;
