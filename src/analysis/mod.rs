//! Learning from exemplars

/// PNG exemplar decoding
pub mod patterns;
/// Adjacency rule extraction
pub mod rules;
