// Resume ↔ job description matching.
// Implements: text normalization, PDF extraction, embedding, cosine scoring, keyword diff.
// The endpoint in `handlers` is the only caller that stitches these together.

pub mod encoder;
pub mod extract;
pub mod handlers;
pub mod keywords;
pub mod normalize;
pub mod similarity;
