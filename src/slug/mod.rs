//! Publication slug generation, normalization and fuzzy resolution.
pub mod generator;
pub mod normalize;
pub mod resolver;
