//! Selector engine: tokenizer, parser, normalizer, ordering, rendering.

pub mod tokenizer;
pub mod model;
pub mod parser;
pub mod normalize;
pub mod ordering;
pub mod render;
pub mod stylesheet;
