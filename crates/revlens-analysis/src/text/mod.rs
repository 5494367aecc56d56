//! Review text preparation.

pub mod normalizer;

pub use normalizer::{normalize, normalize_opt, NORMALIZER_VERSION};
