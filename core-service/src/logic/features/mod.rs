//! Features Module - classifier input vectors

pub mod vector;

// Re-export common types
pub use vector::FeatureVector;
