//! Owned data structures produced by the file loaders.

pub mod data;
pub mod mesh;
