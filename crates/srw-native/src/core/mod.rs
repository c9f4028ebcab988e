//! # Core Module
//!
//! Data models, file I/O and numeric helpers for SRW mesh files.
//!
//! - **Data Models** ([`models`]) - Mesh metadata, axes and loaded file contents
//! - **File I/O** ([`io`]) - Reading, writing and exporting the SRW `.dat` format
//! - **Utilities** ([`utils`]) - Array reductions and in-place transforms

pub mod io;
pub mod models;
pub mod utils;
