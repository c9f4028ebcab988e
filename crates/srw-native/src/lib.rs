//! # SRW Native Core Library
//!
//! Native helpers for the SRW simulation tools: a parser for the SRW text mesh
//! format (`.dat` files with a fixed ten-line header followed by a flat grid of
//! values) and a pair of array utilities.
//!
//! ## Layout
//!
//! - **[`core::models`]**: Owned data produced by the loaders (`MeshMetadata`,
//!   `MeshData`, `RawDat`) and the `Axis` view over one mesh dimension.
//! - **[`core::io`]**: The header decoder, the value reader, the strict and lenient
//!   file loaders, the mesh writer and the CSV grid exporter.
//! - **[`core::utils`]**: Array sum and in-place scaling.
//!
//! Everything here is synchronous and returns owned values. Host bindings (C ABI,
//! Python) live in their own crates and copy data out at the boundary.

pub mod core;

pub use crate::core::io::dat::{DatError, DatFile, RawDatFile, load_file, load_raw_file};
pub use crate::core::models::data::{MeshData, RawDat};
pub use crate::core::models::mesh::{Axis, MeshMetadata};
pub use crate::core::utils::array::{scale, sum};
