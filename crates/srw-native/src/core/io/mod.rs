//! Provides input/output functionality for SRW mesh files.
//!
//! The strict loader ([`dat::DatFile`]) splits the work between the header
//! decoder ([`header`]) and the value reader ([`values`]). The lenient loader
//! ([`dat::RawDatFile`]) keeps every leading comment line and decodes nothing.
//! Both sit behind the [`traits::GridFile`] interface.

pub mod config;
pub mod dat;
pub mod export;
pub mod header;
pub mod traits;
pub mod values;
