//! Optional features module.
//!
//! Compression backends live here, apart from the core word encoding.

pub mod compression;
