//! Raster image access for the darkroom tools.
//!
//! This crate covers the pixel side of the pipeline: decoding a file
//! into a flat 8-bit buffer, splitting that buffer into per-row views
//! for parallel processing, re-encoding the result as PNG, and the
//! row transform itself.

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod codec;
pub use codec::*;

mod invert;
pub use invert::*;
