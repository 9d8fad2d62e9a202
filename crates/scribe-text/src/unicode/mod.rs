//! Encoding boundaries for the pipeline.
//!
//! Every stage works on `char` sequences; UTF-16 input is decoded once at
//! the edge and re-encoded on the way out.

pub mod utf16;

pub use utf16::{decode, encode, encoded_len};
