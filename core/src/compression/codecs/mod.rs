//! compression/codecs/mod.rs
//! Concrete codec backends.
//!
//! - `deflate`: streaming sessions over the software engine.
//! - `gzip`: the software codec (one-shot + session factory).
//! - `accelerated`: one-shot codec over a hardware accelerator.

pub mod accelerated;
pub mod deflate;
pub mod gzip;

pub use accelerated::*;
pub use deflate::*;
pub use gzip::*;
