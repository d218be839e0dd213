//! compression/mod.rs
//! One-shot and streaming compression with runtime backend selection.
//!
//! - `types`: the `Codec` / `Compressor` / `Decompressor` contracts and results.
//! - `registry`: codec metadata and the `make_codec` factory.
//! - `backend`: software vs. accelerator selection from configuration.
//! - `accelerator`: driver seam and per-thread accelerator sessions.
//! - `stream`: reader/writer helpers over streaming sessions.

pub mod accelerator;
pub mod backend;
pub mod codecs;
pub mod constants;
pub mod registry;
pub mod stream;
pub mod types;

mod engine;

pub use accelerator::*;
pub use backend::*;
pub use constants::*;
pub use registry::*;
pub use stream::*;
pub use types::*;
