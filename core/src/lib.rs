//! codec-core
//!
//! Pluggable compression layer: one-shot and streaming codecs behind one
//! interface, with the backend (software or hardware offload) chosen at
//! runtime.

#![forbid(unsafe_code)]

pub mod compression;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{
        make_codec, make_codec_with, BackendConfig, BackendKind, Codec, CodecError, CompressResult,
        CompressionLevel, CompressionType, Compressor, DecompressResult, Decompressor, EndResult,
        FlushResult, Format,
    };
}
