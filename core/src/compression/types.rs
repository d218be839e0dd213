//! compression/types.rs
//! Codec contracts, progress results and the unified codec error.
use std::fmt;
use num_enum::TryFromPrimitive;
use thiserror::Error;

use crate::compression::constants::codec_ids;
use crate::compression::registry::CodecInfo;

/// Algorithm identifiers understood by the codec factory.
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum CompressionType {
    Uncompressed = codec_ids::UNCOMPRESSED,
    Snappy       = codec_ids::SNAPPY,
    Gzip         = codec_ids::GZIP,
    Brotli       = codec_ids::BROTLI,
    Zstd         = codec_ids::ZSTD,
    Lz4          = codec_ids::LZ4,
    Lz4Frame     = codec_ids::LZ4_FRAME,
    Lzo          = codec_ids::LZO,
    Bz2          = codec_ids::BZ2,
}

impl CompressionType {
    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            CompressionType::Uncompressed => "uncompressed",
            CompressionType::Snappy       => "snappy",
            CompressionType::Gzip         => "gzip",
            CompressionType::Brotli       => "brotli",
            CompressionType::Zstd         => "zstd",
            CompressionType::Lz4          => "lz4_raw",
            CompressionType::Lz4Frame     => "lz4",
            CompressionType::Lzo          => "lzo",
            CompressionType::Bz2          => "bz2",
        }
    }

    /// Parse a codec name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Result<Self, CodecError> {
        let lowered = name.trim().to_ascii_lowercase();
        let ty = match lowered.as_str() {
            "none" | "uncompressed" => CompressionType::Uncompressed,
            "snappy"                => CompressionType::Snappy,
            "gzip"                  => CompressionType::Gzip,
            "brotli"                => CompressionType::Brotli,
            "zstd"                  => CompressionType::Zstd,
            "lz4_raw"               => CompressionType::Lz4,
            "lz4"                   => CompressionType::Lz4Frame,
            "lzo"                   => CompressionType::Lzo,
            "bz2"                   => CompressionType::Bz2,
            _ => return Err(CodecError::UnknownCodec(name.to_string())),
        };
        Ok(ty)
    }

    /// Look up a type from its stable id.
    pub fn from_id(raw: u16) -> Result<Self, CodecError> {
        Self::try_from_primitive(raw)
            .map_err(|_| CodecError::UnknownCodec(format!("0x{:04x}", raw)))
    }
}

impl fmt::Display for CompressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Framing wrapped around the deflate payload.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Format {
    /// Raw deflate, no header or trailer.
    Deflate,
    /// RFC 1950 zlib wrapper (adler32 trailer).
    Zlib,
    /// RFC 1952 gzip wrapper (crc32 trailer).
    #[default]
    Gzip,
}

/// Requested compression effort.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Use the algorithm's default.
    #[default]
    Default,
    Level(i32),
}

impl CompressionLevel {
    /// Resolve to a concrete level for the given codec.
    ///
    /// # Errors
    /// `BackendInit` when the level falls outside the codec's range.
    pub fn resolve(self, info: &CodecInfo) -> Result<i32, CodecError> {
        match self {
            CompressionLevel::Default => Ok(info.default_level),
            CompressionLevel::Level(level) if (info.min_level..=info.max_level).contains(&level) => Ok(level),
            CompressionLevel::Level(level) => Err(CodecError::BackendInit {
                backend: info.name,
                msg: format!(
                    "invalid compression level {} (expected {}..={})",
                    level, info.min_level, info.max_level
                ),
            }),
        }
    }
}

impl From<i32> for CompressionLevel {
    fn from(level: i32) -> Self {
        CompressionLevel::Level(level)
    }
}

/// Which concrete backend a codec runs on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BackendKind {
    /// In-process zlib engine.
    Software,
    /// Hardware accelerator session (one-shot only).
    Accelerated,
}

/// Progress of one streaming `compress` call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CompressResult {
    pub bytes_read: usize,
    pub bytes_written: usize,
}

/// Progress of one `flush` call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FlushResult {
    pub bytes_written: usize,
    /// Output was filled; call `flush` again with a fresh buffer.
    pub should_retry: bool,
}

/// Progress of one `end` call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EndResult {
    pub bytes_written: usize,
    /// Trailer not fully written; call `end` again with a fresh buffer.
    pub should_retry: bool,
}

/// Progress of one streaming `decompress` call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DecompressResult {
    pub bytes_read: usize,
    pub bytes_written: usize,
    /// No progress was possible only because the output buffer was exhausted.
    pub need_more_output: bool,
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("{backend} init failed: {msg}")]
    BackendInit { backend: &'static str, msg: String },

    #[error("{backend} {op} failed: {msg}")]
    Backend { backend: &'static str, op: &'static str, msg: String },

    #[error("too small a buffer passed to {codec} codec: input_len={input_len} output_len={output_len}")]
    BufferTooSmall { codec: &'static str, input_len: usize, output_len: usize },

    #[error("corrupt compressed input: {0}")]
    CorruptInput(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("not implemented: {0}")]
    NotImplemented(String),

    #[error("unknown compression codec: {0}")]
    UnknownCodec(String),

    #[error("invalid codec state: {0}")]
    InvalidState(String),

    #[error("engine contract violated: {0}")]
    EngineContract(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Streaming compression session. One instance serves exactly one stream.
pub trait Compressor: Send {
    /// Feed `input`, writing compressed bytes to `output` without flushing.
    fn compress(&mut self, input: &[u8], output: &mut [u8]) -> Result<CompressResult, CodecError>;

    /// Emit all buffered compressed data without ending the stream.
    fn flush(&mut self, output: &mut [u8]) -> Result<FlushResult, CodecError>;

    /// Write the stream trailer. Once `should_retry` is false the session is closed.
    fn end(&mut self, output: &mut [u8]) -> Result<EndResult, CodecError>;
}

/// Streaming decompression session.
pub trait Decompressor: Send {
    fn decompress(&mut self, input: &[u8], output: &mut [u8]) -> Result<DecompressResult, CodecError>;

    /// Prepare for a new, independent compressed stream.
    fn reset(&mut self) -> Result<(), CodecError>;

    /// True once the end-of-stream marker has been decoded.
    fn is_finished(&self) -> bool;
}

/// One algorithm/level/format choice, usable one-shot or as a session factory.
pub trait Codec: Send {
    /// Eagerly set up engine state so the first call pays no lazy-init cost.
    fn initialize(&mut self) -> Result<(), CodecError> {
        Ok(())
    }

    /// Compress the whole of `input` into `output`, returning the bytes written.
    fn compress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, CodecError>;

    /// Decompress the whole of `input` into `output`, returning the bytes written.
    fn decompress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, CodecError>;

    /// Output capacity that always suffices for `compress` of `input_len` bytes.
    fn max_compressed_len(&self, input_len: usize) -> usize;

    fn make_compressor(&self) -> Result<Box<dyn Compressor>, CodecError>;

    fn make_decompressor(&self) -> Result<Box<dyn Decompressor>, CodecError>;

    fn compression_type(&self) -> CompressionType;

    /// Resolved level, or `None` when the backend ignores levels.
    fn compression_level(&self) -> Option<i32>;

    fn format(&self) -> Format;

    fn backend(&self) -> BackendKind;
}
