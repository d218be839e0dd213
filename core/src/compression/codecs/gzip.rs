//! compression/codecs/gzip.rs
//! Software gzip codec: one-shot transforms plus a streaming session factory.
//!
//! zlib keeps one mutable session per direction and the codec owns a single
//! engine slot, so only one direction is live at a time. Switching direction
//! tears the old session down and builds the other one; interleaving one-shot
//! compress and decompress calls is always correct, it just pays a
//! re-initialization on each switch.

use flate2::{FlushCompress, FlushDecompress, Status};
use tracing::trace;

use crate::compression::codecs::deflate::{DeflateCompressor, DeflateDecompressor};
use crate::compression::constants::MAX_LEN_PESSIMISM;
use crate::compression::engine::{deflate_bound, DeflateEngine, InflateEngine};
use crate::compression::registry::resolve;
use crate::compression::types::{
    BackendKind, Codec, CodecError, CompressionLevel, CompressionType, Compressor, Decompressor, Format,
};

const CODEC_NAME: &str = "gzip";

enum Direction {
    Idle,
    Compressing(DeflateEngine),
    Decompressing(InflateEngine),
}

impl Direction {
    fn name(&self) -> &'static str {
        match self {
            Direction::Idle => "idle",
            Direction::Compressing(_) => "compressing",
            Direction::Decompressing(_) => "decompressing",
        }
    }
}

pub struct GzipCodec {
    level: i32,
    format: Format,
    direction: Direction,
}

impl GzipCodec {
    /// # Errors
    /// `BackendInit` if `level` is outside the gzip range.
    pub fn new(level: CompressionLevel, format: Format) -> Result<Self, CodecError> {
        let level = level.resolve(&resolve(CompressionType::Gzip))?;
        Ok(Self { level, format, direction: Direction::Idle })
    }

    fn compressing(&mut self) -> Result<&mut DeflateEngine, CodecError> {
        if !matches!(self.direction, Direction::Compressing(_)) {
            trace!(from = self.direction.name(), "gzip codec entering compression mode");
            // Release the inflate session before allocating the deflate one.
            self.direction = Direction::Idle;
            self.direction = Direction::Compressing(DeflateEngine::new(self.level, self.format)?);
        }
        match &mut self.direction {
            Direction::Compressing(engine) => Ok(engine),
            _ => Err(CodecError::InvalidState("gzip codec failed to enter compression mode".into())),
        }
    }

    fn decompressing(&mut self) -> Result<&mut InflateEngine, CodecError> {
        if !matches!(self.direction, Direction::Decompressing(_)) {
            trace!(from = self.direction.name(), "gzip codec entering decompression mode");
            self.direction = Direction::Idle;
            self.direction = Direction::Decompressing(InflateEngine::new(self.format));
        }
        match &mut self.direction {
            Direction::Decompressing(engine) => Ok(engine),
            _ => Err(CodecError::InvalidState("gzip codec failed to enter decompression mode".into())),
        }
    }
}

fn deflate_whole(engine: &mut DeflateEngine, input: &[u8], output: &mut [u8]) -> Result<usize, CodecError> {
    let (mut read, mut written) = (0, 0);
    loop {
        let step = engine.run(&input[read..], &mut output[written..], FlushCompress::Finish, "deflate")?;
        read += step.consumed;
        written += step.produced;
        if step.status == Status::StreamEnd {
            return Ok(written);
        }
        // Finish without stream end and without an error: output is undersized.
        if step.consumed == 0 && step.produced == 0 {
            return Err(CodecError::BufferTooSmall {
                codec: CODEC_NAME,
                input_len: input.len(),
                output_len: output.len(),
            });
        }
    }
}

fn inflate_whole(engine: &mut InflateEngine, input: &[u8], output: &mut [u8]) -> Result<usize, CodecError> {
    let (mut read, mut written) = (0, 0);
    loop {
        let step = engine.run(&input[read..], &mut output[written..], FlushDecompress::Finish)?;
        read += step.consumed;
        written += step.produced;
        if step.status == Status::StreamEnd {
            return Ok(written);
        }
        if step.consumed == 0 && step.produced == 0 {
            if written == output.len() {
                return Err(CodecError::BufferTooSmall {
                    codec: CODEC_NAME,
                    input_len: input.len(),
                    output_len: output.len(),
                });
            }
            return Err(CodecError::CorruptInput(format!(
                "truncated gzip stream: {} of {} input bytes consumed without reaching stream end",
                read,
                input.len()
            )));
        }
    }
}

impl Codec for GzipCodec {
    /// Activates compression, then decompression; the decompression session
    /// stays live afterwards.
    fn initialize(&mut self) -> Result<(), CodecError> {
        self.compressing()?;
        self.decompressing()?;
        Ok(())
    }

    fn compress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, CodecError> {
        let engine = self.compressing()?;
        let outcome = deflate_whole(engine, input, output);
        // Ready for the next independent stream, whatever happened.
        engine.reset();
        outcome
    }

    fn decompress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, CodecError> {
        if output.is_empty() {
            // Nothing requested, even if `input` holds data.
            return Ok(0);
        }
        let engine = self.decompressing()?;
        let outcome = inflate_whole(engine, input, output);
        engine.reset();
        outcome
    }

    fn max_compressed_len(&self, input_len: usize) -> usize {
        deflate_bound(input_len, self.format).saturating_add(MAX_LEN_PESSIMISM)
    }

    fn make_compressor(&self) -> Result<Box<dyn Compressor>, CodecError> {
        let mut compressor = DeflateCompressor::new(self.level);
        compressor.initialize(self.format)?;
        Ok(Box::new(compressor))
    }

    fn make_decompressor(&self) -> Result<Box<dyn Decompressor>, CodecError> {
        let mut decompressor = DeflateDecompressor::new(self.format);
        decompressor.initialize()?;
        Ok(Box::new(decompressor))
    }

    fn compression_type(&self) -> CompressionType {
        CompressionType::Gzip
    }

    fn compression_level(&self) -> Option<i32> {
        Some(self.level)
    }

    fn format(&self) -> Format {
        self.format
    }

    fn backend(&self) -> BackendKind {
        BackendKind::Software
    }
}
