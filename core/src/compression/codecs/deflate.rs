//! compression/codecs/deflate.rs
//! Streaming deflate sessions (raw, zlib or gzip framing) over flate2.

use flate2::{FlushCompress, FlushDecompress, Status};

use crate::compression::engine::{DeflateEngine, InflateEngine};
use crate::compression::types::{
    CodecError, CompressResult, Compressor, DecompressResult, Decompressor, EndResult, FlushResult, Format,
};

enum CompressorState {
    Created,
    Active(DeflateEngine),
    /// `end` completed; the engine has been released.
    Closed,
}

/// Streaming compressor. Drive with `compress`, optionally `flush`, then
/// `end` until it stops asking for a retry.
pub struct DeflateCompressor {
    level: i32,
    state: CompressorState,
}

impl DeflateCompressor {
    pub fn new(level: i32) -> Self {
        Self { level, state: CompressorState::Created }
    }

    /// Configure framing and level.
    ///
    /// # Errors
    /// - `InvalidState` if already initialized.
    /// - `BackendInit` if the engine rejects the level/format combination.
    pub fn initialize(&mut self, format: Format) -> Result<(), CodecError> {
        if !matches!(self.state, CompressorState::Created) {
            return Err(CodecError::InvalidState("compressor already initialized".into()));
        }
        self.state = CompressorState::Active(DeflateEngine::new(self.level, format)?);
        Ok(())
    }

    fn engine(&mut self) -> Result<&mut DeflateEngine, CodecError> {
        match &mut self.state {
            CompressorState::Active(engine) => Ok(engine),
            CompressorState::Created => Err(CodecError::InvalidState("compressor not initialized".into())),
            CompressorState::Closed => Err(CodecError::InvalidState("compressor already ended".into())),
        }
    }
}

fn require_output(output: &[u8], op: &str) -> Result<(), CodecError> {
    if output.is_empty() {
        return Err(CodecError::InvalidState(format!("{} needs a non-empty output buffer", op)));
    }
    Ok(())
}

impl Compressor for DeflateCompressor {
    fn compress(&mut self, input: &[u8], output: &mut [u8]) -> Result<CompressResult, CodecError> {
        let step = self.engine()?.run(input, output, FlushCompress::None, "compress")?;
        match step.status {
            // BufError means no progress was possible; both deltas are zero.
            Status::Ok | Status::BufError => Ok(CompressResult {
                bytes_read: step.consumed,
                bytes_written: step.produced,
            }),
            Status::StreamEnd => Err(CodecError::EngineContract(
                "deflate reported stream end without a finish request".into(),
            )),
        }
    }

    fn flush(&mut self, output: &mut [u8]) -> Result<FlushResult, CodecError> {
        require_output(output, "flush")?;
        let step = self.engine()?.run(&[], output, FlushCompress::Sync, "flush")?;
        if step.status == Status::StreamEnd {
            return Err(CodecError::EngineContract(
                "deflate reported stream end during a sync flush".into(),
            ));
        }
        // A full output buffer may hide more pending bytes.
        Ok(FlushResult {
            bytes_written: step.produced,
            should_retry: step.produced == output.len(),
        })
    }

    fn end(&mut self, output: &mut [u8]) -> Result<EndResult, CodecError> {
        require_output(output, "end")?;
        let step = self.engine()?.run(&[], output, FlushCompress::Finish, "end")?;
        if step.status == Status::StreamEnd {
            self.state = CompressorState::Closed;
            return Ok(EndResult { bytes_written: step.produced, should_retry: false });
        }
        Ok(EndResult { bytes_written: step.produced, should_retry: true })
    }
}

/// Streaming decompressor for one compressed stream at a time.
pub struct DeflateDecompressor {
    format: Format,
    engine: Option<InflateEngine>,
    finished: bool,
    /// `reset` ran since the last `initialize`.
    reset_since_init: bool,
}

impl DeflateDecompressor {
    pub fn new(format: Format) -> Self {
        Self { format, engine: None, finished: false, reset_since_init: false }
    }

    /// # Errors
    /// `InvalidState` if already initialized and not `reset` since.
    pub fn initialize(&mut self) -> Result<(), CodecError> {
        if self.engine.is_some() && !self.reset_since_init {
            return Err(CodecError::InvalidState("decompressor already initialized".into()));
        }
        if let Some(engine) = self.engine.as_mut() {
            engine.reset();
        } else {
            self.engine = Some(InflateEngine::new(self.format));
        }
        self.finished = false;
        self.reset_since_init = false;
        Ok(())
    }
}

impl Decompressor for DeflateDecompressor {
    fn decompress(&mut self, input: &[u8], output: &mut [u8]) -> Result<DecompressResult, CodecError> {
        if self.finished {
            return Err(CodecError::InvalidState("stream already finished, reset before reuse".into()));
        }
        let engine = self
            .engine
            .as_mut()
            .ok_or_else(|| CodecError::InvalidState("decompressor not initialized".into()))?;

        let step = engine.run(input, output, FlushDecompress::None)?;
        self.finished = step.status == Status::StreamEnd;

        let stalled = step.consumed == 0 && step.produced == 0 && !self.finished;
        Ok(DecompressResult {
            bytes_read: step.consumed,
            bytes_written: step.produced,
            need_more_output: stalled && !input.is_empty(),
        })
    }

    fn reset(&mut self) -> Result<(), CodecError> {
        let engine = self
            .engine
            .as_mut()
            .ok_or_else(|| CodecError::InvalidState("decompressor not initialized".into()))?;
        engine.reset();
        self.finished = false;
        self.reset_since_init = true;
        Ok(())
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
