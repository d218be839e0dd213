//! compression/engine.rs
//! Thin session wrappers over the flate2 deflate/inflate state machines.
//!
//! Both wrappers report progress as deltas of the engine's running totals, so
//! callers never inspect raw stream counters themselves.
use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};

use crate::compression::constants::{
    GZIP_MAX_LEVEL, GZIP_MIN_LEVEL, GZIP_WRAPPER_LEN, WINDOW_BITS, ZLIB_WRAPPER_LEN,
};
use crate::compression::types::{CodecError, Format};

pub(crate) const ZLIB_BACKEND: &str = "zlib";

/// Outcome of a single engine call.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Step {
    pub consumed: usize,
    pub produced: usize,
    pub status: Status,
}

/// Conservative deflate bound for any level/strategy, plus framing.
pub(crate) fn deflate_bound(input_len: usize, format: Format) -> usize {
    let wrapper = match format {
        Format::Deflate => 0,
        Format::Zlib => ZLIB_WRAPPER_LEN,
        Format::Gzip => GZIP_WRAPPER_LEN,
    };
    input_len
        .saturating_add(input_len.saturating_add(7) >> 3)
        .saturating_add(input_len.saturating_add(63) >> 6)
        .saturating_add(5)
        .saturating_add(wrapper)
}

fn engine_msg(msg: Option<&str>) -> String {
    msg.unwrap_or("(unknown error)").to_string()
}

pub(crate) struct DeflateEngine {
    inner: Compress,
}

impl DeflateEngine {
    /// # Errors
    /// `BackendInit` if zlib would reject the level.
    pub fn new(level: i32, format: Format) -> Result<Self, CodecError> {
        // deflateInit2 refuses these; flate2 would abort on them.
        if !(GZIP_MIN_LEVEL..=GZIP_MAX_LEVEL).contains(&level) {
            return Err(CodecError::BackendInit {
                backend: ZLIB_BACKEND,
                msg: format!("deflateInit2 rejected compression level {}", level),
            });
        }
        let level = Compression::new(level as u32);
        let inner = match format {
            Format::Deflate => Compress::new_with_window_bits(level, false, WINDOW_BITS),
            Format::Zlib => Compress::new_with_window_bits(level, true, WINDOW_BITS),
            Format::Gzip => Compress::new_gzip(level, WINDOW_BITS),
        };
        Ok(Self { inner })
    }

    pub fn run(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushCompress,
        op: &'static str,
    ) -> Result<Step, CodecError> {
        let before_in = self.inner.total_in();
        let before_out = self.inner.total_out();
        let status = self
            .inner
            .compress(input, output, flush)
            .map_err(|e| CodecError::Backend {
                backend: ZLIB_BACKEND,
                op,
                msg: engine_msg(e.message()),
            })?;
        Ok(Step {
            consumed: (self.inner.total_in() - before_in) as usize,
            produced: (self.inner.total_out() - before_out) as usize,
            status,
        })
    }

    /// Keep parameters, drop all stream state.
    pub fn reset(&mut self) {
        self.inner.reset();
    }
}

pub(crate) struct InflateEngine {
    inner: Decompress,
    format: Format,
}

impl InflateEngine {
    pub fn new(format: Format) -> Self {
        Self { inner: Self::open(format), format }
    }

    fn open(format: Format) -> Decompress {
        match format {
            Format::Deflate => Decompress::new_with_window_bits(false, WINDOW_BITS),
            Format::Zlib => Decompress::new_with_window_bits(true, WINDOW_BITS),
            Format::Gzip => Decompress::new_gzip(WINDOW_BITS),
        }
    }

    pub fn run(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushDecompress,
    ) -> Result<Step, CodecError> {
        let before_in = self.inner.total_in();
        let before_out = self.inner.total_out();
        let status = self
            .inner
            .decompress(input, output, flush)
            .map_err(|e| CodecError::CorruptInput(format!("zlib inflate failed: {}", engine_msg(e.message()))))?;
        Ok(Step {
            consumed: (self.inner.total_in() - before_in) as usize,
            produced: (self.inner.total_out() - before_out) as usize,
            status,
        })
    }

    pub fn reset(&mut self) {
        match self.format {
            // flate2's in-place reset only knows raw and zlib window bits.
            Format::Gzip => self.inner = Self::open(Format::Gzip),
            Format::Zlib => self.inner.reset(true),
            Format::Deflate => self.inner.reset(false),
        }
    }
}
