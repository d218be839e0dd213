//! compression/codecs/accelerated.rs
//! Hardware-offload gzip codec. One-shot only.

use std::sync::Arc;

use crate::compression::accelerator::{with_thread_session, AcceleratorDriver};
use crate::compression::types::{
    BackendKind, Codec, CodecError, CompressionType, Compressor, Decompressor, Format,
};

/// Delegates to the calling thread's accelerator session.
///
/// Streaming is not offered: callers that need a `Compressor` or
/// `Decompressor` get `UnsupportedOperation` and must pick the software
/// backend themselves.
pub struct AcceleratedCodec {
    driver: Arc<dyn AcceleratorDriver>,
}

impl AcceleratedCodec {
    pub fn new(driver: Arc<dyn AcceleratorDriver>) -> Self {
        Self { driver }
    }

    pub fn driver_name(&self) -> &'static str {
        self.driver.name()
    }
}

impl Codec for AcceleratedCodec {
    fn compress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, CodecError> {
        let name = self.driver.name();
        with_thread_session(self.driver.as_ref(), |session| session.compress(input, output))?
            .map_err(|status| CodecError::Backend { backend: name, op: "compression", msg: status.to_string() })
    }

    fn decompress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, CodecError> {
        if output.is_empty() {
            return Ok(0);
        }
        let name = self.driver.name();
        with_thread_session(self.driver.as_ref(), |session| session.decompress(input, output))?
            .map_err(|status| CodecError::Backend { backend: name, op: "decompression", msg: status.to_string() })
    }

    fn max_compressed_len(&self, input_len: usize) -> usize {
        self.driver.max_compressed_len(input_len)
    }

    fn make_compressor(&self) -> Result<Box<dyn Compressor>, CodecError> {
        Err(CodecError::UnsupportedOperation(format!(
            "streaming compression unsupported with {}",
            self.driver.name()
        )))
    }

    fn make_decompressor(&self) -> Result<Box<dyn Decompressor>, CodecError> {
        Err(CodecError::UnsupportedOperation(format!(
            "streaming decompression unsupported with {}",
            self.driver.name()
        )))
    }

    fn compression_type(&self) -> CompressionType {
        CompressionType::Gzip
    }

    fn compression_level(&self) -> Option<i32> {
        None
    }

    fn format(&self) -> Format {
        Format::Gzip
    }

    fn backend(&self) -> BackendKind {
        BackendKind::Accelerated
    }
}
