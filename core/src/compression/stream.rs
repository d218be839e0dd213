//! compression/stream.rs
//! Drive streaming sessions between a reader and a writer in chunk_size blocks.
use std::io::{self, ErrorKind, Read, Write};

use crate::compression::constants::MAX_CHUNK_SIZE;
use crate::compression::types::{CodecError, Compressor, Decompressor};

fn check_chunk_size(chunk_size: usize) -> Result<(), CodecError> {
    if chunk_size == 0 || chunk_size > MAX_CHUNK_SIZE {
        return Err(CodecError::InvalidState(format!(
            "chunk size {} outside 1..={}",
            chunk_size, MAX_CHUNK_SIZE
        )));
    }
    Ok(())
}

fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(buf) {
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            other => return other,
        }
    }
}

/// Compress everything `reader` yields into `writer`, then end the stream.
/// Returns the number of compressed bytes written.
pub fn compress_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    compressor: &mut dyn Compressor,
    chunk_size: usize,
) -> Result<u64, CodecError> {
    check_chunk_size(chunk_size)?;
    let mut input = vec![0u8; chunk_size];
    let mut output = vec![0u8; chunk_size];
    let mut total = 0u64;

    loop {
        let n = read_chunk(&mut reader, &mut input)?;
        if n == 0 {
            break;
        }
        let mut pending = &input[..n];
        while !pending.is_empty() {
            let result = compressor.compress(pending, &mut output)?;
            if result.bytes_read == 0 && result.bytes_written == 0 {
                return Err(CodecError::EngineContract(
                    "compressor made no progress with a free output buffer".into(),
                ));
            }
            writer.write_all(&output[..result.bytes_written])?;
            total += result.bytes_written as u64;
            pending = &pending[result.bytes_read..];
        }
    }

    loop {
        let result = compressor.end(&mut output)?;
        writer.write_all(&output[..result.bytes_written])?;
        total += result.bytes_written as u64;
        if !result.should_retry {
            break;
        }
    }
    writer.flush()?;
    Ok(total)
}

/// Decompress one stream from `reader` into `writer`.
/// Bytes after the end-of-stream marker are left unread or ignored.
/// Returns the number of decompressed bytes written.
pub fn decompress_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    decompressor: &mut dyn Decompressor,
    chunk_size: usize,
) -> Result<u64, CodecError> {
    check_chunk_size(chunk_size)?;
    let mut input = vec![0u8; chunk_size];
    let mut output = vec![0u8; chunk_size];
    let mut total = 0u64;

    'read: loop {
        let n = read_chunk(&mut reader, &mut input)?;
        if n == 0 {
            break;
        }
        let mut pending = &input[..n];
        loop {
            let result = decompressor.decompress(pending, &mut output)?;
            writer.write_all(&output[..result.bytes_written])?;
            total += result.bytes_written as u64;
            pending = &pending[result.bytes_read..];

            if decompressor.is_finished() {
                break 'read;
            }
            if result.bytes_read == 0 && result.bytes_written == 0 {
                if pending.is_empty() {
                    break;
                }
                return Err(CodecError::EngineContract(
                    "decompressor made no progress with a free output buffer".into(),
                ));
            }
            // A full output buffer may leave decoded bytes inside the engine.
            if pending.is_empty() && result.bytes_written < output.len() {
                break;
            }
        }
    }

    if !decompressor.is_finished() {
        return Err(CodecError::CorruptInput(
            "compressed stream ended before its end-of-stream marker".into(),
        ));
    }
    writer.flush()?;
    Ok(total)
}
