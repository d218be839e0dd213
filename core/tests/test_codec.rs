#[cfg(test)]
mod tests {
    use codec_core::compression::{
        codecs::GzipCodec, BackendKind, Codec, CodecError, CompressionLevel, CompressionType, Format,
    };
    use rand::{rngs::StdRng, RngCore, SeedableRng};

    const FORMATS: [Format; 3] = [Format::Deflate, Format::Zlib, Format::Gzip];

    fn codec(level: CompressionLevel, format: Format) -> GzipCodec {
        GzipCodec::new(level, format).expect("valid gzip codec")
    }

    fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
        let mut buf = vec![0u8; len];
        StdRng::seed_from_u64(seed).fill_bytes(&mut buf);
        buf
    }

    fn compress_all(codec: &mut dyn Codec, input: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; codec.max_compressed_len(input.len())];
        let n = codec.compress(input, &mut out).expect("compress ok");
        out.truncate(n);
        out
    }

    fn decompress_all(codec: &mut dyn Codec, input: &[u8], expected_len: usize) -> Vec<u8> {
        let mut out = vec![0u8; expected_len.max(1)];
        let n = codec.decompress(input, &mut out).expect("decompress ok");
        out.truncate(n);
        out
    }

    // --- Round trips ---

    #[test]
    fn quick_brown_fox_gzip_roundtrip() {
        let text = b"The quick brown fox jumps over the lazy dog";
        let mut c = codec(CompressionLevel::Default, Format::Gzip);

        let packed = compress_all(&mut c, text);
        // gzip magic
        assert_eq!(&packed[..2], &[0x1f, 0x8b]);

        let unpacked = decompress_all(&mut c, &packed, text.len());
        assert_eq!(unpacked, text);
    }

    #[test]
    fn every_format_and_level_roundtrips() {
        let mut text = b"columnar pages repeat values; ".repeat(64);
        text.extend_from_slice(&random_bytes(512, 7));

        for format in FORMATS {
            for level in [0, 1, 6, 9] {
                let mut c = codec(CompressionLevel::Level(level), format);
                let packed = compress_all(&mut c, &text);
                assert_eq!(decompress_all(&mut c, &packed, text.len()), text, "{:?} level {}", format, level);
            }
        }
    }

    #[test]
    fn empty_input_compresses_to_framed_blob() {
        for format in FORMATS {
            let mut c = codec(CompressionLevel::Default, format);
            let packed = compress_all(&mut c, b"");
            assert!(!packed.is_empty(), "{:?} should still emit framing", format);

            let mut out = [0u8; 16];
            assert_eq!(c.decompress(&packed, &mut out).unwrap(), 0);
        }
    }

    #[test]
    fn codec_is_reusable_for_independent_compressions() {
        let mut c = codec(CompressionLevel::Level(6), Format::Zlib);
        let a = compress_all(&mut c, b"first stream");
        let b = compress_all(&mut c, b"first stream");
        assert_eq!(a, b, "engine must be reset between one-shot calls");
    }

    // --- Zero capacity / undersized buffers ---

    #[test]
    fn zero_capacity_decompress_returns_zero() {
        let mut c = codec(CompressionLevel::Default, Format::Gzip);
        let packed = compress_all(&mut c, b"definitely not empty");
        let mut out: [u8; 0] = [];
        assert_eq!(c.decompress(&packed, &mut out).unwrap(), 0);
        // Even garbage is fine when no output is requested.
        assert_eq!(c.decompress(b"garbage", &mut out).unwrap(), 0);
    }

    #[test]
    fn undersized_decompress_output_reports_both_lengths() {
        let text = "columnar engines compress pages of values. ".repeat(200);
        let mut c = codec(CompressionLevel::Default, Format::Gzip);
        let mut blob = compress_all(&mut c, text.as_bytes());
        assert!(blob.len() < 1024);
        blob.resize(1024, 0);

        let mut out = [0u8; 10];
        let err = c.decompress(&blob, &mut out).unwrap_err();
        match &err {
            CodecError::BufferTooSmall { input_len, output_len, .. } => {
                assert_eq!(*input_len, 1024);
                assert_eq!(*output_len, 10);
            }
            other => panic!("expected BufferTooSmall, got {other:?}"),
        }
        let msg = err.to_string();
        assert!(msg.contains("1024") && msg.contains("10"), "{msg}");
    }

    #[test]
    fn undersized_compress_output_is_buffer_too_small_and_recoverable() {
        let data = random_bytes(4096, 11);
        let mut c = codec(CompressionLevel::Default, Format::Gzip);

        let mut tiny = [0u8; 64];
        assert!(matches!(
            c.compress(&data, &mut tiny),
            Err(CodecError::BufferTooSmall { input_len: 4096, output_len: 64, .. })
        ));

        let packed = compress_all(&mut c, &data);
        assert_eq!(decompress_all(&mut c, &packed, data.len()), data);
    }

    #[test]
    fn max_compressed_len_fits_incompressible_input() {
        for format in FORMATS {
            for level in [0, 9] {
                let mut c = codec(CompressionLevel::Level(level), format);
                for len in [0usize, 1, 100, 65_536, 300_000] {
                    let data = random_bytes(len, len as u64);
                    let mut out = vec![0u8; c.max_compressed_len(len)];
                    assert!(c.compress(&data, &mut out).is_ok(), "{format:?} level {level} len {len}");
                }
            }
        }
    }

    // --- Bad input ---

    #[test]
    fn garbage_input_is_corrupt() {
        let mut c = codec(CompressionLevel::Default, Format::Gzip);
        let mut out = [0u8; 128];
        assert!(matches!(
            c.decompress(b"this is not a gzip member", &mut out),
            Err(CodecError::CorruptInput(_))
        ));
    }

    #[test]
    fn truncated_stream_is_corrupt() {
        let text = b"truncate me please, truncate me please".repeat(20);
        let mut c = codec(CompressionLevel::Default, Format::Zlib);
        let packed = compress_all(&mut c, &text);

        let mut out = vec![0u8; text.len() * 2];
        assert!(matches!(
            c.decompress(&packed[..packed.len() / 2], &mut out),
            Err(CodecError::CorruptInput(_))
        ));
        // The codec recovers for the next call.
        assert_eq!(decompress_all(&mut c, &packed, text.len()), text);
    }

    // --- Direction switching ---

    #[test]
    fn interleaved_directions_stay_correct() {
        let mut c = codec(CompressionLevel::Level(5), Format::Gzip);
        let inputs: Vec<Vec<u8>> = (0..6).map(|i| format!("payload #{i} ").repeat(i * 10 + 1).into_bytes()).collect();

        let mut packed = Vec::new();
        for input in &inputs {
            packed.push(compress_all(&mut c, input));
            // decompress the previous one between compressions
            let last = packed.last().unwrap();
            assert_eq!(&decompress_all(&mut c, last, input.len()), input);
        }
        for (input, blob) in inputs.iter().zip(&packed).rev() {
            assert_eq!(&decompress_all(&mut c, blob, input.len()), input);
            let again = compress_all(&mut c, input);
            assert_eq!(&again, blob);
        }
    }

    #[test]
    fn initialize_then_use_both_directions() {
        let mut c = codec(CompressionLevel::Default, Format::Deflate);
        c.initialize().expect("init ok");
        let packed = compress_all(&mut c, b"after init");
        assert_eq!(decompress_all(&mut c, &packed, 10), b"after init");
    }

    // --- Construction / introspection ---

    #[test]
    fn out_of_range_level_fails_construction() {
        assert!(matches!(
            GzipCodec::new(CompressionLevel::Level(12), Format::Gzip),
            Err(CodecError::BackendInit { .. })
        ));
        assert!(GzipCodec::new(CompressionLevel::Level(-3), Format::Gzip).is_err());
    }

    #[test]
    fn introspection_reports_resolved_settings() {
        let c = codec(CompressionLevel::Default, Format::Zlib);
        assert_eq!(c.compression_type(), CompressionType::Gzip);
        assert_eq!(c.compression_level(), Some(9));
        assert_eq!(c.format(), Format::Zlib);
        assert_eq!(c.backend(), BackendKind::Software);

        let c = codec(CompressionLevel::Level(3), Format::Gzip);
        assert_eq!(c.compression_level(), Some(3));
    }

    #[test]
    fn factory_sessions_are_independent_of_one_shot_state() {
        let mut c = codec(CompressionLevel::Default, Format::Gzip);
        let mut compressor = c.make_compressor().unwrap();

        // one-shot work in between must not disturb the session
        let packed = compress_all(&mut c, b"one-shot");
        assert_eq!(decompress_all(&mut c, &packed, 8), b"one-shot");

        let mut out = vec![0u8; 256];
        let r = compressor.compress(b"streamed", &mut out).unwrap();
        assert_eq!(r.bytes_read, 8);
        let mut stream = out[..r.bytes_written].to_vec();
        let end = compressor.end(&mut out).unwrap();
        assert!(!end.should_retry);
        stream.extend_from_slice(&out[..end.bytes_written]);

        assert_eq!(decompress_all(&mut c, &stream, 8), b"streamed");
    }
}
