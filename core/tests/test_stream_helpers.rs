#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use codec_core::compression::{
        codecs::GzipCodec, compress_stream, decompress_stream, Codec, CodecError, CompressionLevel, Format,
        DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE,
    };
    use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

    fn codec(format: Format) -> GzipCodec {
        GzipCodec::new(CompressionLevel::Level(6), format).expect("valid gzip codec")
    }

    fn sample(len: usize) -> Vec<u8> {
        // half text, half noise
        let mut data = b"reader to writer, chunk by chunk. ".repeat(len / 68 + 1);
        data.truncate(len / 2);
        let mut noise = vec![0u8; len - data.len()];
        StdRng::seed_from_u64(len as u64).fill_bytes(&mut noise);
        data.extend_from_slice(&noise);
        data
    }

    fn pack(c: &GzipCodec, data: &[u8], chunk: usize) -> Vec<u8> {
        let mut compressor = c.make_compressor().unwrap();
        let mut packed = Vec::new();
        let written = compress_stream(Cursor::new(data), &mut packed, compressor.as_mut(), chunk).unwrap();
        assert_eq!(written, packed.len() as u64);
        packed
    }

    #[test]
    fn roundtrip_over_many_chunk_sizes() {
        let data = sample(200_000);
        for format in [Format::Deflate, Format::Zlib, Format::Gzip] {
            let c = codec(format);
            for chunk in [1usize, 17, 4096, DEFAULT_CHUNK_SIZE, 1 << 20] {
                // byte-at-a-time is slow, keep it to a small prefix
                let input = if chunk == 1 { &data[..2_000] } else { &data[..] };
                let packed = pack(&c, input, chunk);

                let mut decompressor = c.make_decompressor().unwrap();
                let mut plain = Vec::new();
                let n = decompress_stream(Cursor::new(&packed), &mut plain, decompressor.as_mut(), chunk).unwrap();
                assert_eq!(n, input.len() as u64);
                assert_eq!(plain, input, "{format:?} chunk {chunk}");
                assert!(decompressor.is_finished());
            }
        }
    }

    #[test]
    fn empty_reader_produces_a_complete_stream() {
        let mut c = codec(Format::Gzip);
        let packed = pack(&c, b"", 1024);
        assert!(!packed.is_empty());

        let mut out = [0u8; 8];
        assert_eq!(c.decompress(&packed, &mut out).unwrap(), 0);
    }

    #[test]
    fn trailing_bytes_after_stream_end_are_ignored() {
        let c = codec(Format::Zlib);
        let data = sample(10_000);
        let mut packed = pack(&c, &data, 4096);
        packed.extend_from_slice(b"trailing junk that is not part of the stream");

        let mut decompressor = c.make_decompressor().unwrap();
        let mut plain = Vec::new();
        decompress_stream(Cursor::new(&packed), &mut plain, decompressor.as_mut(), 512).unwrap();
        assert_eq!(plain, data);
    }

    #[test]
    fn truncated_stream_is_corrupt() {
        let c = codec(Format::Gzip);
        let data = sample(50_000);
        let packed = pack(&c, &data, 8192);

        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..4 {
            let cut = rng.gen_range(1..packed.len());
            let mut decompressor = c.make_decompressor().unwrap();
            let mut plain = Vec::new();
            let result = decompress_stream(Cursor::new(&packed[..cut]), &mut plain, decompressor.as_mut(), 1024);
            assert!(matches!(result, Err(CodecError::CorruptInput(_))), "cut at {cut}: {result:?}");
        }
    }

    #[test]
    fn chunk_size_must_be_in_range() {
        let c = codec(Format::Gzip);
        for chunk in [0, MAX_CHUNK_SIZE + 1] {
            let mut compressor = c.make_compressor().unwrap();
            let mut sink: Vec<u8> = Vec::new();
            assert!(matches!(
                compress_stream(Cursor::new(b"abc"), &mut sink, compressor.as_mut(), chunk),
                Err(CodecError::InvalidState(_))
            ));

            let mut decompressor = c.make_decompressor().unwrap();
            assert!(matches!(
                decompress_stream(Cursor::new(b"abc"), &mut sink, decompressor.as_mut(), chunk),
                Err(CodecError::InvalidState(_))
            ));
        }
    }

    #[test]
    fn helper_output_matches_one_shot_decode() {
        let mut c = codec(Format::Gzip);
        let data = sample(30_000);
        let packed = pack(&c, &data, 3000);

        let mut out = vec![0u8; data.len()];
        assert_eq!(c.decompress(&packed, &mut out).unwrap(), data.len());
        assert_eq!(out, data);
    }
}
