/// Stable codec IDs (u16) for configuration and wire metadata.
pub mod codec_ids {
    pub const UNCOMPRESSED: u16 = 0x0000;
    pub const SNAPPY: u16       = 0x0001;
    pub const GZIP: u16         = 0x0002;
    pub const BROTLI: u16       = 0x0003;
    pub const ZSTD: u16         = 0x0004;
    pub const LZ4: u16          = 0x0005;
    pub const LZ4_FRAME: u16    = 0x0006;
    pub const LZO: u16          = 0x0007;
    pub const BZ2: u16          = 0x0008;
}

/// Environment variable selecting the gzip backend.
pub const GZIP_BACKEND_ENV: &str = "CODEC_GZIP_BACKEND";

/// Backend label accepted in `GZIP_BACKEND_ENV` (case-insensitive).
pub const QAT_BACKEND_LABEL: &str = "QAT";

/// Gzip level bounds, as accepted by zlib's deflateInit2.
pub const GZIP_MIN_LEVEL: i32 = 0;
pub const GZIP_MAX_LEVEL: i32 = 9;
pub const GZIP_DEFAULT_LEVEL: i32 = 9;

/// Maximum deflate window size (log2).
pub const WINDOW_BITS: u8 = 15;

/// Header + trailer bytes added by each framing.
pub const ZLIB_WRAPPER_LEN: usize = 6;
pub const GZIP_WRAPPER_LEN: usize = 18;

/// Extra slack on top of the deflate bound. Some zlib releases under-report it.
pub const MAX_LEN_PESSIMISM: usize = 12;

/// Max chunk size sanity bound for the stream helpers (32 MiB).
pub const MAX_CHUNK_SIZE: usize = 32 * 1024 * 1024;

/// Default chunk size for the stream helpers (64 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;
