//! compression/registry.rs
//! Codec registry and factory functions.

use crate::compression::backend::{BackendConfig, SelectedBackend};
use crate::compression::codecs::{AcceleratedCodec, GzipCodec};
use crate::compression::constants::{GZIP_DEFAULT_LEVEL, GZIP_MAX_LEVEL, GZIP_MIN_LEVEL};
use crate::compression::types::{Codec, CodecError, CompressionLevel, CompressionType, Format};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodecInfo {
    pub name: &'static str,
    /// Built into this crate.
    pub available: bool,
    /// The algorithm has a level knob at all.
    pub supports_level: bool,
    pub default_level: i32,
    pub min_level: i32,
    pub max_level: i32,
}

pub fn resolve(ty: CompressionType) -> CodecInfo {
    match ty {
        CompressionType::Gzip => CodecInfo {
            name: ty.name(),
            available: true,
            supports_level: true,
            default_level: GZIP_DEFAULT_LEVEL,
            min_level: GZIP_MIN_LEVEL,
            max_level: GZIP_MAX_LEVEL,
        },
        other => CodecInfo {
            name: other.name(),
            available: false,
            supports_level: matches!(
                other,
                CompressionType::Brotli | CompressionType::Zstd | CompressionType::Lz4Frame | CompressionType::Bz2
            ),
            default_level: 0,
            min_level: 0,
            max_level: 0,
        },
    }
}

pub fn is_available(ty: CompressionType) -> bool {
    resolve(ty).available
}

pub fn supports_compression_level(ty: CompressionType) -> bool {
    resolve(ty).supports_level
}

fn leveled_info(ty: CompressionType) -> Result<CodecInfo, CodecError> {
    let info = resolve(ty);
    if !info.supports_level {
        return Err(CodecError::UnsupportedOperation(format!(
            "codec '{}' does not support setting a compression level",
            info.name
        )));
    }
    if !info.available {
        return Err(CodecError::NotImplemented(format!("support for codec '{}' not built", info.name)));
    }
    Ok(info)
}

pub fn default_compression_level(ty: CompressionType) -> Result<i32, CodecError> {
    Ok(leveled_info(ty)?.default_level)
}

pub fn minimum_compression_level(ty: CompressionType) -> Result<i32, CodecError> {
    Ok(leveled_info(ty)?.min_level)
}

pub fn maximum_compression_level(ty: CompressionType) -> Result<i32, CodecError> {
    Ok(leveled_info(ty)?.max_level)
}

/// Build a codec, choosing its backend from the process environment.
pub fn make_codec(
    ty: CompressionType,
    level: CompressionLevel,
    format: Format,
) -> Result<Box<dyn Codec>, CodecError> {
    make_codec_with(&BackendConfig::from_env(), ty, level, format)
}

/// Build a codec with an explicit backend configuration.
///
/// # Errors
/// - `NotImplemented` for codecs other than gzip.
/// - `BackendInit` for an out-of-range level on the software backend.
pub fn make_codec_with(
    config: &BackendConfig,
    ty: CompressionType,
    level: CompressionLevel,
    format: Format,
) -> Result<Box<dyn Codec>, CodecError> {
    match ty {
        CompressionType::Gzip => {}
        CompressionType::Uncompressed => {
            return Err(CodecError::NotImplemented("uncompressed data has no codec".into()));
        }
        other => {
            return Err(CodecError::NotImplemented(format!("support for codec '{}' not built", other)));
        }
    }

    match config.select(format).backend {
        SelectedBackend::Accelerated(driver) => Ok(Box::new(AcceleratedCodec::new(driver))),
        SelectedBackend::Software => Ok(Box::new(GzipCodec::new(level, format)?)),
    }
}
