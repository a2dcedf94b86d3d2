//! Error types for RTF conversion.

use thiserror::Error;

/// Result type for RTF operations.
pub type RtfResult<T> = Result<T, RtfError>;

/// Errors produced while converting or decompressing RTF.
#[derive(Error, Debug)]
pub enum RtfError {
    /// IO error from the underlying byte source
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Document root does not begin with `\rtf1`
    #[error("not a valid RTF document")]
    InvalidRtf,

    /// Compressed-RTF header shorter than 16 bytes
    #[error("compressed-RTF header must be at least 16 bytes")]
    MalformedHeader,

    /// Compressed-RTF size field disagrees with the payload
    #[error("compressed data size mismatch: header says {header}, payload is {actual}")]
    SizeMismatch { header: u32, actual: usize },

    /// Compressed-RTF CRC32 check failed
    #[error("CRC32 mismatch: expected {expected:#010x}, computed {computed:#010x}")]
    CrcMismatch { expected: u32, computed: u32 },

    /// Compression magic is neither LZFu nor MELA
    #[error("unknown compression magic {0:#010x}")]
    UnknownMagic(u32),

    /// Codepage has no registered decoder; callers recover by passing
    /// bytes through undecoded
    #[error("no decoder registered for codepage {0}")]
    EncodingUnknown(u32),
}
