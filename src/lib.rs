//! rtfkit: Rich Text Format conversion for mail pipelines.
//!
//! This library ingests RTF documents, including the MS-OXRTFEX
//! "HTML-encapsulated RTF" variant used for MAPI message bodies, and
//! renders them as plaintext or reconstructed HTML. It also implements the
//! compressed-RTF wire format (MS-OXCRTF) found inside PST/MSG containers.
//!
//! # Architecture
//!
//! - **Tokenizer**: streams bytes into a tree of groups, control words,
//!   control symbols and text runs, honoring RTF's escape, whitespace and
//!   `\uN`/`\ucN` fallback rules
//! - **Interpreter**: walks the tree as a scoped state machine and emits an
//!   event stream
//! - **Emitters**: render events as HTML (passthrough plus styled spans) or
//!   plaintext
//! - **Compressed**: LZ77-over-ring-dictionary decompressor and compressor
//!   with CRC32 integrity checking
//!
//! # Example: converting a message body
//!
//! ```
//! use rtfkit::{ConvertMode, RtfConverter};
//!
//! let rtf = br"{\rtf1\ansi\ansicpg1252 caf\'e9}";
//! let converter = RtfConverter::from_bytes(rtf)?;
//! assert_eq!(converter.convert(ConvertMode::Text)?, "café".as_bytes());
//! # Ok::<(), rtfkit::RtfError>(())
//! ```
//!
//! # Example: expanding a MAPI compressed-RTF payload
//!
//! ```no_run
//! # fn payload_from_message() -> Vec<u8> { Vec::new() }
//! let payload: Vec<u8> = payload_from_message();
//! if rtfkit::is_compressed_rtf(&payload) {
//!     let raw = rtfkit::decompress(&payload)?;
//!     println!("{}", String::from_utf8_lossy(&raw));
//! }
//! # Ok::<(), rtfkit::RtfError>(())
//! ```

/// Compressed RTF (MS-OXCRTF) decompressor and compressor
pub mod compressed;
/// Conversion entry point
pub mod converter;
/// Codepage and charset registry
pub mod encoding;
/// Error types
pub mod error;
/// HTML emitter
pub mod html;
/// Scoped tree interpreter and event stream
pub mod interpreter;
/// Font and color table extraction
pub mod tables;
/// Plaintext emitter
pub mod text;
/// Streaming RTF tokenizer
pub mod tokenizer;
/// Token tree model
pub mod tree;
/// Reference serializer for token trees
pub mod writer;

// Re-exports
pub use compressed::{compress, decompress, is_compressed_rtf};
pub use converter::{ConvertMode, RtfConverter};
pub use error::{RtfError, RtfResult};
pub use interpreter::{DocumentClass, Event, SpecialChar, WalkMode, interpret};
pub use tables::{Color, ColorTable, FontFamily, FontInfo, FontTable};
pub use tokenizer::tokenize;
pub use tree::{ControlSymbol, ControlWord, Node, NodeId, Tree};
pub use writer::serialize;
