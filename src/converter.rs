//! Conversion entry point.
//!
//! [`RtfConverter`] parses its input once, transparently expanding
//! compressed-RTF payloads, and can then render it repeatedly as HTML or
//! plaintext.

use crate::compressed;
use crate::error::{RtfError, RtfResult};
use crate::interpreter::{self, DocumentClass, WalkMode};
use crate::tokenizer::tokenize;
use crate::tree::Tree;
use crate::{html, text};
use std::path::Path;

/// Target representation for [`RtfConverter::convert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertMode {
    /// Reconstruct the encapsulated HTML (MS-OXRTFEX)
    Html,
    /// Extract plaintext
    Text,
}

/// RTF converter holding a parsed document.
///
/// # Examples
///
/// ```
/// use rtfkit::{ConvertMode, RtfConverter};
///
/// let converter = RtfConverter::from_bytes(br"{\rtf1\ansi Hello}")?;
/// assert_eq!(converter.convert(ConvertMode::Text)?, b"Hello");
/// # Ok::<(), rtfkit::RtfError>(())
/// ```
pub struct RtfConverter {
    tree: Tree,
}

impl RtfConverter {
    /// Parse an RTF document from a file.
    pub fn open<P: AsRef<Path>>(path: P) -> RtfResult<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Parse an RTF document from bytes, expanding the compressed-RTF
    /// wrapper when its magic is present.
    pub fn from_bytes(bytes: &[u8]) -> RtfResult<Self> {
        let expanded;
        let source = if compressed::is_compressed_rtf(bytes) {
            expanded = compressed::decompress(bytes)?;
            &expanded
        } else {
            bytes
        };
        Ok(Self {
            tree: tokenize(source),
        })
    }

    /// The parsed token tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Render the document.
    ///
    /// HTML conversion of a valid but non-HTML-encapsulated document
    /// yields empty bytes; text conversion applies to any valid RTF. A
    /// malformed root is [`RtfError::InvalidRtf`] in both modes.
    pub fn convert(&self, mode: ConvertMode) -> RtfResult<Vec<u8>> {
        match mode {
            ConvertMode::Html => {
                if !interpreter::is_valid_document(&self.tree) {
                    return Err(RtfError::InvalidRtf);
                }
                if interpreter::document_class(&self.tree) != DocumentClass::Html {
                    return Ok(Vec::new());
                }
                let events = interpreter::interpret(&self.tree, WalkMode::Html)?;
                Ok(html::render(&events))
            },
            ConvertMode::Text => {
                let events = interpreter::interpret(&self.tree, WalkMode::Text)?;
                Ok(text::render(&events))
            },
        }
    }
}
