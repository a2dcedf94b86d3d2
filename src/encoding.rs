//! Codepage registry for legacy RTF text.
//!
//! RTF declares its byte encoding three ways: a character-set token
//! (`\ansi`, `\mac`, `\pc`, `\pca`), a decimal Windows codepage
//! (`\ansicpgN`), and per-font charset indices (`\fcharsetN`). This module
//! maps all three onto `encoding_rs` decoders and provides the decode
//! helper used for text runs and `\'HH` escapes.

use crate::error::{RtfError, RtfResult};
use encoding_rs::Encoding;

/// Map a character-set token (the control word without `\`) to a decoder.
#[inline]
pub fn token_encoding(word: &str) -> Option<&'static Encoding> {
    match word {
        "ansi" => Some(encoding_rs::WINDOWS_1252),
        "mac" => Some(encoding_rs::MACINTOSH),
        // CP437 / CP850 are not in encoding_rs; IBM866 is the nearest
        // available DOS codepage
        "pc" | "pca" => Some(encoding_rs::IBM866),
        _ => None,
    }
}

/// Map a Windows codepage identifier (`\ansicpgN`) to a decoder.
///
/// Compiles to a jump table; the returned references are static. Codepages
/// outside the registry produce [`RtfError::EncodingUnknown`], which callers
/// recover from by leaving bytes undecoded.
pub fn codepage_encoding(codepage: u32) -> RtfResult<&'static Encoding> {
    let encoding = match codepage {
        // DOS codepages; encoding_rs ships only IBM866, the others
        // approximate to it
        437 => encoding_rs::IBM866,  // United States IBM
        850 => encoding_rs::IBM866,  // IBM multilingual
        852 => encoding_rs::IBM866,  // Eastern European
        860 => encoding_rs::IBM866,  // Portuguese
        862 => encoding_rs::IBM866,  // Hebrew
        863 => encoding_rs::IBM866,  // French Canadian
        865 => encoding_rs::IBM866,  // Norwegian
        866 => encoding_rs::IBM866,  // Soviet Union
        708 => encoding_rs::ISO_8859_6, // Arabic (ASMO-708)
        864 => encoding_rs::ISO_8859_6, // Arabic (DOS)
        819 => encoding_rs::WINDOWS_1252, // Latin-1

        // Windows codepages
        874 => encoding_rs::WINDOWS_874,   // Thai
        1250 => encoding_rs::WINDOWS_1250, // Eastern European
        1251 => encoding_rs::WINDOWS_1251, // Cyrillic
        1252 => encoding_rs::WINDOWS_1252, // Western European (default ANSI)
        1253 => encoding_rs::WINDOWS_1253, // Greek
        1254 => encoding_rs::WINDOWS_1254, // Turkish
        1255 => encoding_rs::WINDOWS_1255, // Hebrew
        1256 => encoding_rs::WINDOWS_1256, // Arabic
        1257 => encoding_rs::WINDOWS_1257, // Baltic
        1258 => encoding_rs::WINDOWS_1258, // Vietnamese

        // East Asian codepages
        932 => encoding_rs::SHIFT_JIS, // Japanese
        936 => encoding_rs::GBK,       // Simplified Chinese
        949 => encoding_rs::EUC_KR,    // Korean
        950 => encoding_rs::BIG5,      // Traditional Chinese
        1361 => encoding_rs::EUC_KR,   // Korean Johab (approximation)

        _ => return Err(RtfError::EncodingUnknown(codepage)),
    };
    Ok(encoding)
}

/// Map a `\fcharsetN` index to a decoder.
pub fn charset_encoding(charset: i32) -> RtfResult<&'static Encoding> {
    let encoding = match charset {
        0 | 1 | 2 => encoding_rs::WINDOWS_1252, // ANSI, default, symbol
        77 => encoding_rs::MACINTOSH,
        128 => encoding_rs::SHIFT_JIS, // Japanese
        129 => encoding_rs::EUC_KR,    // Korean (Hangul)
        130 => encoding_rs::EUC_KR,    // Korean (Johab approximation)
        134 => encoding_rs::GBK,       // Simplified Chinese
        136 => encoding_rs::BIG5,      // Traditional Chinese
        161 => encoding_rs::WINDOWS_1253, // Greek
        162 => encoding_rs::WINDOWS_1254, // Turkish
        163 => encoding_rs::WINDOWS_1258, // Vietnamese
        177 | 181 => encoding_rs::WINDOWS_1255, // Hebrew
        178 | 179 | 180 => encoding_rs::WINDOWS_1256, // Arabic
        186 => encoding_rs::WINDOWS_1257, // Baltic
        204 => encoding_rs::WINDOWS_1251, // Russian (Cyrillic)
        222 => encoding_rs::WINDOWS_874,  // Thai
        238 => encoding_rs::WINDOWS_1250, // Eastern European
        254 | 255 => encoding_rs::IBM866, // PC437 / OEM (approximation)
        _ => return Err(RtfError::EncodingUnknown(charset.max(0) as u32)),
    };
    Ok(encoding)
}

/// Decode legacy bytes to UTF-8.
///
/// With no decoder the bytes pass through as-is: unsupported codepages are
/// recovered locally rather than aborting the conversion.
#[inline]
pub fn decode_bytes(bytes: &[u8], encoding: Option<&'static Encoding>) -> Vec<u8> {
    match encoding {
        Some(enc) => enc.decode(bytes).0.into_owned().into_bytes(),
        None => bytes.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_lookup() {
        assert_eq!(token_encoding("ansi").unwrap().name(), "windows-1252");
        assert_eq!(token_encoding("mac").unwrap().name(), "macintosh");
        assert!(token_encoding("fromhtml").is_none());
    }

    #[test]
    fn test_codepage_lookup() {
        assert_eq!(codepage_encoding(1252).unwrap().name(), "windows-1252");
        assert_eq!(codepage_encoding(932).unwrap().name(), "Shift_JIS");
        assert_eq!(codepage_encoding(936).unwrap().name(), "GBK");
        assert!(matches!(
            codepage_encoding(709),
            Err(RtfError::EncodingUnknown(709))
        ));
    }

    #[test]
    fn test_charset_lookup() {
        assert_eq!(charset_encoding(0).unwrap().name(), "windows-1252");
        assert_eq!(charset_encoding(204).unwrap().name(), "windows-1251");
        assert!(charset_encoding(3).is_err());
    }

    #[test]
    fn test_decode_cp1252() {
        let decoded = decode_bytes(&[0x63, 0x61, 0x66, 0xE9], Some(encoding_rs::WINDOWS_1252));
        assert_eq!(decoded, "café".as_bytes());
    }

    #[test]
    fn test_decode_passthrough() {
        let raw = [0x63, 0x61, 0x66, 0xE9];
        assert_eq!(decode_bytes(&raw, None), raw.to_vec());
    }
}
