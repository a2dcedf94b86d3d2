//! Font and color table extraction.
//!
//! Both tables live in header groups that the interpreter routes here
//! before any body text is emitted; the extracted tables are read-only for
//! the rest of the walk.

use crate::encoding;
use crate::tree::{Node, NodeId, Tree};
use encoding_rs::Encoding;
use std::collections::HashMap;

/// An RGB color table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// CSS hex form, e.g. `#ff00ff`.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// Ordered color table; index 0 is the "auto" color.
#[derive(Debug, Clone, Default)]
pub struct ColorTable {
    colors: Vec<Color>,
}

impl ColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, color: Color) {
        self.colors.push(color);
    }

    #[inline]
    pub fn get(&self, index: i32) -> Option<&Color> {
        usize::try_from(index).ok().and_then(|i| self.colors.get(i))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// RTF font family categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontFamily {
    /// Unknown or default
    #[default]
    Nil,
    Roman,
    Swiss,
    Modern,
    Script,
    Decor,
    Tech,
    /// Arabic, Hebrew, or other bidirectional
    Bidi,
}

impl FontFamily {
    /// Family from its control word (`\froman`, `\fswiss`, ...).
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "fnil" => Some(Self::Nil),
            "froman" => Some(Self::Roman),
            "fswiss" => Some(Self::Swiss),
            "fmodern" => Some(Self::Modern),
            "fscript" => Some(Self::Script),
            "fdecor" => Some(Self::Decor),
            "ftech" => Some(Self::Tech),
            "fbidi" => Some(Self::Bidi),
            _ => None,
        }
    }

    /// Generic CSS family used as the fallback after the table name.
    pub fn generic_css(self) -> Option<&'static str> {
        match self {
            Self::Roman => Some("serif"),
            Self::Swiss => Some("sans-serif"),
            Self::Modern => Some("monospace"),
            Self::Script => Some("cursive"),
            Self::Decor => Some("fantasy"),
            Self::Nil | Self::Tech | Self::Bidi => None,
        }
    }
}

/// One `fontinfo` entry from the font table.
#[derive(Debug, Clone, Default)]
pub struct FontInfo {
    pub family: FontFamily,
    /// Family name with the trailing `;` trimmed
    pub name: String,
    /// Alternative name from a nested `{\*\falt <name>}` group
    pub alt_name: String,
    /// Raw `\fcharsetN` index
    pub charset: i32,
    /// Registry resolution of the charset index
    pub encoding: Option<&'static Encoding>,
}

/// Font table keyed by `\fN` index.
#[derive(Debug, Clone, Default)]
pub struct FontTable {
    fonts: HashMap<i32, FontInfo>,
}

impl FontTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, index: i32) -> Option<&FontInfo> {
        self.fonts.get(&index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

/// Extract the font table from a `{\fonttbl ...}` group. Each nested
/// `fontinfo` group contributes one entry.
pub fn parse_font_table(tree: &Tree, group: NodeId) -> FontTable {
    let mut table = FontTable::new();
    for &child in tree.children(group) {
        if matches!(tree.node(child), Node::Group { .. }) && tree.is_font_info(child) {
            parse_font_info(tree, child, &mut table);
        }
    }
    table
}

fn parse_font_info(tree: &Tree, group: NodeId, table: &mut FontTable) {
    let mut index = 0;
    for &child in tree.children(group) {
        match tree.node(child) {
            Node::ControlWord(cw) => match cw.word.as_str() {
                "f" => {
                    index = cw.int_param();
                    table.fonts.insert(index, FontInfo::default());
                },
                "fcharset" => {
                    if let Some(info) = table.fonts.get_mut(&index) {
                        info.charset = cw.int_param();
                        info.encoding = encoding::charset_encoding(info.charset).ok();
                    }
                },
                word => {
                    if let Some(family) = FontFamily::from_word(word)
                        && let Some(info) = table.fonts.get_mut(&index)
                    {
                        info.family = family;
                    }
                },
            },
            Node::Text(bytes) => {
                // the first text child names the family; later runs are
                // delimiter leftovers
                if let Some(info) = table.fonts.get_mut(&index)
                    && info.name.is_empty()
                {
                    let name = String::from_utf8_lossy(bytes);
                    info.name = name.trim_end_matches(';').to_string();
                }
            },
            Node::Group { .. } if tree.is_font_alternative(child) => {
                // {\*\falt <name>}: the third child carries the name
                if let Some(&alt) = tree.children(child).get(2)
                    && let Node::Text(bytes) = tree.node(alt)
                    && let Some(info) = table.fonts.get_mut(&index)
                {
                    info.alt_name = String::from_utf8_lossy(bytes).into_owned();
                }
            },
            _ => {},
        }
    }
}

/// Extract the color table from a `{\colortbl ...}` group.
///
/// `\redN`/`\greenN`/`\blueN` accumulate; every text token (the `;`
/// delimiters) commits the accumulator and resets it, so the leading bare
/// `;` yields the index-0 auto color.
pub fn parse_color_table(tree: &Tree, group: NodeId) -> ColorTable {
    let mut table = ColorTable::new();
    let mut current = Color::default();
    for &child in tree.children(group) {
        match tree.node(child) {
            Node::ControlWord(cw) => {
                let value = cw.int_param().clamp(0, 255) as u8;
                match cw.word.as_str() {
                    "red" => current.red = value,
                    "green" => current.green = value,
                    "blue" => current.blue = value,
                    _ => {},
                }
            },
            Node::Text(_) => {
                table.push(current);
                current = Color::default();
            },
            _ => {},
        }
    }
    table
}

/// Fixed `\highlightN` palette (MS-OXRTFEX indices 1-16; 8 is unused).
/// Used when the color table has no entry for the index.
pub fn highlight_color(index: i32) -> Option<Color> {
    let color = match index {
        1 => Color::new(0x00, 0x00, 0x00), // black
        2 => Color::new(0x00, 0x00, 0xff), // blue
        3 => Color::new(0x00, 0xff, 0xff), // cyan
        4 => Color::new(0x00, 0xff, 0x00), // green
        5 => Color::new(0xff, 0x00, 0xff), // magenta
        6 => Color::new(0xff, 0x00, 0x00), // red
        7 => Color::new(0xff, 0xff, 0x00), // yellow
        9 => Color::new(0x00, 0x00, 0x8b), // dark blue
        10 => Color::new(0x00, 0x8b, 0x8b), // dark cyan
        11 => Color::new(0x00, 0x64, 0x00), // dark green
        12 => Color::new(0x8b, 0x00, 0x8b), // dark magenta
        13 => Color::new(0x8b, 0x00, 0x00), // dark red
        14 => Color::new(0x80, 0x80, 0x00), // dark yellow
        15 => Color::new(0xa9, 0xa9, 0xa9), // dark gray
        16 => Color::new(0xd3, 0xd3, 0xd3), // light gray
        _ => return None,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn first_group(tree: &Tree) -> NodeId {
        let root = tree.root().unwrap();
        tree.children(root)
            .iter()
            .copied()
            .find(|&c| matches!(tree.node(c), Node::Group { .. }))
            .unwrap()
    }

    #[test]
    fn test_font_table() {
        let tree = tokenize(
            br"{\rtf1{\fonttbl{\f0\fswiss\fcharset0 Arial;}{\f2\froman\fcharset204 Times New Roman;}}}",
        );
        let table = parse_font_table(&tree, first_group(&tree));
        assert_eq!(table.len(), 2);

        let arial = table.get(0).unwrap();
        assert_eq!(arial.name, "Arial");
        assert_eq!(arial.family, FontFamily::Swiss);
        assert_eq!(arial.charset, 0);
        assert_eq!(arial.encoding.unwrap().name(), "windows-1252");

        let times = table.get(2).unwrap();
        assert_eq!(times.name, "Times New Roman");
        assert_eq!(times.family, FontFamily::Roman);
        assert_eq!(times.encoding.unwrap().name(), "windows-1251");
        assert!(table.get(1).is_none());
    }

    #[test]
    fn test_font_alternative_name() {
        let tree = tokenize(br"{\rtf1{\fonttbl{\f0\fswiss Helvetica{\*\falt Arial};}}}");
        let table = parse_font_table(&tree, first_group(&tree));
        let font = table.get(0).unwrap();
        assert_eq!(font.name, "Helvetica");
        assert_eq!(font.alt_name, "Arial");
    }

    #[test]
    fn test_color_table_auto_entry() {
        let tree = tokenize(br"{\rtf1{\colortbl;\red255\green0\blue0;\red0\green0\blue255;}}");
        let table = parse_color_table(&tree, first_group(&tree));
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0), Some(&Color::default()));
        assert_eq!(table.get(1), Some(&Color::new(255, 0, 0)));
        assert_eq!(table.get(2), Some(&Color::new(0, 0, 255)));
        assert!(table.get(3).is_none());
        assert!(table.get(-1).is_none());
    }

    #[test]
    fn test_color_component_clamped() {
        let tree = tokenize(br"{\rtf1{\colortbl;\red999\green-3\blue16;}}");
        let table = parse_color_table(&tree, first_group(&tree));
        assert_eq!(table.get(1), Some(&Color::new(255, 0, 16)));
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::new(0, 10, 255).hex(), "#000aff");
    }

    #[test]
    fn test_highlight_palette() {
        assert_eq!(highlight_color(6), Some(Color::new(255, 0, 0)));
        assert_eq!(highlight_color(8), None);
        assert_eq!(highlight_color(17), None);
    }
}
