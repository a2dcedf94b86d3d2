//! Streaming RTF tokenizer.
//!
//! Decomposes a byte stream into the [`Tree`] of groups, control words,
//! control symbols and text runs. Parsing is best-effort: end of input in
//! any state terminates the current run and unwinds cleanly, and bytes
//! after the root group closes are ignored.
//!
//! Two pieces of interpreter state deliberately live here because they must
//! observe the raw byte stream rather than the finished tree: the scoped
//! `\ucN` fallback-byte count (pushed on `{`, popped on `}`) and the
//! `\uN` fallback skip it controls. The ANSI fallback after `\uN` may be
//! plain text that would otherwise become a `Text` node, so it has to be
//! consumed before tokenization normalizes it away.

use crate::tree::{ControlSymbol, ControlWord, Node, NodeId, Tree};
use memchr::memchr3;
use smallvec::SmallVec;

/// Tokenize an RTF byte stream into a tree.
pub fn tokenize(input: &[u8]) -> Tree {
    Tokenizer::new(input).run()
}

struct Tokenizer<'a> {
    input: &'a [u8],
    pos: usize,
    tree: Tree,
    /// Innermost open group; `None` before the root opens and after it closes
    current: Option<NodeId>,
    /// Scoped `\ucN` counts, one frame per open group
    uc: SmallVec<[i32; 8]>,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            tree: Tree::new(),
            current: None,
            uc: SmallVec::new(),
        }
    }

    fn run(mut self) -> Tree {
        while self.pos < self.input.len() {
            if self.current.is_none() {
                if self.tree.root().is_some() {
                    // root closed; everything that follows is ignored
                    break;
                }
                if self.input[self.pos] != b'{' {
                    self.pos += 1;
                    continue;
                }
            }
            match self.input[self.pos] {
                b'{' => {
                    self.pos += 1;
                    self.start_group();
                },
                b'}' => {
                    self.pos += 1;
                    self.end_group();
                },
                b'\\' => {
                    self.pos += 1;
                    self.parse_control();
                },
                _ => self.parse_text(),
            }
        }
        self.tree
    }

    fn start_group(&mut self) {
        let parent = self.current;
        let id = self.tree.push(parent, Node::Group { children: Vec::new() });
        self.current = Some(id);
        // new scope inherits the enclosing \uc count (1 at the root)
        let inherited = self.uc.last().copied().unwrap_or(1);
        self.uc.push(inherited);
    }

    fn end_group(&mut self) {
        if let Some(cur) = self.current {
            self.current = self.tree.parent(cur);
        }
        self.uc.pop();
    }

    fn push_node(&mut self, node: Node) {
        if let Some(cur) = self.current {
            self.tree.push(Some(cur), node);
        }
    }

    /// Text run: bytes until an unescaped `{`, `}` or `\`. Literal escapes
    /// (`\{`, `\}`, `\\`) are copied into the run verbatim; bare CR/LF are
    /// discarded.
    fn parse_text(&mut self) {
        let mut buf: Vec<u8> = Vec::new();
        loop {
            let Some(&b) = self.input.get(self.pos) else {
                break;
            };
            match b {
                b'{' | b'}' => break,
                b'\\' => match self.input.get(self.pos + 1) {
                    Some(&(c @ (b'{' | b'}' | b'\\'))) => {
                        buf.push(b'\\');
                        buf.push(c);
                        self.pos += 2;
                    },
                    // a control sequence ends the run
                    Some(_) => break,
                    None => {
                        buf.push(b'\\');
                        self.pos += 1;
                        break;
                    },
                },
                _ => {
                    let rest = &self.input[self.pos..];
                    let stop = memchr3(b'{', b'}', b'\\', rest).unwrap_or(rest.len());
                    buf.extend(
                        rest[..stop]
                            .iter()
                            .copied()
                            .filter(|&c| c != b'\r' && c != b'\n'),
                    );
                    self.pos += stop;
                },
            }
        }
        if !buf.is_empty() {
            self.push_node(Node::Text(buf));
        }
    }

    /// After a `\`: a letter begins a control word, anything else is a
    /// control symbol. EOF right after the backslash is dropped.
    fn parse_control(&mut self) {
        let Some(&b) = self.input.get(self.pos) else {
            return;
        };
        if b.is_ascii_alphabetic() {
            self.parse_control_word();
        } else {
            self.parse_control_symbol();
        }
    }

    fn parse_control_symbol(&mut self) {
        let b = self.input[self.pos];
        self.pos += 1;

        // an escaped line ending is a paragraph break; collapse CRLF pairs
        if b == b'\r' || b == b'\n' {
            if matches!(self.input.get(self.pos), Some(&(b'\r' | b'\n'))) {
                self.pos += 1;
            }
            self.push_node(Node::ControlWord(ControlWord {
                word: "par".into(),
                param: None,
            }));
            return;
        }

        let mut param = SmallVec::new();
        if b == b'\'' {
            // two hex digits when available; a truncated escape keeps what
            // it has
            for _ in 0..2 {
                match self.input.get(self.pos) {
                    Some(&h) if h.is_ascii_hexdigit() => {
                        param.push(h);
                        self.pos += 1;
                    },
                    _ => break,
                }
            }
        }
        self.push_node(Node::ControlSymbol(ControlSymbol { symbol: b, param }));
    }

    fn parse_control_word(&mut self) {
        let start = self.pos;
        while matches!(self.input.get(self.pos), Some(b) if b.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        let word = String::from_utf8_lossy(&self.input[start..self.pos]).into_owned();

        let pstart = self.pos;
        if self.input.get(self.pos) == Some(&b'-') {
            self.pos += 1;
        }
        while matches!(self.input.get(self.pos), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
        // a bare '-' or an overflowing parameter falls back to the default
        let param = if self.pos > pstart {
            std::str::from_utf8(&self.input[pstart..self.pos])
                .ok()
                .and_then(|s| s.parse::<i32>().ok())
        } else {
            None
        };

        // a single space delimiter is consumed and does not reach the document
        if self.input.get(self.pos) == Some(&b' ') {
            self.pos += 1;
        }

        // mirror \ucN into the scope stack so the next \uN sees it
        if word == "uc"
            && let Some(top) = self.uc.last_mut()
        {
            *top = param.unwrap_or(1);
        }

        let is_unicode = word == "u";
        self.push_node(Node::ControlWord(ControlWord { word, param }));
        if is_unicode {
            self.skip_fallback();
        }
    }

    /// Consume up to `uc` character units of ANSI fallback after `\uN`,
    /// stopping early at a group boundary. A full `\'HH` escape, any other
    /// control word or symbol, and a single rune each count as one unit.
    fn skip_fallback(&mut self) {
        let mut remaining = self.uc.last().copied().unwrap_or(1);
        while remaining > 0 {
            match self.input.get(self.pos) {
                None | Some(&b'{') | Some(&b'}') => break,
                Some(&b'\\') => match self.input.get(self.pos + 1) {
                    Some(&b'\'') => {
                        self.pos += 2;
                        for _ in 0..2 {
                            match self.input.get(self.pos) {
                                Some(&h) if h.is_ascii_hexdigit() => self.pos += 1,
                                _ => break,
                            }
                        }
                    },
                    Some(&c) if c.is_ascii_alphabetic() => {
                        self.pos += 1;
                        while matches!(self.input.get(self.pos), Some(b) if b.is_ascii_alphabetic())
                        {
                            self.pos += 1;
                        }
                        if self.input.get(self.pos) == Some(&b'-') {
                            self.pos += 1;
                        }
                        while matches!(self.input.get(self.pos), Some(b) if b.is_ascii_digit()) {
                            self.pos += 1;
                        }
                        if self.input.get(self.pos) == Some(&b' ') {
                            self.pos += 1;
                        }
                    },
                    Some(_) => self.pos += 2,
                    None => {
                        self.pos += 1;
                        break;
                    },
                },
                Some(&b) => {
                    self.pos += self.rune_width(b);
                },
            }
            remaining -= 1;
        }
    }

    /// Width of the rune at the cursor: the full sequence length for valid
    /// UTF-8, otherwise one byte. In a legacy codepage every fallback byte
    /// is a single character, and a stray high byte must never swallow a
    /// following group brace.
    fn rune_width(&self, lead: u8) -> usize {
        let width = utf8_width(lead);
        if width > 1
            && let Some(seq) = self.input.get(self.pos..self.pos + width)
            && std::str::from_utf8(seq).is_ok()
        {
            width
        } else {
            1
        }
    }
}

/// Byte width of a UTF-8 sequence from its lead byte; continuation bytes
/// advance by one.
#[inline]
fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xFF => 4,
        _ => 1,
    }
}
