//! Scoped interpretation of the token tree.
//!
//! The interpreter walks the tree as a state machine and emits an ordered
//! [`Event`] stream that the HTML and text emitters share. Character
//! properties are scoped: each group entry duplicates the current frame
//! and each exit restores the saved one, so `\ucN`, `\htmlrtf`, fonts and
//! colors are lost exactly at their closing brace.

use crate::encoding;
use crate::error::{RtfError, RtfResult};
use crate::tables::{self, Color, ColorTable, FontTable};
use crate::tree::{ControlSymbol, ControlWord, Node, NodeId, Tree};
use encoding_rs::Encoding;
use smallvec::SmallVec;

/// Characters with dedicated control words, emitted outside passthrough
/// regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialChar {
    LeftQuote,
    RightQuote,
    LeftDoubleQuote,
    RightDoubleQuote,
    Bullet,
    EnDash,
    EmDash,
}

impl SpecialChar {
    /// Plaintext rendering, shared by both emitters.
    pub fn plaintext(self) -> &'static str {
        match self {
            Self::LeftQuote | Self::RightQuote => "'",
            Self::LeftDoubleQuote | Self::RightDoubleQuote => "\"",
            Self::Bullet => "*",
            Self::EnDash => "-",
            Self::EmDash => "--",
        }
    }

    /// HTML entity, used when folding into `\*\htmltag` payloads.
    fn entity(self) -> &'static str {
        match self {
            Self::LeftQuote => "&lsquo;",
            Self::RightQuote => "&rsquo;",
            Self::LeftDoubleQuote => "&ldquo;",
            Self::RightDoubleQuote => "&rdquo;",
            Self::Bullet => "&bull;",
            Self::EnDash => "&ndash;",
            Self::EmDash => "&mdash;",
        }
    }

    fn from_word(word: &str) -> Option<Self> {
        match word {
            "lquote" => Some(Self::LeftQuote),
            "rquote" => Some(Self::RightQuote),
            "ldblquote" => Some(Self::LeftDoubleQuote),
            "rdblquote" => Some(Self::RightDoubleQuote),
            "bullet" => Some(Self::Bullet),
            "endash" => Some(Self::EnDash),
            "emdash" => Some(Self::EmDash),
            _ => None,
        }
    }
}

/// One element of the interpreter's output stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Body text, UTF-8 where the active codepage was decodable and raw
    /// bytes otherwise
    Text(Vec<u8>),
    /// Verbatim payload of an `\*\htmltag` destination
    HtmlTag(Vec<u8>),
    /// Open a styled run with the given CSS declarations
    StyleOpen(String),
    StyleClose,
    ParagraphBreak,
    LineBreak,
    Tab,
    NonBreakingSpace,
    SoftHyphen,
    Special(SpecialChar),
}

/// MS-OXRTFEX classification of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentClass {
    /// `\fromhtml`: HTML encapsulated in RTF
    Html,
    /// `\fromtext`: plaintext encapsulated in RTF
    Text,
    /// Ordinary RTF
    Plain,
}

/// Which rendering rules drive the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkMode {
    /// De-encapsulate HTML: `\*\htmltag` destinations pass through and
    /// styled runs are composed
    Html,
    /// Extract plaintext: every destination group is elided
    Text,
}

/// True iff the root group starts with `\rtf1`.
pub fn is_valid_document(tree: &Tree) -> bool {
    let Some(root) = tree.root() else {
        return false;
    };
    match tree.children(root).first().map(|&c| tree.node(c)) {
        Some(Node::ControlWord(cw)) => cw.word == "rtf" && cw.param == Some(1),
        _ => false,
    }
}

/// Classify the document by scanning at most the first 10 root-level
/// tokens for `\fromhtml` / `\fromtext`, per MS-OXRTFEX.
pub fn document_class(tree: &Tree) -> DocumentClass {
    let Some(root) = tree.root() else {
        return DocumentClass::Plain;
    };
    for &child in tree.children(root).iter().take(10) {
        if let Node::ControlWord(cw) = tree.node(child) {
            match cw.word.as_str() {
                "fromhtml" => return DocumentClass::Html,
                "fromtext" => return DocumentClass::Text,
                _ => {},
            }
        }
    }
    DocumentClass::Plain
}

/// `\uN` code point: RTF carries signed 16-bit decimals, so negative values
/// wrap by 65536.
#[inline]
pub fn unicode_scalar(param: i32) -> u32 {
    if param < 0 {
        (param + 65536) as u32
    } else {
        param as u32
    }
}

/// Walk a tree and produce its event stream.
pub fn interpret(tree: &Tree, mode: WalkMode) -> RtfResult<Vec<Event>> {
    let mut interpreter = Interpreter::new(tree, mode);
    interpreter.run()?;
    Ok(interpreter.events)
}

/// Scoped character properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CharState {
    bold: bool,
    italic: bool,
    underline: bool,
    strike: bool,
    superscript: bool,
    hidden: bool,
    font: Option<i32>,
    font_size: Option<i32>,
    foreground: Option<i32>,
    background: Option<i32>,
    pattern_fg: Option<i32>,
    pattern_bg: Option<i32>,
    highlight: Option<i32>,
    htmlrtf: bool,
}

struct Interpreter<'t> {
    tree: &'t Tree,
    mode: WalkMode,
    events: Vec<Event>,
    /// Character properties of the innermost open group
    state: CharState,
    /// Frames saved at group entry, restored on exit
    saved_states: SmallVec<[CharState; 16]>,
    /// Current `\ucN` count, mirroring the tokenizer's scoping
    uc: i32,
    saved_uc: SmallVec<[i32; 16]>,
    /// Active codepage, set by \ansi-family tokens and \ansicpgN
    encoding: Option<&'static Encoding>,
    /// `\deffN` index, the font in effect until a `\fN` overrides it
    default_font: Option<i32>,
    font_table: FontTable,
    color_table: ColorTable,
    /// Nesting depth of `\*\htmltag` destinations
    html_tag_depth: u32,
    body_started: bool,
    body_stopped: bool,
    /// CSS of the span currently open in the output
    open_span: Option<String>,
}

impl<'t> Interpreter<'t> {
    fn new(tree: &'t Tree, mode: WalkMode) -> Self {
        Self {
            tree,
            mode,
            events: Vec::new(),
            state: CharState::default(),
            saved_states: SmallVec::new(),
            uc: 1,
            saved_uc: SmallVec::new(),
            encoding: Some(encoding_rs::WINDOWS_1252),
            default_font: None,
            font_table: FontTable::new(),
            color_table: ColorTable::new(),
            html_tag_depth: 0,
            body_started: false,
            body_stopped: false,
            open_span: None,
        }
    }

    fn run(&mut self) -> RtfResult<()> {
        if !is_valid_document(self.tree) {
            return Err(RtfError::InvalidRtf);
        }
        let root = self.tree.root().ok_or(RtfError::InvalidRtf)?;
        self.walk_group(root);
        if self.open_span.take().is_some() {
            self.events.push(Event::StyleClose);
        }
        Ok(())
    }

    fn walk_group(&mut self, group: NodeId) {
        let tree = self.tree;

        // {\*\htmltag ...} passthrough regions exist only in the HTML walk
        let is_html_tag = self.mode == WalkMode::Html
            && tree.is_destination(group)
            && tree.check_child(group, 1, "htmltag");
        let mut opens_body = false;
        if is_html_tag {
            if let Some(&marker) = tree.children(group).get(1)
                && let Node::ControlWord(cw) = tree.node(marker)
            {
                opens_body = !self.body_started && cw.int_param() == 50;
                if cw.int_param() == 58 {
                    self.body_stopped = true;
                }
            }
            self.html_tag_depth += 1;
        }

        if tree.is_font_table(group) {
            self.font_table = tables::parse_font_table(tree, group);
        } else if tree.is_color_table(group) {
            self.color_table = tables::parse_color_table(tree, group);
        } else if tree.is_stylesheet(group)
            || tree.is_track_changes(group)
            || tree.is_info(group)
            || tree.is_listtables(group)
            || tree.is_files_table(group)
        {
            // header groups with no body output
        } else if tree.is_destination(group) && !is_html_tag {
            // non-body destination: elided entirely
        } else {
            self.push_scope();
            for &child in tree.children(group) {
                self.walk_node(child);
            }
            self.pop_scope();
            if opens_body {
                self.body_started = true;
            }
        }

        if is_html_tag {
            self.html_tag_depth = self.html_tag_depth.saturating_sub(1);
        }
    }

    fn push_scope(&mut self) {
        self.saved_states.push(self.state);
        self.saved_uc.push(self.uc);
    }

    fn pop_scope(&mut self) {
        if let Some(prev) = self.saved_states.pop() {
            self.state = prev;
        }
        if let Some(prev) = self.saved_uc.pop() {
            self.uc = prev;
        }
    }

    fn walk_node(&mut self, id: NodeId) {
        let tree = self.tree;
        match tree.node(id) {
            Node::Group { .. } => self.walk_group(id),
            Node::ControlWord(cw) => self.control_word(cw),
            Node::ControlSymbol(cs) => self.control_symbol(cs),
            Node::Text(bytes) => self.text(bytes),
        }
    }

    fn text(&mut self, bytes: &[u8]) {
        if self.state.htmlrtf {
            return;
        }
        let decoded = encoding::decode_bytes(bytes, self.encoding);
        if self.html_tag_depth > 0 {
            self.events.push(Event::HtmlTag(decoded));
        } else {
            self.body_text(decoded);
        }
    }

    fn body_text(&mut self, bytes: Vec<u8>) {
        if self.mode == WalkMode::Html {
            self.sync_span();
        }
        self.events.push(Event::Text(bytes));
    }

    fn control_word(&mut self, cw: &ControlWord) {
        let word = cw.word.as_str();

        // htmlrtf toggles suppression and is never itself suppressed
        if word == "htmlrtf" {
            self.state.htmlrtf = cw.int_param() != 0;
            return;
        }

        if self.html_tag_depth > 0 {
            // inside a passthrough region a few words translate to
            // entities; everything else is dropped
            let payload = if word == "u" {
                format!("&#{};", unicode_scalar(cw.int_param()))
            } else if let Some(special) = SpecialChar::from_word(word) {
                special.entity().to_string()
            } else {
                return;
            };
            self.events.push(Event::HtmlTag(payload.into_bytes()));
            return;
        }

        // \fN keeps updating the font state even inside suppressed
        // fragments (MS-OXRTFEX)
        if self.state.htmlrtf && word != "f" {
            return;
        }

        match word {
            "par" => self.events.push(Event::ParagraphBreak),
            "line" => self.events.push(Event::LineBreak),
            "tab" => self.events.push(Event::Tab),
            "ansi" | "mac" | "pc" | "pca" => {
                self.encoding = encoding::token_encoding(word);
            },
            "ansicpg" => {
                if cw.int_param() > 0 {
                    self.encoding = encoding::codepage_encoding(cw.int_param() as u32).ok();
                }
            },
            "deff" => self.default_font = Some(cw.int_param()),
            "uc" => self.uc = cw.int_param(),
            "u" => {
                let ch = char::from_u32(unicode_scalar(cw.int_param()))
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                let mut buf = [0u8; 4];
                let encoded = ch.encode_utf8(&mut buf);
                self.body_text(encoded.as_bytes().to_vec());
            },
            "b" => self.state.bold = cw.int_param() != 0,
            "i" => self.state.italic = cw.int_param() != 0,
            "ul" => self.state.underline = cw.int_param() != 0,
            "strike" => self.state.strike = cw.int_param() != 0,
            "super" => self.state.superscript = cw.int_param() != 0,
            "v" => self.state.hidden = cw.int_param() != 0,
            "f" => self.state.font = Some(cw.int_param()),
            "fs" => self.state.font_size = Some(cw.int_param()),
            "cf" => self.state.foreground = Some(cw.int_param()),
            "cb" => self.state.background = Some(cw.int_param()),
            "chcfpat" => self.state.pattern_fg = Some(cw.int_param()),
            "chcbpat" => self.state.pattern_bg = Some(cw.int_param()),
            "highlight" => self.state.highlight = Some(cw.int_param()),
            _ => {
                if let Some(special) = SpecialChar::from_word(word) {
                    self.events.push(Event::Special(special));
                }
            },
        }
    }

    fn control_symbol(&mut self, cs: &ControlSymbol) {
        if self.state.htmlrtf {
            return;
        }
        match cs.symbol {
            b'\'' => {
                let Some(byte) = std::str::from_utf8(&cs.param)
                    .ok()
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                else {
                    return;
                };
                let decoded = encoding::decode_bytes(&[byte], self.encoding);
                if self.html_tag_depth > 0 {
                    self.events.push(Event::HtmlTag(decoded));
                } else {
                    self.body_text(decoded);
                }
            },
            b'~' => {
                if self.html_tag_depth > 0 {
                    self.events.push(Event::HtmlTag(b"&nbsp;".to_vec()));
                } else {
                    self.events.push(Event::NonBreakingSpace);
                }
            },
            b'_' => {
                if self.html_tag_depth > 0 {
                    self.events.push(Event::HtmlTag(b"&shy;".to_vec()));
                } else {
                    self.events.push(Event::SoftHyphen);
                }
            },
            // \* is structural; everything else has no output
            _ => {},
        }
    }

    /// Reconcile the open `<span>` with the current state before body text.
    /// Styles are active only between the body-open and body-close HTML
    /// tags.
    fn sync_span(&mut self) {
        if !self.body_started || self.body_stopped {
            if self.body_stopped && self.open_span.take().is_some() {
                self.events.push(Event::StyleClose);
            }
            return;
        }
        let css = self.compute_css();
        if self.open_span.as_deref() == Some(css.as_str()) {
            return;
        }
        if self.open_span.take().is_some() {
            self.events.push(Event::StyleClose);
        }
        if !css.is_empty() {
            self.events.push(Event::StyleOpen(css.clone()));
            self.open_span = Some(css);
        }
    }

    /// CSS declarations for the current character state, in a fixed order.
    fn compute_css(&self) -> String {
        let state = self.state;
        let mut decls: Vec<String> = Vec::new();
        if state.bold {
            decls.push("font-weight: bold".into());
        }
        if state.italic {
            decls.push("font-style: italic".into());
        }
        if state.hidden {
            decls.push("display: none".into());
        }
        if let Some(index) = state.font.or(self.default_font)
            && let Some(info) = self.font_table.get(index)
        {
            let name = if info.name.is_empty() {
                &info.alt_name
            } else {
                &info.name
            };
            match (name.is_empty(), info.family.generic_css()) {
                (false, Some(generic)) => decls.push(format!("font-family: {name}, {generic}")),
                (false, None) => decls.push(format!("font-family: {name}")),
                (true, Some(generic)) => decls.push(format!("font-family: {generic}")),
                (true, None) => {},
            }
        }
        if let Some(size) = state.font_size
            && size > 0
        {
            // \fsN is half-points
            decls.push(format!("font-size: {}pt", f64::from(size) / 2.0));
        }
        match (state.underline, state.strike) {
            (true, true) => decls.push("text-decoration: underline line-through".into()),
            (true, false) => decls.push("text-decoration: underline".into()),
            (false, true) => decls.push("text-decoration: line-through".into()),
            (false, false) => {},
        }
        if let Some(color) = state
            .foreground
            .or(state.pattern_fg)
            .and_then(|i| self.body_color(i))
        {
            decls.push(format!("color: {}", color.hex()));
        }
        let background = state
            .background
            .or(state.pattern_bg)
            .and_then(|i| self.body_color(i))
            .or_else(|| {
                state
                    .highlight
                    .and_then(|i| self.body_color(i).or_else(|| tables::highlight_color(i)))
            });
        if let Some(color) = background {
            decls.push(format!("background-color: {}", color.hex()));
        }
        if state.superscript {
            decls.push("vertical-align: super".into());
        }
        decls.join("; ")
    }

    /// Color-table lookup for styling; index 0 is the auto color and never
    /// styles.
    fn body_color(&self, index: i32) -> Option<Color> {
        if index <= 0 {
            return None;
        }
        self.color_table.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn collect_text(events: &[Event]) -> Vec<u8> {
        let mut out = Vec::new();
        for event in events {
            if let Event::Text(bytes) = event {
                out.extend_from_slice(bytes);
            }
        }
        out
    }

    #[test]
    fn test_invalid_root_rejected() {
        let tree = tokenize(br"{\ansi Hello}");
        assert!(matches!(
            interpret(&tree, WalkMode::Text),
            Err(RtfError::InvalidRtf)
        ));
        // \rtf2 is not a valid version marker either
        let tree = tokenize(br"{\rtf2 Hello}");
        assert!(interpret(&tree, WalkMode::Text).is_err());
    }

    #[test]
    fn test_scope_stacks_balance() {
        let tree = tokenize(br"{\rtf1{\b{\uc2 a}b}c}");
        let mut interpreter = Interpreter::new(&tree, WalkMode::Text);
        interpreter.run().unwrap();
        assert!(interpreter.saved_states.is_empty());
        assert!(interpreter.saved_uc.is_empty());
        assert_eq!(interpreter.uc, 1);
    }

    #[test]
    fn test_document_class_scan() {
        let tree = tokenize(br"{\rtf1\ansi\ansicpg1252\fromhtml1 x}");
        assert_eq!(document_class(&tree), DocumentClass::Html);
        let tree = tokenize(br"{\rtf1\ansi\fromtext x}");
        assert_eq!(document_class(&tree), DocumentClass::Text);
        let tree = tokenize(br"{\rtf1\ansi x}");
        assert_eq!(document_class(&tree), DocumentClass::Plain);
    }

    #[test]
    fn test_class_scan_stops_after_ten_tokens() {
        // \fromhtml beyond the tenth root token is not inspected
        let tree = tokenize(br"{\rtf1\deff0\qq\ww\ee\rr\tt\yy\ii\oo\fromhtml1 x}");
        assert_eq!(document_class(&tree), DocumentClass::Plain);
    }

    #[test]
    fn test_unicode_scalar_wraps_negative() {
        assert_eq!(unicode_scalar(-10000), 55536);
        assert_eq!(unicode_scalar(233), 233);
    }

    #[test]
    fn test_hex_escape_decodes_with_codepage() {
        let tree = tokenize(br"{\rtf1\ansi\ansicpg1252 caf\'e9}");
        let events = interpret(&tree, WalkMode::Text).unwrap();
        assert_eq!(collect_text(&events), "café".as_bytes());
    }

    #[test]
    fn test_unknown_codepage_passes_bytes_through() {
        let tree = tokenize(br"{\rtf1\ansi\ansicpg709 caf\'e9}");
        let events = interpret(&tree, WalkMode::Text).unwrap();
        assert_eq!(collect_text(&events), b"caf\xe9");
    }

    #[test]
    fn test_htmlrtf_suppression() {
        let tree = tokenize(br"{\rtf1\fromhtml1 a\htmlrtf hidden\par\htmlrtf0 b}");
        let events = interpret(&tree, WalkMode::Html).unwrap();
        assert_eq!(collect_text(&events), b"ab");
        assert!(!events.contains(&Event::ParagraphBreak));
    }

    #[test]
    fn test_suppressed_font_change_still_applies() {
        // \f2 sits inside an htmlrtf-disabled fragment but must still
        // drive the font of the styled run that follows
        let tree = tokenize(
            br"{\rtf1\fromhtml1{\fonttbl{\f2\fswiss Arial;}}{\*\htmltag50 <body>}\htmlrtf\f2\htmlrtf0 x{\*\htmltag58 </body>}}",
        );
        let events = interpret(&tree, WalkMode::Html).unwrap();
        assert!(events.contains(&Event::StyleOpen(
            "font-family: Arial, sans-serif".to_string()
        )));
        assert_eq!(collect_text(&events), b"x");
    }

    #[test]
    fn test_htmlrtf_ends_at_group_exit() {
        let tree = tokenize(br"{\rtf1\fromhtml1 {\htmlrtf gone}kept}");
        let events = interpret(&tree, WalkMode::Html).unwrap();
        assert_eq!(collect_text(&events), b"kept");
    }

    #[test]
    fn test_htmltag_passthrough() {
        let tree = tokenize(br"{\rtf1\fromhtml1 {\*\htmltag72 <p>}hi{\*\htmltag104 </p>}}");
        let events = interpret(&tree, WalkMode::Html).unwrap();
        assert_eq!(events[0], Event::HtmlTag(b"<p>".to_vec()));
        assert_eq!(events[1], Event::Text(b"hi".to_vec()));
        assert_eq!(events[2], Event::HtmlTag(b"</p>".to_vec()));
    }

    #[test]
    fn test_htmltag_entity_translation() {
        let tree = tokenize(br"{\rtf1\fromhtml1 {\*\htmltag64 \lquote x\rquote\emdash\u8212 y}}");
        let events = interpret(&tree, WalkMode::Html).unwrap();
        let payload: Vec<u8> = events
            .iter()
            .filter_map(|e| match e {
                Event::HtmlTag(bytes) => Some(bytes.clone()),
                _ => None,
            })
            .flatten()
            .collect();
        assert_eq!(payload, b"&lsquo;x&rsquo;&mdash;&#8212;".to_vec());
    }

    #[test]
    fn test_destinations_elided_in_text_walk() {
        let tree = tokenize(br"{\rtf1\fromhtml1 {\*\htmltag72 <p>}hi{\*\generator Riched20;}}");
        let events = interpret(&tree, WalkMode::Text).unwrap();
        assert_eq!(collect_text(&events), b"hi");
        assert!(!events.iter().any(|e| matches!(e, Event::HtmlTag(_))));
    }

    #[test]
    fn test_header_groups_produce_no_text() {
        let tree = tokenize(
            br"{\rtf1{\fonttbl{\f0\fswiss Arial;}}{\colortbl;\red1\green2\blue3;}{\stylesheet{\s1 Normal;}}{\info{\title T}}body}",
        );
        let events = interpret(&tree, WalkMode::Text).unwrap();
        assert_eq!(collect_text(&events), b"body");
    }

    #[test]
    fn test_style_spans_in_body() {
        let tree = tokenize(
            br"{\rtf1\fromhtml1{\*\htmltag50 <body>}{\b\cf0 bold}plain{\*\htmltag58 </body>}}",
        );
        let events = interpret(&tree, WalkMode::Html).unwrap();
        let open = events
            .iter()
            .position(|e| matches!(e, Event::StyleOpen(_)))
            .unwrap();
        assert_eq!(
            events[open],
            Event::StyleOpen("font-weight: bold".to_string())
        );
        assert_eq!(events[open + 1], Event::Text(b"bold".to_vec()));
        // the span closes when unstyled text follows
        assert_eq!(events[open + 2], Event::StyleClose);
        assert_eq!(events[open + 3], Event::Text(b"plain".to_vec()));
    }

    #[test]
    fn test_default_font_styles_unmarked_text() {
        let tree = tokenize(
            br"{\rtf1\fromhtml1\deff0{\fonttbl{\f0\fswiss Arial;}}{\*\htmltag50 <body>}x{\*\htmltag58 </body>}}",
        );
        let events = interpret(&tree, WalkMode::Html).unwrap();
        assert!(events.contains(&Event::StyleOpen(
            "font-family: Arial, sans-serif".to_string()
        )));
    }

    #[test]
    fn test_no_spans_before_body_opens() {
        let tree = tokenize(br"{\rtf1\fromhtml1{\b styled}}");
        let events = interpret(&tree, WalkMode::Html).unwrap();
        assert!(!events.iter().any(|e| matches!(e, Event::StyleOpen(_))));
        assert_eq!(collect_text(&events), b"styled");
    }

    #[test]
    fn test_css_composition() {
        let tree = tokenize(
            br"{\rtf1\fromhtml1{\fonttbl{\f0\fswiss Arial;}}{\colortbl;\red255\green0\blue0;}{\*\htmltag50 <body>}{\b\i\ul\f0\fs24\cf1\highlight6 x}{\*\htmltag58 </body>}}",
        );
        let events = interpret(&tree, WalkMode::Html).unwrap();
        let Some(Event::StyleOpen(css)) = events.iter().find(|e| matches!(e, Event::StyleOpen(_)))
        else {
            panic!("expected a styled span");
        };
        assert_eq!(
            css,
            "font-weight: bold; font-style: italic; font-family: Arial, sans-serif; \
             font-size: 12pt; text-decoration: underline; color: #ff0000; \
             background-color: #ff0000"
        );
    }

    #[test]
    fn test_special_chars_outside_htmltag() {
        let tree = tokenize(br"{\rtf1\endash\emdash\bullet x}");
        let events = interpret(&tree, WalkMode::Text).unwrap();
        assert_eq!(events[0], Event::Special(SpecialChar::EnDash));
        assert_eq!(events[1], Event::Special(SpecialChar::EmDash));
        assert_eq!(events[2], Event::Special(SpecialChar::Bullet));
    }

    #[test]
    fn test_par_and_breaks() {
        let tree = tokenize(br"{\rtf1\par\line\tab\~\_}");
        let events = interpret(&tree, WalkMode::Text).unwrap();
        assert_eq!(
            events,
            vec![
                Event::ParagraphBreak,
                Event::LineBreak,
                Event::Tab,
                Event::NonBreakingSpace,
                Event::SoftHyphen,
            ]
        );
    }

    #[test]
    fn test_unicode_emitted_as_scalar() {
        let tree = tokenize(br"{\rtf1 \uc2\u233 XY Z}");
        let events = interpret(&tree, WalkMode::Text).unwrap();
        assert_eq!(collect_text(&events), "é Z".as_bytes());
    }

    #[test]
    fn test_surrogate_code_point_becomes_replacement() {
        let tree = tokenize(br"{\rtf1 \uc0\u-10000}");
        let events = interpret(&tree, WalkMode::Text).unwrap();
        assert_eq!(collect_text(&events), "\u{FFFD}".as_bytes());
    }
}
