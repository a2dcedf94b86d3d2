//! HTML emitter.
//!
//! Renders the interpreter's event stream as reconstructed HTML:
//! `\*\htmltag` payloads pass through verbatim and styled body runs are
//! wrapped in `<span style="...">`. Close events never produce an
//! unbalanced `</span>`.

use crate::interpreter::Event;

/// Render events as HTML bytes.
pub fn render(events: &[Event]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut open_spans = 0usize;
    for event in events {
        match event {
            Event::Text(bytes) | Event::HtmlTag(bytes) => out.extend_from_slice(bytes),
            Event::StyleOpen(css) => {
                out.extend_from_slice(b"<span style=\"");
                out.extend_from_slice(css.as_bytes());
                out.extend_from_slice(b"\">");
                open_spans += 1;
            },
            Event::StyleClose => {
                if open_spans > 0 {
                    out.extend_from_slice(b"</span>");
                    open_spans -= 1;
                }
            },
            // paragraph marks are source whitespace in HTML
            Event::ParagraphBreak => out.extend_from_slice(b"\r\n"),
            Event::LineBreak => out.extend_from_slice(b"<br>"),
            Event::Tab => out.extend_from_slice(b"&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;"),
            Event::NonBreakingSpace => out.extend_from_slice(b"&nbsp;"),
            Event::SoftHyphen => out.extend_from_slice(b"&shy;"),
            Event::Special(ch) => out.extend_from_slice(ch.plaintext().as_bytes()),
        }
    }
    out
}
