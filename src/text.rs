//! Plaintext emitter.
//!
//! Renders the interpreter's event stream as plain text: line-breaking
//! control words become CRLF, styling and HTML passthrough are discarded.

use crate::interpreter::Event;

/// Render events as plaintext bytes.
pub fn render(events: &[Event]) -> Vec<u8> {
    let mut out = Vec::new();
    for event in events {
        match event {
            Event::Text(bytes) => out.extend_from_slice(bytes),
            Event::ParagraphBreak | Event::LineBreak => out.extend_from_slice(b"\r\n"),
            Event::Tab => out.push(b'\t'),
            Event::NonBreakingSpace => out.push(b' '),
            Event::SoftHyphen => out.push(b'-'),
            Event::Special(ch) => out.extend_from_slice(ch.plaintext().as_bytes()),
            Event::HtmlTag(_) | Event::StyleOpen(_) | Event::StyleClose => {},
        }
    }
    out
}
