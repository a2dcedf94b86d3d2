//! Reference RTF serializer.
//!
//! Re-emits a token tree as RTF bytes such that re-tokenizing the output
//! reproduces the tree. Exists for the structural round-trip property and
//! as a debugging aid; it makes no attempt at fidelity beyond structure.
//!
//! The serializer tracks `\ucN` scoping the same way the tokenizer does and
//! emits `?` fallback placeholders after every `\uN`, so the reader's
//! fallback skip consumes exactly the placeholders.

use crate::tree::{Node, NodeId, Tree};
use smallvec::SmallVec;

/// Serialize a tree to RTF bytes.
pub fn serialize(tree: &Tree) -> Vec<u8> {
    let mut out = Vec::new();
    if let Some(root) = tree.root() {
        let mut uc: SmallVec<[i32; 8]> = SmallVec::new();
        write_group(tree, root, &mut out, &mut uc);
    }
    out
}

fn write_group(tree: &Tree, group: NodeId, out: &mut Vec<u8>, uc: &mut SmallVec<[i32; 8]>) {
    out.push(b'{');
    let inherited = uc.last().copied().unwrap_or(1);
    uc.push(inherited);
    for &child in tree.children(group) {
        match tree.node(child) {
            Node::Group { .. } => write_group(tree, child, out, uc),
            Node::ControlWord(cw) => {
                out.push(b'\\');
                out.extend_from_slice(cw.word.as_bytes());
                if let Some(param) = cw.param {
                    out.extend_from_slice(param.to_string().as_bytes());
                }
                // unconditional delimiter keeps the word separate from
                // whatever follows
                out.push(b' ');
                if cw.word == "uc"
                    && let Some(top) = uc.last_mut()
                {
                    *top = cw.param.unwrap_or(1);
                }
                if cw.word == "u" {
                    // fallback placeholders for the reader to skip
                    let count = uc.last().copied().unwrap_or(1).max(0);
                    out.extend(std::iter::repeat_n(b'?', count as usize));
                }
            },
            Node::ControlSymbol(cs) => {
                out.push(b'\\');
                out.push(cs.symbol);
                out.extend_from_slice(&cs.param);
            },
            Node::Text(bytes) => out.extend_from_slice(bytes),
        }
    }
    uc.pop();
    out.push(b'}');
}
