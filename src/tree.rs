//! Token tree produced by the tokenizer.
//!
//! The tree is a rooted arena: nodes live in a flat `Vec` and refer to each
//! other through [`NodeId`] indices, with parent back-edges stored alongside.
//! Groups own their children; insertion order is significant. The tree is
//! immutable once tokenization finishes.

use smallvec::SmallVec;

/// Index of a node within its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A control word: `\word` with an optional signed decimal parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlWord {
    /// The word without the leading backslash
    pub word: String,
    /// Numeric parameter, absent when the source carried none
    pub param: Option<i32>,
}

impl ControlWord {
    /// Parameter value with the RTF default of 1 when absent.
    #[inline]
    pub fn int_param(&self) -> i32 {
        self.param.unwrap_or(1)
    }
}

/// A control symbol: `\` followed by one non-alphanumeric byte.
///
/// The parameter holds hex digits and is populated only for `\'HH`; a
/// truncated escape may leave a single digit behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSymbol {
    pub symbol: u8,
    pub param: SmallVec<[u8; 2]>,
}

/// One node of the token tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// `{ ... }` scope; owns its children in document order
    Group { children: Vec<NodeId> },
    ControlWord(ControlWord),
    ControlSymbol(ControlSymbol),
    /// Raw byte run in the document's declared encoding (not yet UTF-8)
    Text(Vec<u8>),
}

/// Arena-backed token tree.
///
/// Equality is structural: two trees are equal when tokenization produced
/// the same nodes in the same document order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<Node>,
    parents: Vec<Option<NodeId>>,
    root: Option<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root group, if the source contained one.
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents[id.index()]
    }

    /// Children of a group; empty for leaf nodes.
    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id.index()] {
            Node::Group { children } => children,
            _ => &[],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a node under `parent` and return its id. With no parent the
    /// node becomes the root (first call only).
    pub(crate) fn push(&mut self, parent: Option<NodeId>, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        self.parents.push(parent);
        match parent {
            Some(p) => {
                if let Node::Group { children } = &mut self.nodes[p.index()] {
                    children.push(id);
                }
            },
            None => {
                if self.root.is_none() {
                    self.root = Some(id);
                }
            },
        }
        id
    }

    /// True iff child `idx` of `group` is a control word or symbol matching
    /// `token`.
    pub fn check_child(&self, group: NodeId, idx: usize, token: &str) -> bool {
        let Some(&child) = self.children(group).get(idx) else {
            return false;
        };
        match self.node(child) {
            Node::ControlWord(cw) => cw.word == token,
            Node::ControlSymbol(cs) => token.as_bytes() == [cs.symbol],
            _ => false,
        }
    }

    /// True iff the group's first child is a control word or symbol
    /// matching `token`.
    #[inline]
    pub fn first_child_is_control(&self, group: NodeId, token: &str) -> bool {
        self.check_child(group, 0, token)
    }

    /// A destination is a group opening with the `\*` control symbol.
    #[inline]
    pub fn is_destination(&self, group: NodeId) -> bool {
        self.first_child_is_control(group, "*")
    }

    #[inline]
    pub fn is_font_table(&self, group: NodeId) -> bool {
        self.first_child_is_control(group, "fonttbl")
    }

    #[inline]
    pub fn is_color_table(&self, group: NodeId) -> bool {
        self.first_child_is_control(group, "colortbl")
    }

    #[inline]
    pub fn is_stylesheet(&self, group: NodeId) -> bool {
        self.first_child_is_control(group, "stylesheet")
    }

    #[inline]
    pub fn is_info(&self, group: NodeId) -> bool {
        self.first_child_is_control(group, "info")
    }

    #[inline]
    pub fn is_listtables(&self, group: NodeId) -> bool {
        self.first_child_is_control(group, "listtables")
    }

    #[inline]
    pub fn is_files_table(&self, group: NodeId) -> bool {
        self.is_destination(group) && self.check_child(group, 1, "filetbl")
    }

    /// Revision table, written either as `{\*\revtbl ...}` or bare.
    pub fn is_track_changes(&self, group: NodeId) -> bool {
        (self.is_destination(group) && self.check_child(group, 1, "revtbl"))
            || self.first_child_is_control(group, "revtbl")
    }

    /// A `fontinfo` entry inside the font table: `{\f0\fswiss\fcharset0 Arial;}`
    #[inline]
    pub fn is_font_info(&self, group: NodeId) -> bool {
        self.first_child_is_control(group, "f")
    }

    /// Alternative font name: `{\*\falt <name>}`
    #[inline]
    pub fn is_font_alternative(&self, group: NodeId) -> bool {
        self.is_destination(group) && self.check_child(group, 1, "falt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    #[test]
    fn test_parent_child_consistency() {
        let tree = tokenize(br"{\rtf1{\fonttbl{\f0\fswiss Arial;}}{\colortbl;\red1\green2\blue3;}text}");
        for idx in 0..tree.len() {
            let id = NodeId(idx as u32);
            match tree.parent(id) {
                Some(parent) => {
                    let count = tree.children(parent).iter().filter(|&&c| c == id).count();
                    assert_eq!(count, 1, "node {idx} appears once under its parent");
                },
                None => assert_eq!(Some(id), tree.root()),
            }
            for &child in tree.children(id) {
                assert_eq!(tree.parent(child), Some(id));
            }
        }
    }

    #[test]
    fn test_destination_predicates() {
        let tree = tokenize(br"{\rtf1{\*\falt Arial}{\*\filetbl x}{\*\revtbl y}{\fonttbl}{\colortbl}{\stylesheet}{\info}}");
        let root = tree.root().unwrap();
        let groups: Vec<NodeId> = tree
            .children(root)
            .iter()
            .copied()
            .filter(|&c| matches!(tree.node(c), Node::Group { .. }))
            .collect();
        assert!(tree.is_font_alternative(groups[0]));
        assert!(tree.is_files_table(groups[1]));
        assert!(tree.is_track_changes(groups[2]));
        assert!(tree.is_font_table(groups[3]));
        assert!(tree.is_color_table(groups[4]));
        assert!(tree.is_stylesheet(groups[5]));
        assert!(tree.is_info(groups[6]));
        for &g in &groups[3..] {
            assert!(!tree.is_destination(g));
        }
    }

    #[test]
    fn test_int_param_default() {
        let cw = ControlWord {
            word: "b".into(),
            param: None,
        };
        assert_eq!(cw.int_param(), 1);
        let cw = ControlWord {
            word: "b".into(),
            param: Some(0),
        };
        assert_eq!(cw.int_param(), 0);
    }
}
