//! Tokenized text: an index-linked list of word, space and line-break nodes.
//!
//! Nodes live in an arena and link to their neighbours by [`NodeId`].
//! Crumbling an over-long word appends new slots and relinks them, so ids
//! stay stable and list order always matches text order.

use glyphrun_core::profiling::profile_function;

/// Index of a node in its [`TextNodeList`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextNodeKind {
    Word { text: String },
    Space,
    LineBreak,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub kind: TextNodeKind,
    /// Natural pixel width, set by measurement.
    pub length: f32,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

impl TextNode {
    fn new(kind: TextNodeKind) -> Self {
        Self {
            kind,
            length: 0.0,
            prev: None,
            next: None,
        }
    }

    /// The characters this node stands for: the word itself, `" "` for a
    /// space and `""` for a line break.
    pub fn text(&self) -> &str {
        match &self.kind {
            TextNodeKind::Word { text } => text,
            TextNodeKind::Space => " ",
            TextNodeKind::LineBreak => "",
        }
    }

    pub fn is_word(&self) -> bool {
        matches!(self.kind, TextNodeKind::Word { .. })
    }

    pub fn is_space(&self) -> bool {
        matches!(self.kind, TextNodeKind::Space)
    }

    pub fn is_line_break(&self) -> bool {
        matches!(self.kind, TextNodeKind::LineBreak)
    }

    pub fn prev(&self) -> Option<NodeId> {
        self.prev
    }

    pub fn next(&self) -> Option<NodeId> {
        self.next
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextNodeList {
    nodes: Vec<TextNode>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
}

impl TextNodeList {
    /// Split `text` into nodes. `\r\n`, `\r` and `\n` each become one line
    /// break; every space is its own node; everything else groups into words.
    pub fn tokenize(text: &str) -> Self {
        profile_function!();
        let mut list = Self::default();
        let mut word = String::new();
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            let kind = match c {
                ' ' => TextNodeKind::Space,
                '\r' => {
                    chars.next_if_eq(&'\n');
                    TextNodeKind::LineBreak
                }
                '\n' => TextNodeKind::LineBreak,
                _ => {
                    word.push(c);
                    continue;
                }
            };
            if !word.is_empty() {
                list.push_back(TextNodeKind::Word {
                    text: std::mem::take(&mut word),
                });
            }
            list.push_back(kind);
        }
        if !word.is_empty() {
            list.push_back(TextNodeKind::Word { text: word });
        }
        list
    }

    pub fn push_back(&mut self, kind: TextNodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut node = TextNode::new(kind);
        node.prev = self.tail;
        self.nodes.push(node);

        match self.tail {
            Some(tail) => self.nodes[tail.0].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    /// Insert a new node directly after `after`.
    pub fn insert_after(&mut self, after: NodeId, kind: TextNodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        let next = self.nodes[after.0].next;
        let mut node = TextNode::new(kind);
        node.prev = Some(after);
        node.next = next;
        self.nodes.push(node);

        self.nodes[after.0].next = Some(id);
        match next {
            Some(next) => self.nodes[next.0].prev = Some(id),
            None => self.tail = Some(id),
        }
        id
    }

    /// Split a word into single-character words. The first character keeps
    /// the word's slot. Returns the ids of all pieces in order; spaces,
    /// line breaks and one-character words come back unchanged.
    pub fn crumble(&mut self, id: NodeId) -> Vec<NodeId> {
        let TextNodeKind::Word { text } = &self.nodes[id.0].kind else {
            return vec![id];
        };
        let mut chars = text.chars();
        let Some(first) = chars.next() else {
            return vec![id];
        };
        let rest: Vec<char> = chars.collect();
        if rest.is_empty() {
            return vec![id];
        }

        self.nodes[id.0].kind = TextNodeKind::Word {
            text: first.to_string(),
        };
        let mut pieces = Vec::with_capacity(rest.len() + 1);
        pieces.push(id);
        let mut last = id;
        for c in rest {
            last = self.insert_after(last, TextNodeKind::Word { text: c.to_string() });
            pieces.push(last);
        }
        pieces
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    pub fn tail(&self) -> Option<NodeId> {
        self.tail
    }

    /// # Panics
    ///
    /// Panics if `id` did not come from this list.
    pub fn node(&self, id: NodeId) -> &TextNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut TextNode {
        &mut self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&TextNode> {
        self.nodes.get(id.0)
    }

    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].next
    }

    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].prev
    }

    /// Number of nodes (arena slots).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// A word directly followed by another word, which only happens after
    /// crumbling. The boundary between them counts as a character gap.
    pub fn is_crumbled_word(&self, id: NodeId) -> bool {
        self.nodes[id.0].is_word()
            && self.nodes[id.0]
                .next
                .is_some_and(|next| self.nodes[next.0].is_word())
    }

    /// First character of the word after `id`, used as the right-hand side
    /// of the kerning pair for the last character of `id`.
    pub fn following_char(&self, id: NodeId) -> Option<char> {
        let next = self.nodes[id.0].next?;
        match &self.nodes[next.0].kind {
            TextNodeKind::Word { text } => text.chars().next(),
            _ => None,
        }
    }

    /// Number of characters across all nodes (line breaks count as one).
    pub fn char_count(&self) -> usize {
        self.iter()
            .map(|(_, node)| match &node.kind {
                TextNodeKind::Word { text } => text.chars().count(),
                TextNodeKind::Space | TextNodeKind::LineBreak => 1,
            })
            .sum()
    }

    /// Walk the list from head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.nodes.len(),
        }
    }

    /// Walk the list from `start` to the tail.
    pub fn iter_from(&self, start: NodeId) -> Iter<'_> {
        Iter {
            list: self,
            cursor: Some(start),
            remaining: self.nodes.len(),
        }
    }
}

pub struct Iter<'a> {
    list: &'a TextNodeList,
    cursor: Option<NodeId>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (NodeId, &'a TextNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        if self.remaining == 0 {
            debug_assert!(false, "text node list contains a cycle");
            return None;
        }
        self.remaining -= 1;

        let node = &self.list.nodes[id.0];
        debug_assert!(
            node.next
                .is_none_or(|next| self.list.nodes[next.0].prev == Some(id)),
            "broken link after node {}",
            id.0
        );
        self.cursor = node.next;
        Some((id, node))
    }
}
