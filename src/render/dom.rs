//! Immutable DOM snapshot nodes
//!
//! A [`DomNode`] is an owned copy of one element (or text node) and its
//! subtree, taken from a rendered page at the instant of a query. Structural
//! assumptions about the listing markup go through the named accessors here
//! instead of positional child indexing.

/// One node of a rendered page snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomNode {
    kind: NodeKind,
    children: Vec<DomNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

impl DomNode {
    /// Builds an element node
    pub fn element(
        tag: impl Into<String>,
        attributes: Vec<(String, String)>,
        children: Vec<DomNode>,
    ) -> Self {
        Self {
            kind: NodeKind::Element {
                tag: tag.into(),
                attributes,
            },
            children,
        }
    }

    /// Builds a text node
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text(value.into()),
            children: Vec::new(),
        }
    }

    /// Element tag name, `None` for text nodes
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    /// Raw text of a text node, `None` for elements
    pub fn node_value(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(value) => Some(value),
            NodeKind::Element { .. } => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    /// Looks up an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn children(&self) -> &[DomNode] {
        &self.children
    }

    /// First immediate child element, skipping text nodes
    pub fn first_element_child(&self) -> Option<&DomNode> {
        self.children.iter().find(|child| !child.is_text())
    }

    /// Finds the first immediate child whose `class` attribute equals `class`
    ///
    /// This is an exact comparison of the whole attribute value, not a
    /// class-list membership test.
    pub fn find_child_by_class(&self, class: &str) -> Option<&DomNode> {
        self.children
            .iter()
            .find(|child| child.attr("class") == Some(class))
    }

    /// Text of the first child, if that child is a text node
    pub fn first_child_text(&self) -> Option<&str> {
        self.children.first().and_then(DomNode::node_value)
    }

    /// Follows first children down to the first text node
    pub fn first_text(&self) -> Option<&str> {
        let mut node = self;
        loop {
            if let Some(value) = node.node_value() {
                return Some(value);
            }
            node = node.children.first()?;
        }
    }
}
