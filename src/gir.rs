//! Read-only element view over a parsed GIR document.
//!
//! The compiler never touches `roxmltree` directly: every lookup goes through
//! [`Element`], which only matches elements in the GIR core namespace.

use roxmltree::Node;

/// XML namespace of GIR core elements.
pub const CORE_NS: &str = "http://www.gtk.org/introspection/core/1.0";

/// XML namespace of `glib:` attributes.
pub const GLIB_NS: &str = "http://www.gtk.org/introspection/glib/1.0";

/// A GIR element: name, attributes, child elements and an optional `<doc>`.
#[derive(Debug, Clone, Copy)]
pub struct Element<'a, 'input> {
    node: Node<'a, 'input>,
}

impl<'a, 'input: 'a> Element<'a, 'input> {
    /// Wrap a node, rejecting text, comment and processing-instruction nodes.
    pub fn new(node: Node<'a, 'input>) -> Option<Self> {
        node.is_element().then_some(Self { node })
    }

    /// Local tag name, without namespace prefix.
    pub fn name(&self) -> &'a str {
        self.node.tag_name().name()
    }

    /// True when this element is `<tag>` in the GIR core namespace.
    pub fn is(&self, tag: &str) -> bool {
        let tag_name = self.node.tag_name();
        tag_name.name() == tag && tag_name.namespace() == Some(CORE_NS)
    }

    /// Unqualified attribute value.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.node.attribute(name)
    }

    /// Attribute value in a specific XML namespace (`glib:`, `c:`).
    pub fn ns_attr(&self, ns: &str, name: &str) -> Option<&'a str> {
        self.node.attribute((ns, name))
    }

    /// Child elements in document order.
    pub fn children(&self) -> impl Iterator<Item = Element<'a, 'input>> {
        self.node.children().filter_map(Element::new)
    }

    /// First direct child `<tag>` in the core namespace.
    pub fn child(&self, tag: &str) -> Option<Element<'a, 'input>> {
        self.children().find(|c| c.is(tag))
    }

    /// Every direct child `<tag>` in the core namespace.
    pub fn children_named<'t>(
        &self,
        tag: &'t str,
    ) -> impl Iterator<Item = Element<'a, 'input>> + 't
    where
        'a: 't,
        'input: 't,
    {
        self.children().filter(move |c| c.is(tag))
    }

    /// Raw text of the `<doc>` child, if any.
    pub fn doc(&self) -> Option<&'a str> {
        self.child("doc").and_then(|d| d.node.text())
    }

    /// `introspectable="0"` marks bindings-invisible API.
    pub fn is_introspectable(&self) -> bool {
        self.attr("introspectable") != Some("0")
    }
}
