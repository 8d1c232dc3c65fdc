//! Rendered document trees with lazily evaluated plugin nodes.
//!
//! A [`WikiDocument`] is a fully built tree of [`Node`]s. Text and element
//! nodes are plain data; [`Node::Deferred`] holds a [`PluginContent`] whose
//! text is computed by running a plugin each time the tree is serialized.
//!
//! The document refers to its [`RenderContext`] through a `Weak` pointer. The
//! caller owns the context; dropping it detaches the document, after which
//! serialization reports [`WikiError::DetachedDocument`].
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use wikirender::context::{RenderContext, WikiEngine};
//! use wikirender::document::WikiDocument;
//!
//! let ctx = Arc::new(RenderContext::new(Arc::new(WikiEngine::default()), "Main"));
//! let doc = WikiDocument::from_markup("Hits: [{Counter}]", &ctx);
//!
//! assert_eq!(doc.to_text().unwrap(), "Hits: 1");
//! assert_eq!(doc.to_text().unwrap(), "Hits: 2");
//! ```

mod markup;
mod plugin_content;
mod render;


pub use markup::parse_markup;
pub use plugin_content::{EvaluationError, PLUGIN_FAILURE_PREFIX, PluginContent, Resolution};

use std::sync::{Arc, Weak};

use crate::context::RenderContext;
use crate::core::WikiError;

/// A node of a document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text
    Text(String),
    /// A structural element with children
    Element(Element),
    /// A plugin invocation evaluated at serialization time
    Deferred(PluginContent),
}

impl Node {
    /// The text content of this node, evaluating plugin nodes.
    pub fn text(&self, ctx: &RenderContext) -> String {
        let mut out = String::new();
        render::write_text(std::slice::from_ref(self), ctx, &mut out);
        out
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<PluginContent> for Node {
    fn from(content: PluginContent) -> Self {
        Self::Deferred(content)
    }
}

/// A named element with attributes and child nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Tag name
    pub name: String,
    /// Attributes in insertion order
    pub attributes: Vec<(String, String)>,
    /// Child nodes
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Add a child node.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }
}

/// A document tree bound to a rendering context.
#[derive(Debug, Clone)]
pub struct WikiDocument {
    nodes: Vec<Node>,
    context: Weak<RenderContext>,
}

impl WikiDocument {
    /// Create an empty document for `context`.
    ///
    /// The document does not keep the context alive.
    pub fn new(context: &Arc<RenderContext>) -> Self {
        Self {
            nodes: Vec::new(),
            context: Arc::downgrade(context),
        }
    }

    /// Build a document from wiki text, turning plugin markup into deferred nodes.
    pub fn from_markup(source: &str, context: &Arc<RenderContext>) -> Self {
        let mut document = Self::new(context);
        document.nodes = parse_markup(source);
        document
    }

    /// Append a node at the top level.
    pub fn push(&mut self, node: impl Into<Node>) {
        self.nodes.push(node.into());
    }

    /// Top-level nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All plugin nodes in document order, including those nested in elements.
    pub fn plugin_nodes(&self) -> Vec<&PluginContent> {
        fn collect<'a>(nodes: &'a [Node], found: &mut Vec<&'a PluginContent>) {
            for node in nodes {
                match node {
                    Node::Deferred(content) => found.push(content),
                    Node::Element(element) => collect(&element.children, found),
                    Node::Text(_) => {}
                }
            }
        }

        let mut found = Vec::new();
        collect(&self.nodes, &mut found);
        found
    }

    /// The rendering context this document belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::DetachedDocument`] if the context has been dropped.
    pub fn context(&self) -> Result<Arc<RenderContext>, WikiError> {
        self.context.upgrade().ok_or(WikiError::DetachedDocument)
    }

    /// Serialize to plain text. Plugin nodes are evaluated on every call.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::DetachedDocument`] if the context has been dropped.
    /// Plugin failures never produce an error; they appear as marker text.
    pub fn to_text(&self) -> Result<String, WikiError> {
        let ctx = self.context()?;
        let mut out = String::new();
        render::write_text(&self.nodes, &ctx, &mut out);
        Ok(out)
    }

    /// Serialize to HTML. Plugin nodes are evaluated on every call.
    ///
    /// Text is escaped, plugin output is inserted as-is, and failure markers
    /// are wrapped in `<span class="error">`.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::DetachedDocument`] if the context has been dropped.
    pub fn to_html(&self) -> Result<String, WikiError> {
        let ctx = self.context()?;
        let mut out = String::new();
        render::write_html(&self.nodes, &ctx, &mut out);
        Ok(out)
    }
}
