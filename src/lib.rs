//! wikirender - lazy plugin evaluation and section splitting for wiki text
//!
//! Wiki pages carry plugin invocations such as `[{CurrentTime format='%Y'}]`.
//! wikirender parses a page into a document tree where each invocation is a
//! deferred node: nothing runs until the tree is serialized, and every
//! serialization runs the plugin again. A plugin that fails never takes the
//! page down with it; its node renders as `Plugin insertion failed: <reason>`.
//!
//! Pages can also be cut into numbered sections at `----` lines.
//!
//! # Architecture Overview
//!
//! ```text
//!   WikiEngine ──────────── shared, long-lived
//!   ├── VariableExpander    (Tera-backed by default)
//!   └── PluginExecutor      (PluginManager with the built-ins)
//!        ▲
//!   RenderContext ───────── one per page render: page name + variables
//!        ▲ (weak)
//!   WikiDocument
//!   └── Node::Text | Node::Element | Node::Deferred(PluginContent)
//! ```
//!
//! A document only holds a weak reference to its context. Once the caller
//! drops the context, serializing the document reports
//! [`crate::core::WikiError::DetachedDocument`] instead of keeping the context alive.
//!
//! # Modules
//!
//! - [`document`] - the document tree, deferred plugin nodes and serializers
//! - [`plugin`] - plugin parameters, the executor seam and built-in plugins
//! - [`variables`] - variable expansion for text parameters
//! - [`context`] - the engine and per-render context
//! - [`text`] - section splitting and small text helpers
//! - [`config`] - the TOML configuration file
//! - [`core`] - error types and user-facing error reporting
//! - [`cli`] - the `wikirender` command
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use wikirender::context::{RenderContext, WikiEngine};
//! use wikirender::document::WikiDocument;
//! use wikirender::text::get_section;
//!
//! let page = "Written by [{Variable var='author'}]\n----\nSecond part";
//!
//! let ctx = Arc::new(
//!     RenderContext::new(Arc::new(WikiEngine::default()), "Main")
//!         .with_variables([("author", "Alice")]),
//! );
//! let doc = WikiDocument::from_markup(get_section(page, 1).unwrap(), &ctx);
//! assert_eq!(doc.to_text().unwrap(), "Written by Alice\n");
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! wikirender section Main.txt 2
//! wikirender sections Main.txt
//! wikirender render --var author=Alice --format html pages/
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod core;
pub mod document;
pub mod plugin;
pub mod text;
pub mod variables;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
