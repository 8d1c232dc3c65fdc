//! Tree serializers.
//!
//! Both serializers evaluate every [`Node::Deferred`] they meet; neither keeps
//! plugin output between calls.

use tera::escape_html;

use super::{Element, Node, Resolution};
use crate::context::RenderContext;

/// Elements written as `<name />` when they have no children.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img"];

pub(super) fn write_text(nodes: &[Node], ctx: &RenderContext, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => write_text(&element.children, ctx, out),
            Node::Deferred(content) => {
                let resolution = content.resolve(ctx);
                log_failure(content.plugin_name(), ctx, &resolution);
                out.push_str(&resolution.into_text());
            }
        }
    }
}

pub(super) fn write_html(nodes: &[Node], ctx: &RenderContext, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(&escape_html(text)),
            Node::Element(element) => write_element(element, ctx, out),
            Node::Deferred(content) => {
                let resolution = content.resolve(ctx);
                log_failure(content.plugin_name(), ctx, &resolution);
                match resolution {
                    Resolution::Output(html) => out.push_str(&html),
                    Resolution::Failed(marker) => {
                        out.push_str("<span class=\"error\">");
                        out.push_str(&escape_html(&marker));
                        out.push_str("</span>");
                    }
                }
            }
        }
    }
}

fn write_element(element: &Element, ctx: &RenderContext, out: &mut String) {
    out.push('<');
    out.push_str(&element.name);
    for (name, value) in &element.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_html(value));
        out.push('"');
    }

    if element.children.is_empty() && VOID_ELEMENTS.contains(&element.name.as_str()) {
        out.push_str(" />");
        return;
    }

    out.push('>');
    write_html(&element.children, ctx, out);
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}

fn log_failure(plugin: &str, ctx: &RenderContext, resolution: &Resolution) {
    if let Resolution::Failed(marker) = resolution {
        tracing::warn!("Plugin '{}' failed on page '{}': {}", plugin, ctx.page_name(), marker);
    }
}
