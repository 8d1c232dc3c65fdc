//! Minimal recognizer for plugin markup.
//!
//! Only plugin invocations are recognized; all other text is kept verbatim as
//! text nodes. The full wiki grammar is handled elsewhere.
//!
//! ```text
//! [{Counter name='visits' increment=2}]     plugin with parameters
//! [{Toc
//! body text}]                               text after the first line -> _body
//! [{$author}]                               shorthand for [{Variable var='author'}]
//! [[{Counter}]                              escaped, renders as [{Counter}]
//! ```
//!
//! Quoted values may contain spaces and `\'`. An invocation ends at the first
//! `}]`. Markup that is unterminated or has no valid plugin name stays text.

use super::Node;
use super::plugin_content::PluginContent;
use crate::plugin::{BODY_PARAM, ParamValue, PluginParams};

const OPEN: &str = "[{";
const CLOSE: &str = "}]";

/// Split `source` into text nodes and deferred plugin nodes.
///
/// Adjacent text is merged, so no two text nodes are ever neighbours and no
/// text node is empty.
pub fn parse_markup(source: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut text = String::new();
    let mut rest = source;

    while let Some(open) = rest.find(OPEN) {
        if rest[..open].ends_with('[') {
            text.push_str(&rest[..open - 1]);
            text.push_str(OPEN);
            rest = &rest[open + OPEN.len()..];
            continue;
        }

        let inner_start = open + OPEN.len();
        let Some(close) = rest[inner_start..].find(CLOSE) else {
            break;
        };
        let inner_end = inner_start + close;
        let after = inner_end + CLOSE.len();

        match parse_invocation(&rest[inner_start..inner_end]) {
            Some(content) => {
                text.push_str(&rest[..open]);
                flush_text(&mut nodes, &mut text);
                nodes.push(Node::Deferred(content));
            }
            None => text.push_str(&rest[..after]),
        }
        rest = &rest[after..];
    }

    text.push_str(rest);
    flush_text(&mut nodes, &mut text);
    nodes
}

fn flush_text(nodes: &mut Vec<Node>, text: &mut String) {
    if !text.is_empty() {
        nodes.push(Node::Text(std::mem::take(text)));
    }
}

/// Parse the inside of `[{ ... }]`.
fn parse_invocation(inner: &str) -> Option<PluginContent> {
    let (head, body) = match inner.split_once('\n') {
        Some((head, body)) => (head, Some(body)),
        None => (inner, None),
    };

    let head = head.trim();
    let name_end = head.find(char::is_whitespace).unwrap_or(head.len());
    let (name, args) = head.split_at(name_end);

    if let Some(variable) = name.strip_prefix('$') {
        if variable.is_empty() || !args.trim().is_empty() || body.is_some() {
            return None;
        }
        let mut params = PluginParams::new();
        params.insert("var".to_string(), ParamValue::Text(variable.to_string()));
        return Some(PluginContent::new("Variable", params));
    }

    if !is_plugin_name(name) {
        return None;
    }

    let mut params = parse_args(args);
    if let Some(body) = body {
        params.insert(BODY_PARAM.to_string(), ParamValue::Text(body.to_string()));
    }
    Some(PluginContent::new(name, params))
}

fn is_plugin_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(char::is_alphabetic)
        && chars.all(|c| c.is_alphanumeric() || c == '.' || c == '_')
}

/// Parse `key=value key2='quoted value' flag` into parameters.
///
/// A key without `=` gets an empty value.
fn parse_args(args: &str) -> PluginParams {
    let mut params = PluginParams::new();
    let mut rest = args.trim_start();

    while !rest.is_empty() {
        let key_end = rest.find(|c: char| c == '=' || c.is_whitespace()).unwrap_or(rest.len());
        let key = &rest[..key_end];
        rest = rest[key_end..].trim_start();

        let value = match rest.strip_prefix('=') {
            Some(after_eq) => {
                let after_eq = after_eq.trim_start();
                let (value, remaining) = match after_eq.strip_prefix('\'') {
                    Some(quoted) => read_quoted(quoted),
                    None => {
                        let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
                        (after_eq[..end].to_string(), &after_eq[end..])
                    }
                };
                rest = remaining.trim_start();
                value
            }
            None => String::new(),
        };

        if !key.is_empty() {
            params.insert(key.to_string(), ParamValue::Text(value));
        }
    }

    params
}

/// Read a single-quoted value whose opening quote is already consumed.
///
/// Returns the unescaped value and the text after the closing quote. An
/// unterminated value runs to the end of the input.
fn read_quoted(input: &str) -> (String, &str) {
    let mut value = String::new();
    let mut chars = input.char_indices();

    while let Some((index, c)) = chars.next() {
        match c {
            '\\' => {
                if let Some((_, escaped)) = chars.next() {
                    value.push(escaped);
                }
            }
            '\'' => return (value, &input[index + 1..]),
            other => value.push(other),
        }
    }

    (value, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Node {
        Node::Text(s.to_string())
    }

    fn plugin(name: &str, pairs: &[(&str, &str)]) -> Node {
        let params = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).into())).collect();
        Node::Deferred(PluginContent::new(name, params))
    }

    #[test]
    fn test_plain_text_is_one_node() {
        assert_eq!(parse_markup("just text\n----\nmore"), vec![text("just text\n----\nmore")]);
        assert!(parse_markup("").is_empty());
    }

    #[test]
    fn test_plugin_between_text() {
        assert_eq!(
            parse_markup("Visits: [{Counter}] so far"),
            vec![text("Visits: "), plugin("Counter", &[]), text(" so far")]
        );
    }

    #[test]
    fn test_arguments_quoted_and_bare() {
        let nodes = parse_markup(r"[{CurrentTime format='%H:%M it\'s' tz=utc flag}]");
        assert_eq!(
            nodes,
            vec![plugin("CurrentTime", &[("format", "%H:%M it's"), ("tz", "utc"), ("flag", "")])]
        );
    }

    #[test]
    fn test_spaces_around_equals() {
        assert_eq!(parse_markup("[{Counter name = 'a b'}]"), vec![plugin("Counter", &[("name", "a b")])]);
    }

    #[test]
    fn test_body_after_first_line() {
        assert_eq!(
            parse_markup("[{Note title=x\nline one\nline two}]"),
            vec![plugin("Note", &[("title", "x"), (BODY_PARAM, "line one\nline two")])]
        );
    }

    #[test]
    fn test_variable_shorthand() {
        assert_eq!(parse_markup("By [{$author}]"), vec![text("By "), plugin("Variable", &[("var", "author")])]);
    }

    #[test]
    fn test_escaped_markup_is_literal() {
        assert_eq!(parse_markup("Use [[{Counter}] to count"), vec![text("Use [{Counter}] to count")]);
    }

    #[test]
    fn test_unterminated_and_invalid_markup_stay_text() {
        assert_eq!(parse_markup("oops [{Counter"), vec![text("oops [{Counter")]);
        assert_eq!(parse_markup("a [{ }] b [{1x}]"), vec![text("a [{ }] b [{1x}]")]);
    }

    #[test]
    fn test_qualified_plugin_name() {
        assert_eq!(parse_markup("[{org.example.Counter}]"), vec![plugin("org.example.Counter", &[])]);
    }

    #[test]
    fn test_adjacent_plugins() {
        assert_eq!(parse_markup("[{A}][{B}]"), vec![plugin("A", &[]), plugin("B", &[])]);
    }
}
