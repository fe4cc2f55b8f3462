//! Parsed configuration document

use serde_json::{Map, Number};

use crate::error::Result;
use crate::parser::{Node, Property, Span, Value, parse_text};

/// The spans of the two generated regions of a configuration document.
///
/// Present only when the document is a single object literal carrying a
/// top-level `references` property and a `paths` property under an
/// object-valued `compilerOptions`. Both spans index into the original
/// text; they never overlap, since one lives inside `compilerOptions` and
/// the other outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanPair {
    pub paths: Span,
    pub references: Span,
}

/// A tolerantly parsed configuration document with source offsets.
pub struct Document {
    source: String,
    root: Node,
}

impl Document {
    /// Parse configuration text.
    ///
    /// # Errors
    ///
    /// Returns a parse error when the text is not valid in the dialect;
    /// callers treat that as fatal since the dependency graph cannot be
    /// trusted partially.
    pub fn parse(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let root = parse_text(&source)?;
        Ok(Self { source, root })
    }

    /// The original text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Comment- and position-free value form, for typed extraction.
    ///
    /// Duplicate keys resolve to the last occurrence, as object literals do.
    pub fn normalize(&self) -> serde_json::Value {
        normalize_node(&self.root)
    }

    /// Locate the editable regions.
    ///
    /// Returns `None` unless the document's top level is an object literal
    /// with a `references` property, and `compilerOptions` is an object
    /// literal with a `paths` property. Absence is not an error; it simply
    /// disables automatic editing for the project.
    pub fn edit_spans(&self) -> Option<SpanPair> {
        let top = object_properties(&self.root)?;
        let references = find_property(top, "references")?;
        let compiler_options = find_property(top, "compilerOptions")?;
        let options = object_properties(&compiler_options.value)?;
        let paths = find_property(options, "paths")?;
        Some(SpanPair {
            paths: Span {
                start: paths.pos,
                end: paths.end,
            },
            references: Span {
                start: references.pos,
                end: references.end,
            },
        })
    }
}

fn object_properties(node: &Node) -> Option<&[Property]> {
    match &node.value {
        Value::Object(properties) => Some(properties),
        _ => None,
    }
}

fn find_property<'a>(properties: &'a [Property], key: &str) -> Option<&'a Property> {
    properties.iter().find(|property| property.key == key)
}

fn normalize_node(node: &Node) -> serde_json::Value {
    match &node.value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(items) => serde_json::Value::Array(items.iter().map(normalize_node).collect()),
        Value::Object(properties) => {
            let mut map = Map::new();
            for property in properties {
                map.insert(property.key.clone(), normalize_node(&property.value));
            }
            serde_json::Value::Object(map)
        }
    }
}
