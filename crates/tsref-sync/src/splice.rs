//! Byte-range splicing of generated blocks
//!
//! Replaces each located span with a freshly rendered block bracketed by
//! sentinel comments. All other bytes are preserved, apart from one run of
//! trailing trivia immediately before a span and one separator
//! (comma/whitespace up to a newline, plus at most one comment line)
//! immediately after it — that is what makes re-running over already
//! generated text converge.

use std::sync::LazyLock;

use regex::Regex;

use tsref_locate::Span;

use crate::entries::{PathEntry, ReferenceEntry};

/// Start sentinel of a generated region.
pub const BLOCK_START: &str = "// vv Generated dependencies, do not modify vv";
/// End sentinel of a generated region.
pub const BLOCK_END: &str = "// ^^ Generated dependencies, do not modify ^^";

/// One byte-range replacement. Spans index the original text; a set of
/// ops for one document must be disjoint.
#[derive(Debug, Clone)]
pub struct SpliceOp {
    pub span: Span,
    pub replacement: String,
}

/// Whitespace run or line comment at the very end of the text before a
/// span.
static TRAILING_TRIVIA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\s+|//.+)$").expect("Invalid trailing-trivia regex"));

/// Separator after a span: commas/whitespace up to a newline, then at most
/// one comment line (the previous run's end sentinel).
static LEADING_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[,\s]*\n(?:\s+//.+\n)?").expect("Invalid leading-separator regex")
});

/// Apply a set of disjoint splices to the original text.
///
/// Ops are applied in descending-start order, so replacements at later
/// offsets never invalidate the spans of earlier ones.
pub fn apply_splices(text: &str, mut ops: Vec<SpliceOp>) -> String {
    ops.sort_by(|a, b| b.span.start.cmp(&a.span.start));
    let mut current = text.to_string();
    for op in ops {
        let prefix = &current[..op.span.start];
        let prefix = match TRAILING_TRIVIA.find(prefix) {
            Some(found) => &prefix[..found.start()],
            None => prefix,
        };
        let suffix = &current[op.span.end..];
        let suffix = match LEADING_SEPARATOR.find(suffix) {
            Some(found) => &suffix[found.end()..],
            None => suffix,
        };
        current = format!("{}\n{}\n{}", prefix, op.replacement, suffix);
    }
    current
}

/// Render the replacement `paths` block, two-tab indented for its position
/// inside `compilerOptions`.
pub fn render_paths_block(entries: &[PathEntry]) -> String {
    let mut block = format!("\t\t{}\n\t\t\"paths\": {{\n", BLOCK_START);
    for entry in entries {
        let candidates: Vec<String> = entry.to.iter().map(|to| json_quote(to)).collect();
        block.push_str(&format!(
            "\t\t\t{}: [ {} ],\n",
            json_quote(&entry.from),
            candidates.join(", ")
        ));
    }
    block.push_str(&format!("\t\t}},\n\t\t{}", BLOCK_END));
    block
}

/// Render the replacement top-level `references` block.
pub fn render_references_block(entries: &[ReferenceEntry]) -> String {
    let mut block = format!("\t{}\n\t\"references\": [\n", BLOCK_START);
    for entry in entries {
        block.push_str(&format!("\t\t{{ \"path\": {} }},\n", json_quote(&entry.path)));
    }
    block.push_str(&format!("\t],\n\t{}", BLOCK_END));
    block
}

fn json_quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
