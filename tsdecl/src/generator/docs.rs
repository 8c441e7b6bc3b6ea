//! Documentation comment synthesis.

use std::collections::BTreeMap;

use crate::generator::ident::string_literal;
use crate::ir::{Attrs, LocationId};

/// Build the JSDoc block for an item.
///
/// Sections, in order: free-text docs, the `serde` attribute summary, the
/// `codegen` attribute summary, the source link (when `link` carries a path
/// prefix) and `extra`. Returns `None` when every section is empty.
pub fn doc_comment(
    attrs: &Attrs,
    extra: Option<&str>,
    link: Option<(&str, &LocationId)>,
) -> Option<Vec<String>> {
    let mut sections: Vec<String> = Vec::new();

    if let Some(docs) = &attrs.rust_docs {
        sections.push(docs.clone());
    }
    if let Some(summary) = attribute_summary("serde", &attrs.serde_flags, &attrs.serde_attrs) {
        sections.push(summary);
    }
    if let Some(summary) =
        attribute_summary("codegen", &attrs.codegen_flags, &attrs.codegen_attrs)
    {
        sections.push(summary);
    }
    if let Some((prefix, location)) = link {
        if !location.as_str().is_empty() {
            sections.push(format!("{}{}", prefix, location.display_path()));
        }
    }
    if let Some(extra) = extra {
        sections.push(extra.to_string());
    }

    let text = sections
        .iter()
        .map(|section| section.trim())
        .filter(|section| !section.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    if text.is_empty() {
        None
    } else {
        Some(render_block(&text))
    }
}

/// `#[name(flag, other, key = "value")]`, or `None` without attributes.
fn attribute_summary(
    name: &str,
    flags: &Option<BTreeMap<String, LocationId>>,
    attrs: &Option<BTreeMap<String, (String, LocationId)>>,
) -> Option<String> {
    let mut items: Vec<String> = flags.iter().flatten().map(|(flag, _)| flag.clone()).collect();
    items.extend(
        attrs
            .iter()
            .flatten()
            .map(|(key, (value, _))| format!("{} = {}", key, string_literal(value))),
    );

    if items.is_empty() {
        None
    } else {
        Some(format!("`#[{}({})]`", name, items.join(", ")))
    }
}

fn render_block(text: &str) -> Vec<String> {
    let text = text.replace("*/", "*\\/");
    if !text.contains('\n') {
        return vec![format!("/** {} */", text)];
    }

    let mut lines = vec!["/**".to_string()];
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            lines.push(" *".to_string());
        } else {
            lines.push(format!(" * {}", line));
        }
    }
    lines.push(" */".to_string());
    lines
}
