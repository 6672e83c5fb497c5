//! Signature extraction from callable elements.
//!
//! Handles `<method>`, `<function>`, `<constructor>` and `<virtual-method>`
//! alike. A parameter that cannot be read is dropped on its own; the rest of
//! the signature survives.

use crate::gir::Element;
use crate::model::{Parameter, ReturnType, Signature};
use crate::sanitize::safe_identifier;
use crate::types::{map_type, OPAQUE};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Name of the trailing rest parameter that replaces GIR's `...`.
pub const REST_PARAMETER: &str = "...other";

/// Extract parameters and return type of a callable element.
pub fn extract_signature(callable: &Element) -> Signature {
    Signature {
        parameters: extract_parameters(callable),
        returns: extract_return(callable),
    }
}

/// Parameters in declaration order, skipping the instance parameter.
///
/// Names are unique: a parameter whose sanitized name was already seen is
/// dropped. Nothing may follow the rest parameter.
pub fn extract_parameters(callable: &Element) -> Vec<Parameter> {
    let Some(params) = callable.child("parameters") else {
        return Vec::new();
    };

    let mut out: Vec<Parameter> = Vec::new();
    for node in params.children_named("parameter") {
        if out.last().is_some_and(Parameter::is_rest) {
            debug!(callable = callable.attr("name"), "parameter after varargs dropped");
            break;
        }
        let Some(param) = extract_parameter(&node) else {
            debug!(
                callable = callable.attr("name"),
                parameter = node.attr("name"),
                "skipping unreadable parameter"
            );
            continue;
        };
        if out.iter().any(|p| p.name == param.name) {
            debug!(callable = callable.attr("name"), parameter = %param.name, "duplicate parameter dropped");
            continue;
        }
        out.push(param);
    }
    out
}

fn extract_parameter(node: &Element) -> Option<Parameter> {
    let raw_name = node.attr("name")?;
    let doc = doc_text(node);

    if raw_name == "..." {
        return Some(Parameter {
            name: REST_PARAMETER.to_string(),
            ty: format!("{}[]", OPAQUE),
            doc,
        });
    }

    Some(Parameter {
        name: safe_identifier(raw_name),
        ty: resolve_type(node)?,
        doc,
    })
}

/// Return type of a callable; absent `<return-value>` means no value.
pub fn extract_return(callable: &Element) -> ReturnType {
    match callable.child("return-value") {
        Some(rv) => ReturnType {
            ty: resolve_type(&rv).unwrap_or_else(|| OPAQUE.to_string()),
            doc: doc_text(&rv),
        },
        None => ReturnType::none(),
    }
}

/// Resolve the `<type>` or `<array>` child of a parameter or return value.
///
/// `None` when the element carries neither.
pub fn resolve_type(node: &Element) -> Option<String> {
    for child in node.children() {
        if child.is("type") {
            return Some(map_type(child.attr("name").unwrap_or_default()).to_string());
        }
        if child.is("array") {
            let element = resolve_type(&child).unwrap_or_else(|| OPAQUE.to_string());
            return Some(format!("{}[]", element));
        }
    }
    None
}

/// Normalized text of the element's `<doc>` child.
pub fn doc_text(node: &Element) -> Option<String> {
    node.doc().and_then(normalize_doc)
}

/// Collapse whitespace runs and neutralise sequences that would break out
/// of a `/** */` block or be read as an escape.
pub fn normalize_doc(raw: &str) -> Option<String> {
    let collapsed = RE_WHITESPACE.replace_all(raw.trim(), " ");
    if collapsed.is_empty() {
        return None;
    }
    Some(collapsed.replace("\\x", "\\\\x").replace("*/", "*\\/"))
}
