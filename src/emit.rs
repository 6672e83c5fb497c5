//! TypeScript declaration emitter.
//!
//! Pure string construction. Every function takes [`Options`] explicitly;
//! with `documentation` off, callables collapse to a single signature line.

use crate::config::Options;
use crate::model::{Parameter, ReturnType};
use crate::sanitize::safe_identifier;

/// One soft tab.
const INDENT: &str = "    ";

/// Target spelling of the null sentinel in return position.
const VOID: &str = "void";

fn pad(depth: usize) -> String {
    INDENT.repeat(depth)
}

/// Render `lines` as a `/** ... */` block at `depth`. No lines, no block.
fn doc_block(lines: &[String], depth: usize) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let pad = pad(depth);
    let mut out = format!("{}/**\n", pad);
    for line in lines {
        if line.is_empty() {
            out.push_str(&format!("{} *\n", pad));
        } else {
            out.push_str(&format!("{} * {}\n", pad, line));
        }
    }
    out.push_str(&format!("{} */\n", pad));
    out
}

fn render_parameters(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(|p| format!("{}: {}", p.name, p.ty))
        .collect::<Vec<_>>()
        .join(", ")
}

fn return_type(ret: &ReturnType) -> &str {
    if ret.is_none() {
        VOID
    } else {
        &ret.ty
    }
}

fn with_modifiers(modifiers: &[&str], head: &str) -> String {
    if modifiers.is_empty() {
        head.to_string()
    } else {
        format!("{} {}", modifiers.join(" "), head)
    }
}

/// Doc lines for a callable: docstring, then `@param`s, then `@returns`.
fn callable_doc_lines(
    docstring: Option<&str>,
    parameters: &[Parameter],
    ret: Option<&ReturnType>,
) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(doc) = docstring {
        lines.push(doc.to_string());
    }
    for param in parameters {
        let name = param.name.trim_start_matches('.');
        match &param.doc {
            Some(doc) => lines.push(format!("@param {} {}", name, doc)),
            None => lines.push(format!("@param {}", name)),
        }
    }
    if let Some(ret) = ret {
        match &ret.doc {
            Some(doc) => lines.push(format!("@returns {}", doc)),
            None => lines.push("@returns".to_string()),
        }
    }
    lines
}

/// Render a function or method declaration.
///
/// `modifiers` precede the name (`export function`, `static`). A reserved
/// `name` is prefixed with `_`.
pub fn render_callable(
    name: &str,
    parameters: &[Parameter],
    ret: &ReturnType,
    depth: usize,
    docstring: Option<&str>,
    modifiers: &[&str],
    options: &Options,
) -> String {
    let head = format!(
        "{}({}): {};",
        safe_identifier(name),
        render_parameters(parameters),
        return_type(ret)
    );
    let signature = format!("{}{}\n", pad(depth), with_modifiers(modifiers, &head));

    if !options.documentation {
        return signature;
    }
    let lines = callable_doc_lines(docstring, parameters, Some(ret));
    doc_block(&lines, depth) + &signature
}

/// Render the primary `constructor(...)` of a class.
pub fn render_constructor(
    parameters: &[Parameter],
    depth: usize,
    docstring: Option<&str>,
    options: &Options,
) -> String {
    let signature = format!("{}constructor({});\n", pad(depth), render_parameters(parameters));
    if !options.documentation {
        return signature;
    }
    let lines = callable_doc_lines(docstring, parameters, None);
    doc_block(&lines, depth) + &signature
}

/// Enum member identifier: uppercased, invalid characters replaced, `_`
/// prefixed when empty or starting with a digit.
pub fn enum_member_name(raw: &str) -> String {
    let mut name: String = raw
        .to_uppercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
        .collect();
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

/// Double-quoted string literal with backslashes and quotes escaped.
pub fn quote_literal(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Render an `export enum` block. Members are `(name, value)` pairs; a
/// member whose rendered name repeats an earlier one is dropped.
pub fn render_enum(
    name: &str,
    docstring: Option<&str>,
    members: &[(String, String)],
    options: &Options,
) -> String {
    let mut out = String::new();
    if options.documentation {
        if let Some(doc) = docstring {
            out.push_str(&doc_block(&[doc.to_string()], 0));
        }
    }
    out.push_str(&format!("export enum {} {{\n", name));
    let mut seen: Vec<String> = Vec::new();
    for (member, value) in members {
        let member = enum_member_name(member);
        if seen.contains(&member) {
            continue;
        }
        out.push_str(&format!("{}{} = {},\n", INDENT, member, quote_literal(value)));
        seen.push(member);
    }
    out.push_str("}\n");
    out
}

/// Render a top-level `export const`. An absent value renders as `null`.
pub fn render_constant(
    name: &str,
    value: Option<&str>,
    docstring: Option<&str>,
    options: &Options,
) -> String {
    let name = if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", name)
    } else {
        name.to_string()
    };
    let value = value.map(quote_literal).unwrap_or_else(|| "null".to_string());

    let mut out = String::new();
    if options.documentation {
        if let Some(doc) = docstring {
            out.push_str(&doc_block(&[doc.to_string()], 0));
        }
    }
    out.push_str(&format!("export const {} = {};\n", name, value));
    out
}

/// Whether a class-like block declares a class or an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    Class,
    Interface,
}

/// Render a class or interface shell around already rendered `members`.
///
/// Classes take `base` as `extends` and `interfaces` as `implements`;
/// interfaces list both under `extends`.
pub fn render_shell(
    kind: ShellKind,
    name: &str,
    base: Option<&str>,
    interfaces: &[String],
    docstring: Option<&str>,
    members: &[String],
    options: &Options,
) -> String {
    let mut out = String::new();
    if options.documentation {
        if let Some(doc) = docstring {
            out.push_str(&doc_block(&[doc.to_string()], 0));
        }
    }

    let mut header = match kind {
        ShellKind::Class => format!("export class {}", name),
        ShellKind::Interface => format!("export interface {}", name),
    };
    match kind {
        ShellKind::Class => {
            if let Some(base) = base {
                header.push_str(&format!(" extends {}", base));
            }
            if !interfaces.is_empty() {
                header.push_str(&format!(" implements {}", interfaces.join(", ")));
            }
        }
        ShellKind::Interface => {
            let supers: Vec<&str> = base
                .into_iter()
                .chain(interfaces.iter().map(String::as_str))
                .collect();
            if !supers.is_empty() {
                header.push_str(&format!(" extends {}", supers.join(", ")));
            }
        }
    }

    out.push_str(&header);
    out.push_str(" {\n");
    for member in members {
        out.push_str(member);
    }
    out.push_str("}\n");
    out
}

/// `import Ns from "gi://Ns?version=X";`
pub fn render_import(namespace: &str, version: Option<&str>) -> String {
    match version {
        Some(version) => format!(
            "import {} from \"gi://{}?version={}\";\n",
            namespace, namespace, version
        ),
        None => format!("import {} from \"gi://{}\";\n", namespace, namespace),
    }
}
