//! Namespace compiler: turns one GIR document into declaration text.
//!
//! Free functions and constants are rendered as they are met. Class-like
//! elements and enums go through the [`ClassGraph`] and come out after them,
//! parents first, with imports for foreign parents prepended.

use crate::config::Options;
use crate::emit::{render_callable, render_constant, render_enum, render_import};
use crate::error::{GirError, Result};
use crate::extract::{doc_text, extract_signature};
use crate::gir::Element;
use crate::graph::{extract_class, ClassGraph};
use crate::model::{ClassRecord, Compiled};
use std::collections::HashMap;
use tracing::{debug, info_span};

/// Modifiers of a top-level function declaration.
const FUNCTION_MODIFIERS: &[&str] = &["export", "function"];

/// Parse `text` and compile its single namespace.
pub fn compile_document(text: &str, options: &Options) -> Result<Compiled> {
    let doc = roxmltree::Document::parse(text)?;
    let root = Element::new(doc.root_element())
        .filter(|r| r.is("repository"))
        .ok_or_else(|| GirError::MissingRepository {
            found: doc.root_element().tag_name().name().to_string(),
        })?;

    let namespaces: Vec<Element> = root.children_named("namespace").collect();
    let namespace = match namespaces.as_slice() {
        [] => return Err(GirError::MissingNamespace),
        [ns] => *ns,
        many => return Err(GirError::MultipleNamespaces(many.len())),
    };

    compile_namespace(&namespace, &includes(&root), options)
}

/// Versions of the namespaces the repository declares it depends on.
fn includes(root: &Element) -> HashMap<String, String> {
    root.children_named("include")
        .filter_map(|inc| Some((inc.attr("name")?.to_string(), inc.attr("version")?.to_string())))
        .collect()
}

/// Compile the children of a `<namespace>` element.
///
/// `versions` maps foreign namespace names to the version used in their
/// import specifier.
pub fn compile_namespace(
    namespace: &Element,
    versions: &HashMap<String, String>,
    options: &Options,
) -> Result<Compiled> {
    let name = namespace.attr("name").ok_or(GirError::UnnamedNamespace)?;
    let _span = info_span!("namespace", namespace = name).entered();

    let mut top_level: Vec<String> = Vec::new();
    let mut graph = ClassGraph::new();

    for child in namespace.children() {
        if child.is("class") || child.is("interface") || child.is("record") {
            if let Some(record) = extract_class(&child, name, options) {
                graph.push(record);
            }
        } else if child.is("enumeration") || child.is("bitfield") {
            if let Some(record) = extract_enum(&child, options) {
                graph.push(record);
            }
        } else if child.is("function") {
            if let Some(function) = render_function(&child, options) {
                top_level.push(function);
            }
        } else if child.is("constant") {
            if let Some(constant) = render_constant_element(&child, options) {
                top_level.push(constant);
            }
        } else {
            debug!(element = child.name(), "ignoring namespace child");
        }
    }

    if !graph.is_empty() {
        debug!(records = graph.len(), "ordering class graph");
    }
    let ordering = graph.order();
    debug!(order = ?ordering.names, "class emission order");

    let mut warnings = Vec::new();
    if !ordering.stalled.is_empty() {
        warnings.push(format!(
            "{}: could not order {} (dependency cycle or undefined parent)",
            name,
            ordering.stalled.join(", ")
        ));
    }

    let imports: Vec<String> = ordering.imports.into_iter().collect();

    let mut sections: Vec<String> = Vec::new();
    if !imports.is_empty() {
        sections.push(
            imports
                .iter()
                .map(|ns| render_import(ns, versions.get(ns).map(String::as_str)))
                .collect(),
        );
    }
    sections.extend(top_level);
    sections.extend(ordering.blocks);

    Ok(Compiled {
        namespace: name.to_string(),
        text: sections.join("\n"),
        imports,
        warnings,
    })
}

fn render_function(el: &Element, options: &Options) -> Option<String> {
    let name = el.attr("name")?;
    if !el.is_introspectable() {
        debug!(function = name, "skipping non-introspectable function");
        return None;
    }
    let sig = extract_signature(el);
    Some(render_callable(
        name,
        &sig.parameters,
        &sig.returns,
        0,
        doc_text(el).as_deref(),
        FUNCTION_MODIFIERS,
        options,
    ))
}

fn render_constant_element(el: &Element, options: &Options) -> Option<String> {
    let name = el.attr("name")?;
    if !el.is_introspectable() {
        debug!(constant = name, "skipping non-introspectable constant");
        return None;
    }
    Some(render_constant(
        name,
        el.attr("value"),
        doc_text(el).as_deref(),
        options,
    ))
}

/// Enumerations and bitfields share the class record shape, without parents.
fn extract_enum(el: &Element, options: &Options) -> Option<ClassRecord> {
    let name = el.attr("name")?;
    if !el.is_introspectable() {
        debug!(enumeration = name, "skipping non-introspectable enum");
        return None;
    }
    let members: Vec<(String, String)> = el
        .children_named("member")
        .filter_map(|m| Some((m.attr("name")?.to_string(), m.attr("value")?.to_string())))
        .collect();

    Some(ClassRecord {
        name: name.to_string(),
        parents: Vec::new(),
        contents: render_enum(name, doc_text(el).as_deref(), &members, options),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gir(body: &str) -> String {
        format!(
            r#"<?xml version="1.0"?>
<repository version="1.2"
            xmlns="http://www.gtk.org/introspection/core/1.0"
            xmlns:c="http://www.gtk.org/introspection/c/1.0"
            xmlns:glib="http://www.gtk.org/introspection/glib/1.0">
  <include name="Gtk" version="4.0"/>
  <namespace name="Demo" version="1.0">{}</namespace>
</repository>"#,
            body
        )
    }

    fn compile(body: &str, options: &Options) -> Compiled {
        compile_document(&gir(body), options).unwrap()
    }

    #[test]
    fn enum_members_uppercased_and_prefixed() {
        let out = compile(
            r#"<enumeration name="Color">
                 <member name="red" value="1"/>
                 <member name="0blue" value="2"/>
               </enumeration>"#,
            &Options::bare(),
        );
        assert_eq!(
            out.text,
            "export enum Color {\n    RED = \"1\",\n    _0BLUE = \"2\",\n}\n"
        );
    }

    #[test]
    fn reserved_function_name() {
        let out = compile(r#"<function name="delete"/>"#, &Options::bare());
        assert_eq!(out.text, "export function _delete(): void;\n");
    }

    #[test]
    fn local_parent_ordered_and_foreign_imported() {
        let out = compile(
            r#"<class name="B" parent="A"><implements name="Gtk.Widget"/></class>
               <class name="A"/>"#,
            &Options::bare(),
        );
        assert_eq!(out.imports, ["Gtk"]);
        assert_eq!(
            out.text,
            "import Gtk from \"gi://Gtk?version=4.0\";\n\
             \n\
             export class A {\n}\n\
             \n\
             export class B extends A implements Gtk.Widget {\n}\n"
        );
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn foreign_namespace_imported_once() {
        let out = compile(
            r#"<class name="X" parent="Gio.Application"/>
               <class name="Y" parent="Gio.Application"><implements name="Gio.ActionMap"/></class>"#,
            &Options::bare(),
        );
        assert_eq!(out.imports, ["Gio"]);
        assert_eq!(out.text.matches("import Gio from \"gi://Gio\";").count(), 1);
    }

    #[test]
    fn documentation_off_has_no_comment_blocks() {
        let body = r#"<function name="init">
                        <doc>Initialises everything.</doc>
                        <parameters><parameter name="argc"><doc>count</doc><type name="gint"/></parameter></parameters>
                        <return-value><doc>success</doc><type name="gboolean"/></return-value>
                      </function>"#;
        let bare = compile(body, &Options::bare());
        assert_eq!(bare.text, "export function init(argc: number): boolean;\n");
        assert!(!bare.text.contains("/**"));

        let documented = compile(body, &Options::default());
        assert_eq!(
            documented.text,
            "/**\n * Initialises everything.\n * @param argc count\n * @returns success\n */\n\
             export function init(argc: number): boolean;\n"
        );
    }

    #[test]
    fn output_sections_in_order() {
        let out = compile(
            r#"<class name="Window" parent="Gtk.Window"/>
               <function name="main"/>
               <enumeration name="Mode"><member name="on" value="1"/></enumeration>
               <constant name="VERSION" value="1.0"><type name="utf8"/></constant>"#,
            &Options::bare(),
        );
        let import = out.text.find("import Gtk").unwrap();
        let main = out.text.find("export function main").unwrap();
        let version = out.text.find("export const VERSION = \"1.0\";").unwrap();
        let window = out.text.find("export class Window").unwrap();
        let mode = out.text.find("export enum Mode").unwrap();
        assert!(import < main && main < version && version < window && window < mode);
    }

    #[test]
    fn constants_without_value_or_with_digit_names() {
        let out = compile(
            r#"<constant name="NOTHING"/><constant name="2PI" value="6.28"/>"#,
            &Options::bare(),
        );
        assert_eq!(
            out.text,
            "export const NOTHING = null;\n\nexport const _2PI = \"6.28\";\n"
        );
    }

    #[test]
    fn cycles_are_emitted_with_a_warning() {
        let out = compile(
            r#"<class name="P" parent="Q"/><class name="Q" parent="P"/>"#,
            &Options::bare(),
        );
        assert!(out.text.contains("export class P extends Q"));
        assert!(out.text.contains("export class Q extends P"));
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("P, Q"));
    }

    #[test]
    fn own_namespace_parent_is_ordered_not_imported() {
        let out = compile(
            r#"<class name="Sub" parent="Demo.Late"/><class name="Late"/>"#,
            &Options::bare(),
        );
        assert!(out.imports.is_empty());
        assert!(out.warnings.is_empty());
        assert_eq!(
            out.text,
            "export class Late {\n}\n\nexport class Sub extends Late {\n}\n"
        );
    }

    #[test]
    fn non_introspectable_enums_and_constants_skipped() {
        let out = compile(
            r#"<constant name="SHOWN" value="1"/>
               <constant name="HIDDEN" value="2" introspectable="0"/>
               <enumeration name="Secret" introspectable="0"><member name="a" value="0"/></enumeration>
               <bitfield name="Mask" introspectable="0"><member name="b" value="1"/></bitfield>"#,
            &Options::bare(),
        );
        assert_eq!(out.text, "export const SHOWN = \"1\";\n");
    }

    #[test]
    fn non_introspectable_function_skipped() {
        let out = compile(
            r#"<function name="visible"/><function name="hidden" introspectable="0"/>"#,
            &Options::bare(),
        );
        assert_eq!(out.text, "export function visible(): void;\n");
    }

    #[test]
    fn structural_errors() {
        let opts = Options::default();
        assert!(matches!(
            compile_document("<not-xml", &opts),
            Err(GirError::Xml(_))
        ));
        assert!(matches!(
            compile_document("<library/>", &opts),
            Err(GirError::MissingRepository { found }) if found == "library"
        ));
        assert!(matches!(
            compile_document(
                r#"<repository xmlns="http://www.gtk.org/introspection/core/1.0"/>"#,
                &opts
            ),
            Err(GirError::MissingNamespace)
        ));
        assert!(matches!(
            compile_document(
                r#"<repository xmlns="http://www.gtk.org/introspection/core/1.0">
                     <namespace name="A"/><namespace name="B"/></repository>"#,
                &opts
            ),
            Err(GirError::MultipleNamespaces(2))
        ));
        assert!(matches!(
            compile_document(
                r#"<repository xmlns="http://www.gtk.org/introspection/core/1.0"><namespace/></repository>"#,
                &opts
            ),
            Err(GirError::UnnamedNamespace)
        ));
    }

    #[test]
    fn repository_outside_core_namespace_rejected() {
        assert!(matches!(
            compile_document("<repository><namespace name=\"X\"/></repository>", &Options::default()),
            Err(GirError::MissingRepository { .. })
        ));
    }
}
