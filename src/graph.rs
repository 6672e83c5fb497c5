//! Class graph: extraction of class-like elements and dependency-ordered
//! emission.
//!
//! A class may only be written once every parent declared in the same
//! namespace has been written. Parents from other namespaces add an import
//! instead of an ordering edge.

use crate::config::Options;
use crate::emit::{render_callable, render_constructor, render_shell, ShellKind};
use crate::extract::{doc_text, extract_signature};
use crate::gir::{Element, GLIB_NS};
use crate::model::{ClassRecord, ReturnType, NAMESPACE_SEPARATOR};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Member indentation inside a class body.
const MEMBER_DEPTH: usize = 1;

/// Name of the constructor rendered as `constructor(...)`.
const PRIMARY_CONSTRUCTOR: &str = "new";

/// Prefix GJS gives to overridable virtual methods.
const VFUNC_PREFIX: &str = "vfunc_";

/// Build the record for a `<class>`, `<interface>` or `<record>` element.
///
/// Parents qualified with `namespace` (the one being compiled) are reduced to
/// their bare name so they order like any other local parent.
///
/// Returns `None` for unnamed or non-introspectable elements and for records
/// that only exist as GType class structs.
pub fn extract_class(el: &Element, namespace: &str, options: &Options) -> Option<ClassRecord> {
    let name = el.attr("name")?;
    if !el.is_introspectable() {
        debug!(class = name, "skipping non-introspectable type");
        return None;
    }
    if el.is("record")
        && (el.ns_attr(GLIB_NS, "is-gtype-struct-for").is_some() || el.attr("disguised") == Some("1"))
    {
        debug!(record = name, "skipping class struct");
        return None;
    }

    let kind = if el.is("interface") {
        ShellKind::Interface
    } else {
        ShellKind::Class
    };
    let base = el.attr("parent").map(|p| local_name(p, namespace));
    let interfaces: Vec<String> = el
        .children_named("implements")
        .filter_map(|i| i.attr("name"))
        .map(|i| local_name(i, namespace).to_string())
        .collect();

    let mut constructors = Vec::new();
    let mut methods = Vec::new();
    for child in el.children() {
        if !child.is_introspectable() {
            continue;
        }
        let Some(member) = child.attr("name") else {
            continue;
        };
        let doc = doc_text(&child);
        let doc = doc.as_deref();

        if child.is("constructor") && kind == ShellKind::Class {
            let sig = extract_signature(&child);
            if member == PRIMARY_CONSTRUCTOR {
                constructors.push(render_constructor(&sig.parameters, MEMBER_DEPTH, doc, options));
            } else {
                let ret = ReturnType {
                    ty: name.to_string(),
                    doc: sig.returns.doc,
                };
                constructors.push(render_callable(
                    member,
                    &sig.parameters,
                    &ret,
                    MEMBER_DEPTH,
                    doc,
                    &["static"],
                    options,
                ));
            }
        } else if child.is("method") {
            let sig = extract_signature(&child);
            methods.push(render_callable(
                member,
                &sig.parameters,
                &sig.returns,
                MEMBER_DEPTH,
                doc,
                &[],
                options,
            ));
        } else if child.is("function") && kind == ShellKind::Class {
            let sig = extract_signature(&child);
            methods.push(render_callable(
                member,
                &sig.parameters,
                &sig.returns,
                MEMBER_DEPTH,
                doc,
                &["static"],
                options,
            ));
        } else if child.is("virtual-method") {
            let sig = extract_signature(&child);
            methods.push(render_callable(
                &format!("{}{}", VFUNC_PREFIX, member),
                &sig.parameters,
                &sig.returns,
                MEMBER_DEPTH,
                doc,
                &[],
                options,
            ));
        }
    }

    constructors.extend(methods);
    let contents = render_shell(
        kind,
        name,
        base,
        &interfaces,
        doc_text(el).as_deref(),
        &constructors,
        options,
    );

    let mut parents: Vec<String> = base.map(String::from).into_iter().collect();
    parents.extend(interfaces);

    Some(ClassRecord {
        name: name.to_string(),
        parents,
        contents,
    })
}

/// `Demo.Base` -> `Base` inside `Demo`; other names unchanged.
fn local_name<'n>(name: &'n str, namespace: &str) -> &'n str {
    name.strip_prefix(namespace)
        .and_then(|rest| rest.strip_prefix(NAMESPACE_SEPARATOR))
        .unwrap_or(name)
}

/// Registry of class-like records in document order.
#[derive(Debug, Default)]
pub struct ClassGraph {
    records: Vec<ClassRecord>,
}

/// Outcome of ordering a [`ClassGraph`].
#[derive(Debug, Default)]
pub struct Ordering {
    /// Rendered blocks, parents before children.
    pub blocks: Vec<String>,
    /// Record names in emission order.
    pub names: Vec<String>,
    /// Foreign namespaces referenced by any parent.
    pub imports: BTreeSet<String>,
    /// Records whose local parents could never be satisfied (cycle or
    /// undefined parent). They are appended after the ordered ones.
    pub stalled: Vec<String>,
}

impl ClassGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ClassRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the registry and emit records in dependency-safe order.
    ///
    /// Each pass writes every pending record whose local parents are all
    /// written. A pass that writes nothing ends the loop; whatever is left
    /// is emitted as-is and reported in [`Ordering::stalled`].
    pub fn order(self) -> Ordering {
        let mut ordering = Ordering::default();
        let mut written: HashSet<String> = HashSet::new();
        let mut pending = self.records;

        while !pending.is_empty() {
            let mut progressed = false;
            let mut remaining = Vec::with_capacity(pending.len());

            for record in pending {
                if record.local_parents().all(|p| written.contains(p)) {
                    written.insert(record.name.clone());
                    ordering.write(record);
                    progressed = true;
                } else {
                    remaining.push(record);
                }
            }
            pending = remaining;

            if !progressed {
                for record in pending {
                    ordering.stalled.push(record.name.clone());
                    ordering.write(record);
                }
                break;
            }
        }

        ordering
    }
}

impl Ordering {
    fn write(&mut self, record: ClassRecord) {
        self.imports
            .extend(record.foreign_namespaces().map(String::from));
        self.names.push(record.name);
        self.blocks.push(record.contents);
    }
}
