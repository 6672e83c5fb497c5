//! Data model shared by extraction, emission and ordering.

use crate::types::NULL_SENTINEL;

/// Separator between a namespace and a type name (`Gtk.Widget`).
pub const NAMESPACE_SEPARATOR: char = '.';

/// A single callable parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Sanitized identifier; `...other` for the variadic marker.
    pub name: String,
    /// Resolved target type.
    pub ty: String,
    pub doc: Option<String>,
}

impl Parameter {
    /// Rest parameters collect the trailing variadic arguments.
    pub fn is_rest(&self) -> bool {
        self.name.starts_with("...")
    }
}

/// Return value of a callable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnType {
    /// Resolved target type, [`NULL_SENTINEL`] when nothing is returned.
    pub ty: String,
    pub doc: Option<String>,
}

impl ReturnType {
    pub fn none() -> Self {
        Self {
            ty: NULL_SENTINEL.to_string(),
            doc: None,
        }
    }

    pub fn is_none(&self) -> bool {
        self.ty == NULL_SENTINEL
    }
}

impl Default for ReturnType {
    fn default() -> Self {
        Self::none()
    }
}

/// Extracted shape of a method, function, constructor or virtual method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    pub parameters: Vec<Parameter>,
    pub returns: ReturnType,
}

/// A class-like declaration waiting for dependency-ordered emission.
///
/// Enums use the same shape with no parents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRecord {
    pub name: String,
    /// Native base first (if any), then implemented interfaces.
    pub parents: Vec<String>,
    /// Fully rendered declaration block.
    pub contents: String,
}

impl ClassRecord {
    /// Parents declared in the namespace being compiled.
    pub fn local_parents(&self) -> impl Iterator<Item = &str> {
        self.parents
            .iter()
            .map(String::as_str)
            .filter(|p| !p.contains(NAMESPACE_SEPARATOR))
    }

    /// Namespaces of parents declared elsewhere (`Gtk` for `Gtk.Widget`).
    pub fn foreign_namespaces(&self) -> impl Iterator<Item = &str> {
        self.parents
            .iter()
            .filter_map(|p| p.split_once(NAMESPACE_SEPARATOR))
            .map(|(ns, _)| ns)
    }
}

/// Result of compiling one GIR document.
#[derive(Debug, Clone, Default)]
pub struct Compiled {
    /// `name` attribute of the `<namespace>` element.
    pub namespace: String,
    /// Complete declaration text.
    pub text: String,
    /// Foreign namespaces imported, sorted.
    pub imports: Vec<String>,
    /// Non-fatal conditions worth reporting (ordering stalls).
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(parents: &[&str]) -> ClassRecord {
        ClassRecord {
            name: "B".into(),
            parents: parents.iter().map(|p| p.to_string()).collect(),
            contents: String::new(),
        }
    }

    #[test]
    fn splits_local_and_foreign_parents() {
        let rec = record(&["A", "Gtk.Widget", "Gio.ListModel", "Orientable"]);
        assert_eq!(rec.local_parents().collect::<Vec<_>>(), ["A", "Orientable"]);
        assert_eq!(rec.foreign_namespaces().collect::<Vec<_>>(), ["Gtk", "Gio"]);
    }

    #[test]
    fn default_return_is_none() {
        assert!(ReturnType::default().is_none());
        assert!(Signature::default().returns.is_none());
    }
}
