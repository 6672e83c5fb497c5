//! Native (GLib/C) type names to TypeScript type names.

/// Internal marker for "no value"; rendered as `void` in return position.
pub const NULL_SENTINEL: &str = "null";

/// Fallback for every native type without a table entry.
pub const OPAQUE: &str = "any";

/// Fixed native-to-target mapping.
pub const TYPE_TABLE: &[(&str, &str)] = &[
    ("gboolean", "boolean"),
    ("bool", "boolean"),
    ("gchar", "number"),
    ("guchar", "number"),
    ("gshort", "number"),
    ("gushort", "number"),
    ("gint", "number"),
    ("guint", "number"),
    ("glong", "number"),
    ("gulong", "number"),
    ("gint8", "number"),
    ("guint8", "number"),
    ("gint16", "number"),
    ("guint16", "number"),
    ("gint32", "number"),
    ("guint32", "number"),
    ("gint64", "number"),
    ("guint64", "number"),
    ("gsize", "number"),
    ("gssize", "number"),
    ("goffset", "number"),
    ("gintptr", "number"),
    ("guintptr", "number"),
    ("int", "number"),
    ("long", "number"),
    ("gfloat", "number"),
    ("gdouble", "number"),
    ("float", "number"),
    ("double", "number"),
    ("utf8", "string"),
    ("filename", "string"),
    ("gunichar", "string"),
    ("gchar*", "string"),
    ("char*", "string"),
    ("none", NULL_SENTINEL),
];

/// Resolve a native type name. Total: unknown names become [`OPAQUE`].
pub fn map_type(native: &str) -> &'static str {
    let name = native.trim();
    let name = name.strip_prefix("const ").unwrap_or(name).trim();
    TYPE_TABLE
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| *to)
        .unwrap_or(OPAQUE)
}
