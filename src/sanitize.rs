//! Identifier sanitizer for the TypeScript declaration target.
//!
//! An identifier is usable as a bare binding when it is lexically valid and
//! not one of the words below. Callers prefix unusable names with `_`.

use regex::Regex;
use std::sync::LazyLock;

static RE_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// ECMAScript reserved words plus the strict-mode and module-mode words that
/// cannot name a parameter or local binding.
const RESERVED: &[&str] = &[
    "arguments",
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "eval",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

/// True if `word` cannot be used as a bare local-variable identifier.
pub fn is_reserved_identifier(word: &str) -> bool {
    !RE_IDENT.is_match(word) || RESERVED.contains(&word)
}

/// `word`, prefixed with `_` when it is reserved or malformed.
pub fn safe_identifier(word: &str) -> String {
    if is_reserved_identifier(word) {
        format!("_{}", word)
    } else {
        word.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_reserved() {
        for word in ["delete", "this", "function", "new", "in", "yield"] {
            assert!(is_reserved_identifier(word), "{word}");
        }
    }

    #[test]
    fn malformed_words_are_reserved() {
        assert!(is_reserved_identifier(""));
        assert!(is_reserved_identifier("0day"));
        assert!(is_reserved_identifier("foo-bar"));
        assert!(is_reserved_identifier("a b"));
    }

    #[test]
    fn plain_words_are_not_reserved() {
        for word in ["widget", "_private", "$el", "label2", "Delete"] {
            assert!(!is_reserved_identifier(word), "{word}");
        }
    }

    #[test]
    fn safe_identifier_prefixes() {
        assert_eq!(safe_identifier("delete"), "_delete");
        assert_eq!(safe_identifier("label"), "label");
        assert_eq!(safe_identifier("2d"), "_2d");
    }
}
