//! # C Keywords
//!
//! Keyword vocabulary of the C lexer, in lexer table order.

/// Reserved words recognized by the C lexer.
pub const KEYWORDS: &[&str] = &[
    "auto",
    "break",
    "case",
    "char",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extern",
    "float",
    "for",
    "goto",
    "if",
    "inline",
    "int",
    "long",
    "register",
    "offsetof",
    "restrict",
    "return",
    "short",
    "signed",
    "sizeof",
    "static",
    "struct",
    "switch",
    "typedef",
    "union",
    "unsigned",
    "void",
    "volatile",
    "while",
    "__int128",
    "_Bool",
    "_Complex",
    "_Noreturn",
    "_Thread_local",
    "_Static_assert",
    "_Atomic",
    "_Alignof",
    "_Alignas",
    "_Pragma",
];

/// Check whether `word` is a C keyword.
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keywords_are_unique() {
        let unique: HashSet<_> = KEYWORDS.iter().collect();
        assert_eq!(unique.len(), KEYWORDS.len());
    }

    #[test]
    fn test_is_keyword() {
        assert!(is_keyword("typedef"));
        assert!(is_keyword("_Static_assert"));
        assert!(!is_keyword("main"));
    }
}
