//! Validation of nominal type references.
//!
//! Names are validated when a reference is constructed, never when it is
//! matched: a [`TypeName`] that exists is always well-formed.

use std::fmt;

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("not a valid type name: `{name}`")]
pub struct InvalidTypeName {
    pub name: String,
}

/// A validated canonical type name: a dot-separated qualified name with
/// optional `[]` suffixes.
///
/// Whitespace in the input is insignificant and stripped on construction,
/// so `"java . util . List"` and `"java.util.List"` are the same name.
/// Generics, wildcards, and descriptor syntax are rejected — only plain
/// class, primitive, and array names are representable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeName {
    text: String,
    element_len: usize,
}

impl TypeName {
    pub fn parse(input: &str) -> Result<Self, InvalidTypeName> {
        let text: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        let mut element = text.as_str();
        while let Some(rest) = element.strip_suffix("[]") {
            element = rest;
        }
        if !is_valid_qualified_name(element) {
            return Err(InvalidTypeName {
                name: input.to_string(),
            });
        }
        let element_len = element.len();
        Ok(TypeName { text, element_len })
    }

    /// The whitespace-stripped spelling, array suffixes included.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The element name, with array suffixes removed.
    pub fn element(&self) -> &str {
        &self.text[..self.element_len]
    }

    pub fn is_array(&self) -> bool {
        self.element_len != self.text.len()
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

pub(crate) fn is_ident_start(ch: char) -> bool {
    ch == '_' || ch == '$' || unicode_ident::is_xid_start(ch)
}

pub(crate) fn is_ident_part(ch: char) -> bool {
    ch == '$' || ch == '_' || unicode_ident::is_xid_continue(ch)
}

fn is_valid_qualified_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    name.split('.').all(|segment| {
        let mut chars = segment.chars();
        chars.next().is_some_and(is_ident_start) && chars.all(is_ident_part)
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn accepts_qualified_and_array_names() {
        let list = TypeName::parse("java.util.List").expect("plain qualified name");
        assert_eq!(list.as_str(), "java.util.List");
        assert_eq!(list.element(), "java.util.List");
        assert!(!list.is_array());

        let arr = TypeName::parse("java.lang.String[][]").expect("array name");
        assert_eq!(arr.element(), "java.lang.String");
        assert!(arr.is_array());

        // Primitive names are ordinary identifiers.
        assert!(TypeName::parse("int").is_ok());
        assert!(TypeName::parse("int[]").is_ok());
    }

    #[test]
    fn whitespace_is_insignificant() {
        let name = TypeName::parse(" java . util\t. List ").expect("whitespace-laden name");
        assert_eq!(name.as_str(), "java.util.List");
    }

    #[test]
    fn rejects_malformed_names() {
        for bad in [
            "",
            " ",
            "java..util.List",
            ".List",
            "List.",
            "List<String>",
            "not-a-name!",
            "[]",
            "1stClass",
            "a.1b",
        ] {
            assert!(TypeName::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn dollar_and_underscore_are_identifier_characters() {
        assert!(TypeName::parse("com.example.Outer$Inner").is_ok());
        assert!(TypeName::parse("_").is_ok());
        assert!(TypeName::parse("$tart").is_ok());
    }
}
