//! Reflective class tokens and nominal-reference resolution.
//!
//! A [`ClassToken`] describes a loaded platform class independently of any
//! [`TypeEnv`]: it carries its own array/primitive/finality information the
//! way a reflection handle does. Resolving a token — or a canonical name
//! string — against an environment is a separate, fallible step; the
//! functions here never invent declarations, they only find existing ones.

use crate::{ClassId, PrimitiveType, Type, TypeEnv};

#[derive(Clone, Debug, PartialEq, Eq)]
enum TokenRepr {
    Class {
        name: String,
        is_final: bool,
        annotation: bool,
    },
    Primitive(PrimitiveType),
    Array(Box<ClassToken>),
}

/// A reflective description of a loaded platform class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassToken {
    repr: TokenRepr,
}

impl ClassToken {
    /// A non-final class or interface.
    pub fn class(binary_name: impl Into<String>) -> Self {
        ClassToken {
            repr: TokenRepr::Class {
                name: binary_name.into(),
                is_final: false,
                annotation: false,
            },
        }
    }

    /// A final class. Enums and records carry the final modifier too.
    pub fn final_class(binary_name: impl Into<String>) -> Self {
        ClassToken {
            repr: TokenRepr::Class {
                name: binary_name.into(),
                is_final: true,
                annotation: false,
            },
        }
    }

    /// An annotation type.
    pub fn annotation(binary_name: impl Into<String>) -> Self {
        ClassToken {
            repr: TokenRepr::Class {
                name: binary_name.into(),
                is_final: false,
                annotation: true,
            },
        }
    }

    pub fn primitive(p: PrimitiveType) -> Self {
        ClassToken {
            repr: TokenRepr::Primitive(p),
        }
    }

    /// The array type with `self` as component.
    pub fn array_of(self) -> Self {
        ClassToken {
            repr: TokenRepr::Array(Box::new(self)),
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self.repr, TokenRepr::Array(_))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self.repr, TokenRepr::Primitive(_))
    }

    pub fn is_annotation(&self) -> bool {
        matches!(
            self.repr,
            TokenRepr::Class {
                annotation: true,
                ..
            }
        )
    }

    /// The component token, for array tokens.
    pub fn component(&self) -> Option<&ClassToken> {
        match &self.repr {
            TokenRepr::Array(component) => Some(component),
            _ => None,
        }
    }

    /// The binary name of a non-array token. Primitives report their
    /// source-level name.
    pub fn binary_name(&self) -> Option<&str> {
        match &self.repr {
            TokenRepr::Class { name, .. } => Some(name),
            TokenRepr::Primitive(p) => Some(p.name()),
            TokenRepr::Array(_) => None,
        }
    }

    /// Whether no proper subtype of this class can exist.
    ///
    /// Final non-array classes and primitives qualify. Arrays stay
    /// covariant even though the array class itself is final, and
    /// annotation types may be implemented by classes.
    pub fn has_no_subtypes(&self) -> bool {
        match &self.repr {
            TokenRepr::Primitive(_) => true,
            TokenRepr::Class { is_final, .. } => *is_final,
            TokenRepr::Array(_) => false,
        }
    }
}

/// Resolve a reflective token against `env`.
///
/// Returns `None` when the environment has no declaration for the token's
/// class (or, for arrays, for the leaf component class).
pub fn load_token(env: &dyn TypeEnv, token: &ClassToken) -> Option<Type> {
    match &token.repr {
        TokenRepr::Primitive(p) => Some(Type::Primitive(*p)),
        TokenRepr::Array(component) => load_token(env, component).map(Type::array),
        TokenRepr::Class { name, .. } => match env.lookup_class(name) {
            Some(id) => Some(Type::class(id, vec![])),
            None => {
                tracing::trace!(name = name.as_str(), "class token did not resolve");
                None
            }
        },
    }
}

/// Resolve a whitespace-free canonical name against `env`.
///
/// Accepts primitive names (`int`), dotted class names
/// (`java.util.List`, `a.b.Outer.Inner`), and `[]`-suffixed array forms of
/// either (`java.lang.String[]`).
pub fn load_type(env: &dyn TypeEnv, name: &str) -> Option<Type> {
    let mut element = name;
    let mut dims = 0usize;
    while let Some(rest) = element.strip_suffix("[]") {
        element = rest;
        dims += 1;
    }

    let base = if let Some(p) = PrimitiveType::from_name(element) {
        Type::Primitive(p)
    } else {
        match lookup_canonical(env, element) {
            Some(id) => Type::class(id, vec![]),
            None => {
                tracing::trace!(name, "canonical name did not resolve");
                return None;
            }
        }
    };
    Some((0..dims).fold(base, |ty, _| Type::array(ty)))
}

/// Find the class whose canonical name is `name`.
///
/// Canonical nesting is dot-separated while binary nesting uses `$`, so
/// `a.b.Outer.Inner` is probed as `a.b.Outer.Inner`, then `a.b.Outer$Inner`,
/// then `a.b$Outer$Inner`, and so on.
fn lookup_canonical(env: &dyn TypeEnv, name: &str) -> Option<ClassId> {
    if let Some(id) = env.lookup_class(name) {
        return Some(id);
    }
    let mut binary = name.to_string();
    while let Some(idx) = binary.rfind('.') {
        binary.replace_range(idx..idx + 1, "$");
        if let Some(id) = env.lookup_class(&binary) {
            return Some(id);
        }
    }
    None
}
