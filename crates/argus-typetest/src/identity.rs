//! Type identity tests between nominal references and resolved types.
//!
//! The nominal side of a test is either a reflective
//! [`ClassToken`](argus_types::ClassToken) or a validated [`TypeName`];
//! the other side is an element's resolved static type, which may be
//! absent. Absent types never match. Type arguments are ignored
//! throughout: `is_a(List)` holds for an `ArrayList<String>` just as for a
//! raw `ArrayList`.
//!
//! Where the model cannot answer soundly, the tests narrow deliberately:
//!
//! - if either side is unresolved, types are compared by symbol name
//!   instead of asking the (optimistic) subtype relation;
//! - primitives are never subtype-related to one another here, even though
//!   [`is_subtype`] widens them;
//! - anonymous classes have no canonical name to compare, so a name-based
//!   exact test answers [`Trilean::Unknown`] and every caller resolves
//!   that conservatively to "no match".

use argus_types::{
    is_subtype, is_unresolved, load_token, load_type, ClassDef, ClassKind, ClassToken, MethodSig,
    Type, TypeEnv,
};

use crate::names::TypeName;

/// A three-valued answer, for questions without a definite yes or no.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trilean {
    Yes,
    No,
    Unknown,
}

impl Trilean {
    /// A definite answer.
    pub fn definitely(value: bool) -> Self {
        if value {
            Trilean::Yes
        } else {
            Trilean::No
        }
    }

    pub fn is_yes(self) -> bool {
        matches!(self, Trilean::Yes)
    }
}

/// Tests whether `ty` is a subtype of the class the token describes.
///
/// ```text
/// is_a(List,     <ArrayList<String>>) = true
/// is_a(ArrayList,<ArrayList<String>>) = true
/// is_a(int[],    <int[]>)             = true
/// is_a(Object[], <String[]>)          = true
/// is_a(_,        absent)              = false
/// ```
///
/// If the token cannot be resolved against `ty`'s environment, or `ty` is
/// unresolved, the types are compared by symbol name instead — an
/// unresolved type must not match just because the subtype relation is
/// optimistic about unknowns. Primitive tokens only match the identical
/// primitive.
pub fn is_a(env: &dyn TypeEnv, token: &ClassToken, ty: Option<&Type>) -> bool {
    let Some(ty) = ty else { return false };
    if token.has_no_subtypes() {
        // Subtype testing against a type with no subtypes is equality.
        return exact_token(env, token, ty);
    }
    match load_token(env, token) {
        Some(other) if !is_unresolved(env, ty) && !other.is_primitive() => {
            is_subtype(env, ty, &other)
        }
        // Subtyping is untrustworthy here; equal symbols still match.
        _ => exact_token(env, token, ty),
    }
}

/// Tests whether `ty` is exactly the class the token describes, ignoring
/// strict supertypes and type arguments.
///
/// ```text
/// is_exactly_a(List,     <ArrayList<String>>) = false
/// is_exactly_a(ArrayList,<ArrayList<String>>) = true
/// is_exactly_a(int[],    <int[]>)             = true
/// is_exactly_a(Object[], <String[]>)          = false
/// is_exactly_a(_,        absent)              = false
/// ```
pub fn is_exactly_a(env: &dyn TypeEnv, token: &ClassToken, ty: Option<&Type>) -> bool {
    ty.is_some_and(|ty| exact_token(env, token, ty))
}

/// Tests whether `ty` is a subtype of the class named by `name`. See
/// [`is_a`] for the general contract.
///
/// An element typed by an anonymous class never matches: its name equality
/// is unknowable, and it is resolved conservatively as "not equal" rather
/// than falling through to a subtype walk.
pub fn is_a_named(env: &dyn TypeEnv, name: &TypeName, ty: Option<&Type>) -> bool {
    let Some(ty) = ty else { return false };

    match canonical_equals(env, name, ty) {
        Trilean::Yes => return true,
        Trilean::Unknown => return false,
        Trilean::No => {}
    }

    if let Some(def) = class_symbol(env, ty) {
        if def.kind == ClassKind::Annotation {
            // In source, an annotation type's only reachable supertypes are
            // Object and the annotation marker interface, regardless of how
            // the type is implemented at the bytecode level.
            return is_annotation_supertype(name);
        }
        if def.is_unresolved {
            // No useful supertype info; the subtype relation would answer
            // optimistically. Equality was already tested above.
            return false;
        }
    }

    let Some(other) = load_type(env, name.as_str()) else {
        return false;
    };
    if class_symbol(env, &other).is_some_and(|def| def.canonical_name.is_none()) {
        // The name resolved to an anonymous class; equality already said No.
        return false;
    }
    if other.is_primitive() {
        // The general relation treats primitive widening like subtyping;
        // a primitive name only matches the identical primitive.
        return other == *ty;
    }
    is_subtype(env, ty, &other)
}

/// Tests whether `ty` is exactly the class named by `name`. Anonymous
/// classes never match.
pub fn is_exactly_a_named(env: &dyn TypeEnv, name: &TypeName, ty: Option<&Type>) -> bool {
    ty.is_some_and(|ty| canonical_equals(env, name, ty).is_yes())
}

/// Whether `sig` is declared by exactly the class the token describes.
pub fn is_declared_in_class(env: &dyn TypeEnv, token: &ClassToken, sig: &MethodSig) -> bool {
    exact_token(env, token, &sig.declaring)
}

/// Tri-state exact test between a canonical name and a resolved type.
///
/// This is the single producer of [`Trilean::Unknown`]: the type has a
/// class symbol but no canonical name (an anonymous class), so name
/// equality is undecidable. Types without a class symbol — type variables —
/// are a definite [`Trilean::No`].
pub(crate) fn canonical_equals(env: &dyn TypeEnv, name: &TypeName, ty: &Type) -> Trilean {
    match canonical_name(env, ty) {
        CanonicalName::NoSymbol => Trilean::No,
        CanonicalName::Anonymous => Trilean::Unknown,
        CanonicalName::Named(canonical) => Trilean::definitely(canonical == name.as_str()),
    }
}

enum CanonicalName {
    NoSymbol,
    Anonymous,
    Named(String),
}

fn canonical_name(env: &dyn TypeEnv, ty: &Type) -> CanonicalName {
    match ty {
        Type::Primitive(p) => CanonicalName::Named(p.name().to_string()),
        Type::TypeVar(_) => CanonicalName::NoSymbol,
        Type::Class(ct) => match env.class(ct.def) {
            None => CanonicalName::NoSymbol,
            Some(def) => match &def.canonical_name {
                Some(canonical) => CanonicalName::Named(canonical.clone()),
                None => CanonicalName::Anonymous,
            },
        },
        Type::Array(component) => match canonical_name(env, component) {
            CanonicalName::Named(mut canonical) => {
                canonical.push_str("[]");
                CanonicalName::Named(canonical)
            }
            other => other,
        },
    }
}

/// Symbol-level exact test between a token and a resolved type: arrays are
/// compared structurally down to a common leaf, everything else by binary
/// name.
fn exact_token(env: &dyn TypeEnv, token: &ClassToken, ty: &Type) -> bool {
    if let Some(component) = token.component() {
        return matches!(ty, Type::Array(c) if exact_token(env, component, c));
    }
    match ty {
        Type::Primitive(p) => token.binary_name() == Some(p.name()),
        Type::Class(ct) => env
            .class(ct.def)
            .is_some_and(|def| token.binary_name() == Some(def.name.as_str())),
        // A token cannot reference a type parameter, and a non-array token
        // never matches an array type.
        Type::Array(_) | Type::TypeVar(_) => false,
    }
}

fn class_symbol<'e>(env: &'e dyn TypeEnv, ty: &Type) -> Option<&'e ClassDef> {
    match ty {
        Type::Class(ct) => env.class(ct.def),
        _ => None,
    }
}

fn is_annotation_supertype(name: &TypeName) -> bool {
    matches!(
        name.as_str(),
        "java.lang.Object" | "java.lang.annotation.Annotation"
    )
}
