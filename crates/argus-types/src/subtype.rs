//! Erased subtyping over the shared type model.

use std::collections::{HashSet, VecDeque};

use crate::{ClassId, Type, TypeEnv};

/// Erased subtype test: `a <: b`.
///
/// Implements the slice of JLS 4.10 the model carries: reflexivity,
/// primitive widening (5.1.2), the class/interface supertype graph (with
/// every interface implicitly reaching `Object`), array covariance for
/// reference components, and the `Object`/`Cloneable`/`Serializable` array
/// supertypes. A type variable is a subtype of whatever one of its upper
/// bounds is.
///
/// Unresolved classes are answered **optimistically**: their supertype
/// information is missing, so the relation claims `true` rather than
/// denying a relationship it cannot see. Callers that need a trustworthy
/// answer must check [`is_unresolved`] first.
pub fn is_subtype(env: &dyn TypeEnv, a: &Type, b: &Type) -> bool {
    if a == b {
        return true;
    }
    match (a, b) {
        (Type::Primitive(p), Type::Primitive(q)) => p.widens_to(*q),
        (Type::Primitive(_), _) | (_, Type::Primitive(_)) => false,
        (Type::TypeVar(v), _) => env.type_param(*v).is_some_and(|param| {
            param
                .upper_bounds
                .iter()
                .any(|bound| is_subtype(env, bound, b))
        }),
        (_, Type::TypeVar(_)) => false,
        (Type::Array(s), Type::Array(t)) => match (s.as_ref(), t.as_ref()) {
            // Primitive-component arrays are invariant.
            (Type::Primitive(p), Type::Primitive(q)) => p == q,
            (Type::Primitive(_), _) | (_, Type::Primitive(_)) => false,
            (s, t) => is_subtype(env, s, t),
        },
        (Type::Array(_), Type::Class(sup)) => is_array_supertype(env, sup.def),
        (Type::Class(_), Type::Array(_)) => false,
        (Type::Class(sub), Type::Class(sup)) => class_is_subtype(env, sub.def, sup.def),
    }
}

/// Whether `ty`'s class symbol is unresolved (arrays look through to their
/// component; primitives and type variables are always resolved).
pub fn is_unresolved(env: &dyn TypeEnv, ty: &Type) -> bool {
    match ty {
        Type::Class(ct) => env.class(ct.def).is_none_or(|def| def.is_unresolved),
        Type::Array(component) => is_unresolved(env, component),
        Type::Primitive(_) | Type::TypeVar(_) => false,
    }
}

fn is_array_supertype(env: &dyn TypeEnv, sup: ClassId) -> bool {
    let wk = env.well_known();
    sup == wk.object
        || sup == wk.cloneable
        || sup == wk.serializable
        || env.class(sup).is_none_or(|def| def.is_unresolved)
}

fn class_is_subtype(env: &dyn TypeEnv, sub: ClassId, sup: ClassId) -> bool {
    if sub == sup {
        return true;
    }
    if env.class(sup).is_none_or(|def| def.is_unresolved) {
        return true;
    }
    if sup == env.well_known().object {
        // Every reference type is a subtype of Object.
        return true;
    }

    let mut queue: VecDeque<ClassId> = VecDeque::new();
    let mut seen: HashSet<ClassId> = HashSet::new();
    queue.push_back(sub);

    while let Some(current) = queue.pop_front() {
        if current == sup {
            return true;
        }
        if !seen.insert(current) {
            continue;
        }
        let Some(def) = env.class(current) else {
            return true;
        };
        if def.is_unresolved {
            // The walk cannot see past an unresolved class.
            return true;
        }
        if let Some(Type::Class(sc)) = &def.super_class {
            queue.push_back(sc.def);
        }
        for iface in &def.interfaces {
            if let Type::Class(it) = iface {
                queue.push_back(it.def);
            }
        }
    }

    false
}
