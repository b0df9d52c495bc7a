//! Compact Java-like type rendering.
//!
//! The output is stable and source-shaped (canonical names, `[]` arrays,
//! `<...>` arguments), intended for messages and tests rather than for
//! round-tripping.

use crate::{Type, TypeEnv};

/// Render `ty` roughly the way it would be spelled in source.
///
/// Classes render their canonical name, falling back to the binary name for
/// anonymous classes and to `<missing>` for dangling ids.
pub fn display_type(env: &dyn TypeEnv, ty: &Type) -> String {
    let mut out = String::new();
    write_type(env, ty, &mut out);
    out
}

fn write_type(env: &dyn TypeEnv, ty: &Type, out: &mut String) {
    match ty {
        Type::Primitive(p) => out.push_str(p.name()),
        Type::Array(component) => {
            write_type(env, component, out);
            out.push_str("[]");
        }
        Type::TypeVar(v) => match env.type_param(*v) {
            Some(param) => out.push_str(&param.name),
            None => out.push('?'),
        },
        Type::Class(ct) => {
            match env.class(ct.def) {
                Some(def) => out.push_str(def.canonical_name.as_deref().unwrap_or(&def.name)),
                None => out.push_str("<missing>"),
            }
            if !ct.args.is_empty() {
                out.push('<');
                for (i, arg) in ct.args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_type(env, arg, out);
                }
                out.push('>');
            }
        }
    }
}
