//! Shared Java type model for the Argus analysis crates.
//!
//! The model is deliberately erased: a [`Type`] carries type arguments for
//! callers that track them, but every algorithm in this workspace compares
//! types by their declaration symbol, so `List<String>` and a raw `List`
//! are interchangeable here.
//!
//! Class declarations live in a [`TypeStore`] and are reached through the
//! read-only [`TypeEnv`] capability trait, so the algorithms can be driven
//! by any universe of declarations — the [`TypeStore::with_minimal_jdk`]
//! fixture in tests, or a real classpath index in a host analysis.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

mod format;
mod loader;
mod subtype;

pub use format::display_type;
pub use loader::{load_token, load_type, ClassToken};
pub use subtype::{is_subtype, is_unresolved};

/// Identifies a class declaration inside a [`TypeStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(u32);

impl ClassId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identifies a type-parameter declaration inside a [`TypeStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeVarId(u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

/// The eight primitive types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Char => "char",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        Some(match s {
            "boolean" => PrimitiveType::Boolean,
            "byte" => PrimitiveType::Byte,
            "short" => PrimitiveType::Short,
            "char" => PrimitiveType::Char,
            "int" => PrimitiveType::Int,
            "long" => PrimitiveType::Long,
            "float" => PrimitiveType::Float,
            "double" => PrimitiveType::Double,
            _ => return None,
        })
    }

    /// Widening primitive conversion (JLS 5.1.2), reflexive.
    pub fn widens_to(self, other: PrimitiveType) -> bool {
        use PrimitiveType::*;
        if self == other {
            return true;
        }
        matches!(
            (self, other),
            (Byte, Short | Int | Long | Float | Double)
                | (Short, Int | Long | Float | Double)
                | (Char, Int | Long | Float | Double)
                | (Int, Long | Float | Double)
                | (Long, Float | Double)
                | (Float, Double)
        )
    }
}

/// A class, interface, enum, or annotation declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDef {
    /// Binary name: dot-separated package, `$`-separated nesting.
    pub name: String,
    /// Canonical (source-level, fully dotted) name. `None` exactly when the
    /// class is anonymous or local and therefore has no source spelling.
    pub canonical_name: Option<String>,
    pub kind: ClassKind,
    pub is_final: bool,
    /// The class is known by name only; its supertype information is
    /// untrustworthy and must not be used to answer subtype queries.
    pub is_unresolved: bool,
    pub super_class: Option<Type>,
    pub interfaces: Vec<Type>,
}

impl ClassDef {
    /// A resolved, non-final declaration with no supertypes and the
    /// canonical name derived from the binary name.
    pub fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        let name = name.into();
        let canonical_name = canonical_from_binary(&name);
        Self {
            name,
            canonical_name,
            kind,
            is_final: false,
            is_unresolved: false,
            super_class: None,
            interfaces: Vec::new(),
        }
    }
}

/// Derive a canonical name from a binary name.
///
/// Nesting separators become dots. A nesting segment that starts with a
/// digit denotes an anonymous (or local) class, which has no canonical name.
fn canonical_from_binary(name: &str) -> Option<String> {
    if !name.contains('$') {
        return Some(name.to_string());
    }
    let mut out = String::with_capacity(name.len());
    for (i, segment) in name.split('$').enumerate() {
        if i > 0 {
            if segment.chars().next().is_none_or(|c| c.is_ascii_digit()) {
                return None;
            }
            out.push('.');
        }
        out.push_str(segment);
    }
    Some(out)
}

/// A type-parameter declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParamDef {
    pub name: String,
    pub upper_bounds: Vec<Type>,
}

/// A (possibly parameterized) reference to a class declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassType {
    pub def: ClassId,
    /// Type arguments; empty for raw references. Carried for callers, but
    /// erased by every comparison in this workspace.
    pub args: Vec<Type>,
}

/// A resolved static type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Primitive(PrimitiveType),
    Class(ClassType),
    Array(Box<Type>),
    TypeVar(TypeVarId),
}

impl Type {
    pub fn class(def: ClassId, args: Vec<Type>) -> Self {
        Type::Class(ClassType { def, args })
    }

    pub fn array(component: Type) -> Self {
        Type::Array(Box::new(component))
    }

    pub fn int() -> Self {
        Type::Primitive(PrimitiveType::Int)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Primitive(_))
    }
}

/// A resolved method signature: the outcome of overload selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSig {
    pub name: String,
    /// The type declaring the selected method.
    pub declaring: Type,
    /// Formal parameter types, in declaration order.
    pub params: Vec<Type>,
}

impl MethodSig {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Outcome of overload resolution for an invocation expression.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MethodResolution {
    Found(MethodSig),
    /// Overload selection failed; the call's target is unknown.
    Failed,
}

/// Class ids the type algorithms need unconditionally.
///
/// Every store interns these up front, so lookups for them cannot fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WellKnownTypes {
    pub object: ClassId,
    pub string: ClassId,
    pub cloneable: ClassId,
    pub serializable: ClassId,
    /// `java.lang.annotation.Annotation`.
    pub annotation: ClassId,
}

/// Read-only access to a universe of class and type-parameter declarations.
pub trait TypeEnv {
    fn class(&self, id: ClassId) -> Option<&ClassDef>;

    fn type_param(&self, id: TypeVarId) -> Option<&TypeParamDef>;

    /// Look up a class by its binary name.
    fn lookup_class(&self, name: &str) -> Option<ClassId>;

    fn well_known(&self) -> &WellKnownTypes;
}

/// The default [`TypeEnv`] implementation: an append-only store of class and
/// type-parameter declarations, keyed by binary name.
#[derive(Clone, Debug)]
pub struct TypeStore {
    classes: Vec<ClassDef>,
    by_name: HashMap<String, ClassId>,
    type_params: Vec<TypeParamDef>,
    well_known: WellKnownTypes,
}

impl TypeStore {
    /// An empty store, seeded with only the [`WellKnownTypes`].
    pub fn new() -> Self {
        let placeholder = ClassId(0);
        let mut store = TypeStore {
            classes: Vec::new(),
            by_name: HashMap::new(),
            type_params: Vec::new(),
            well_known: WellKnownTypes {
                object: placeholder,
                string: placeholder,
                cloneable: placeholder,
                serializable: placeholder,
                annotation: placeholder,
            },
        };

        let object = store.add_class(ClassDef::new("java.lang.Object", ClassKind::Class));
        let object_ty = Type::class(object, vec![]);

        let cloneable = store.add_class(ClassDef::new("java.lang.Cloneable", ClassKind::Interface));
        let serializable =
            store.add_class(ClassDef::new("java.io.Serializable", ClassKind::Interface));
        let annotation = store.add_class(ClassDef::new(
            "java.lang.annotation.Annotation",
            ClassKind::Interface,
        ));

        let mut string = ClassDef::new("java.lang.String", ClassKind::Class);
        string.is_final = true;
        string.super_class = Some(object_ty);
        string.interfaces = vec![Type::class(serializable, vec![])];
        let string = store.add_class(string);

        store.well_known = WellKnownTypes {
            object,
            string,
            cloneable,
            serializable,
            annotation,
        };
        store
    }

    /// A store covering the slice of the platform types the algorithms and
    /// tests in this workspace exercise.
    pub fn with_minimal_jdk() -> Self {
        let mut store = Self::new();
        let wk = store.well_known;
        let object = || Type::class(wk.object, vec![]);

        let char_sequence =
            store.add_class(ClassDef::new("java.lang.CharSequence", ClassKind::Interface));
        if let Some(string) = store.class_mut(wk.string) {
            string
                .interfaces
                .push(Type::class(char_sequence, vec![]));
        }

        let mut number = ClassDef::new("java.lang.Number", ClassKind::Class);
        number.super_class = Some(object());
        number.interfaces = vec![Type::class(wk.serializable, vec![])];
        let number = store.add_class(number);

        for name in ["java.lang.Integer", "java.lang.Long"] {
            let mut boxed = ClassDef::new(name, ClassKind::Class);
            boxed.is_final = true;
            boxed.super_class = Some(Type::class(number, vec![]));
            store.add_class(boxed);
        }

        let iterable = store.add_class(ClassDef::new("java.lang.Iterable", ClassKind::Interface));
        let mut collection = ClassDef::new("java.util.Collection", ClassKind::Interface);
        collection.interfaces = vec![Type::class(iterable, vec![])];
        let collection = store.add_class(collection);
        let mut list = ClassDef::new("java.util.List", ClassKind::Interface);
        list.interfaces = vec![Type::class(collection, vec![])];
        let list = store.add_class(list);

        let mut array_list = ClassDef::new("java.util.ArrayList", ClassKind::Class);
        array_list.super_class = Some(object());
        array_list.interfaces = vec![
            Type::class(list, vec![]),
            Type::class(wk.cloneable, vec![]),
            Type::class(wk.serializable, vec![]),
        ];
        store.add_class(array_list);

        let mut enum_class = ClassDef::new("java.lang.Enum", ClassKind::Class);
        enum_class.super_class = Some(object());
        enum_class.interfaces = vec![Type::class(wk.serializable, vec![])];
        store.add_class(enum_class);

        let mut record = ClassDef::new("java.lang.Record", ClassKind::Class);
        record.super_class = Some(object());
        store.add_class(record);

        let runnable = store.add_class(ClassDef::new("java.lang.Runnable", ClassKind::Interface));
        let mut thread = ClassDef::new("java.lang.Thread", ClassKind::Class);
        thread.super_class = Some(object());
        thread.interfaces = vec![Type::class(runnable, vec![])];
        store.add_class(thread);

        for name in ["java.lang.Override", "java.lang.Deprecated"] {
            let mut ann = ClassDef::new(name, ClassKind::Annotation);
            ann.interfaces = vec![Type::class(wk.annotation, vec![])];
            store.add_class(ann);
        }

        store
    }

    pub fn add_class(&mut self, def: ClassDef) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        self.by_name.insert(def.name.clone(), id);
        self.classes.push(def);
        id
    }

    /// Look up a class by its binary name.
    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(name).copied()
    }

    pub fn class_mut(&mut self, id: ClassId) -> Option<&mut ClassDef> {
        self.classes.get_mut(id.index())
    }

    pub fn add_type_param(&mut self, name: &str, upper_bounds: Vec<Type>) -> TypeVarId {
        let id = TypeVarId(self.type_params.len() as u32);
        self.type_params.push(TypeParamDef {
            name: name.to_string(),
            upper_bounds,
        });
        id
    }

    /// Intern a placeholder declaration for a class known only by name.
    ///
    /// Repeated calls with the same name return the same id, so types built
    /// from it keep comparing equal by symbol.
    pub fn intern_unresolved(&mut self, binary_name: &str) -> ClassId {
        if let Some(id) = self.by_name.get(binary_name) {
            return *id;
        }
        tracing::debug!(name = binary_name, "interning unresolved class");
        let mut def = ClassDef::new(binary_name, ClassKind::Class);
        def.is_unresolved = true;
        self.add_class(def)
    }
}

impl Default for TypeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeEnv for TypeStore {
    fn class(&self, id: ClassId) -> Option<&ClassDef> {
        self.classes.get(id.index())
    }

    fn type_param(&self, id: TypeVarId) -> Option<&TypeParamDef> {
        self.type_params.get(id.0 as usize)
    }

    fn lookup_class(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(name).copied()
    }

    fn well_known(&self) -> &WellKnownTypes {
        &self.well_known
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_follow_nesting() {
        assert_eq!(
            canonical_from_binary("java.util.List"),
            Some("java.util.List".to_string())
        );
        assert_eq!(
            canonical_from_binary("java.util.Map$Entry"),
            Some("java.util.Map.Entry".to_string())
        );
        // Anonymous and local classes have no canonical name.
        assert_eq!(canonical_from_binary("com.example.Handler$1"), None);
        assert_eq!(canonical_from_binary("com.example.Handler$1Local"), None);
        assert_eq!(canonical_from_binary("com.example.Handler$"), None);
    }

    #[test]
    fn primitive_widening_is_directed() {
        use PrimitiveType::*;
        assert!(Int.widens_to(Int));
        assert!(Int.widens_to(Long));
        assert!(Byte.widens_to(Double));
        assert!(Char.widens_to(Int));
        assert!(!Long.widens_to(Int));
        assert!(!Boolean.widens_to(Int));
        assert!(!Int.widens_to(Char));
    }

    #[test]
    fn intern_unresolved_is_idempotent() {
        let mut store = TypeStore::new();
        let a = store.intern_unresolved("com.ext.Widget");
        let b = store.intern_unresolved("com.ext.Widget");
        assert_eq!(a, b);
        let def = store.class(a).expect("interned class must exist");
        assert!(def.is_unresolved);
        assert_eq!(def.canonical_name.as_deref(), Some("com.ext.Widget"));
    }

    #[test]
    fn well_known_classes_are_always_present() {
        let store = TypeStore::new();
        let wk = store.well_known();
        assert_eq!(store.class_id("java.lang.Object"), Some(wk.object));
        assert_eq!(
            store.class_id("java.lang.annotation.Annotation"),
            Some(wk.annotation)
        );
        assert!(store
            .class(wk.string)
            .is_some_and(|def| def.is_final));
    }
}
