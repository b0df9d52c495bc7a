use argus_types::{
    is_subtype, ClassDef, ClassKind, ClassToken, MethodSig, PrimitiveType, Type, TypeEnv,
    TypeStore,
};
use argus_typetest::{
    is_a, is_a_named, is_declared_in_class, is_exactly_a, is_exactly_a_named, TypeName,
};

fn name(s: &str) -> TypeName {
    TypeName::parse(s).expect("test name must be valid")
}

#[test]
fn subtype_and_exact_tests_agree_on_the_declared_class() {
    let env = TypeStore::with_minimal_jdk();
    let array_list = env
        .class_id("java.util.ArrayList")
        .expect("ArrayList must exist in minimal JDK");
    let ty = Type::class(array_list, vec![Type::class(env.well_known().string, vec![])]);

    let list = ClassToken::class("java.util.List");
    let exact = ClassToken::class("java.util.ArrayList");

    assert!(is_a(&env, &list, Some(&ty)));
    assert!(!is_exactly_a(&env, &list, Some(&ty)));
    assert!(is_a(&env, &exact, Some(&ty)));
    assert!(is_exactly_a(&env, &exact, Some(&ty)));

    assert!(is_a_named(&env, &name("java.util.List"), Some(&ty)));
    assert!(is_a_named(&env, &name("java.util.ArrayList"), Some(&ty)));
    assert!(is_exactly_a_named(&env, &name("java.util.ArrayList"), Some(&ty)));
    assert!(!is_exactly_a_named(&env, &name("java.util.List"), Some(&ty)));
}

#[test]
fn exactness_implies_subtype_match() {
    let env = TypeStore::with_minimal_jdk();
    let tokens = [
        ClassToken::final_class("java.lang.String"),
        ClassToken::class("java.util.ArrayList"),
        ClassToken::primitive(PrimitiveType::Int),
        ClassToken::class("java.lang.Object").array_of(),
    ];
    let types = [
        Type::class(env.well_known().string, vec![]),
        Type::class(
            env.class_id("java.util.ArrayList").expect("ArrayList must exist"),
            vec![],
        ),
        Type::int(),
        Type::array(Type::class(env.well_known().object, vec![])),
    ];

    for token in &tokens {
        for ty in &types {
            if is_exactly_a(&env, token, Some(ty)) {
                assert!(
                    is_a(&env, token, Some(ty)),
                    "exact match must imply subtype match"
                );
            }
        }
    }
}

#[test]
fn final_classes_shortcut_to_exact_matching() {
    let env = TypeStore::with_minimal_jdk();
    let string_token = ClassToken::final_class("java.lang.String");
    let types = [
        Some(Type::class(env.well_known().string, vec![])),
        Some(Type::class(env.well_known().object, vec![])),
        Some(Type::int()),
        Some(Type::array(Type::class(env.well_known().string, vec![]))),
        None,
    ];

    for ty in &types {
        assert_eq!(
            is_a(&env, &string_token, ty.as_ref()),
            is_exactly_a(&env, &string_token, ty.as_ref()),
            "a final class admits no subtypes, so both tests coincide"
        );
    }
}

#[test]
fn arrays_match_covariantly_but_not_exactly() {
    let env = TypeStore::with_minimal_jdk();
    let string_array = Type::array(Type::class(env.well_known().string, vec![]));

    let object_array = ClassToken::class("java.lang.Object").array_of();
    assert!(is_a(&env, &object_array, Some(&string_array)));
    assert!(!is_exactly_a(&env, &object_array, Some(&string_array)));

    let string_array_token = ClassToken::final_class("java.lang.String").array_of();
    assert!(is_a(&env, &string_array_token, Some(&string_array)));
    assert!(is_exactly_a(&env, &string_array_token, Some(&string_array)));

    // A non-array token never matches an array type exactly.
    assert!(!is_exactly_a(
        &env,
        &ClassToken::class("java.lang.Object"),
        Some(&string_array)
    ));
}

#[test]
fn primitives_do_not_widen_through_the_token_path() {
    let env = TypeStore::with_minimal_jdk();
    let long_ty = Type::Primitive(PrimitiveType::Long);
    let int_token = ClassToken::primitive(PrimitiveType::Int);

    // The general relation widens; the identity tests deliberately do not.
    assert!(is_subtype(&env, &Type::int(), &long_ty));
    assert!(!is_a(&env, &int_token, Some(&long_ty)));
    assert!(is_a(&env, &int_token, Some(&Type::int())));

    // Same narrowing through the name path.
    assert!(!is_a_named(&env, &name("int"), Some(&long_ty)));
    assert!(is_a_named(&env, &name("int"), Some(&Type::int())));
    assert!(!is_a_named(&env, &name("long"), Some(&Type::int())));
}

#[test]
fn absent_types_never_match() {
    let env = TypeStore::with_minimal_jdk();
    assert!(!is_a(&env, &ClassToken::class("java.lang.Object"), None));
    assert!(!is_exactly_a(&env, &ClassToken::class("java.lang.Object"), None));
    assert!(!is_a_named(&env, &name("java.lang.Object"), None));
    assert!(!is_exactly_a_named(&env, &name("java.lang.Object"), None));
}

#[test]
fn anonymous_classes_never_match_a_name() {
    let mut env = TypeStore::with_minimal_jdk();
    let runnable = env
        .class_id("java.lang.Runnable")
        .expect("Runnable must exist in minimal JDK");
    let mut anon = ClassDef::new("com.example.Handler$1", ClassKind::Class);
    anon.super_class = Some(Type::class(env.well_known().object, vec![]));
    anon.interfaces = vec![Type::class(runnable, vec![])];
    let anon = env.add_class(anon);
    let ty = Type::class(anon, vec![]);

    for n in ["java.lang.Runnable", "java.lang.Object", "com.example.Handler"] {
        assert!(!is_exactly_a_named(&env, &name(n), Some(&ty)));
        // Equality with an anonymous class is unknowable, and that is
        // resolved conservatively before any subtype walk happens.
        assert!(!is_a_named(&env, &name(n), Some(&ty)));
    }

    // The token path compares binary names and still works.
    assert!(is_exactly_a(&env, &ClassToken::class("com.example.Handler$1"), Some(&ty)));
}

#[test]
fn annotations_only_reach_the_universal_supertypes() {
    let env = TypeStore::with_minimal_jdk();
    let deprecated = env
        .class_id("java.lang.Deprecated")
        .expect("Deprecated must exist in minimal JDK");
    let ty = Type::class(deprecated, vec![]);

    assert!(is_a_named(&env, &name("java.lang.Object"), Some(&ty)));
    assert!(is_a_named(
        &env,
        &name("java.lang.annotation.Annotation"),
        Some(&ty)
    ));
    assert!(!is_a_named(&env, &name("java.io.Serializable"), Some(&ty)));
    assert!(is_a_named(&env, &name("java.lang.Deprecated"), Some(&ty)));
}

#[test]
fn unresolved_types_fall_back_to_name_equality() {
    let mut env = TypeStore::with_minimal_jdk();
    let widget = env.intern_unresolved("com.ext.Widget");
    let ty = Type::class(widget, vec![]);

    // Same symbol: matches, with or without subtype information.
    assert!(is_a(&env, &ClassToken::class("com.ext.Widget"), Some(&ty)));
    assert!(is_exactly_a(&env, &ClassToken::class("com.ext.Widget"), Some(&ty)));
    assert!(is_a_named(&env, &name("com.ext.Widget"), Some(&ty)));

    // Different symbol: the optimistic subtype relation must not leak
    // through; an unresolved type matches nothing else.
    assert!(is_subtype(
        &env,
        &ty,
        &Type::class(env.class_id("java.util.List").expect("List must exist"), vec![])
    ));
    assert!(!is_a(&env, &ClassToken::class("java.util.List"), Some(&ty)));
    assert!(!is_a_named(&env, &name("java.util.List"), Some(&ty)));
    assert!(!is_a(&env, &ClassToken::class("com.ext.Gadget"), Some(&ty)));
}

#[test]
fn unknown_nominal_references_fall_back_to_name_equality() {
    let env = TypeStore::with_minimal_jdk();
    let string_ty = Type::class(env.well_known().string, vec![]);

    // The token's class is absent from the environment entirely.
    let alien = ClassToken::class("com.ext.Alien");
    assert!(!is_a(&env, &alien, Some(&string_ty)));
    assert!(!is_a_named(&env, &name("com.ext.Alien"), Some(&string_ty)));
}

#[test]
fn names_are_whitespace_insensitive() {
    let env = TypeStore::with_minimal_jdk();
    let list = env.class_id("java.util.List").expect("List must exist");
    let ty = Type::class(list, vec![]);

    assert!(is_exactly_a_named(&env, &name(" java . util . List "), Some(&ty)));
}

#[test]
fn nested_classes_match_their_canonical_spelling() {
    let mut env = TypeStore::with_minimal_jdk();
    let entry = env.add_class(ClassDef::new("java.util.Map$Entry", ClassKind::Interface));
    let ty = Type::class(entry, vec![]);

    assert!(is_exactly_a_named(&env, &name("java.util.Map.Entry"), Some(&ty)));
    assert!(is_a_named(&env, &name("java.util.Map.Entry"), Some(&ty)));
    assert!(!is_exactly_a_named(&env, &name("java.util.Map$Entry"), Some(&ty)));
}

#[test]
fn declared_in_class_compares_the_declaring_symbol() {
    let env = TypeStore::with_minimal_jdk();
    let list = env.class_id("java.util.List").expect("List must exist");
    let sig = MethodSig {
        name: "add".to_string(),
        declaring: Type::class(list, vec![]),
        params: vec![Type::class(env.well_known().object, vec![])],
    };

    assert!(is_declared_in_class(&env, &ClassToken::class("java.util.List"), &sig));
    // Exact, not subtype: a supertype of the declaring class is not it.
    assert!(!is_declared_in_class(
        &env,
        &ClassToken::class("java.util.Collection"),
        &sig
    ));
}
