//! Type identity tests and method signature patterns for analysis rules.
//!
//! Two question families are answered against the static type of a program
//! element, as resolved by `argus-types`:
//!
//! - *identity*: is this type equal to — or a subtype of — a nominally
//!   named type? See [`is_a`], [`is_exactly_a`] and their `_named`
//!   variants. The nominal side is either a reflective [`ClassToken`] or a
//!   validated [`TypeName`].
//! - *shape*: does this call site's selected overload match a declared
//!   pattern of qualifier, method name, and argument types? See
//!   [`SignaturePattern`].
//!
//! Both families degrade deliberately where the type model cannot answer:
//! unresolved classes fall back to symbol-name equality instead of
//! trusting an optimistic subtype relation, and anonymous classes — which
//! have no canonical name to compare — surface as [`Trilean::Unknown`]
//! internally and never match a named reference.
//!
//! All operations are pure. A compiled [`SignaturePattern`] is an immutable
//! value, safe to share across threads for any number of matches.
//!
//! [`ClassToken`]: argus_types::ClassToken

mod identity;
mod names;
mod sig;

pub use identity::{
    is_a, is_a_named, is_declared_in_class, is_exactly_a, is_exactly_a_named, Trilean,
};
pub use names::{InvalidTypeName, TypeName};
pub use sig::{Invocation, PatternError, SignaturePattern};
