//! Method signature patterns.
//!
//! A [`SignaturePattern`] is compiled once — typically when a rule is
//! initialized — from a qualifier pattern and a signature of the shape
//! `name(arg1, arg2, ...)`, and then matched against any number of call
//! sites. Compilation is the only fallible step; a pattern that exists
//! always matches totally and deterministically.

use argus_types::{MethodResolution, MethodSig, Type, TypeEnv};
use thiserror::Error;

use crate::identity::{canonical_equals, is_a_named};
use crate::names::{is_ident_part, InvalidTypeName, TypeName};

/// Error from compiling a [`SignaturePattern`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error(transparent)]
    InvalidTypeName(#[from] InvalidTypeName),
    #[error("expected `{expected}` at offset {offset} in `{input}`")]
    Expected {
        expected: char,
        offset: usize,
        input: String,
    },
    #[error("not a valid signature: `{0}`")]
    Malformed(String),
}

/// The slice of an invocation expression the matcher needs.
///
/// Implemented by the host analysis' AST. The matcher never inspects
/// argument expressions itself — only the outcome of overload selection.
pub trait Invocation {
    /// The called method's name, as written at the call site.
    fn method_name(&self) -> &str;

    /// Number of argument expressions at the call site.
    fn arg_count(&self) -> usize;

    /// Overload selection outcome for this call.
    fn resolution(&self) -> &MethodResolution;
}

#[derive(Clone, Debug)]
enum TypeMatcher {
    /// `_`: matches any type.
    Any,
    /// Exact canonical-name equality; anonymous classes never match.
    Exact(TypeName),
    /// General subtype test.
    Supertype(TypeName),
}

impl TypeMatcher {
    fn exact(name: &str, input: &str) -> Result<Self, PatternError> {
        if name.is_empty() {
            return Err(PatternError::Malformed(input.to_string()));
        }
        if name == "_" {
            return Ok(TypeMatcher::Any);
        }
        Ok(TypeMatcher::Exact(TypeName::parse(name)?))
    }

    fn supertype(name: &str) -> Result<Self, PatternError> {
        if name.trim() == "_" {
            return Ok(TypeMatcher::Any);
        }
        Ok(TypeMatcher::Supertype(TypeName::parse(name)?))
    }

    fn matches(&self, env: &dyn TypeEnv, ty: &Type) -> bool {
        match self {
            TypeMatcher::Any => true,
            TypeMatcher::Exact(name) => canonical_equals(env, name, ty).is_yes(),
            TypeMatcher::Supertype(name) => is_a_named(env, name, Some(ty)),
        }
    }
}

/// A compiled method signature pattern: a qualifier matcher, an expected
/// method name, and one matcher per argument position.
///
/// Immutable after compilation, so a single pattern can serve concurrent
/// matches without synchronization.
#[derive(Clone, Debug)]
pub struct SignaturePattern {
    qualifier: TypeMatcher,
    name: String,
    args: Vec<TypeMatcher>,
}

impl SignaturePattern {
    /// Compile a pattern.
    ///
    /// `qualifier` is `_` or a qualified type name; it is matched against
    /// the declaring type of the selected method with the general subtype
    /// test, so a method declared in `T` is found when called through any
    /// subtype of `T`. `signature` has the shape `name(arg1, arg2, ...)`
    /// where each argument is `_` or a qualified type name matched
    /// **exactly** — overload selection has already fixed the formal
    /// parameter types, so subtype matching there would conflate distinct
    /// overloads. Whitespace between tokens is insignificant.
    pub fn parse(qualifier: &str, signature: &str) -> Result<Self, PatternError> {
        let qualifier = TypeMatcher::supertype(qualifier)?;

        let mut parser = Parser {
            text: signature,
            pos: 0,
        };
        let name = parser.take_name();
        if name.is_empty() {
            return Err(PatternError::Malformed(signature.to_string()));
        }
        parser.expect('(')?;

        let mut args = Vec::new();
        if !parser.consume(')') {
            loop {
                let arg = parser.take_qualified();
                args.push(TypeMatcher::exact(arg, signature)?);
                if parser.consume(')') {
                    break;
                }
                parser.expect(',')?;
            }
        }

        parser.skip_ws();
        if !parser.is_eof() {
            return Err(PatternError::Malformed(signature.to_string()));
        }

        Ok(SignaturePattern {
            qualifier,
            name: name.to_string(),
            args,
        })
    }

    /// The method name this pattern expects.
    pub fn method_name(&self) -> &str {
        &self.name
    }

    /// Match against an invocation expression.
    ///
    /// Name and argument-count mismatches reject without looking at any
    /// type. Calls whose overload selection failed never match: a pattern
    /// only matches a call whose target is unambiguously known.
    pub fn matches_call(&self, env: &dyn TypeEnv, call: &dyn Invocation) -> bool {
        if call.method_name() != self.name || call.arg_count() != self.args.len() {
            return false;
        }
        match call.resolution() {
            MethodResolution::Found(sig) => self.matches_sig(env, sig),
            MethodResolution::Failed => false,
        }
    }

    /// Match against an already-selected method signature.
    pub fn matches_sig(&self, env: &dyn TypeEnv, sig: &MethodSig) -> bool {
        if sig.name != self.name || sig.arity() != self.args.len() {
            return false;
        }
        for (matcher, formal) in self.args.iter().zip(&sig.params) {
            if !matcher.matches(env, formal) {
                return false;
            }
        }
        self.qualifier.matches(env, &sig.declaring)
    }
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn rest(&self) -> &'a str {
        self.text.get(self.pos..).unwrap_or("")
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_ws(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.bump_char();
        }
    }

    fn consume(&mut self, expected: char) -> bool {
        self.skip_ws();
        if self.peek_char() == Some(expected) {
            self.bump_char();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), PatternError> {
        if self.consume(expected) {
            Ok(())
        } else {
            Err(PatternError::Expected {
                expected,
                offset: self.pos,
                input: self.text.to_string(),
            })
        }
    }

    /// One run of identifier characters.
    fn take_name(&mut self) -> &'a str {
        self.take_while(is_ident_part)
    }

    /// One run of identifier characters and dots.
    fn take_qualified(&mut self) -> &'a str {
        self.take_while(|ch| ch == '.' || is_ident_part(ch))
    }

    fn take_while(&mut self, accept: impl Fn(char) -> bool) -> &'a str {
        self.skip_ws();
        let start = self.pos;
        while self.peek_char().is_some_and(&accept) {
            self.bump_char();
        }
        &self.text[start..self.pos]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wildcards_and_names() {
        let pattern = SignaturePattern::parse("_", "foo(_, java.lang.String)")
            .expect("pattern must compile");
        assert_eq!(pattern.method_name(), "foo");
        assert_eq!(pattern.args.len(), 2);
        assert!(matches!(pattern.args[0], TypeMatcher::Any));
        assert!(matches!(pattern.qualifier, TypeMatcher::Any));

        let empty = SignaturePattern::parse("java.util.List", "size()")
            .expect("empty argument list must compile");
        assert!(empty.args.is_empty());
        assert!(matches!(empty.qualifier, TypeMatcher::Supertype(_)));
    }

    #[test]
    fn rejects_malformed_signatures() {
        for bad in [
            "foo(",
            "foo(,)",
            "foo",
            "foo)",
            "(int)",
            "foo(int",
            "foo(int,)",
            "foo()trailing",
            "foo(a..b)",
            "",
        ] {
            assert!(
                SignaturePattern::parse("_", bad).is_err(),
                "{bad:?} should be rejected"
            );
        }
        assert!(SignaturePattern::parse("not a name!", "foo()").is_err());
    }

    #[test]
    fn reports_the_offending_input() {
        let err = SignaturePattern::parse("_", "foo[int]").expect_err("must fail");
        assert!(matches!(err, PatternError::Expected { expected: '(', .. }));
        let err = SignaturePattern::parse("_", "foo(,)").expect_err("must fail");
        assert!(matches!(err, PatternError::Malformed(_)));
    }
}
