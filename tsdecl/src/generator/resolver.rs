//! Format to TypeScript type mapping.
//!
//! # Type Mappings
//!
//! | Format | TypeScript |
//! |--------|------------|
//! | `I8`..`I128`, `U8`..`U128`, `ISIZE`, `USIZE`, `F32`, `F64` | `number` |
//! | `Bool` | `boolean` |
//! | `Str`, `Char` | `string` |
//! | `Bytes` | `string /* bytes */` |
//! | `Unit` | `null` |
//! | `Never` | `never` |
//! | `Option(T)` | `T \| undefined \| null` (optional) |
//! | `Seq(T)` | `Array<T>` |
//! | `Map{K, V}` | `Record<K, V>` |
//! | `Tuple([A, B])` | `[A, B]` |
//! | `TupleArray{T, 3}` | `[T, T, T]` |
//! | `TupleArray{T, n}`, n > [`MAX_TUPLE_ARRAY_LEN`] | `Array<T>` |
//! | `TypeName{Name, [A]}` | `Name<A>` |
//! | `Incomplete{debug}` | `unknown /* debug */` |

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, trace};

use crate::error::{GenerateError, GenerateResult};
use crate::generator::config::UnresolvedPolicy;
use crate::generator::ident::sanitize_ident;
use crate::ir::{Format, LocationId};

/// Longest `TupleArray` spelled out as a tuple type.
pub const MAX_TUPLE_ARRAY_LEN: usize = 256;

/// A resolved type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub expr: String,
    /// Whether the value may be absent
    pub optional: bool,
}

impl Resolved {
    fn required(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            optional: false,
        }
    }
}

/// The declaration a format belongs to.
#[derive(Debug, Clone, Copy)]
pub struct ResolveScope<'a> {
    /// Declaration id, for error messages
    pub declaration: &'a str,
    /// Location reported for unresolved references
    pub location: &'a LocationId,
    /// Generic parameters in scope
    pub generics: &'a [&'a str],
    /// Declaration names that are shadowed where the expression is written,
    /// mapped to the alias to write instead
    pub aliases: &'a BTreeMap<String, String>,
}

/// Maps [`Format`]s to TypeScript type expressions.
#[derive(Debug, Clone)]
pub struct FormatResolver<'a> {
    /// Declaration ids of the current run
    known: &'a HashSet<String>,
    policy: UnresolvedPolicy,
}

impl<'a> FormatResolver<'a> {
    pub fn new(known: &'a HashSet<String>, policy: UnresolvedPolicy) -> Self {
        Self { known, policy }
    }

    /// Whether `ident` names a declaration of the current run.
    pub fn is_known(&self, ident: &str) -> bool {
        self.known.contains(ident)
    }

    /// Resolve a format to its type expression and optionality.
    pub fn resolve(&self, format: &Format, scope: &ResolveScope<'_>) -> GenerateResult<Resolved> {
        let resolved = match format {
            Format::I8
            | Format::I16
            | Format::I32
            | Format::I64
            | Format::I128
            | Format::Isize
            | Format::U8
            | Format::U16
            | Format::U32
            | Format::U64
            | Format::U128
            | Format::Usize
            | Format::F32
            | Format::F64 => Resolved::required("number"),
            Format::Bool => Resolved::required("boolean"),
            Format::Str | Format::Char => Resolved::required("string"),
            Format::Bytes => Resolved::required("string /* bytes */"),
            Format::Unit => Resolved::required("null"),
            Format::Never => Resolved::required("never"),

            Format::Option(inner) => {
                let inner = self.resolve(inner, scope)?;
                if inner.optional {
                    inner
                } else {
                    Resolved {
                        expr: format!("{} | undefined | null", inner.expr),
                        optional: true,
                    }
                }
            }
            Format::Seq(inner) => {
                Resolved::required(format!("Array<{}>", self.resolve(inner, scope)?.expr))
            }
            Format::Map { key, value } => Resolved::required(format!(
                "Record<{}, {}>",
                self.resolve(key, scope)?.expr,
                self.resolve(value, scope)?.expr
            )),
            Format::Tuple(elements) => {
                Resolved::required(format!("[{}]", self.resolve_list(elements, scope)?))
            }
            Format::TupleArray { content, size } => {
                let content = self.resolve(content, scope)?.expr;
                if *size > MAX_TUPLE_ARRAY_LEN {
                    Resolved::required(format!("Array<{}>", content))
                } else {
                    let elements = std::iter::repeat(content.as_str())
                        .take(*size)
                        .collect::<Vec<_>>()
                        .join(", ");
                    Resolved::required(format!("[{}]", elements))
                }
            }
            Format::TypeName { ident, generics } => self.resolve_type_name(ident, generics, scope)?,
            Format::Incomplete { debug } => {
                Resolved::required(format!("unknown /* {} */", comment_text(debug)))
            }
        };
        trace!(
            declaration = scope.declaration,
            expr = %resolved.expr,
            optional = resolved.optional,
            "resolved format"
        );
        Ok(resolved)
    }

    /// Resolve and comma-join a list of formats, dropping optionality.
    pub fn resolve_list(&self, formats: &[Format], scope: &ResolveScope<'_>) -> GenerateResult<String> {
        let exprs = formats
            .iter()
            .map(|format| self.resolve(format, scope).map(|resolved| resolved.expr))
            .collect::<GenerateResult<Vec<_>>>()?;
        Ok(exprs.join(", "))
    }

    fn resolve_type_name(
        &self,
        ident: &str,
        generics: &[Format],
        scope: &ResolveScope<'_>,
    ) -> GenerateResult<Resolved> {
        let in_scope = scope.generics.contains(&ident) || self.known.contains(ident);
        if !in_scope {
            match self.policy {
                UnresolvedPolicy::Strict => {
                    return Err(GenerateError::UnresolvedReference {
                        declaration: scope.declaration.to_string(),
                        ident: ident.to_string(),
                        location: scope.location.clone(),
                    });
                }
                UnresolvedPolicy::Opaque => {
                    debug!(
                        declaration = scope.declaration,
                        ident, "unresolved reference rendered as unknown"
                    );
                    return Ok(Resolved::required(format!(
                        "unknown /* unresolved: {} */",
                        comment_text(ident)
                    )));
                }
            }
        }

        let mut name = sanitize_ident(ident);
        if !scope.generics.contains(&ident) {
            if let Some(alias) = scope.aliases.get(&name) {
                name = alias.clone();
            }
        }
        if generics.is_empty() {
            Ok(Resolved::required(name))
        } else {
            Ok(Resolved::required(format!(
                "{}<{}>",
                name,
                self.resolve_list(generics, scope)?
            )))
        }
    }
}

/// Text safe to place inside a block comment.
fn comment_text(text: &str) -> String {
    text.replace("*/", "*\\/")
}
