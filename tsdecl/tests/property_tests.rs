//! Property-based tests for tsdecl.
//!
//! Properties tested:
//! - Optionality idempotence of nested `Option`s
//! - Sanitized identifiers are always valid identifiers
//! - Rendering a text tree is deterministic and indentation follows depth
//! - Enum matchers have exactly one handler and one dispatch per variant
//! - Generation is deterministic

use std::collections::{BTreeMap, HashSet};

use proptest::prelude::*;

use tsdecl::generator::builder::SourceBuilder;
use tsdecl::generator::ident::{is_ident, sanitize_ident};
use tsdecl::generator::resolver::{FormatResolver, ResolveScope};
use tsdecl::ir::{
    ContainerFormat, Declaration, Document, EnumRepresentation, Format, LocationId, NamedField,
    NamedVariant, VariantFormat,
};
use tsdecl::{generate, GeneratorConfig, UnresolvedPolicy};

// =============================================================================
// Generators for property tests
// =============================================================================

fn arb_leaf() -> impl Strategy<Value = Format> {
    prop_oneof![
        Just(Format::Unit),
        Just(Format::Bool),
        Just(Format::I32),
        Just(Format::U64),
        Just(Format::F64),
        Just(Format::Char),
        Just(Format::Str),
        Just(Format::Bytes),
        Just(Format::type_name("Known")),
        "[a-z ]{0,12}".prop_map(Format::incomplete),
    ]
}

fn arb_format() -> impl Strategy<Value = Format> {
    arb_leaf().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(Format::option),
            inner.clone().prop_map(Format::seq),
            (inner.clone(), inner.clone()).prop_map(|(k, v)| Format::map(k, v)),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Format::Tuple),
            (inner, 0usize..4).prop_map(|(content, size)| Format::tuple_array(content, size)),
        ]
    })
}

/// Distinct PascalCase variant names.
fn arb_variant_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[A-Z][a-z]{1,8}", 0..8)
        .prop_map(|names| names.into_iter().collect())
}

fn arb_variant_format() -> impl Strategy<Value = VariantFormat> {
    prop_oneof![
        Just(VariantFormat::Unit),
        arb_leaf().prop_map(|f| VariantFormat::NewType(Box::new(f))),
        prop::collection::vec(arb_leaf(), 0..3).prop_map(VariantFormat::Tuple),
        prop::collection::vec(arb_leaf(), 0..3).prop_map(|formats| VariantFormat::Struct {
            fields: formats
                .into_iter()
                .enumerate()
                .map(|(i, f)| NamedField::new(format!("f{}", i), f))
                .collect(),
        }),
    ]
}

fn resolve(format: &Format) -> tsdecl::generator::resolver::Resolved {
    let known: HashSet<String> = ["Known".to_string()].into_iter().collect();
    let location = LocationId::default();
    let aliases = BTreeMap::new();
    let scope = ResolveScope {
        declaration: "Test",
        location: &location,
        generics: &[],
        aliases: &aliases,
    };
    FormatResolver::new(&known, UnresolvedPolicy::Strict)
        .resolve(format, &scope)
        .unwrap()
}

fn known_decl() -> Declaration {
    Declaration::new("Known", ContainerFormat::UnitStruct)
}

// =============================================================================
// Resolver
// =============================================================================

proptest! {
    #[test]
    fn prop_option_idempotent(format in arb_format()) {
        let once = resolve(&Format::option(format.clone()));
        let twice = resolve(&Format::option(Format::option(format)));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_option_is_optional(format in arb_format()) {
        prop_assert!(resolve(&Format::option(format)).optional);
    }

    #[test]
    fn prop_resolve_is_deterministic(format in arb_format()) {
        prop_assert_eq!(resolve(&format), resolve(&format));
    }
}

// =============================================================================
// Identifiers
// =============================================================================

proptest! {
    #[test]
    fn prop_sanitized_is_identifier(name in ".{1,24}") {
        let ident = sanitize_ident(&name);
        prop_assert!(is_ident(&ident), "{:?} -> {:?}", name, ident);
    }

    #[test]
    fn prop_sanitize_is_idempotent(name in ".{0,24}") {
        let once = sanitize_ident(&name);
        prop_assert_eq!(sanitize_ident(&once), once.clone());
    }

    #[test]
    fn prop_valid_identifiers_unchanged(name in "[A-Za-z_$][A-Za-z0-9_$]{0,16}") {
        prop_assert_eq!(sanitize_ident(&name), name);
    }
}

// =============================================================================
// Text Builder
// =============================================================================

proptest! {
    #[test]
    fn prop_indent_follows_depth(lines in prop::collection::vec("[a-z]{1,8}", 1..10)) {
        let mut b = SourceBuilder::new();
        let mut scope = &mut b;
        for line in &lines {
            scope.line(line.clone());
            scope = scope.indented();
        }
        let rendered = b.render("  ");
        for (depth, (out, line)) in rendered.lines().zip(&lines).enumerate() {
            prop_assert_eq!(out.to_string(), format!("{}{}", "  ".repeat(depth), line));
        }
    }
}

// =============================================================================
// Enums
// =============================================================================

proptest! {
    #[test]
    fn prop_one_handler_and_dispatch_per_variant(
        names in arb_variant_names(),
        formats in prop::collection::vec(arb_variant_format(), 8),
    ) {
        let variants: Vec<NamedVariant> = names
            .iter()
            .zip(formats)
            .map(|(name, format)| NamedVariant::new(name.clone(), format))
            .collect();
        let document = Document::new(vec![
            known_decl(),
            Declaration::new(
                "Subject",
                ContainerFormat::Enum {
                    repr: EnumRepresentation::External,
                    variants,
                },
            ),
        ]);
        let generated = generate(&document, &GeneratorConfig::default()).unwrap();
        let source = &generated.files[0].source;

        for name in &names {
            let dispatch = format!("return to.{}(", name);
            prop_assert_eq!(source.matches(dispatch.as_str()).count(), 1);
            let handler = format!("    {}(", name);
            prop_assert!(source.contains(handler.as_str()));
        }
        prop_assert_eq!(source.matches(" return to.").count(), names.len());
    }

    #[test]
    fn prop_generation_is_deterministic(fields in prop::collection::vec(arb_format(), 0..6)) {
        let fields = fields
            .into_iter()
            .enumerate()
            .map(|(i, format)| NamedField::new(format!("field_{}", i), format))
            .collect();
        let document = Document::new(vec![
            known_decl(),
            Declaration::new("Record", ContainerFormat::Struct { fields }),
        ]);
        let config = GeneratorConfig::default();
        let first = generate(&document, &config).unwrap();
        let second = generate(&document, &config).unwrap();
        prop_assert_eq!(first, second);
    }
}
