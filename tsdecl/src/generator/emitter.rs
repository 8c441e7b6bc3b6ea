//! TypeScript declaration emitter.
//!
//! Every declaration becomes a type plus a same-named value that constructs
//! it, so `User(...)` builds a `User` and `User` also names its type.
//!
//! # Shapes
//!
//! - Unit structs are `{}` with a zero-argument constructor
//! - Newtype structs alias the inner type when `transparent`, otherwise wrap
//!   it in a one-element tuple
//! - Tuple structs are tuples with positional constructor parameters
//! - Structs are object types, intersected with their flattened fields
//! - Externally tagged enums are a union of variant types plus a namespace
//!   holding one constructor per variant and the `apply`/`match` helpers
//!
//! Inside an enum's namespace a variant's name hides any outer type of the
//! same name. Outer types referenced under a hidden name are written through
//! a module-level alias `$Enum$Name` declared just before the namespace.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::error::{BuilderError, GenerateError, GenerateResult, Message};
use crate::generator::builder::SourceBuilder;
use crate::generator::config::GeneratorConfig;
use crate::generator::docs::doc_comment;
use crate::generator::ident::{
    positional_param, property_access, property_key, sanitize_ident, string_literal, RenameRule,
};
use crate::generator::output::{Generation, TemplateBinding};
use crate::generator::resolver::{FormatResolver, ResolveScope};
use crate::ir::{
    names, Attrs, ContainerFormat, Declaration, EnumRepresentation, Format, LocationId,
    NamedField, NamedVariant, VariantFormat,
};

/// Emits one declaration at a time into a [`Generation`].
#[derive(Debug, Clone)]
pub struct DeclarationEmitter<'a> {
    resolver: FormatResolver<'a>,
    config: &'a GeneratorConfig,
}

/// Members every enum namespace declares besides its variants.
const NAMESPACE_HELPERS: [&str; 3] = ["ApplyFns", "apply", "match"];

/// Per-declaration naming.
#[derive(Clone)]
struct DeclContext<'d> {
    decl: &'d Declaration,
    ident: String,
    generics: Vec<&'d str>,
    /// Shadowed type names and their aliases
    aliases: BTreeMap<String, String>,
}

impl<'d> DeclContext<'d> {
    fn new(decl: &'d Declaration) -> Self {
        Self {
            decl,
            ident: sanitize_ident(&decl.id),
            generics: decl.attrs.generic_names(),
            aliases: BTreeMap::new(),
        }
    }

    fn with_aliases(&self, aliases: BTreeMap<String, String>) -> Self {
        Self {
            aliases,
            ..self.clone()
        }
    }

    /// `<T, U>`, or empty without generics.
    fn type_params(&self) -> String {
        type_param_list(self.generics.iter().map(|name| sanitize_ident(name)))
    }

    /// The declaration applied to its own parameters, e.g. `Page<T>`.
    fn self_type(&self) -> String {
        format!("{}{}", self.ident, self.type_params())
    }

    /// [`self_type`](Self::self_type), through its alias when shadowed.
    fn self_ref(&self) -> String {
        match self.aliases.get(&self.ident) {
            Some(alias) => format!("{}{}", alias, self.type_params()),
            None => self.self_type(),
        }
    }

    fn scope<'s>(&'s self, location: &'s LocationId) -> ResolveScope<'s> {
        ResolveScope {
            declaration: &self.decl.id,
            location,
            generics: &self.generics,
            aliases: &self.aliases,
        }
    }

    fn builder_error(&self, source: BuilderError) -> GenerateError {
        GenerateError::Builder {
            id: self.decl.id.clone(),
            location: self.decl.id_location.clone(),
            source,
        }
    }
}

/// Members of an object type.
#[derive(Debug, Default)]
struct ObjectMembers {
    members: Vec<Member>,
    /// Type expressions intersected with the object
    flattened: Vec<String>,
}

#[derive(Debug)]
struct Member {
    docs: Option<Vec<String>>,
    line: String,
}

/// A variant that survived `skip` filtering.
struct Arm<'v> {
    variant: &'v NamedVariant,
    /// Identifier of the variant's type and constructor
    name: String,
    /// Wire name
    discriminant: String,
}

impl<'a> DeclarationEmitter<'a> {
    /// Create an emitter resolving references against `known` declaration ids.
    pub fn new(known: &'a HashSet<String>, config: &'a GeneratorConfig) -> Self {
        Self {
            resolver: FormatResolver::new(known, config.unresolved_references),
            config,
        }
    }

    /// Emit `decl` into `run`.
    ///
    /// Nothing is added to `run` when an error is returned.
    pub fn emit(&self, decl: &Declaration, run: &mut Generation) -> GenerateResult<()> {
        if let ContainerFormat::Enum { repr, .. } = &decl.container_kind {
            if *repr != EnumRepresentation::External {
                return Err(GenerateError::UnsupportedRepresentation {
                    id: decl.id.clone(),
                    location: decl.id_location.clone(),
                    repr: repr.describe(),
                });
            }
        }

        let cx = DeclContext::new(decl);
        let mut b = SourceBuilder::new();
        let mut warnings = Vec::new();

        if decl.attrs.codegen_flag(names::SCALAR) {
            debug!(id = %decl.id, "emitting scalar");
            self.emit_scalar(&cx, &mut b);
            run.push_declaration(b);
            return Ok(());
        }

        debug!(id = %decl.id, kind = decl.container_kind.kind_name(), "emitting declaration");
        let mut has_value = true;
        match &decl.container_kind {
            ContainerFormat::UnitStruct => self.emit_unit_struct(&cx, &mut b),
            ContainerFormat::NewTypeStruct(inner) => self.emit_newtype(&cx, inner, &mut b)?,
            ContainerFormat::TupleStruct(elements) => {
                self.emit_tuple_struct(&cx, elements, &mut b)?
            }
            ContainerFormat::Struct { fields } => {
                has_value = !decl.attrs.codegen_flag(names::INTERFACE);
                self.emit_struct(&cx, fields, &mut b, &mut warnings)?
            }
            ContainerFormat::Enum { variants, .. } => {
                self.emit_enum(&cx, variants, &mut b, &mut warnings)?
            }
        }

        if let Some(template) = decl.attrs.codegen_attr(names::TEMPLATE) {
            run.register_template(TemplateBinding {
                ident: cx.ident.clone(),
                template: template.to_string(),
                has_value,
                location: decl
                    .attrs
                    .codegen_location(names::TEMPLATE)
                    .cloned()
                    .unwrap_or_else(|| decl.id_location.clone()),
            });
        }
        for warning in warnings {
            run.warn(warning);
        }
        run.push_declaration(b);
        Ok(())
    }

    // =========================================================================
    // Shared pieces
    // =========================================================================

    fn write_docs(&self, b: &mut SourceBuilder, attrs: &Attrs, extra: Option<&str>, at: &LocationId) {
        if let Some(lines) = self.docs(attrs, extra, at) {
            b.lines(lines);
        }
    }

    fn docs(&self, attrs: &Attrs, extra: Option<&str>, at: &LocationId) -> Option<Vec<String>> {
        let link = self
            .config
            .include_locations_relative_to
            .as_deref()
            .map(|prefix| (prefix, at));
        doc_comment(attrs, extra, link)
    }

    /// `function X(inner: T): X { return inner; }`
    fn identity_constructor(&self, cx: &DeclContext<'_>, inner: &str, b: &mut SourceBuilder) {
        b.line(format!(
            "export function {}{}(inner: {}): {} {{",
            cx.ident,
            cx.type_params(),
            inner,
            cx.self_type()
        ));
        b.indented().line("return inner;");
        b.line("}");
    }

    /// The `rename_all` rule of `attrs`, warning about unknown rules.
    fn rename_rule(
        &self,
        id: &str,
        attrs: &Attrs,
        at: &LocationId,
        warnings: &mut Vec<Message>,
    ) -> Option<RenameRule> {
        let raw = attrs.serde_attr(names::RENAME_ALL)?;
        let rule = RenameRule::parse(raw);
        if rule.is_none() {
            let location = attrs
                .serde_location(names::RENAME_ALL)
                .filter(|location| !location.as_str().is_empty())
                .unwrap_or(at);
            warnings.push(
                Message::new(format!(
                    "unknown rename_all rule \"{}\" on '{}' is ignored",
                    raw, id
                ))
                .with_label("rename_all", location.clone()),
            );
        }
        rule
    }

    // =========================================================================
    // Structs
    // =========================================================================

    fn emit_scalar(&self, cx: &DeclContext<'_>, b: &mut SourceBuilder) {
        let decl = cx.decl;
        let extra = self
            .config
            .import_scalars_from
            .as_ref()
            .map(|module| format!("Opaque scalar imported from `{}`.", module));
        self.write_docs(b, &decl.attrs, extra.as_deref(), &decl.id_location);

        let target = match &self.config.import_scalars_from {
            Some(_) => format!("$scalars.{}", cx.self_type()),
            None => cx.self_type(),
        };
        b.line(format!("export type {} = {};", cx.self_type(), target));
        self.identity_constructor(cx, &cx.self_type(), b);
    }

    fn emit_unit_struct(&self, cx: &DeclContext<'_>, b: &mut SourceBuilder) {
        self.write_docs(b, &cx.decl.attrs, None, &cx.decl.id_location);
        b.line(format!("export type {} = {{}};", cx.self_type()));
        b.line(format!(
            "export function {}{}(): {} {{",
            cx.ident,
            cx.type_params(),
            cx.self_type()
        ));
        b.indented().line("return {};");
        b.line("}");
    }

    fn emit_newtype(
        &self,
        cx: &DeclContext<'_>,
        inner: &Format,
        b: &mut SourceBuilder,
    ) -> GenerateResult<()> {
        let decl = cx.decl;
        let inner = self
            .resolver
            .resolve(inner, &cx.scope(&decl.id_location))?
            .expr;
        self.write_docs(b, &decl.attrs, None, &decl.id_location);

        if decl.attrs.serde_flag(names::TRANSPARENT) {
            b.line(format!("export type {} = {};", cx.self_type(), inner));
            self.identity_constructor(cx, &inner, b);
        } else {
            b.line(format!("export type {} = [{}];", cx.self_type(), inner));
            b.line(format!(
                "export function {}{}(inner: {}): {} {{",
                cx.ident,
                cx.type_params(),
                inner,
                cx.self_type()
            ));
            b.indented().line("return [inner];");
            b.line("}");
        }
        Ok(())
    }

    fn emit_tuple_struct(
        &self,
        cx: &DeclContext<'_>,
        elements: &[Format],
        b: &mut SourceBuilder,
    ) -> GenerateResult<()> {
        let decl = cx.decl;
        let scope = cx.scope(&decl.id_location);
        let exprs = elements
            .iter()
            .map(|format| self.resolver.resolve(format, &scope).map(|r| r.expr))
            .collect::<GenerateResult<Vec<_>>>()?;
        let (params, args) = positional_params(&exprs);

        self.write_docs(b, &decl.attrs, None, &decl.id_location);
        b.line(format!(
            "export type {} = [{}];",
            cx.self_type(),
            exprs.join(", ")
        ));
        b.line(format!(
            "export function {}{}({}): {} {{",
            cx.ident,
            cx.type_params(),
            params,
            cx.self_type()
        ));
        b.indented().line(format!("return [{}];", args));
        b.line("}");
        Ok(())
    }

    fn emit_struct(
        &self,
        cx: &DeclContext<'_>,
        fields: &[NamedField],
        b: &mut SourceBuilder,
        warnings: &mut Vec<Message>,
    ) -> GenerateResult<()> {
        let decl = cx.decl;
        let rule = self.rename_rule(&decl.id, &decl.attrs, &decl.id_location, warnings);
        let object = self.object_members(cx, fields, rule)?;

        self.write_docs(b, &decl.attrs, None, &decl.id_location);

        if decl.attrs.codegen_flag(names::INTERFACE) {
            let extends = if object.flattened.is_empty() {
                String::new()
            } else {
                format!(" extends {}", object.flattened.join(", "))
            };
            let head = format!("export interface {}{}", cx.self_type(), extends);
            if object.members.is_empty() {
                b.line(format!("{} {{}}", head));
            } else {
                b.line(format!("{} {{", head));
                write_members(b.indented(), &object.members);
                b.line("}");
            }
            return Ok(());
        }

        write_object_type(
            b,
            &format!("export type {} = ", cx.self_type()),
            &object,
            ";",
        )
        .map_err(|e| cx.builder_error(e))?;
        self.identity_constructor(cx, &cx.self_type(), b);
        Ok(())
    }

    fn object_members(
        &self,
        cx: &DeclContext<'_>,
        fields: &[NamedField],
        rule: Option<RenameRule>,
    ) -> GenerateResult<ObjectMembers> {
        let mut object = ObjectMembers::default();

        for field in fields.iter().filter(|f| !f.attrs.serde_flag(names::SKIP)) {
            let scope = cx.scope(&field.id_location);
            let ts_as = field.attrs.codegen_attr(names::TS_AS);
            let defaulted = field.attrs.has_serde_default()
                && field.attrs.serde_attr(names::SKIP_SERIALIZING_IF).is_some();

            if field.attrs.serde_flag(names::FLATTEN) {
                let (inner, wrapped) = peel_option(&field.format);
                let expr = match ts_as {
                    Some(ty) => ty.to_string(),
                    None => self.resolver.resolve(inner, &scope)?.expr,
                };
                let expr = if expr.contains(" | ") {
                    format!("({})", expr)
                } else {
                    expr
                };
                object.flattened.push(if wrapped || defaulted {
                    format!("Partial<{}>", expr)
                } else {
                    expr
                });
                continue;
            }

            let (expr, optional) = match ts_as {
                Some(ty) => (ty.to_string(), false),
                None => {
                    let resolved = self.resolver.resolve(&field.format, &scope)?;
                    (resolved.expr, resolved.optional)
                }
            };
            let key = wire_name(&field.id, &field.attrs, rule);
            object.members.push(Member {
                docs: self.docs(&field.attrs, None, &field.id_location),
                line: format!(
                    "{}{}: {};",
                    property_key(&key),
                    if optional || defaulted { "?" } else { "" },
                    expr
                ),
            });
        }
        Ok(object)
    }

    // =========================================================================
    // Enums
    // =========================================================================

    fn emit_enum(
        &self,
        cx: &DeclContext<'_>,
        variants: &[NamedVariant],
        b: &mut SourceBuilder,
        warnings: &mut Vec<Message>,
    ) -> GenerateResult<()> {
        let decl = cx.decl;
        let rule = self.rename_rule(&decl.id, &decl.attrs, &decl.id_location, warnings);

        let mut discriminants = HashSet::new();
        let mut taken: HashMap<String, &str> = HashMap::new();
        let mut arms = Vec::new();
        for variant in variants.iter().filter(|v| !v.attrs.serde_flag(names::SKIP)) {
            let discriminant = wire_name(&variant.id, &variant.attrs, rule);
            if !discriminants.insert(discriminant.clone()) {
                return Err(GenerateError::DuplicateVariant {
                    id: decl.id.clone(),
                    discriminant,
                    location: variant.id_location.clone(),
                });
            }

            let name = sanitize_ident(&variant.id);
            let conflict = if NAMESPACE_HELPERS.contains(&name.as_str()) {
                Some("a generated helper".to_string())
            } else if cx.generics.iter().any(|g| sanitize_ident(g) == name) {
                Some("a generic parameter of the enum".to_string())
            } else {
                taken
                    .get(&name)
                    .map(|other| format!("the name of variant '{}'", other))
            };
            if let Some(conflict) = conflict {
                return Err(GenerateError::VariantNameCollision {
                    id: decl.id.clone(),
                    variant: variant.id.clone(),
                    name,
                    conflict,
                    location: variant.id_location.clone(),
                });
            }
            taken.insert(name.clone(), &variant.id);

            arms.push(Arm {
                variant,
                name,
                discriminant,
            });
        }

        self.write_docs(b, &decl.attrs, None, &decl.id_location);
        if arms.is_empty() {
            b.line(format!("export type {} = never;", cx.self_type()));
        } else {
            b.line(format!("export type {} =", cx.self_type()));
            let union = b.indented();
            for arm in &arms {
                union.line(format!("| {}.{}{}", cx.ident, arm.name, cx.type_params()));
            }
            union
                .push_to_last_line(";")
                .map_err(|e| cx.builder_error(e))?;
        }

        let aliases = self.shadow_aliases(cx, &arms);
        for (name, (alias, arity)) in &aliases {
            let params = type_param_list((0..*arity).map(|n| format!("T{}", n)));
            b.line(format!("type {}{} = {}{};", alias, params, name, params));
        }
        let cx = &cx.with_aliases(
            aliases
                .into_iter()
                .map(|(name, (alias, _))| (name, alias))
                .collect(),
        );

        b.line(format!("export namespace {} {{", cx.ident));
        {
            let ns = b.indented();
            let mut handlers = Vec::with_capacity(arms.len());
            for arm in &arms {
                handlers.push(self.emit_variant(cx, arm, ns, warnings)?);
            }
            self.emit_matchers(cx, &arms, &handlers, ns);
        }
        b.line("}");
        Ok(())
    }

    /// Outer names hidden inside the namespace of `cx`, with their alias and
    /// generic arity: the enum itself and every referenced declaration named
    /// like a variant or a helper.
    fn shadow_aliases(
        &self,
        cx: &DeclContext<'_>,
        arms: &[Arm<'_>],
    ) -> BTreeMap<String, (String, usize)> {
        let hidden: HashSet<&str> = arms
            .iter()
            .map(|arm| arm.name.as_str())
            .chain(NAMESPACE_HELPERS)
            .collect();

        let mut references = Vec::new();
        for arm in arms {
            match &arm.variant.variant_format {
                VariantFormat::Unit => {}
                VariantFormat::NewType(inner) => referenced_types(inner, &mut references),
                VariantFormat::Tuple(elements) => {
                    for format in elements {
                        referenced_types(format, &mut references);
                    }
                }
                VariantFormat::Struct { fields } => {
                    let resolved = fields.iter().filter(|f| {
                        !f.attrs.serde_flag(names::SKIP)
                            && f.attrs.codegen_attr(names::TS_AS).is_none()
                    });
                    for field in resolved {
                        referenced_types(&field.format, &mut references);
                    }
                }
            }
        }

        let mut aliases = BTreeMap::new();
        if hidden.contains(cx.ident.as_str()) {
            aliases.insert(cx.ident.clone(), cx.generics.len());
        }
        for (ident, arity) in references {
            if cx.generics.contains(&ident) || !self.resolver.is_known(ident) {
                continue;
            }
            let name = sanitize_ident(ident);
            if hidden.contains(name.as_str()) {
                aliases.entry(name).or_insert(arity);
            }
        }

        aliases
            .into_iter()
            .map(|(name, arity)| {
                let alias = format!("${}${}", cx.ident, name);
                (name, (alias, arity))
            })
            .collect()
    }

    /// Emit a variant's type and constructor; returns the payload type its
    /// handler receives, `None` for unit variants.
    fn emit_variant(
        &self,
        cx: &DeclContext<'_>,
        arm: &Arm<'_>,
        ns: &mut SourceBuilder,
        warnings: &mut Vec<Message>,
    ) -> GenerateResult<Option<String>> {
        let variant = arm.variant;
        let scope = cx.scope(&variant.id_location);
        let params = cx.type_params();
        let variant_type = format!("{}{}", arm.name, params);
        let key = property_key(&arm.discriminant);
        let literal = string_literal(&arm.discriminant);

        self.write_docs(ns, &variant.attrs, None, &variant.id_location);

        let payload = match &variant.variant_format {
            VariantFormat::Unit => {
                ns.line(format!("export type {} = {};", variant_type, literal));
                ns.line(format!(
                    "export function {}{}(): {} {{",
                    arm.name, params, variant_type
                ));
                ns.indented().line(format!("return {};", literal));
                None
            }
            VariantFormat::NewType(inner) => {
                let inner = self.resolver.resolve(inner, &scope)?.expr;
                ns.line(format!(
                    "export type {} = {{ {}: {} }};",
                    variant_type, key, inner
                ));
                ns.line(format!(
                    "export function {}{}(inner: {}): {} {{",
                    arm.name, params, inner, variant_type
                ));
                ns.indented().line(format!("return {{ {}: inner }};", key));
                Some(inner)
            }
            VariantFormat::Tuple(elements) => {
                let exprs = elements
                    .iter()
                    .map(|format| self.resolver.resolve(format, &scope).map(|r| r.expr))
                    .collect::<GenerateResult<Vec<_>>>()?;
                let tuple = format!("[{}]", exprs.join(", "));
                let (params_list, args) = positional_params(&exprs);
                ns.line(format!(
                    "export type {} = {{ {}: {} }};",
                    variant_type, key, tuple
                ));
                ns.line(format!(
                    "export function {}{}({}): {} {{",
                    arm.name, params, params_list, variant_type
                ));
                ns.indented()
                    .line(format!("return {{ {}: [{}] }};", key, args));
                Some(tuple)
            }
            VariantFormat::Struct { fields } => {
                let rule = self.rename_rule(
                    &format!("{}::{}", cx.decl.id, variant.id),
                    &variant.attrs,
                    &variant.id_location,
                    warnings,
                );
                let object = self.object_members(cx, fields, rule)?;
                ns.line(format!("export type {} = {{", variant_type));
                write_object_type(ns.indented(), &format!("{}: ", key), &object, ";")
                    .map_err(|e| cx.builder_error(e))?;
                ns.line("};");

                let payload = format!("{}[{}]", variant_type, literal);
                ns.line(format!(
                    "export function {}{}(inner: {}): {} {{",
                    arm.name, params, payload, variant_type
                ));
                ns.indented().line(format!("return {{ {}: inner }};", key));
                Some(payload)
            }
        };
        ns.line("}");
        Ok(payload)
    }

    /// `ApplyFns`, `apply` and `match`.
    fn emit_matchers(
        &self,
        cx: &DeclContext<'_>,
        arms: &[Arm<'_>],
        handlers: &[Option<String>],
        ns: &mut SourceBuilder,
    ) {
        let taken: Vec<String> = cx
            .generics
            .iter()
            .map(|name| sanitize_ident(name))
            .chain(arms.iter().map(|arm| arm.name.clone()))
            .collect();
        let result = result_param(&taken);
        let params = type_param_list(
            cx.generics
                .iter()
                .map(|name| sanitize_ident(name))
                .chain(std::iter::once(result.clone())),
        );
        let apply_fns = format!("ApplyFns{}", params);

        // Handler table
        if arms.is_empty() {
            ns.line(format!("export type {} = {{}};", apply_fns));
        } else {
            ns.line(format!("export type {} = {{", apply_fns));
            let table = ns.indented();
            for (arm, handler) in arms.iter().zip(handlers) {
                match handler {
                    Some(payload) => {
                        table.line(format!("{}(inner: {}): {};", arm.name, payload, result))
                    }
                    None => table.line(format!("{}(): {};", arm.name, result)),
                };
            }
            ns.line("};");
        }

        // apply
        let docs = format!(
            "Build a function that calls the `to` handler matching the variant of its `{}` input.",
            cx.ident
        );
        self.write_docs(ns, &Attrs::default(), Some(&docs), &LocationId::default());
        ns.line(format!(
            "export function apply{}(to: {}): (input: {}) => {} {{",
            params,
            apply_fns,
            cx.self_ref(),
            result
        ));
        {
            let body = ns.indented();
            body.line(format!("return function _match(input): {} {{", result));
            {
                let dispatch = body.indented();
                for arm in arms.iter().filter(|arm| is_unit(arm)) {
                    dispatch.line(format!(
                        "if (input === {}) return {}();",
                        string_literal(&arm.discriminant),
                        property_access("to", &arm.name)
                    ));
                }
                if arms.iter().any(|arm| !is_unit(arm)) {
                    dispatch.line("if (typeof input === \"object\" && input !== null) {");
                    let objects = dispatch.indented();
                    for arm in arms.iter().filter(|arm| !is_unit(arm)) {
                        let narrowed = format!("(input as {}{})", arm.name, cx.type_params());
                        objects.line(format!(
                            "if (Object.prototype.hasOwnProperty.call(input, {})) return {}({});",
                            string_literal(&arm.discriminant),
                            property_access("to", &arm.name),
                            property_access(&narrowed, &arm.discriminant)
                        ));
                    }
                    dispatch.line("}");
                }
                dispatch.line(format!(
                    "throw new TypeError({});",
                    string_literal(&format!("Unknown variant of {}", cx.decl.id))
                ));
            }
            body.line("};");
        }
        ns.line("}");

        // match
        let docs = "Call the `to` handler matching the variant of `input`.";
        self.write_docs(ns, &Attrs::default(), Some(docs), &LocationId::default());
        ns.line(format!(
            "export function match{}(input: {}, to: {}): {} {{",
            params,
            cx.self_ref(),
            apply_fns,
            result
        ));
        ns.indented().line("return apply(to)(input);");
        ns.line("}");
    }
}

fn is_unit(arm: &Arm<'_>) -> bool {
    matches!(arm.variant.variant_format, VariantFormat::Unit)
}

/// Wire name of a field or variant: its `rename`, the container's
/// `rename_all` rule applied to its id, or the id itself.
fn wire_name(id: &str, attrs: &Attrs, rule: Option<RenameRule>) -> String {
    match (attrs.serde_attr(names::RENAME), rule) {
        (Some(rename), _) => rename.to_string(),
        (None, Some(rule)) => rule.apply(id),
        (None, None) => id.to_string(),
    }
}

/// Strip every `Option` layer, reporting whether there was one.
fn peel_option(format: &Format) -> (&Format, bool) {
    let mut format = format;
    let mut wrapped = false;
    while let Format::Option(inner) = format {
        format = inner;
        wrapped = true;
    }
    (format, wrapped)
}

/// `a: A, b: B` and `a, b`.
fn positional_params(exprs: &[String]) -> (String, String) {
    let names: Vec<String> = (0..exprs.len()).map(positional_param).collect();
    let params = names
        .iter()
        .zip(exprs)
        .map(|(name, expr)| format!("{}: {}", name, expr))
        .collect::<Vec<_>>()
        .join(", ");
    (params, names.join(", "))
}

fn type_param_list(names: impl IntoIterator<Item = String>) -> String {
    let names: Vec<String> = names.into_iter().collect();
    if names.is_empty() {
        String::new()
    } else {
        format!("<{}>", names.join(", "))
    }
}

/// Name of the matcher result parameter, avoiding every name in `taken`.
fn result_param(taken: &[String]) -> String {
    std::iter::once("R".to_string())
        .chain((1..).map(|n| format!("R{}", n)))
        .find(|name| !taken.contains(name))
        .unwrap_or_else(|| "R".to_string())
}

/// Every `TypeName` in `format`, with its number of generic arguments.
fn referenced_types<'f>(format: &'f Format, out: &mut Vec<(&'f str, usize)>) {
    match format {
        Format::Option(inner) | Format::Seq(inner) => referenced_types(inner, out),
        Format::TupleArray { content, .. } => referenced_types(content, out),
        Format::Map { key, value } => {
            referenced_types(key, out);
            referenced_types(value, out);
        }
        Format::Tuple(elements) => {
            for element in elements {
                referenced_types(element, out);
            }
        }
        Format::TypeName { ident, generics } => {
            out.push((ident.as_str(), generics.len()));
            for generic in generics {
                referenced_types(generic, out);
            }
        }
        _ => {}
    }
}

fn write_members(b: &mut SourceBuilder, members: &[Member]) {
    for member in members {
        if let Some(docs) = &member.docs {
            b.lines(docs.iter().cloned());
        }
        b.line(member.line.clone());
    }
}

/// Write `{prefix}{ ...members }` followed by the flattened intersections
/// and `terminator`.
fn write_object_type(
    b: &mut SourceBuilder,
    prefix: &str,
    object: &ObjectMembers,
    terminator: &str,
) -> Result<(), BuilderError> {
    let intersections: String = object
        .flattened
        .iter()
        .map(|ty| format!(" & {}", ty))
        .collect();

    if object.members.is_empty() {
        b.line(format!("{}{{}}{}{}", prefix, intersections, terminator));
        return Ok(());
    }

    b.line(format!("{}{{", prefix));
    write_members(b.indented(), &object.members);
    b.line("}");
    b.push_to_last_line(&intersections)?;
    b.push_to_last_line(terminator)
}
