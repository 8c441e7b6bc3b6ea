//! Run state and output aggregation.
//!
//! A [`Generation`] holds everything one run accumulates: the ids already
//! emitted, the rendered declarations, template bindings and warnings. It is
//! created per call to [`generate`] and shared with nothing else.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{GenerateResult, Message};
use crate::generator::builder::SourceBuilder;
use crate::generator::config::GeneratorConfig;
use crate::generator::emitter::DeclarationEmitter;
use crate::generator::ident::string_literal;
use crate::ir::{Declaration, Document, LocationId};

/// A generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFile {
    /// Path relative to the output directory
    pub path: String,
    pub source: String,
}

/// Files and warnings of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedFiles {
    /// Primary file first, then one file per template binding
    pub files: Vec<OutputFile>,
    pub warnings: Vec<Message>,
}

/// Envelope returned to the IR producer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub files: Vec<OutputFile>,
    pub errors: Vec<Message>,
    pub warnings: Vec<Message>,
}

impl Output {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

impl From<GeneratedFiles> for Output {
    fn from(generated: GeneratedFiles) -> Self {
        Self {
            files: generated.files,
            errors: Vec::new(),
            warnings: generated.warnings,
        }
    }
}

/// A declaration bound to a template consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateBinding {
    /// Sanitized declaration identifier
    pub ident: String,
    pub template: String,
    /// Whether the declaration also exports a constructor value
    pub has_value: bool,
    pub location: LocationId,
}

impl TemplateBinding {
    /// `<template>.<Ident>.ts`
    pub fn file_path(&self) -> String {
        format!("{}.{}.ts", file_stem(&self.template), self.ident)
    }

    /// Re-export of the declaration from the primary module.
    pub fn source(&self, shared_module: &str) -> String {
        let keyword = if self.has_value { "export" } else { "export type" };
        format!(
            "{} {{ {} }} from \"{}\";\n",
            keyword, self.ident, shared_module
        )
    }
}

/// Per-run state.
#[derive(Debug, Default)]
pub struct Generation {
    /// First location of every claimed id
    seen: HashMap<String, LocationId>,
    declarations: Vec<SourceBuilder>,
    templates: Vec<TemplateBinding>,
    warnings: Vec<Message>,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the id of `decl` for this run.
    ///
    /// Returns `false`, recording a warning, when the id was already
    /// claimed by an earlier declaration.
    pub fn claim(&mut self, decl: &Declaration) -> bool {
        if let Some(first) = self.seen.get(&decl.id) {
            let message = Message::new(format!(
                "duplicate declaration '{}' skipped; only the first is emitted",
                decl.id
            ))
            .with_label("first declared here", first.clone())
            .with_label("skipped duplicate", decl.id_location.clone());
            self.warn(message);
            return false;
        }
        self.seen.insert(decl.id.clone(), decl.id_location.clone());
        true
    }

    pub fn push_declaration(&mut self, builder: SourceBuilder) {
        self.declarations.push(builder);
    }

    pub fn register_template(&mut self, binding: TemplateBinding) {
        debug!(ident = %binding.ident, template = %binding.template, "template binding");
        self.templates.push(binding);
    }

    pub fn warn(&mut self, message: Message) {
        warn!("{}", message);
        self.warnings.push(message);
    }

    pub fn warnings(&self) -> &[Message] {
        &self.warnings
    }

    pub fn templates(&self) -> &[TemplateBinding] {
        &self.templates
    }

    /// Every emitted declaration, rendered.
    pub fn rendered(&self, indent: &str) -> Vec<String> {
        self.declarations
            .iter()
            .map(|builder| builder.render(indent))
            .collect()
    }

    /// Assemble the output files.
    pub fn finish(self, config: &GeneratorConfig) -> GeneratedFiles {
        let mut sections = Vec::new();
        if let Some(module) = &config.import_scalars_from {
            sections.push(format!(
                "import * as $scalars from {};",
                string_literal(module)
            ));
        }
        if let Some(text) = config.prepend_text.as_deref().map(str::trim_end) {
            if !text.is_empty() {
                sections.push(text.to_string());
            }
        }
        sections.extend(self.rendered(config.indent.as_str()));

        let mut primary = sections.join("\n\n");
        if !primary.is_empty() {
            primary.push('\n');
        }

        let shared_module = config.shared_module_specifier();
        let mut files = vec![OutputFile {
            path: config.shared_file_name.clone(),
            source: primary,
        }];
        files.extend(self.templates.iter().map(|binding| OutputFile {
            path: binding.file_path(),
            source: binding.source(&shared_module),
        }));

        GeneratedFiles {
            files,
            warnings: self.warnings,
        }
    }
}

/// Generate every file for `document`.
///
/// The first fatal error aborts the run and no files are produced.
pub fn generate(document: &Document, config: &GeneratorConfig) -> GenerateResult<GeneratedFiles> {
    let known: HashSet<String> = document
        .declarations
        .iter()
        .map(|decl| decl.id.clone())
        .collect();
    let emitter = DeclarationEmitter::new(&known, config);
    let mut run = Generation::new();

    debug!(declarations = document.declarations.len(), "generation started");
    for decl in &document.declarations {
        if run.claim(decl) {
            emitter.emit(decl, &mut run)?;
        }
    }

    let generated = run.finish(config);
    debug!(
        files = generated.files.len(),
        warnings = generated.warnings.len(),
        "generation finished"
    );
    Ok(generated)
}

/// [`generate`], reporting a fatal error inside the envelope.
pub fn run(document: &Document, config: &GeneratorConfig) -> Output {
    match generate(document, config) {
        Ok(generated) => generated.into(),
        Err(error) => Output {
            files: Vec::new(),
            errors: vec![error.to_message()],
            warnings: Vec::new(),
        },
    }
}

/// Template names become part of a file name.
fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
