//! Identifier handling.
//!
//! Declaration names become TypeScript identifiers through
//! [`sanitize_ident`]. Member names stay on the wire untouched, so they are
//! quoted where needed rather than sanitized.

use convert_case::{Case, Casing};

/// Turn an arbitrary name into a valid bare identifier.
///
/// Every character outside `[A-Za-z0-9_$]` becomes `$`, and a leading digit
/// gets a `$` prefix.
pub fn sanitize_ident(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                c
            } else {
                '$'
            }
        })
        .collect();

    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '$');
    }
    ident
}

/// Whether `name` can be written as a bare identifier.
pub fn is_ident(name: &str) -> bool {
    !name.is_empty() && sanitize_ident(name) == name
}

/// Render a string literal.
pub fn string_literal(value: &str) -> String {
    // A JSON string is a valid TypeScript string literal.
    serde_json::Value::String(value.to_string()).to_string()
}

/// Render an object member key, quoting it when it isn't an identifier.
pub fn property_key(name: &str) -> String {
    if is_ident(name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}

/// Render `object.name`, or `object["name"]` when needed.
pub fn property_access(object: &str, name: &str) -> String {
    if is_ident(name) {
        format!("{}.{}", object, name)
    } else {
        format!("{}[{}]", object, string_literal(name))
    }
}

/// Synthesized positional parameter name: `a`, `b`, ... `z`, `a1`, ...
pub fn positional_param(index: usize) -> String {
    let letter = (b'a' + (index % 26) as u8) as char;
    match index / 26 {
        0 => letter.to_string(),
        round => format!("{}{}", letter, round),
    }
}

/// Serde `rename_all` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    /// lowercase
    LowerCase,

    /// UPPERCASE
    UpperCase,

    /// PascalCase
    PascalCase,

    /// camelCase
    CamelCase,

    /// snake_case
    SnakeCase,

    /// SCREAMING_SNAKE_CASE
    ScreamingSnakeCase,

    /// kebab-case
    KebabCase,

    /// SCREAMING-KEBAB-CASE
    ScreamingKebabCase,
}

impl RenameRule {
    /// Parse the serde spelling of a rule.
    pub fn parse(rule: &str) -> Option<Self> {
        let rule = match rule {
            "lowercase" => RenameRule::LowerCase,
            "UPPERCASE" => RenameRule::UpperCase,
            "PascalCase" => RenameRule::PascalCase,
            "camelCase" => RenameRule::CamelCase,
            "snake_case" => RenameRule::SnakeCase,
            "SCREAMING_SNAKE_CASE" => RenameRule::ScreamingSnakeCase,
            "kebab-case" => RenameRule::KebabCase,
            "SCREAMING-KEBAB-CASE" => RenameRule::ScreamingKebabCase,
            _ => return None,
        };
        Some(rule)
    }

    /// Apply the rename rule to a string.
    pub fn apply(&self, name: &str) -> String {
        match self {
            RenameRule::LowerCase => name.to_ascii_lowercase(),
            RenameRule::UpperCase => name.to_ascii_uppercase(),
            RenameRule::PascalCase => name.to_case(Case::Pascal),
            RenameRule::CamelCase => name.to_case(Case::Camel),
            RenameRule::SnakeCase => name.to_case(Case::Snake),
            RenameRule::ScreamingSnakeCase => name.to_case(Case::UpperSnake),
            RenameRule::KebabCase => name.to_case(Case::Kebab),
            RenameRule::ScreamingKebabCase => name.to_case(Case::UpperKebab),
        }
    }
}
