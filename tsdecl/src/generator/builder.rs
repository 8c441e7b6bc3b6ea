//! Indentation-aware source builder.
//!
//! A [`SourceBuilder`] is a tree of lines and nested scopes. Nesting is a
//! property of the tree, not of string concatenation order, so the rendered
//! indentation is always consistent with the structure.

use crate::error::BuilderError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Line(String),
    Scope(SourceBuilder),
}

/// Tree of source lines.
///
/// ```rust
/// use tsdecl::generator::builder::SourceBuilder;
///
/// let mut b = SourceBuilder::new();
/// b.line("export type User = {");
/// b.indented().line("name: string;");
/// b.line("};");
/// assert_eq!(b.render("  "), "export type User = {\n  name: string;\n};");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceBuilder {
    entries: Vec<Entry>,
}

impl SourceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line at this level.
    pub fn line(&mut self, line: impl Into<String>) -> &mut Self {
        self.entries.push(Entry::Line(line.into()));
        self
    }

    /// Append every line of `lines` at this level.
    pub fn lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .extend(lines.into_iter().map(|line| Entry::Line(line.into())));
        self
    }

    /// Open a nested scope one level deeper and return it.
    pub fn indented(&mut self) -> &mut SourceBuilder {
        self.entries.push(Entry::Scope(SourceBuilder::new()));
        match self.entries.last_mut() {
            Some(Entry::Scope(scope)) => scope,
            _ => unreachable!("a scope was just pushed"),
        }
    }

    /// Open a nested scope and fill it with `f`.
    pub fn with_indent<T>(&mut self, f: impl FnOnce(&mut SourceBuilder) -> T) -> T {
        f(self.indented())
    }

    /// The most recently appended line, for post-hoc suffixing.
    pub fn last_line_mut(&mut self) -> Result<&mut String, BuilderError> {
        match self.entries.last_mut() {
            Some(Entry::Line(line)) => Ok(line),
            Some(Entry::Scope(_)) => Err(BuilderError::LastIsScope),
            None => Err(BuilderError::Empty),
        }
    }

    /// Append `suffix` to the most recently appended line.
    pub fn push_to_last_line(&mut self, suffix: &str) -> Result<(), BuilderError> {
        self.last_line_mut()?.push_str(suffix);
        Ok(())
    }

    /// Whether nothing renders from this builder.
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|entry| match entry {
            Entry::Line(_) => false,
            Entry::Scope(scope) => scope.is_empty(),
        })
    }

    /// Render the tree, indenting each nesting level by `indent`.
    pub fn render(&self, indent: &str) -> String {
        let mut out = Vec::new();
        self.render_into(indent, 0, &mut out);
        out.join("\n")
    }

    fn render_into(&self, indent: &str, depth: usize, out: &mut Vec<String>) {
        for entry in &self.entries {
            match entry {
                Entry::Line(line) if line.is_empty() => out.push(String::new()),
                Entry::Line(line) => out.push(format!("{}{}", indent.repeat(depth), line)),
                Entry::Scope(scope) => scope.render_into(indent, depth + 1, out),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_flat() {
        let mut b = SourceBuilder::new();
        b.line("a").line("b");
        assert_eq!(b.render("  "), "a\nb");
    }

    #[test]
    fn test_render_nested() {
        let mut b = SourceBuilder::new();
        b.line("namespace X {");
        b.with_indent(|b| {
            b.line("function f() {");
            b.indented().line("return 1;");
            b.line("}");
        });
        b.line("}");
        assert_eq!(
            b.render("    "),
            "namespace X {\n    function f() {\n        return 1;\n    }\n}"
        );
    }

    #[test]
    fn test_empty_scope_renders_nothing() {
        let mut b = SourceBuilder::new();
        b.line("{");
        b.indented();
        b.line("}");
        assert_eq!(b.render("  "), "{\n}");
    }

    #[test]
    fn test_blank_line_has_no_indent() {
        let mut b = SourceBuilder::new();
        b.with_indent(|b| {
            b.line("a");
            b.line("");
            b.line("b");
        });
        assert_eq!(b.render("\t"), "\ta\n\n\tb");
    }

    #[test]
    fn test_last_line_mut_suffixes() {
        let mut b = SourceBuilder::new();
        b.line("}");
        b.push_to_last_line(" & Partial<B>").unwrap();
        b.push_to_last_line(";").unwrap();
        assert_eq!(b.render("  "), "} & Partial<B>;");
    }

    #[test]
    fn test_last_line_on_scope_is_an_error() {
        let mut b = SourceBuilder::new();
        b.line("{");
        b.indented().line("x");
        assert_eq!(b.last_line_mut(), Err(BuilderError::LastIsScope));
    }

    #[test]
    fn test_last_line_on_empty_is_an_error() {
        let mut b = SourceBuilder::new();
        assert_eq!(b.push_to_last_line(";"), Err(BuilderError::Empty));
    }

    #[test]
    fn test_is_empty() {
        let mut b = SourceBuilder::new();
        assert!(b.is_empty());
        b.indented();
        assert!(b.is_empty());
        b.line("x");
        assert!(!b.is_empty());
    }

    #[test]
    fn test_render_is_repeatable() {
        let mut b = SourceBuilder::new();
        b.line("a");
        b.indented().lines(["b", "c"]);
        assert_eq!(b.render("  "), b.render("  "));
    }
}
