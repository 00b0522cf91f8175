//! Semantic checks over parsed scripts.
//!
//! A [`CompilerSession`] holds the symbol table of the script being
//! compiled. Sessions are pooled, so a session must be [`reset`] before it
//! is reused; otherwise declarations of one script would resolve in the
//! next.
//!
//! [`reset`]: CompilerSession::reset

use std::collections::{HashMap, HashSet};

use super::artifact::{CompiledScript, Declaration, Literal, ScriptDiagnostic};
use super::parser::{self, Statement, StatementKind};

/// Types every script can refer to without an import.
const BUILTIN_TYPES: &[&str] = &[
    "Any", "Unit", "Nothing", "Number", "Int", "Long", "Short", "Byte", "Double", "Float",
    "Boolean", "Char", "String",
];

/// Mutable state of one compilation.
#[derive(Debug)]
pub struct CompilerSession {
    types: HashSet<String>,
    classes: HashMap<String, usize>,
    properties: HashMap<String, usize>,
    diagnostics: Vec<ScriptDiagnostic>,
}

impl Default for CompilerSession {
    fn default() -> Self {
        let mut session = Self {
            types: HashSet::new(),
            classes: HashMap::new(),
            properties: HashMap::new(),
            diagnostics: Vec::new(),
        };
        session.reset();
        session
    }
}

impl CompilerSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything learned from the last script.
    pub fn reset(&mut self) {
        self.types.clear();
        self.types.extend(BUILTIN_TYPES.iter().map(|t| t.to_string()));
        self.classes.clear();
        self.properties.clear();
        self.diagnostics.clear();
    }

    /// Whether the session holds nothing but the built-in types.
    pub fn is_clean(&self) -> bool {
        self.types.len() == BUILTIN_TYPES.len()
            && self.classes.is_empty()
            && self.properties.is_empty()
            && self.diagnostics.is_empty()
    }

    /// Whether `name` resolves to a type in this session.
    pub fn resolves(&self, name: &str) -> bool {
        self.types.contains(name.trim_end_matches('?'))
    }

    /// Compile `source`. On failure, all diagnostics sorted by line.
    pub fn compile(
        &mut self,
        source: &str,
        fingerprint: String,
    ) -> Result<CompiledScript, Vec<ScriptDiagnostic>> {
        let parsed = parser::parse(source);
        self.diagnostics.extend(parsed.diagnostics);

        let package = self.check_package(&parsed.statements);
        let imports = self.declare(&parsed.statements);
        let declarations = self.check(&parsed.statements);

        if !self.diagnostics.is_empty() {
            let mut diagnostics = std::mem::take(&mut self.diagnostics);
            diagnostics.sort_by_key(|d| d.line);
            return Err(diagnostics);
        }

        Ok(CompiledScript {
            package,
            imports,
            declarations,
            fingerprint,
        })
    }

    fn error(&mut self, line: usize, message: impl Into<String>) {
        self.diagnostics.push(ScriptDiagnostic::new(line, message));
    }

    fn check_package(&mut self, statements: &[Statement]) -> Option<String> {
        let mut package = None;
        for (index, statement) in statements.iter().enumerate() {
            if let StatementKind::Package(name) = &statement.kind {
                if index == 0 {
                    package = Some(name.clone());
                } else {
                    self.error(statement.line, "Package directive must be the first statement");
                }
            }
        }
        package
    }

    /// First pass: imports and class names, so later references resolve
    /// regardless of declaration order.
    fn declare(&mut self, statements: &[Statement]) -> Vec<String> {
        let mut imports = Vec::new();
        for statement in statements {
            match &statement.kind {
                StatementKind::Import(path) => {
                    let simple = path.rsplit('.').next().unwrap_or(path);
                    self.types.insert(simple.to_string());
                    imports.push(path.clone());
                }
                StatementKind::Class { name, .. } => {
                    if self.classes.contains_key(name) || BUILTIN_TYPES.contains(&name.as_str()) {
                        self.error(statement.line, format!("Conflicting declaration: '{name}'"));
                    } else {
                        self.classes.insert(name.clone(), statement.line);
                        self.types.insert(name.clone());
                    }
                }
                _ => {}
            }
        }
        imports
    }

    /// Second pass: resolve references and check properties.
    fn check(&mut self, statements: &[Statement]) -> Vec<Declaration> {
        let mut declarations = Vec::new();
        for statement in statements {
            let line = statement.line;
            match &statement.kind {
                StatementKind::Class { name, supertype } => {
                    if let Some(supertype) = supertype {
                        if !self.resolves(supertype) {
                            self.error(line, format!("Unresolved reference: {supertype}"));
                        }
                    }
                    declarations.push(Declaration::Class {
                        name: name.clone(),
                        supertype: supertype.clone(),
                    });
                }
                StatementKind::Property {
                    mutable,
                    name,
                    ty,
                    initializer,
                } => {
                    if self.properties.insert(name.clone(), line).is_some() {
                        self.error(line, format!("Conflicting declaration: '{name}'"));
                    }
                    if let Some(ty) = self.property_type(line, name, ty.as_deref(), initializer.as_ref()) {
                        declarations.push(Declaration::Property {
                            name: name.clone(),
                            mutable: *mutable,
                            ty,
                            initializer: initializer.clone(),
                        });
                    }
                }
                StatementKind::Package(_) | StatementKind::Import(_) => {}
            }
        }
        declarations
    }

    fn property_type(
        &mut self,
        line: usize,
        name: &str,
        declared: Option<&str>,
        initializer: Option<&Literal>,
    ) -> Option<String> {
        match (declared, initializer) {
            (None, None) => {
                self.error(line, format!("Property '{name}' must have a type or an initializer"));
                None
            }
            (None, Some(literal)) => match literal.type_name() {
                Some(inferred) => Some(inferred.to_string()),
                None => {
                    self.error(line, format!("Cannot infer a type for '{name}' from null"));
                    None
                }
            },
            (Some(ty), literal) => {
                if !self.resolves(ty) {
                    self.error(line, format!("Unresolved reference: {}", ty.trim_end_matches('?')));
                } else if let Some(literal) = literal {
                    if let Some(message) = mismatch(ty, literal) {
                        self.error(line, message);
                    }
                }
                Some(ty.to_string())
            }
        }
    }
}

/// Why `literal` cannot initialize a property of type `ty`, if it cannot.
fn mismatch(ty: &str, literal: &Literal) -> Option<String> {
    let nullable = ty.ends_with('?');
    let base = ty.trim_end_matches('?');

    let Some(found) = literal.type_name() else {
        return (!nullable).then(|| format!("Null can not be a value of a non-null type {ty}"));
    };
    // Only built-in types have known literal forms.
    if !BUILTIN_TYPES.contains(&base) || base == "Any" {
        return None;
    }
    let accepted = match literal {
        Literal::Int(_) => matches!(base, "Int" | "Long" | "Short" | "Byte" | "Number"),
        Literal::Decimal(_) => matches!(base, "Double" | "Number"),
        Literal::String(_) => base == "String",
        Literal::Boolean(_) => base == "Boolean",
        Literal::Null => true,
    };
    (!accepted).then(|| format!("Type mismatch: inferred type is {found} but {ty} was expected"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors(source: &str) -> Vec<String> {
        CompilerSession::new()
            .compile(source, String::new())
            .err()
            .unwrap_or_default()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn valid_script_compiles() {
        let script = CompilerSession::new()
            .compile(
                "package com.example\nimport com.example.Base\nclass Custom : Base()\nval limit: Int = 10\nvar custom: Custom? = null\n",
                "abc".into(),
            )
            .unwrap();
        assert_eq!(script.package.as_deref(), Some("com.example"));
        assert_eq!(script.imports, vec!["com.example.Base"]);
        assert_eq!(script.declarations.len(), 3);
        assert_eq!(script.fingerprint, "abc");
    }

    #[test]
    fn unresolved_type_is_reported() {
        assert_eq!(
            errors("val unknownType: UnknownType"),
            vec!["line 1: Unresolved reference: UnknownType"]
        );
    }

    #[test]
    fn classes_resolve_regardless_of_order() {
        assert!(errors("val later: Later? = null\nclass Later\n").is_empty());
    }

    #[test]
    fn duplicate_declarations_conflict() {
        insta::assert_debug_snapshot!(errors("class A\nclass A\nval x = 1\nval x = 2\n"), @r###"
        [
            "line 2: Conflicting declaration: 'A'",
            "line 4: Conflicting declaration: 'x'",
        ]
        "###);
    }

    #[test]
    fn package_must_come_first() {
        assert_eq!(
            errors("val x = 1\npackage late\n"),
            vec!["line 2: Package directive must be the first statement"]
        );
    }

    #[test]
    fn property_needs_type_or_initializer() {
        assert_eq!(
            errors("val x\nval y = null\n"),
            vec![
                "line 1: Property 'x' must have a type or an initializer",
                "line 2: Cannot infer a type for 'y' from null",
            ]
        );
    }

    #[test]
    fn literal_type_mismatches() {
        assert_eq!(
            errors("val a: Int = \"ten\"\nval b: String = null\nval c: Long = 3\nval d: Any = true\n"),
            vec![
                "line 1: Type mismatch: inferred type is String but Int was expected",
                "line 2: Null can not be a value of a non-null type String",
            ]
        );
    }

    #[test]
    fn diagnostics_are_sorted_by_line() {
        let found = errors("val a: Missing\nthis is not kotlin\n");
        assert_eq!(found.len(), 2);
        assert!(found[0].starts_with("line 1:"));
        assert!(found[1].starts_with("line 2:"));
    }

    #[test]
    fn reset_forgets_previous_script() {
        let mut session = CompilerSession::new();
        assert!(session.is_clean());
        session.compile("class Foo\n", String::new()).unwrap();
        assert!(session.resolves("Foo"));
        assert!(!session.is_clean());

        session.reset();
        assert!(session.is_clean());
        assert!(!session.resolves("Foo"));
    }
}
