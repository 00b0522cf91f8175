//! Compiled script artifacts and compiler diagnostics.

use serde::Serialize;

/// A compiler message attached to a source line (1-indexed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptDiagnostic {
    pub line: usize,
    pub message: String,
}

impl ScriptDiagnostic {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ScriptDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// A literal initializer value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum Literal {
    Int(i64),
    /// Decimal literals keep their source text.
    Decimal(String),
    String(String),
    Boolean(bool),
    Null,
}

impl Literal {
    /// Name of the type a literal has when nothing else is declared.
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            Literal::Int(_) => Some("Int"),
            Literal::Decimal(_) => Some("Double"),
            Literal::String(_) => Some("String"),
            Literal::Boolean(_) => Some("Boolean"),
            Literal::Null => None,
        }
    }
}

/// A top-level declaration of a compiled script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum Declaration {
    Class {
        name: String,
        supertype: Option<String>,
    },
    Property {
        name: String,
        mutable: bool,
        #[serde(rename = "type")]
        ty: String,
        initializer: Option<Literal>,
    },
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Class { name, .. } | Declaration::Property { name, .. } => name,
        }
    }
}

/// The result of compiling one script.
///
/// Two artifacts compiled from the same normalized source are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledScript {
    pub package: Option<String>,
    pub imports: Vec<String>,
    pub declarations: Vec<Declaration>,
    /// Hex SHA-256 of the normalized source.
    pub fingerprint: String,
}

impl CompiledScript {
    /// Look up a top-level declaration by name.
    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name() == name)
    }

    /// Fully qualified name of a declaration in this script's package.
    pub fn qualified_name(&self, name: &str) -> String {
        match &self.package {
            Some(package) => format!("{package}.{name}"),
            None => name.to_string(),
        }
    }
}
