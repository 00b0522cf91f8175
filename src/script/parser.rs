//! Line-oriented parser for configuration scripts.
//!
//! One statement per line:
//!
//! ```text
//! package com.example.config
//! import com.example.Base
//! class Custom : Base()
//! val limit: Int = 10
//! var label = "default"
//! // comment
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::artifact::{Literal, ScriptDiagnostic};

static PACKAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^package\s+([A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*)$").expect("valid regex")
});

static IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^import\s+([A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*)$").expect("valid regex")
});

static CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^class\s+([A-Za-z_]\w*)(?:\s*:\s*([A-Za-z_]\w*)(?:\(\))?)?$").expect("valid regex")
});

static PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(val|var)\s+([A-Za-z_]\w*)(?:\s*:\s*([A-Za-z_]\w*\??))?(?:\s*=\s*(.+))?$")
        .expect("valid regex")
});

static INT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-?\d+$").expect("valid regex"));

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+\.\d+$").expect("valid regex"));

static STRING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"([^"\\]*)"$"#).expect("valid regex"));

/// A parsed statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementKind {
    Package(String),
    Import(String),
    Class {
        name: String,
        supertype: Option<String>,
    },
    Property {
        mutable: bool,
        name: String,
        ty: Option<String>,
        initializer: Option<Literal>,
    },
}

/// A statement and the line it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub line: usize,
    pub kind: StatementKind,
}

/// Everything the parser produced, including syntax errors.
#[derive(Debug, Default)]
pub struct ParsedScript {
    pub statements: Vec<Statement>,
    pub diagnostics: Vec<ScriptDiagnostic>,
}

/// Parse `source`. Lines that are not statements become diagnostics.
pub fn parse(source: &str) -> ParsedScript {
    let mut parsed = ParsedScript::default();

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with("//") {
            continue;
        }
        match parse_statement(text) {
            Ok(kind) => parsed.statements.push(Statement { line, kind }),
            Err(message) => parsed.diagnostics.push(ScriptDiagnostic::new(line, message)),
        }
    }

    parsed
}

fn parse_statement(text: &str) -> Result<StatementKind, String> {
    if let Some(caps) = PACKAGE.captures(text) {
        return Ok(StatementKind::Package(caps[1].to_string()));
    }
    if let Some(caps) = IMPORT.captures(text) {
        return Ok(StatementKind::Import(caps[1].to_string()));
    }
    if let Some(caps) = CLASS.captures(text) {
        return Ok(StatementKind::Class {
            name: caps[1].to_string(),
            supertype: caps.get(2).map(|m| m.as_str().to_string()),
        });
    }
    if let Some(caps) = PROPERTY.captures(text) {
        let initializer = caps
            .get(4)
            .map(|m| parse_literal(m.as_str().trim()))
            .transpose()?;
        return Ok(StatementKind::Property {
            mutable: &caps[1] == "var",
            name: caps[2].to_string(),
            ty: caps.get(3).map(|m| m.as_str().to_string()),
            initializer,
        });
    }
    Err(format!("Expecting a top level declaration: '{text}'"))
}

fn parse_literal(text: &str) -> Result<Literal, String> {
    match text {
        "true" => return Ok(Literal::Boolean(true)),
        "false" => return Ok(Literal::Boolean(false)),
        "null" => return Ok(Literal::Null),
        _ => {}
    }
    if INT.is_match(text) {
        return text
            .parse()
            .map(Literal::Int)
            .map_err(|_| format!("The value '{text}' is out of range"));
    }
    if DECIMAL.is_match(text) {
        return Ok(Literal::Decimal(text.to_string()));
    }
    if let Some(caps) = STRING.captures(text) {
        return Ok(Literal::String(caps[1].to_string()));
    }
    Err(format!("Only literal initializers are supported: '{text}'"))
}

/// Source text with line endings unified, lines trimmed and blank lines
/// dropped. Scripts equal after normalization compile to equal artifacts.
pub fn normalize(source: &str) -> String {
    source
        .replace("\r\n", "\n")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
