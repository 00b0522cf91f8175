//! Findings reported by rules.
//!
//! A [`Finding`] points at an [`Entity`]: a node of one unit's syntax tree,
//! with its location copied out so findings outlive the tree.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::rule::RuleId;
use crate::severity::Severity;
use crate::syntax::{NodeId, SyntaxNode, TextRange};

/// Maximum length of an entity signature.
const SIGNATURE_LIMIT: usize = 80;

/// The code element a finding is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    /// Unit the node belongs to.
    pub unit: PathBuf,
    /// Node within the unit's tree.
    pub node: NodeId,
    /// Short, single-line rendering of the node.
    pub signature: String,
    /// Source location.
    pub range: TextRange,
}

impl Entity {
    /// Entity for a whole node.
    pub fn from_node(unit: &Path, node: &SyntaxNode) -> Self {
        Self {
            unit: unit.to_path_buf(),
            node: node.id(),
            signature: signature_of(node.text()),
            range: node.range(),
        }
    }

    /// Entity named after a declaration, falling back to its text.
    pub fn at_name(unit: &Path, node: &SyntaxNode) -> Self {
        let mut entity = Self::from_node(unit, node);
        if let Some(name) = node.name() {
            entity.signature = signature_of(name);
        }
        entity
    }
}

fn signature_of(text: &str) -> String {
    let line = text.lines().next().unwrap_or("").trim();
    if line.chars().count() > SIGNATURE_LIMIT {
        let cut: String = line.chars().take(SIGNATURE_LIMIT).collect();
        format!("{cut}...")
    } else {
        line.to_string()
    }
}

/// One issue reported by one rule on one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub rule_id: RuleId,
    pub entity: Entity,
    pub message: String,
    pub severity: Severity,
}

impl Finding {
    /// Create a new finding.
    pub fn new(
        rule_id: RuleId,
        entity: Entity,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            rule_id,
            entity,
            message: message.into(),
            severity,
        }
    }

    /// Sort key used for deterministic reports: location, then rule id.
    pub fn sort_key(&self) -> (&Path, TextRange, &RuleId) {
        (&self.entity.unit, self.entity.range, &self.rule_id)
    }
}
