//! Syntax and binding information consumed by rules.
//!
//! Parsing and type resolution are not done here. This module defines the
//! shape the engine expects from them:
//! - [`SyntaxTree`] / [`SyntaxNode`] in [`tree`]
//! - [`BindingContext`] in [`bindings`]
//! - [`AnalysisUnit`], one file's tree plus optional bindings

pub mod bindings;
pub mod tree;

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use bindings::{BindingContext, TypeRef, TypeTable};
pub use tree::{walk_kind, Descendants, NodeId, NodeKind, SyntaxNode, SyntaxTree, TextRange};

/// One source file ready for rule execution.
#[derive(Clone)]
pub struct AnalysisUnit {
    path: PathBuf,
    tree: Arc<SyntaxTree>,
    bindings: Option<Arc<dyn BindingContext>>,
}

impl AnalysisUnit {
    /// A unit with syntax only; full-analysis rules will be skipped.
    pub fn new(path: impl Into<PathBuf>, tree: SyntaxTree) -> Self {
        Self {
            path: path.into(),
            tree: Arc::new(tree),
            bindings: None,
        }
    }

    /// Attach binding information.
    pub fn with_bindings(mut self, bindings: impl BindingContext + 'static) -> Self {
        self.bindings = Some(Arc::new(bindings));
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn bindings(&self) -> Option<&dyn BindingContext> {
        self.bindings.as_deref()
    }

    pub fn has_bindings(&self) -> bool {
        self.bindings.is_some()
    }
}

impl std::fmt::Debug for AnalysisUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisUnit")
            .field("path", &self.path)
            .field("has_bindings", &self.has_bindings())
            .finish()
    }
}
