//! Semantic (binding/type) information layered over a syntax tree.
//!
//! Type resolution happens elsewhere; rules only talk to it through
//! [`BindingContext`]. [`TypeTable`] is a plain in-memory implementation for
//! embedders that already hold resolved types.

use std::collections::{HashMap, HashSet, VecDeque};

use super::tree::NodeId;

/// A resolved type, identified by its fully qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef(pub String);

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolved type and reference information for one analysis unit.
pub trait BindingContext: Send + Sync {
    /// Resolved type of the expression or type reference at `node`.
    fn type_of(&self, node: NodeId) -> Option<TypeRef>;

    /// Whether `sub` is `sup` or one of its subtypes.
    fn is_subtype_of(&self, sub: &TypeRef, sup: &TypeRef) -> bool;

    /// Fully qualified name of the function a call expression resolves to.
    fn resolved_call(&self, _node: NodeId) -> Option<String> {
        None
    }
}

/// In-memory binding information.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    types: HashMap<NodeId, TypeRef>,
    supertypes: HashMap<TypeRef, Vec<TypeRef>>,
    calls: HashMap<NodeId, String>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the resolved type of a node.
    pub fn with_type(mut self, node: NodeId, ty: impl Into<String>) -> Self {
        self.types.insert(node, TypeRef::new(ty));
        self
    }

    /// Declare `sup` as a direct supertype of `sub`.
    pub fn with_supertype(mut self, sub: impl Into<String>, sup: impl Into<String>) -> Self {
        self.supertypes
            .entry(TypeRef::new(sub))
            .or_default()
            .push(TypeRef::new(sup));
        self
    }

    /// Record the function a call expression resolves to.
    pub fn with_call(mut self, node: NodeId, fq_name: impl Into<String>) -> Self {
        self.calls.insert(node, fq_name.into());
        self
    }
}

impl BindingContext for TypeTable {
    fn type_of(&self, node: NodeId) -> Option<TypeRef> {
        self.types.get(&node).cloned()
    }

    fn is_subtype_of(&self, sub: &TypeRef, sup: &TypeRef) -> bool {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([sub]);
        while let Some(current) = queue.pop_front() {
            if current == sup {
                return true;
            }
            if !seen.insert(current) {
                continue;
            }
            if let Some(parents) = self.supertypes.get(current) {
                queue.extend(parents.iter());
            }
        }
        false
    }

    fn resolved_call(&self, node: NodeId) -> Option<String> {
        self.calls.get(&node).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exceptions() -> TypeTable {
        TypeTable::new()
            .with_supertype("java.io.IOException", "java.lang.Exception")
            .with_supertype("my.MyException", "java.io.IOException")
            .with_supertype("java.lang.Exception", "java.lang.Throwable")
    }

    #[test]
    fn subtype_is_reflexive() {
        let table = TypeTable::new();
        let t = TypeRef::new("a.A");
        assert!(table.is_subtype_of(&t, &t));
    }

    #[test]
    fn subtype_is_transitive() {
        let table = exceptions();
        assert!(table.is_subtype_of(
            &TypeRef::new("my.MyException"),
            &TypeRef::new("java.lang.Throwable")
        ));
        assert!(!table.is_subtype_of(
            &TypeRef::new("java.lang.Exception"),
            &TypeRef::new("my.MyException")
        ));
    }

    #[test]
    fn cyclic_hierarchy_terminates() {
        let table = TypeTable::new()
            .with_supertype("a.A", "a.B")
            .with_supertype("a.B", "a.A");
        assert!(!table.is_subtype_of(&TypeRef::new("a.A"), &TypeRef::new("a.C")));
    }

    #[test]
    fn types_and_calls_are_looked_up_by_node() {
        let table = TypeTable::new()
            .with_type(NodeId(3), "kotlin.String")
            .with_call(NodeId(4), "kotlin.require");
        assert_eq!(table.type_of(NodeId(3)), Some(TypeRef::new("kotlin.String")));
        assert_eq!(table.type_of(NodeId(4)), None);
        assert_eq!(table.resolved_call(NodeId(4)).as_deref(), Some("kotlin.require"));
    }
}
