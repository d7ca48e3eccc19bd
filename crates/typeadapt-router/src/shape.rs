use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::procedure::ProcedureKind;

/// Serializable structure of a router: names, nesting and procedure kinds.
///
/// Carries no schemas or implementations. Clients project their stubs
/// from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterShape {
    pub default_adapter: String,
    pub entries: BTreeMap<String, ShapeNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeNode {
    Procedure { kind: ProcedureKind, adapter: String },
    Router(RouterShape),
}

impl RouterShape {
    /// Node at a dotted path, if any.
    pub fn lookup(&self, path: &str) -> Option<&ShapeNode> {
        let (head, rest) = match path.split_once(crate::PATH_SEPARATOR) {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        match (self.entries.get(head)?, rest) {
            (node, None) => Some(node),
            (ShapeNode::Router(nested), Some(rest)) => nested.lookup(rest),
            (ShapeNode::Procedure { .. }, Some(_)) => None,
        }
    }
}
