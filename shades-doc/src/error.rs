//! Errors raised while building syntax trees.
//!
//! Documentation queries never fail; only [`TreeBuilder`](crate::syntax::TreeBuilder) does, when asked to attach
//! something the tree cannot represent.

use crate::syntax::NodeId;
use thiserror::Error;

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TreeError {
  #[error("node {0:?} does not belong to the tree")]
  UnknownNode(NodeId),

  #[error("node {0:?} is not a declaration and cannot own declarators")]
  NotADeclaration(NodeId),

  #[error("node {0:?} is not a struct definition")]
  NotAStruct(NodeId),

  #[error("node {0:?} is not a field selection")]
  NotAFieldSelection(NodeId),

  #[error("struct {structure} declares member {member} more than once")]
  DuplicateMember { structure: String, member: String },

  #[error("function {function} declares parameter {parameter} more than once")]
  DuplicateParameter { function: String, parameter: String },

  #[error("variable {0} is declared more than once in the same declaration")]
  DuplicateVariable(String),

  #[error("declarations must be named")]
  EmptyName,

  #[error("unknown type name {0}")]
  UnknownType(String),
}
