//! Reference resolution: from an identifier to the declaration it denotes.

use crate::{
  decl::{Declaration, StructDefinition},
  syntax::{NodeId, NodeKind, Reference, SyntaxTree},
};
use log::trace;

/// Where to look for the documentation of an identifier.
///
/// An identifier is best described by the closest enclosing node that is not an identifier itself (the declarator
/// it names, the field selection it selects, …). If that node cannot be described, each identifier on the way up
/// is tried for a reference of its own, outermost first.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Lookup {
  /// Closest ancestor that is not an identifier.
  pub context: Option<NodeId>,

  /// Identifiers to resolve, from the outermost one down to the requested one.
  pub identifiers: Vec<NodeId>,
}

/// Walk up from an identifier to the node giving it context.
///
/// The walk is iterative and bounded by the size of the tree.
pub fn lookup(tree: &SyntaxTree, identifier: NodeId) -> Lookup {
  let mut identifiers = vec![identifier];
  let mut context = None;

  for ancestor in tree.ancestors(identifier) {
    match tree.kind(ancestor) {
      Some(NodeKind::Identifier(_)) => identifiers.push(ancestor),

      _ => {
        context = Some(ancestor);
        break;
      }
    }
  }

  identifiers.reverse();
  trace!(
    "lookup of {:?}: context {:?}, identifiers {:?}",
    identifier,
    context,
    identifiers
  );

  Lookup {
    context,
    identifiers,
  }
}

/// Reference of an identifier.
///
/// An identifier without a reference of its own borrows the one of its parent, when the parent is a type name.
pub fn reference(tree: &SyntaxTree, identifier: NodeId) -> Option<Reference> {
  let ident = match tree.kind(identifier)? {
    NodeKind::Identifier(ident) => ident,
    _ => return None,
  };

  ident.reference().or_else(|| {
    let parent = tree.parent(identifier)?;

    match tree.kind(parent)? {
      NodeKind::Typename(_) => tree.reference(parent),
      _ => None,
    }
  })
}

/// Struct definition an identifier refers to as a type name.
///
/// Any other kind of reference, or a type name that could not be resolved to a structure, gives [`None`].
pub fn type_reference(tree: &SyntaxTree, identifier: NodeId) -> Option<(NodeId, &StructDefinition)> {
  match reference(tree, identifier)? {
    Reference::TypeName(target) => {
      let target = target?;
      tree.struct_definition(target).map(|def| (target, def))
    }

    _ => None,
  }
}

/// Declaration an identifier denotes.
///
/// Using identifiers resolve through their reference, whatever its kind. Identifiers naming a declaration resolve to
/// that declaration.
pub fn resolve_declaration(tree: &SyntaxTree, identifier: NodeId) -> Option<Declaration<'_>> {
  match reference(tree, identifier) {
    Some(reference) => tree.declaration(reference.target()?),
    None => tree.declaration(tree.parent(identifier)?),
  }
}
