//! Documentation generation.
//!
//! [`Documenter`] classifies a node by its kind and renders the entity it stands for with the
//! [markup writers](crate::writer::markup). Requests never fail: anything that cannot be resolved yields [`None`].

use crate::{
  decl::{DeclarationKind, FunctionDeclaration, StructDefinition},
  resolve,
  syntax::{NodeId, NodeKind, SyntaxTree},
  types::Signature,
  writer::markup,
};
use log::debug;

/// Generate the documentation of `node`.
///
/// `original` is the node under the cursor, if any. It only matters when `node` is a struct definition: if the
/// cursor sits in a function call, the user is looking at a constructor call and the constructor is documented
/// instead of the structure.
pub fn generate_documentation(tree: &SyntaxTree, node: NodeId, original: Option<NodeId>) -> Option<String> {
  Documenter::new(tree).generate(node, original)
}

/// Documentation generator over a [`SyntaxTree`].
#[derive(Clone, Copy, Debug)]
pub struct Documenter<'t> {
  tree: &'t SyntaxTree,
}

impl<'t> Documenter<'t> {
  pub fn new(tree: &'t SyntaxTree) -> Self {
    Self { tree }
  }

  /// See [`generate_documentation`].
  pub fn generate(&self, node: NodeId, original: Option<NodeId>) -> Option<String> {
    let doc = self.document(node, original);

    if doc.is_none() {
      debug!("no documentation for {:?}", node);
    }

    doc
  }

  fn document(&self, node: NodeId, original: Option<NodeId>) -> Option<String> {
    let kind = self.tree.kind(node)?;

    if let (NodeKind::StructDefinition(_), Some(original)) = (kind, original) {
      if let Some(call) = self.tree.enclosing_call(original) {
        debug!("{:?} is the callee of constructor call {:?}", node, call);
        return self.constructor_call(call);
      }
    }

    match kind {
      NodeKind::Identifier(_) => self.identifier(node),
      NodeKind::StructDefinition(def) => self.structure(node, def),
      NodeKind::FunctionDeclaration(decl) => self.function_declaration(node, decl),
      NodeKind::Declarator(_) => self.declarator(node),

      NodeKind::FunctionCall(call) if call.is_constructor() => self.constructor_call(node),
      NodeKind::FunctionCall(call) => self.function(call.callee()?, None),

      NodeKind::Typename(typename) => {
        let def = typename.definition()?;
        self.structure(def, self.tree.struct_definition(def)?)
      }

      NodeKind::FieldSelection(selection) => {
        let ty = selection.ty()?;
        let member = selection.member()?;

        match self.tree.kind(member)? {
          NodeKind::Identifier(ident) => self.named(member, ty.unqualified(), ident.name()),
          _ => None,
        }
      }

      NodeKind::VariableDeclaration
      | NodeKind::ParameterDeclaration
      | NodeKind::StructMemberDeclaration
      | NodeKind::Other(_) => None,
    }
  }

  /// Documentation of an identifier.
  ///
  /// The closest enclosing node that is not an identifier is asked first; then every identifier from the outermost
  /// down to `node` is tried as a reference to a type name.
  fn identifier(&self, node: NodeId) -> Option<String> {
    let lookup = resolve::lookup(self.tree, node);

    if let Some(doc) = lookup.context.and_then(|context| self.generate(context, None)) {
      return Some(doc);
    }

    lookup
      .identifiers
      .iter()
      .find_map(|&ident| self.type_reference(ident))
  }

  fn type_reference(&self, ident: NodeId) -> Option<String> {
    let (_, def) = resolve::type_reference(self.tree, ident)?;
    let name = match self.tree.kind(ident)? {
      NodeKind::Identifier(ident) => ident.name(),
      _ => return None,
    };

    self.named(ident, def.name(), name)
  }

  fn declarator(&self, node: NodeId) -> Option<String> {
    let decl = self.tree.declaration(node)?;

    match decl.kind() {
      DeclarationKind::Function(fun) => self.function_declaration(decl.node(), fun),
      DeclarationKind::Struct(def) => self.structure(decl.node(), def),

      DeclarationKind::Variable(declarator)
      | DeclarationKind::Parameter(declarator)
      | DeclarationKind::StructMember(declarator) => markup::variable_to_str(
        self.tree.source_of(Some(node)),
        declarator.qualified_type(),
        declarator.name(),
      )
      .ok(),
    }
  }

  fn structure(&self, node: NodeId, def: &StructDefinition) -> Option<String> {
    markup::struct_to_str(self.tree.source_of(Some(node)), def.name()).ok()
  }

  /// Parameter names are dropped if they do not line up with the parameters of the function type, which only a
  /// tree assembled by hand can cause.
  fn function_declaration(&self, node: NodeId, decl: &FunctionDeclaration) -> Option<String> {
    let ty = decl.function_type();
    let names = self.tree.parameter_names(node);

    if names.len() == ty.parameter_types().len() {
      self.function(ty, Some(&names[..]))
    } else {
      debug!("parameter declarations of {:?} do not match its type", node);
      self.function(ty, None)
    }
  }

  /// Documentation of the constructor called by `call`; [`None`] unless a structure is constructed.
  fn constructor_call(&self, call: NodeId) -> Option<String> {
    let structure = match self.tree.kind(call)? {
      NodeKind::FunctionCall(call) => call.ty()?.as_struct()?,
      _ => return None,
    };
    let names: Vec<_> = structure.member_names().map(Some).collect();

    self.function(&structure.constructor(), Some(&names[..]))
  }

  fn function(&self, sig: &impl Signature, names: Option<&[Option<&str>]>) -> Option<String> {
    markup::function_to_str(self.tree.source_of(sig.definition()), sig, names).ok()
  }

  fn named(&self, node: NodeId, ty: impl std::fmt::Display, name: &str) -> Option<String> {
    markup::named_to_str(self.tree.source_of(Some(node)), ty, name).ok()
  }
}
