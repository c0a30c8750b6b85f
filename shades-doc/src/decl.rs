//! Declarations: the named entities a program introduces.
//!
//! Declarations live inside the [`SyntaxTree`](crate::syntax::SyntaxTree) that produced them. [`Declaration`] is a
//! borrowed view pairing a declaration with the node that defines it.

use crate::{
  syntax::NodeId,
  types::{ConstructorType, FunctionType, QualifiedType, StructType},
};

/// Function declaration (or definition).
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDeclaration {
  pub(crate) ty: FunctionType,
}

impl FunctionDeclaration {
  pub(crate) fn new(ty: FunctionType) -> Self {
    Self { ty }
  }

  pub fn name(&self) -> &str {
    &self.ty.name
  }

  pub fn function_type(&self) -> &FunctionType {
    &self.ty
  }
}

/// Struct definition.
#[derive(Clone, Debug, PartialEq)]
pub struct StructDefinition {
  pub(crate) ty: StructType,
}

impl StructDefinition {
  pub(crate) fn new(ty: StructType) -> Self {
    Self { ty }
  }

  pub fn name(&self) -> &str {
    self.ty.name()
  }

  pub fn struct_type(&self) -> &StructType {
    &self.ty
  }

  /// The synthesized constructor of the structure.
  pub fn constructor(&self) -> ConstructorType {
    self.ty.constructor()
  }

  /// Member names, in declaration order.
  pub fn member_names(&self) -> impl Iterator<Item = &str> {
    self.ty.member_names()
  }
}

/// A single declared name with its qualified type, as in the `x` of `in vec3 x, y;`.
///
/// Whether it declares a variable, a parameter or a struct member depends on the declaration owning it, which is
/// its parent in the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Declarator {
  pub(crate) name: String,
  pub(crate) ty: QualifiedType,
}

impl Declarator {
  pub(crate) fn new(name: String, ty: QualifiedType) -> Self {
    Self { name, ty }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn qualified_type(&self) -> &QualifiedType {
    &self.ty
  }
}

/// What a [`Declaration`] declares.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DeclarationKind<'t> {
  Function(&'t FunctionDeclaration),
  Struct(&'t StructDefinition),
  Variable(&'t Declarator),
  Parameter(&'t Declarator),
  StructMember(&'t Declarator),
}

/// A declaration along with its defining node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Declaration<'t> {
  pub(crate) node: NodeId,
  pub(crate) kind: DeclarationKind<'t>,
}

impl<'t> Declaration<'t> {
  /// Node defining the declaration.
  pub fn node(&self) -> NodeId {
    self.node
  }

  pub fn kind(&self) -> DeclarationKind<'t> {
    self.kind
  }

  pub fn name(&self) -> &'t str {
    match self.kind {
      DeclarationKind::Function(decl) => decl.name(),
      DeclarationKind::Struct(def) => def.name(),
      DeclarationKind::Variable(decl)
      | DeclarationKind::Parameter(decl)
      | DeclarationKind::StructMember(decl) => decl.name(),
    }
  }
}
