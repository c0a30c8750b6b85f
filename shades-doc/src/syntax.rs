//! Syntax trees, as handed over by the parser and semantic analysis.
//!
//! A [`SyntaxTree`] is an arena of [`Node`]s addressed by [`NodeId`]. Every node knows its parent and children and
//! carries a [`NodeKind`], which holds whatever semantic analysis attached to it: references from identifiers to
//! declarations, declarations themselves and the types of expressions.
//!
//! Trees are immutable once built. Use [`TreeBuilder`] to create one; it checks that the links it records make sense
//! (a type name refers to a struct definition, a declarator is owned by a declaration, etc.).

use crate::{
  decl::{Declaration, DeclarationKind, Declarator, FunctionDeclaration, StructDefinition},
  error::TreeError,
  types::{self, BasicType, FunctionType, QualifiedType, Signature as _, StructMember, StructType, Type},
};
use log::trace;
use std::collections::HashSet;

/// Opaque handle on a node of a [`SyntaxTree`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(u32);

impl NodeId {
  /// Position of the node in its tree.
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

/// Semantic reference from a using site to the declaration it denotes.
///
/// The target is absent when the reference could not be resolved.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Reference {
  /// Reference to a type name; the target is a struct definition.
  TypeName(Option<NodeId>),

  /// Reference to a variable or parameter; the target is a declarator.
  Variable(Option<NodeId>),

  /// Reference to a function; the target is a function declaration.
  Function(Option<NodeId>),
}

impl Reference {
  pub fn target(self) -> Option<NodeId> {
    match self {
      Reference::TypeName(target) | Reference::Variable(target) | Reference::Function(target) => target,
    }
  }
}

/// An identifier, either naming a declaration or using one.
#[derive(Clone, Debug, PartialEq)]
pub struct Identifier {
  pub(crate) name: String,
  pub(crate) reference: Option<Reference>,
}

impl Identifier {
  pub fn name(&self) -> &str {
    &self.name
  }

  /// The identifier’s own reference, if it has one.
  pub fn reference(&self) -> Option<Reference> {
    self.reference
  }
}

/// A type name used in a type specifier or as the callee of a constructor call.
#[derive(Clone, Debug, PartialEq)]
pub struct Typename {
  pub(crate) name: String,
  pub(crate) definition: Option<NodeId>,
}

impl Typename {
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Struct definition the type name refers to; absent for built-in types.
  pub fn definition(&self) -> Option<NodeId> {
    self.definition
  }
}

/// Function call expression, constructor calls included.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionCall {
  pub(crate) constructor: bool,
  pub(crate) ty: Option<Type>,
  pub(crate) callee: Option<FunctionType>,
}

impl FunctionCall {
  /// Whether the callee is a type name.
  pub fn is_constructor(&self) -> bool {
    self.constructor
  }

  /// Type of the call expression, if known.
  pub fn ty(&self) -> Option<&Type> {
    self.ty.as_ref()
  }

  /// Resolved callee; absent for constructors and unresolved overloads.
  pub fn callee(&self) -> Option<&FunctionType> {
    self.callee.as_ref()
  }
}

/// Field selection expression, such as `light.pos` or `color.rgb`.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSelection {
  pub(crate) ty: Option<Type>,
  pub(crate) member: Option<NodeId>,
}

impl FieldSelection {
  pub fn ty(&self) -> Option<&Type> {
    self.ty.as_ref()
  }

  /// Identifier of the selected member, as opposed to the identifiers of the object operand.
  pub fn member(&self) -> Option<NodeId> {
    self.member
  }
}

/// Kind of a node, with the semantic information attached to it.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
  Identifier(Identifier),
  Typename(Typename),
  StructDefinition(StructDefinition),
  FunctionDeclaration(FunctionDeclaration),
  /// Declaration of variables, owning one declarator per declared name.
  VariableDeclaration,
  /// Declaration of a function parameter, owning its declarator if the parameter is named.
  ParameterDeclaration,
  /// Declaration of struct members, owning one declarator per member.
  StructMemberDeclaration,
  Declarator(Declarator),
  FunctionCall(FunctionCall),
  FieldSelection(FieldSelection),
  /// Any node that the documentation does not care about (statements, operators, …).
  Other(String),
}

impl NodeKind {
  fn owns_declarators(&self) -> bool {
    match self {
      NodeKind::VariableDeclaration
      | NodeKind::ParameterDeclaration
      | NodeKind::StructMemberDeclaration
      | NodeKind::FunctionDeclaration(_)
      | NodeKind::StructDefinition(_) => true,
      _ => false,
    }
  }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
  pub(crate) parent: Option<NodeId>,
  pub(crate) children: Vec<NodeId>,
  pub(crate) kind: NodeKind,
}

impl Node {
  pub fn parent(&self) -> Option<NodeId> {
    self.parent
  }

  pub fn children(&self) -> &[NodeId] {
    &self.children
  }

  pub fn kind(&self) -> &NodeKind {
    &self.kind
  }
}

/// A parsed and analyzed source unit.
#[derive(Clone, Debug, PartialEq)]
pub struct SyntaxTree {
  source_name: String,
  nodes: Vec<Node>,
}

impl SyntaxTree {
  /// Name of the source unit (usually a file name) the tree was parsed from.
  pub fn source_name(&self) -> &str {
    &self.source_name
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Every node of the tree, in insertion order.
  pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
    (0..self.nodes.len() as u32).map(NodeId)
  }

  pub fn node(&self, id: NodeId) -> Option<&Node> {
    self.nodes.get(id.index())
  }

  pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
    self.node(id).map(Node::kind)
  }

  pub fn parent(&self, id: NodeId) -> Option<NodeId> {
    self.node(id).and_then(Node::parent)
  }

  pub fn children(&self, id: NodeId) -> &[NodeId] {
    self.node(id).map(Node::children).unwrap_or(&[])
  }

  /// Strict ancestors of a node, from its parent up to the root.
  ///
  /// The walk never visits more nodes than the tree holds, even if parent links happen to form a cycle.
  pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
    Ancestors {
      tree: self,
      next: self.parent(id),
      remaining: self.nodes.len(),
    }
  }

  /// Closest function call expression strictly enclosing a node.
  pub fn enclosing_call(&self, id: NodeId) -> Option<NodeId> {
    self
      .ancestors(id)
      .find(|&ancestor| matches!(self.kind(ancestor), Some(NodeKind::FunctionCall(_))))
  }

  /// Name of the source unit containing a node; [`None`] if there is no such node.
  ///
  /// Used to tell user-defined entities (which have a definition node) from built-ins.
  pub fn source_of(&self, id: Option<NodeId>) -> Option<&str> {
    id.and_then(|id| self.node(id)).map(|_| self.source_name())
  }

  /// First identifier child of a node: the name of a declaration, the member of a field selection, etc.
  pub fn name_identifier(&self, id: NodeId) -> Option<(NodeId, &Identifier)> {
    self
      .children(id)
      .iter()
      .find_map(|&child| match self.kind(child) {
        Some(NodeKind::Identifier(ident)) => Some((child, ident)),
        _ => None,
      })
  }

  /// Reference carried by a node.
  ///
  /// Identifiers carry their own reference, if any; type names always refer to a (possibly absent) struct
  /// definition.
  pub fn reference(&self, id: NodeId) -> Option<Reference> {
    match self.kind(id)? {
      NodeKind::Identifier(ident) => ident.reference,
      NodeKind::Typename(typename) => Some(Reference::TypeName(typename.definition)),
      _ => None,
    }
  }

  /// Struct definition held by a node.
  pub fn struct_definition(&self, id: NodeId) -> Option<&StructDefinition> {
    match self.kind(id)? {
      NodeKind::StructDefinition(def) => Some(def),
      _ => None,
    }
  }

  /// Declaration introduced by a node.
  ///
  /// Declarators report the declaration owning them: a variable, a parameter or a struct member for the usual
  /// declarations, or the function or structure itself when directly owned by one.
  pub fn declaration(&self, id: NodeId) -> Option<Declaration<'_>> {
    let kind = match self.kind(id)? {
      NodeKind::FunctionDeclaration(decl) => DeclarationKind::Function(decl),
      NodeKind::StructDefinition(def) => DeclarationKind::Struct(def),

      NodeKind::Declarator(declarator) => {
        let owner = self.parent(id)?;

        match self.kind(owner)? {
          NodeKind::VariableDeclaration => DeclarationKind::Variable(declarator),
          NodeKind::ParameterDeclaration => DeclarationKind::Parameter(declarator),
          NodeKind::StructMemberDeclaration => DeclarationKind::StructMember(declarator),
          NodeKind::FunctionDeclaration(_) | NodeKind::StructDefinition(_) => return self.declaration(owner),
          _ => return None,
        }
      }

      _ => return None,
    };

    Some(Declaration { node: id, kind })
  }

  /// Parameter names of a function declaration, in order; unnamed parameters yield [`None`].
  pub fn parameter_names(&self, function: NodeId) -> Vec<Option<&str>> {
    self
      .children(function)
      .iter()
      .filter(|&&child| matches!(self.kind(child), Some(NodeKind::ParameterDeclaration)))
      .map(|&param| {
        self.children(param).iter().find_map(|&child| match self.kind(child) {
          Some(NodeKind::Declarator(declarator)) => Some(declarator.name()),
          _ => None,
        })
      })
      .collect()
  }
}

/// Iterator over the ancestors of a node. See [`SyntaxTree::ancestors`].
#[derive(Debug)]
pub struct Ancestors<'t> {
  tree: &'t SyntaxTree,
  next: Option<NodeId>,
  remaining: usize,
}

impl<'t> Iterator for Ancestors<'t> {
  type Item = NodeId;

  fn next(&mut self) -> Option<Self::Item> {
    if self.remaining == 0 {
      return None;
    }

    let id = self.next?;
    self.remaining -= 1;
    self.next = self.tree.parent(id);

    Some(id)
  }
}

/// Checked construction of [`SyntaxTree`]s.
///
/// Semantic analysis records each node along with what it knows about it. Declarations create their name
/// identifiers and declarators on their own, so that the resulting tree has the shape a parser would give.
///
/// # Examples
///
/// ```
/// use shades_doc::{
///   generate_documentation, BasicType, Dim, QualifiedType, Qualifier, TreeBuilder,
/// };
///
/// let mut builder = TreeBuilder::new("shader.vert");
/// let root = builder.other(None, "translation unit").unwrap();
/// let ty = QualifiedType::new(BasicType::Float(Dim::D3), vec![Qualifier::In]);
/// let x = builder.variable_declaration(root, ty, &["x"]).unwrap()[0];
/// let tree = builder.build();
///
/// assert_eq!(
///   generate_documentation(&tree, x, None).as_deref(),
///   Some("<b><u>shader.vert</u></b><br><br><code>in vec3 <b>x</b></code>")
/// );
/// ```
#[derive(Debug)]
pub struct TreeBuilder {
  tree: SyntaxTree,
}

impl TreeBuilder {
  pub fn new(source_name: impl Into<String>) -> Self {
    Self {
      tree: SyntaxTree {
        source_name: source_name.into(),
        nodes: Vec::new(),
      },
    }
  }

  /// Finish building.
  pub fn build(self) -> SyntaxTree {
    self.tree
  }

  /// Read access to the tree being built.
  pub fn tree(&self) -> &SyntaxTree {
    &self.tree
  }

  fn next_id(&self) -> NodeId {
    NodeId(self.tree.nodes.len() as u32)
  }

  fn kind(&self, id: NodeId) -> Result<&NodeKind, TreeError> {
    self.tree.kind(id).ok_or(TreeError::UnknownNode(id))
  }

  fn struct_type(&self, id: NodeId) -> Result<&StructType, TreeError> {
    match self.kind(id)? {
      NodeKind::StructDefinition(def) => Ok(def.struct_type()),
      _ => Err(TreeError::NotAStruct(id)),
    }
  }

  /// Insert a node as last child of `parent`.
  ///
  /// This is the low-level interface; it only checks that the parent exists.
  pub fn push(&mut self, parent: Option<NodeId>, kind: NodeKind) -> Result<NodeId, TreeError> {
    if let Some(parent) = parent {
      self.kind(parent)?;
    }

    let id = self.next_id();
    trace!("node {:?} (parent {:?}): {:?}", id, parent, kind);

    self.tree.nodes.push(Node {
      parent,
      children: Vec::new(),
      kind,
    });

    if let Some(parent) = parent {
      self.tree.nodes[parent.index()].children.push(id);
    }

    Ok(id)
  }

  /// Insert a node the documentation does not care about, such as a statement or the root of the tree.
  pub fn other(&mut self, parent: Option<NodeId>, label: impl Into<String>) -> Result<NodeId, TreeError> {
    self.push(parent, NodeKind::Other(label.into()))
  }

  /// Insert an identifier.
  ///
  /// Identifiers naming a declaration have no reference. The target of the reference, if resolved, must exist; the
  /// target of a [`Reference::TypeName`] must be a struct definition.
  pub fn identifier(
    &mut self,
    parent: NodeId,
    name: impl Into<String>,
    reference: Option<Reference>,
  ) -> Result<NodeId, TreeError> {
    match reference {
      Some(Reference::TypeName(Some(target))) => {
        self.struct_type(target)?;
      }

      Some(reference) => {
        if let Some(target) = reference.target() {
          self.kind(target)?;
        }
      }

      None => (),
    }

    self.push(
      Some(parent),
      NodeKind::Identifier(Identifier {
        name: name.into(),
        reference,
      }),
    )
  }

  /// Insert a type name, along with the identifier spelling it.
  ///
  /// `definition` is the struct definition the name refers to, absent for built-in types.
  pub fn typename(
    &mut self,
    parent: NodeId,
    name: impl Into<String>,
    definition: Option<NodeId>,
  ) -> Result<NodeId, TreeError> {
    if let Some(definition) = definition {
      self.struct_type(definition)?;
    }

    let name = name.into();
    let typename = self.push(
      Some(parent),
      NodeKind::Typename(Typename {
        name: name.clone(),
        definition,
      }),
    )?;
    self.identifier(typename, name, None)?;

    Ok(typename)
  }

  /// Insert a struct definition.
  ///
  /// The name identifier and one member declaration (with its declarator) per member are created as well. The
  /// struct type and its constructor point back at the returned node.
  pub fn struct_definition(
    &mut self,
    parent: Option<NodeId>,
    name: impl Into<String>,
    members: Vec<StructMember>,
  ) -> Result<NodeId, TreeError> {
    let name = name.into();
    check_name(&name)?;

    let mut seen = HashSet::new();
    for member in &members {
      check_name(member.name())?;

      if !seen.insert(member.name()) {
        return Err(TreeError::DuplicateMember {
          structure: name,
          member: member.name().to_owned(),
        });
      }
    }

    let id = self.next_id();
    let ty = StructType::new(name.clone(), members.clone()).with_definition(id);
    let def = self.push(parent, NodeKind::StructDefinition(StructDefinition::new(ty)))?;
    self.identifier(def, name, None)?;

    for member in members {
      let member_decl = self.push(Some(def), NodeKind::StructMemberDeclaration)?;
      self.declarator(member_decl, member.name, QualifiedType::unqualified(member.ty))?;
    }

    Ok(def)
  }

  /// Insert a function declaration.
  ///
  /// Parameters are given as an optional name and a qualified type; a parameter declaration is created for each
  /// of them, holding a declarator if the parameter is named. Parameter qualifiers are not part of the function
  /// type.
  pub fn function_declaration(
    &mut self,
    parent: Option<NodeId>,
    name: impl Into<String>,
    ret: impl Into<Type>,
    params: Vec<(Option<&str>, QualifiedType)>,
  ) -> Result<NodeId, TreeError> {
    let name = name.into();
    check_name(&name)?;

    let mut seen = HashSet::new();
    for &(param_name, _) in &params {
      if let Some(param_name) = param_name {
        check_name(param_name)?;

        if !seen.insert(param_name) {
          return Err(TreeError::DuplicateParameter {
            function: name,
            parameter: param_name.to_owned(),
          });
        }
      }
    }

    let id = self.next_id();
    let param_types = params.iter().map(|(_, ty)| ty.ty().clone()).collect();
    let ty = FunctionType::new(name.clone(), ret, param_types).with_definition(id);
    let fun = self.push(parent, NodeKind::FunctionDeclaration(FunctionDeclaration::new(ty)))?;
    self.identifier(fun, name, None)?;

    for (param_name, ty) in params {
      let param = self.push(Some(fun), NodeKind::ParameterDeclaration)?;

      if let Some(param_name) = param_name {
        self.declarator(param, param_name, ty)?;
      }
    }

    Ok(fun)
  }

  /// Insert a variable declaration declaring all of `names` with the same type.
  ///
  /// Returns the declarators, in order. Nothing is inserted if any name is rejected.
  pub fn variable_declaration(
    &mut self,
    parent: NodeId,
    ty: QualifiedType,
    names: &[&str],
  ) -> Result<Vec<NodeId>, TreeError> {
    let mut seen = HashSet::new();
    for &name in names {
      check_name(name)?;

      if !seen.insert(name) {
        return Err(TreeError::DuplicateVariable(name.to_owned()));
      }
    }

    let decl = self.push(Some(parent), NodeKind::VariableDeclaration)?;

    names
      .iter()
      .map(|name| self.declarator(decl, *name, ty.clone()))
      .collect()
  }

  /// Insert a declarator, along with its name identifier, under a declaration.
  pub fn declarator(
    &mut self,
    declaration: NodeId,
    name: impl Into<String>,
    ty: QualifiedType,
  ) -> Result<NodeId, TreeError> {
    if !self.kind(declaration)?.owns_declarators() {
      return Err(TreeError::NotADeclaration(declaration));
    }

    let name = name.into();
    check_name(&name)?;

    let declarator = self.push(
      Some(declaration),
      NodeKind::Declarator(Declarator::new(name.clone(), ty)),
    )?;
    self.identifier(declarator, name, None)?;

    Ok(declarator)
  }

  /// Insert a call to a function, along with the identifier naming the callee.
  ///
  /// `callee` is absent if overload resolution failed; the type of the call is then unknown too.
  pub fn function_call(
    &mut self,
    parent: NodeId,
    name: impl Into<String>,
    callee: Option<FunctionType>,
  ) -> Result<NodeId, TreeError> {
    let ty = callee.as_ref().map(|callee| callee.return_type().clone());
    let definition = callee.as_ref().and_then(|callee| callee.definition());

    let call = self.push(
      Some(parent),
      NodeKind::FunctionCall(FunctionCall {
        constructor: false,
        ty,
        callee,
      }),
    )?;
    self.identifier(call, name, Some(Reference::Function(definition)))?;

    Ok(call)
  }

  /// Insert a call to the constructor of a user-defined structure, along with its callee type name.
  pub fn constructor_call(&mut self, parent: NodeId, structure: NodeId) -> Result<NodeId, TreeError> {
    let ty = self.struct_type(structure)?.clone();
    let name = ty.name().to_owned();

    let call = self.push(
      Some(parent),
      NodeKind::FunctionCall(FunctionCall {
        constructor: true,
        ty: Some(Type::Struct(ty)),
        callee: None,
      }),
    )?;
    self.typename(call, name, Some(structure))?;

    Ok(call)
  }

  /// Insert a call to the constructor of a basic type, such as `vec3(1.)`, along with its callee type name.
  pub fn basic_constructor_call(&mut self, parent: NodeId, ty: BasicType) -> Result<NodeId, TreeError> {
    let call = self.push(
      Some(parent),
      NodeKind::FunctionCall(FunctionCall {
        constructor: true,
        ty: Some(Type::Basic(ty)),
        callee: None,
      }),
    )?;
    self.typename(call, ty.name(), None)?;

    Ok(call)
  }

  /// Insert a field selection on a value of type `object`, along with the identifier of the selected member.
  ///
  /// The type of the expression is the type of the member, or of the swizzle; it is unknown if `member` is
  /// neither.
  pub fn field_selection(
    &mut self,
    parent: NodeId,
    object: &Type,
    member: impl Into<String>,
  ) -> Result<NodeId, TreeError> {
    let member = member.into();
    let ty = types::field_type(object, &member);

    let selection = self.push(
      Some(parent),
      NodeKind::FieldSelection(FieldSelection { ty, member: None }),
    )?;
    let ident = self.identifier(selection, member, None)?;

    if let NodeKind::FieldSelection(ref mut node) = self.tree.nodes[selection.index()].kind {
      node.member = Some(ident);
    }

    Ok(selection)
  }

  /// Insert the object operand of a field selection, as in the `v` of `v.rgb`.
  ///
  /// The operand is placed before the selected member, as it appears in source code.
  pub fn selection_operand(
    &mut self,
    selection: NodeId,
    name: impl Into<String>,
    reference: Option<Reference>,
  ) -> Result<NodeId, TreeError> {
    match self.kind(selection)? {
      NodeKind::FieldSelection(_) => (),
      _ => return Err(TreeError::NotAFieldSelection(selection)),
    }

    let operand = self.identifier(selection, name, reference)?;
    let children = &mut self.tree.nodes[selection.index()].children;
    children.retain(|&child| child != operand);
    children.insert(0, operand);

    Ok(operand)
  }
}

fn check_name(name: &str) -> Result<(), TreeError> {
  if name.is_empty() {
    Err(TreeError::EmptyName)
  } else {
    Ok(())
  }
}
