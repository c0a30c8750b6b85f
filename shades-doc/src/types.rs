//! Shading language types.
//!
//! Types are derived from declarations by semantic analysis. They never own the declaration they come from: a
//! [`StructType`], [`FunctionType`] or [`ConstructorType`] only remembers the [`NodeId`] of its definition, and
//! that handle is absent for built-in entities.

use crate::{qualifier::Qualifier, swizzle::Swizzle, syntax::NodeId};
use std::{fmt, str::FromStr};

/// Dimension of a primitive type.
///
/// - [`Dim::Scalar`]: designates a scalar value.
/// - [`Dim::D2`]: designates a 2D vector.
/// - [`Dim::D3`]: designates a 3D vector.
/// - [`Dim::D4`]: designates a 4D vector.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Dim {
  /// Scalar value.
  Scalar,

  /// 2D vector.
  D2,

  /// 3D vector.
  D3,

  /// 4D vector.
  D4,
}

impl Dim {
  /// Number of components.
  pub fn len(self) -> usize {
    match self {
      Dim::Scalar => 1,
      Dim::D2 => 2,
      Dim::D3 => 3,
      Dim::D4 => 4,
    }
  }

  /// Dimension holding `n` components, if any.
  pub fn from_len(n: usize) -> Option<Self> {
    match n {
      1 => Some(Dim::Scalar),
      2 => Some(Dim::D2),
      3 => Some(Dim::D3),
      4 => Some(Dim::D4),
      _ => None,
    }
  }
}

/// Matrix dimension, as columns×rows.
///
/// > Note: matrices are expressed in column-major.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MatrixDim {
  /// Squared 2 dimension.
  D22,
  /// 2×3 dimension.
  D23,
  /// 2×4 dimension.
  D24,
  /// 3×2 dimension.
  D32,
  /// Squared 3 dimension.
  D33,
  /// 3×4 dimension.
  D34,
  /// 4×2 dimension.
  D42,
  /// 4×3 dimension.
  D43,
  /// Squared 4 dimension.
  D44,
}

/// Dimension of a sampler.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SamplerDim {
  D1,
  D2,
  D3,
  Cube,
}

/// Basic types: everything built in the language that is not a function.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BasicType {
  /// `void`, only valid as a return type.
  Void,

  /// A boolean type.
  ///
  /// The [`Dim`] argument represents the vector dimension, not an array dimension.
  Bool(Dim),

  /// An integral type.
  Int(Dim),

  /// An unsigned integral type.
  UInt(Dim),

  /// A single precision floating type.
  Float(Dim),

  /// A double precision floating type.
  Double(Dim),

  /// A N×M single precision matrix.
  Matrix(MatrixDim),

  /// A N×M double precision matrix.
  DMatrix(MatrixDim),

  /// A floating sampler.
  Sampler(SamplerDim),
}

impl BasicType {
  /// Every basic type, in no particular order.
  pub const ALL: [BasicType; 43] = [
    BasicType::Void,
    BasicType::Bool(Dim::Scalar),
    BasicType::Bool(Dim::D2),
    BasicType::Bool(Dim::D3),
    BasicType::Bool(Dim::D4),
    BasicType::Int(Dim::Scalar),
    BasicType::Int(Dim::D2),
    BasicType::Int(Dim::D3),
    BasicType::Int(Dim::D4),
    BasicType::UInt(Dim::Scalar),
    BasicType::UInt(Dim::D2),
    BasicType::UInt(Dim::D3),
    BasicType::UInt(Dim::D4),
    BasicType::Float(Dim::Scalar),
    BasicType::Float(Dim::D2),
    BasicType::Float(Dim::D3),
    BasicType::Float(Dim::D4),
    BasicType::Double(Dim::Scalar),
    BasicType::Double(Dim::D2),
    BasicType::Double(Dim::D3),
    BasicType::Double(Dim::D4),
    BasicType::Matrix(MatrixDim::D22),
    BasicType::Matrix(MatrixDim::D23),
    BasicType::Matrix(MatrixDim::D24),
    BasicType::Matrix(MatrixDim::D32),
    BasicType::Matrix(MatrixDim::D33),
    BasicType::Matrix(MatrixDim::D34),
    BasicType::Matrix(MatrixDim::D42),
    BasicType::Matrix(MatrixDim::D43),
    BasicType::Matrix(MatrixDim::D44),
    BasicType::DMatrix(MatrixDim::D22),
    BasicType::DMatrix(MatrixDim::D23),
    BasicType::DMatrix(MatrixDim::D24),
    BasicType::DMatrix(MatrixDim::D32),
    BasicType::DMatrix(MatrixDim::D33),
    BasicType::DMatrix(MatrixDim::D34),
    BasicType::DMatrix(MatrixDim::D42),
    BasicType::DMatrix(MatrixDim::D43),
    BasicType::DMatrix(MatrixDim::D44),
    BasicType::Sampler(SamplerDim::D1),
    BasicType::Sampler(SamplerDim::D2),
    BasicType::Sampler(SamplerDim::D3),
    BasicType::Sampler(SamplerDim::Cube),
  ];

  /// Canonical name of the type.
  pub fn name(&self) -> &'static str {
    match self {
      BasicType::Void => "void",

      // booleans
      BasicType::Bool(Dim::Scalar) => "bool",
      BasicType::Bool(Dim::D2) => "bvec2",
      BasicType::Bool(Dim::D3) => "bvec3",
      BasicType::Bool(Dim::D4) => "bvec4",

      // ints
      BasicType::Int(Dim::Scalar) => "int",
      BasicType::Int(Dim::D2) => "ivec2",
      BasicType::Int(Dim::D3) => "ivec3",
      BasicType::Int(Dim::D4) => "ivec4",

      // uints
      BasicType::UInt(Dim::Scalar) => "uint",
      BasicType::UInt(Dim::D2) => "uvec2",
      BasicType::UInt(Dim::D3) => "uvec3",
      BasicType::UInt(Dim::D4) => "uvec4",

      // floats
      BasicType::Float(Dim::Scalar) => "float",
      BasicType::Float(Dim::D2) => "vec2",
      BasicType::Float(Dim::D3) => "vec3",
      BasicType::Float(Dim::D4) => "vec4",

      // doubles
      BasicType::Double(Dim::Scalar) => "double",
      BasicType::Double(Dim::D2) => "dvec2",
      BasicType::Double(Dim::D3) => "dvec3",
      BasicType::Double(Dim::D4) => "dvec4",

      // matrices
      BasicType::Matrix(MatrixDim::D22) => "mat2",
      BasicType::Matrix(MatrixDim::D23) => "mat2x3",
      BasicType::Matrix(MatrixDim::D24) => "mat2x4",
      BasicType::Matrix(MatrixDim::D32) => "mat3x2",
      BasicType::Matrix(MatrixDim::D33) => "mat3",
      BasicType::Matrix(MatrixDim::D34) => "mat3x4",
      BasicType::Matrix(MatrixDim::D42) => "mat4x2",
      BasicType::Matrix(MatrixDim::D43) => "mat4x3",
      BasicType::Matrix(MatrixDim::D44) => "mat4",

      BasicType::DMatrix(MatrixDim::D22) => "dmat2",
      BasicType::DMatrix(MatrixDim::D23) => "dmat2x3",
      BasicType::DMatrix(MatrixDim::D24) => "dmat2x4",
      BasicType::DMatrix(MatrixDim::D32) => "dmat3x2",
      BasicType::DMatrix(MatrixDim::D33) => "dmat3",
      BasicType::DMatrix(MatrixDim::D34) => "dmat3x4",
      BasicType::DMatrix(MatrixDim::D42) => "dmat4x2",
      BasicType::DMatrix(MatrixDim::D43) => "dmat4x3",
      BasicType::DMatrix(MatrixDim::D44) => "dmat4",

      // samplers
      BasicType::Sampler(SamplerDim::D1) => "sampler1D",
      BasicType::Sampler(SamplerDim::D2) => "sampler2D",
      BasicType::Sampler(SamplerDim::D3) => "sampler3D",
      BasicType::Sampler(SamplerDim::Cube) => "samplerCube",
    }
  }

  /// Vector dimension of scalar and vector types; [`None`] for anything else.
  pub fn dim(&self) -> Option<Dim> {
    match *self {
      BasicType::Bool(dim)
      | BasicType::Int(dim)
      | BasicType::UInt(dim)
      | BasicType::Float(dim)
      | BasicType::Double(dim) => Some(dim),
      _ => None,
    }
  }

  /// Same component type with another vector dimension.
  pub fn with_dim(&self, dim: Dim) -> Option<Self> {
    match self {
      BasicType::Bool(_) => Some(BasicType::Bool(dim)),
      BasicType::Int(_) => Some(BasicType::Int(dim)),
      BasicType::UInt(_) => Some(BasicType::UInt(dim)),
      BasicType::Float(_) => Some(BasicType::Float(dim)),
      BasicType::Double(_) => Some(BasicType::Double(dim)),
      _ => None,
    }
  }

  /// Type of swizzling a value of this type.
  ///
  /// Every selected channel must exist in the source vector, so that `v.z` is invalid on a `vec2`.
  pub fn swizzle(&self, sw: &Swizzle) -> Option<Self> {
    let dim = self.dim()?;

    if sw.max_index() >= dim.len() {
      return None;
    }

    self.with_dim(sw.dim())
  }
}

impl fmt::Display for BasicType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for BasicType {
  type Err = crate::error::TreeError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    BasicType::ALL
      .iter()
      .copied()
      .find(|ty| ty.name() == s)
      .ok_or_else(|| crate::error::TreeError::UnknownType(s.to_owned()))
  }
}

/// A member of a structure.
#[derive(Clone, Debug, PartialEq)]
pub struct StructMember {
  pub(crate) name: String,
  pub(crate) ty: Type,
}

impl StructMember {
  pub fn new(name: impl Into<String>, ty: impl Into<Type>) -> Self {
    Self {
      name: name.into(),
      ty: ty.into(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn ty(&self) -> &Type {
    &self.ty
  }
}

/// User-defined structure type.
#[derive(Clone, Debug, PartialEq)]
pub struct StructType {
  pub(crate) name: String,
  pub(crate) members: Vec<StructMember>,
  pub(crate) definition: Option<NodeId>,
}

impl StructType {
  pub fn new(name: impl Into<String>, members: Vec<StructMember>) -> Self {
    Self {
      name: name.into(),
      members,
      definition: None,
    }
  }

  /// Attach the node that defines this structure.
  pub fn with_definition(mut self, definition: NodeId) -> Self {
    self.definition = Some(definition);
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn members(&self) -> &[StructMember] {
    &self.members
  }

  /// Member names, in declaration order.
  pub fn member_names(&self) -> impl Iterator<Item = &str> {
    self.members.iter().map(StructMember::name)
  }

  /// Look up the type of a member by name.
  pub fn member(&self, name: &str) -> Option<&Type> {
    self
      .members
      .iter()
      .find(|member| member.name == name)
      .map(StructMember::ty)
  }

  pub fn definition(&self) -> Option<NodeId> {
    self.definition
  }

  /// Synthesized constructor, taking one argument per member in member order.
  pub fn constructor(&self) -> ConstructorType {
    ConstructorType {
      name: self.name.clone(),
      ret: Box::new(Type::Struct(self.clone())),
      params: self.members.iter().map(|member| member.ty.clone()).collect(),
      definition: self.definition,
    }
  }
}

/// Function-shaped entities.
///
/// Implemented by [`FunctionType`] and [`ConstructorType`], so that both can be documented the same way.
pub trait Signature {
  /// Name of the function (or of the constructed type).
  fn name(&self) -> &str;

  fn return_type(&self) -> &Type;

  /// Parameter types, in order.
  fn parameter_types(&self) -> &[Type];

  /// Node defining the function; absent for built-ins.
  fn definition(&self) -> Option<NodeId>;
}

/// Function type.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionType {
  pub(crate) name: String,
  pub(crate) ret: Box<Type>,
  pub(crate) params: Vec<Type>,
  pub(crate) definition: Option<NodeId>,
}

impl FunctionType {
  /// A function type without definition, such as a built-in function.
  pub fn new(name: impl Into<String>, ret: impl Into<Type>, params: Vec<Type>) -> Self {
    Self {
      name: name.into(),
      ret: Box::new(ret.into()),
      params,
      definition: None,
    }
  }

  /// Attach the node that defines this function.
  pub fn with_definition(mut self, definition: NodeId) -> Self {
    self.definition = Some(definition);
    self
  }
}

impl Signature for FunctionType {
  fn name(&self) -> &str {
    &self.name
  }

  fn return_type(&self) -> &Type {
    &self.ret
  }

  fn parameter_types(&self) -> &[Type] {
    &self.params
  }

  fn definition(&self) -> Option<NodeId> {
    self.definition
  }
}

/// Constructor type.
///
/// Same shape as [`FunctionType`]; its name is the name of the constructed type.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstructorType {
  pub(crate) name: String,
  pub(crate) ret: Box<Type>,
  pub(crate) params: Vec<Type>,
  pub(crate) definition: Option<NodeId>,
}

impl ConstructorType {
  /// Constructor of a basic type, such as `vec3(float, float, float)`.
  pub fn basic(ty: BasicType, params: Vec<Type>) -> Self {
    Self {
      name: ty.name().to_owned(),
      ret: Box::new(Type::Basic(ty)),
      params,
      definition: None,
    }
  }
}

impl Signature for ConstructorType {
  fn name(&self) -> &str {
    &self.name
  }

  fn return_type(&self) -> &Type {
    &self.ret
  }

  fn parameter_types(&self) -> &[Type] {
    &self.params
  }

  fn definition(&self) -> Option<NodeId> {
    self.definition
  }
}

/// A type decorated with qualifiers, as found on variables and parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct QualifiedType {
  pub(crate) ty: Box<Type>,
  pub(crate) qualifiers: Vec<Qualifier>,
}

impl QualifiedType {
  pub fn new(ty: impl Into<Type>, qualifiers: Vec<Qualifier>) -> Self {
    Self {
      ty: Box::new(ty.into()),
      qualifiers,
    }
  }

  /// A type without any qualifier.
  pub fn unqualified(ty: impl Into<Type>) -> Self {
    Self::new(ty, Vec::new())
  }

  pub fn ty(&self) -> &Type {
    &self.ty
  }

  pub fn qualifiers(&self) -> &[Qualifier] {
    &self.qualifiers
  }
}

impl fmt::Display for QualifiedType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write_qualified(f, self)
  }
}

/// Array type.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayType {
  pub(crate) element: Box<Type>,
  pub(crate) size: Option<usize>,
}

impl ArrayType {
  /// `size` is absent for unsized arrays (`float[]`).
  pub fn new(element: impl Into<Type>, size: Option<usize>) -> Self {
    Self {
      element: Box::new(element.into()),
      size,
    }
  }

  pub fn element(&self) -> &Type {
    &self.element
  }

  pub fn size(&self) -> Option<usize> {
    self.size
  }
}

/// Type representation.
#[derive(Clone, Debug, PartialEq)]
pub enum Type {
  Basic(BasicType),
  Struct(StructType),
  Function(FunctionType),
  Constructor(ConstructorType),
  Qualified(QualifiedType),
  Array(ArrayType),
}

impl Type {
  /// Canonical display name, as written in source code.
  pub fn display_name(&self) -> String {
    self.to_string()
  }

  /// Strip every qualifier layer.
  pub fn unqualified(&self) -> &Type {
    let mut ty = self;

    while let Type::Qualified(qualified) = ty {
      ty = &qualified.ty;
    }

    ty
  }

  pub fn as_struct(&self) -> Option<&StructType> {
    match self.unqualified() {
      Type::Struct(structure) => Some(structure),
      _ => None,
    }
  }
}

impl From<BasicType> for Type {
  fn from(ty: BasicType) -> Self {
    Type::Basic(ty)
  }
}

impl From<StructType> for Type {
  fn from(ty: StructType) -> Self {
    Type::Struct(ty)
  }
}

impl From<FunctionType> for Type {
  fn from(ty: FunctionType) -> Self {
    Type::Function(ty)
  }
}

impl From<ConstructorType> for Type {
  fn from(ty: ConstructorType) -> Self {
    Type::Constructor(ty)
  }
}

impl From<QualifiedType> for Type {
  fn from(ty: QualifiedType) -> Self {
    Type::Qualified(ty)
  }
}

impl From<ArrayType> for Type {
  fn from(ty: ArrayType) -> Self {
    Type::Array(ty)
  }
}

impl fmt::Display for Type {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Type::Basic(ty) => f.write_str(ty.name()),
      Type::Struct(ty) => f.write_str(&ty.name),
      Type::Function(ty) => write_signature(f, ty),
      Type::Constructor(ty) => write_signature(f, ty),
      Type::Qualified(ty) => write_qualified(f, ty),
      Type::Array(ty) => write_array(f, ty),
    }
  }
}

fn write_signature(f: &mut impl fmt::Write, sig: &impl Signature) -> fmt::Result {
  write!(f, "{}(", sig.return_type())?;

  let params = sig.parameter_types();
  if let Some((first, rest)) = params.split_first() {
    write!(f, "{}", first)?;

    for param in rest {
      write!(f, ", {}", param)?;
    }
  }

  f.write_str(")")
}

fn write_qualified(f: &mut impl fmt::Write, ty: &QualifiedType) -> fmt::Result {
  for token in ty.qualifiers.iter().filter_map(Qualifier::token) {
    f.write_str(token)?;
    f.write_str(" ")?;
  }

  write!(f, "{}", ty.ty)
}

fn write_array(f: &mut impl fmt::Write, ty: &ArrayType) -> fmt::Result {
  write!(f, "{}", ty.element)?;

  match ty.size {
    Some(size) => write!(f, "[{}]", size),
    None => f.write_str("[]"),
  }
}

/// Type of selecting `member` on a value of type `object`.
///
/// Structures select their members by name and scalar vectors accept swizzles (`v.xy`, `c.rgb`, …). Qualifiers on
/// `object` are ignored.
pub fn field_type(object: &Type, member: &str) -> Option<Type> {
  match object.unqualified() {
    Type::Struct(structure) => structure.member(member).cloned(),

    Type::Basic(ty) => {
      let sw = Swizzle::parse(member)?;
      ty.swizzle(&sw).map(Type::Basic)
    }

    _ => None,
  }
}
