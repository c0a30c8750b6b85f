//! Shades documentation, hover documentation for GLSL programs.
//!
//! This crate turns a node of an already parsed and analyzed GLSL program into a short, human-readable description of
//! the entity it stands for: the signature of a function, the name of a structure, the qualified type of a variable,
//! the constructor of a structure being called, etc. It is meant to back the documentation popups of editors and
//! language servers.
//!
//! # Syntax trees
//!
//! Parsing and semantic analysis are not part of this crate. Whatever does them hands over a [`SyntaxTree`], built
//! with a [`TreeBuilder`]: an arena of nodes with parent/child links, where identifiers carry their [`Reference`] to
//! the declaration they denote and declarations carry their types. Types only point back to their definitions
//! through [`NodeId`] handles, absent for built-in entities.
//!
//! # Documentation
//!
//! [`generate_documentation`] (or [`Documenter::generate`]) takes a node, and optionally the node under the cursor,
//! and returns a markup string using `<b>`, `<u>`, `<br>` and `<code>` only, or [`None`] if there is nothing to show.
//! Every entry starts with a header naming the source unit the entity is defined in, or `internal` for built-ins.
//!
//! ```
//! use shades_doc::{
//!   generate_documentation, BasicType, Dim, QualifiedType, StructMember, TreeBuilder,
//! };
//!
//! let mut builder = TreeBuilder::new("light.frag");
//! let root = builder.other(None, "translation unit").unwrap();
//! let light = builder
//!   .struct_definition(
//!     Some(root),
//!     "Light",
//!     vec![
//!       StructMember::new("pos", BasicType::Float(Dim::D3)),
//!       StructMember::new("intensity", BasicType::Float(Dim::Scalar)),
//!     ],
//!   )
//!   .unwrap();
//! let call = builder.constructor_call(root, light).unwrap();
//! let tree = builder.build();
//!
//! // the struct itself
//! assert_eq!(
//!   generate_documentation(&tree, light, None).as_deref(),
//!   Some("<b><u>light.frag</u></b><br><br><code>struct <b>Light</b></code>")
//! );
//!
//! // the struct, seen from a call to its constructor
//! let (callee, _) = tree.name_identifier(tree.children(call)[0]).unwrap();
//! assert_eq!(
//!   generate_documentation(&tree, light, Some(callee)).as_deref(),
//!   Some(
//!     "<b><u>light.frag</u></b><br><br><code>Light <b>Light</b>(vec3 <b>pos</b>, float <b>intensity</b>)</code>"
//!   )
//! );
//! ```
//!
//! Tree construction is the only fallible part of the crate; see [`TreeError`].

pub mod decl;
pub mod doc;
pub mod error;
pub mod qualifier;
pub mod resolve;
pub mod swizzle;
pub mod syntax;
pub mod types;
pub mod writer;

pub use crate::{
  decl::{Declaration, DeclarationKind, Declarator, FunctionDeclaration, StructDefinition},
  doc::{generate_documentation, Documenter},
  error::TreeError,
  qualifier::Qualifier,
  swizzle::{Swizzle, SwizzleSelector},
  syntax::{NodeId, NodeKind, Reference, SyntaxTree, TreeBuilder},
  types::{
    ArrayType, BasicType, ConstructorType, Dim, FunctionType, MatrixDim, QualifiedType, SamplerDim, Signature,
    StructMember, StructType, Type,
  },
};
