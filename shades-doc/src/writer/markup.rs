//! Markup writers.
//!
//! Documentation is written in a tiny markup subset understood by documentation popups: `<b>`, `<u>`, `<br>` and
//! `<code>`. Every entry starts with a header naming the source unit the entity is defined in, or `internal` for
//! built-ins.

use crate::types::{QualifiedType, Signature, Type};
use std::fmt;

/// Write the header of an entry.
///
/// `source` is the name of the source unit defining the entity; [`None`] for built-ins.
pub fn write_header(f: &mut impl fmt::Write, source: Option<&str>) -> fmt::Result {
  match source {
    Some(source) => write!(f, "<b><u>{}</u></b><br><br>", source),
    None => f.write_str("<u>internal</u><br><br>"),
  }
}

/// Write the documentation of a function-shaped entity.
///
/// `names`, if present, holds the name of each parameter in order; a [`None`] slot (or no `names` at all) renders
/// the parameter as its type only. `source` is the source unit defining the signature, if any.
pub fn write_function(
  f: &mut impl fmt::Write,
  source: Option<&str>,
  sig: &impl Signature,
  names: Option<&[Option<&str>]>,
) -> fmt::Result {
  let params = sig.parameter_types();

  if let Some(names) = names {
    debug_assert_eq!(
      names.len(),
      params.len(),
      "parameter names of {} do not match its arity",
      sig.name()
    );
  }

  write_header(f, source)?;
  write!(f, "<code>{} <b>{}</b>(", sig.return_type(), sig.name())?;

  for (i, ty) in params.iter().enumerate() {
    if i > 0 {
      f.write_str(", ")?;
    }

    let name = names.and_then(|names| names.get(i).copied().flatten());
    write_parameter(f, ty, name)?;
  }

  f.write_str(")</code>")
}

fn write_parameter(f: &mut impl fmt::Write, ty: &Type, name: Option<&str>) -> fmt::Result {
  match name {
    Some(name) => write!(f, "{} <b>{}</b>", ty, name),
    None => write!(f, "{}", ty),
  }
}

/// Write a `type name` entry, the shape shared by structures, variables and fields.
pub fn write_named(
  f: &mut impl fmt::Write,
  source: Option<&str>,
  ty: impl fmt::Display,
  name: &str,
) -> fmt::Result {
  write_header(f, source)?;
  write!(f, "<code>{} <b>{}</b></code>", ty, name)
}

/// Write the documentation of a structure.
pub fn write_struct(f: &mut impl fmt::Write, source: Option<&str>, name: &str) -> fmt::Result {
  write_named(f, source, "struct", name)
}

/// Write the documentation of a variable, parameter or struct member.
///
/// Qualifiers come first, in declaration order, and qualifiers without a token are skipped.
pub fn write_variable(
  f: &mut impl fmt::Write,
  source: Option<&str>,
  ty: &QualifiedType,
  name: &str,
) -> fmt::Result {
  write_named(f, source, ty, name)
}

pub fn function_to_str(
  source: Option<&str>,
  sig: &impl Signature,
  names: Option<&[Option<&str>]>,
) -> Result<String, fmt::Error> {
  let mut output = String::new();
  write_function(&mut output, source, sig, names)?;
  Ok(output)
}

pub fn named_to_str(source: Option<&str>, ty: impl fmt::Display, name: &str) -> Result<String, fmt::Error> {
  let mut output = String::new();
  write_named(&mut output, source, ty, name)?;
  Ok(output)
}

pub fn struct_to_str(source: Option<&str>, name: &str) -> Result<String, fmt::Error> {
  let mut output = String::new();
  write_struct(&mut output, source, name)?;
  Ok(output)
}

pub fn variable_to_str(source: Option<&str>, ty: &QualifiedType, name: &str) -> Result<String, fmt::Error> {
  let mut output = String::new();
  write_variable(&mut output, source, ty, name)?;
  Ok(output)
}
