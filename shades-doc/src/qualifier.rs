//! Type qualifiers.

/// Storage, interpolation, precision and other modifiers attached to a declared type.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Qualifier {
  // storage
  Const,
  In,
  Out,
  InOut,
  Attribute,
  Uniform,
  Varying,
  Buffer,
  Shared,

  // auxiliary storage
  Centroid,
  Sample,
  Patch,

  // interpolation
  Smooth,
  Flat,
  NoPerspective,

  // precision
  HighP,
  MediumP,
  LowP,

  // invariance and precision
  Invariant,
  Precise,

  // memory
  Coherent,
  Volatile,
  Restrict,
  ReadOnly,
  WriteOnly,

  /// `layout(…)` qualifier, carrying its raw content.
  Layout(String),

  /// A qualifier the parser kept but that has no meaning to us.
  Unrecognized(String),
}

impl Qualifier {
  /// Textual token of the qualifier.
  ///
  /// Layout and unrecognized qualifiers have none and are left out of type names.
  pub fn token(&self) -> Option<&'static str> {
    let token = match self {
      Qualifier::Const => "const",
      Qualifier::In => "in",
      Qualifier::Out => "out",
      Qualifier::InOut => "inout",
      Qualifier::Attribute => "attribute",
      Qualifier::Uniform => "uniform",
      Qualifier::Varying => "varying",
      Qualifier::Buffer => "buffer",
      Qualifier::Shared => "shared",
      Qualifier::Centroid => "centroid",
      Qualifier::Sample => "sample",
      Qualifier::Patch => "patch",
      Qualifier::Smooth => "smooth",
      Qualifier::Flat => "flat",
      Qualifier::NoPerspective => "noperspective",
      Qualifier::HighP => "highp",
      Qualifier::MediumP => "mediump",
      Qualifier::LowP => "lowp",
      Qualifier::Invariant => "invariant",
      Qualifier::Precise => "precise",
      Qualifier::Coherent => "coherent",
      Qualifier::Volatile => "volatile",
      Qualifier::Restrict => "restrict",
      Qualifier::ReadOnly => "readonly",
      Qualifier::WriteOnly => "writeonly",
      Qualifier::Layout(_) | Qualifier::Unrecognized(_) => return None,
    };

    Some(token)
  }

  /// Map a keyword to its qualifier.
  pub fn from_keyword(keyword: &str) -> Self {
    match keyword {
      "const" => Qualifier::Const,
      "in" => Qualifier::In,
      "out" => Qualifier::Out,
      "inout" => Qualifier::InOut,
      "attribute" => Qualifier::Attribute,
      "uniform" => Qualifier::Uniform,
      "varying" => Qualifier::Varying,
      "buffer" => Qualifier::Buffer,
      "shared" => Qualifier::Shared,
      "centroid" => Qualifier::Centroid,
      "sample" => Qualifier::Sample,
      "patch" => Qualifier::Patch,
      "smooth" => Qualifier::Smooth,
      "flat" => Qualifier::Flat,
      "noperspective" => Qualifier::NoPerspective,
      "highp" => Qualifier::HighP,
      "mediump" => Qualifier::MediumP,
      "lowp" => Qualifier::LowP,
      "invariant" => Qualifier::Invariant,
      "precise" => Qualifier::Precise,
      "coherent" => Qualifier::Coherent,
      "volatile" => Qualifier::Volatile,
      "restrict" => Qualifier::Restrict,
      "readonly" => Qualifier::ReadOnly,
      "writeonly" => Qualifier::WriteOnly,
      _ => Qualifier::Unrecognized(keyword.to_owned()),
    }
  }
}
