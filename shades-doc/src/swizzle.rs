//! Vector swizzles, as in `v.xy` or `color.rgb`.

use crate::types::Dim;

/// Select a channel to extract from a vector.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SwizzleSelector {
  /// Select the `.x` (or `.r`, or `.s`) channel.
  X,

  /// Select the `.y` (or `.g`, or `.t`) channel.
  Y,

  /// Select the `.z` (or `.b`, or `.p`) channel.
  Z,

  /// Select the `.w` (or `.a`, or `.q`) channel.
  W,
}

/// Naming sets of the channels. A swizzle cannot mix them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum SelectorSet {
  Position,
  Color,
  Texture,
}

impl SwizzleSelector {
  /// Index of the selected channel.
  pub fn index(self) -> usize {
    match self {
      SwizzleSelector::X => 0,
      SwizzleSelector::Y => 1,
      SwizzleSelector::Z => 2,
      SwizzleSelector::W => 3,
    }
  }

  fn from_char(c: char) -> Option<(Self, SelectorSet)> {
    let sel = match c {
      'x' => (SwizzleSelector::X, SelectorSet::Position),
      'y' => (SwizzleSelector::Y, SelectorSet::Position),
      'z' => (SwizzleSelector::Z, SelectorSet::Position),
      'w' => (SwizzleSelector::W, SelectorSet::Position),
      'r' => (SwizzleSelector::X, SelectorSet::Color),
      'g' => (SwizzleSelector::Y, SelectorSet::Color),
      'b' => (SwizzleSelector::Z, SelectorSet::Color),
      'a' => (SwizzleSelector::W, SelectorSet::Color),
      's' => (SwizzleSelector::X, SelectorSet::Texture),
      't' => (SwizzleSelector::Y, SelectorSet::Texture),
      'p' => (SwizzleSelector::Z, SelectorSet::Texture),
      'q' => (SwizzleSelector::W, SelectorSet::Texture),
      _ => return None,
    };

    Some(sel)
  }
}

/// Swizzle channel selector.
///
/// The variant gives the dimension of the resulting expression; the [`SwizzleSelector`]s pick channels in the source
/// expression.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Swizzle {
  /// Create a one-channel expression.
  D1(SwizzleSelector),

  /// Create a two-channel expression.
  D2(SwizzleSelector, SwizzleSelector),

  /// Create a three-channel expression.
  D3(SwizzleSelector, SwizzleSelector, SwizzleSelector),

  /// Create a four-channel expression.
  D4(
    SwizzleSelector,
    SwizzleSelector,
    SwizzleSelector,
    SwizzleSelector,
  ),
}

impl Swizzle {
  /// Parse a field name as a swizzle.
  ///
  /// Returns [`None`] if the name is not made of one to four channel letters taken from a single naming set.
  pub fn parse(field: &str) -> Option<Self> {
    let mut set = None;
    let mut sels = Vec::with_capacity(4);

    for c in field.chars() {
      let (sel, sel_set) = SwizzleSelector::from_char(c)?;

      match set {
        None => set = Some(sel_set),
        Some(prev) if prev != sel_set => return None,
        Some(_) => (),
      }

      sels.push(sel);
    }

    match sels.as_slice() {
      [a] => Some(Swizzle::D1(*a)),
      [a, b] => Some(Swizzle::D2(*a, *b)),
      [a, b, c] => Some(Swizzle::D3(*a, *b, *c)),
      [a, b, c, d] => Some(Swizzle::D4(*a, *b, *c, *d)),
      _ => None,
    }
  }

  /// Dimension of the swizzled expression.
  pub fn dim(&self) -> Dim {
    match self {
      Swizzle::D1(..) => Dim::Scalar,
      Swizzle::D2(..) => Dim::D2,
      Swizzle::D3(..) => Dim::D3,
      Swizzle::D4(..) => Dim::D4,
    }
  }

  /// Highest channel index read by the swizzle.
  pub fn max_index(&self) -> usize {
    match *self {
      Swizzle::D1(a) => a.index(),
      Swizzle::D2(a, b) => a.index().max(b.index()),
      Swizzle::D3(a, b, c) => a.index().max(b.index()).max(c.index()),
      Swizzle::D4(a, b, c, d) => a.index().max(b.index()).max(c.index()).max(d.index()),
    }
  }
}
