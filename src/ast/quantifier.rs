use crate::{Error, Result};
use std::fmt;

/// The shape of a quantifier as written in the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantifierKind {
    Star,     // * (0 or more)
    Plus,     // + (1 or more)
    Optional, // ? (0 or 1)
    /// `{from}`, `{from,}` or `{from,to}`. `to` is `None` when unbounded.
    Range { from: u32, to: Option<u32> },
}

/// How many times a repeated sub-pattern matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantifier {
    pub kind: QuantifierKind,
    /// `false` for lazy quantifiers (`*?`, `{2,3}?`).
    pub greedy: bool,
}

/// Explicit repetition bounds of a quantifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub from: u32,
    /// `None` means unbounded, never zero.
    pub to: Option<u32>,
}

impl Quantifier {
    #[must_use]
    pub const fn star(greedy: bool) -> Self {
        Self {
            kind: QuantifierKind::Star,
            greedy,
        }
    }

    #[must_use]
    pub const fn plus(greedy: bool) -> Self {
        Self {
            kind: QuantifierKind::Plus,
            greedy,
        }
    }

    #[must_use]
    pub const fn optional(greedy: bool) -> Self {
        Self {
            kind: QuantifierKind::Optional,
            greedy,
        }
    }

    /// `{n}`.
    #[must_use]
    pub const fn exact(n: u32, greedy: bool) -> Self {
        Self {
            kind: QuantifierKind::Range {
                from: n,
                to: Some(n),
            },
            greedy,
        }
    }

    /// Creates a `Range` quantifier.
    ///
    /// # Errors
    ///
    /// If `to` is given and smaller than `from`, [`Error::QuantifierRange`] is
    /// returned.
    pub fn range(from: u32, to: Option<u32>, greedy: bool) -> Result<Self> {
        let quantifier = Self {
            kind: QuantifierKind::Range { from, to },
            greedy,
        };
        quantifier.check()?;
        Ok(quantifier)
    }

    /// Returns `true` unless the upper bound is smaller than the lower one.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        let Bounds { from, to } = self.bounds();
        !matches!(to, Some(to) if to < from)
    }

    /// Like [`Quantifier::is_valid`], but reports the bad bounds.
    ///
    /// # Errors
    ///
    /// [`Error::QuantifierRange`] if `to < from`.
    pub fn check(&self) -> Result<()> {
        match self.bounds() {
            Bounds { from, to: Some(to) } if to < from => Err(Error::QuantifierRange { from, to }),
            _ => Ok(()),
        }
    }

    /// Returns the explicit `(from, to)` pair for any quantifier shorthand.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        match self.kind {
            QuantifierKind::Star => Bounds { from: 0, to: None },
            QuantifierKind::Plus => Bounds { from: 1, to: None },
            QuantifierKind::Optional => Bounds {
                from: 0,
                to: Some(1),
            },
            QuantifierKind::Range { from, to } => Bounds { from, to },
        }
    }

    /// A quantifier is forced if it always repeats the same number of times
    /// (e.g. `a{3}`).
    #[must_use]
    pub const fn is_forced(&self) -> bool {
        let Bounds { from, to } = self.bounds();
        matches!(to, Some(to) if to == from)
    }

    /// A quantifier is from-zero if its body may be skipped entirely.
    #[must_use]
    pub const fn is_from_zero(&self) -> bool {
        self.bounds().from == 0
    }
}

impl Bounds {
    /// Adds two bounds. An unbounded side makes the sum unbounded.
    ///
    /// Returns `None` if either sum overflows.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        let from = self.from.checked_add(other.from)?;
        let to = match (self.to, other.to) {
            (Some(a), Some(b)) => Some(a.checked_add(b)?),
            _ => None,
        };
        Some(Self { from, to })
    }

    /// Wraps the bounds into a `Range` quantifier.
    #[must_use]
    pub const fn into_quantifier(self, greedy: bool) -> Quantifier {
        Quantifier {
            kind: QuantifierKind::Range {
                from: self.from,
                to: self.to,
            },
            greedy,
        }
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            QuantifierKind::Star => f.write_str("*")?,
            QuantifierKind::Plus => f.write_str("+")?,
            QuantifierKind::Optional => f.write_str("?")?,
            QuantifierKind::Range { from, to: None } => write!(f, "{{{from},}}")?,
            QuantifierKind::Range { from, to: Some(to) } if to == from => write!(f, "{{{from}}}")?,
            QuantifierKind::Range { from, to: Some(to) } => write!(f, "{{{from},{to}}}")?,
        }

        if self.greedy {
            Ok(())
        } else {
            f.write_str("?")
        }
    }
}
