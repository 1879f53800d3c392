//! Geometry types.

use serde::Deserialize;

/// A cell coordinate. Origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// A size in cells. Unsigned, so never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A positioned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub position: Position,
    pub size: Size,
}

impl Bounds {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            position: Position::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Exclusive right edge.
    #[inline]
    pub const fn right(&self) -> u16 {
        self.position.x.saturating_add(self.size.width)
    }

    /// Exclusive bottom edge.
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.position.y.saturating_add(self.size.height)
    }

    /// Check if a point is inside these bounds.
    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.position.x && x < self.right() && y >= self.position.y && y < self.bottom()
    }

    /// Shrink by spacing on each side. Sizes saturate at zero.
    pub fn shrink(&self, spacing: Spacing) -> Bounds {
        Bounds {
            position: Position::new(
                self.position.x.saturating_add(spacing.left),
                self.position.y.saturating_add(spacing.top),
            ),
            size: Size::new(
                self.size.width.saturating_sub(spacing.horizontal()),
                self.size.height.saturating_sub(spacing.vertical()),
            ),
        }
    }
}

// =============================================================================
// Spacing
// =============================================================================

/// Padding or margin, normalized to four sides.
///
/// Deserializes from a single number (all sides), a `[vertical, horizontal]`
/// pair, a `[top, right, bottom, left]` quad, or a table with any subset of
/// `top`/`right`/`bottom`/`left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "SpacingSpec")]
pub struct Spacing {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Spacing {
    pub const ZERO: Self = Self::all(0);

    pub const fn all(n: u16) -> Self {
        Self {
            top: n,
            right: n,
            bottom: n,
            left: n,
        }
    }

    pub const fn symmetric(vertical: u16, horizontal: u16) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub const fn new(top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[inline]
    pub const fn horizontal(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    #[inline]
    pub const fn vertical(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }
}

impl From<u16> for Spacing {
    fn from(n: u16) -> Self {
        Self::all(n)
    }
}

impl From<(u16, u16)> for Spacing {
    fn from((vertical, horizontal): (u16, u16)) -> Self {
        Self::symmetric(vertical, horizontal)
    }
}

impl From<[u16; 4]> for Spacing {
    fn from([top, right, bottom, left]: [u16; 4]) -> Self {
        Self::new(top, right, bottom, left)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SpacingSpec {
    All(u16),
    Pair([u16; 2]),
    Quad([u16; 4]),
    Sides {
        #[serde(default)]
        top: u16,
        #[serde(default)]
        right: u16,
        #[serde(default)]
        bottom: u16,
        #[serde(default)]
        left: u16,
    },
}

impl From<SpacingSpec> for Spacing {
    fn from(spec: SpacingSpec) -> Self {
        match spec {
            SpacingSpec::All(n) => Spacing::all(n),
            SpacingSpec::Pair([v, h]) => Spacing::symmetric(v, h),
            SpacingSpec::Quad(sides) => Spacing::from(sides),
            SpacingSpec::Sides {
                top,
                right,
                bottom,
                left,
            } => Spacing::new(top, right, bottom, left),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacing_normalization() {
        assert_eq!(Spacing::from(2), Spacing::new(2, 2, 2, 2));
        assert_eq!(Spacing::from((1, 3)), Spacing::new(1, 3, 1, 3));
        assert_eq!(Spacing::from([1, 2, 3, 4]), Spacing::new(1, 2, 3, 4));
        assert_eq!(Spacing::new(1, 2, 3, 4).horizontal(), 6);
        assert_eq!(Spacing::new(1, 2, 3, 4).vertical(), 4);
    }

    #[test]
    fn test_spacing_deserialize_forms() {
        #[derive(Deserialize)]
        struct W {
            p: Spacing,
        }
        let w: W = toml::from_str("p = 1").unwrap();
        assert_eq!(w.p, Spacing::all(1));
        let w: W = toml::from_str("p = [1, 2]").unwrap();
        assert_eq!(w.p, Spacing::symmetric(1, 2));
        let w: W = toml::from_str("p = [1, 2, 3, 4]").unwrap();
        assert_eq!(w.p, Spacing::new(1, 2, 3, 4));
        let w: W = toml::from_str("p = { left = 2 }").unwrap();
        assert_eq!(w.p, Spacing::new(0, 0, 0, 2));
    }

    #[test]
    fn test_negative_spacing_rejected() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct W {
            p: Spacing,
        }
        assert!(toml::from_str::<W>("p = -1").is_err());
    }

    #[test]
    fn test_bounds_shrink_saturates() {
        let b = Bounds::new(0, 0, 4, 2);
        let inner = b.shrink(Spacing::all(3));
        assert_eq!(inner.size, Size::new(0, 0));
        assert!(inner.size.is_empty());
        assert_eq!(inner.position, Position::new(3, 3));
    }

    #[test]
    fn test_bounds_contains() {
        let b = Bounds::new(2, 2, 3, 3);
        assert!(b.contains(2, 2));
        assert!(b.contains(4, 4));
        assert!(!b.contains(5, 2));
        assert_eq!(b.right(), 5);
        assert_eq!(b.bottom(), 5);
    }
}
