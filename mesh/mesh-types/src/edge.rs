//! Orientation-independent edge identifiers.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Canonical identifier of a mesh edge: the unordered pair `(min, max)`.
///
/// Two triangles sharing an edge always produce the same key, whatever
/// direction each of them walks it in.
///
/// # Example
///
/// ```
/// use mesh_types::EdgeKey;
///
/// assert_eq!(EdgeKey::new(7, 2), EdgeKey::new(2, 7));
/// assert_eq!(EdgeKey::new(7, 2).vertices(), (2, 7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeKey(u32, u32);

impl EdgeKey {
    /// Key for the edge between `a` and `b`.
    #[inline]
    #[must_use]
    pub const fn new(a: u32, b: u32) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    /// The smaller vertex index.
    #[inline]
    #[must_use]
    pub const fn min(self) -> u32 {
        self.0
    }

    /// The larger vertex index.
    #[inline]
    #[must_use]
    pub const fn max(self) -> u32 {
        self.1
    }

    /// Both vertex indices, smaller first.
    #[inline]
    #[must_use]
    pub const fn vertices(self) -> (u32, u32) {
        (self.0, self.1)
    }

    /// The three directed edges of a face in wrapping order, each with its key.
    ///
    /// For `[i, j, k]` this yields `(i, j)`, `(j, k)` and `(k, i)`.
    #[inline]
    #[must_use]
    pub const fn of_face([i, j, k]: [u32; 3]) -> [(u32, u32, Self); 3] {
        [
            (i, j, Self::new(i, j)),
            (j, k, Self::new(j, k)),
            (k, i, Self::new(k, i)),
        ]
    }
}
