//! The set of picked origin vertices.

use hashbrown::HashSet;

/// Origin vertices in pick order, without duplicates.
///
/// # Example
///
/// ```
/// use mesh_session::OriginSet;
///
/// let mut origins = OriginSet::new();
/// assert!(origins.insert(4));
/// assert!(origins.insert(1));
/// assert!(!origins.insert(4));
/// assert_eq!(origins.as_slice(), &[4, 1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OriginSet {
    order: Vec<u32>,
    members: HashSet<u32>,
}

impl OriginSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex; returns `false` if it was already present.
    pub fn insert(&mut self, vertex: u32) -> bool {
        if !self.members.insert(vertex) {
            return false;
        }
        self.order.push(vertex);
        true
    }

    /// Remove a vertex; returns `false` if it was not present.
    pub fn remove(&mut self, vertex: u32) -> bool {
        if !self.members.remove(&vertex) {
            return false;
        }
        self.order.retain(|&v| v != vertex);
        true
    }

    /// Whether `vertex` is an origin.
    #[must_use]
    pub fn contains(&self, vertex: u32) -> bool {
        self.members.contains(&vertex)
    }

    /// Remove every origin.
    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    /// Number of origins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether there are no origins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Origins in pick order.
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.order
    }

    /// Iterate in pick order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.order.iter().copied()
    }
}

impl PartialEq for OriginSet {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for OriginSet {}

impl FromIterator<u32> for OriginSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut set = Self::new();
        for vertex in iter {
            set.insert(vertex);
        }
        set
    }
}
