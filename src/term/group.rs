use std::ops::{BitAnd, BitOr, Sub};

use smallvec::SmallVec;

use crate::GoTermId;

/// Groups stay inline up to this many ids before spilling to the heap.
/// Direct parent and child lists of GO terms are almost always smaller.
const GROUP_INLINE_SIZE: usize = 8;

/// A set of [`GoTermId`]s representing a group of GO terms
///
/// Each term can occur only once in the group and the ids are kept
/// sorted, so iteration order is deterministic and membership checks
/// are binary searches.
///
/// Groups are used for the parent/child lists of every term, for the
/// cached ancestor/descendant closures and for the per-member
/// annotation lists.
#[derive(Debug, Default, Clone)]
pub struct GoGroup {
    ids: SmallVec<[GoTermId; GROUP_INLINE_SIZE]>,
}

impl GoGroup {
    /// Constructs a new, empty [`GoGroup`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a new, empty [`GoGroup`] with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: SmallVec::with_capacity(capacity),
        }
    }

    /// Returns `true` if the group contains no [`GoTermId`]s
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of [`GoTermId`]s in the group
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Adds a new [`GoTermId`] to the group
    ///
    /// Returns whether the `GoTermId` was newly inserted. That is:
    ///
    /// - If the group did not previously contain this `GoTermId`, true is returned.
    /// - If the group already contained this `GoTermId`, false is returned.
    ///
    pub fn insert(&mut self, id: GoTermId) -> bool {
        match self.ids.binary_search(&id) {
            Ok(_) => false,
            Err(idx) => {
                self.ids.insert(idx, id);
                true
            }
        }
    }

    /// Adds a new [`GoTermId`] to the end of the group
    ///
    /// # Note
    ///
    /// This method will not check if the `GoTermId` already exists
    /// and will not maintain the internal sort order. The caller must
    /// guarantee that ids arrive in ascending order without duplicates.
    fn insert_unchecked(&mut self, id: GoTermId) {
        self.ids.push(id);
    }

    /// Returns `true` if the group contains the [`GoTermId`]
    pub fn contains(&self, id: &GoTermId) -> bool {
        self.ids.binary_search(id).is_ok()
    }

    /// Returns `true` if `self` and `other` share at least one [`GoTermId`]
    ///
    /// Both groups are sorted, so this is a single merge-walk over the
    /// two id lists that stops at the first common id.
    pub fn intersects(&self, other: &GoGroup) -> bool {
        let mut lhs = self.ids.iter();
        let mut rhs = other.ids.iter();
        let mut a = lhs.next();
        let mut b = rhs.next();
        while let (Some(x), Some(y)) = (a, b) {
            match x.cmp(y) {
                std::cmp::Ordering::Less => a = lhs.next(),
                std::cmp::Ordering::Greater => b = rhs.next(),
                std::cmp::Ordering::Equal => return true,
            }
        }
        false
    }

    /// Returns an Iterator of the [`GoTermId`]s inside the group
    pub fn iter(&self) -> GoTermIds {
        GoTermIds::new(self.ids.iter())
    }
}

impl FromIterator<GoTermId> for GoGroup {
    fn from_iter<T: IntoIterator<Item = GoTermId>>(iter: T) -> Self {
        let mut group = GoGroup::new();
        for id in iter {
            group.insert(id);
        }
        group
    }
}

impl<'a> IntoIterator for &'a GoGroup {
    type Item = GoTermId;

    type IntoIter = GoTermIds<'a>;

    fn into_iter(self) -> GoTermIds<'a> {
        GoTermIds::new(self.ids.iter())
    }
}

/// An iterator over [`GoTermId`]s
pub struct GoTermIds<'a> {
    inner: std::slice::Iter<'a, GoTermId>,
}

impl<'a> GoTermIds<'a> {
    fn new(inner: std::slice::Iter<'a, GoTermId>) -> Self {
        Self { inner }
    }
}

impl<'a> Iterator for GoTermIds<'a> {
    type Item = GoTermId;
    fn next(&mut self) -> Option<GoTermId> {
        self.inner.next().copied()
    }
}

impl BitOr for &GoGroup {
    type Output = GoGroup;

    fn bitor(self, rhs: &GoGroup) -> GoGroup {
        let mut group = GoGroup::with_capacity(self.len() + rhs.len());
        let (large, small) = if self.len() > rhs.len() {
            (self, rhs)
        } else {
            (rhs, self)
        };

        for id in &large.ids {
            group.insert_unchecked(*id);
        }
        for id in &small.ids {
            group.insert(*id);
        }
        group
    }
}

impl BitAnd for &GoGroup {
    type Output = GoGroup;

    fn bitand(self, rhs: &GoGroup) -> GoGroup {
        let mut group = GoGroup::with_capacity(self.len());
        let (large, small) = if self.len() > rhs.len() {
            (self, rhs)
        } else {
            (rhs, self)
        };

        for id in &small.ids {
            if large.contains(id) {
                group.insert_unchecked(*id);
            }
        }
        group
    }
}

impl Sub for &GoGroup {
    type Output = GoGroup;

    fn sub(self, rhs: &GoGroup) -> GoGroup {
        let mut group = GoGroup::with_capacity(self.len());
        for id in &self.ids {
            if !rhs.contains(id) {
                group.insert_unchecked(*id);
            }
        }
        group
    }
}
