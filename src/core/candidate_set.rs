//! Canonical candidate set representation
//!
//! A `CandidateSet` is the set of objects still consistent with every answer
//! observed so far. Members are stored as sorted, deduplicated item indices so
//! that two sets with the same members are equal and hash identically no matter
//! how they were built. This is what makes them usable as memoization keys.

/// Index of an object inside an [`ItemTable`](super::ItemTable)
pub type ItemIndex = usize;

/// Immutable, canonically ordered set of item indices
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidateSet(Box<[ItemIndex]>);

impl CandidateSet {
    /// Build a set from any iterable of indices, sorting and deduplicating
    ///
    /// # Examples
    /// ```
    /// use kary_oracle::core::CandidateSet;
    ///
    /// let a = CandidateSet::from_indices([3, 1, 2, 1]);
    /// let b = CandidateSet::from_indices(vec![1, 2, 3]);
    /// assert_eq!(a, b);
    /// assert_eq!(a.len(), 3);
    /// ```
    #[must_use]
    pub fn from_indices<I: IntoIterator<Item = ItemIndex>>(indices: I) -> Self {
        let mut members: Vec<ItemIndex> = indices.into_iter().collect();
        members.sort_unstable();
        members.dedup();
        Self(members.into_boxed_slice())
    }

    /// Set containing every index in `0..count`
    #[must_use]
    pub fn full(count: usize) -> Self {
        Self((0..count).collect())
    }

    /// Wrap members that are already sorted and unique
    pub(crate) fn from_sorted(members: Vec<ItemIndex>) -> Self {
        debug_assert!(
            members.windows(2).all(|w| w[0] < w[1]),
            "members must be strictly increasing"
        );
        Self(members.into_boxed_slice())
    }

    /// Number of candidates
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Members in ascending order
    #[inline]
    #[must_use]
    pub fn members(&self) -> &[ItemIndex] {
        &self.0
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = ItemIndex> + '_ {
        self.0.iter().copied()
    }

    /// New set holding the members that satisfy `keep`
    #[must_use]
    pub fn filter<F: FnMut(ItemIndex) -> bool>(&self, mut keep: F) -> Self {
        Self::from_sorted(self.iter().filter(|&i| keep(i)).collect())
    }
}

impl FromIterator<ItemIndex> for CandidateSet {
    fn from_iter<T: IntoIterator<Item = ItemIndex>>(iter: T) -> Self {
        Self::from_indices(iter)
    }
}
