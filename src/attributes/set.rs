//! Compact attribute sets.

use serde::{Deserialize, Serialize};

use crate::core::AttributeCategory;

/// A set of attributes stored as a bitmask.
///
/// ## Usage
///
/// ```
/// use rulegrid::attributes::AttributeSet;
/// use rulegrid::core::AttributeCategory;
///
/// let mut set = AttributeSet::empty();
/// set.insert(AttributeCategory::Push);
/// assert!(set.contains(AttributeCategory::Push));
/// assert!(!set.contains(AttributeCategory::Stop));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeSet(u16);

impl AttributeSet {
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn of(attribute: AttributeCategory) -> Self {
        Self(attribute.bit())
    }

    pub fn insert(&mut self, attribute: AttributeCategory) {
        self.0 |= attribute.bit();
    }

    pub fn remove(&mut self, attribute: AttributeCategory) {
        self.0 &= !attribute.bit();
    }

    #[must_use]
    pub const fn contains(self, attribute: AttributeCategory) -> bool {
        self.0 & attribute.bit() != 0
    }

    #[must_use]
    pub const fn union(self, other: AttributeSet) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Attributes in declaration order.
    pub fn iter(self) -> impl Iterator<Item = AttributeCategory> {
        AttributeCategory::ALL
            .into_iter()
            .filter(move |&attribute| self.contains(attribute))
    }
}

impl FromIterator<AttributeCategory> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = AttributeCategory>>(iter: I) -> Self {
        let mut set = AttributeSet::empty();
        for attribute in iter {
            set.insert(attribute);
        }
        set
    }
}

impl std::ops::BitOr for AttributeSet {
    type Output = AttributeSet;

    fn bitor(self, rhs: AttributeSet) -> AttributeSet {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for AttributeSet {
    fn bitor_assign(&mut self, rhs: AttributeSet) {
        self.0 |= rhs.0;
    }
}
