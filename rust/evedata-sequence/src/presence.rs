//! Validity tracking for the slots of a column.

/// Tracks which slots of a column hold a value and which are absent.
///
/// Three storage strategies are used:
/// - `Trivial`: every slot is present; the common case after an exact join
/// - `Nulls`: every slot is absent
/// - `Bytes`: mixed, one byte per slot (`1` present, `0` absent)
#[derive(Debug, Clone)]
pub enum Presence {
    /// All values are present.
    Trivial(usize),

    /// All values are absent.
    Nulls(usize),

    /// One byte per slot: `1` - value is present, `0` - value is absent.
    Bytes(Vec<u8>),
}

impl Presence {
    /// Returns the number of slots tracked, present or not.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::Trivial(len) => *len,
            Self::Nulls(len) => *len,
            Self::Bytes(presence) => presence.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of absent slots.
    pub fn count_nulls(&self) -> usize {
        match self {
            Self::Trivial(_) => 0,
            Self::Nulls(len) => *len,
            Self::Bytes(presence) => presence.iter().filter(|&&b| b == 0).count(),
        }
    }

    /// Returns the number of present slots.
    pub fn count_non_nulls(&self) -> usize {
        match self {
            Self::Trivial(len) => *len,
            Self::Nulls(_) => 0,
            Self::Bytes(presence) => presence.iter().filter(|&&b| b != 0).count(),
        }
    }

    #[inline]
    pub fn is_trivial_non_null(&self) -> bool {
        matches!(self, Self::Trivial(_))
    }

    #[inline]
    pub fn is_trivial_all_null(&self) -> bool {
        matches!(self, Self::Nulls(_))
    }

    /// Returns `true` if the slot at `index` is absent.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn is_null(&self, index: usize) -> bool {
        !self.is_valid(index)
    }

    /// Returns `true` if the slot at `index` holds a value.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn is_valid(&self, index: usize) -> bool {
        match self {
            Self::Trivial(len) => {
                assert!(index < *len, "presence index {index} out of bounds");
                true
            }
            Self::Nulls(len) => {
                assert!(index < *len, "presence index {index} out of bounds");
                false
            }
            Self::Bytes(presence) => presence[index] != 0,
        }
    }

    pub fn push_null(&mut self) {
        match self {
            Presence::Trivial(len) => {
                if *len > 0 {
                    let mut presence = Vec::with_capacity(*len + 1);
                    presence.resize(*len, 1u8);
                    presence.push(0);
                    *self = Presence::Bytes(presence);
                } else {
                    *self = Presence::Nulls(1);
                }
            }
            Presence::Nulls(len) => *len += 1,
            Presence::Bytes(presence) => presence.push(0),
        }
    }

    pub fn push_non_null(&mut self) {
        match self {
            Presence::Trivial(len) => *len += 1,
            Presence::Nulls(len) => {
                let mut presence = Vec::with_capacity(*len + 1);
                presence.resize(*len, 0u8);
                presence.push(1);
                *self = Presence::Bytes(presence);
            }
            Presence::Bytes(presence) => presence.push(1),
        }
    }

    /// Appends one slot, present or absent.
    #[inline]
    pub fn push(&mut self, valid: bool) {
        if valid {
            self.push_non_null();
        } else {
            self.push_null();
        }
    }

    /// Iterates over the slots, `true` for present.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).map(|i| self.is_valid(i))
    }

    /// Returns the validity bitmap as one `bool` per slot, or `None` if every
    /// slot is present.
    pub fn to_validity(&self) -> Option<Vec<bool>> {
        match self {
            Self::Trivial(_) => None,
            _ => Some(self.iter().collect()),
        }
    }
}

impl PartialEq for Presence {
    /// Compares the logical slot states; the storage strategy is not significant.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Default for Presence {
    fn default() -> Self {
        Presence::Trivial(0)
    }
}

impl FromIterator<bool> for Presence {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut presence = Presence::default();
        for valid in iter {
            presence.push(valid);
        }
        presence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_all_present() {
        let mut presence = Presence::default();
        for _ in 0..6 {
            presence.push_non_null();
        }

        assert_eq!(presence.len(), 6);
        assert!(presence.is_trivial_non_null());
        assert!(!presence.is_trivial_all_null());
        assert!(!presence.is_null(0));
        assert!(presence.to_validity().is_none());
    }

    #[test]
    fn test_presence_all_null() {
        let mut presence = Presence::default();
        for _ in 0..6 {
            presence.push_null();
        }

        assert_eq!(presence.len(), 6);
        assert_eq!(presence.count_non_nulls(), 0);
        assert_eq!(presence.count_nulls(), 6);
        assert!(presence.is_trivial_all_null());
        assert!(presence.is_null(5));
    }

    #[test]
    fn test_presence_mixed() {
        let presence = [true, false, false, false, false, true, true]
            .into_iter()
            .collect::<Presence>();

        assert_eq!(presence.len(), 7);
        assert!(!presence.is_trivial_non_null());
        assert!(!presence.is_trivial_all_null());
        assert_eq!(presence.count_nulls(), 4);
        assert_eq!(
            presence.to_validity().unwrap(),
            [true, false, false, false, false, true, true]
        );
    }

    #[test]
    fn test_presence_equality_ignores_storage() {
        let bytes = Presence::Bytes(vec![1, 1, 1]);
        assert_eq!(bytes, Presence::Trivial(3));
        assert_ne!(bytes, Presence::Trivial(2));
        assert_ne!(Presence::Nulls(2), Presence::Trivial(2));
        let collected: Presence = [false, false].into_iter().collect();
        assert!(collected.is_trivial_all_null());
    }

    #[test]
    #[should_panic(expected = "presence index 3 out of bounds")]
    fn test_presence_out_of_bounds() {
        Presence::Trivial(3).is_valid(3);
    }
}
