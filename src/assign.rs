//! Truth assignments over the fixed atom ordering, packed into bitmasks.

/// The largest number of atoms one compilation can handle, fixed by the width
/// of the truth-table bitmask.
pub const MAX_ATOMS: usize = 64;

/// Bitmask covering the first `n` atom positions.
pub(crate) fn positions_mask(n: usize) -> u64 {
    assert!(n <= MAX_ATOMS, "{} exceeds the atom capacity", n);
    if n == 0 {
        0
    } else {
        u64::MAX >> (MAX_ATOMS - n)
    }
}

/// A partial truth assignment over the atom ordering.
/// Bit `i` of `known` is set iff the atom at position `i` has a value; bit `i`
/// of `values` holds that value and is zero while the atom is unassigned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PartialAssignment {
    values: u64,
    known: u64,
}

impl PartialAssignment {
    /// The assignment with no atom assigned.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The value assigned to the atom at `position`, if any.
    pub fn get(&self, position: usize) -> Option<bool> {
        if position >= MAX_ATOMS || self.known >> position & 1 == 0 {
            None
        } else {
            Some(self.values >> position & 1 == 1)
        }
    }

    /// Assigns a value to the atom at `position`.
    /// Panics if the position is beyond the atom capacity.
    pub fn set(&mut self, position: usize, value: bool) {
        assert!(position < MAX_ATOMS, "position {} exceeds the atom capacity", position);
        let bit = 1u64 << position;
        self.known |= bit;
        if value {
            self.values |= bit;
        } else {
            self.values &= !bit;
        }
    }

    /// Removes the assignment of the atom at `position`.
    pub fn unset(&mut self, position: usize) {
        assert!(position < MAX_ATOMS, "position {} exceeds the atom capacity", position);
        let bit = 1u64 << position;
        self.known &= !bit;
        self.values &= !bit;
    }

    /// The number of assigned atoms.
    pub fn assigned(&self) -> usize {
        self.known.count_ones() as usize
    }

    /// True iff every atom position below `n` is assigned.
    pub fn is_total(&self, n: usize) -> bool {
        let mask = positions_mask(n);
        self.known & mask == mask
    }

    /// The assigned values as truth-table bits. Unassigned positions are zero.
    pub(crate) fn value_bits(&self) -> u64 {
        self.values
    }
}

/// A total truth assignment, encoded as its truth-table index: bit `i` is the
/// value of the atom at position `i` of the ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Model(u64);

impl Model {
    pub fn from_index(index: u64) -> Self {
        Self(index)
    }

    /// The truth-table index of this model.
    pub fn index(&self) -> u64 {
        self.0
    }

    /// The value of the atom at `position`.
    pub fn get(&self, position: usize) -> bool {
        assert!(position < MAX_ATOMS, "position {} exceeds the atom capacity", position);
        self.0 >> position & 1 == 1
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn set_get_unset_roundtrip() {
        let mut pa = PartialAssignment::empty();
        assert_eq!(pa.get(3), None);
        pa.set(3, true);
        pa.set(5, false);
        assert_eq!(pa.get(3), Some(true));
        assert_eq!(pa.get(5), Some(false));
        assert_eq!(pa.assigned(), 2);
        pa.unset(3);
        assert_eq!(pa.get(3), None);
        assert_eq!(pa.assigned(), 1);
    }

    #[test]
    fn unset_clears_value_bits() {
        let mut pa = PartialAssignment::empty();
        pa.set(2, true);
        pa.unset(2);
        assert_eq!(pa.value_bits(), 0);
    }

    #[test]
    fn totality_is_relative_to_atom_count() {
        let mut pa = PartialAssignment::empty();
        pa.set(0, true);
        pa.set(1, false);
        assert!(pa.is_total(2));
        assert!(!pa.is_total(3));
        assert!(PartialAssignment::empty().is_total(0));
    }

    #[test]
    fn model_bit_encoding() {
        let m = Model::from_index(0b101);
        assert!(m.get(0));
        assert!(!m.get(1));
        assert!(m.get(2));
        assert!(!m.get(3));
        assert_eq!(m.index(), 5);
    }

    #[test]
    fn positions_mask_widths() {
        assert_eq!(positions_mask(0), 0);
        assert_eq!(positions_mask(1), 1);
        assert_eq!(positions_mask(3), 0b111);
        assert_eq!(positions_mask(64), u64::MAX);
    }
}
