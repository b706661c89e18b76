use bitvec::prelude::*;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct BitSet {
    cardinality: usize,
    bit_vec: BitVec,
}

impl BitSet {
    #[inline]
    pub fn new(size: usize) -> Self {
        Self {
            cardinality: 0,
            bit_vec: bitvec![0; size],
        }
    }

    /// Sets `idx` and returns whether it was already set.
    #[inline]
    pub fn set_bit(&mut self, idx: usize) -> bool {
        if !self.bit_vec[idx] {
            self.bit_vec.set(idx, true);
            self.cardinality += 1;
            false
        } else {
            true
        }
    }

    #[inline]
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    #[inline]
    pub fn at(&self, idx: usize) -> bool {
        self.bit_vec[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::BitSet;

    #[test]
    fn set_bit_tracks_cardinality() {
        let mut set = BitSet::new(10);
        assert_eq!(set.cardinality(), 0);
        assert!(!set.set_bit(3));
        assert!(set.set_bit(3));
        assert!(!set.set_bit(7));
        assert_eq!(set.cardinality(), 2);
        assert!(set.at(3));
        assert!(!set.at(4));
    }

    #[test]
    fn bits_past_the_first_block() {
        let mut set = BitSet::new(200);
        for i in [0, 63, 64, 65, 130, 199].iter() {
            set.set_bit(*i);
        }
        assert_eq!(set.cardinality(), 6);
        assert!(set.at(64) && set.at(199));
        assert!(!set.at(66) && !set.at(198));
    }
}
