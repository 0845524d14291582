use crate::SyntaxKind;

const SIZE: usize = SyntaxKind::COUNT.div_ceil(u64::BITS as usize);

/// Compact, const-constructible set of `SyntaxKind`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SyntaxSet {
    bits: [u64; SIZE],
}

impl SyntaxSet {
    pub const EMPTY: Self = Self { bits: [0; SIZE] };
    const BITS_PER_SLOT: u16 = u64::BITS as u16;

    const fn from_kind(kind: SyntaxKind) -> Self {
        let (slot_index, mask) = Self::locate(kind);
        let mut bits = Self::EMPTY.bits;
        bits[slot_index] = mask;
        Self { bits }
    }

    const fn locate(kind: SyntaxKind) -> (usize, u64) {
        let kind = kind as u16;
        let slot_index = (kind / Self::BITS_PER_SLOT) as usize;
        let bit_index = kind % Self::BITS_PER_SLOT;
        (slot_index, 1 << bit_index)
    }

    pub const fn union(mut self, other: &Self) -> Self {
        let mut i = 0;

        while i < self.bits.len() {
            self.bits[i] |= other.bits[i];
            i += 1;
        }

        self
    }

    pub const fn new<const N: usize>(kinds: [SyntaxKind; N]) -> Self {
        let mut set = Self::EMPTY;

        let mut i = 0;
        while i < kinds.len() {
            set = set.union(&Self::from_kind(kinds[i]));
            i += 1;
        }

        set
    }

    #[must_use]
    pub const fn with(self, kind: SyntaxKind) -> Self {
        self.union(&Self::from_kind(kind))
    }

    #[must_use]
    pub const fn without(mut self, kind: SyntaxKind) -> Self {
        let (slot_index, mask) = Self::locate(kind);
        self.bits[slot_index] &= !mask;
        self
    }

    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let (slot_index, mask) = Self::locate(kind);
        self.bits[slot_index] & mask != 0
    }

    pub const fn is_empty(&self) -> bool {
        let mut i = 0;
        while i < self.bits.len() {
            if self.bits[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }
}

impl FromIterator<SyntaxKind> for SyntaxSet {
    fn from_iter<I: IntoIterator<Item = SyntaxKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::*;

    #[test]
    fn membership() {
        const SET: SyntaxSet = SyntaxSet::new([TILDE, XML_TEXT, CLASS_DECLARATION]);
        assert!(SET.contains(TILDE));
        assert!(SET.contains(XML_TEXT));
        assert!(SET.contains(CLASS_DECLARATION));
        assert!(!SET.contains(STRUCT_DECLARATION));

        let set = SET.without(TILDE).with(COMMA);
        assert!(!set.contains(TILDE));
        assert!(set.contains(COMMA));
        assert!(SyntaxSet::EMPTY.is_empty());
        assert_eq!([COMMA, XML_TEXT, CLASS_DECLARATION].into_iter().collect::<SyntaxSet>(), set);
    }
}
