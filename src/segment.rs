//! Base-1000 segmentation of a number into groups.

/// Groups needed to cover every `u64` (`18,446,744,073,709,551,615`).
pub const MAX_GROUPS: usize = 7;

/// One base-1000 segment of a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Group {
    /// Segment value, always in `0..=999`.
    pub value: u16,
    /// Magnitude level, 0 for the least significant group.
    pub index: usize,
}

/// The groups of one number, stored least significant first on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Groups {
    values: [u16; MAX_GROUPS],
    len: usize,
}

/// Splits `number` into base-1000 groups.
///
/// Zero has no groups. The most significant group of a non-zero number is
/// always non-zero.
///
/// ```rust
/// use vi_numwords::segment::{segment, Group};
///
/// let groups: Vec<Group> = segment(2_355_200_847).iter().collect();
/// assert_eq!(groups[0], Group { value: 2, index: 3 });
/// assert_eq!(groups[3], Group { value: 847, index: 0 });
/// ```
pub fn segment(mut number: u64) -> Groups {
    let mut groups = Groups {
        values: [0; MAX_GROUPS],
        len: 0,
    };
    while number > 0 {
        groups.values[groups.len] = (number % 1000) as u16;
        number /= 1000;
        groups.len += 1;
    }
    groups
}

impl Groups {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Group at magnitude `index`, if the number reaches that far.
    pub fn get(&self, index: usize) -> Option<Group> {
        (index < self.len).then(|| Group {
            value: self.values[index],
            index,
        })
    }

    /// Iterates most significant group first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Group> + ExactSizeIterator + '_ {
        self.values[..self.len]
            .iter()
            .enumerate()
            .rev()
            .map(|(index, &value)| Group { value, index })
    }
}
