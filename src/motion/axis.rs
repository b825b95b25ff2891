//! Axis identities and per-axis bit masks.

use core::fmt;

/// Number of driven axes.
pub const AXIS_COUNT: usize = 4;

/// One of the four wire-carriage axes.
///
/// The discriminant is the axis index used by every per-axis array in the
/// crate, and the bit position used by [`AxisMask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal-left carriage.
    X = 0,
    /// Vertical-left carriage.
    Y = 1,
    /// Horizontal-right carriage.
    A = 2,
    /// Vertical-right carriage.
    Z = 3,
}

/// Resolution class shared by a pair of axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisClass {
    /// X and A.
    Horizontal,
    /// Y and Z.
    Vertical,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; AXIS_COUNT] = [Axis::X, Axis::Y, Axis::A, Axis::Z];

    /// Array index of this axis.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// G-code parameter letter.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::A => 'A',
            Axis::Z => 'Z',
        }
    }

    /// Look an axis up by its G-code letter (case-sensitive).
    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.into_iter().find(|axis| axis.letter() == letter)
    }

    /// Resolution class of this axis.
    #[inline]
    pub const fn class(self) -> AxisClass {
        match self {
            Axis::X | Axis::A => AxisClass::Horizontal,
            Axis::Y | Axis::Z => AxisClass::Vertical,
        }
    }

    /// Single-bit mask for this axis.
    #[inline]
    pub const fn mask(self) -> AxisMask {
        AxisMask(1 << self as u8)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Four-bit set of axes, bit `i` for [`Axis`] index `i`.
///
/// Used both for direction bits of a job and for the axes pulsed on a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct AxisMask(u8);

impl AxisMask {
    /// No axis set.
    pub const EMPTY: Self = Self(0);

    /// Every axis set.
    pub const ALL: Self = Self(0b1111);

    /// Build from raw bits; bits above the fourth are dropped.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// Raw bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether `axis` is in the set.
    #[inline]
    pub const fn contains(self, axis: Axis) -> bool {
        self.0 & axis.mask().0 != 0
    }

    /// Add `axis` to the set.
    #[inline]
    pub fn insert(&mut self, axis: Axis) {
        self.0 |= axis.mask().0;
    }

    /// Whether no axis is set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of axes in the set.
    #[inline]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate the axes in the set, in index order.
    pub fn iter(self) -> impl Iterator<Item = Axis> {
        Axis::ALL.into_iter().filter(move |&axis| self.contains(axis))
    }
}

impl FromIterator<Axis> for AxisMask {
    fn from_iter<I: IntoIterator<Item = Axis>>(iter: I) -> Self {
        let mut mask = AxisMask::EMPTY;
        for axis in iter {
            mask.insert(axis);
        }
        mask
    }
}
