//! Byte order of the buffer underneath a view.
//!
//! A view is parameterized by a marker type ([`LittleEndian`] or
//! [`BigEndian`]) so the logical-to-physical index mapping is resolved at
//! build time. [`Endianness`] is the runtime name of the same choice.

/// The ordering of bytes within a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Endianness {
    /// The least significant byte is at the lowest offset.
    Little,
    /// The most significant byte is at the lowest offset.
    Big,
}

impl Endianness {
    /// The byte order of the target platform.
    pub fn native() -> Self {
        match 0x00FFu16.to_ne_bytes()[0] {
            0xFF => Self::Little,
            _ => Self::Big,
        }
    }

    /// Physical offset of logical byte `index` in a buffer of `len` bytes.
    ///
    /// `index` must be below `len`.
    #[inline]
    pub const fn offset(self, index: usize, len: usize) -> usize {
        match self {
            Self::Little => index,
            Self::Big => len - 1 - index,
        }
    }
}

/// Compile-time byte order of a view.
///
/// You can't implement this trait, it only exists as a bound.
pub trait ByteOrder: private::Sealed {
    const ENDIANNESS: Endianness;
}

/// Least significant byte first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LittleEndian;

/// Most significant byte first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BigEndian;

impl ByteOrder for LittleEndian {
    const ENDIANNESS: Endianness = Endianness::Little;
}

impl ByteOrder for BigEndian {
    const ENDIANNESS: Endianness = Endianness::Big;
}

pub type LE = LittleEndian;
pub type BE = BigEndian;

mod private {
    pub trait Sealed {}

    impl Sealed for super::LittleEndian {}
    impl Sealed for super::BigEndian {}
}
