//! Numeric conversion interface for the fixed-width integer types a view can
//! be converted to and from.

use std::{
    fmt::Debug,
    ops::{BitAnd, BitOr, Not, Shl, Shr},
};

/// A primitive integer a bit view can be converted into or stored from.
///
/// Implemented for every signed and unsigned primitive up to 128 bits. The
/// trait is sealed; the conversion routines rely on the exact two's-complement
/// layout of the primitives.
pub trait Integer:
    Copy
    + Eq
    + Debug
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + private::Sealed
{
    /// Width of the type in bits.
    const BITS: u32;
    /// Whether conversions sign-extend.
    const SIGNED: bool;
    const ZERO: Self;
    /// Every bit set (`-1` for signed types).
    const ONES: Self;

    /// Zero-extends a byte into the low 8 bits.
    fn from_byte(byte: u8) -> Self;

    /// Returns the byte at logical index `index` (0 = least significant).
    /// Indices past the width yield the sign fill.
    fn byte(self, index: u32) -> u8;

    /// Left shift that yields zero instead of overflowing when `n >= BITS`.
    fn wide_shl(self, n: u32) -> Self;

    /// Logical (zero-filling) right shift, zero when `n >= BITS`.
    fn logical_shr(self, n: u32) -> Self;
}

mod private {
    pub trait Sealed {}
}

macro_rules! impl_integer {
    ($($ty:ty => $unsigned:ty, $signed:literal;)*) => {
        $(
            impl private::Sealed for $ty {}

            impl Integer for $ty {
                const BITS: u32 = <$ty>::BITS;
                const SIGNED: bool = $signed;
                const ZERO: Self = 0;
                const ONES: Self = !0;

                #[inline]
                fn from_byte(byte: u8) -> Self {
                    byte as $unsigned as $ty
                }

                #[inline]
                fn byte(self, index: u32) -> u8 {
                    let shift = index.saturating_mul(8);
                    if shift < Self::BITS {
                        (self >> shift) as u8
                    } else {
                        // Arithmetic shift replicates the sign bit for signed types.
                        let fill = if $signed { 0xFF } else { 0x00 };
                        (self >> (Self::BITS - 1)) as u8 & fill
                    }
                }

                #[inline]
                fn wide_shl(self, n: u32) -> Self {
                    self.checked_shl(n).unwrap_or(0)
                }

                #[inline]
                fn logical_shr(self, n: u32) -> Self {
                    (self as $unsigned).checked_shr(n).unwrap_or(0) as $ty
                }
            }
        )*
    };
}

impl_integer! {
    u8 => u8, false;
    u16 => u16, false;
    u32 => u32, false;
    u64 => u64, false;
    u128 => u128, false;
    usize => usize, false;
    i8 => u8, true;
    i16 => u16, true;
    i32 => u32, true;
    i64 => u64, true;
    i128 => u128, true;
    isize => usize, true;
}
