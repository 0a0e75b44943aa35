//! Bit arithmetic primitives shared by the views.
//!
//! Everything here is a pure function over a single integer. Positions are
//! counted from the least significant bit.

use crate::integer::Integer;

pub const BITS_PER_BYTE: usize = 8;

/// Number of bytes needed to hold `bits` bits.
pub const fn containing_size_bytes(bits: usize) -> usize {
    bits.div_ceil(BITS_PER_BYTE)
}

/// Mask with the middle `middle` bits set, `right` bits up from the least
/// significant end, inside a `T` split as `left + middle + right`.
///
/// Panics if the three parts do not add up to the width of `T`.
pub fn interval_mask<T: Integer>(left: u32, middle: u32, right: u32) -> T {
    assert_eq!(
        left + middle + right,
        T::BITS,
        "interval mask parts must cover the whole integer"
    );

    if middle == 0 {
        return T::ZERO;
    }
    if middle == T::BITS {
        return T::ONES;
    }

    !(T::ONES << middle) << right
}

/// Moves the low `n` bits of `x` into the top `n` bit positions.
pub fn left_justify<T: Integer>(x: T, n: u32) -> T {
    debug_assert!(n <= T::BITS);
    x.wide_shl(T::BITS - n)
}

/// Moves the top `n` bits of `x` down into the low `n` bit positions.
pub fn right_justify<T: Integer>(x: T, n: u32) -> T {
    debug_assert!(n <= T::BITS);
    x.logical_shr(T::BITS - n)
}

/// Whether `value` survives narrowing to `bits` bits.
///
/// Unsigned values must be below `2^bits`; signed values must lie in the
/// two's-complement range of a `bits`-wide integer.
pub fn fits_in_bits<T: Integer>(value: T, bits: u32) -> bool {
    if bits >= T::BITS {
        return true;
    }
    if bits == 0 {
        return value == T::ZERO;
    }

    if T::SIGNED {
        let high = value >> (bits - 1);
        high == T::ZERO || high == T::ONES
    } else {
        value >> bits == T::ZERO
    }
}

/// Sign-extends the low `bits` of `value` to the full width of `T`.
///
/// `bits` is the true width of the value, not the width of its container.
pub fn sign_extend<T: Integer>(value: T, bits: u32) -> T {
    if bits == 0 || bits >= T::BITS {
        return value;
    }

    let high = interval_mask::<T>(0, T::BITS - bits, bits);
    if value & (T::ONES << (bits - 1)) & !high != T::ZERO {
        value | high
    } else {
        value & !high
    }
}
