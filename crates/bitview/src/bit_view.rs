//! Fixed-width integer views over a byte buffer.

use std::fmt;

use crate::{
    bits::{BITS_PER_BYTE, containing_size_bytes, fits_in_bits, interval_mask, sign_extend},
    byte_view::ByteView,
    errors::{Error, Result},
    integer::Integer,
    order::ByteOrder,
};

/// A `BITS`-wide integer stored in `ceil(BITS / 8)` bytes of a buffer.
///
/// Bit 0 is the least significant bit of the value regardless of the byte
/// order; `O` only decides where each byte lives in memory. The unused high
/// bits of the most significant byte are padding. Data is right-justified:
/// padding always sits above bit `BITS - 1`.
///
/// ```text
/// 12-bit view:
///  x x x x 0 1 0 1   1 1 0 1 1 0 1 0
///         11  <- 8   7           <- 0
/// ```
///
/// Mutating operations need `B: AsMut<[u8]>`. The view does not synchronize
/// access to the buffer.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitView<B, O, const BITS: usize> {
    bytes: ByteView<B, O>,
}

impl<B: AsRef<[u8]>, O: ByteOrder, const BITS: usize> BitView<B, O, BITS> {
    /// Bytes backing the view.
    pub const BYTES: usize = containing_size_bytes(BITS);
    /// Unused high bits in the most significant byte.
    pub const PADDING: usize = BITS_PER_BYTE * Self::BYTES - BITS;

    /// Wraps `data`, which must be exactly [`Self::BYTES`] long.
    pub fn new(data: B) -> Result<Self> {
        Self::from_byte_view(ByteView::new(data))
    }

    pub fn from_byte_view(bytes: ByteView<B, O>) -> Result<Self> {
        if bytes.len() != Self::BYTES {
            return Err(Error::BufferSize {
                expected: Self::BYTES,
                actual: bytes.len(),
            });
        }

        Ok(Self { bytes })
    }

    /// Width of the value in bits.
    #[inline]
    pub const fn bits(&self) -> usize {
        BITS
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        BITS == 0
    }

    /// Mask selecting the padding bits of the most significant byte.
    #[inline]
    pub fn padding_mask() -> u8 {
        let padding = Self::PADDING as u32;
        interval_mask::<u8>(0, padding, BITS_PER_BYTE as u32 - padding)
    }

    pub fn bytes(&self) -> &ByteView<B, O> {
        &self.bytes
    }

    pub fn into_inner(self) -> B {
        self.bytes.into_inner()
    }

    pub fn into_byte_view(self) -> ByteView<B, O> {
        self.bytes
    }

    /// Wraps a byte view whose length was already checked against `BITS`.
    pub(crate) fn from_sized(bytes: ByteView<B, O>) -> Self {
        debug_assert_eq!(bytes.len(), Self::BYTES);
        Self { bytes }
    }

    #[inline]
    fn byte_index(i: usize) -> usize {
        i / BITS_PER_BYTE
    }

    #[inline]
    fn bit_flag(i: usize) -> u8 {
        1 << (i % BITS_PER_BYTE)
    }

    #[inline]
    fn check_bit(i: usize) -> Result<()> {
        if i >= BITS {
            return Err(Error::BitOutOfRange { index: i, bits: BITS });
        }

        Ok(())
    }

    #[inline]
    fn bit(&self, i: usize) -> bool {
        self.bytes[Self::byte_index(i)] & Self::bit_flag(i) != 0
    }

    /// Reads bit `i` (0 = least significant).
    pub fn get_bit(&self, i: usize) -> Result<bool> {
        Self::check_bit(i)?;
        Ok(self.bit(i))
    }

    /// Converts the view to a primitive integer at least `BITS` wide.
    ///
    /// Signed targets are sign-extended from bit `BITS - 1`, so the result
    /// has the two's-complement meaning of a `BITS`-wide integer rather than
    /// of the padded buffer.
    ///
    /// A target narrower than the view is rejected at build time:
    ///
    /// ```compile_fail
    /// use bitview::{BigEndian, BitView};
    ///
    /// let data = [0u8; 2];
    /// let bits = BitView::<_, BigEndian, 12>::new(&data).unwrap();
    /// let _ = bits.convert::<u8>();
    /// ```
    pub fn convert<T: Integer>(&self) -> T {
        const { assert!(T::BITS as usize >= BITS, "target type is narrower than the view") };

        let Some(msb) = self.bytes.msb() else {
            return T::ZERO;
        };

        let mut result = T::from_byte(!Self::padding_mask() & msb);
        for i in (0..Self::BYTES).rev().skip(1) {
            result = result.wide_shl(BITS_PER_BYTE as u32) | T::from_byte(self.bytes[i]);
        }

        if T::SIGNED {
            sign_extend(result, BITS as u32)
        } else {
            result
        }
    }

    /// Extracts `LENGTH` bits starting `OFFSET` bits above the least
    /// significant end, right-justified in `T`.
    pub fn interval<T: Integer, const LENGTH: usize, const OFFSET: usize>(&self) -> T {
        const {
            assert!(LENGTH <= T::BITS as usize, "interval is wider than the target type");
            assert!(LENGTH + OFFSET <= BITS, "interval reaches past the view");
        };

        self.extract(LENGTH, OFFSET)
    }

    /// Runtime-width form of [`BitView::interval`].
    pub fn try_interval<T: Integer>(&self, length: usize, offset: usize) -> Result<T> {
        if length > T::BITS as usize {
            return Err(Error::TooManyBits {
                requested: length,
                max: T::BITS as usize,
            });
        }

        if offset.checked_add(length).map_or(true, |end| end > BITS) {
            return Err(Error::IntervalOutOfRange {
                length,
                offset,
                bits: BITS,
            });
        }

        Ok(self.extract(length, offset))
    }

    fn extract<T: Integer>(&self, length: usize, offset: usize) -> T {
        if length == 0 {
            return T::ZERO;
        }

        let first = Self::byte_index(offset);
        let last = Self::byte_index(offset + length - 1);
        let low_shift = offset % BITS_PER_BYTE;

        if first == last {
            let byte = (self.bytes[first] >> low_shift) & low_bits_mask(length);
            return T::from_byte(byte);
        }

        // Bits of the interval held by the most significant byte it touches.
        let high_len = offset + length - last * BITS_PER_BYTE;
        let mut result = T::from_byte(self.bytes[last] & low_bits_mask(high_len));

        for i in (first + 1..last).rev() {
            result = result.wide_shl(BITS_PER_BYTE as u32) | T::from_byte(self.bytes[i]);
        }

        let low_len = BITS_PER_BYTE - low_shift;
        result.wide_shl(low_len as u32) | T::from_byte(self.bytes[first] >> low_shift)
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>, O: ByteOrder, const BITS: usize> BitView<B, O, BITS> {
    /// Wraps `data` and stores `value` into it.
    pub fn with_value<T: Integer>(data: B, value: T) -> Result<Self> {
        let mut view = Self::new(data)?;
        view.store(value)?;
        Ok(view)
    }

    pub fn bytes_mut(&mut self) -> &mut ByteView<B, O> {
        &mut self.bytes
    }

    pub fn set_bit_on(&mut self, i: usize) -> Result<()> {
        Self::check_bit(i)?;
        self.bytes[Self::byte_index(i)] |= Self::bit_flag(i);
        Ok(())
    }

    pub fn set_bit_off(&mut self, i: usize) -> Result<()> {
        Self::check_bit(i)?;
        self.bytes[Self::byte_index(i)] &= !Self::bit_flag(i);
        Ok(())
    }

    pub fn set_bit(&mut self, i: usize, value: bool) -> Result<()> {
        if value {
            self.set_bit_on(i)
        } else {
            self.set_bit_off(i)
        }
    }

    /// Writes `value` into the view in the view's byte order and clears the
    /// padding. Fails, leaving the buffer untouched, if `value` is not
    /// representable in `BITS` bits.
    pub fn store<T: Integer>(&mut self, value: T) -> Result<()> {
        if !fits_in_bits(value, BITS as u32) {
            return Err(Error::ValueOutOfRange { bits: BITS });
        }

        for i in 0..Self::BYTES {
            self.bytes[i] = value.byte(i as u32);
        }
        self.clear_padding();

        Ok(())
    }

    /// Negates the value in place (two's complement).
    ///
    /// Padding is cleared afterwards. The most negative value negates to
    /// itself.
    pub fn twos_complement(&mut self) {
        let mut carry = true;
        for i in 0..Self::BYTES {
            let (sum, overflow) = (!self.bytes[i]).overflowing_add(carry as u8);
            self.bytes[i] = sum;
            carry = overflow;
        }

        self.clear_padding();
    }

    fn clear_padding(&mut self) {
        let mask = Self::padding_mask();
        if let Some(msb) = self.bytes.msb_mut() {
            *msb &= !mask;
        }
    }
}

/// Mask of the low `n` bits of a byte, `n` in `1..=8`.
#[inline]
fn low_bits_mask(n: usize) -> u8 {
    let n = n as u32;
    interval_mask::<u8>(BITS_PER_BYTE as u32 - n, n, 0)
}

/// `'0'`/`'1'` per bit, most significant first.
impl<B: AsRef<[u8]>, O: ByteOrder, const BITS: usize> fmt::Display for BitView<B, O, BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..BITS).rev() {
            f.write_str(if self.bit(i) { "1" } else { "0" })?;
        }

        Ok(())
    }
}

impl<B: AsRef<[u8]>, O: ByteOrder, const BITS: usize> fmt::Debug for BitView<B, O, BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitView")
            .field("endianness", &O::ENDIANNESS)
            .field("bits", &BITS)
            .field("value", &format_args!("{self}"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{BigEndian, LittleEndian};

    type BitView12<'a> = BitView<&'a mut [u8; 2], BigEndian, 12>;

    #[test]
    fn test_constants() {
        assert_eq!(BitView12::BYTES, 2);
        assert_eq!(BitView12::PADDING, 4);
        assert_eq!(BitView12::padding_mask(), 0b1111_0000);
        assert_eq!(BitView::<&[u8], BigEndian, 16>::padding_mask(), 0);
        assert_eq!(BitView::<&[u8], BigEndian, 0>::BYTES, 0);
    }

    #[test]
    fn test_new_rejects_wrong_size() {
        let data = [0u8; 3];
        assert_eq!(
            BitView::<_, BigEndian, 12>::new(&data[..]).unwrap_err(),
            Error::BufferSize {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_get_set_bit() {
        let mut data = [0b0100_0110, 0b0001_1110];
        let mut bits = BitView12::new(&mut data).unwrap();

        assert!(!bits.get_bit(0).unwrap());
        assert!(bits.get_bit(1).unwrap());
        assert!(bits.get_bit(2).unwrap());
        assert!(!bits.get_bit(6).unwrap());
        assert!(!bits.get_bit(8).unwrap());
        assert!(bits.get_bit(9).unwrap());
        assert!(!bits.get_bit(11).unwrap());

        bits.set_bit_on(7).unwrap();
        assert!(bits.get_bit(7).unwrap());

        bits.set_bit_off(3).unwrap();
        assert!(!bits.get_bit(3).unwrap());

        bits.set_bit(4, true).unwrap();
        assert!(bits.get_bit(4).unwrap());
        bits.set_bit(4, false).unwrap();
        assert!(!bits.get_bit(4).unwrap());
    }

    #[test]
    fn test_bit_out_of_range() {
        let mut data = [0u8; 2];
        let mut bits = BitView12::new(&mut data).unwrap();
        assert_eq!(
            bits.get_bit(12).unwrap_err(),
            Error::BitOutOfRange { index: 12, bits: 12 }
        );
        assert!(bits.set_bit(15, true).is_err());
        assert_eq!(data, [0, 0]);
    }

    #[test]
    fn test_convert_small() {
        let data = [0b0000_0101];
        let bits = BitView::<_, LittleEndian, 4>::new(&data).unwrap();
        assert_eq!(bits.convert::<u8>(), 5);
        assert_eq!(bits.convert::<i8>(), 5);

        let data = [0b0000_1101];
        let bits = BitView::<_, LittleEndian, 4>::new(&data).unwrap();
        assert_eq!(bits.convert::<u8>(), 13);
        assert_eq!(bits.convert::<i8>(), -3);
    }

    #[test]
    fn test_convert_large() {
        let data = [0b0000_0100, 0b1010_1110];
        let bits = BitView::<_, BigEndian, 12>::new(&data).unwrap();
        assert_eq!(bits.convert::<u16>(), 1198);
        assert_eq!(bits.convert::<i16>(), 1198);
        assert_eq!(bits.convert::<u64>(), 1198);
        assert_eq!(bits.convert::<i64>(), 1198);

        let data = [0b0000_1100, 0b1010_1110];
        let bits = BitView::<_, BigEndian, 12>::new(&data).unwrap();
        assert_eq!(bits.convert::<u16>(), 3246);
        assert_eq!(bits.convert::<i16>(), -850);
        assert_eq!(bits.convert::<u32>(), 3246);
        assert_eq!(bits.convert::<i32>(), -850);
        assert_eq!(bits.convert::<i128>(), -850);
    }

    #[test]
    fn test_byte_aligned_widths() {
        let data = [0x80];
        let bits = BitView::<_, BigEndian, 8>::new(&data).unwrap();
        assert_eq!(BitView::<&[u8; 1], BigEndian, 8>::padding_mask(), 0);
        assert_eq!(bits.convert::<i8>(), -128);
        assert_eq!(bits.convert::<u8>(), 0x80);
        assert_eq!(bits.convert::<i32>(), -128);

        let mut data = [0u8; 4];
        let bits = BitView::<_, LittleEndian, 32>::with_value(&mut data, 7u32).unwrap();
        assert_eq!(bits.convert::<u32>(), 7);

        let mut data = [0u8; 2];
        let mut bits = BitView::<_, BigEndian, 16>::with_value(&mut data, -300i16).unwrap();
        bits.twos_complement();
        assert_eq!(bits.convert::<i16>(), 300);
        assert_eq!(data, [0x01, 0x2C]);
    }

    #[test]
    fn test_convert_ignores_padding() {
        let data = [0b1111_0100, 0b1010_1110];
        let bits = BitView::<_, BigEndian, 12>::new(&data).unwrap();
        assert_eq!(bits.convert::<u16>(), 1198);
        assert_eq!(bits.convert::<i16>(), 1198);
    }

    #[test]
    fn test_convert_zero_width() {
        let data: [u8; 0] = [];
        let bits = BitView::<_, BigEndian, 0>::new(&data).unwrap();
        assert_eq!(bits.convert::<i32>(), 0);
        assert_eq!(bits.to_string(), "");
    }

    #[test]
    fn test_store() {
        let mut data = [0u8; 4];
        let bits = BitView::<_, LittleEndian, 32>::with_value(&mut data, 0x3F2A_8817u32).unwrap();
        assert_eq!(bits.convert::<u32>(), 0x3F2A_8817);
        assert_eq!(data, [0x17, 0x88, 0x2A, 0x3F]);

        let mut data = [0u8; 2];
        let bits = BitView::<_, BigEndian, 12>::with_value(&mut data, -850i16).unwrap();
        assert_eq!(bits.convert::<i16>(), -850);
        assert_eq!(data, [0b0000_1100, 0b1010_1110]);
    }

    #[test]
    fn test_store_rejects_wide_values() {
        let mut data = [0xAAu8; 2];
        let mut bits = BitView::<_, BigEndian, 12>::new(&mut data).unwrap();
        assert_eq!(
            bits.store(4096u16).unwrap_err(),
            Error::ValueOutOfRange { bits: 12 }
        );
        assert!(bits.store(-2049i32).is_err());
        assert_eq!(data, [0xAA, 0xAA]);
    }

    #[test]
    fn test_twos_complement() {
        let mut data = [0b0000_1100, 0b1010_1110];
        let mut bits = BitView::<_, BigEndian, 12>::new(&mut data).unwrap();
        bits.twos_complement();
        assert_eq!(bits.convert::<i16>(), 850);
        assert_eq!(data, [0b0000_0011, 0b0101_0010]);
    }

    #[test]
    fn test_twos_complement_clears_padding() {
        let mut data = [0u8; 2];
        let mut bits = BitView::<_, BigEndian, 12>::with_value(&mut data, 1i16).unwrap();
        bits.twos_complement();
        assert_eq!(bits.convert::<i16>(), -1);
        assert_eq!(data, [0x0F, 0xFF]);
    }

    #[test]
    fn test_twos_complement_min_value() {
        let mut data = [0u8; 2];
        let mut bits = BitView::<_, BigEndian, 12>::with_value(&mut data, -2048i16).unwrap();
        bits.twos_complement();
        assert_eq!(bits.convert::<i16>(), -2048);
    }

    #[test]
    fn test_interval() {
        let data = [0b1011_0110, 0b0111_0001];

        let bits = BitView::<_, BigEndian, 12>::new(&data).unwrap();
        assert_eq!(bits.interval::<u16, 4, 8>(), 0b0110);
        assert_eq!(bits.interval::<u16, 7, 3>(), 0b100_1110);

        let bits16 = BitView::<_, BigEndian, 16>::new(&data).unwrap();
        assert_eq!(bits16.interval::<u16, 1, 0>(), 0b1);
        assert_eq!(bits16.interval::<u16, 8, 0>(), 0b0111_0001);
        assert_eq!(bits16.interval::<u16, 8, 8>(), 0b1011_0110);
        assert_eq!(bits16.interval::<u16, 16, 0>(), 0b1011_0110_0111_0001);
        assert_eq!(bits16.interval::<u8, 8, 4>(), 0b0110_0111);
        assert_eq!(bits16.interval::<u8, 0, 16>(), 0);
    }

    #[test]
    fn test_interval_spanning_interior_bytes() {
        let data = [0x12, 0x34, 0x56, 0x78];
        let bits = BitView::<_, BigEndian, 32>::new(&data).unwrap();
        assert_eq!(bits.interval::<u32, 24, 4>(), 0x23_4567);
        assert_eq!(bits.interval::<u32, 20, 12>(), 0x1_2345);
        assert_eq!(bits.interval::<u32, 32, 0>(), 0x1234_5678);

        let bits = BitView::<_, LittleEndian, 32>::new(&data).unwrap();
        assert_eq!(bits.interval::<u32, 16, 8>(), 0x5634);
    }

    #[test]
    fn test_try_interval() {
        let data = [0b1011_0110, 0b0111_0001];
        let bits = BitView::<_, BigEndian, 12>::new(&data).unwrap();
        assert_eq!(bits.try_interval::<u16>(7, 3).unwrap(), 0b100_1110);
        assert_eq!(
            bits.try_interval::<u16>(4, 9).unwrap_err(),
            Error::IntervalOutOfRange {
                length: 4,
                offset: 9,
                bits: 12
            }
        );
        assert_eq!(
            bits.try_interval::<u8>(9, 0).unwrap_err(),
            Error::TooManyBits {
                requested: 9,
                max: 8
            }
        );
        assert!(bits.try_interval::<u8>(1, usize::MAX).is_err());
    }

    #[test]
    fn test_display() {
        let data = [0b0000_1010, 0b1101_0111];
        let bits = BitView::<_, BigEndian, 12>::new(&data).unwrap();
        assert_eq!(bits.to_string(), "101011010111");
    }
}
