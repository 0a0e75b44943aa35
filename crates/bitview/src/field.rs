//! Fields that can be packed into, or unpacked from, a contiguous bit string.

use crate::{
    bit_view::BitView,
    bits::BITS_PER_BYTE,
    errors::{Error, Result},
    order::ByteOrder,
};

/// A run of bits of known width that the packer can read in small chunks.
pub trait Field {
    /// Width of the field in bits.
    fn width(&self) -> usize;

    /// Reads `length` bits (at most 8) starting `offset` bits above the least
    /// significant end, right-justified.
    fn read_bits(&self, length: usize, offset: usize) -> Result<u8>;
}

/// A [`Field`] the unpacker can write back into.
pub trait FieldMut: Field {
    /// Writes the low `length` bits of `bits` (at most 8) starting `offset`
    /// bits above the least significant end.
    fn write_bits(&mut self, length: usize, offset: usize, bits: u8) -> Result<()>;
}

impl<B: AsRef<[u8]>, O: ByteOrder, const BITS: usize> Field for BitView<B, O, BITS> {
    fn width(&self) -> usize {
        BITS
    }

    fn read_bits(&self, length: usize, offset: usize) -> Result<u8> {
        self.try_interval(length, offset)
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>, O: ByteOrder, const BITS: usize> FieldMut
    for BitView<B, O, BITS>
{
    fn write_bits(&mut self, length: usize, offset: usize, bits: u8) -> Result<()> {
        if length > BITS_PER_BYTE {
            return Err(Error::TooManyBits {
                requested: length,
                max: BITS_PER_BYTE,
            });
        }
        if offset.checked_add(length).map_or(true, |end| end > BITS) {
            return Err(Error::IntervalOutOfRange {
                length,
                offset,
                bits: BITS,
            });
        }

        for k in 0..length {
            self.set_bit(offset + k, (bits >> k) & 1 != 0)?;
        }

        Ok(())
    }
}
