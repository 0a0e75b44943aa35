//! Conversion between right-justified big-endian views and packed bits.
//!
//! A right-justified [`BitView`] keeps its padding above the most significant
//! data bit. [`PackedBits`] holds the same bits shifted up so the padding sits
//! below the least significant data bit, leaving no gap at the front of the
//! buffer. The two are distinct types over the same storage; the functions
//! here consume one and return the other.

use std::fmt;

use crate::{
    bit_view::BitView,
    bits::{self, BITS_PER_BYTE, containing_size_bytes},
    byte_view::ByteView,
    errors::{Error, Result},
    order::BigEndian,
};

/// `BITS` bits packed from the start of a buffer, most significant first,
/// with any padding at the end.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedBits<B, const BITS: usize> {
    bytes: ByteView<B, BigEndian>,
}

impl<B: AsRef<[u8]>, const BITS: usize> PackedBits<B, BITS> {
    pub const BYTES: usize = containing_size_bytes(BITS);
    pub const PADDING: usize = BITS_PER_BYTE * Self::BYTES - BITS;

    /// Wraps a buffer of exactly [`Self::BYTES`] bytes that already holds
    /// packed bits.
    pub fn new(data: B) -> Result<Self> {
        let bytes = ByteView::new(data);
        if bytes.len() != Self::BYTES {
            return Err(Error::BufferSize {
                expected: Self::BYTES,
                actual: bytes.len(),
            });
        }

        Ok(Self { bytes })
    }

    #[inline]
    pub const fn bits(&self) -> usize {
        BITS
    }

    /// Reads bit `i`, numbered from the least significant data bit like
    /// [`BitView::get_bit`].
    pub fn get_bit(&self, i: usize) -> Result<bool> {
        if i >= BITS {
            return Err(Error::BitOutOfRange { index: i, bits: BITS });
        }

        Ok(self.bit(i))
    }

    fn bit(&self, i: usize) -> bool {
        let pos = i + Self::PADDING;
        self.bytes[pos / BITS_PER_BYTE] & (1 << (pos % BITS_PER_BYTE)) != 0
    }

    /// Raw bytes, first packed bit in the high bit of byte 0.
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_bytes()
    }

    pub fn into_inner(self) -> B {
        self.bytes.into_inner()
    }
}

impl<B: AsRef<[u8]>, const BITS: usize> fmt::Display for PackedBits<B, BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..BITS).rev() {
            f.write_str(if self.bit(i) { "1" } else { "0" })?;
        }

        Ok(())
    }
}

impl<B: AsRef<[u8]>, const BITS: usize> fmt::Debug for PackedBits<B, BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackedBits")
            .field("bits", &BITS)
            .field("value", &format_args!("{self}"))
            .finish()
    }
}

/// Shifts a right-justified view up by its padding so its bits start at the
/// top of the buffer.
pub fn left_justify<B, const BITS: usize>(view: BitView<B, BigEndian, BITS>) -> PackedBits<B, BITS>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    let padding = BitView::<B, BigEndian, BITS>::PADDING as u32;
    let kept = BITS_PER_BYTE as u32 - padding;
    let mut bytes = view.into_byte_view();

    for i in (1..bytes.len()).rev() {
        bytes[i] = bits::left_justify(bytes[i], kept) | bits::right_justify(bytes[i - 1], padding);
    }
    if let Some(lsb) = bytes.lsb_mut() {
        *lsb = bits::left_justify(*lsb, kept);
    }

    log::trace!("left-justified {BITS} bits by {padding}: {bytes}");
    PackedBits { bytes }
}

/// Shifts packed bits down by the padding, producing the canonical
/// right-justified view. Exact inverse of [`left_justify`].
pub fn right_justify<B, const BITS: usize>(packed: PackedBits<B, BITS>) -> BitView<B, BigEndian, BITS>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    let padding = PackedBits::<B, BITS>::PADDING as u32;
    let kept = BITS_PER_BYTE as u32 - padding;
    let mut bytes = packed.bytes;

    for i in 0..bytes.len().saturating_sub(1) {
        bytes[i] = bits::right_justify(bytes[i], kept) | bits::left_justify(bytes[i + 1], padding);
    }
    if let Some(msb) = bytes.msb_mut() {
        *msb = bits::right_justify(*msb, kept);
    }

    log::trace!("right-justified {BITS} bits by {padding}: {bytes}");
    BitView::from_sized(bytes)
}
