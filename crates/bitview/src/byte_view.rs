//! Order-aware byte indexing over a borrowed buffer.

use std::{
    fmt,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use crate::{
    errors::{Error, Result},
    order::{ByteOrder, Endianness},
};

/// A view over a fixed-size byte buffer addressed by logical byte index.
///
/// Index 0 is always the least significant byte; the byte order `O` decides
/// where that byte physically lives. `B` is the storage, usually `&[u8]` or
/// `&mut [u8]`; writing requires `B: AsMut<[u8]>`.
///
/// The view does not synchronize access to the buffer. Sharing one buffer
/// between threads that mutate it is the caller's problem.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteView<B, O> {
    data: B,
    _order: PhantomData<O>,
}

impl<B: AsRef<[u8]>, O: ByteOrder> ByteView<B, O> {
    pub fn new(data: B) -> Self {
        Self {
            data,
            _order: PhantomData,
        }
    }

    /// Number of bytes in the view.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.as_ref().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn endianness(&self) -> Endianness {
        O::ENDIANNESS
    }

    /// Physical buffer offset of logical byte `index`.
    #[inline]
    fn offset(&self, index: usize) -> Result<usize> {
        let len = self.len();
        if index >= len {
            return Err(Error::ByteOutOfRange { index, len });
        }

        Ok(O::ENDIANNESS.offset(index, len))
    }

    /// Reads the byte at logical index `index`.
    pub fn get(&self, index: usize) -> Result<u8> {
        let offset = self.offset(index)?;
        Ok(self.data.as_ref()[offset])
    }

    /// Least significant byte, `None` for an empty view.
    pub fn lsb(&self) -> Option<u8> {
        self.get(0).ok()
    }

    /// Most significant byte, `None` for an empty view.
    pub fn msb(&self) -> Option<u8> {
        self.get(self.len().checked_sub(1)?).ok()
    }

    /// Raw bytes in physical order.
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_ref()
    }

    pub fn into_inner(self) -> B {
        self.data
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>, O: ByteOrder> ByteView<B, O> {
    /// Writes `value` to logical byte `index`.
    pub fn set(&mut self, index: usize, value: u8) -> Result<()> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut u8> {
        let offset = self.offset(index)?;
        Ok(&mut self.data.as_mut()[offset])
    }

    pub fn lsb_mut(&mut self) -> Option<&mut u8> {
        self.get_mut(0).ok()
    }

    pub fn msb_mut(&mut self) -> Option<&mut u8> {
        let index = self.len().checked_sub(1)?;
        self.get_mut(index).ok()
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.data.as_mut()
    }
}

impl<B: AsRef<[u8]>, O: ByteOrder> Index<usize> for ByteView<B, O> {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        match self.offset(index) {
            Ok(offset) => &self.data.as_ref()[offset],
            Err(e) => panic!("{e}"),
        }
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>, O: ByteOrder> IndexMut<usize> for ByteView<B, O> {
    fn index_mut(&mut self, index: usize) -> &mut u8 {
        match self.get_mut(index) {
            Ok(byte) => byte,
            Err(e) => panic!("{e}"),
        }
    }
}

/// Hexadecimal, most significant byte first, e.g. `0x0ad7`.
impl<B: AsRef<[u8]>, O: ByteOrder> fmt::Display for ByteView<B, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for i in (0..self.len()).rev() {
            write!(f, "{:02x}", self[i])?;
        }

        Ok(())
    }
}

impl<B: AsRef<[u8]>, O: ByteOrder> fmt::Debug for ByteView<B, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteView")
            .field("endianness", &O::ENDIANNESS)
            .field("value", &format_args!("{self}"))
            .finish()
    }
}
