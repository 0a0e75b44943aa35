//! Error types for view construction, bit access and field packing.

use thiserror::Error;

/// Errors produced when a view, interval or packed field set violates its
/// width or range preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Logical byte index is outside `[0, len)`.
    #[error("byte index {index} out of range for a {len}-byte view")]
    ByteOutOfRange { index: usize, len: usize },

    /// Logical bit index is outside `[0, bits)`.
    #[error("bit index {index} out of range for a {bits}-bit view")]
    BitOutOfRange { index: usize, bits: usize },

    /// Buffer handed to a view does not hold exactly the bytes the view needs.
    #[error("buffer holds {actual} bytes, view requires exactly {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// Requested interval reaches past the end of the view.
    #[error("interval of {length} bits at offset {offset} exceeds a {bits}-bit view")]
    IntervalOutOfRange {
        length: usize,
        offset: usize,
        bits: usize,
    },

    /// More bits were requested in a single read than the target holds.
    #[error("cannot read {requested} bits at once, at most {max} fit")]
    TooManyBits { requested: usize, max: usize },

    /// Sum of field widths does not match the packed buffer capacity.
    #[error("fields total {fields} bits but the buffer holds {capacity}")]
    WidthMismatch { fields: usize, capacity: usize },

    /// Value is not representable in the view's bit width.
    #[error("value does not fit in {bits} bits")]
    ValueOutOfRange { bits: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
