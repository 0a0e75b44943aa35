//! # bitview
//!
//! Fixed-width bit views over byte buffers, for hardware registers, protocol
//! fields and other non-byte-aligned formats.
//!
//! A [`ByteView`] maps logical byte indices (0 = least significant) onto a
//! buffer in a chosen byte order. A [`BitView`] wraps it with a compile-time
//! bit width and exposes bit access, conversion to primitive integers with
//! correct sign extension, two's-complement negation and interval
//! extraction. [`justify`] converts big-endian views to and from packed,
//! gap-free bit strings, and [`pack()`] concatenates fields of independent
//! widths into a byte buffer.
//!
//! Views borrow the caller's buffer and never allocate. They do not
//! synchronize access: concurrent mutation of one buffer from several
//! threads is unsound to rely on and left to the caller to prevent.
//!
//! The `serde` feature derives `Serialize`/`Deserialize` for [`Endianness`].
//! Its tests only build with `cargo test --features serde`.
//!
//! ## Example
//!
//! ```
//! use bitview::{BitView, order::BigEndian, pack::pack};
//!
//! let data = [0b0000_1100, 0b1010_1110];
//! let bits = BitView::<_, BigEndian, 12>::new(&data).unwrap();
//! assert_eq!(bits.convert::<u16>(), 3246);
//! assert_eq!(bits.convert::<i16>(), -850);
//! assert_eq!(bits.interval::<u8, 4, 8>(), 0b1100);
//!
//! let flag = [0b1];
//! let flag = BitView::<_, BigEndian, 1>::new(&flag).unwrap();
//! let word = [0b0101_0101, 0b0101_0101];
//! let word = BitView::<_, BigEndian, 15>::new(&word).unwrap();
//!
//! let mut out = [0u8; 2];
//! pack(&mut out, &[&flag, &word]).unwrap();
//! assert_eq!(out, [0b1101_0101, 0b0101_0101]);
//! ```

pub mod bit_view;
pub mod bits;
pub mod byte_view;
pub mod errors;
pub mod field;
pub mod integer;
pub mod justify;
pub mod order;
pub mod pack;

pub use bit_view::BitView;
pub use byte_view::ByteView;
pub use errors::{Error, Result};
pub use field::{Field, FieldMut};
pub use integer::Integer;
pub use justify::{PackedBits, left_justify, right_justify};
pub use order::{BigEndian, ByteOrder, Endianness, LittleEndian};
pub use pack::{pack, unpack};
