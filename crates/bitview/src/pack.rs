//! Packing fields of independent widths into a contiguous, MSB-first byte
//! buffer, and splitting such a buffer back into fields.
//!
//! The fields are laid out as if their bit strings were concatenated, first
//! field first, and the result chopped into bytes. The buffer must hold
//! exactly the sum of the field widths.

use crate::{
    bits::{BITS_PER_BYTE, interval_mask},
    errors::{Error, Result},
    field::{Field, FieldMut},
};

fn check_capacity(widths: impl Iterator<Item = usize>, bytes: usize) -> Result<()> {
    let fields: usize = widths.sum();
    let capacity = bytes * BITS_PER_BYTE;

    if fields != capacity {
        return Err(Error::WidthMismatch { fields, capacity });
    }

    Ok(())
}

/// Packs `fields` into `destination`, most significant field first.
///
/// Fails without touching `destination` if the field widths do not add up to
/// its capacity. An error from [`Field::read_bits`] stops packing at that
/// point; bytes completed before it have already been written.
pub fn pack(destination: &mut [u8], fields: &[&dyn Field]) -> Result<()> {
    check_capacity(fields.iter().map(|f| f.width()), destination.len())?;
    log::debug!(
        "Packing {} fields into {} bytes",
        fields.len(),
        destination.len()
    );

    let mut out_index = 0;
    let mut out_free = BITS_PER_BYTE;
    let mut acc = 0u8;

    for field in fields {
        let mut remaining = field.width();

        while remaining > 0 {
            let take = out_free.min(remaining);
            let chunk = field.read_bits(take, remaining - take)?;

            acc = if take == BITS_PER_BYTE {
                chunk
            } else {
                (acc << take) | chunk
            };
            out_free -= take;
            remaining -= take;

            if out_free == 0 {
                log::trace!("Packed byte {out_index}: {acc:#010b}");
                destination[out_index] = acc;
                out_index += 1;
                out_free = BITS_PER_BYTE;
                acc = 0;
            }
        }
    }

    Ok(())
}

/// Splits `source` into `fields`, the inverse of [`pack`].
///
/// Only the data bits of each field are written; padding is left as is.
pub fn unpack(source: &[u8], fields: &mut [&mut dyn FieldMut]) -> Result<()> {
    check_capacity(fields.iter().map(|f| f.width()), source.len())?;
    log::debug!(
        "Unpacking {} bytes into {} fields",
        source.len(),
        fields.len()
    );

    let mut in_index = 0;
    let mut in_avail = BITS_PER_BYTE;

    for field in fields.iter_mut() {
        let mut remaining = field.width();

        while remaining > 0 {
            let take = in_avail.min(remaining);
            let mask = interval_mask::<u8>((BITS_PER_BYTE - take) as u32, take as u32, 0);
            let chunk = (source[in_index] >> (in_avail - take)) & mask;

            field.write_bits(take, remaining - take, chunk)?;
            in_avail -= take;
            remaining -= take;

            if in_avail == 0 {
                log::trace!("Consumed byte {in_index}");
                in_index += 1;
                in_avail = BITS_PER_BYTE;
            }
        }
    }

    Ok(())
}
