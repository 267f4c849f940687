use std::io::Write;

use crate::channel::ByteWriter;
use crate::error::Result;

/// Emit the decimal rendering of one byte directly into the channel.
///
/// 1-3 ASCII digits, no leading zeros, no intermediate string allocation.
/// Output is identical to the canonical unsigned decimal form of `value`.
pub fn write_decimal<W: Write>(out: &mut ByteWriter<W>, value: u8) -> Result<()> {
    if value >= 100 {
        out.write_byte(b'0' + value / 100)?;
    }
    if value >= 10 {
        out.write_byte(b'0' + (value / 10) % 10)?;
    }
    out.write_byte(b'0' + value % 10)
}
