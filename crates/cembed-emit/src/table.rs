use std::io::Write;

use crate::error::Result;
use crate::options::EmbedOptions;
use crate::transcode::EmbedRecord;

/// Emit the correlation table for all processed files.
///
/// One `{ filename, data, size }` entry per record in command-line order,
/// closed by an all-zero sentinel. With the zero terminator enabled the
/// size expression subtracts one so it reflects the original byte count.
pub fn write_table<W: Write>(
    out: &mut W,
    name: &str,
    records: &[EmbedRecord],
    options: &EmbedOptions,
) -> Result<()> {
    if !options.no_static {
        out.write_all(b"static ")?;
    }
    writeln!(
        out,
        "struct {{ char *filename; unsigned char *data; int size; }} {name}[] = {{"
    )?;
    for record in records {
        write!(
            out,
            "{{ \"{}\", {}, (int) sizeof({})",
            record.filename, record.identifier, record.identifier
        )?;
        if options.zero_terminator {
            out.write_all(b" - 1")?;
        }
        out.write_all(b" },\n")?;
    }
    writeln!(out, "{{ 0 }}")?;
    writeln!(out, "}};")?;
    Ok(())
}
