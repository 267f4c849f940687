use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::channel::{ByteReader, ByteWriter};
use crate::decimal::write_decimal;
use crate::error::{EmbedError, Result};
use crate::options::EmbedOptions;

/// Elements emitted per output line inside an array literal.
pub const BYTES_PER_LINE: u64 = 20;

/// One processed input file, as recorded for the correlation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedRecord {
    /// Filename exactly as given on the command line.
    pub filename: String,
    /// Resolved identifier of the generated array.
    pub identifier: String,
    /// Original byte count, excluding any appended terminator.
    pub size: u64,
}

/// Stream one input file into the output as a C array declaration.
///
/// Emits the optional debug-load block, the declaration header, the
/// comma-separated decimal body (wrapped every [`BYTES_PER_LINE`] elements),
/// the optional zero terminator, and the closing brace. The input handle is
/// released when this returns, on every path.
pub fn transcode<W: Write>(
    out: &mut W,
    path: &Path,
    options: &EmbedOptions,
) -> Result<EmbedRecord> {
    let filename = path.to_string_lossy().into_owned();
    let input = File::open(path).map_err(|source| EmbedError::OpenInput {
        path: filename.clone(),
        source,
    })?;

    let identifier = options.identifier_for(&filename);

    if options.debug_load {
        let size = input.metadata()?.len();
        write_debug_load(out, &filename, &identifier, size, options)?;
    }

    if !options.no_static {
        out.write_all(b"static ")?;
    }
    write!(out, "unsigned char {identifier}[] = {{")?;

    let mut reader = ByteReader::new(input);
    let mut writer = ByteWriter::new(&mut *out);
    let mut count: u64 = 0;

    while let Some(byte) = reader.read_byte()? {
        if count > 0 {
            writer.write_byte(b',')?;
        }
        if count % BYTES_PER_LINE == 0 {
            writer.write_byte(b'\n')?;
        }
        write_decimal(&mut writer, byte)?;
        count += 1;
    }

    if options.zero_terminator {
        // The terminator is not a data byte; the wrap rule does not apply,
        // and an empty file gets a bare `0` with no preceding comma.
        if count > 0 {
            writer.write_byte(b',')?;
        }
        writer.write_byte(b'0')?;
    }

    writer.flush()?;
    out.write_all(b"\n};\n\n")?;

    if options.debug_load {
        out.write_all(b"#endif // _DEBUG\n")?;
    }

    debug!(file = %filename, identifier = %identifier, bytes = count, "embedded file");

    Ok(EmbedRecord {
        filename,
        identifier,
        size: count,
    })
}

/// Emit the `#ifdef _DEBUG` runtime-load alternative for one file.
///
/// The generated program declares an uninitialized array of the file's size
/// and fills it from disk in a constructor, so debug builds skip the large
/// literal. Closed by the `#endif` written after the literal declaration.
fn write_debug_load<W: Write>(
    out: &mut W,
    filename: &str,
    identifier: &str,
    size: u64,
    options: &EmbedOptions,
) -> Result<()> {
    writeln!(out, "#ifdef _DEBUG")?;
    writeln!(out, "#include <assert.h>")?;
    writeln!(out, "#include <stdio.h>")?;
    writeln!(out, "#include <stdlib.h>")?;
    if !options.no_static {
        out.write_all(b"static ")?;
    }
    writeln!(out, "unsigned char {identifier}[{size}];")?;
    writeln!(out, "__attribute__((constructor))")?;
    writeln!(out, "static void __cembed_{identifier}_constructor(void) {{")?;
    writeln!(out, "    FILE* fp = fopen(\"{filename}\", \"rb\");")?;
    writeln!(out, "    assert(fp);")?;
    writeln!(out, "    fread({identifier}, 1, {size}, fp);")?;
    writeln!(out, "    fclose(fp);")?;
    writeln!(out, "}}")?;
    writeln!(out, "#else //_DEBUG")?;
    Ok(())
}
