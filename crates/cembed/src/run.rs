use std::collections::HashMap;
use std::fs::File;
use std::io::Write;

use cembed_emit::{transcode, write_table, EmbedError, EmbedOptions, EmbedRecord};
use tracing::info;

use crate::exit::{embed_error, io_error, CliError, CliResult, SUCCESS, USAGE};
use crate::Cli;

/// Sequence the transcoder over every input file, then the table emitter.
///
/// Files are processed in command-line order, each fully streamed and closed
/// before the next opens. Output already written when a fatal error occurs
/// is left in place.
pub fn run(cli: &Cli) -> CliResult<i32> {
    if cli.image {
        return Err(CliError::new(
            USAGE,
            "image embedding (-i) is not supported",
        ));
    }
    if cli.name.is_some() && cli.files.len() > 1 {
        return Err(CliError::new(
            USAGE,
            "option '-n' requires exactly one input file",
        ));
    }

    let options = EmbedOptions {
        prefix: cli.prefix.clone().unwrap_or_default(),
        variable_name: cli.name.clone(),
        no_static: cli.no_static,
        zero_terminator: cli.zero_byte,
        debug_load: cli.debug_load,
        table_name: cli.table.clone(),
    };

    let mut out = open_output(cli)?;
    let mut records: Vec<EmbedRecord> = Vec::new();
    let mut seen: HashMap<String, String> = HashMap::new();

    for path in &cli.files {
        let filename = path.to_string_lossy().into_owned();
        let identifier = options.identifier_for(&filename);
        if let Some(first) = seen.get(&identifier) {
            return Err(embed_error(EmbedError::DuplicateIdentifier {
                identifier,
                first: first.clone(),
                second: filename,
            }));
        }
        seen.insert(identifier, filename);

        records.push(transcode(&mut out, path, &options).map_err(embed_error)?);
    }

    if let Some(name) = &options.table_name {
        write_table(&mut out, name, &records, &options).map_err(embed_error)?;
    }

    out.flush()
        .map_err(|err| io_error("failed writing output", err))?;
    info!(files = records.len(), "embedding complete");

    Ok(SUCCESS)
}

fn open_output(cli: &Cli) -> CliResult<Box<dyn Write>> {
    match &cli.output {
        Some(path) => {
            let file = File::create(path).map_err(|err| {
                io_error(
                    &format!("failed to open output file '{}'", path.display()),
                    err,
                )
            })?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}
