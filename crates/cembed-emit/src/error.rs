/// Errors that can occur while embedding files.
#[derive(Debug, thiserror::Error)]
pub enum EmbedError {
    /// The input file could not be opened.
    #[error("failed to open file '{path}': {source}")]
    OpenInput {
        path: String,
        source: std::io::Error,
    },

    /// Two input files resolved to the same generated identifier.
    #[error("duplicate identifier '{identifier}' generated for '{first}' and '{second}'")]
    DuplicateIdentifier {
        identifier: String,
        first: String,
        second: String,
    },

    /// An I/O error occurred while reading input or writing output.
    #[error("embed I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EmbedError>;
