//! Byte-exact embedding of binary files as C source arrays.
//!
//! This is the core value-add layer of cembed. Every input file is streamed
//! through a fixed-capacity buffered channel and rendered as:
//! - A `static unsigned char <ident>[] = { ... };` literal array
//! - Optionally a `#ifdef _DEBUG` runtime-load alternative per file
//! - Optionally one correlation table mapping filenames to arrays and sizes
//!
//! No intermediate allocation per byte, no runtime file I/O in the output.

pub mod channel;
pub mod decimal;
pub mod error;
pub mod ident;
pub mod options;
pub mod table;
pub mod transcode;

pub use channel::{ByteReader, ByteWriter, BUFFER_CAPACITY};
pub use decimal::write_decimal;
pub use error::{EmbedError, Result};
pub use ident::sanitize;
pub use options::EmbedOptions;
pub use table::write_table;
pub use transcode::{transcode, EmbedRecord, BYTES_PER_LINE};
