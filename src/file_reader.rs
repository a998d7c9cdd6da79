//! Catalogue source reader with transparent gzip decompression
//!
//! Catalogues are often shipped compressed. [`open`] returns a buffered
//! reader that decompresses when the file is gzip, detected either by a
//! `.gz` extension or by the gzip magic bytes at the start of the file.
//! The path `-` reads from stdin.
//!
//! ```rust,no_run
//! use netblock::file_reader;
//!
//! let reader = file_reader::open("prefixes.json.gz")?;
//! let source: serde_json::Value = serde_json::from_reader(reader)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, stdin, BufRead, BufReader};
use std::path::Path;

/// Buffer size for catalogue reading (64KB)
const BUFFER_SIZE: usize = 64 * 1024;

/// First two bytes of every gzip member
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Open a catalogue source, decompressing gzip input
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read. Corrupt gzip data
/// surfaces later, as read errors from the returned reader.
pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead + Send>> {
    let path = path.as_ref();

    if path.to_str() == Some("-") {
        return Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, stdin())));
    }

    let has_gz_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    let mut reader = BufReader::with_capacity(BUFFER_SIZE, File::open(path)?);
    let is_gzip = has_gz_extension || reader.fill_buf()?.starts_with(&GZIP_MAGIC);

    if is_gzip {
        Ok(Box::new(BufReader::with_capacity(
            BUFFER_SIZE,
            GzDecoder::new(reader),
        )))
    } else {
        Ok(Box::new(reader))
    }
}
