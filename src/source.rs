//! Opening input sources
//!
//! A source is a named file or stdin. Its first bytes decide whether the
//! aggregator reads the raw lines or a gzip/zstd decoder over them.

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read};

const GZIP_MAGIC: &[u8] = &[0x1F, 0x8B, 0x08];
const ZSTD_MAGIC: &[u8] = &[0x28, 0xB5, 0x2F, 0xFD];

/// Line source handed to the aggregator
pub type SourceReader = Box<dyn BufRead + Send>;

/// How a source's bytes are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Plain,
    Gzip,
    Zstd,
}

impl Encoding {
    /// Decide from the leading bytes; anything unrecognized is plain text
    pub fn sniff(head: &[u8]) -> Self {
        if head.starts_with(GZIP_MAGIC) {
            Encoding::Gzip
        } else if head.starts_with(ZSTD_MAGIC) {
            Encoding::Zstd
        } else {
            Encoding::Plain
        }
    }
}

/// Open the file at `location` as a line source
pub fn open_source(location: &str) -> Result<SourceReader> {
    let file = File::open(location).with_context(|| format!("cannot open '{}'", location))?;
    decode(file).with_context(|| format!("cannot read '{}'", location))
}

/// Wrap an already open stream such as stdin as a line source.
///
/// Up to four bytes are read ahead to pick the encoding and then replayed
/// in front of the rest of the stream.
pub fn decode<R: Read + Send + 'static>(mut reader: R) -> io::Result<SourceReader> {
    let mut head = Vec::with_capacity(ZSTD_MAGIC.len());
    (&mut reader)
        .take(ZSTD_MAGIC.len() as u64)
        .read_to_end(&mut head)?;

    let encoding = Encoding::sniff(&head);
    let stream = Cursor::new(head).chain(reader);
    Ok(match encoding {
        Encoding::Plain => Box::new(BufReader::new(stream)),
        Encoding::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(stream))),
        Encoding::Zstd => Box::new(BufReader::new(zstd::Decoder::new(stream)?)),
    })
}
