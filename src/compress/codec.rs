//! Encoders for the supported algorithms.

use std::io::{self, Read, Write};

use flate2::Compression;
use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};

use crate::config::Algorithm;

/// Stream `input` through the `algorithm` encoder into `output`.
///
/// Returns the number of uncompressed bytes read.
pub fn encode<R: Read, W: Write>(
    algorithm: Algorithm,
    level: u32,
    input: &mut R,
    output: W,
) -> io::Result<u64> {
    let level = Compression::new(level);
    match algorithm {
        Algorithm::Gzip => finish(GzEncoder::new(output, level), input, GzEncoder::finish),
        Algorithm::Deflate => finish(ZlibEncoder::new(output, level), input, ZlibEncoder::finish),
        Algorithm::DeflateRaw => {
            finish(DeflateEncoder::new(output, level), input, DeflateEncoder::finish)
        }
    }
}

fn finish<E: Write, W: Write>(
    mut encoder: E,
    input: &mut impl Read,
    done: impl FnOnce(E) -> io::Result<W>,
) -> io::Result<u64> {
    let read = io::copy(input, &mut encoder)?;
    done(encoder)?.flush()?;
    Ok(read)
}
