//! Per-kind byte-stream writers.
//!
//! Each writer targets any [`Write`] sink and returns the number of bytes it
//! produced. Streamed writers reuse a single buffer of at most `chunk_size`
//! bytes, so peak memory is independent of the requested length.

use std::io::{self, Write};

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use super::kinds::{FIBONACCI_ALPHABET, FIBONACCI_COUNTS, SKEWED_ALPHABET, SKEWED_WEIGHTS};

fn check_chunk_size(chunk_size: usize) -> io::Result<()> {
    if chunk_size == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "chunk size must be non-zero",
        ));
    }
    Ok(())
}

/// Drive `fill` over consecutive chunks until `size` bytes are written.
///
/// `fill` receives the chunk buffer (already sized to the current chunk) and
/// the absolute offset of its first byte.
fn write_chunked<W, F>(out: &mut W, size: u64, chunk_size: usize, mut fill: F) -> io::Result<u64>
where
    W: Write + ?Sized,
    F: FnMut(&mut [u8], u64),
{
    check_chunk_size(chunk_size)?;
    let mut buf = vec![0u8; (chunk_size as u64).min(size) as usize];
    let mut offset = 0u64;
    while offset < size {
        let len = ((size - offset) as usize).min(buf.len());
        let chunk = &mut buf[..len];
        fill(chunk, offset);
        out.write_all(chunk)?;
        offset += len as u64;
    }
    Ok(offset)
}

/// Independent uniform bytes over the full 0..=255 range.
pub fn write_uniform_random<W, R>(
    out: &mut W,
    rng: &mut R,
    size: u64,
    chunk_size: usize,
) -> io::Result<u64>
where
    W: Write + ?Sized,
    R: Rng + ?Sized,
{
    write_chunked(out, size, chunk_size, |chunk, _| rng.fill_bytes(chunk))
}

/// 0x00, 0xFF, 0x00, 0xFF, … for exactly `size` bytes.
///
/// Phase follows the absolute offset, so odd chunk sizes never break the
/// alternation.
pub fn write_alternating<W>(out: &mut W, size: u64, chunk_size: usize) -> io::Result<u64>
where
    W: Write + ?Sized,
{
    write_chunked(out, size, chunk_size, |chunk, offset| {
        for (i, b) in chunk.iter_mut().enumerate() {
            *b = if (offset + i as u64) % 2 == 0 { 0x00 } else { 0xFF };
        }
    })
}

/// Symbols from [`SKEWED_ALPHABET`] drawn independently with
/// [`SKEWED_WEIGHTS`].
pub fn write_geometric_skewed<W, R>(
    out: &mut W,
    rng: &mut R,
    size: u64,
    chunk_size: usize,
) -> io::Result<u64>
where
    W: Write + ?Sized,
    R: Rng + ?Sized,
{
    let dist = WeightedIndex::new(SKEWED_WEIGHTS)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    write_chunked(out, size, chunk_size, |chunk, _| {
        for b in chunk.iter_mut() {
            *b = SKEWED_ALPHABET[dist.sample(rng)];
        }
    })
}

/// Each symbol of [`FIBONACCI_ALPHABET`] written `count * multiplier` times
/// in one contiguous run, in alphabet order.
pub fn write_fibonacci<W>(out: &mut W, multiplier: usize) -> io::Result<u64>
where
    W: Write + ?Sized,
{
    let mut total = 0u64;
    for (&symbol, &count) in FIBONACCI_ALPHABET.iter().zip(FIBONACCI_COUNTS.iter()) {
        let run = vec![symbol; count * multiplier];
        out.write_all(&run)?;
        total += run.len() as u64;
    }
    Ok(total)
}

/// `symbol` repeated `len` times.
pub fn write_single_symbol<W>(
    out: &mut W,
    symbol: u8,
    len: u64,
    chunk_size: usize,
) -> io::Result<u64>
where
    W: Write + ?Sized,
{
    write_chunked(out, len, chunk_size, |chunk, _| chunk.fill(symbol))
}
