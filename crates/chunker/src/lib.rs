#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `chunker` converts between a byte stream and a finite sequence of
//! fixed-size chunks. Transfers move [`READ_LENGTH`] bytes at a time and a
//! chunk that comes up short marks the end of the stream. Both directions of
//! the ftpc transfer channel drive this codec: uploads pump a local file into
//! a remote request body with [`copy_chunked`], downloads pump the response
//! stream into a local file the same way, and [`ChunkReader`] serves callers
//! that want the chunks in memory instead.
//!
//! # Design
//!
//! - [`copy_chunked`] reads the source in [`READ_LENGTH`]-sized chunks and
//!   writes each one through, matching the size of the final short chunk
//!   exactly. The internal buffer is allocated once and reused.
//! - [`ChunkReader`] implements [`Iterator`] and yields one freshly allocated
//!   `Vec<u8>` per chunk. The reused internal buffer never aliases a yielded
//!   chunk.
//!
//! # Invariants
//!
//! - Concatenating every yielded chunk reconstructs the source stream byte
//!   for byte.
//! - For a stream of length `N`, the final chunk has length
//!   `N % READ_LENGTH` when that is non-zero; otherwise the final chunk is a
//!   full [`READ_LENGTH`] bytes and iteration ends without a phantom empty
//!   chunk. Detecting the exact-multiple boundary costs one extra zero-length
//!   read after the last full chunk.
//! - A chunk is filled to [`READ_LENGTH`] (or to end of stream) before the
//!   short-chunk test runs, so a transport that returns transient short reads
//!   cannot truncate the stream early.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//!
//! let data = vec![7u8; chunker::READ_LENGTH + 10];
//! let chunks: Vec<_> = chunker::ChunkReader::new(Cursor::new(&data))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(chunks.len(), 2);
//! assert_eq!(chunks[0].len(), chunker::READ_LENGTH);
//! assert_eq!(chunks[1].len(), 10);
//! ```

use std::io::{self, Read, Write};

/// Number of bytes moved per chunk.
///
/// Matches the transfer granularity of the reference channel (3072 bytes per
/// read).
pub const READ_LENGTH: usize = 3072;

/// Reads from `reader` until `buf` is full or the stream ends.
///
/// Returns the number of bytes placed in `buf`. `Interrupted` reads are
/// retried; any other error is returned as-is.
fn fill_chunk<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error) => return Err(error),
        }
    }
    Ok(filled)
}

/// Copies `reader` into `writer` in [`READ_LENGTH`]-sized chunks.
///
/// The loop terminates on the first chunk shorter than [`READ_LENGTH`]; that
/// chunk is written with its exact length. Streams whose length is an exact
/// multiple of the chunk size terminate on the zero-length read that follows
/// the last full chunk.
///
/// Returns the total number of bytes written.
pub fn copy_chunked<R, W>(reader: &mut R, writer: &mut W) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buf = vec![0u8; READ_LENGTH];
    let mut written = 0u64;
    loop {
        let filled = fill_chunk(reader, &mut buf)?;
        writer.write_all(&buf[..filled])?;
        written += filled as u64;
        if filled < READ_LENGTH {
            return Ok(written);
        }
    }
}

/// Iterator over the chunks of a byte stream.
///
/// Each call to [`Iterator::next`] reads up to [`READ_LENGTH`] bytes into a
/// reused internal buffer and yields a freshly allocated copy, so callers may
/// hold every chunk at once without aliasing. Iteration ends after the first
/// short chunk; an empty source yields no chunks at all.
#[derive(Debug)]
pub struct ChunkReader<R> {
    inner: R,
    buf: Vec<u8>,
    done: bool,
}

impl<R: Read> ChunkReader<R> {
    /// Wraps `inner` in a chunk iterator.
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: vec![0u8; READ_LENGTH],
            done: false,
        }
    }

    /// Unwraps the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Iterator for ChunkReader<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match fill_chunk(&mut self.inner, &mut self.buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(filled) => {
                if filled < READ_LENGTH {
                    self.done = true;
                }
                Some(Ok(self.buf[..filled].to_vec()))
            }
            Err(error) => {
                self.done = true;
                Some(Err(error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;

    /// Reader that hands out at most one byte per `read` call.
    struct Trickle<R>(R);

    impl<R: Read> Read for Trickle<R> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let len = buf.len().min(1);
            self.0.read(&mut buf[..len])
        }
    }

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn chunks_reconstruct_source_exactly() {
        let data = pattern(READ_LENGTH * 2 + 100);
        let chunks: Vec<Vec<u8>> = ChunkReader::new(Cursor::new(&data))
            .collect::<io::Result<_>>()
            .expect("chunk read");
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), READ_LENGTH);
        assert_eq!(chunks[1].len(), READ_LENGTH);
        assert_eq!(chunks[2].len(), 100);
        assert_eq!(chunks.concat(), data);
    }

    #[test]
    fn exact_multiple_ends_without_phantom_chunk() {
        let data = pattern(READ_LENGTH * 3);
        let chunks: Vec<Vec<u8>> = ChunkReader::new(Cursor::new(&data))
            .collect::<io::Result<_>>()
            .expect("chunk read");
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|chunk| chunk.len() == READ_LENGTH));
        assert_eq!(chunks.concat(), data);
    }

    #[test]
    fn empty_source_yields_no_chunks() {
        let mut reader = ChunkReader::new(Cursor::new(Vec::new()));
        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
    }

    #[test]
    fn short_source_yields_single_short_chunk() {
        let data = pattern(5);
        let chunks: Vec<Vec<u8>> = ChunkReader::new(Cursor::new(&data))
            .collect::<io::Result<_>>()
            .expect("chunk read");
        assert_eq!(chunks, vec![data]);
    }

    #[test]
    fn trickling_reads_do_not_end_the_stream_early() {
        let data = pattern(READ_LENGTH + 1);
        let chunks: Vec<Vec<u8>> = ChunkReader::new(Trickle(Cursor::new(&data)))
            .collect::<io::Result<_>>()
            .expect("chunk read");
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), READ_LENGTH);
        assert_eq!(chunks[1].len(), 1);
        assert_eq!(chunks.concat(), data);
    }

    #[test]
    fn into_inner_resumes_the_stream_at_the_chunk_boundary() {
        let data = pattern(READ_LENGTH + 9);
        let mut reader = ChunkReader::new(Cursor::new(&data));
        let first = reader.next().expect("chunk").expect("read");
        assert_eq!(first, &data[..READ_LENGTH]);

        let mut rest = Vec::new();
        reader
            .into_inner()
            .read_to_end(&mut rest)
            .expect("read rest");
        assert_eq!(rest, &data[READ_LENGTH..]);
    }

    #[test]
    fn copy_chunked_reports_bytes_written() {
        let data = pattern(READ_LENGTH + 77);
        let mut out = Vec::new();
        let written =
            copy_chunked(&mut Cursor::new(&data), &mut out).expect("copy");
        assert_eq!(written, data.len() as u64);
        assert_eq!(out, data);
    }

    #[test]
    fn copy_chunked_handles_exact_multiple() {
        let data = pattern(READ_LENGTH * 2);
        let mut out = Vec::new();
        let written =
            copy_chunked(&mut Cursor::new(&data), &mut out).expect("copy");
        assert_eq!(written, data.len() as u64);
        assert_eq!(out, data);
    }

    #[test]
    fn copy_chunked_round_trips_through_a_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("payload.bin");
        let data = pattern(READ_LENGTH * 2 + 13);
        fs::write(&path, &data).expect("write payload");

        let mut file = fs::File::open(&path).expect("open payload");
        let mut out = Vec::new();
        copy_chunked(&mut file, &mut out).expect("copy");
        assert_eq!(out, data);
    }

    #[test]
    fn propagates_read_errors() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("wire dropped"))
            }
        }

        let mut reader = ChunkReader::new(Broken);
        let error = reader.next().expect("item").expect_err("error");
        assert_eq!(error.to_string(), "wire dropped");
        assert!(reader.next().is_none());
    }
}
