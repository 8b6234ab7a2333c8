use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::CompareOptions;
use crate::error::{FixtureError, Result};
use crate::source::{BufferSource, ByteSource, FileSource, Next, StreamSource};

/// Compares `candidate` byte by byte with the reference file `want`.
///
/// The first difference ends the comparison. For candidates that keep
/// evidence, the divergent byte and everything after it are written to
/// `opts.dump_path(id)` before the error is returned. Failing to write that
/// file is only logged and never hides the difference.
pub fn compare<S: ByteSource + ?Sized>(
    candidate: &mut S,
    want: &Path,
    opts: &CompareOptions,
    id: &str,
) -> Result<()> {
    let mut reference = FileSource::open(want)?;
    let candidate_err = |e| FixtureError::io(Path::new(id), e);

    let mut offset: u64 = 0;
    let mut candidate_done = false;
    loop {
        let (expected, reference_done) =
            match reference.next_byte().map_err(|e| FixtureError::io(want, e))? {
                Next::End => break,
                Next::Byte(b) => (b, false),
                Next::Last(b) => (b, true),
            };

        let actual = if candidate_done {
            None
        } else {
            match candidate.next_byte().map_err(candidate_err)? {
                Next::End => None,
                Next::Byte(b) => Some(b),
                Next::Last(b) => {
                    debug!("{id}: last byte returned with end of input at {offset}");
                    candidate_done = true;
                    Some(b)
                }
            }
        };

        let Some(actual) = actual else {
            let missing = 1 + reference
                .drain_into(&mut io::sink())
                .map_err(|e| FixtureError::io(want, e))?;
            dump(candidate, &[], opts, id)?;
            return Err(FixtureError::CandidateTooShort { missing });
        };

        if actual != expected {
            dump(candidate, &[actual], opts, id)?;
            return Err(FixtureError::PositionMismatch {
                offset,
                expected,
                actual,
            });
        }
        offset += 1;
        if reference_done {
            break;
        }
    }

    if candidate_done {
        return Ok(());
    }
    match candidate.next_byte().map_err(candidate_err)? {
        Next::End => Ok(()),
        Next::Byte(b) | Next::Last(b) => {
            let excess = 1 + dump(candidate, &[b], opts, id)?;
            Err(FixtureError::CandidateTooLong { excess })
        }
    }
}

// Keeps counting what the candidate hands over after the dump file failed,
// so the divergence can still be reported with exact byte counts.
struct Evidence {
    out: Option<BufWriter<File>>,
    failure: Option<io::Error>,
    written: u64,
}

impl Evidence {
    fn record(&mut self, e: io::Error) {
        self.out = None;
        self.failure.get_or_insert(e);
    }
}

impl Write for Evidence {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written += buf.len() as u64;
        if let Some(out) = self.out.as_mut() {
            if let Err(e) = out.write_all(buf) {
                self.record(e);
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(out) = self.out.as_mut() {
            if let Err(e) = out.flush() {
                self.record(e);
            }
        }
        Ok(())
    }
}

// Returns the number of bytes drained from the candidate, `head` excluded.
// A dump that cannot be written is logged; only reading the candidate can fail.
fn dump<S: ByteSource + ?Sized>(
    candidate: &mut S,
    head: &[u8],
    opts: &CompareOptions,
    id: &str,
) -> Result<u64> {
    let candidate_err = |e| FixtureError::io(Path::new(id), e);
    if !candidate.keeps_evidence() {
        return candidate
            .drain_into(&mut io::sink())
            .map_err(candidate_err);
    }

    let path = opts.dump_path(id);
    let mut evidence = match File::create(&path) {
        Ok(file) => Evidence {
            out: Some(BufWriter::new(file)),
            failure: None,
            written: 0,
        },
        Err(e) => Evidence {
            out: None,
            failure: Some(e),
            written: 0,
        },
    };
    evidence.write_all(head).map_err(candidate_err)?;
    let drained = candidate.drain_into(&mut evidence).map_err(candidate_err)?;
    evidence.flush().map_err(candidate_err)?;

    match evidence.failure {
        Some(e) => warn!("{id}: got content could not be written to {path:?}: {e}"),
        None => info!(
            "{id}: {} byte(s) of got content written to {path:?}",
            evidence.written
        ),
    }
    Ok(drained)
}

/// Compares two files on disk. Nothing is dumped on divergence.
pub fn compare_files(got: &Path, want: &Path) -> Result<()> {
    let mut candidate = FileSource::open(got)?;
    let id = got.to_string_lossy().into_owned();
    compare(&mut candidate, want, &CompareOptions::default(), &id)
}

/// Compares an in-memory buffer, consuming it as far as the comparison went.
pub fn compare_buffer(
    got: &mut BufferSource,
    want: &Path,
    opts: &CompareOptions,
    id: &str,
) -> Result<()> {
    compare(got, want, opts, id)
}

/// Compares a forward-only stream such as a response body.
pub fn compare_stream<R: Read>(
    got: R,
    want: &Path,
    opts: &CompareOptions,
    id: &str,
) -> Result<()> {
    compare(&mut StreamSource::new(got), want, opts, id)
}
