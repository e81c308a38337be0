//! FASTQ record type and streaming reader/writer.
//!
//! FASTQ is a four-line record format:
//!
//! ```text
//! @read_name optional description
//! ACGTACGT
//! +
//! IIIIIIII
//! ```
//!
//! The reader is a plain [`Iterator`] over records, so the filter engine and
//! any other consumer stay agnostic to the concrete encoding. Quality is
//! Phred+33: a character's ASCII code minus 33 is its quality score.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use thiserror::Error;

/// Errors that can occur while reading or writing FASTQ.
#[derive(Error, Debug)]
pub enum FastqError {
    #[error("failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("record '{name}': quality length {quality_len} does not match sequence length {sequence_len}")]
    MalformedRecord {
        name: String,
        sequence_len: usize,
        quality_len: usize,
    },

    #[error("expected '@' header at line {0}")]
    MissingHeader(usize),

    #[error("expected '+' separator at line {0}")]
    MissingSeparator(usize),

    #[error("truncated record at line {0}")]
    Truncated(usize),
}

/// Result type for FASTQ operations.
pub type FastqResult<T> = Result<T, FastqError>;

/// A single FASTQ read: name, sequence, and Phred+33 quality string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqRecord {
    /// Read name (header line without the leading '@')
    pub name: String,
    /// The nucleotide sequence
    pub sequence: String,
    /// Phred+33 quality string, same length as the sequence
    pub quality: String,
}

impl FastqRecord {
    /// Creates a new record without shape validation.
    pub fn new(
        name: impl Into<String>,
        sequence: impl Into<String>,
        quality: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            sequence: sequence.into(),
            quality: quality.into(),
        }
    }

    /// Fails with [`FastqError::MalformedRecord`] if the quality string length
    /// differs from the sequence length. Checking up front keeps the average
    /// quality computation honest.
    pub fn validate(&self) -> FastqResult<()> {
        if self.sequence.len() != self.quality.len() {
            return Err(FastqError::MalformedRecord {
                name: self.name.clone(),
                sequence_len: self.sequence.len(),
                quality_len: self.quality.len(),
            });
        }
        Ok(())
    }

    /// Mean Phred+33 quality score over the whole quality string.
    pub fn average_quality(&self) -> f64 {
        average_quality(&self.quality)
    }
}

/// Mean of (ASCII code - 33) over all characters of a Phred+33 quality
/// string. Returns 0.0 for an empty string.
pub fn average_quality(quality: &str) -> f64 {
    if quality.is_empty() {
        return 0.0;
    }
    let total: u64 = quality
        .bytes()
        .map(|b| b.saturating_sub(33) as u64)
        .sum();
    total as f64 / quality.len() as f64
}

/// Streaming FASTQ reader over any buffered source.
pub struct FastqReader<R: BufRead> {
    reader: R,
    line_number: usize,
    done: bool,
}

impl FastqReader<BufReader<File>> {
    /// Opens a FASTQ file for streaming.
    pub fn from_path<P: AsRef<Path>>(path: P) -> FastqResult<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> FastqReader<R> {
    /// Creates a reader from any buffered source.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            done: false,
        }
    }

    /// Reads one line, trimming the trailing newline. Returns None at EOF.
    fn read_line(&mut self) -> FastqResult<Option<String>> {
        let mut line = String::new();
        let n = self.reader.read_line(&mut line)?;
        if n == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    fn read_record(&mut self) -> FastqResult<Option<FastqRecord>> {
        // Tolerate blank lines between records but nowhere else
        let header = loop {
            match self.read_line()? {
                None => return Ok(None),
                Some(line) if line.is_empty() => continue,
                Some(line) => break line,
            }
        };

        let name = header
            .strip_prefix('@')
            .ok_or(FastqError::MissingHeader(self.line_number))?
            .to_string();

        let sequence = self
            .read_line()?
            .ok_or(FastqError::Truncated(self.line_number))?;

        let separator = self
            .read_line()?
            .ok_or(FastqError::Truncated(self.line_number))?;
        if !separator.starts_with('+') {
            return Err(FastqError::MissingSeparator(self.line_number));
        }

        let quality = self
            .read_line()?
            .ok_or(FastqError::Truncated(self.line_number))?;

        let record = FastqRecord::new(name, sequence, quality);
        record.validate()?;
        Ok(Some(record))
    }
}

impl<R: BufRead> Iterator for FastqReader<R> {
    type Item = FastqResult<FastqRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => {
                // Stop after the first error rather than spinning on it
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// FASTQ writer over any sink.
pub struct FastqWriter<W: Write> {
    writer: W,
}

impl FastqWriter<File> {
    /// Creates (truncating) a FASTQ file for writing.
    pub fn create<P: AsRef<Path>>(path: P) -> FastqResult<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> FastqWriter<W> {
    /// Creates a writer over any sink.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes one four-line record.
    pub fn write_record(&mut self, record: &FastqRecord) -> FastqResult<()> {
        writeln!(self.writer, "@{}", record.name)?;
        writeln!(self.writer, "{}", record.sequence)?;
        writeln!(self.writer, "+")?;
        writeln!(self.writer, "{}", record.quality)?;
        Ok(())
    }

    /// Flushes the underlying sink.
    pub fn flush(&mut self) -> FastqResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}
