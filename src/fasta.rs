//! FASTA reformatting.
//!
//! Re-emits a multi-line FASTA file with each record's sequence flattened to
//! a single line:
//!
//! ```text
//! >seq1 description        >seq1 description
//! ACGT              ==>    ACGTACGT
//! ACGT                     >seq2
//! >seq2                    TTTT
//! TTTT
//! ```
//!
//! The transform is a streaming single pass: headers are kept verbatim
//! (including the leading '>'), sequence lines are trimmed and concatenated.
//! Reformatting an already-one-line file yields identical content.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur during FASTA reformatting.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("failed to read file: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// Derives the default output path: `<input-base>_oneline.<original-extension>`.
///
/// An input without an extension just gets the `_oneline` suffix.
pub fn default_oneline_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{}_oneline.{}", stem, ext.to_string_lossy()),
        None => format!("{}_oneline", stem),
    };
    input.with_file_name(name)
}

/// Flattens multi-line FASTA from `reader` into `writer`, one sequence line
/// per record, preserving record order. Returns the number of records
/// written.
///
/// A record is flushed only once a non-empty sequence has accumulated, so a
/// trailing header with no sequence lines is dropped. That mirrors the
/// behavior this tool replaces; content-bearing records are never lost.
pub fn flatten_fasta<R: BufRead, W: Write>(reader: R, mut writer: W) -> FastaResult<usize> {
    let mut header = String::new();
    let mut sequence = String::new();
    let mut records = 0;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if line.starts_with('>') {
            if !sequence.is_empty() {
                writeln!(writer, "{}", header)?;
                writeln!(writer, "{}", sequence)?;
                records += 1;
            }
            header = line.to_string();
            sequence.clear();
        } else {
            sequence.push_str(line);
        }
    }

    if !sequence.is_empty() {
        writeln!(writer, "{}", header)?;
        writeln!(writer, "{}", sequence)?;
        records += 1;
    }

    Ok(records)
}

/// Converts a multi-line FASTA file to one-line-per-sequence form.
///
/// When `output` is None the result lands next to the input as
/// `<input-base>_oneline.<original-extension>`. Returns the path written.
/// Both handles are closed on exit, including error paths.
pub fn convert_multiline_fasta_to_oneline<P: AsRef<Path>>(
    input: P,
    output: Option<&Path>,
) -> FastaResult<PathBuf> {
    let input = input.as_ref();
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => default_oneline_path(input),
    };

    let reader = BufReader::new(File::open(input)?);
    let mut writer = BufWriter::new(File::create(&output)?);
    flatten_fasta(reader, &mut writer)?;
    writer.flush()?;

    Ok(output)
}
