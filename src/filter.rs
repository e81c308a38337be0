//! Quality-based FASTQ filtering.
//!
//! A stateless, order-preserving filter over a stream of reads. Each record
//! is judged by three independent predicates, evaluated cheapest first:
//!
//! 1. sequence length within `length_bounds`
//! 2. GC percentage within `gc_bounds`
//! 3. mean Phred+33 quality at or above `quality_threshold`
//!
//! A record passes iff all three hold. The engine works over any record
//! source: an iterator adapter for in-memory use, and a file variant that
//! streams reader to writer.

use std::io::{BufWriter, Write};
use std::path::Path;

use crate::fastq::{FastqError, FastqReader, FastqRecord, FastqResult, FastqWriter};
use crate::sequence::gc_percent;

/// A closed interval [low, high], inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub low: T,
    pub high: T,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    /// Creates a closed interval.
    pub fn new(low: T, high: T) -> Self {
        Self { low, high }
    }

    /// Returns true iff `value` lies in [low, high].
    pub fn contains(&self, value: T) -> bool {
        self.low <= value && value <= self.high
    }
}

/// A single scalar normalizes to [0, scalar]. Negative scalars are a
/// precondition violation; the resulting interval is simply empty.
impl<T: Default> From<T> for Bounds<T> {
    fn from(high: T) -> Self {
        Self {
            low: T::default(),
            high,
        }
    }
}

/// Filtering criteria for FASTQ reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfig {
    /// GC percentage interval, inclusive
    pub gc_bounds: Bounds<f64>,
    /// Sequence length interval, inclusive
    pub length_bounds: Bounds<usize>,
    /// Minimum mean Phred+33 quality, inclusive
    pub quality_threshold: f64,
}

impl Default for FilterConfig {
    /// Accept everything: GC in [0, 100], length in [0, 2^32], quality >= 0.
    fn default() -> Self {
        Self {
            gc_bounds: Bounds::new(0.0, 100.0),
            length_bounds: Bounds::new(0, 1 << 32),
            quality_threshold: 0.0,
        }
    }
}

impl FilterConfig {
    /// Returns true iff the record passes all three predicates.
    ///
    /// Checks run cheapest first and short-circuit on the first failure.
    pub fn passes(&self, record: &FastqRecord) -> bool {
        self.length_bounds.contains(record.sequence.len())
            && self.gc_bounds.contains(gc_percent(&record.sequence))
            && record.average_quality() >= self.quality_threshold
    }
}

/// Filters an in-memory record source, preserving input order.
///
/// Records with identical names are treated independently; nothing is
/// deduplicated or reordered.
pub fn filter_records<I>(records: I, config: &FilterConfig) -> impl Iterator<Item = FastqRecord>
where
    I: IntoIterator<Item = FastqRecord>,
{
    let config = *config;
    records.into_iter().filter(move |r| config.passes(r))
}

/// Streams a FASTQ file through the filter, writing accepted records to
/// `output` in source order.
///
/// Returns (records read, records written). Both handles are closed on exit,
/// including error paths.
pub fn filter_fastq_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    config: &FilterConfig,
) -> FastqResult<(usize, usize)> {
    let reader = FastqReader::from_path(input)?;
    let file = std::fs::File::create(output)?;
    let mut writer = FastqWriter::new(BufWriter::new(file));
    let (read, written) = filter_stream(reader, &mut writer, config)?;
    writer.flush()?;
    Ok((read, written))
}

/// Core engine: filters any fallible record source into any sink.
pub fn filter_stream<I, W>(
    records: I,
    writer: &mut FastqWriter<W>,
    config: &FilterConfig,
) -> FastqResult<(usize, usize)>
where
    I: IntoIterator<Item = Result<FastqRecord, FastqError>>,
    W: Write,
{
    let mut read = 0;
    let mut written = 0;
    for record in records {
        let record = record?;
        read += 1;
        if config.passes(&record) {
            writer.write_record(&record)?;
            written += 1;
        }
    }
    Ok((read, written))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::fastq::FastqReader;

    fn record(name: &str, sequence: &str, quality: &str) -> FastqRecord {
        FastqRecord::new(name, sequence, quality)
    }

    #[test]
    fn test_bounds_inclusive() {
        let bounds = Bounds::new(10, 20);
        assert!(bounds.contains(10));
        assert!(bounds.contains(20));
        assert!(!bounds.contains(9));
        assert!(!bounds.contains(21));
    }

    #[test]
    fn test_scalar_coerces_to_upper_bound() {
        let bounds: Bounds<f64> = 60.0.into();
        assert_eq!(bounds, Bounds::new(0.0, 60.0));

        let bounds: Bounds<usize> = 100.into();
        assert_eq!(bounds, Bounds::new(0, 100));
    }

    #[test]
    fn test_default_accepts_everything() {
        let config = FilterConfig::default();
        assert!(config.passes(&record("r1", "ATGC", "!!!!")));
        assert!(config.passes(&record("r2", "", "")));
    }

    #[test]
    fn test_quality_threshold() {
        // '!' is score 0
        let r = record("r1", "ATGC", "!!!!");

        let strict = FilterConfig {
            quality_threshold: 10.0,
            ..FilterConfig::default()
        };
        assert!(!strict.passes(&r));

        let lax = FilterConfig {
            quality_threshold: 0.0,
            ..FilterConfig::default()
        };
        assert!(lax.passes(&r));
    }

    #[test]
    fn test_length_bounds() {
        let config = FilterConfig {
            length_bounds: Bounds::new(3, 5),
            ..FilterConfig::default()
        };
        assert!(!config.passes(&record("r1", "AT", "II")));
        assert!(config.passes(&record("r2", "ATG", "III")));
        assert!(config.passes(&record("r3", "ATGCA", "IIIII")));
        assert!(!config.passes(&record("r4", "ATGCAT", "IIIIII")));
    }

    #[test]
    fn test_gc_bounds_use_exact_percentage() {
        // 1/3 GC = 33.33...%
        let r = record("r1", "ATG", "III");
        let config = FilterConfig {
            gc_bounds: Bounds::new(33.0, 34.0),
            ..FilterConfig::default()
        };
        assert!(config.passes(&r));

        let config = FilterConfig {
            gc_bounds: Bounds::new(34.0, 100.0),
            ..FilterConfig::default()
        };
        assert!(!config.passes(&r));
    }

    #[test]
    fn test_filter_preserves_order_and_duplicates() {
        let records = vec![
            record("r1", "GGGG", "IIII"),
            record("r1", "ATAT", "IIII"),
            record("r2", "GCGC", "IIII"),
        ];
        let config = FilterConfig {
            gc_bounds: Bounds::new(50.0, 100.0),
            ..FilterConfig::default()
        };
        let kept: Vec<_> = filter_records(records, &config).collect();
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].name, "r1");
        assert_eq!(kept[0].sequence, "GGGG");
        assert_eq!(kept[1].name, "r2");
    }

    #[test]
    fn test_filter_file_round_trip() {
        let mut input = NamedTempFile::new().unwrap();
        write!(
            input,
            "@good\nGCGC\n+\nIIII\n@low_quality\nGCGC\n+\n!!!!\n@at_rich\nATAT\n+\nIIII\n"
        )
        .unwrap();
        let output = NamedTempFile::new().unwrap();

        let config = FilterConfig {
            gc_bounds: Bounds::new(50.0, 100.0),
            quality_threshold: 10.0,
            ..FilterConfig::default()
        };
        let (read, written) =
            filter_fastq_file(input.path(), output.path(), &config).unwrap();
        assert_eq!(read, 3);
        assert_eq!(written, 1);

        let kept: Vec<_> = FastqReader::from_path(output.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "good");
    }

    #[test]
    fn test_malformed_record_aborts_file_filter() {
        let mut input = NamedTempFile::new().unwrap();
        write!(input, "@r1\nATGC\n+\nII\n").unwrap();
        let output = NamedTempFile::new().unwrap();

        let result = filter_fastq_file(input.path(), output.path(), &FilterConfig::default());
        assert!(matches!(result, Err(FastqError::MalformedRecord { .. })));
    }
}
