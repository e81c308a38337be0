//! # nuctools - Nucleic-acid sequence utilities
//!
//! A small toolkit for everyday sequence work:
//! - `sequence`: DNA/RNA classification and pure transforms (complement,
//!   reverse complement, transcription, GC content, molecular weight,
//!   melting temperature)
//! - `dispatch`: keyword-driven dispatcher mapping an action plus a list of
//!   sequences to per-sequence results
//! - `fastq`: FASTQ record type with a streaming reader/writer
//! - `filter`: quality-based FASTQ filtering (length, GC, mean quality)
//! - `fasta`: multi-line to one-line FASTA reformatting
//!
//! All operations are synchronous and single pass; file handles are scoped
//! and released on every exit path.

pub mod dispatch;
pub mod fasta;
pub mod fastq;
pub mod filter;
pub mod sequence;
