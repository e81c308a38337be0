//! Nucleotide sequence classification and transformation.
//!
//! This module provides:
//! - Alphabet-based DNA/RNA classification
//! - Watson-Crick complement and reverse complement
//! - Transcription (T<->U substitution)
//! - Simple sequence statistics (molecular weight, GC content, melting temperature)
//!
//! All transforms are pure, case-preserving, and work character-by-character
//! over fixed substitution tables. A character outside the relevant table
//! fails the whole call with [`SequenceError::InvalidCharacter`].

use thiserror::Error;

/// Errors that can occur during sequence transforms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("invalid character '{base}' for {table} table")]
    InvalidCharacter { base: char, table: &'static str },
}

/// Result type for sequence transforms.
pub type SequenceResult<T> = Result<T, SequenceError>;

/// Returns true iff every character of `seq` is a DNA base (A, T, G, C or N,
/// case-insensitive).
///
/// The empty string is vacuously valid DNA (and valid RNA): classification is
/// alphabet membership only.
pub fn is_dna(seq: &str) -> bool {
    seq.chars()
        .all(|c| matches!(c.to_ascii_uppercase(), 'A' | 'T' | 'G' | 'C' | 'N'))
}

/// Returns true iff every character of `seq` is an RNA base (A, U, G, C or N,
/// case-insensitive).
pub fn is_rna(seq: &str) -> bool {
    seq.chars()
        .all(|c| matches!(c.to_ascii_uppercase(), 'A' | 'U' | 'G' | 'C' | 'N'))
}

/// Watson-Crick complement table for a single DNA base, case-preserving.
fn complement_dna_base(base: char) -> Option<char> {
    match base {
        'a' => Some('t'),
        'A' => Some('T'),
        't' => Some('a'),
        'T' => Some('A'),
        'g' => Some('c'),
        'G' => Some('C'),
        'c' => Some('g'),
        'C' => Some('G'),
        'n' => Some('n'),
        'N' => Some('N'),
        _ => None,
    }
}

/// Watson-Crick complement table for a single RNA base, case-preserving.
fn complement_rna_base(base: char) -> Option<char> {
    match base {
        'a' => Some('u'),
        'A' => Some('U'),
        'u' => Some('a'),
        'U' => Some('A'),
        'g' => Some('c'),
        'G' => Some('C'),
        'c' => Some('g'),
        'C' => Some('G'),
        'n' => Some('n'),
        'N' => Some('N'),
        _ => None,
    }
}

/// Transcription table: T<->U, all other bases map to themselves.
fn transcribe_base(base: char) -> Option<char> {
    match base {
        't' => Some('u'),
        'T' => Some('U'),
        'u' => Some('t'),
        'U' => Some('T'),
        'a' | 'g' | 'c' | 'n' | 'A' | 'G' | 'C' | 'N' => Some(base),
        _ => None,
    }
}

fn substitute(
    seq: &str,
    table: fn(char) -> Option<char>,
    table_name: &'static str,
) -> SequenceResult<String> {
    seq.chars()
        .map(|c| {
            table(c).ok_or(SequenceError::InvalidCharacter {
                base: c,
                table: table_name,
            })
        })
        .collect()
}

/// Computes the Watson-Crick complement of a DNA sequence (A<->T, G<->C, N unchanged).
pub fn complement_dna(seq: &str) -> SequenceResult<String> {
    substitute(seq, complement_dna_base, "DNA complement")
}

/// Computes the Watson-Crick complement of an RNA sequence (A<->U, G<->C, N unchanged).
pub fn complement_rna(seq: &str) -> SequenceResult<String> {
    substitute(seq, complement_rna_base, "RNA complement")
}

/// Returns the sequence with character order inverted.
pub fn reverse(seq: &str) -> String {
    seq.chars().rev().collect()
}

/// Complement then reverse, for DNA.
pub fn reverse_complement_dna(seq: &str) -> SequenceResult<String> {
    Ok(reverse(&complement_dna(seq)?))
}

/// Complement then reverse, for RNA.
pub fn reverse_complement_rna(seq: &str) -> SequenceResult<String> {
    Ok(reverse(&complement_rna(seq)?))
}

/// Transcribes between DNA and RNA notation: T becomes U and U becomes T,
/// all other bases pass through. Applied uniformly whatever the input
/// actually is, so transcribing twice is the identity.
pub fn transcribe(seq: &str) -> SequenceResult<String> {
    substitute(seq, transcribe_base, "transcription")
}

/// Average per-base weight used for single-stranded DNA, in Daltons.
pub const DNA_BASE_WEIGHT: usize = 330;

/// Average per-base weight used for single-stranded RNA, in Daltons.
pub const RNA_BASE_WEIGHT: usize = 340;

/// Single-strand DNA molecular weight: length x 330 Da.
///
/// A linear approximation, not a per-base sum.
pub fn ss_dna_weight(seq: &str) -> usize {
    seq.chars().count() * DNA_BASE_WEIGHT
}

/// Single-strand RNA molecular weight: length x 340 Da.
pub fn ss_rna_weight(seq: &str) -> usize {
    seq.chars().count() * RNA_BASE_WEIGHT
}

/// Exact GC percentage (0.0-100.0) of G/C characters among all characters,
/// case-insensitive. Ambiguous bases count in the denominator. Returns 0.0
/// for the empty sequence.
pub fn gc_percent(seq: &str) -> f64 {
    let total = seq.chars().count();
    if total == 0 {
        return 0.0;
    }
    let gc = seq
        .chars()
        .filter(|c| matches!(c.to_ascii_uppercase(), 'G' | 'C'))
        .count();
    gc as f64 / total as f64 * 100.0
}

/// GC percentage rounded to the nearest integer.
pub fn gc_content(seq: &str) -> u64 {
    gc_percent(seq).round() as u64
}

/// Wallace-rule melting temperature estimate for a DNA primer:
/// 2 x (A or T count) + 4 x (G or C count), in degrees Celsius.
///
/// Only meaningful for DNA-classified input; callers are expected to check
/// [`is_dna`] first.
pub fn melting_temperature(seq: &str) -> u64 {
    let mut at = 0u64;
    let mut gc = 0u64;
    for c in seq.chars() {
        match c.to_ascii_uppercase() {
            'A' | 'T' => at += 1,
            'G' | 'C' => gc += 1,
            _ => {}
        }
    }
    at * 2 + gc * 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_dna() {
        assert!(is_dna("ATGC"));
        assert!(is_dna("atgc"));
        assert!(is_dna("ACGTn"));
        assert!(!is_dna("AUGC"));
        assert!(!is_dna("ATXGC"));
    }

    #[test]
    fn test_is_rna() {
        assert!(is_rna("AUGC"));
        assert!(is_rna("augc"));
        assert!(is_rna("AUGCn"));
        assert!(!is_rna("ACGTn"));
        assert!(!is_rna("AUXGC"));
    }

    #[test]
    fn test_empty_string_is_both() {
        // Vacuously true: classification is alphabet membership only.
        assert!(is_dna(""));
        assert!(is_rna(""));
    }

    #[test]
    fn test_t_and_u_is_neither() {
        assert!(!is_dna("ATU"));
        assert!(!is_rna("ATU"));
    }

    #[test]
    fn test_complement_dna() {
        assert_eq!(complement_dna("ATGC").unwrap(), "TACG");
        assert_eq!(complement_dna("atgc").unwrap(), "tacg");
        assert_eq!(complement_dna("AnTN").unwrap(), "TnAN");
    }

    #[test]
    fn test_complement_rna() {
        assert_eq!(complement_rna("AUGC").unwrap(), "UACG");
        assert_eq!(complement_rna("augc").unwrap(), "uacg");
    }

    #[test]
    fn test_complement_invalid_character() {
        let err = complement_dna("ATXC").unwrap_err();
        assert_eq!(
            err,
            SequenceError::InvalidCharacter {
                base: 'X',
                table: "DNA complement"
            }
        );
        // U is not in the DNA table
        assert!(complement_dna("AUGC").is_err());
    }

    #[test]
    fn test_reverse() {
        assert_eq!(reverse("ATGC"), "CGTA");
        assert_eq!(reverse(""), "");
    }

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement_dna("ATGC").unwrap(), "GCAT");
        assert_eq!(reverse_complement_rna("AUGC").unwrap(), "GCAU");
    }

    #[test]
    fn test_reverse_complement_involution() {
        for seq in ["ATGC", "aattggcc", "ACGTNacgtn", "A", ""] {
            let twice =
                reverse_complement_dna(&reverse_complement_dna(seq).unwrap()).unwrap();
            assert_eq!(twice, seq);
        }
    }

    #[test]
    fn test_transcribe() {
        assert_eq!(transcribe("ATGC").unwrap(), "AUGC");
        assert_eq!(transcribe("AUGC").unwrap(), "ATGC");
        assert_eq!(transcribe("atgcn").unwrap(), "augcn");
        // Applied uniformly: transcribing twice is the identity
        assert_eq!(transcribe(&transcribe("ATuGC").unwrap()).unwrap(), "ATuGC");
        assert!(transcribe("ATX").is_err());
    }

    #[test]
    fn test_molecular_weight() {
        assert_eq!(ss_dna_weight("ATGC"), 4 * 330);
        assert_eq!(ss_rna_weight("AUGC"), 4 * 340);
        assert_eq!(ss_dna_weight(""), 0);
    }

    #[test]
    fn test_gc_content() {
        assert_eq!(gc_content("GCGC"), 100);
        assert_eq!(gc_content("ATAT"), 0);
        assert_eq!(gc_content("ATGC"), 50);
        assert_eq!(gc_content("gcgc"), 100);
        // N counts in the denominator
        assert_eq!(gc_content("GCNN"), 50);
    }

    #[test]
    fn test_gc_percent_exact() {
        assert!((gc_percent("ATG") - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(gc_percent(""), 0.0);
    }

    #[test]
    fn test_melting_temperature() {
        // Wallace rule: 2*(A+T) + 4*(G+C)
        assert_eq!(melting_temperature("ATGC"), 2 * 2 + 2 * 4);
        assert_eq!(melting_temperature("aaaa"), 8);
        assert_eq!(melting_temperature("GGGG"), 16);
        assert_eq!(melting_temperature(""), 0);
    }
}
