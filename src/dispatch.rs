//! Action dispatcher for DNA/RNA sequence tools.
//!
//! Maps an action keyword plus a list of sequences to per-sequence results.
//! Each sequence is classified first; a sequence that does not satisfy the
//! action's alphabet requirement produces an inline diagnostic message in the
//! output instead of failing the call.
//!
//! The return shape is deliberately asymmetric: exactly one processed
//! sequence collapses to a single value, anything else is an ordered list.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::sequence::{
    complement_dna, complement_rna, gc_content, is_dna, is_rna, melting_temperature,
    reverse, reverse_complement_dna, reverse_complement_rna, ss_dna_weight,
    ss_rna_weight, transcribe, SequenceError,
};

/// Errors that can occur during dispatch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("unknown action '{0}'")]
    InvalidAction(String),

    #[error("no sequences given")]
    EmptyInput,

    #[error(transparent)]
    Sequence(#[from] SequenceError),
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// A sequence tool selected by keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Complement,
    ReverseComplement,
    Transcribe,
    Reverse,
    WhatIsThat,
    MolecularWeight,
    GcContent,
    MeltingTemperature,
}

impl FromStr for Action {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "complement" => Ok(Action::Complement),
            "reverse_complement" => Ok(Action::ReverseComplement),
            "transcribe" => Ok(Action::Transcribe),
            "reverse" => Ok(Action::Reverse),
            "what_is_that" => Ok(Action::WhatIsThat),
            "MW" => Ok(Action::MolecularWeight),
            "GC" => Ok(Action::GcContent),
            "Tm" => Ok(Action::MeltingTemperature),
            _ => Err(DispatchError::InvalidAction(s.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            Action::Complement => "complement",
            Action::ReverseComplement => "reverse_complement",
            Action::Transcribe => "transcribe",
            Action::Reverse => "reverse",
            Action::WhatIsThat => "what_is_that",
            Action::MolecularWeight => "MW",
            Action::GcContent => "GC",
            Action::MeltingTemperature => "Tm",
        };
        write!(f, "{}", keyword)
    }
}

/// Dispatch output: a single value when exactly one sequence was processed,
/// an ordered list otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Single(String),
    Many(Vec<String>),
}

impl Outcome {
    /// Returns the results as a slice regardless of shape.
    pub fn as_slice(&self) -> &[String] {
        match self {
            Outcome::Single(value) => std::slice::from_ref(value),
            Outcome::Many(values) => values,
        }
    }
}

/// Processes one sequence under the given action.
///
/// Classification failures are reported as diagnostic strings, matching the
/// per-action templates; only table-lookup failures propagate as errors.
fn apply(action: Action, seq: &str) -> DispatchResult<String> {
    let result = match action {
        Action::Complement => {
            if is_dna(seq) {
                complement_dna(seq)?
            } else if is_rna(seq) {
                complement_rna(seq)?
            } else {
                format!("{} is not RNA or DNA", seq)
            }
        }
        Action::ReverseComplement => {
            if is_dna(seq) {
                reverse_complement_dna(seq)?
            } else if is_rna(seq) {
                reverse_complement_rna(seq)?
            } else {
                format!("{} is not RNA or DNA", seq)
            }
        }
        Action::Transcribe => {
            if is_dna(seq) || is_rna(seq) {
                transcribe(seq)?
            } else {
                format!("{} is not RNA or DNA", seq)
            }
        }
        Action::Reverse => {
            if is_dna(seq) || is_rna(seq) {
                reverse(seq)
            } else {
                format!("{} is not RNA or DNA", seq)
            }
        }
        Action::WhatIsThat => {
            if is_dna(seq) {
                format!("{} is DNA", seq)
            } else if is_rna(seq) {
                format!("{} is RNA", seq)
            } else {
                format!("I don't know what {} is", seq)
            }
        }
        Action::MolecularWeight => {
            if is_dna(seq) {
                format!("{} Da for this DNA", ss_dna_weight(seq))
            } else if is_rna(seq) {
                format!("{} Da for this RNA", ss_rna_weight(seq))
            } else {
                format!("I don't know what {} is", seq)
            }
        }
        Action::GcContent => {
            if is_dna(seq) || is_rna(seq) {
                format!("GC content is {} %", gc_content(seq))
            } else {
                format!("I don't know what {} is", seq)
            }
        }
        Action::MeltingTemperature => {
            // Wallace rule only applies to DNA primers
            if is_dna(seq) {
                format!("Tm is {} degrees Celsius", melting_temperature(seq))
            } else {
                format!("I can't do it for {}", seq)
            }
        }
    };
    Ok(result)
}

/// Applies `action` to every sequence, in input order.
///
/// Returns [`Outcome::Single`] when exactly one sequence was given,
/// [`Outcome::Many`] otherwise. Zero sequences is an error.
pub fn dispatch<S: AsRef<str>>(action: Action, sequences: &[S]) -> DispatchResult<Outcome> {
    if sequences.is_empty() {
        return Err(DispatchError::EmptyInput);
    }

    let mut results = Vec::with_capacity(sequences.len());
    for seq in sequences {
        results.push(apply(action, seq.as_ref())?);
    }

    if results.len() == 1 {
        Ok(Outcome::Single(results.pop().expect("one result")))
    } else {
        Ok(Outcome::Many(results))
    }
}

/// Variadic-style entry point: all arguments but the last are sequences, the
/// last is the action keyword.
///
/// ```
/// use nuctools::dispatch::{run_dna_rna_tools, Outcome};
///
/// let out = run_dna_rna_tools(&["ATGC", "reverse"]).unwrap();
/// assert_eq!(out, Outcome::Single("CGTA".to_string()));
/// ```
pub fn run_dna_rna_tools<S: AsRef<str>>(args: &[S]) -> DispatchResult<Outcome> {
    let (action, sequences) = args.split_last().ok_or(DispatchError::EmptyInput)?;
    let action = Action::from_str(action.as_ref())?;
    dispatch(action, sequences)
}
