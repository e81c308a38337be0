//! nuctools - Nucleic-acid sequence utilities
//!
//! ## Usage
//!
//! ```bash
//! nuctools tools ATGC GCAT reverse_complement   # last argument is the action
//! nuctools filter reads.fastq -o kept.fastq --max-gc 60 --quality-threshold 20
//! nuctools flatten genome.fasta                 # writes genome_oneline.fasta
//! ```

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use nuctools::dispatch::{run_dna_rna_tools, Outcome};
use nuctools::fasta::convert_multiline_fasta_to_oneline;
use nuctools::filter::{filter_fastq_file, Bounds, FilterConfig};

/// nuctools - classify, transform, and filter nucleic-acid sequences
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a sequence tool: all arguments but the last are sequences, the
    /// last is the action (complement, reverse_complement, transcribe,
    /// reverse, what_is_that, MW, GC, Tm)
    Tools {
        /// Sequences followed by the action keyword
        #[arg(required = true, num_args = 2..)]
        args: Vec<String>,
    },

    /// Filter a FASTQ file by length, GC content, and mean quality
    Filter {
        /// Input FASTQ file
        input: PathBuf,

        /// Output FASTQ file for accepted reads
        #[arg(short = 'o', long = "output")]
        output: PathBuf,

        /// Minimum GC percentage (inclusive)
        #[arg(long = "min-gc", default_value_t = 0.0)]
        min_gc: f64,

        /// Maximum GC percentage (inclusive)
        #[arg(long = "max-gc", default_value_t = 100.0)]
        max_gc: f64,

        /// Minimum sequence length (inclusive)
        #[arg(long = "min-length", default_value_t = 0)]
        min_length: usize,

        /// Maximum sequence length (inclusive)
        #[arg(long = "max-length", default_value_t = 1 << 32)]
        max_length: usize,

        /// Minimum mean Phred+33 quality (inclusive)
        #[arg(short = 'q', long = "quality-threshold", default_value_t = 0.0)]
        quality_threshold: f64,
    },

    /// Rewrite a multi-line FASTA file with one sequence line per record
    Flatten {
        /// Input FASTA file
        input: PathBuf,

        /// Output file (default: <input-base>_oneline.<extension>)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Tools { args } => {
            match run_dna_rna_tools(&args)? {
                Outcome::Single(value) => println!("{}", value),
                Outcome::Many(values) => {
                    for value in values {
                        println!("{}", value);
                    }
                }
            }
        }
        Command::Filter {
            input,
            output,
            min_gc,
            max_gc,
            min_length,
            max_length,
            quality_threshold,
        } => {
            let config = FilterConfig {
                gc_bounds: Bounds::new(min_gc, max_gc),
                length_bounds: Bounds::new(min_length, max_length),
                quality_threshold,
            };
            let (read, written) = filter_fastq_file(&input, &output, &config)?;
            eprintln!("Kept {} of {} reads in {}", written, read, output.display());
        }
        Command::Flatten { input, output } => {
            let written = convert_multiline_fasta_to_oneline(&input, output.as_deref())?;
            eprintln!("Wrote {}", written.display());
        }
    }

    Ok(())
}
