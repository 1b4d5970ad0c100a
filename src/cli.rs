//! CLI argument parsing for the switch-discovery pipeline.
//!
//! The CLI is intentionally thin: every flag maps onto one field of the
//! resolved run configuration, with no policy beyond default values.
use clap::Parser;
use std::path::PathBuf;

/// Default FASTA input shipped with the repository.
pub const DEFAULT_INPUT: &str = "example_data/seed_riboswitches.fa";
/// Default RNAstructure installation root.
pub const DEFAULT_RNASTRUCTURE: &str = "/opt/RNAstructure";
/// Default RNApathfinder installation root.
pub const DEFAULT_RNAPATHFINDER: &str = "/opt/RNApathfinder";
/// Default fragment window length in bases.
pub const DEFAULT_FRAGMENT_LENGTH: u32 = 200;
/// Default worker-pool size forwarded to every stage.
pub const DEFAULT_NUM_PROCESSES: u32 = 20;
/// Default iteration count for the downstream mutation generator.
pub const DEFAULT_MUTATION_ITERATIONS: u32 = 100;
/// Default number of mutations generated per conformation downstream.
pub const DEFAULT_MUTATIONS_PER_CONFORMATION: u32 = 1;

/// Root CLI entrypoint for the five-stage switch-discovery pipeline.
#[derive(Parser, Debug)]
#[command(
    name = "swfind",
    version,
    about = "Identify candidate RNA conformational switches in a set of sequences",
    after_help = "Stages:\n  1. preprocess          Chop input sequences into fixed-length fragments\n  2. find_stems          Detect mutually exclusive stem pairs per fragment\n  3. fold_conformations  Fold the two conformations implied by each stem pair\n  4. energy_barriers     Compute the transition barrier between conformations\n  5. classify            Score fragments and render the candidate reports\n\nExamples:\n  swfind --input sequences.fa --workspace /tmp/swfind\n  swfind --input sequences.fa --fragment-length 150 --num-processes 8\n  swfind --rnastructure /opt/RNAstructure --rnapathfinder /opt/RNApathfinder --json"
)]
pub struct RootArgs {
    /// FASTA file with the target sequences
    #[arg(long, value_name = "FILE", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Scratch workspace root for intermediate artifacts
    #[arg(long, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// Fragment window length in bases
    #[arg(long, value_name = "BASES", default_value_t = DEFAULT_FRAGMENT_LENGTH)]
    pub fragment_length: u32,

    /// RNAstructure installation directory (structure-prediction engine)
    #[arg(long, value_name = "DIR", default_value = DEFAULT_RNASTRUCTURE)]
    pub rnastructure: PathBuf,

    /// RNApathfinder installation directory (path-finding engine)
    #[arg(long, value_name = "DIR", default_value = DEFAULT_RNAPATHFINDER)]
    pub rnapathfinder: PathBuf,

    /// Worker-pool size forwarded unchanged to each stage
    #[arg(long, value_name = "N", default_value_t = DEFAULT_NUM_PROCESSES)]
    pub num_processes: u32,

    /// Iteration count for the downstream mutation generator
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MUTATION_ITERATIONS)]
    pub mutation_iterations: u32,

    /// Mutations to generate per conformation downstream
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MUTATIONS_PER_CONFORMATION)]
    pub mutations_per_conformation: u32,

    /// Emit a verbose transcript of the workflow
    #[arg(long)]
    pub verbose: bool,

    /// Emit the final run summary as machine-readable JSON
    #[arg(long)]
    pub json: bool,
}
