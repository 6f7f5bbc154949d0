use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "tRNAforge CLI - design anticodon mutant tRNA libraries, score their orthogonality, and rank Rosetta docking results.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a TOML configuration file with `[design]`, `[orthogonality]`
    /// and `[collect]` tables.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S collect.workers=16
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", global = true)]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assign canonical GtRNAdb-style ids to tRNAscan-SE hits.
    NameMap(NameMapArgs),
    /// Generate single-base anticodon mutants for candidate tRNAs.
    Design(DesignArgs),
    /// Score query tRNAs against target isotypes at identity-element positions.
    Orthogonality(OrthogonalityArgs),
    /// Write protein/tRNA pair inputs for Rosetta.
    Prepare(PrepareArgs),
    /// Run the Rosetta scoring binary per sample and collect the best rows.
    Collect(CollectArgs),
    /// Aggregate docking scores per tRNA and rank them.
    Rank(RankArgs),
}

#[derive(Args, Debug)]
pub struct NameMapArgs {
    /// tRNAscan-SE secondary structure file (.ss).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Output TSV mapping tRNAscan-SE ids to canonical ids.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}

/// Inputs shared by the commands that start from a candidate list.
#[derive(Args, Debug)]
pub struct CandidateInputArgs {
    /// Candidate tRNA ids, one per line (a candidate_tRNAs.csv works too).
    #[arg(long, required = true, value_name = "PATH")]
    pub candidates: PathBuf,

    /// Id map TSV produced by `name-map`.
    #[arg(long, required = true, value_name = "PATH")]
    pub id_map: PathBuf,

    /// tRNAscan-SE secondary structure file (.ss).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub structures: PathBuf,
}

#[derive(Args, Debug)]
pub struct DesignArgs {
    #[command(flatten)]
    pub inputs: CandidateInputArgs,

    /// Output FASTA with originals and mutants.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Override the structure motif that closes the anticodon arm's 5' stem.
    #[arg(long, value_name = "MOTIF")]
    pub loop_marker: Option<String>,

    /// Override the number of loop bases between the stem and the anticodon.
    #[arg(long, value_name = "INT")]
    pub anticodon_offset: Option<usize>,
}

#[derive(Args, Debug)]
pub struct OrthogonalityArgs {
    /// Stockholm alignment of the query tRNAs.
    #[arg(long, required = true, value_name = "PATH")]
    pub query: PathBuf,

    /// Stockholm alignment of the target (host) tRNAs.
    #[arg(long, required = true, value_name = "PATH")]
    pub target: PathBuf,

    /// Identity elements: `<Isotype>RS<TAB><comma-separated positions>` per line.
    #[arg(long, required = true, value_name = "PATH")]
    pub identity_elements: PathBuf,

    /// Directory receiving the score table and the candidate table.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Override the self-score threshold below which a query is a candidate.
    #[arg(short, long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub threshold: Option<f64>,
}

#[derive(Args, Debug)]
pub struct PrepareArgs {
    #[command(flatten)]
    pub inputs: CandidateInputArgs,

    /// Protein FASTA; every chain is paired with every candidate tRNA.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub proteins: PathBuf,

    /// Directory receiving one FASTA and one structure file per pair.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output_dir: PathBuf,
}

#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Directory holding one sub-directory per sample.
    #[arg(short = 'd', long, required = true, value_name = "DIR")]
    pub samples_dir: PathBuf,

    /// Output CSV with the best row of every sample.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Override the number of concurrent scoring processes.
    #[arg(short, long, value_name = "INT")]
    pub workers: Option<usize>,

    /// Override the scoring command run inside each sample directory.
    #[arg(long, value_name = "COMMAND")]
    pub command: Option<String>,

    /// Override the score file name looked up in each sample directory.
    #[arg(long, value_name = "NAME")]
    pub score_file: Option<String>,
}

#[derive(Args, Debug)]
pub struct RankArgs {
    /// Score CSV with `sample_id` and `total_score` columns.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Protein ids to leave out, one per line.
    #[arg(short, long, value_name = "PATH")]
    pub block_list: Option<PathBuf>,

    /// Output CSV with per-tRNA statistics.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_options_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "trnaforge",
            "collect",
            "-d",
            "runs",
            "-o",
            "scores.csv",
            "-vv",
            "-S",
            "collect.workers=4",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.set_values, vec!["collect.workers=4"]);
        match cli.command {
            Commands::Collect(args) => {
                assert_eq!(args.samples_dir, PathBuf::from("runs"));
                assert!(args.workers.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn negative_threshold_is_accepted() {
        let cli = Cli::try_parse_from([
            "trnaforge",
            "orthogonality",
            "--query",
            "q.stk",
            "--target",
            "t.stk",
            "--identity-elements",
            "ie.txt",
            "-o",
            "out",
            "-t",
            "-0.25",
        ])
        .unwrap();
        match cli.command {
            Commands::Orthogonality(args) => assert_eq!(args.threshold, Some(-0.25)),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
