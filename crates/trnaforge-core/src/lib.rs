//! # tRNAforge Core Library
//!
//! Design and triage of orthogonal tRNAs: anticodon mutant libraries,
//! identity-element orthogonality scoring, and Rosetta docking score
//! collection and ranking.
//!
//! ## Layout
//!
//! - **[`core`]: The Foundation.** Typed records (`Anticodon`, `AminoAcid`,
//!   `TrnaRecord`, `AlignedTrna`), the standard genetic code, and readers and
//!   writers for tRNAscan-SE, FASTA, Stockholm, id maps and Rosetta score files.
//!
//! - **[`engine`]: The Logic Core.** Pure computations over loaded records:
//!   mutant generation, anticodon localization, orthogonality scoring, plus
//!   the bounded worker pool used for external tool runs and the progress
//!   reporting hooks.
//!
//! - **[`workflows`]: The Public API.** File-to-file pipelines combining the
//!   two layers above. The CLI is a thin shell around these.

pub mod core;
pub mod engine;
pub mod workflows;
