//! # Core Models Module
//!
//! Plain data types shared by the parsers, the design engine and the workflows.
//!
//! ## Key Components
//!
//! - [`amino_acid`] - The twenty standard amino acids plus explicit `Stop` and `Unknown` outcomes
//! - [`anticodon`] - Three-base anticodons in the RNA alphabet and single-base substitution
//! - [`trna`] - tRNAscan-SE entries, candidate tRNA records and anticodon mutants
//! - [`alignment`] - Aligned tRNA rows with their column-to-residue mapping
//!
//! All models are created per invocation from input files and carry no shared state.

pub mod alignment;
pub mod amino_acid;
pub mod anticodon;
pub mod trna;
