//! # Core Module
//!
//! The stateless foundation of trnaforge: data models, the genetic-code table, and
//! readers/writers for the flat file formats produced and consumed by the tRNA design
//! workflow.
//!
//! ## Architecture
//!
//! - **Models** ([`models`]) - Amino acids, anticodons, tRNA records and alignment rows
//! - **Genetic Code** ([`genetic_code`]) - Static anticodon to amino-acid table
//! - **File I/O** ([`io`]) - tRNAscan-SE reports, id maps, candidate lists, FASTA,
//!   Stockholm alignments, identity-element tables and Rosetta score files
//!
//! Nothing in this module logs progress or holds state between calls; the
//! [`engine`](crate::engine) and [`workflows`](crate::workflows) layers build on it.

pub mod genetic_code;
pub mod io;
pub mod models;
