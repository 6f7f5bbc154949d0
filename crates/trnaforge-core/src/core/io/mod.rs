//! Readers and writers for the file formats used across the tRNA pipeline.
//!
//! Record-oriented formats (tRNAscan-SE secondary structure output, FASTA,
//! Stockholm alignments) share the [`traits::RecordReader`] and
//! [`traits::RecordWriter`] interface. Tabular formats (id maps, identity
//! element tables, Rosetta score files and score CSVs) expose dedicated
//! functions because their shape does not fit a flat record list.

pub mod candidates;
pub mod fasta;
pub mod id_map;
pub mod identity;
pub mod rosetta;
pub mod stockholm;
pub mod traits;
pub mod trnascan;
