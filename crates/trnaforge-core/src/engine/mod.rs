//! # Engine Module
//!
//! The computational core of the tRNA pipelines. Everything here operates on
//! in-memory records from [`crate::core`] and never touches the file system.
//!
//! - **Mutation** ([`mutation`]) - single-base anticodon substitutions that reassign a tRNA
//! - **Localization** ([`locator`]) - structure-guided anticodon placement with substring fallback
//! - **Library** ([`library`]) - original plus mutant entries for a set of tRNAs
//! - **Orthogonality** ([`orthogonality`]) - identity-element scoring against target isotypes
//! - **Worker Pool** ([`pool`]) - bounded execution of independent units with per-unit outcomes
//! - **Configuration** ([`config`]) and **Progress** ([`progress`]) shared by the workflows

pub mod config;
pub mod error;
pub mod library;
pub mod locator;
pub mod mutation;
pub mod orthogonality;
pub mod pool;
pub mod progress;
