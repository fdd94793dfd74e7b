//! Core graph model for the ORKG embedding dataset tooling.
//!
//! The model is intentionally small: owned RDF [`Term`]s, [`Statement`]s
//! built from them, and a [`Graph`] holding a statement set with stable
//! iteration order. The [`snapshot`] module defines the private binary
//! format used to cache parsed graphs between runs.

#![forbid(unsafe_code)]

mod graph;
pub mod snapshot;
mod term;

pub use graph::Graph;
pub use snapshot::{Snapshot, SnapshotError, SnapshotWriteError};
pub use term::{Literal, Statement, Term};
