//! Data preparation stages for the ORKG embedding dataset.
//!
//! The stages run in order and each one produces a file the next consumes:
//!
//! 1. [`dump::fetch_dump`] downloads the N-Triples dump.
//! 2. [`sanitise::sanitise_dump`] removes malformed lines.
//! 3. [`graph::load_or_build`] parses the cleaned dump, caching the result.
//! 4. [`export::export_edges_to_path`] writes the tab-separated edge list.
//!
//! Stages that only transform files are skipped when their output already
//! exists; see [`StageOutcome`].

pub mod dump;
pub mod export;
pub mod graph;
pub mod layout;
mod outcome;
mod progress;
pub mod sanitise;

pub use outcome::StageOutcome;
pub use progress::Progress;
