//! Shared test harness modules for the ORKG KGE CLI.

use super::*;

mod helpers;
mod pipeline_steps;
