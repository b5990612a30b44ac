//! CLI command handling

pub mod check;
pub mod run;
pub mod stats;

pub use check::*;
pub use run::*;
pub use stats::*;
