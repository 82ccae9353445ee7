//! Cassettes: YAML recordings of port interactions.
//!
//! A recorded issuance run can be replayed later to reproduce the exact
//! codes, timestamps and store contents it produced.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;
