//! Adapter implementations for the port traits.
//!
//! `live` talks to the real world, `recording` wraps a live adapter and
//! captures every interaction into a cassette, `replaying` serves those
//! interactions back, and `fixed` holds canned values for tests and demos.

pub mod fixed;
pub mod live;
pub mod recording;
pub mod replaying;
