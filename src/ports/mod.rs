//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the issuance core and an
//! external system (time, filesystem, randomness). Implementations live in
//! `src/adapters/`.

pub mod clock;
pub mod digits;
pub mod filesystem;

pub use clock::Clock;
pub use digits::DigitSource;
pub use filesystem::{FileSystem, LockGuard};
