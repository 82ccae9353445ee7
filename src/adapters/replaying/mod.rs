//! Replaying adapters that serve recorded interactions.

pub mod clock;
pub mod digits;
pub mod filesystem;

pub use clock::ReplayingClock;
pub use digits::ReplayingDigitSource;
pub use filesystem::ReplayingFileSystem;
