//! Live adapters for real external interactions.

pub mod clock;
pub mod digits;
pub mod filesystem;

pub use clock::LiveClock;
pub use digits::LiveDigitSource;
pub use filesystem::LiveFileSystem;
