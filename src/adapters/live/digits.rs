//! Live adapter for the `DigitSource` port.

use rand::Rng;

use crate::ports::DigitSource;

/// Live digit source backed by the thread-local RNG.
pub struct LiveDigitSource;

impl LiveDigitSource {
    /// Creates a new live digit source.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for LiveDigitSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DigitSource for LiveDigitSource {
    fn next_digit(&self) -> u8 {
        rand::thread_rng().gen_range(0..=9)
    }
}
