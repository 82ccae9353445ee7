//! Digit source port for the filler digit in UPC codes.

/// Produces single decimal digits.
///
/// The UPC format reserves one position for a digit with no counter
/// meaning. Routing it through a port lets tests and cassette playback
/// reproduce issued codes exactly.
pub trait DigitSource: Send + Sync {
    /// Returns a digit in `0..=9`.
    fn next_digit(&self) -> u8;
}
