//! Randomness port.

/// Provider of uniform draws in `[0, 1)`.
///
/// The session never reaches for an ambient generator; every draw goes
/// through this trait so tests can script exact sequences.
pub trait RandomSource {
    /// Returns the next draw. Must lie in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}
